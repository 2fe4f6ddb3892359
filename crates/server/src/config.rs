//! Server configuration from environment variables

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to listen on (`PORT`)
    pub port: u16,
    /// Key for the generative model (`GEMINI_API_KEY`); remote tier is skipped without it
    pub gemini_api_key: Option<String>,
    /// Model name (`GEMINI_MODEL`)
    pub gemini_model: String,
    /// Asset catalog search endpoint (`ASSET_SEARCH_URL`)
    pub asset_search_url: Option<String>,
    /// Bound on every remote call (`REMOTE_TIMEOUT_MS`)
    pub remote_timeout: Duration,
    /// JSON snapshot of saved projects (`PROJECTS_PATH`); in-memory only when unset
    pub projects_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            asset_search_url: None,
            remote_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            projects_path: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT").map(|v| v.parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(e)) => {
                tracing::warn!("Ignoring invalid PORT: {e}");
                defaults.port
            }
            None => defaults.port,
        };

        let remote_timeout = match get("REMOTE_TIMEOUT_MS").map(|v| v.parse::<u64>()) {
            Some(Ok(ms)) => Duration::from_millis(ms),
            Some(Err(e)) => {
                tracing::warn!("Ignoring invalid REMOTE_TIMEOUT_MS: {e}");
                defaults.remote_timeout
            }
            None => defaults.remote_timeout,
        };

        Self {
            port,
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            asset_search_url: get("ASSET_SEARCH_URL"),
            remote_timeout,
            projects_path: get("PROJECTS_PATH").map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let cfg = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg.port, 3001);
        assert!(cfg.gemini_api_key.is_none());
        assert_eq!(cfg.gemini_model, "gemini-2.5-flash");
        assert_eq!(cfg.remote_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_values_read() {
        let cfg = ServerConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("GEMINI_API_KEY", "k"),
            ("REMOTE_TIMEOUT_MS", "250"),
            ("ASSET_SEARCH_URL", "https://assets.example/search"),
            ("PROJECTS_PATH", "/tmp/p.json"),
        ]));
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.gemini_api_key.as_deref(), Some("k"));
        assert_eq!(cfg.remote_timeout, Duration::from_millis(250));
        assert_eq!(cfg.asset_search_url.as_deref(), Some("https://assets.example/search"));
        assert_eq!(cfg.projects_path, Some(PathBuf::from("/tmp/p.json")));
    }

    #[test]
    fn test_invalid_and_empty_values_fall_back() {
        let cfg = ServerConfig::from_lookup(lookup(&[
            ("PORT", "not-a-port"),
            ("GEMINI_API_KEY", "  "),
            ("REMOTE_TIMEOUT_MS", "-1"),
        ]));
        assert_eq!(cfg.port, 3001);
        assert!(cfg.gemini_api_key.is_none());
        assert_eq!(cfg.remote_timeout, Duration::from_secs(15));
    }
}
