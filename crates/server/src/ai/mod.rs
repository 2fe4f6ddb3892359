//! Remote generation adapter: prompt in, free text out.
//!
//! The adapter does no interpretation of the text. Sanitization and
//! fallback belong to the resolver.

use async_trait::async_trait;

use crate::config::ServerConfig;
use crate::error::AdapterError;

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// A remote generative language model
#[async_trait]
pub trait RemoteGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AdapterError>;
}

/// Google Gemini `generateContent` client
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiGenerator {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint: GEMINI_ENDPOINT.to_string(),
        }
    }

    /// Build from config; `None` when no API key is configured
    pub fn from_config(config: &ServerConfig) -> Option<Self> {
        config
            .gemini_api_key
            .as_ref()
            .map(|key| Self::new(key.clone(), config.gemini_model.clone()))
    }

    /// Point the client at a different base URL (used against local stubs)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl RemoteGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, AdapterError> {
        let url = format!("{}/{}:generateContent", self.endpoint, self.model);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&serde_json::json!({
                "contents": [
                    { "parts": [ { "text": prompt } ] }
                ]
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        extract_text(&body)
    }
}

/// Concatenate the text parts of the first candidate
fn extract_text(body: &serde_json::Value) -> Result<String, AdapterError> {
    let parts = body["candidates"]
        .as_array()
        .and_then(|arr| arr.first())
        .and_then(|candidate| candidate["content"]["parts"].as_array())
        .ok_or_else(|| AdapterError::Malformed("no candidate parts".into()))?;

    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();

    if text.is_empty() {
        return Err(AdapterError::Malformed("empty candidate text".into()));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_joins_parts() {
        let body = serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": "{\"mode\":" }, { "text": "\"CHAT\"}" } ] } }
            ]
        });
        assert_eq!(extract_text(&body).unwrap(), r#"{"mode":"CHAT"}"#);
    }

    #[test]
    fn test_extract_text_missing_candidates() {
        let body = serde_json::json!({ "error": { "code": 400 } });
        assert!(matches!(extract_text(&body), Err(AdapterError::Malformed(_))));
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = ServerConfig::default();
        assert!(GeminiGenerator::from_config(&config).is_none());

        let config = ServerConfig {
            gemini_api_key: Some("k".into()),
            ..ServerConfig::default()
        };
        let generator = GeminiGenerator::from_config(&config).unwrap();
        assert_eq!(generator.model, "gemini-2.5-flash");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let generator = GeminiGenerator::new("k", "m").with_endpoint("http://127.0.0.1:9");
        assert!(matches!(
            generator.generate("hi").await,
            Err(AdapterError::Http(_))
        ));
    }
}
