//! Asset catalog search adapter.
//!
//! Upstream may answer with an HTML error page instead of JSON. Any body
//! whose trimmed text starts with `<` is classified unusable without a
//! parse attempt.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::ServerConfig;
use crate::error::AdapterError;

/// Result of a catalog lookup that reached the upstream service
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found { url: String },
    Unusable { reason: String },
}

impl SearchOutcome {
    fn unusable(reason: impl Into<String>) -> Self {
        SearchOutcome::Unusable {
            reason: reason.into(),
        }
    }
}

/// External catalog of pre-made assets
#[async_trait]
pub trait AssetSearch: Send + Sync {
    async fn search(&self, keyword: &str) -> Result<SearchOutcome, AdapterError>;
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    url: Option<String>,
}

/// Classify a raw response body
pub fn classify_body(body: &str) -> SearchOutcome {
    let trimmed = body.trim();
    if trimmed.starts_with('<') {
        return SearchOutcome::unusable("upstream returned an HTML document");
    }
    if trimmed.is_empty() {
        return SearchOutcome::unusable("empty body");
    }

    let parsed: SearchResponse = match serde_json::from_str(trimmed) {
        Ok(parsed) => parsed,
        Err(e) => return SearchOutcome::unusable(format!("unparseable body: {e}")),
    };

    parsed
        .results
        .into_iter()
        .find_map(|hit| hit.url.filter(|url| !url.trim().is_empty()))
        .map(|url| SearchOutcome::Found { url })
        .unwrap_or_else(|| SearchOutcome::unusable("no results"))
}

/// HTTP GET `{base_url}?q=<keyword>`
pub struct HttpAssetSearch {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAssetSearch {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Option<Self> {
        config.asset_search_url.as_ref().map(|url| Self::new(url.clone()))
    }
}

#[async_trait]
impl AssetSearch for HttpAssetSearch {
    async fn search(&self, keyword: &str) -> Result<SearchOutcome, AdapterError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", keyword)])
            .send()
            .await?;

        // Error pages are still inspected as bodies; a 4xx/5xx with HTML is the common case.
        let status = response.status();
        let body = response.text().await?;
        let outcome = classify_body(&body);
        if !status.is_success() {
            if let SearchOutcome::Found { .. } = outcome {
                return Err(AdapterError::Status(status.as_u16()));
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_body_is_unusable() {
        let outcome = classify_body("  \n<!DOCTYPE html><html><body>403 Forbidden</body></html>");
        assert!(matches!(outcome, SearchOutcome::Unusable { reason } if reason.contains("HTML")));
    }

    #[test]
    fn test_html_with_braces_is_not_parsed() {
        // would yield a url if sliced between braces
        let body = r#"<pre>{"results":[{"url":"https://x/car.glb"}]}</pre>"#;
        assert!(matches!(classify_body(body), SearchOutcome::Unusable { .. }));
    }

    #[test]
    fn test_first_result_url() {
        let body = r#"{"results":[{"url":"https://x/car.glb","title":"Car"},{"url":"https://x/b.glb"}]}"#;
        assert_eq!(
            classify_body(body),
            SearchOutcome::Found {
                url: "https://x/car.glb".into()
            }
        );
    }

    #[test]
    fn test_empty_results_unusable() {
        assert!(matches!(
            classify_body(r#"{"results":[]}"#),
            SearchOutcome::Unusable { .. }
        ));
        assert!(matches!(classify_body(""), SearchOutcome::Unusable { .. }));
    }

    #[test]
    fn test_results_without_url_unusable() {
        assert!(matches!(
            classify_body(r#"{"results":[{"title":"Car"}]}"#),
            SearchOutcome::Unusable { .. }
        ));
    }

    #[test]
    fn test_garbage_unusable() {
        assert!(matches!(classify_body("rate limited"), SearchOutcome::Unusable { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_search_is_transport_error() {
        let search = HttpAssetSearch::new("http://127.0.0.1:9/search");
        assert!(matches!(search.search("car").await, Err(AdapterError::Http(_))));
    }
}
