//! Literature-search tool and its collaborator seam.
//!
//! The tool itself is a pure adapter: it forwards the query to a
//! [`SearchProvider`] and formats whatever comes back. Retries, caching,
//! and transport concerns belong to the provider, not this layer. The
//! bundled provider queries the Crossref REST API for scholarly works.

use crate::tools::registry::Tool;
use crate::types::{AppError, ParamKind, ParamSpec, Result, ToolResult, ToolSpec};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

/// Registered name of the literature-search tool.
pub const TOOL_NAME: &str = "search";

/// Stable error code carried by failed search results.
pub const SEARCH_UNAVAILABLE: &str = "SearchUnavailable";

/// How many entries the formatted answer carries at most.
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// One search result: a paper title plus its stable identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub identifier: String,
}

/// External literature-search collaborator.
///
/// An empty-but-successful result is distinct from a failure; the tool
/// layer decides what either means for the user. Implementations must
/// fail fast (request timeouts) rather than hang.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}

// ============= Crossref collaborator =============

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Scholarly-works search backed by the Crossref REST API.
pub struct CrossrefSearch {
    http: reqwest::Client,
    base_url: String,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct CrossrefResponse {
    message: CrossrefMessage,
}

#[derive(Debug, Deserialize)]
struct CrossrefMessage {
    #[serde(default)]
    items: Vec<CrossrefWork>,
}

#[derive(Debug, Deserialize)]
struct CrossrefWork {
    #[serde(default)]
    title: Vec<String>,
    #[serde(rename = "DOI")]
    doi: Option<String>,
}

impl CrossrefSearch {
    /// `base_url` without a trailing slash, e.g. `https://api.crossref.org`.
    pub fn new(base_url: String, max_results: usize) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            max_results,
        })
    }
}

#[async_trait]
impl SearchProvider for CrossrefSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let url = format!("{}/works", self.base_url);
        let rows = self.max_results.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("query", query),
                ("rows", rows.as_str()),
                ("select", "title,DOI"),
            ])
            .send()
            .await
            .map_err(|e| AppError::SearchUnavailable(format!("Crossref request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::SearchUnavailable(format!(
                "Crossref returned status {}",
                response.status()
            )));
        }

        let body: CrossrefResponse = response
            .json()
            .await
            .map_err(|e| AppError::SearchUnavailable(format!("Crossref response malformed: {}", e)))?;

        Ok(body
            .message
            .items
            .into_iter()
            .filter_map(|work| {
                let title = work.title.into_iter().next()?;
                let identifier = work.doi?;
                Some(SearchHit { title, identifier })
            })
            .collect())
    }
}

// ============= Search tool =============

/// Literature-search tool: a thin adapter over the collaborator.
pub struct SearchTool {
    provider: Arc<dyn SearchProvider>,
    max_results: usize,
}

impl SearchTool {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

/// Forward a query to the collaborator and wrap the outcome in a ToolResult.
///
/// Collaborator failure and an empty result set both come back as a
/// `SearchUnavailable` result; neither crosses the tool boundary as an error.
pub async fn search_literature(
    provider: &dyn SearchProvider,
    query: &str,
    max_results: usize,
) -> ToolResult {
    match provider.search(query).await {
        Ok(hits) if hits.is_empty() => {
            tracing::debug!(query, "literature search returned no results");
            ToolResult::failure(TOOL_NAME, SEARCH_UNAVAILABLE)
        }
        Ok(hits) => {
            let shown = &hits[..hits.len().min(max_results)];
            ToolResult::ok(TOOL_NAME, format_results(shown))
        }
        Err(e) => {
            tracing::debug!(query, error = %e, "literature search collaborator failed");
            ToolResult::failure(TOOL_NAME, SEARCH_UNAVAILABLE)
        }
    }
}

fn format_results(hits: &[SearchHit]) -> String {
    let entries: Vec<String> = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| format!("{}. {}\n   {}", i + 1, hit.title, hit.identifier))
        .collect();

    format!(
        "Found {} matching papers:\n\n{}",
        hits.len(),
        entries.join("\n\n")
    )
}

#[async_trait]
impl Tool for SearchTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_NAME.to_string(),
            description: "Search the scholarly literature for papers matching a query"
                .to_string(),
            parameters: vec![ParamSpec::required("query", ParamKind::String)],
        }
    }

    async fn execute(&self, args: &serde_json::Map<String, serde_json::Value>) -> ToolResult {
        let Some(query) = args.get("query").and_then(|v| v.as_str()) else {
            return ToolResult::failure(TOOL_NAME, SEARCH_UNAVAILABLE);
        };

        search_literature(self.provider.as_ref(), query, self.max_results).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit(title: &str, identifier: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            identifier: identifier.to_string(),
        }
    }

    #[tokio::test]
    async fn formats_results_as_numbered_entries() {
        let mut provider = MockSearchProvider::new();
        provider.expect_search().returning(|_| {
            Ok(vec![
                hit("Attention Is All You Need", "10.48550/arXiv.1706.03762"),
                hit("Scaling Laws for Neural Language Models", "10.48550/arXiv.2001.08361"),
            ])
        });

        let result = search_literature(&provider, "transformer attention", 3).await;

        assert!(result.success);
        assert!(result.value.starts_with("Found 2 matching papers:"));
        assert!(result.value.contains("1. Attention Is All You Need"));
        assert!(result.value.contains("10.48550/arXiv.1706.03762"));
        assert!(result.value.contains("2. Scaling Laws"));
    }

    #[tokio::test]
    async fn caps_results_at_max() {
        let mut provider = MockSearchProvider::new();
        provider.expect_search().returning(|_| {
            Ok((1..=5)
                .map(|i| hit(&format!("Paper {}", i), &format!("10.1000/{}", i)))
                .collect())
        });

        let result = search_literature(&provider, "anything", 3).await;

        assert!(result.success);
        assert!(result.value.starts_with("Found 3 matching papers:"));
        assert!(!result.value.contains("Paper 4"));
    }

    #[tokio::test]
    async fn empty_result_set_is_unavailable() {
        let mut provider = MockSearchProvider::new();
        provider.expect_search().returning(|_| Ok(vec![]));

        let result = search_literature(&provider, "nothing", 3).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some(SEARCH_UNAVAILABLE));
    }

    #[tokio::test]
    async fn collaborator_failure_is_contained() {
        let mut provider = MockSearchProvider::new();
        provider
            .expect_search()
            .returning(|_| Err(AppError::SearchUnavailable("network down".to_string())));

        let result = search_literature(&provider, "anything", 3).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some(SEARCH_UNAVAILABLE));
    }

    #[tokio::test]
    async fn tool_execution_without_query_fails_closed() {
        let provider = Arc::new(MockSearchProvider::new());
        let tool = SearchTool::new(provider);

        let args = json!({});
        let result = tool.execute(args.as_object().unwrap()).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some(SEARCH_UNAVAILABLE));
    }

    #[test]
    fn spec_declares_required_query() {
        let tool = SearchTool::new(Arc::new(MockSearchProvider::new()));
        let spec = tool.spec();

        assert_eq!(spec.name, TOOL_NAME);
        assert_eq!(spec.parameters.len(), 1);
        assert_eq!(spec.parameters[0].name, "query");
        assert!(spec.parameters[0].required);
    }
}
