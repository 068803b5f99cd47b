//! web_search tool - live web search via the SerpAPI Google endpoint

use std::time::Duration;

use async_trait::async_trait;
use eyre::Result;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{Tool, ToolResult};
use crate::config::SearchConfig;

/// Search the web and return titles, links, and snippets as markdown
pub struct WebSearchTool {
    api_key: String,
    base_url: String,
    engine: String,
    results: u32,
    http: reqwest::Client,
}

impl WebSearchTool {
    /// Create a search tool from configuration
    ///
    /// Reads the API key from the environment variable named in config.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        debug!(engine = %config.engine, base_url = %config.base_url, "from_config: called");
        let api_key = config.get_api_key()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent("tripplan/0.1 (web_search tool)")
            .build()?;

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            engine: config.engine.clone(),
            results: config.results,
            http,
        })
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &'static str {
        "web_search"
    }

    fn description(&self) -> &'static str {
        "Search the live web for current information. Returns result titles, links, and snippets."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Terms, keywords, or question to search for"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, input: Value) -> ToolResult {
        debug!(?input, "WebSearchTool::execute: called");
        let query = match input["query"].as_str() {
            Some(q) if !q.trim().is_empty() => q,
            Some(_) => {
                debug!("WebSearchTool::execute: empty query");
                return ToolResult::error("query must not be empty");
            }
            None => {
                debug!("WebSearchTool::execute: missing query parameter");
                return ToolResult::error("query is required");
            }
        };

        let url = format!("{}/search.json", self.base_url);

        debug!(%query, "WebSearchTool::execute: sending HTTP request");
        let response = match self
            .http
            .get(&url)
            .query(&[
                ("engine", self.engine.as_str()),
                ("q", query),
                ("num", &self.results.to_string()),
                ("api_key", &self.api_key),
            ])
            .send()
            .await
        {
            Ok(r) => {
                debug!(status = %r.status(), "WebSearchTool::execute: HTTP response received");
                r
            }
            Err(e) => {
                debug!(%e, "WebSearchTool::execute: HTTP request failed");
                return ToolResult::error(format!("Search request failed: {}", e));
            }
        };

        if !response.status().is_success() {
            debug!(status = %response.status(), "WebSearchTool::execute: HTTP error status");
            return ToolResult::error(format!("Search HTTP error: {}", response.status()));
        }

        let search: SearchResponse = match response.json().await {
            Ok(s) => s,
            Err(e) => {
                debug!(%e, "WebSearchTool::execute: failed to parse response");
                return ToolResult::error(format!("Failed to parse search response: {}", e));
            }
        };

        debug!(
            result_count = search.organic_results.len(),
            "WebSearchTool::execute: parsed results"
        );
        ToolResult::success(format_results(query, &search))
    }
}

/// Format search results as a markdown list the model can cite from
fn format_results(query: &str, search: &SearchResponse) -> String {
    debug!(%query, "format_results: called");
    if search.organic_results.is_empty() {
        return format!("No results found for: {}", query);
    }

    let mut out = format!("Search results for: {}\n\n", query);
    for result in &search.organic_results {
        let title = result.title.as_deref().unwrap_or("(untitled)");
        match (&result.link, &result.snippet) {
            (Some(link), Some(snippet)) => {
                out.push_str(&format!("- [{}]({}): {}\n", title, link, snippet));
            }
            (Some(link), None) => {
                out.push_str(&format!("- [{}]({})\n", title, link));
            }
            (None, Some(snippet)) => {
                out.push_str(&format!("- {}: {}\n", title, snippet));
            }
            (None, None) => {
                out.push_str(&format!("- {}\n", title));
            }
        }
    }
    out
}

// SerpAPI response types (only the fields we read)

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_tool() -> WebSearchTool {
        WebSearchTool {
            api_key: "test-key".to_string(),
            base_url: "https://serpapi.com".to_string(),
            engine: "google".to_string(),
            results: 10,
            http: reqwest::Client::new(),
        }
    }

    #[test]
    fn test_input_schema_requires_query() {
        let tool = test_tool();
        let schema = tool.input_schema();
        assert_eq!(schema["required"][0], "query");
        assert!(schema["properties"]["query"].is_object());
    }

    #[tokio::test]
    async fn test_execute_missing_query() {
        let tool = test_tool();
        let result = tool.execute(serde_json::json!({})).await;
        assert!(result.is_error);
        assert!(result.content.contains("query is required"));
    }

    #[tokio::test]
    async fn test_execute_empty_query() {
        let tool = test_tool();
        let result = tool.execute(serde_json::json!({"query": "  "})).await;
        assert!(result.is_error);
    }

    #[test]
    fn test_format_results_markdown_links() {
        let search: SearchResponse = serde_json::from_value(serde_json::json!({
            "organic_results": [
                {
                    "title": "Kyoto Travel Guide",
                    "link": "https://example.com/kyoto",
                    "snippet": "Everything about Kyoto."
                },
                {
                    "title": "No Link Result",
                    "snippet": "Just a snippet."
                }
            ]
        }))
        .unwrap();

        let text = format_results("kyoto", &search);
        assert!(text.contains("[Kyoto Travel Guide](https://example.com/kyoto): Everything about Kyoto."));
        assert!(text.contains("- No Link Result: Just a snippet."));
    }

    #[test]
    fn test_format_results_empty() {
        let search: SearchResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        let text = format_results("nowhere", &search);
        assert!(text.contains("No results found for: nowhere"));
    }

    #[test]
    fn test_tool_definition() {
        let tool = test_tool();
        let def = tool.definition();
        assert_eq!(def.name, "web_search");
        assert!(def.input_schema["properties"]["query"].is_object());
    }
}
