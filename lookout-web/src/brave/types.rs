use serde::{Deserialize, Serialize};

/// Query parameters for the Brave Web Search API.
#[derive(Debug, Clone)]
pub struct WebSearchRequest {
    pub query: String,

    /// Results per page (Brave caps this at 20)
    pub count: u32,

    /// Zero-based page index (Brave caps this at 9)
    pub offset: u32,

    /// Restrict which verticals are returned ("web,news,videos,...")
    pub result_filter: &'static str,
}

impl WebSearchRequest {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.query.clone()),
            ("count", self.count.to_string()),
            ("offset", self.offset.to_string()),
            ("result_filter", self.result_filter.to_string()),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebSearchApiResponse {
    #[serde(default)]
    pub query: Option<Query>,
    #[serde(default)]
    pub web: Option<Search>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Query {
    pub original: String,
    #[serde(default)]
    pub more_results_available: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One ranked web result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebHit {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl From<SearchResult> for WebHit {
    fn from(r: SearchResult) -> Self {
        Self {
            url: r.url,
            title: r.title,
            description: r.description,
        }
    }
}
