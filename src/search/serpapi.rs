//! Paid Search API Tier
//!
//! Queries SerpAPI for the SKU scoped to the catalog domain and takes the
//! first organic result. Only attempted when an API key is configured;
//! without one the tier is skipped outright rather than counted as a
//! failure. The result already carries a title, so no second fetch.

use super::{build_client, SearchStrategy};
use crate::tuning::CatalogConfig;
use crate::types::{Confidence, SearchHit, SearchNote, SearchOutcome};
use std::env;
use std::time::Duration;

const SERPAPI_ENDPOINT: &str = "https://serpapi.com/search";

pub struct SerpApi {
    client: reqwest::blocking::Client,
    domain: String,
    api_key: Option<String>,
}

impl SerpApi {
    pub fn new(catalog: &CatalogConfig, timeout: Duration, api_key: Option<String>) -> Self {
        Self {
            client: build_client(timeout),
            domain: catalog.domain.clone(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Key comes from the SERPAPI_KEY environment variable.
    pub fn from_env(catalog: &CatalogConfig, timeout: Duration) -> Self {
        Self::new(catalog, timeout, env::var("SERPAPI_KEY").ok())
    }
}

impl SearchStrategy for SerpApi {
    fn name(&self) -> &'static str {
        "serpapi"
    }

    fn search(&self, sku: &str) -> SearchOutcome {
        let key = match &self.api_key {
            Some(key) => key,
            None => return SearchOutcome::Skipped(SearchNote::NoKey),
        };

        let query = format!("site:{} {}", self.domain, sku.trim());
        let resp = match self
            .client
            .get(SERPAPI_ENDPOINT)
            .query(&[("engine", "google"), ("q", query.as_str()), ("api_key", key.as_str())])
            .send()
        {
            Ok(resp) => resp,
            Err(_) => return SearchOutcome::Failed(SearchNote::Error),
        };

        let data: serde_json::Value = match resp.json() {
            Ok(data) => data,
            Err(_) => return SearchOutcome::Failed(SearchNote::Error),
        };

        if let Some(first) = data
            .get("organic_results")
            .and_then(|r| r.as_array())
            .and_then(|a| a.first())
        {
            if let Some(link) = first.get("link").and_then(|v| v.as_str()) {
                let title = first
                    .get("title")
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .trim()
                    .to_string();
                return SearchOutcome::Found(SearchHit {
                    url: link.to_string(),
                    title,
                    note: SearchNote::Serpapi,
                    confidence: Confidence::High,
                });
            }
        }

        SearchOutcome::Failed(SearchNote::NoResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_key_is_skipped_not_failed() {
        let tier = SerpApi::new(&CatalogConfig::default(), Duration::from_secs(1), None);
        match tier.search("DT-200") {
            SearchOutcome::Skipped(SearchNote::NoKey) => {}
            other => panic!("expected Skipped(no_key), got {:?}", other),
        }
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let tier = SerpApi::new(
            &CatalogConfig::default(),
            Duration::from_secs(1),
            Some("   ".to_string()),
        );
        match tier.search("DT-200") {
            SearchOutcome::Skipped(SearchNote::NoKey) => {}
            other => panic!("expected Skipped(no_key), got {:?}", other),
        }
    }
}
