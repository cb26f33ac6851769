//! Generic Web Search Tier
//!
//! Last-resort tier: the same domain-scoped query against DuckDuckGo's
//! rendered HTML results page. Hits here are only medium confidence — the
//! first result of a generic engine is a weaker signal than the catalog's
//! own search.

use super::{build_client, fetch_page_title, SearchStrategy};
use crate::tuning::CatalogConfig;
use crate::types::{Confidence, SearchHit, SearchNote, SearchOutcome};
use scraper::{Html, Selector};
use std::time::Duration;

const DUCKDUCKGO_ENDPOINT: &str = "https://html.duckduckgo.com/html";

pub struct DuckDuckGo {
    client: reqwest::blocking::Client,
    domain: String,
}

impl DuckDuckGo {
    pub fn new(catalog: &CatalogConfig, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            domain: catalog.domain.clone(),
        }
    }
}

impl SearchStrategy for DuckDuckGo {
    fn name(&self) -> &'static str {
        "duckduckgo"
    }

    fn search(&self, sku: &str) -> SearchOutcome {
        let query = format!("site:{} {}", self.domain, sku.trim());
        let resp = match self
            .client
            .get(DUCKDUCKGO_ENDPOINT)
            .query(&[("q", query.as_str())])
            .send()
        {
            Ok(resp) => resp,
            Err(_) => return SearchOutcome::Failed(SearchNote::Error),
        };

        if !resp.status().is_success() {
            return SearchOutcome::Failed(SearchNote::NoResult);
        }

        let html = match resp.text() {
            Ok(html) => html,
            Err(_) => return SearchOutcome::Failed(SearchNote::Error),
        };

        let target = match first_result_link(&html) {
            Some(url) => url,
            None => return SearchOutcome::Failed(SearchNote::NoResult),
        };

        let title = fetch_page_title(&self.client, &target).unwrap_or_default();

        SearchOutcome::Found(SearchHit {
            url: target,
            title,
            note: SearchNote::Duckduckgo,
            confidence: Confidence::Medium,
        })
    }
}

/// First result link on the rendered results page, preferring the result
/// anchor class over bare links.
fn first_result_link(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    for selector_str in ["a.result__a", "a[href]"] {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(anchor) = document.select(&selector).next() {
                if let Some(href) = anchor.value().attr("href") {
                    if !href.is_empty() {
                        return Some(href.to_string());
                    }
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_result_anchor() {
        let html = r#"
            <html><body>
            <a href="/settings">Settings</a>
            <a class="result__a" href="https://firesecurityproducts.com/p/dt-200">DT-200</a>
            </body></html>
        "#;
        assert_eq!(
            first_result_link(html),
            Some("https://firesecurityproducts.com/p/dt-200".to_string())
        );
    }

    #[test]
    fn test_falls_back_to_first_link() {
        let html = r#"<html><body><a href="https://example.com/a">A</a></body></html>"#;
        assert_eq!(first_result_link(html), Some("https://example.com/a".to_string()));
    }

    #[test]
    fn test_no_results() {
        assert_eq!(first_result_link("<html><body></body></html>"), None);
    }
}
