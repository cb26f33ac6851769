//! Catalog Site Search Tier
//!
//! Queries the catalog's own `?s=` search endpoint and picks the result
//! link whose anchor text mentions the SKU, falling back through common
//! result-list selectors to the first link on the page.

use super::{build_client, fetch_page_title, SearchStrategy};
use crate::tuning::CatalogConfig;
use crate::types::{Confidence, SearchHit, SearchNote, SearchOutcome};
use regex::RegexBuilder;
use scraper::{Html, Selector};
use std::time::Duration;

pub struct SiteSearch {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl SiteSearch {
    pub fn new(catalog: &CatalogConfig, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            base_url: catalog.base_url.clone(),
        }
    }
}

impl SearchStrategy for SiteSearch {
    fn name(&self) -> &'static str {
        "site_search"
    }

    fn search(&self, sku: &str) -> SearchOutcome {
        let sku = sku.trim();

        let resp = match self.client.get(&self.base_url).query(&[("s", sku)]).send() {
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

        let target = match find_result_link(&html, sku) {
            Some(url) => url,
            None => return SearchOutcome::Failed(SearchNote::NoResult),
        };

        // Second round-trip for the product page title; a failed fetch
        // degrades to an empty title, not a failed SKU
        let title = fetch_page_title(&self.client, &target).unwrap_or_default();

        SearchOutcome::Found(SearchHit {
            url: target,
            title,
            note: SearchNote::SiteSearch,
            confidence: Confidence::High,
        })
    }
}

/// Pick a result link: prefer an anchor whose text mentions the SKU, then
/// fall back through result-list selectors to the first link.
fn find_result_link(html: &str, sku: &str) -> Option<String> {
    let document = Html::parse_document(html);

    if let Ok(re) = RegexBuilder::new(&regex::escape(sku)).case_insensitive(true).build() {
        if let Ok(selector) = Selector::parse("a[href]") {
            for anchor in document.select(&selector) {
                let text = anchor.text().collect::<Vec<_>>().join(" ");
                if re.is_match(&text) {
                    if let Some(href) = anchor.value().attr("href") {
                        if !href.is_empty() {
                            return Some(href.to_string());
                        }
                    }
                }
            }
        }
    }

    for selector_str in ["article a[href]", ".result a[href]", "a[href]"] {
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
    fn test_prefers_anchor_mentioning_sku() {
        let html = r#"
            <html><body>
            <a href="/about">About us</a>
            <article><a href="/products/other">Some other product</a></article>
            <article><a href="/products/dt-200">Detector DT-200 Plus</a></article>
            </body></html>
        "#;
        assert_eq!(find_result_link(html, "dt-200"), Some("/products/dt-200".to_string()));
    }

    #[test]
    fn test_falls_back_to_first_result_link() {
        let html = r#"
            <html><body>
            <nav><a href="/home">Home</a></nav>
            <article><a href="/products/first">First result</a></article>
            </body></html>
        "#;
        assert_eq!(find_result_link(html, "ZX-999"), Some("/products/first".to_string()));
    }

    #[test]
    fn test_falls_back_to_any_link() {
        let html = r#"<html><body><a href="/only">Only link</a></body></html>"#;
        assert_eq!(find_result_link(html, "ZX-999"), Some("/only".to_string()));
    }

    #[test]
    fn test_no_links_at_all() {
        assert_eq!(find_result_link("<html><body><p>empty</p></body></html>", "ZX-999"), None);
    }
}
