//! SKU Resolution Chain
//!
//! Ordered best-effort search tiers for resolving a SKU to a product page:
//! the catalog's own site search, then a paid search API (when a key is
//! configured), then a generic web search. The driver stops at the first
//! hit; when every tier comes up empty the last failure note is what lands
//! in the lookup log. Adding a tier never touches call sites.

mod duckduckgo;
mod serpapi;
mod site;

pub use duckduckgo::DuckDuckGo;
pub use serpapi::SerpApi;
pub use site::SiteSearch;

use crate::tuning::Tuning;
use crate::types::{Confidence, SearchNote, SearchOutcome};
use scraper::{Html, Selector};
use std::time::Duration;

/// One search tier. Implementations never panic and never propagate
/// transport faults; they fold them into a `Failed` outcome.
pub trait SearchStrategy {
    fn name(&self) -> &'static str;
    fn search(&self, sku: &str) -> SearchOutcome;
}

/// What the chain settled on for one SKU. `url`/`title` are `None` when no
/// tier produced a hit.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub url: Option<String>,
    pub title: Option<String>,
    pub note: SearchNote,
    pub confidence: Confidence,
}

/// The production tier order: site search, paid API, generic web search.
pub fn default_strategies(tuning: &Tuning) -> Vec<Box<dyn SearchStrategy>> {
    let timeout = Duration::from_secs(tuning.request_timeout_secs);
    vec![
        Box::new(SiteSearch::new(&tuning.catalog, timeout)),
        Box::new(SerpApi::from_env(&tuning.catalog, timeout)),
        Box::new(DuckDuckGo::new(&tuning.catalog, timeout)),
    ]
}

/// Try each strategy in order, stopping at the first hit.
pub fn resolve_sku(sku: &str, strategies: &[Box<dyn SearchStrategy>]) -> Resolution {
    let mut last_note = SearchNote::NoResult;

    for strategy in strategies {
        match strategy.search(sku) {
            SearchOutcome::Found(hit) => {
                return Resolution {
                    url: Some(hit.url),
                    title: Some(hit.title),
                    note: hit.note,
                    confidence: hit.confidence,
                };
            }
            SearchOutcome::Skipped(note) | SearchOutcome::Failed(note) => {
                last_note = note;
            }
        }
    }

    Resolution {
        url: None,
        title: None,
        note: last_note,
        confidence: Confidence::None,
    }
}

/// Fetch a page and extract its `<title>` text. Any fault degrades to
/// `None`; the caller records an empty title rather than aborting the SKU.
pub(crate) fn fetch_page_title(client: &reqwest::blocking::Client, url: &str) -> Option<String> {
    let resp = client.get(url).send().ok()?;
    let html = resp.text().ok()?;
    let document = Html::parse_document(&html);
    let selector = Selector::parse("title").ok()?;
    let element = document.select(&selector).next()?;
    let title = element.text().collect::<String>().trim().to_string();
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Blocking client shared by the tiers: browser-ish UA, bounded redirects,
/// per-request timeout from tuning.
pub(crate) fn build_client(timeout: Duration) -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .user_agent("Mozilla/5.0")
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .unwrap_or_else(|_| reqwest::blocking::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchHit;

    struct Always(SearchOutcome);

    impl SearchStrategy for Always {
        fn name(&self) -> &'static str {
            "mock"
        }
        fn search(&self, _sku: &str) -> SearchOutcome {
            self.0.clone()
        }
    }

    fn found(url: &str) -> Box<dyn SearchStrategy> {
        Box::new(Always(SearchOutcome::Found(SearchHit {
            url: url.to_string(),
            title: "Some Product".to_string(),
            note: SearchNote::SiteSearch,
            confidence: Confidence::High,
        })))
    }

    fn failed(note: SearchNote) -> Box<dyn SearchStrategy> {
        Box::new(Always(SearchOutcome::Failed(note)))
    }

    fn skipped(note: SearchNote) -> Box<dyn SearchStrategy> {
        Box::new(Always(SearchOutcome::Skipped(note)))
    }

    #[test]
    fn test_stops_at_first_hit() {
        let strategies = vec![found("https://a.example/p1"), found("https://b.example/p2")];
        let res = resolve_sku("SKU-1", &strategies);
        assert_eq!(res.url.as_deref(), Some("https://a.example/p1"));
        assert_eq!(res.note, SearchNote::SiteSearch);
        assert_eq!(res.confidence, Confidence::High);
    }

    #[test]
    fn test_failure_falls_through_to_next_tier() {
        let strategies = vec![failed(SearchNote::NoResult), found("https://b.example/p2")];
        let res = resolve_sku("SKU-1", &strategies);
        assert_eq!(res.url.as_deref(), Some("https://b.example/p2"));
    }

    #[test]
    fn test_all_tiers_failing_keeps_last_note() {
        let strategies = vec![
            failed(SearchNote::NoResult),
            skipped(SearchNote::NoKey),
            failed(SearchNote::Error),
        ];
        let res = resolve_sku("SKU-1", &strategies);
        assert_eq!(res.url, None);
        assert_eq!(res.title, None);
        assert_eq!(res.note, SearchNote::Error);
        assert_eq!(res.confidence, Confidence::None);
    }

    #[test]
    fn test_skipped_tier_as_final_fallback_reports_no_key() {
        let strategies = vec![failed(SearchNote::NoResult), skipped(SearchNote::NoKey)];
        let res = resolve_sku("SKU-1", &strategies);
        assert_eq!(res.note, SearchNote::NoKey);
        assert_eq!(res.confidence, Confidence::None);
    }

    #[test]
    fn test_empty_chain_is_no_result() {
        let res = resolve_sku("SKU-1", &[]);
        assert_eq!(res.note, SearchNote::NoResult);
        assert_eq!(res.confidence, Confidence::None);
    }
}
