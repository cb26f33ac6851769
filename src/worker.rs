//! SKU Lookup Worker Module
//!
//! Drives the classification pipeline: each SKU goes through the search
//! chain, its title through the technology classifier, and exactly one
//! record comes out — a single SKU failure never aborts the batch. A fixed
//! pause between SKUs keeps the scraping polite.

use crate::search::{self, SearchStrategy};
use crate::tech_map::map_title_to_tech;
use crate::tuning::Tuning;
use crate::types::SkuRecord;
use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

/// Resolve and classify every SKU in input order, one record per SKU.
pub fn run_batch(skus: &[String], strategies: &[Box<dyn SearchStrategy>], tuning: &Tuning) -> Vec<SkuRecord> {
    let mut records = Vec::with_capacity(skus.len());

    for (i, sku) in skus.iter().enumerate() {
        println!("[{}/{}] Resolving SKU: {}", i + 1, skus.len(), sku);

        let resolution = search::resolve_sku(sku, strategies);
        let technology = map_title_to_tech(
            resolution.title.as_deref().unwrap_or(""),
            &tuning.technology_rules,
        );

        records.push(SkuRecord {
            sku: sku.clone(),
            found_url: resolution.url.unwrap_or_default(),
            product_title: resolution.title.unwrap_or_default(),
            mapped_technology: technology,
            confidence: resolution.confidence,
            notes: resolution.note,
        });

        // Politeness pause between lookups, not after the last one
        if i + 1 < skus.len() && tuning.pause_ms > 0 {
            thread::sleep(Duration::from_millis(tuning.pause_ms));
        }
    }

    records
}

/// Aggregate a run's records into per-technology counts.
pub fn aggregate_totals(records: &[SkuRecord]) -> BTreeMap<String, usize> {
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(record.mapped_technology.label().to_string()).or_insert(0) += 1;
    }
    totals
}
