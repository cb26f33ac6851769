use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::types::{AveragesTable, SkuRecord, TechnologyTotalsFile};

const AVERAGES_FILE: &str = "tracking/averages.json";
const ORDERS_FILE: &str = "tracking/clean_orders.csv";
const LOOKUP_LOG_FILE: &str = "tracking/sku_lookup_log.csv";
const TOTALS_FILE: &str = "tracking/totals.json";

/// Load the precomputed averages table. A missing or malformed file
/// degrades to the empty table so estimation still produces output.
pub fn load_averages(root: &str) -> Result<AveragesTable> {
    let path = PathBuf::from(root).join(AVERAGES_FILE);

    if !path.exists() {
        return Ok(AveragesTable::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read averages from {:?}", path))?;

    let averages: AveragesTable = serde_json::from_str(&content).unwrap_or_default();

    Ok(averages)
}

/// Read unique SKUs from the orders table, most frequent first (ties break
/// by SKU string for deterministic runs), truncated to `limit` when
/// nonzero. A missing file or missing `sku` column yields an empty list;
/// malformed rows are skipped.
pub fn read_unique_skus(root: &str, limit: usize) -> Result<Vec<String>> {
    let path = PathBuf::from(root).join(ORDERS_FILE);

    if !path.exists() {
        return Ok(vec![]);
    }

    let mut reader = csv::Reader::from_path(&path)
        .with_context(|| format!("Failed to open orders table {:?}", path))?;

    let headers = reader.headers().context("Failed to read orders header")?.clone();
    let sku_idx = match headers.iter().position(|h| h == "sku") {
        Some(idx) => idx,
        None => return Ok(vec![]),
    };

    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(_) => continue,
        };
        if let Some(sku) = record.get(sku_idx) {
            let sku = sku.trim();
            if !sku.is_empty() {
                *counts.entry(sku.to_string()).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut skus: Vec<String> = ranked.into_iter().map(|(sku, _)| sku).collect();
    if limit > 0 {
        skus.truncate(limit);
    }

    Ok(skus)
}

/// Write the lookup log, fully overwriting any previous run. The header row
/// is always present, even for an empty batch.
pub fn write_lookup_log(root: &str, records: &[SkuRecord]) -> Result<()> {
    let path = PathBuf::from(root).join(LOOKUP_LOG_FILE);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create tracking directory")?;
    }

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("Failed to open lookup log {:?}", path))?;

    writer.write_record(["sku", "found_url", "product_title", "mapped_technology", "confidence", "notes"])?;
    for record in records {
        writer.write_record([
            record.sku.as_str(),
            record.found_url.as_str(),
            record.product_title.as_str(),
            record.mapped_technology.label(),
            record.confidence.as_str(),
            record.notes.as_str(),
        ])?;
    }

    writer.flush().context("Failed to write lookup log")?;
    Ok(())
}

/// Write the per-technology totals with a last-updated stamp.
pub fn write_totals(root: &str, totals: &BTreeMap<String, usize>) -> Result<()> {
    let path = PathBuf::from(root).join(TOTALS_FILE);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create tracking directory")?;
    }

    let file = TechnologyTotalsFile {
        last_updated: Utc::now().to_rfc3339(),
        by_technology: totals.clone(),
    };

    let json = serde_json::to_string_pretty(&file)?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write totals to {:?}", path))?;
    Ok(())
}
