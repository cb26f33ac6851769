//! SKU Lookup Worker
//!
//! Resolves every SKU from the orders table against the product catalog
//! (site search, then SerpAPI when keyed, then DuckDuckGo), maps each found
//! title onto the technology taxonomy, and writes the lookup log and
//! per-technology totals. One record per SKU, no matter what fails.

use anyhow::Result;
use lead_estimator::{search, storage, tuning, worker};

fn main() -> Result<()> {
    let root = std::env::var("ROOT").unwrap_or_else(|_| ".".to_string());

    let tuning = tuning::load_tuning(&root)?;
    let skus = storage::read_unique_skus(&root, tuning.batch_limit)?;

    if skus.is_empty() {
        println!("No SKUs found in orders table.");
    } else {
        println!("Resolving {} SKUs against {}", skus.len(), tuning.catalog.domain);
    }

    let strategies = search::default_strategies(&tuning);
    let records = worker::run_batch(&skus, &strategies, &tuning);

    storage::write_lookup_log(&root, &records)?;
    storage::write_totals(&root, &worker::aggregate_totals(&records))?;

    let resolved = records.iter().filter(|r| !r.found_url.is_empty()).count();
    println!(
        "Wrote tracking/sku_lookup_log.csv with {} entries ({} resolved)",
        records.len(),
        resolved
    );

    Ok(())
}
