//! Estimate Binary
//!
//! One-shot lead value estimation: reads a JSON lead request from stdin (or
//! from a file given as the first argument), loads the averages table and
//! tunables, and prints the JSON estimate response to stdout.
//!
//! Example request:
//! `{"lead_type": "end user", "technology": "Addressable system", "job_title": "Plant Manager"}`

use anyhow::{Context, Result};
use lead_estimator::{estimator, storage, tuning, LeadRequest};
use std::fs;
use std::io::Read;

fn main() -> Result<()> {
    let root = std::env::var("ROOT").unwrap_or_else(|_| ".".to_string());

    let input = match std::env::args().nth(1) {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read lead request from {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read lead request from stdin")?;
            buf
        }
    };

    let request: LeadRequest =
        serde_json::from_str(&input).context("Failed to parse lead request JSON")?;

    let averages = storage::load_averages(&root)?;
    let tuning = tuning::load_tuning(&root)?;

    let result = estimator::estimate(&request, &averages, &tuning);
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
