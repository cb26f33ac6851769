//! Lead Value Estimator Module
//!
//! The core estimation formula: look up the historical average along five
//! independent dimensions, average them, then scale by the lead-type and
//! job-title multipliers to get an expected value with a ±20% band.
//!
//! The estimator is total on its input domain: missing data always degrades
//! to the overall average or a neutral multiplier, never an error.

use crate::multipliers::{job_multiplier, lead_multiplier};
use crate::tuning::Tuning;
use crate::types::{AveragesTable, EstimateComponents, EstimateResult, LeadRequest};
use std::collections::HashMap;

/// Estimate the expected deal value for a lead.
///
/// Each dimension counts equally in the base mean regardless of how much
/// data sits behind it, and the band is a fixed ±20% — an explainable
/// simplification, not a statistical interval.
pub fn estimate(req: &LeadRequest, averages: &AveragesTable, tuning: &Tuning) -> EstimateResult {
    let overall = averages.overall_average;

    let tech_avg = resolve(&averages.by_technology, req.technology.as_deref(), overall);
    let country_avg = resolve(&averages.by_country, req.country.as_deref(), overall);
    // Region averages are keyed by country
    let region_avg = resolve(&averages.by_region, req.country.as_deref(), overall);
    let industry_avg = resolve(&averages.by_industry, req.industry.as_deref(), overall);
    let lead_avg = resolve(&averages.by_lead_type, Some(req.lead_type.as_str()), overall);

    let parts: Vec<f64> = [tech_avg, country_avg, region_avg, industry_avg, lead_avg]
        .iter()
        .filter_map(|p| *p)
        .collect();
    // Divisor floors at 1 so a fully unresolved lead yields 0, not a panic
    let base = parts.iter().sum::<f64>() / parts.len().max(1) as f64;

    let lm = lead_multiplier(&req.lead_type, &tuning.lead_multipliers);
    let (jm, _tier) = job_multiplier(req.job_title.as_deref(), &tuning.job_title_rules);

    let expected = base * lm * jm;

    EstimateResult {
        expected: round2(expected),
        low: round2(expected * 0.8),
        high: round2(expected * 1.2),
        components: EstimateComponents {
            tech_avg,
            country_avg,
            region_avg,
            industry_avg,
            lead_avg,
            base: round2(base),
            lead_multiplier: lm,
            job_multiplier: jm,
        },
    }
}

/// Look up a trimmed dimension value, falling back to the overall average
/// when the value is empty or absent from the table.
fn resolve(table: &HashMap<String, f64>, value: Option<&str>, overall: Option<f64>) -> Option<f64> {
    let key = value.unwrap_or("").trim();
    if key.is_empty() {
        return overall;
    }
    table.get(key).copied().or(overall)
}

/// Round to 2 decimal places, the precision of the response contract.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
