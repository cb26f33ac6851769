//! Tunable Configuration Module
//!
//! Loads the multiplier tables, keyword rules and scraper knobs from
//! Config/estimator.yaml. The file is optional: when absent, the built-in
//! hand-tuned defaults apply. Rule lists are ordered and evaluated in
//! sequence; reordering them in the config reorders matching priority.

use crate::types::TechnologyCategory;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One job-title seniority tier: first rule whose keyword appears in the
/// lowercased title wins.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JobTitleRule {
    pub label: String,
    pub keywords: Vec<String>,
    pub multiplier: f64,
}

/// One technology classification rule: first rule whose keyword appears in
/// the lowercased product title wins.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TechnologyRule {
    pub category: TechnologyCategory,
    pub keywords: Vec<String>,
}

/// The product catalog the SKU resolution chain searches against.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub domain: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://firesecurityproducts.com".to_string(),
            domain: "firesecurityproducts.com".to_string(),
        }
    }
}

/// All tunable parameters, loaded once at startup and passed explicitly to
/// the estimator and both classifiers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Tuning {
    /// Lead-type multipliers, matched case-insensitively; unknown types are
    /// neutral (1.0).
    pub lead_multipliers: HashMap<String, f64>,
    /// Ordered job-title seniority tiers.
    pub job_title_rules: Vec<JobTitleRule>,
    /// Ordered technology classification rules.
    pub technology_rules: Vec<TechnologyRule>,
    pub catalog: CatalogConfig,
    /// Maximum number of SKUs processed per run (0 = unlimited).
    pub batch_limit: usize,
    /// Politeness delay between SKU lookups, in milliseconds.
    pub pause_ms: u64,
    /// Per-request network timeout, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lead_multipliers: [
                ("end user", 1.0),
                ("distributor", 0.6),
                ("installer", 0.5),
                ("consultant", 0.4),
            ]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect(),
            job_title_rules: vec![
                job_rule("c-level/owner", &["ceo", "cfo", "owner"], 1.3),
                job_rule("founder", &["founder"], 1.25),
                job_rule("director/head", &["director", "head"], 1.15),
                job_rule("manager", &["manager"], 1.1),
                job_rule("engineer", &["engineer"], 0.95),
                job_rule("technician", &["technician"], 0.9),
                job_rule("installer", &["installer"], 0.85),
            ],
            technology_rules: vec![
                tech_rule(
                    TechnologyCategory::Addressable,
                    &["address", "addressable", "panel", "module", "zone", "control panel", "io module"],
                ),
                tech_rule(
                    TechnologyCategory::Conventional,
                    &["conventional", "bell", "sounder", "zone plate", "analog"],
                ),
                tech_rule(
                    TechnologyCategory::Aspirating,
                    &["vesda", "aspirating", "aspiration", "vedas", "asp"],
                ),
                tech_rule(
                    TechnologyCategory::Wireless,
                    &["wireless", "zigbee", "zwave", "rf module", "radio"],
                ),
                tech_rule(
                    TechnologyCategory::SoftwareTools,
                    &["software", "license", "tool", "configurator", "app", "firmware"],
                ),
                tech_rule(
                    TechnologyCategory::LinearHeat,
                    &["linear", "lhd", "linear heat", "heat cable"],
                ),
                tech_rule(
                    TechnologyCategory::Flame,
                    &["flame", "uv flame", "flame detector"],
                ),
                tech_rule(
                    TechnologyCategory::Security,
                    &["access", "credential", "reader", "controller", "door", "strike"],
                ),
            ],
            catalog: CatalogConfig::default(),
            batch_limit: 500,
            pause_ms: 1200,
            request_timeout_secs: 15,
        }
    }
}

fn job_rule(label: &str, keywords: &[&str], multiplier: f64) -> JobTitleRule {
    JobTitleRule {
        label: label.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        multiplier,
    }
}

fn tech_rule(category: TechnologyCategory, keywords: &[&str]) -> TechnologyRule {
    TechnologyRule {
        category,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

/// Load tunables from Config/estimator.yaml under the given root.
///
/// A missing file yields the defaults; a malformed file is an error (bad
/// config should not be silently ignored).
pub fn load_tuning(root: &str) -> Result<Tuning> {
    let path = Path::new(root).join("Config").join("estimator.yaml");

    if !path.exists() {
        return Ok(Tuning::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read tunables from {:?}", path))?;

    let tuning: Tuning = serde_yaml::from_str(&content)
        .with_context(|| "Failed to parse estimator.yaml")?;

    Ok(tuning)
}
