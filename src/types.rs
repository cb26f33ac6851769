use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Historical average deal values, precomputed offline from order data.
///
/// Every dimension mapping may be incomplete; lookups that miss fall back to
/// `overall_average`. A missing or partial file deserializes to an empty
/// table rather than failing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AveragesTable {
    #[serde(default)]
    pub by_technology: HashMap<String, f64>,
    #[serde(default)]
    pub by_country: HashMap<String, f64>,
    #[serde(default)]
    pub by_region: HashMap<String, f64>,
    #[serde(default)]
    pub by_industry: HashMap<String, f64>,
    #[serde(default)]
    pub by_lead_type: HashMap<String, f64>,
    #[serde(default)]
    pub overall_average: Option<f64>,
}

/// A lead to estimate. Only `lead_type` is required; empty or whitespace
/// values behave the same as absent ones.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeadRequest {
    pub lead_type: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub technology: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
}

/// Per-dimension breakdown of an estimate. A `None` average means the
/// dimension missed and no overall fallback was available.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EstimateComponents {
    pub tech_avg: Option<f64>,
    pub country_avg: Option<f64>,
    pub region_avg: Option<f64>,
    pub industry_avg: Option<f64>,
    pub lead_avg: Option<f64>,
    pub base: f64,
    pub lead_multiplier: f64,
    pub job_multiplier: f64,
}

/// Estimator response. Field names are the external contract.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EstimateResult {
    pub expected: f64,
    pub low: f64,
    pub high: f64,
    pub components: EstimateComponents,
}

/// The nine technology categories a product title can map to.
/// "Other specialty detection" is the catch-all for empty or unmatched titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum TechnologyCategory {
    #[serde(rename = "Addressable system")]
    Addressable,
    #[serde(rename = "Conventional system")]
    Conventional,
    #[serde(rename = "Aspirating smoke detection")]
    Aspirating,
    #[serde(rename = "Wireless detection system")]
    Wireless,
    #[serde(rename = "Software & tools")]
    SoftwareTools,
    #[serde(rename = "Linear heat detection")]
    LinearHeat,
    #[serde(rename = "Flame detection")]
    Flame,
    #[serde(rename = "Security solutions")]
    Security,
    #[serde(rename = "Other specialty detection")]
    OtherSpecialty,
}

impl TechnologyCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TechnologyCategory::Addressable => "Addressable system",
            TechnologyCategory::Conventional => "Conventional system",
            TechnologyCategory::Aspirating => "Aspirating smoke detection",
            TechnologyCategory::Wireless => "Wireless detection system",
            TechnologyCategory::SoftwareTools => "Software & tools",
            TechnologyCategory::LinearHeat => "Linear heat detection",
            TechnologyCategory::Flame => "Flame detection",
            TechnologyCategory::Security => "Security solutions",
            TechnologyCategory::OtherSpecialty => "Other specialty detection",
        }
    }
}

impl fmt::Display for TechnologyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How much to trust a resolved SKU record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    None,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::None => "none",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status code recorded in the lookup log's `notes` column: which search
/// tier produced the hit, or why nothing was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchNote {
    SiteSearch,
    Serpapi,
    Duckduckgo,
    NoResult,
    NoKey,
    Error,
}

impl SearchNote {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchNote::SiteSearch => "site_search",
            SearchNote::Serpapi => "serpapi",
            SearchNote::Duckduckgo => "duckduckgo",
            SearchNote::NoResult => "no_result",
            SearchNote::NoKey => "no_key",
            SearchNote::Error => "error",
        }
    }
}

impl fmt::Display for SearchNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A successful search tier result: the product page and its title.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    pub note: SearchNote,
    pub confidence: Confidence,
}

/// Structured outcome of one search tier. `Skipped` means the tier was not
/// attempted (e.g. no API key) and does not count as a failure.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Found(SearchHit),
    Skipped(SearchNote),
    Failed(SearchNote),
}

/// One row of the SKU lookup log. One record per input SKU per run; the run
/// overwrites the full log.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SkuRecord {
    pub sku: String,
    pub found_url: String,
    pub product_title: String,
    pub mapped_technology: TechnologyCategory,
    pub confidence: Confidence,
    pub notes: SearchNote,
}

/// Per-technology record counts from a lookup run, for the offline averages
/// aggregation to consume.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TechnologyTotalsFile {
    pub last_updated: String,
    pub by_technology: BTreeMap<String, usize>,
}
