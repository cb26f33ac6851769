//! Multiplier Resolution Module
//!
//! Resolves the two adjustment factors applied on top of the base average:
//! the lead-type class multiplier and the job-title seniority multiplier.
//! Both degrade to neutral (1.0) instead of failing.

use crate::tuning::JobTitleRule;
use std::collections::HashMap;

/// Resolve the lead-type multiplier by case-insensitive exact match.
/// Unrecognized lead types are neutral, not an error.
pub fn lead_multiplier(lead_type: &str, table: &HashMap<String, f64>) -> f64 {
    let wanted = lead_type.trim().to_lowercase();
    table
        .iter()
        .find(|(k, _)| k.to_lowercase() == wanted)
        .map(|(_, v)| *v)
        .unwrap_or(1.0)
}

/// Resolve the job-title multiplier and its tier label.
///
/// The rules are tested in order against the lowercased title; the first
/// rule with any keyword present wins. Empty titles and titles matching no
/// tier are neutral.
pub fn job_multiplier<'a>(title: Option<&str>, rules: &'a [JobTitleRule]) -> (f64, &'a str) {
    let title = title.unwrap_or("").trim();
    if title.is_empty() {
        return (1.0, "default");
    }

    let t = title.to_lowercase();
    for rule in rules {
        if rule.keywords.iter().any(|k| t.contains(k.as_str())) {
            return (rule.multiplier, rule.label.as_str());
        }
    }

    (1.0, "default")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_lead_multiplier_known_types() {
        let tuning = Tuning::default();
        assert_eq!(lead_multiplier("end user", &tuning.lead_multipliers), 1.0);
        assert_eq!(lead_multiplier("distributor", &tuning.lead_multipliers), 0.6);
        assert_eq!(lead_multiplier("installer", &tuning.lead_multipliers), 0.5);
        assert_eq!(lead_multiplier("consultant", &tuning.lead_multipliers), 0.4);
    }

    #[test]
    fn test_lead_multiplier_case_insensitive() {
        let tuning = Tuning::default();
        assert_eq!(lead_multiplier("End User", &tuning.lead_multipliers), 1.0);
        assert_eq!(lead_multiplier("  DISTRIBUTOR ", &tuning.lead_multipliers), 0.6);
    }

    #[test]
    fn test_lead_multiplier_unknown_is_neutral() {
        let tuning = Tuning::default();
        assert_eq!(lead_multiplier("reseller", &tuning.lead_multipliers), 1.0);
        assert_eq!(lead_multiplier("", &tuning.lead_multipliers), 1.0);
    }

    #[test]
    fn test_job_multiplier_c_level() {
        let tuning = Tuning::default();
        let (m, label) = job_multiplier(Some("CEO & Co-Owner"), &tuning.job_title_rules);
        assert_eq!(m, 1.3);
        assert_eq!(label, "c-level/owner");
    }

    #[test]
    fn test_job_multiplier_director_beats_engineer() {
        // "Senior Director of Engineering" contains both "director" and
        // "engineer"; the director tier is tested first.
        let tuning = Tuning::default();
        let (m, label) = job_multiplier(Some("Senior Director of Engineering"), &tuning.job_title_rules);
        assert_eq!(m, 1.15);
        assert_eq!(label, "director/head");
    }

    #[test]
    fn test_job_multiplier_engineer_beats_technician() {
        let tuning = Tuning::default();
        let (m, label) = job_multiplier(Some("Field Engineer / Technician"), &tuning.job_title_rules);
        assert_eq!(m, 0.95);
        assert_eq!(label, "engineer");
    }

    #[test]
    fn test_job_multiplier_empty_and_unknown_are_neutral() {
        let tuning = Tuning::default();
        assert_eq!(job_multiplier(None, &tuning.job_title_rules), (1.0, "default"));
        assert_eq!(job_multiplier(Some("   "), &tuning.job_title_rules), (1.0, "default"));
        assert_eq!(job_multiplier(Some("Accountant"), &tuning.job_title_rules), (1.0, "default"));
    }

    #[test]
    fn test_job_multiplier_respects_configured_order() {
        // The priority sequence is part of the contract: reordering the
        // rules changes which tier wins.
        let mut tuning = Tuning::default();
        tuning.job_title_rules.reverse();
        let (m, label) = job_multiplier(Some("Senior Director of Engineering"), &tuning.job_title_rules);
        assert_eq!(m, 0.95);
        assert_eq!(label, "engineer");
    }
}
