//! Product Title Classification Module
//!
//! Maps a product page title to one of the nine technology categories via
//! ordered keyword rules. Keyword groups overlap in vocabulary, so the rule
//! order is a tie-break and part of the contract: the first matching rule
//! wins. Empty and unmatched titles map to the catch-all category.

use crate::tuning::TechnologyRule;
use crate::types::TechnologyCategory;

/// Classify a product title. Total: always returns a category.
pub fn map_title_to_tech(title: &str, rules: &[TechnologyRule]) -> TechnologyCategory {
    let t = title.trim().to_lowercase();
    if t.is_empty() {
        return TechnologyCategory::OtherSpecialty;
    }

    for rule in rules {
        if rule.keywords.iter().any(|k| t.contains(k.as_str())) {
            return rule.category;
        }
    }

    TechnologyCategory::OtherSpecialty
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn classify(title: &str) -> TechnologyCategory {
        map_title_to_tech(title, &Tuning::default().technology_rules)
    }

    #[test]
    fn test_aspirating_detector() {
        assert_eq!(
            classify("VESDA Aspirating Smoke Detector Model X"),
            TechnologyCategory::Aspirating
        );
    }

    #[test]
    fn test_empty_title_is_catch_all() {
        assert_eq!(classify(""), TechnologyCategory::OtherSpecialty);
        assert_eq!(classify("   "), TechnologyCategory::OtherSpecialty);
    }

    #[test]
    fn test_unmatched_title_is_catch_all() {
        assert_eq!(classify("Mounting Bracket 35mm"), TechnologyCategory::OtherSpecialty);
    }

    #[test]
    fn test_addressable_keywords_win_conflicts() {
        // "zone" and "panel" sit in the addressable group, which is tested
        // before every other group
        assert_eq!(classify("Zone Control Panel"), TechnologyCategory::Addressable);
        assert_eq!(classify("Wireless IO Module"), TechnologyCategory::Addressable);
    }

    #[test]
    fn test_each_category_reachable() {
        assert_eq!(classify("Conventional Sounder Base"), TechnologyCategory::Conventional);
        assert_eq!(classify("Outdoor Radio Transmitter"), TechnologyCategory::Wireless);
        assert_eq!(classify("Configurator Software License"), TechnologyCategory::SoftwareTools);
        assert_eq!(classify("Heat Cable 100m Reel"), TechnologyCategory::LinearHeat);
        assert_eq!(classify("UV Flame Detector"), TechnologyCategory::Flame);
        assert_eq!(classify("Proximity Card Reader"), TechnologyCategory::Security);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("ASPIRATING UNIT"), TechnologyCategory::Aspirating);
    }
}
