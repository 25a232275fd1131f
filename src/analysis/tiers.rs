use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::aggregate::CategoryTotals;
use super::rules;

/// Static safety rating of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyClass {
    /// Rebuilds itself, removal is reversible in practice
    Safe,
    /// Usually fine, but may cost a rebuild, a re-download or some settings
    Caution,
    /// No rating; only counted toward the maximum tier
    Unclassified,
}

impl std::fmt::Display for SafetyClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafetyClass::Safe => write!(f, "Safe"),
            SafetyClass::Caution => write!(f, "Caution"),
            SafetyClass::Unclassified => write!(f, "Unclassified"),
        }
    }
}

#[derive(Debug, Clone)]
struct SafetyEntry {
    class: SafetyClass,
    advice: String,
}

/// Safety rating per category name, plus the caution categories that are
/// kept out of the default tier.
#[derive(Debug, Clone, Default)]
pub struct SafetyTable {
    entries: HashMap<String, SafetyEntry>,
    default_excluded: HashSet<String>,
}

impl SafetyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ratings for the shipped rule table
    pub fn builtin() -> Self {
        let mut table = Self::new();
        table
            .rate(rules::USER_APP_CACHE, SafetyClass::Safe, "Safe to clean, apps keep working")
            .rate(rules::BROWSER_CACHE, SafetyClass::Safe, "Safe to clean, rebuilt automatically")
            .rate(
                rules::PACKAGE_MANAGER_CACHE,
                SafetyClass::Safe,
                "Safe to clean, re-downloaded when needed",
            )
            .rate(rules::SYSTEM_LOGS, SafetyClass::Safe, "Safe to clean, the system is unaffected")
            .rate(rules::TRASH, SafetyClass::Safe, "Permanently removes Trash contents")
            .rate(
                rules::AI_MODEL_CACHE,
                SafetyClass::Caution,
                "Keep it if you use HuggingFace or Ollama models regularly",
            )
            .rate(
                rules::SIMULATOR_CACHE,
                SafetyClass::Caution,
                "iOS developers should keep it",
            )
            .rate(
                rules::DEV_TOOL_CACHE,
                SafetyClass::Caution,
                "Projects may need to be rebuilt",
            )
            .rate(
                rules::APP_SPECIFIC_CACHE,
                SafetyClass::Caution,
                "Check for unsaved projects first",
            )
            .rate(
                rules::APPLICATION_SUPPORT,
                SafetyClass::Caution,
                "May contain application settings",
            )
            .rate(
                rules::MESSAGING_CACHE,
                SafetyClass::Caution,
                "Media in chat history may stop displaying",
            );
        for name in [
            rules::APPLICATION_SUPPORT,
            rules::APP_SPECIFIC_CACHE,
            rules::MESSAGING_CACHE,
        ] {
            table.exclude_from_default(name);
        }
        table
    }

    /// Set (or replace) the rating of a category
    pub fn rate(&mut self, category: &str, class: SafetyClass, advice: &str) -> &mut Self {
        self.entries.insert(
            category.to_string(),
            SafetyEntry {
                class,
                advice: advice.to_string(),
            },
        );
        self
    }

    pub fn exclude_from_default(&mut self, category: &str) -> &mut Self {
        self.default_excluded.insert(category.to_string());
        self
    }

    pub fn class_of(&self, category: &str) -> SafetyClass {
        self.entries
            .get(category)
            .map(|e| e.class)
            .unwrap_or(SafetyClass::Unclassified)
    }

    pub fn advice_for(&self, category: &str) -> &str {
        self.entries
            .get(category)
            .map(|e| e.advice.as_str())
            .unwrap_or("Decide based on your own needs")
    }

    pub fn is_default_excluded(&self, category: &str) -> bool {
        self.default_excluded.contains(category)
    }

    /// Does this category count toward the default tier?
    pub fn in_default_tier(&self, category: &str) -> bool {
        match self.class_of(category) {
            SafetyClass::Safe => true,
            SafetyClass::Caution => !self.is_default_excluded(category),
            SafetyClass::Unclassified => false,
        }
    }
}

/// Cumulative reclaim estimates. `low_risk <= default <= maximum` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierEstimates {
    pub low_risk: u64,
    pub default: u64,
    pub maximum: u64,
}

/// Derive the three tiers from per-category totals
pub fn estimate_tiers(totals: &CategoryTotals, safety: &SafetyTable) -> TierEstimates {
    let mut tiers = TierEstimates::default();

    for total in totals.iter() {
        let size = total.size_bytes;
        tiers.maximum = tiers.maximum.saturating_add(size);
        if safety.class_of(&total.category_name) == SafetyClass::Safe {
            tiers.low_risk = tiers.low_risk.saturating_add(size);
        }
        if safety.in_default_tier(&total.category_name) {
            tiers.default = tiers.default.saturating_add(size);
        }
    }

    tiers
}

#[cfg(test)]
mod tests {
    use super::*;

    const GB: u64 = 1024 * 1024 * 1024;

    fn totals(pairs: &[(&str, u64)]) -> CategoryTotals {
        let mut t = CategoryTotals::new();
        for (name, size) in pairs {
            t.accumulate(name, "", *size, None);
        }
        t
    }

    #[test]
    fn test_safe_plus_excluded_caution() {
        let safety = SafetyTable::builtin();
        let t = totals(&[(rules::BROWSER_CACHE, 10 * GB), (rules::MESSAGING_CACHE, 5 * GB)]);
        let tiers = estimate_tiers(&t, &safety);
        assert_eq!(tiers.low_risk, 10 * GB);
        assert_eq!(tiers.default, 10 * GB);
        assert_eq!(tiers.maximum, 15 * GB);
    }

    #[test]
    fn test_included_caution_reaches_default_only() {
        let safety = SafetyTable::builtin();
        let t = totals(&[(rules::SYSTEM_LOGS, 2 * GB), (rules::DEV_TOOL_CACHE, 3 * GB)]);
        let tiers = estimate_tiers(&t, &safety);
        assert_eq!(tiers.low_risk, 2 * GB);
        assert_eq!(tiers.default, 5 * GB);
        assert_eq!(tiers.maximum, 5 * GB);
    }

    #[test]
    fn test_unclassified_counts_toward_maximum_only() {
        let safety = SafetyTable::builtin();
        let t = totals(&[(rules::OTHER, 7 * GB)]);
        let tiers = estimate_tiers(&t, &safety);
        assert_eq!(tiers, TierEstimates { low_risk: 0, default: 0, maximum: 7 * GB });
    }

    #[test]
    fn test_empty_totals() {
        let tiers = estimate_tiers(&CategoryTotals::new(), &SafetyTable::builtin());
        assert_eq!(tiers, TierEstimates::default());
    }

    #[test]
    fn test_tiers_monotonic_for_all_compositions() {
        let safety = SafetyTable::builtin();
        let names = [
            rules::USER_APP_CACHE,
            rules::AI_MODEL_CACHE,
            rules::APPLICATION_SUPPORT,
            rules::MESSAGING_CACHE,
            rules::DEV_TOOL_CACHE,
            rules::OTHER,
        ];
        // Every subset of the categories, each with a distinct size
        for mask in 0u32..(1 << names.len()) {
            let pairs: Vec<(&str, u64)> = names
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(i, n)| (*n, (i as u64 + 1) * 1_000_003))
                .collect();
            let tiers = estimate_tiers(&totals(&pairs), &safety);
            assert!(tiers.low_risk <= tiers.default, "mask {mask}");
            assert!(tiers.default <= tiers.maximum, "mask {mask}");
            assert_eq!(tiers.maximum, pairs.iter().map(|(_, s)| s).sum::<u64>());
        }
    }

    #[test]
    fn test_safety_lookup() {
        let safety = SafetyTable::builtin();
        assert_eq!(safety.class_of(rules::TRASH), SafetyClass::Safe);
        assert_eq!(safety.class_of(rules::SIMULATOR_CACHE), SafetyClass::Caution);
        assert_eq!(safety.class_of("Something new"), SafetyClass::Unclassified);
        assert!(safety.in_default_tier(rules::AI_MODEL_CACHE));
        assert!(!safety.in_default_tier(rules::APPLICATION_SUPPORT));
        assert!(!safety.in_default_tier(rules::OTHER));
    }
}
