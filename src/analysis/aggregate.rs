use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ingest::CandidateEntry;
use super::rules::RuleTable;

/// Accumulated figures for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category_name: String,
    pub size_bytes: u64,
    pub description: String,
    pub item_count: u64,
}

/// Per-category totals keyed by name, iterated in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    totals: Vec<CategoryTotal>,
    index: HashMap<String, usize>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one candidate's figures to a category, creating it on first sight.
    /// A missing item count counts as one item.
    pub fn accumulate(
        &mut self,
        category: &str,
        description: &str,
        size_bytes: u64,
        item_count: Option<u64>,
    ) {
        let slot = match self.index.get(category) {
            Some(&i) => i,
            None => {
                self.totals.push(CategoryTotal {
                    category_name: category.to_string(),
                    size_bytes: 0,
                    description: description.to_string(),
                    item_count: 0,
                });
                self.index.insert(category.to_string(), self.totals.len() - 1);
                self.totals.len() - 1
            }
        };
        let total = &mut self.totals[slot];
        total.size_bytes = total.size_bytes.saturating_add(size_bytes);
        total.item_count = total.item_count.saturating_add(item_count.unwrap_or(1));
    }

    /// Insert a fully-formed total (placeholder data); merges into an
    /// existing entry of the same name.
    pub fn insert(&mut self, total: CategoryTotal) {
        let CategoryTotal {
            category_name,
            size_bytes,
            description,
            item_count,
        } = total;
        self.accumulate(&category_name, &description, size_bytes, Some(item_count));
    }

    pub fn get(&self, category: &str) -> Option<&CategoryTotal> {
        self.index.get(category).map(|&i| &self.totals[i])
    }

    /// Iterate in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.totals.iter()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Sum of all category sizes
    pub fn total_bytes(&self) -> u64 {
        self.totals
            .iter()
            .fold(0u64, |acc, t| acc.saturating_add(t.size_bytes))
    }

    /// Display order: size descending, ties keep first-seen order
    pub fn by_size(&self) -> Vec<&CategoryTotal> {
        let mut sorted: Vec<&CategoryTotal> = self.totals.iter().collect();
        // sort_by is stable
        sorted.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
        sorted
    }
}

/// Classify every entry and fold it into per-category totals
pub fn aggregate(entries: &[CandidateEntry], rules: &RuleTable) -> CategoryTotals {
    let mut totals = CategoryTotals::new();
    for entry in entries {
        let class = rules.classify(&entry.path);
        totals.accumulate(
            class.category,
            class.description,
            entry.size_bytes,
            entry.item_count,
        );
    }
    totals
}
