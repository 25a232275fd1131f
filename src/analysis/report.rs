use chrono::{DateTime, Local};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use super::aggregate::{CategoryTotal, CategoryTotals};
use super::tiers::{SafetyClass, SafetyTable, TierEstimates};
use crate::common::disk::DiskStatus;
use crate::common::format::format_size;

/// Which input the figures of a report came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestSource {
    StructuredList,
    CapturedOutput,
    /// Illustrative data, nothing was measured
    Placeholder,
}

impl std::fmt::Display for IngestSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestSource::StructuredList => write!(f, "candidate list"),
            IngestSource::CapturedOutput => write!(f, "captured output"),
            IngestSource::Placeholder => write!(f, "placeholder data"),
        }
    }
}

/// Result of one analysis run. Built once by the pipeline, read-only after.
#[derive(Debug, Clone)]
pub struct CleanReport {
    pub scan_time: DateTime<Local>,
    pub disk_total: String,
    pub disk_available_before: String,
    pub disk_used: String,
    pub source: IngestSource,
    /// First-seen order; use [`CleanReport::categories_by_size`] for display
    pub categories: CategoryTotals,
    pub total_size_bytes: u64,
    pub file_count: u64,
    pub dir_count: u64,
    pub protected_items: Vec<String>,
    pub warnings: Vec<String>,
    pub tier_estimates: TierEstimates,
}

impl CleanReport {
    pub(crate) fn new(
        disk: DiskStatus,
        source: IngestSource,
        categories: CategoryTotals,
        counts: (u64, u64),
        protected_items: Vec<String>,
        warnings: Vec<String>,
        tier_estimates: TierEstimates,
    ) -> Self {
        Self {
            scan_time: Local::now(),
            disk_total: disk.total,
            disk_available_before: disk.available,
            disk_used: disk.used,
            source,
            total_size_bytes: categories.total_bytes(),
            categories,
            file_count: counts.0,
            dir_count: counts.1,
            protected_items,
            warnings,
            tier_estimates,
        }
    }

    pub fn categories_by_size(&self) -> Vec<&CategoryTotal> {
        self.categories.by_size()
    }

    pub fn scan_time_string(&self) -> String {
        self.scan_time.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Serializable view matching the published report schema
    pub fn view<'a>(&'a self, safety: &'a SafetyTable) -> ReportView<'a> {
        ReportView {
            scan_time: self.scan_time_string(),
            source: self.source,
            disk: DiskView {
                total: &self.disk_total,
                available: &self.disk_available_before,
                used: &self.disk_used,
            },
            cleanable: CleanableView {
                total_size: format_size(self.total_size_bytes),
                total_size_bytes: self.total_size_bytes,
                file_count: self.file_count,
                dir_count: self.dir_count,
                warnings: &self.warnings,
                tiers: TiersView {
                    low_risk: format_size(self.tier_estimates.low_risk),
                    default: format_size(self.tier_estimates.default),
                    maximum: format_size(self.tier_estimates.maximum),
                },
                categories: CategoriesView {
                    ordered: self.categories_by_size(),
                    safety,
                },
            },
            protected: &self.protected_items,
        }
    }
}

// ─── Output schema ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ReportView<'a> {
    pub scan_time: String,
    pub source: IngestSource,
    pub disk: DiskView<'a>,
    pub cleanable: CleanableView<'a>,
    pub protected: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct DiskView<'a> {
    pub total: &'a str,
    pub available: &'a str,
    pub used: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CleanableView<'a> {
    pub total_size: String,
    pub total_size_bytes: u64,
    pub file_count: u64,
    pub dir_count: u64,
    pub warnings: &'a [String],
    pub tiers: TiersView,
    pub categories: CategoriesView<'a>,
}

#[derive(Debug, Serialize)]
pub struct TiersView {
    pub low_risk: String,
    pub default: String,
    pub maximum: String,
}

#[derive(Debug, Serialize)]
struct CategoryView<'a> {
    size: String,
    size_bytes: u64,
    description: &'a str,
    items: u64,
    safety: SafetyClass,
}

/// Category name → figures, emitted in display order
#[derive(Debug)]
pub struct CategoriesView<'a> {
    ordered: Vec<&'a CategoryTotal>,
    safety: &'a SafetyTable,
}

impl Serialize for CategoriesView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.ordered.len()))?;
        for total in &self.ordered {
            map.serialize_entry(
                &total.category_name,
                &CategoryView {
                    size: format_size(total.size_bytes),
                    size_bytes: total.size_bytes,
                    description: &total.description,
                    items: total.item_count,
                    safety: self.safety.class_of(&total.category_name),
                },
            )?;
        }
        map.end()
    }
}
