pub mod aggregate;
pub mod ingest;
pub mod normalize;
pub mod protected;
pub mod report;
pub mod rules;
pub mod size;
pub mod tiers;

use tracing::{debug, warn};

use crate::common::disk::DiskStatus;
use aggregate::{CategoryTotal, CategoryTotals};
use ingest::Ingested;
use protected::{ProtectedSource, WhitelistScraper, ILLUSTRATIVE_PROTECTED};
use report::{CleanReport, IngestSource};
use rules::RuleTable;
use tiers::SafetyTable;

pub const LIST_ESTIMATE_WARNING: &str =
    "Parsed from the candidate list: directory sizes are the cleanup tool's own estimates and may be off.";
pub const PLACEHOLDER_WARNING: &str =
    "No candidates could be read from the candidate list or the captured output. \
     The figures below are illustrative placeholders, not measurements; run `mo clean --dry-run` in a terminal for real numbers.";
pub const EMPTY_WARNING: &str =
    "No candidates could be read from the candidate list or the captured output; nothing was measured.";
pub const PROTECTED_FALLBACK_WARNING: &str =
    "The cleanup tool reported no protected items; the protected list shows common examples only.";

/// Everything one analysis run reads
#[derive(Debug, Clone, Default)]
pub struct AnalysisInput {
    /// Contents of the structured candidate list, if one was found
    pub candidate_list: Option<String>,
    /// Captured output of the cleanup tool's dry run
    pub captured_output: Option<String>,
    pub disk: DiskStatus,
    /// Substitute placeholder figures when nothing could be read
    pub allow_placeholder: bool,
    /// Notes from the caller (missing files and the like), reported first
    pub warnings: Vec<String>,
}

/// Ingestion mode selection; every state either yields data or moves on,
/// `UseFallback` always succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IngestState {
    TryStructuredList,
    TryCapturedOutput,
    UseFallback,
}

/// Runs the classification pipeline against fixed rule and safety tables
pub struct Analyzer<'a> {
    rules: &'a RuleTable,
    safety: &'a SafetyTable,
    protected: Box<dyn ProtectedSource + 'a>,
}

impl<'a> Analyzer<'a> {
    pub fn new(rules: &'a RuleTable, safety: &'a SafetyTable) -> Self {
        Self {
            rules,
            safety,
            protected: Box::new(WhitelistScraper),
        }
    }

    /// Replace the text scraper with another protected-item source
    pub fn with_protected_source(mut self, source: impl ProtectedSource + 'a) -> Self {
        self.protected = Box::new(source);
        self
    }

    pub fn rules(&self) -> &RuleTable {
        self.rules
    }

    pub fn safety(&self) -> &SafetyTable {
        self.safety
    }

    /// Produce a report. Never fails: unreadable input degrades to
    /// placeholder data with a warning attached.
    pub fn analyze(&self, input: &AnalysisInput) -> CleanReport {
        let mut warnings = input.warnings.clone();
        let (source, ingested) = select_source(input);

        let categories = match source {
            IngestSource::StructuredList => {
                warnings.push(LIST_ESTIMATE_WARNING.to_string());
                aggregate::aggregate(&ingested.entries, self.rules)
            }
            IngestSource::CapturedOutput => aggregate::aggregate(&ingested.entries, self.rules),
            IngestSource::Placeholder if input.allow_placeholder => {
                warn!("no usable candidates, showing placeholder figures");
                warnings.push(PLACEHOLDER_WARNING.to_string());
                placeholder_totals(self.rules)
            }
            IngestSource::Placeholder => {
                warn!("no usable candidates");
                warnings.push(EMPTY_WARNING.to_string());
                CategoryTotals::new()
            }
        };

        let mut protected_items = input
            .captured_output
            .as_deref()
            .map(|text| self.protected.extract(text))
            .unwrap_or_default();
        if protected_items.is_empty() {
            protected_items = ILLUSTRATIVE_PROTECTED.iter().map(|s| s.to_string()).collect();
            warnings.push(PROTECTED_FALLBACK_WARNING.to_string());
        }

        let tier_estimates = tiers::estimate_tiers(&categories, self.safety);
        debug!(
            %source,
            categories = categories.len(),
            low_risk = tier_estimates.low_risk,
            default = tier_estimates.default,
            maximum = tier_estimates.maximum,
            "analysis complete"
        );

        CleanReport::new(
            input.disk.clone(),
            source,
            categories,
            (ingested.file_count, ingested.dir_count),
            protected_items,
            warnings,
            tier_estimates,
        )
    }
}

/// Walk the mode-selection states until one yields candidates
fn select_source(input: &AnalysisInput) -> (IngestSource, Ingested) {
    let mut state = IngestState::TryStructuredList;
    loop {
        state = match state {
            IngestState::TryStructuredList => {
                if let Some(list) = input.candidate_list.as_deref() {
                    let ingested = ingest::ingest_structured(list);
                    if !ingested.is_empty() {
                        return (IngestSource::StructuredList, ingested);
                    }
                    debug!("candidate list has no usable entries");
                }
                IngestState::TryCapturedOutput
            }
            IngestState::TryCapturedOutput => {
                if let Some(output) = input.captured_output.as_deref() {
                    let ingested = ingest::ingest_captured(output);
                    if !ingested.is_empty() {
                        return (IngestSource::CapturedOutput, ingested);
                    }
                    debug!("captured output has no size-bearing lines");
                }
                IngestState::UseFallback
            }
            IngestState::UseFallback => return (IngestSource::Placeholder, Ingested::default()),
        };
    }
}

/// Illustrative figures shown when nothing could be measured
fn placeholder_totals(table: &RuleTable) -> CategoryTotals {
    let description = |name: &str| {
        table
            .rules()
            .iter()
            .find(|r| r.category_name == name)
            .map(|r| r.description.clone())
            .unwrap_or_default()
    };

    let mut totals = CategoryTotals::new();
    for (name, size_bytes) in [
        (rules::USER_APP_CACHE, 24_270_000_000u64),
        (rules::BROWSER_CACHE, 4_240_000_000),
        (rules::PACKAGE_MANAGER_CACHE, 1_580_000_000),
    ] {
        totals.insert(CategoryTotal {
            category_name: name.to_string(),
            size_bytes,
            description: description(name),
            item_count: 0,
        });
    }
    totals
}
