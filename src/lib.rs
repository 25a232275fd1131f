//! # molereport
//!
//! Turns the output of a Mole (`mo clean --dry-run`) run into a structured,
//! categorized report a user can act on.
//!
//! - **Two input modes**: Mole's `clean-list.txt` candidate list, or the raw
//!   captured terminal output when no list is available
//! - **Ordered classification**: first-match keyword rules, named app caches
//!   ahead of generic ones
//! - **Risk tiers**: low-risk, default and maximum reclaim estimates
//! - **Always a report**: unreadable input degrades to labelled placeholder data
//!
//! ```no_run
//! use molereport::analysis::{AnalysisInput, Analyzer};
//! use molereport::analysis::rules::RuleTable;
//! use molereport::analysis::tiers::SafetyTable;
//!
//! let rules = RuleTable::builtin();
//! let safety = SafetyTable::builtin();
//! let report = Analyzer::new(&rules, &safety).analyze(&AnalysisInput {
//!     candidate_list: Some("~/Library/Caches/Homebrew # 1.2GB (30 items)".into()),
//!     ..Default::default()
//! });
//! println!("{} bytes reclaimable", report.total_size_bytes);
//! ```

pub mod analysis;
pub mod cli;
pub mod common;
