use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use super::normalize;
use super::size;
use crate::common::format::expand_home;

/// `(<N> items)` annotation in a candidate list
static ITEMS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(\s*(\d+)\s+items?\s*\)").expect("valid regex"));

/// Path-like token in captured output
static PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/~][\w\-./]+").expect("valid regex"));

const COMMENT_MARKER: char = '#';
const SECTION_SEPARATOR: &str = "===";

/// One cleanup candidate as reported by the external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEntry {
    /// Path as written in the input, used for classification
    pub path: String,
    /// 0 when unknown
    pub size_bytes: u64,
    pub item_count: Option<u64>,
}

/// Entries from one input source plus what stat-ing their paths found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ingested {
    pub entries: Vec<CandidateEntry>,
    pub file_count: u64,
    pub dir_count: u64,
}

impl Ingested {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─── Structured candidate list ────────────────────────────────────────────────

/// Parse one line of a candidate list: `<path> [# <size> (<N> items)]`.
///
/// Returns `None` for blank lines, comment lines and section separators.
pub fn parse_list_line(line: &str) -> Option<CandidateEntry> {
    let line = line.trim();
    let (path_part, annotation) = match line.split_once(COMMENT_MARKER) {
        Some((path, note)) => (path.trim(), Some(note)),
        None => (line, None),
    };
    if path_part.is_empty() || path_part.starts_with(SECTION_SEPARATOR) {
        return None;
    }

    let declared_size = annotation
        .and_then(size::find_size_token)
        .map(|(_, bytes)| bytes);
    let item_count = annotation
        .and_then(|a| ITEMS_RE.captures(a))
        .and_then(|c| c[1].parse::<u64>().ok());

    // A declared size is authoritative; only unannotated files are stat-ed.
    let size_bytes = match declared_size {
        Some(bytes) => bytes,
        None => file_size(&expand_home(path_part)).unwrap_or(0),
    };

    Some(CandidateEntry {
        path: path_part.to_string(),
        size_bytes,
        item_count,
    })
}

/// Read a structured candidate list
pub fn ingest_structured(text: &str) -> Ingested {
    let mut entries = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        match parse_list_line(line) {
            Some(entry) => entries.push(entry),
            None if !line.trim().is_empty() => {
                debug!(line = lineno + 1, "skipping non-candidate line in list");
            }
            None => {}
        }
    }

    let (file_count, dir_count) = count_items(entries.iter().map(|e| e.path.as_str()));
    debug!(
        entries = entries.len(),
        file_count, dir_count, "parsed structured candidate list"
    );

    Ingested {
        entries,
        file_count,
        dir_count,
    }
}

// ─── Captured process output ──────────────────────────────────────────────────

/// Scrape candidates out of raw captured output.
///
/// Only lines carrying a size token are data; the first path-like token on
/// the line is used for classification, otherwise the whole cleaned line.
pub fn ingest_captured(text: &str) -> Ingested {
    let cleaned = normalize::normalize(text);
    let mut entries = Vec::new();
    let mut stat_paths = Vec::new();

    for line in cleaned.lines() {
        let Some((token, size_bytes)) = size::find_size_token(line) else {
            continue;
        };
        if size_bytes == 0 {
            debug!(token, "ignoring zero-sized line");
            continue;
        }

        let path = match PATH_RE.find(line) {
            Some(m) => {
                stat_paths.push(m.as_str().to_string());
                m.as_str().to_string()
            }
            None => line.trim().to_string(),
        };

        entries.push(CandidateEntry {
            path,
            size_bytes,
            item_count: None,
        });
    }

    let (file_count, dir_count) = count_items(stat_paths.iter().map(String::as_str));
    debug!(
        entries = entries.len(),
        file_count, dir_count, "scraped captured output"
    );

    Ingested {
        entries,
        file_count,
        dir_count,
    }
}

// ─── Filesystem ───────────────────────────────────────────────────────────────

/// Size of a regular file, `None` for directories or anything unreadable
fn file_size(path: &Path) -> Option<u64> {
    let meta = std::fs::metadata(path).ok()?;
    meta.is_file().then(|| meta.len())
}

/// Count how many of the paths are files and how many are directories.
/// Paths that cannot be stat-ed are not counted.
pub fn count_items<'a>(paths: impl IntoIterator<Item = &'a str>) -> (u64, u64) {
    let mut files = 0;
    let mut dirs = 0;
    for path in paths {
        match std::fs::metadata(expand_home(path)) {
            Ok(meta) if meta.is_dir() => dirs += 1,
            Ok(meta) if meta.is_file() => files += 1,
            Ok(_) => {}
            Err(e) => debug!(path, error = %e, "stat failed"),
        }
    }
    (files, dirs)
}
