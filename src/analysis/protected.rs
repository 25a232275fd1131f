use super::normalize;

/// Shown when the tool's output names nothing it protected
pub const ILLUSTRATIVE_PROTECTED: &[&str] = &[
    "Playwright cache",
    "Ollama models",
    "JetBrains settings",
    "iCloud documents",
];

const SECTION_MARKERS: &[&str] = &["whitelist"];
const ITEM_PREFIXES: &[&str] = &["→", "->"];
const SECTION_END_PREFIXES: &[&str] = &["➤", "─"];
const MENTION_WORDS: &[&str] = &["protect", "skip"];
const STATUS_WORDS: &[&str] = &["running"];

/// Source of the items the cleanup tool declined to touch.
///
/// Implementations must fail soft: unrecognized input yields an empty list.
pub trait ProtectedSource {
    fn extract(&self, captured: &str) -> Vec<String>;
}

/// Scrapes Mole's colored terminal output for its whitelist section and for
/// stray "protected"/"skipped" lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitelistScraper;

impl ProtectedSource for WhitelistScraper {
    fn extract(&self, captured: &str) -> Vec<String> {
        extract_protected_items(captured)
    }
}

fn strip_prefix_any<'a>(line: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes.iter().find_map(|p| line.strip_prefix(p))
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Collect protected-item descriptions from captured output, in order
pub fn extract_protected_items(captured: &str) -> Vec<String> {
    let cleaned = normalize::normalize(captured);
    let mut protected = Vec::new();
    let mut in_section = false;

    for line in cleaned.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let lower = line.to_lowercase();

        if contains_any(&lower, SECTION_MARKERS) {
            in_section = true;
            continue;
        }

        if in_section {
            if let Some(item) = strip_prefix_any(line, ITEM_PREFIXES) {
                let item = item.trim();
                if !item.is_empty() {
                    protected.push(item.to_string());
                }
                continue;
            }
            if strip_prefix_any(line, SECTION_END_PREFIXES).is_some() {
                in_section = false;
            }
        }

        if contains_any(&lower, MENTION_WORDS) && !contains_any(&lower, STATUS_WORDS) {
            protected.push(line.to_string());
        }
    }

    protected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitelist_section() {
        let output = "\
➤ Cleaning user caches
\x1b[36mWhitelist (3 rules active)\x1b[0m
  → ~/Library/Caches/ms-playwright
  -> ~/.ollama/models
──────────────────────────
  → ~/after/the/section
➤ System caches
";
        assert_eq!(
            extract_protected_items(output),
            vec!["~/Library/Caches/ms-playwright", "~/.ollama/models"]
        );
    }

    #[test]
    fn test_stray_mentions() {
        let output = "\
Skipped ~/Library/Mobile Documents (iCloud)
Protected: JetBrains config
Skipping running app Slack
Done
";
        assert_eq!(
            extract_protected_items(output),
            vec!["Skipped ~/Library/Mobile Documents (iCloud)", "Protected: JetBrains config"]
        );
    }

    #[test]
    fn test_marker_line_not_collected() {
        let output = "Protected whitelist paths:\n→ ~/keep/me\n";
        assert_eq!(extract_protected_items(output), vec!["~/keep/me"]);
    }

    #[test]
    fn test_bracketed_names_kept_intact() {
        let output = "Whitelist\n→ ~/Pictures/[Japan trip]\n→ ~/Movies/[Kids]\n─\n";
        assert_eq!(
            extract_protected_items(output),
            vec!["~/Pictures/[Japan trip]", "~/Movies/[Kids]"]
        );
    }

    #[test]
    fn test_section_without_closing_marker() {
        let output = "whitelist\n→ a\nplain line\n→ b\n";
        assert_eq!(extract_protected_items(output), vec!["a", "b"]);
    }

    #[test]
    fn test_unrecognized_output_is_empty() {
        assert!(extract_protected_items("").is_empty());
        assert!(extract_protected_items("\x1b[2Kgarbage\n12GB freed\n").is_empty());
        assert!(WhitelistScraper.extract("→ arrow outside any section").is_empty());
    }
}
