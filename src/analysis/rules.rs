use serde::{Deserialize, Serialize};

// ─── Category names ───────────────────────────────────────────────────────────

pub const SYSTEM_LOGS: &str = "System logs";
pub const AI_MODEL_CACHE: &str = "AI model cache";
pub const SIMULATOR_CACHE: &str = "iOS simulator cache";
pub const BROWSER_CACHE: &str = "Browser cache";
pub const PACKAGE_MANAGER_CACHE: &str = "Package-manager cache";
pub const DEV_TOOL_CACHE: &str = "Developer tool cache";
pub const MESSAGING_CACHE: &str = "Messaging app cache";
pub const APP_SPECIFIC_CACHE: &str = "App-specific cache";
pub const APPLICATION_SUPPORT: &str = "Application support";
pub const USER_APP_CACHE: &str = "User app cache";
pub const TRASH: &str = "Trash";

/// Category assigned when no rule matches
pub const OTHER: &str = "Other";
pub const OTHER_DESCRIPTION: &str = "Other cleanable files";

// ─── Rules ────────────────────────────────────────────────────────────────────

/// One entry of the ordered classification table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Lower-case substrings; any one of them selects this rule
    pub keywords: Vec<String>,
    pub category_name: String,
    pub description: String,
}

impl CategoryRule {
    pub fn new(keywords: &[&str], category_name: &str, description: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            category_name: category_name.to_string(),
            description: description.to_string(),
        }
    }

    /// Does any keyword occur in the (already lower-cased) path?
    pub fn matches(&self, lowered_path: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| !k.is_empty() && lowered_path.contains(k.as_str()))
    }
}

/// Result of classifying a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification<'a> {
    pub category: &'a str,
    pub description: &'a str,
}

/// Ordered, first-match rule evaluator.
///
/// Named application caches sit above the generic `cache`/`tmp` rule: a chat
/// app's cache directory contains both its app name and "cache", and only
/// the first hit counts. Reordering the table changes report semantics.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<CategoryRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// The shipped rule table
    pub fn builtin() -> Self {
        Self::new(vec![
            CategoryRule::new(
                &["/library/logs", "/var/log", "crashreporter", "diagnosticreports", "logs"],
                SYSTEM_LOGS,
                "Application and system log files",
            ),
            CategoryRule::new(
                &["huggingface", "transformers", "ollama", "models", "lm-studio"],
                AI_MODEL_CACHE,
                "Model caches, removable if the models are no longer used",
            ),
            CategoryRule::new(
                &["coresimulator", "simulator", "xcode/deriveddata", "deriveddata"],
                SIMULATOR_CACHE,
                "Xcode Simulator and DerivedData caches",
            ),
            CategoryRule::new(
                &["chrome", "safari", "firefox", "edge", "brave", "vivaldi", "browser"],
                BROWSER_CACHE,
                "Cached data from Chrome, Safari and other browsers",
            ),
            CategoryRule::new(
                &[
                    "homebrew", "brew", "npm", "pnpm", "yarn", "pip", "pip3", "cargo", ".cargo",
                    ".gradle", ".m2", "go/pkg/mod",
                ],
                PACKAGE_MANAGER_CACHE,
                "Package manager download and build caches",
            ),
            CategoryRule::new(
                &["vscode", "intellij", "jetbrains", "pycharm", "webstorm", "xcode", "android studio"],
                DEV_TOOL_CACHE,
                "Developer tool and IDE caches",
            ),
            CategoryRule::new(
                &["wechat", "qq", "tencent", "messages", "chat", "wechatfiles"],
                MESSAGING_CACHE,
                "Chat media and cache files",
            ),
            CategoryRule::new(
                &["screenflow", "capcut", "final cut", "logic", "adobe", "photoshop", "lightroom"],
                APP_SPECIFIC_CACHE,
                "Caches or project files of professional apps",
            ),
            CategoryRule::new(
                &["application support"],
                APPLICATION_SUPPORT,
                "Logs and caches kept under Application Support",
            ),
            CategoryRule::new(
                &["cache", "caches", "tmp", "temp"],
                USER_APP_CACHE,
                "Temporary caches created by apps, rebuilt automatically",
            ),
            CategoryRule::new(&["/.trash", "/trash", "trash"], TRASH, "Deleted files"),
        ])
    }

    /// Put user-declared rules ahead of the existing ones
    pub fn with_overrides(mut self, overrides: Vec<CategoryRule>) -> Self {
        if !overrides.is_empty() {
            let mut rules = overrides;
            rules.append(&mut self.rules);
            self.rules = rules;
        }
        self
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Classify a path (or any free text) against the table
    pub fn classify(&self, path: &str) -> Classification<'_> {
        let lowered = path.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| Classification {
                category: &rule.category_name,
                description: &rule.description,
            })
            .unwrap_or(Classification {
                category: OTHER,
                description: OTHER_DESCRIPTION,
            })
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}
