use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::analysis::rules::{CategoryRule, RuleTable};
use crate::analysis::tiers::{SafetyClass, SafetyTable};
use crate::common::errors::ReportError;
use crate::common::format::expand_home;

/// Overrides the data directory (mainly for tests and sandboxes)
pub const HOME_ENV: &str = "MOLEREPORT_HOME";

/// Global molereport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Candidate list written by Mole during a dry run
    #[serde(default = "default_clean_list_path")]
    pub clean_list_path: String,

    /// Show placeholder figures when nothing could be parsed
    #[serde(default = "default_true")]
    pub allow_sample_data: bool,

    /// Mount point reported in the disk summary
    #[serde(default = "default_disk_mount")]
    pub disk_mount: String,

    /// Save every rendered report under the reports directory
    #[serde(default)]
    pub save_reports: bool,

    /// Rules evaluated before the built-in table
    #[serde(default)]
    pub extra_rules: Vec<CustomRule>,
}

/// A user-declared classification rule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomRule {
    pub category: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub safety: Option<SafetyClass>,
    /// Keep a caution category out of the default tier
    #[serde(default)]
    pub exclude_from_default: bool,
    #[serde(default)]
    pub advice: Option<String>,
}

fn default_clean_list_path() -> String {
    "~/.config/mole/clean-list.txt".to_string()
}
fn default_true() -> bool {
    true
}
fn default_disk_mount() -> String {
    "/".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clean_list_path: default_clean_list_path(),
            allow_sample_data: true,
            disk_mount: default_disk_mount(),
            save_reports: false,
            extra_rules: Vec::new(),
        }
    }
}

impl Config {
    /// Get the molereport data directory (~/.config/molereport)
    pub fn data_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(HOME_ENV) {
            return PathBuf::from(dir);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".config")
            .join("molereport")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    /// Get the directory saved reports go to
    pub fn reports_dir() -> PathBuf {
        Self::data_dir().join("reports")
    }

    /// Load config from file, or the defaults if there is none
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Config = toml::from_str(&contents).map_err(|e| ReportError::Config {
                path: path.clone(),
                message: e.to_string(),
            })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        Self::init_dirs()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, contents).map_err(|e| ReportError::io(&path, e))?;
        Ok(())
    }

    /// Initialize the data and reports directories
    pub fn init_dirs() -> Result<()> {
        for dir in [Self::data_dir(), Self::reports_dir()] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Candidate list location with `~` expanded
    pub fn clean_list(&self) -> PathBuf {
        expand_home(&self.clean_list_path)
    }

    /// Update a single scalar setting by name
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ReportError> {
        let invalid = || ReportError::InvalidConfigValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "clean_list_path" => self.clean_list_path = value.to_string(),
            "disk_mount" => self.disk_mount = value.to_string(),
            "allow_sample_data" => self.allow_sample_data = value.parse().map_err(|_| invalid())?,
            "save_reports" => self.save_reports = value.parse().map_err(|_| invalid())?,
            _ => return Err(ReportError::UnknownConfigKey(key.to_string())),
        }
        Ok(())
    }

    /// Built-in rules with the user's rules in front
    pub fn rule_table(&self) -> RuleTable {
        let overrides = self
            .extra_rules
            .iter()
            .map(|r| {
                let keywords: Vec<&str> = r.keywords.iter().map(String::as_str).collect();
                CategoryRule::new(&keywords, &r.category, &r.description)
            })
            .collect();
        RuleTable::builtin().with_overrides(overrides)
    }

    /// Built-in safety ratings plus those declared on user rules
    pub fn safety_table(&self) -> SafetyTable {
        let mut table = SafetyTable::builtin();
        for rule in &self.extra_rules {
            if let Some(class) = rule.safety {
                let advice = rule.advice.as_deref().unwrap_or("User-defined rule");
                table.rate(&rule.category, class, advice);
            }
            if rule.exclude_from_default {
                table.exclude_from_default(&rule.category);
            }
        }
        table
    }
}
