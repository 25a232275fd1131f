use colored::*;

use crate::analysis::report::{CleanReport, IngestSource};
use crate::analysis::rules::{self, RuleTable};
use crate::analysis::tiers::{SafetyClass, SafetyTable};
use crate::common::format::{self, format_size, format_size_colored};

const RULE_WIDTH: usize = 64;

/// Icon shown next to a category
fn category_icon(category: &str) -> &'static str {
    match category {
        rules::USER_APP_CACHE => "🗂️",
        rules::AI_MODEL_CACHE => "🤖",
        rules::BROWSER_CACHE => "🌐",
        rules::SIMULATOR_CACHE => "📱",
        rules::DEV_TOOL_CACHE => "💻",
        rules::PACKAGE_MANAGER_CACHE => "📦",
        rules::APP_SPECIFIC_CACHE => "🎬",
        rules::APPLICATION_SUPPORT => "📁",
        rules::SYSTEM_LOGS => "📋",
        rules::TRASH => "🗑️",
        rules::MESSAGING_CACHE => "💬",
        _ => "📄",
    }
}

fn advice_marker(class: SafetyClass) -> ColoredString {
    match class {
        SafetyClass::Safe => "✓".green(),
        SafetyClass::Caution => "⚠".yellow(),
        SafetyClass::Unclassified => "ℹ".blue(),
    }
}

/// Render the report in human-readable form
pub fn render_report(report: &CleanReport, safety: &SafetyTable) -> String {
    let mut lines: Vec<String> = Vec::new();
    let rule = "─".repeat(RULE_WIDTH).dimmed().to_string();

    lines.push(String::new());
    lines.push(format!("{}  Mole Cleanup Analysis", "🧹"));
    lines.push(rule.clone());
    lines.push(format!(
        "  Scanned {}  •  source: {}",
        report.scan_time_string().cyan(),
        report.source.to_string().cyan()
    ));
    lines.push(format!(
        "  Disk: {} available of {} ({} used)",
        report.disk_available_before.bold(),
        report.disk_total,
        report.disk_used
    ));
    lines.push(rule.clone());
    lines.push(String::new());

    let sorted = report.categories_by_size();
    if sorted.is_empty() {
        lines.push(format!("  {} Nothing to report", "✨"));
        lines.push(String::new());
    }
    for total in &sorted {
        lines.push(format!(
            "  {}  {:<36} {:>10}  {}",
            category_icon(&total.category_name),
            total.category_name,
            format_size_colored(total.size_bytes),
            format::format_items(total.item_count).dimmed()
        ));
        lines.push(format!("      {} {}", "└──".dimmed(), total.description.dimmed()));
    }

    lines.push(String::new());
    lines.push(rule.clone());
    lines.push(format!(
        "  {} Estimated reclaimable: {}",
        "💾",
        format_size_colored(report.total_size_bytes)
    ));
    if report.file_count > 0 || report.dir_count > 0 {
        lines.push(format!(
            "  {} {} files, {} directories on disk",
            "📁", report.file_count, report.dir_count
        ));
    }
    lines.push(String::new());

    if !report.warnings.is_empty() {
        lines.push(format!(
            "  {} {}",
            "⚠".yellow(),
            format!("{} warnings:", report.warnings.len()).yellow()
        ));
        for warning in &report.warnings {
            lines.push(format!("    {} {}", "→".dimmed(), warning));
        }
        lines.push(String::new());
    }

    if !sorted.is_empty() {
        lines.push(format!("  {} Advice", "💡"));
        for total in &sorted {
            let class = safety.class_of(&total.category_name);
            lines.push(format!(
                "    {} {}: {}",
                advice_marker(class),
                total.category_name,
                safety.advice_for(&total.category_name).dimmed()
            ));
        }
        lines.push(String::new());
    }

    lines.push(format!("  {} Protected (left alone by the cleanup tool)", "🔒"));
    for item in &report.protected_items {
        lines.push(format!("    {} {}", "•".dimmed(), item));
    }
    lines.push(String::new());

    let tiers = &report.tier_estimates;
    lines.push(format!("  {} Cleanup strategies (estimates)", "🧭"));
    lines.push(format!(
        "    1) {:<10} {:>10}  {}",
        "Low risk".green(),
        format_size(tiers.low_risk),
        "only caches that rebuild quickly".dimmed()
    ));
    lines.push(format!(
        "    2) {:<10} {:>10}  {}",
        "Default".yellow(),
        format_size(tiers.default),
        "low risk plus moderately safe caches".dimmed()
    ));
    lines.push(format!(
        "    3) {:<10} {:>10}  {}",
        "Maximum".red(),
        format_size(tiers.maximum),
        "everything the tool is willing to touch".dimmed()
    ));
    lines.push(format!(
        "    {}",
        "Actual space freed is whatever Mole reports after cleaning.".dimmed()
    ));
    if report.source == IngestSource::Placeholder {
        lines.push(format!(
            "    {}",
            "These figures are placeholders, not measurements.".yellow()
        ));
    }
    lines.push(String::new());

    lines.join("\n")
}

/// Print the report in human-readable form
pub fn print_report(report: &CleanReport, safety: &SafetyTable) {
    println!("{}", render_report(report, safety));
}

/// Render the report as pretty JSON
pub fn render_report_json(report: &CleanReport, safety: &SafetyTable) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&report.view(safety))
}

/// Print the report as JSON
pub fn print_report_json(report: &CleanReport, safety: &SafetyTable) {
    match render_report_json(report, safety) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing report: {}", e),
    }
}

/// Print a minimal summary: total, tiers, category count
pub fn print_report_quiet(report: &CleanReport) {
    println!(
        "{}  {}  {}  {}  {}",
        format_size(report.total_size_bytes),
        format_size(report.tier_estimates.low_risk),
        format_size(report.tier_estimates.default),
        format_size(report.tier_estimates.maximum),
        report.categories.len()
    );
}

/// Print the category and safety class for each path
pub fn print_classifications(paths: &[String], rules: &RuleTable, safety: &SafetyTable) {
    println!();
    for path in paths {
        let class = rules.classify(path);
        let rating = safety.class_of(class.category);
        println!(
            "  {} {}",
            category_icon(class.category),
            format::truncate(path, 60).cyan()
        );
        println!(
            "      {} {}  [{}]",
            "↳".dimmed(),
            class.category.bold(),
            format::format_safety(rating)
        );
        println!("      {} {}", "↳".dimmed(), safety.advice_for(class.category).dimmed());
    }
    println!();
}

/// Print the effective rule table in evaluation order
pub fn print_rules(rules: &RuleTable, safety: &SafetyTable) {
    println!();
    println!("  {} Classification rules (first match wins)", "📋");
    println!("{}", "─".repeat(RULE_WIDTH).dimmed());
    for (i, rule) in rules.rules().iter().enumerate() {
        let mut flags = format::format_safety(safety.class_of(&rule.category_name)).to_string();
        if safety.is_default_excluded(&rule.category_name) {
            flags.push_str(", not in default tier");
        }
        println!(
            "  {:>2}. {} {}  [{}]",
            i + 1,
            category_icon(&rule.category_name),
            rule.category_name.bold(),
            flags
        );
        println!(
            "      {} {}",
            "↳".dimmed(),
            format::truncate(&rule.keywords.join(", "), 72).dimmed()
        );
    }
    println!(
        "  {:>2}. {} {}  [{}]",
        rules.rules().len() + 1,
        category_icon(rules::OTHER),
        rules::OTHER.bold(),
        format::format_safety(SafetyClass::Unclassified)
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalize::normalize;
    use crate::analysis::{AnalysisInput, Analyzer};

    fn report() -> (CleanReport, SafetyTable) {
        let rules = RuleTable::builtin();
        let safety = SafetyTable::builtin();
        let report = Analyzer::new(&rules, &safety).analyze(&AnalysisInput {
            candidate_list: Some(
                "/u/Library/Caches/Google/Chrome # 1.50GB (42 items)\n/u/.Trash/a.zip # 10MB\n"
                    .into(),
            ),
            ..Default::default()
        });
        (report, safety)
    }

    #[test]
    fn test_human_render_contents() {
        let (report, safety) = report();
        let text = normalize(&render_report(&report, &safety));
        assert!(text.contains("Browser cache"));
        assert!(text.contains("1.50 GB"));
        assert!(text.contains("42 items"));
        assert!(text.contains("Low risk"));
        assert!(text.contains("Playwright cache"));
        // Larger category is listed first
        assert!(text.find("Browser cache").unwrap() < text.find("Trash").unwrap());
    }

    #[test]
    fn test_json_render_parses() {
        let (report, safety) = report();
        let json = render_report_json(&report, &safety).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["cleanable"]["categories"]["Browser cache"]["items"], 42);
    }
}
