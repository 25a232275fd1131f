use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use molereport::analysis::normalize::normalize;
use molereport::analysis::report::CleanReport;
use molereport::analysis::tiers::SafetyTable;
use molereport::analysis::{AnalysisInput, Analyzer};
use molereport::cli::args::{Cli, Commands, ConfigAction, OutputFormat};
use molereport::cli::output;
use molereport::common::config::Config;
use molereport::common::disk;
use molereport::common::errors::ReportError;
use molereport::common::format;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("molereport=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Analyze {
            ref list,
            no_list,
            ref output,
            no_sample,
            save,
        } => cmd_analyze(&cli, list.clone(), no_list, output.clone(), no_sample, save),

        Commands::Classify { ref paths } => cmd_classify(paths),

        Commands::Rules => {
            let config = Config::load()?;
            output::print_rules(&config.rule_table(), &config.safety_table());
            Ok(())
        }

        Commands::Config { ref action } => cmd_config(action),

        Commands::Completions { ref shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            let shell = match shell {
                molereport::cli::args::CompletionShell::Bash => clap_complete::Shell::Bash,
                molereport::cli::args::CompletionShell::Zsh => clap_complete::Shell::Zsh,
                molereport::cli::args::CompletionShell::Fish => clap_complete::Shell::Fish,
            };
            clap_complete::generate(shell, &mut cmd, "molereport", &mut std::io::stdout());
            Ok(())
        }
    }
}

// ─── Analyze ──────────────────────────────────────────────────────────────────

fn cmd_analyze(
    cli: &Cli,
    list: Option<PathBuf>,
    no_list: bool,
    captured: Option<PathBuf>,
    no_sample: bool,
    save: bool,
) -> Result<()> {
    let config = Config::load()?;
    let rules = config.rule_table();
    let safety = config.safety_table();
    let mut warnings = Vec::new();

    let candidate_list = if no_list {
        None
    } else {
        match list {
            Some(path) => read_input(&path, &mut warnings),
            // The default list only exists after a Mole dry run; absence is normal.
            None => {
                let path = config.clean_list();
                if path.exists() {
                    read_input(&path, &mut warnings)
                } else {
                    debug!(path = %path.display(), "no candidate list at default location");
                    None
                }
            }
        }
    };

    let captured_output = captured.and_then(|path| read_input(&path, &mut warnings));

    let input = AnalysisInput {
        candidate_list,
        captured_output,
        disk: disk::probe(&config.disk_mount),
        allow_placeholder: config.allow_sample_data && !no_sample,
        warnings,
    };
    let report = Analyzer::new(&rules, &safety).analyze(&input);

    match cli.format {
        OutputFormat::Human => output::print_report(&report, &safety),
        OutputFormat::Json => output::print_report_json(&report, &safety),
        OutputFormat::Quiet => output::print_report_quiet(&report),
    }

    if save || config.save_reports {
        let path = save_report(&report, &safety, cli.format)?;
        if !cli.quiet {
            eprintln!(
                "  {} Report saved: {}",
                "✓".green(),
                format::format_path(&path)
            );
        }
    }

    Ok(())
}

/// Read an input file (or stdin for `-`). Failures become report warnings:
/// a missing input must still produce a report.
fn read_input(path: &Path, warnings: &mut Vec<String>) -> Option<String> {
    let result = if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map(|_| buf)
            .map_err(|e| ReportError::io("<stdin>", e))
    } else {
        std::fs::read(path).map_err(|e| ReportError::io(path, e))
    };

    match result {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            warn!(error = %e, "input unreadable");
            warnings.push(format!("Could not read input: {}", e));
            None
        }
    }
}

/// Write the rendered report under the reports directory
fn save_report(report: &CleanReport, safety: &SafetyTable, fmt: OutputFormat) -> Result<PathBuf> {
    Config::init_dirs()?;
    let stamp = report.scan_time.format("%Y%m%d-%H%M%S");
    let (name, contents) = match fmt {
        OutputFormat::Json => (
            format!("{}-report.json", stamp),
            output::render_report_json(report, safety).context("Failed to serialize report")?,
        ),
        OutputFormat::Human | OutputFormat::Quiet => (
            format!("{}-report.txt", stamp),
            normalize(&output::render_report(report, safety)),
        ),
    };
    let path = Config::reports_dir().join(name);
    std::fs::write(&path, contents).map_err(|e| ReportError::io(&path, e))?;
    Ok(path)
}

// ─── Classify ─────────────────────────────────────────────────────────────────

fn cmd_classify(paths: &[String]) -> Result<()> {
    let config = Config::load()?;
    output::print_classifications(paths, &config.rule_table(), &config.safety_table());
    Ok(())
}

// ─── Config ───────────────────────────────────────────────────────────────────

fn cmd_config(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            Config::init_dirs()?;
            let config = Config::default();
            config.save()?;
            println!(
                "  {} molereport initialized at {}",
                "✓".green(),
                format::format_path(&Config::data_dir())
            );
            println!("  Created: config.toml, reports/");
            Ok(())
        }
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("  {} Configuration reset to defaults", "✓".green());
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(key, value)?;
            config.save()?;
            println!("  {} Set {} = {}", "✓".green(), key, value);
            Ok(())
        }
    }
}
