use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// molereport: turns Mole dry-run output into a categorized cleanup report
#[derive(Parser, Debug)]
#[command(
    name = "molereport",
    version,
    about = "Categorized, risk-tiered reports from Mole cleanup dry runs",
    long_about = "molereport reads the candidate list Mole writes during `mo clean --dry-run`\n\
                   (or the captured terminal output of that run), groups candidates into\n\
                   categories and estimates how much space each risk tier would reclaim.",
    after_help = "EXAMPLES:\n  \
        molereport analyze                              Use ~/.config/mole/clean-list.txt\n  \
        mo clean --dry-run | molereport analyze -o -    Parse captured output from stdin\n  \
        molereport analyze --list list.txt --format json\n  \
        molereport analyze --save                       Also write the report to disk\n  \
        molereport classify ~/Library/Caches/Homebrew   Show the category of a path\n  \
        molereport rules                                Show the rule table in match order"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode, minimal output
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze cleanup candidates and print a report
    Analyze {
        /// Candidate list to read (defaults to the configured clean-list path)
        #[arg(long, short, value_name = "FILE")]
        list: Option<PathBuf>,

        /// Ignore the candidate list and parse captured output only
        #[arg(long, conflicts_with = "list")]
        no_list: bool,

        /// Captured dry-run output to parse; `-` reads stdin
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Never substitute placeholder figures
        #[arg(long)]
        no_sample: bool,

        /// Save the rendered report under the reports directory
        #[arg(long)]
        save: bool,
    },

    /// Show which category paths fall into
    Classify {
        /// Paths to classify
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// List classification rules in the order they are evaluated
    Rules,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset to default configuration
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// Initialize molereport directories and default config
    Init,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from([
            "molereport", "analyze", "--list", "l.txt", "-o", "-", "--format", "json",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Analyze { list, output, no_list, .. } => {
                assert_eq!(list, Some(PathBuf::from("l.txt")));
                assert_eq!(output, Some(PathBuf::from("-")));
                assert!(!no_list);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_list_conflicts_with_no_list() {
        let result = Cli::try_parse_from(["molereport", "analyze", "--list", "a", "--no-list"]);
        assert!(result.is_err());
    }
}
