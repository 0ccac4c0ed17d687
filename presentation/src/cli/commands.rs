//! CLI command definitions

use clap::{Parser, ValueEnum};
use newsquiz_domain::VerifierFailurePolicy;
use std::path::PathBuf;

/// Output format for the run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored per-language summary
    Summary,
    /// JSON report
    Json,
}

/// CLI arguments for newsquiz
#[derive(Parser, Debug)]
#[command(name = "newsquiz")]
#[command(author, version, about = "Daily news quizzes, cross-verified by two models")]
#[command(long_about = r#"
newsquiz runs the daily pipeline once and exits.

The run has five stages:
1. News: one model writes a small batch of news stories
2. Quizzes: one question batch per language, in parallel
3. Verification: two independent models answer every question
4. Images: one illustration per language with good questions
5. Delivery: polls to each language channel, rejections to the log channel

Configuration files are loaded from (in priority order):
1. NEWSQUIZ_* environment variables
2. --config <path>     Explicit config file
3. ./newsquiz.toml     Project-level config
4. ~/.config/newsquiz/config.toml   Global config

Example:
  newsquiz
  newsquiz --dry-run -l english -o json
  newsquiz --policy abstain -vv --log-file run.log
"#)]
pub struct Cli {
    /// Languages to produce (overrides the config; can be specified multiple times)
    #[arg(short, long, value_name = "LANGUAGE")]
    pub language: Vec<String>,

    /// Print deliveries to stdout instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// What a failed verifier contributes: trust_claim, abstain or reject
    #[arg(long, value_name = "POLICY", value_parser = parse_policy)]
    pub policy: Option<VerifierFailurePolicy>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

fn parse_policy(value: &str) -> Result<VerifierFailurePolicy, String> {
    value.parse().map_err(|_| {
        format!(
            "unknown policy '{}' (expected one of: {})",
            value,
            VerifierFailurePolicy::ALL
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["newsquiz"]).unwrap();
        assert!(cli.language.is_empty());
        assert!(!cli.dry_run);
        assert_eq!(cli.policy, None);
        assert_eq!(cli.output, OutputFormat::Summary);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_repeated_languages_and_verbosity() {
        let cli = Cli::try_parse_from([
            "newsquiz", "-l", "english", "--language", "german", "-vv", "-o", "json",
        ])
        .unwrap();
        assert_eq!(cli.language, vec!["english", "german"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_policy_override() {
        let cli = Cli::try_parse_from(["newsquiz", "--policy", "abstain"]).unwrap();
        assert_eq!(cli.policy, Some(VerifierFailurePolicy::Abstain));
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let err = Cli::try_parse_from(["newsquiz", "--policy", "maybe"]).unwrap_err();
        assert!(err.to_string().contains("trust_claim"));
    }
}
