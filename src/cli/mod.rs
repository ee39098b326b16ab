//! CLI command definitions and handlers

mod init;
mod score;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// profile-trust - trust scores and lockout for dating profiles
#[derive(Parser, Debug)]
#[command(name = "profile-trust")]
#[command(
    version,
    about = "Compute completeness, credibility and behavior scores for profile accounts",
    after_help = "\
Examples:
  profile-trust score account.json                   Score an account document
  profile-trust score account.json --format json     JSON output for scripting
  profile-trust score account.json --explain         Show the full scoring breakdown
  profile-trust init                                 Write a trust.toml with defaults"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: trust.toml or .trustrc.json in the current directory)
    #[arg(long, global = true, env = "PROFILE_TRUST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score an account JSON document
    Score {
        /// Path to the account document
        account: PathBuf,

        /// Evaluation time as RFC 3339 (default: now)
        #[arg(long)]
        now: Option<String>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Include a per-component breakdown
        #[arg(long)]
        explain: bool,
    },

    /// Write a trust.toml with the default settings
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Score {
            account,
            now,
            format,
            explain,
        } => score::run(
            &account,
            cli.config.as_deref(),
            now.as_deref(),
            &format,
            explain,
        ),
        Commands::Init { dir } => init::run(&dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_defaults() {
        let cli = Cli::try_parse_from(["profile-trust", "score", "a.json"]).unwrap();
        assert_eq!(cli.log_level, "warn");
        match cli.command {
            Commands::Score {
                account,
                now,
                format,
                explain,
            } => {
                assert_eq!(account, PathBuf::from("a.json"));
                assert!(now.is_none());
                assert_eq!(format, "text");
                assert!(!explain);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        let result =
            Cli::try_parse_from(["profile-trust", "score", "a.json", "--format", "sarif"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_init_with_global_flags() {
        let cli = Cli::try_parse_from([
            "profile-trust",
            "init",
            "/tmp/x",
            "--log-level",
            "debug",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::Init { dir } if dir == PathBuf::from("/tmp/x")));
    }
}
