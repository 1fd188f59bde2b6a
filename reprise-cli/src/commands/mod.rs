//! CLI command implementations

use anyhow::Result;
use clap::{Args, Subcommand};
use reprise_core::MatchSettings;

pub mod compare;
pub mod dedup;
pub mod generate_config;
pub mod scan;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Match model output files against their books
    Scan(scan::ScanArgs),

    /// Match one text file against one book
    Compare(compare::CompareArgs),

    /// Find (and optionally remove) duplicate prompt records
    Dedup(dedup::DedupArgs),

    /// Validate a configuration file
    Validate(validate::ValidateArgs),

    /// Write a configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Scan(args) => args.execute(),
            Commands::Compare(args) => args.execute(),
            Commands::Dedup(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// Matcher settings that override the configuration file
#[derive(Debug, Clone, Default, Args)]
pub struct MatchArgs {
    /// Minimum matched words for a reported match
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub min_words: Option<i64>,

    /// Minimum matched characters for a reported match
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub min_chars: Option<i64>,

    /// Maximum tokens skipped per side within one gap
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub max_gap: Option<i64>,

    /// Minimum exact run that seeds a match
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub min_anchor: Option<i64>,

    /// Exact tokens required after a gap
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub lookahead: Option<i64>,

    /// Context tokens shown around rendered matches
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub context: Option<i64>,
}

impl MatchArgs {
    /// Settings holding only the values given on the command line
    pub fn to_settings(&self) -> MatchSettings {
        MatchSettings {
            min_length_chars: self.min_chars,
            min_length_words: self.min_words,
            max_gap_words: self.max_gap,
            min_anchor_words: self.min_anchor,
            lookahead_words: self.lookahead,
            context_words: self.context,
        }
    }
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // A logger may already be installed when commands run in-process
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_args_to_settings() {
        let args = MatchArgs {
            min_words: Some(5),
            max_gap: Some(2),
            ..MatchArgs::default()
        };

        let settings = args.to_settings();
        assert_eq!(settings.min_length_words, Some(5));
        assert_eq!(settings.max_gap_words, Some(2));
        assert_eq!(settings.min_length_chars, None);
        assert_eq!(settings.context_words, None);
    }

    #[test]
    fn test_commands_debug_format() {
        let cmd = Commands::Validate(validate::ValidateArgs {
            config: "reprise.toml".into(),
        });

        let debug_str = format!("{:?}", cmd);
        assert!(debug_str.contains("Validate"));
        assert!(debug_str.contains("reprise.toml"));
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging(2, false);
        init_logging(0, false);
        init_logging(0, true);
    }
}
