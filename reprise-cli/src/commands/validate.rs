//! Validate command implementation

use super::scan::resolve_format;
use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use reprise_core::{MatchConfig, MatchSettings};
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        match self.check() {
            Ok((config, matcher)) => {
                println!("✓ Configuration is valid!");
                println!("  min_length_words: {}", matcher.min_length_words());
                println!("  min_length_chars: {}", matcher.min_length_chars());
                println!("  max_gap_words:    {}", matcher.max_gap_words());
                println!("  min_anchor_words: {}", matcher.min_anchor_words());
                println!("  lookahead_words:  {}", matcher.lookahead_words());
                println!("  context_words:    {}", matcher.context_words());
                println!("  output format:    {}", config.output.default_format);
                println!("  decode rules:     {}", config.decode.len());
                println!("  exclude rules:    {}", config.exclude.len());
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e:#}");
                Err(anyhow::anyhow!("Validation failed: {:#}", e))
            }
        }
    }

    fn check(&self) -> Result<(CliConfig, MatchConfig)> {
        let config = CliConfig::load(&self.config)?;
        let matcher = config.match_config(&MatchSettings::default())?;
        resolve_format(None, &config)?;
        Ok((config, matcher))
    }
}
