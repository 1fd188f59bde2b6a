//! Compare command implementation

use super::scan::{load_reference, match_rows};
use super::{init_logging, MatchArgs};
use crate::config::CliConfig;
use crate::input::{book_id_for, FileReader, ModelOutput};
use crate::output::{create_formatter, OutputFormat};
use anyhow::Result;
use clap::Args;
use reprise_core::Comparator;
use std::io;
use std::path::PathBuf;

/// Arguments for the compare command
#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Generated text to check
    #[arg(value_name = "QUERY_FILE")]
    pub query: PathBuf,

    /// Book text to check against
    #[arg(value_name = "BOOK_FILE")]
    pub book: PathBuf,

    /// Prompt identifier selecting decode and exclusion rules (default: query file name)
    #[arg(short, long, value_name = "ID")]
    pub prompt_id: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub matching: MatchArgs,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "REPRISE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CompareArgs {
    /// Execute the compare command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, false);

        let config = CliConfig::load_or_default(self.config.as_deref())?;
        let comparator = Comparator::new(config.match_config(&self.matching.to_settings())?);

        let reference = load_reference(&self.book, &config.input.encoding)?;
        let record = ModelOutput {
            prompt_id: self
                .prompt_id
                .clone()
                .or_else(|| book_id_for(&self.query))
                .unwrap_or_default(),
            output: FileReader::read_text_with_encoding(&self.query, &config.input.encoding)?,
            final_prompt: None,
        };
        let book_id = book_id_for(&self.book).unwrap_or_default();

        let rows = match_rows(&comparator, &config.prompt_rules(), &book_id, &reference, &record);
        if rows.is_empty() {
            eprintln!("No matches found");
        }

        let mut formatter = create_formatter(self.format, io::stdout(), config.output.pretty_json);
        for row in &rows {
            formatter.format_match(row)?;
        }
        formatter.finish()
    }
}
