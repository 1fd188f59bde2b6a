//! Scan command implementation

use super::{init_logging, MatchArgs};
use crate::config::{CliConfig, PromptRules};
use crate::error::CliError;
use crate::input::{book_id_for, load_records, resolve_patterns, BookList, FileReader, ModelOutput};
use crate::output::{create_formatter, MatchRow, OutputFormat};
use crate::progress::ScanProgress;
use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use reprise_core::{Comparator, ReferenceText};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Arguments for the scan command
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// JSON object mapping book ids to book text files
    #[arg(short, long, value_name = "FILE", required = true)]
    pub books: PathBuf,

    /// Model output files or patterns (supports glob), one `<book_id>.jsonl` per book
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from configuration, else csv)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(flatten)]
    pub matching: MatchArgs,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "REPRISE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of worker threads (default: from configuration, else all cores)
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Rerun even if the output is newer than every input
    #[arg(long)]
    pub force: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ScanArgs {
    /// Execute the scan command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        log::info!("Starting scan");
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load_or_default(self.config.as_deref())?;
        let comparator = Comparator::new(config.match_config(&self.matching.to_settings())?);
        let format = resolve_format(self.format, &config)?;
        let rules = config.prompt_rules();

        let files = resolve_patterns(&self.input)?;
        let books = BookList::load(&self.books)?;

        if let Some(output) = &self.output {
            let inputs = files.iter().map(PathBuf::as_path).chain([self.books.as_path()]);
            if !self.force && is_up_to_date(output, inputs)? {
                if !self.quiet {
                    eprintln!("Skipping: {} is newer than every input", output.display());
                }
                return Ok(());
            }
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads(self.threads))
            .build()
            .context("Failed to build worker pool")?;

        let mut progress = ScanProgress::start(files.len() as u64, self.quiet);

        let mut rows = Vec::new();
        for file in &files {
            let name = file.display().to_string();
            let Some(book_id) = book_id_for(file) else {
                progress.skipped(&name, "no file name");
                continue;
            };
            let Some(book_path) = books.get(&book_id) else {
                progress.skipped(&name, CliError::UnknownBook(book_id));
                continue;
            };

            let reference = load_reference(book_path, &config.input.encoding)?;
            let records = load_records(file)?;
            log::info!("{}: {} records against {}", name, records.len(), book_path.display());

            let found: Vec<Vec<MatchRow>> = pool.install(|| {
                records
                    .par_iter()
                    .map(|record| match_rows(&comparator, &rules, &book_id, &reference, record))
                    .collect()
            });

            let before = rows.len();
            rows.extend(found.into_iter().flatten());
            progress.scanned(&name, rows.len() - before);
        }
        let summary = progress.finish();

        let writer: Box<dyn Write + Send> = match &self.output {
            Some(path) => Box::new(BufWriter::new(
                File::create(path)
                    .with_context(|| format!("Failed to create output: {}", path.display()))?,
            )),
            None => Box::new(io::stdout()),
        };

        let mut formatter = create_formatter(format, writer, config.output.pretty_json);
        for row in &rows {
            formatter.format_match(row)?;
        }
        formatter.finish()?;

        log::info!("{}", summary);
        Ok(())
    }
}

/// Output format from the command line, else the configuration file
pub(crate) fn resolve_format(format: Option<OutputFormat>, config: &CliConfig) -> Result<OutputFormat> {
    match format {
        Some(format) => Ok(format),
        None => OutputFormat::from_name(&config.output.default_format).ok_or_else(|| {
            CliError::ConfigError(format!(
                "unknown output format '{}'",
                config.output.default_format
            ))
            .into()
        }),
    }
}

/// Load and index a book text
pub(crate) fn load_reference(path: &Path, encoding: &str) -> Result<ReferenceText> {
    let raw = FileReader::read_text_with_encoding(path, encoding)?;
    ReferenceText::parse(&raw).with_context(|| format!("Failed to load book: {}", path.display()))
}

/// Decode one model output, match it and discount passages quoted by its prompt
pub(crate) fn match_rows(
    comparator: &Comparator,
    rules: &PromptRules,
    book_id: &str,
    reference: &ReferenceText,
    record: &ModelOutput,
) -> Vec<MatchRow> {
    let text = rules.decode(&record.prompt_id, &record.output);
    let exclusions = rules.exclusions(&record.prompt_id, reference);

    comparator
        .compare_with_exclusions(&text, reference, &exclusions)
        .iter()
        .map(|found| MatchRow::new(book_id, &record.prompt_id, found))
        .collect()
}

/// Whether `output` exists and is newer than every file in `inputs`
fn is_up_to_date<'a>(output: &Path, inputs: impl IntoIterator<Item = &'a Path>) -> Result<bool> {
    if !output.exists() {
        return Ok(false);
    }

    let produced = FileReader::modified(output)?;
    for input in inputs {
        if FileReader::modified(input)? >= produced {
            return Ok(false);
        }
    }
    Ok(true)
}
