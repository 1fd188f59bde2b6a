//! Dedup command implementation
//!
//! Parallel collection runs can record two outputs for one prompt. Every
//! prompt should appear once per model output file before scanning.

use super::init_logging;
use crate::input::{load_raw_records, prompt_id_of, resolve_patterns, write_records};
use anyhow::Result;
use clap::Args;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Arguments for the dedup command
#[derive(Debug, Args)]
pub struct DedupArgs {
    /// Model output files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Rewrite files keeping only the first record per prompt
    #[arg(long)]
    pub fix: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl DedupArgs {
    /// Execute the dedup command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, false);

        let files = resolve_patterns(&self.input)?;
        let mut affected = 0;

        for file in &files {
            let records = load_raw_records(file)?;
            let total = records.len();
            let (kept, duplicates) = deduplicate(records);
            if duplicates.is_empty() {
                log::debug!("{}: no duplicates", file.display());
                continue;
            }

            affected += 1;
            println!("{}: {} duplicate records", file.display(), total - kept.len());
            for (prompt_id, extra) in &duplicates {
                println!("  {prompt_id}: {} copies", extra + 1);
            }

            if self.fix {
                write_records(file, &kept)?;
                println!("  fixed: {} -> {} records", total, kept.len());
            }
        }

        println!("{} of {} files contain duplicates", affected, files.len());
        Ok(())
    }
}

/// Keep the first record per prompt
///
/// Returns the kept records and, per duplicated prompt, how many records
/// were dropped. Records without a prompt id are always kept.
pub fn deduplicate(records: Vec<Value>) -> (Vec<Value>, BTreeMap<String, usize>) {
    let mut seen = HashSet::new();
    let mut duplicates: BTreeMap<String, usize> = BTreeMap::new();
    let mut kept = Vec::with_capacity(records.len());

    for record in records {
        match prompt_id_of(&record).map(str::to_string) {
            Some(id) if !seen.insert(id.clone()) => {
                *duplicates.entry(id).or_default() += 1;
            }
            Some(_) => kept.push(record),
            None => {
                log::warn!("record without prompt_id kept as is");
                kept.push(record);
            }
        }
    }

    (kept, duplicates)
}
