//! Reprise CLI
//!
//! # Usage
//!
//! ```bash
//! # Scan model outputs, one `<book_id>.jsonl` per book
//! reprise scan --books books.json -i 'outputs/*.jsonl' -o matches.csv
//!
//! # Check a single text against a book
//! reprise compare answer.txt book.txt --max-gap 2
//!
//! # Report and remove duplicate records
//! reprise dedup -i 'outputs/*.jsonl' --fix
//! ```

use clap::Parser;
use reprise_cli::commands::Commands;

/// Find passages of model output that reproduce a book word for word.
#[derive(Debug, Parser)]
#[command(name = "reprise", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    Cli::parse().command.execute()
}
