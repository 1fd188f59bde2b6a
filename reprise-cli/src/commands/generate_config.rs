//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use reprise_core::defaults;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the thresholds and prompt rules");
        println!("2. Validate your configuration:");
        println!("   reprise validate --config {}", self.output.display());
        println!("3. Use it for scanning:");
        println!(
            "   reprise scan --books books.json -i 'outputs/*.jsonl' --config {}",
            self.output.display()
        );

        Ok(())
    }
}

/// Template configuration content holding the built-in defaults
fn generate_template() -> String {
    format!(
        r##"# reprise configuration

[matching]
# Minimum matched words for a reported match
min_length_words = {min_words}
# Minimum matched characters for a reported match
min_length_chars = {min_chars}
# Maximum tokens skipped per side within one gap (at most {max_gap})
max_gap_words = {gap}
# Minimum run of exact matches that seeds a match
min_anchor_words = {anchor}
# Exact tokens required after a gap before it is accepted
lookahead_words = {lookahead}

[output]
# csv, json, text or markdown
default_format = "csv"
# Tokens of context shown around rendered matches
context_words = {context}
pretty_json = true

[performance]
# Number of worker threads (0 = all cores)
worker_threads = 0

[input]
# Encoding of files without a byte order mark
encoding = "utf-8"

# Character substitutions applied to outputs of obfuscating prompts
[[decode]]
prompt = "A1"
replace = [["4", "a"], ["0", "o"]]

[[decode]]
prompt = "A6"
replace = [["-", ""]]

[[decode]]
prompt = "A7"
replace = [["#", "the"], ["@", "a"]]

# Book passages quoted by a prompt; matches inside them are dropped and
# matches containing them are shortened
[[exclude]]
prompts = ["R01", "R02", "R01-1", "R02-1"]
metadata_key = "first_sentence"

[[exclude]]
prompts = ["R18"]
metadata_key = "last_sentence"
"##,
        min_words = defaults::MIN_LENGTH_WORDS,
        min_chars = defaults::MIN_LENGTH_CHARS,
        max_gap = defaults::MAX_SUPPORTED_GAP,
        gap = defaults::MAX_GAP_WORDS,
        anchor = defaults::MIN_ANCHOR_WORDS,
        lookahead = defaults::LOOKAHEAD_WORDS,
        context = defaults::CONTEXT_WORDS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use reprise_core::{MatchConfig, MatchSettings};
    use tempfile::TempDir;

    #[test]
    fn test_template_matches_defaults() {
        let config = CliConfig::from_toml_str(&generate_template()).unwrap();
        let defaults = CliConfig::default();

        assert_eq!(config.decode, defaults.decode);
        assert_eq!(config.exclude, defaults.exclude);
        assert_eq!(
            config.match_config(&MatchSettings::default()).unwrap(),
            MatchConfig::default()
        );
    }

    #[test]
    fn test_generate_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("reprise.toml");

        let args = GenerateConfigArgs {
            output: output.clone(),
        };
        args.execute().unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("[matching]"));
        assert!(written.contains("max_gap_words = 1"));
    }

    #[test]
    fn test_generate_into_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let args = GenerateConfigArgs {
            output: temp_dir.path().join("missing").join("reprise.toml"),
        };
        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("Failed to write to"));
    }
}
