//! Configuration module

pub mod prompts;

pub use prompts::{DecodeRule, ExcludeRule, PromptRules};

use crate::error::CliError;
use crate::input::FileReader;
use anyhow::{Context, Result};
use reprise_core::{MatchConfig, MatchSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Matcher settings
    #[serde(default)]
    pub matching: MatchSettings,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,

    /// Per-prompt decoding of model outputs
    #[serde(default = "prompts::default_decode_rules")]
    pub decode: Vec<DecodeRule>,

    /// Per-prompt passages excluded from matches
    #[serde(default = "prompts::default_exclude_rules")]
    pub exclude: Vec<ExcludeRule>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            matching: MatchSettings::default(),
            output: OutputConfig::default(),
            performance: PerformanceConfig::default(),
            input: InputConfig::default(),
            decode: prompts::default_decode_rules(),
            exclude: prompts::default_exclude_rules(),
        }
    }
}

impl CliConfig {
    /// Parse a TOML configuration
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let source = FileReader::read_text(path)?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Failed to load configuration: {}", path.display()))
    }

    /// Load `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Validated matcher configuration with `overrides` applied on top
    pub fn match_config(&self, overrides: &MatchSettings) -> Result<MatchConfig> {
        let mut settings = self.matching.clone().merge(overrides);
        if settings.context_words.is_none() {
            settings.context_words = self.output.context_words.map(|n| n as i64);
        }

        settings
            .to_config()
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Prompt rules of this configuration
    pub fn prompt_rules(&self) -> PromptRules {
        PromptRules::new(self.decode.clone(), self.exclude.clone())
    }

    /// Worker threads, `threads` taking precedence over the file
    pub fn worker_threads(&self, threads: Option<usize>) -> usize {
        match threads.unwrap_or(self.performance.worker_threads) {
            0 => num_cpus::get(),
            n => n,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Context tokens shown around rendered matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_words: Option<u32>,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "csv".to_string(),
            context_words: None,
            pretty_json: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PerformanceConfig {
    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

/// Input-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Encoding of files without a byte order mark
    pub encoding: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            encoding: "utf-8".to_string(),
        }
    }
}
