//! Reprise CLI library
//!
//! This library provides the command-line interface for checking model
//! outputs for passages reproduced from books.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
