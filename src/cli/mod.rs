//! CLI support for bindexpr
//!
//! Provides programmatic access to the `bindexpr` command so build tools can
//! compile expressions without spawning a process.

mod compile;
mod convert;

pub use compile::{execute, Command, CommandOutput, CompileOptions};
pub use convert::expr_to_json;

use std::io;

use thiserror::Error;

use crate::{codegen::ConfigError, parser::ParseError};

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Lex or syntax error in the expression
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Rejected code generation settings
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No expression provided
    #[error("No expression provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,
}
