//! Run compile, check and ast commands on a single expression

use serde_json::json;

use super::{CliError, expr_to_json};
use crate::{
    ast::TreeAstFactory,
    codegen::{self, CodeGenOptions},
    parser,
};

/// What to do with the expression
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Command {
    /// Generate JavaScript
    #[default]
    Compile,
    /// Only validate syntax
    Check,
    /// Dump the parsed tree as JSON
    Ast,
}

/// Options for a CLI run
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub command: Command,
    /// The expression source; `None` when nothing was given
    pub expression: Option<String>,
    /// Evaluation context name, `model` when unset
    pub context: Option<String>,
    /// Wrap compile output in a JSON object
    pub json: bool,
    /// Pretty-print JSON output
    pub pretty: bool,
}

/// Result of a CLI run
#[derive(Debug, PartialEq)]
pub enum CommandOutput {
    /// Syntax validation passed
    SyntaxValid,
    /// Generated JavaScript
    Code(String),
    /// JSON document (tree dump or wrapped compile output)
    Json(serde_json::Value),
}

impl CommandOutput {
    /// Text printed to stdout for this outcome.
    pub fn to_text(&self, pretty: bool) -> Result<String, CliError> {
        let text = match self {
            CommandOutput::SyntaxValid => "Syntax is valid".to_string(),
            CommandOutput::Code(code) => code.clone(),
            CommandOutput::Json(value) if pretty => serde_json::to_string_pretty(value)?,
            CommandOutput::Json(value) => serde_json::to_string(value)?,
        };
        Ok(text)
    }
}

/// Execute one CLI command
pub fn execute(options: &CompileOptions) -> Result<CommandOutput, CliError> {
    let source = options.expression.as_deref().ok_or(CliError::NoInput)?;

    let codegen_options = match &options.context {
        Some(context) => CodeGenOptions::with_context(context.as_str())?,
        None => CodeGenOptions::default(),
    };

    let output = match options.command {
        Command::Check => {
            parser::parse(source, &TreeAstFactory)?;
            CommandOutput::SyntaxValid
        }
        Command::Ast => {
            let tree = parser::parse(source, &TreeAstFactory)?;
            CommandOutput::Json(expr_to_json(&tree))
        }
        Command::Compile => {
            let code = codegen::compile(source, &codegen_options)?;
            if options.json {
                CommandOutput::Json(json!({
                    "expression": source,
                    "code": code,
                }))
            } else {
                CommandOutput::Code(code)
            }
        }
    };
    Ok(output)
}
