//! JavaScript code generation for binding expressions.
//!
//! [`CodeGenAstFactory`] is the [`AstFactory`] whose nodes render themselves:
//! every [`CodeExpr`] it builds can produce the JavaScript for its subtree with
//! [`CodeExpr::render`], no further input needed.
//!
//! # Rendering rules
//!
//! - **Names** resolve against an implicit evaluation context: `foo` becomes
//!   `model.foo` and `this` becomes `model`. The context name is configurable
//!   through [`CodeGenOptions`].
//! - **Strings** are always re-encoded with double quotes, escaping only `"` and `\`,
//!   whatever quotes the source used.
//! - **Pipes** become calls: `value | filter` renders as `filter(value)`.
//! - **Parentheses** written in the source are kept as written.
//!
//! # Examples
//!
//! ```
//! use bindexpr::codegen::{compile, CodeGenOptions};
//!
//! let options = CodeGenOptions::default();
//! assert_eq!(compile("a | f", &options).unwrap(), "model.f(model.a)");
//! assert_eq!(compile("'it'", &options).unwrap(), "\"it\"");
//!
//! let options = CodeGenOptions::with_context("scope").unwrap();
//! assert_eq!(compile("this.items[0]", &options).unwrap(), "scope.items[0]");
//! ```

use std::sync::{Arc, LazyLock};

use regex::Regex;
use thiserror::Error;

use crate::{
    ast::{AstFactory, BinOp, Expr, Literal, UnaryOp},
    parser::{self, ParseError},
};

pub const DEFAULT_CONTEXT: &str = "model";

/// Identifier or dotted identifier path usable as the evaluation context.
static CONTEXT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][\w$]*(\.[A-Za-z_$][\w$]*)*$").expect("context pattern is valid")
});

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid context name '{0}': expected an identifier such as 'model' or 'this.model'")]
    InvalidContext(String),
}

/// Code generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeGenOptions {
    context: String,
}

impl CodeGenOptions {
    /// Options resolving bare names against `context` instead of `model`.
    pub fn with_context(context: impl Into<String>) -> Result<Self, ConfigError> {
        let context = context.into();
        if !CONTEXT_PATTERN.is_match(&context) {
            return Err(ConfigError::InvalidContext(context));
        }
        Ok(CodeGenOptions { context })
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

impl Default for CodeGenOptions {
    fn default() -> Self {
        CodeGenOptions {
            context: DEFAULT_CONTEXT.to_string(),
        }
    }
}

/// A self-rendering node: the tree for one subexpression plus the context
/// name bare identifiers resolve against.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeExpr {
    expr: Expr,
    context: Arc<str>,
}

impl CodeExpr {
    /// JavaScript source for this subtree. Pure; repeated calls give the same text.
    pub fn render(&self) -> String {
        render(&self.expr, &self.context)
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }
}

/// Builds [`CodeExpr`] nodes sharing one context name.
#[derive(Debug, Clone)]
pub struct CodeGenAstFactory {
    context: Arc<str>,
}

impl CodeGenAstFactory {
    pub fn new(options: &CodeGenOptions) -> Self {
        CodeGenAstFactory {
            context: Arc::from(options.context()),
        }
    }

    fn node(&self, expr: Expr) -> CodeExpr {
        CodeExpr {
            expr,
            context: Arc::clone(&self.context),
        }
    }
}

impl Default for CodeGenAstFactory {
    fn default() -> Self {
        CodeGenAstFactory::new(&CodeGenOptions::default())
    }
}

fn boxed(node: CodeExpr) -> Box<Expr> {
    Box::new(node.expr)
}

impl AstFactory for CodeGenAstFactory {
    type Node = CodeExpr;

    fn empty(&self) -> CodeExpr {
        self.node(Expr::Empty)
    }

    fn literal(&self, value: Literal) -> CodeExpr {
        self.node(Expr::Literal(value))
    }

    fn identifier(&self, name: String) -> CodeExpr {
        self.node(Expr::Identifier(name))
    }

    fn unary(&self, op: UnaryOp, operand: CodeExpr) -> CodeExpr {
        self.node(Expr::Unary {
            op,
            operand: boxed(operand),
        })
    }

    fn binary(&self, left: CodeExpr, op: BinOp, right: CodeExpr) -> CodeExpr {
        self.node(Expr::Binary {
            op,
            left: boxed(left),
            right: boxed(right),
        })
    }

    fn getter(&self, receiver: CodeExpr, name: String) -> CodeExpr {
        self.node(Expr::Getter {
            receiver: boxed(receiver),
            name,
        })
    }

    fn invoke(
        &self,
        receiver: CodeExpr,
        method: Option<String>,
        arguments: Option<Vec<CodeExpr>>,
    ) -> CodeExpr {
        self.node(Expr::Invoke {
            receiver: boxed(receiver),
            method,
            arguments: arguments.map(|args| args.into_iter().map(CodeExpr::into_expr).collect()),
        })
    }

    fn paren(&self, child: CodeExpr) -> CodeExpr {
        self.node(Expr::Paren(boxed(child)))
    }

    fn index(&self, receiver: CodeExpr, argument: CodeExpr) -> CodeExpr {
        self.node(Expr::Index {
            receiver: boxed(receiver),
            argument: boxed(argument),
        })
    }

    fn ternary(&self, condition: CodeExpr, true_expr: CodeExpr, false_expr: CodeExpr) -> CodeExpr {
        self.node(Expr::Ternary {
            condition: boxed(condition),
            true_expr: boxed(true_expr),
            false_expr: boxed(false_expr),
        })
    }

    fn map(&self, entries: Vec<(String, Option<CodeExpr>)>) -> CodeExpr {
        self.node(Expr::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key, value.map(CodeExpr::into_expr)))
                .collect(),
        ))
    }

    fn list(&self, items: Vec<Option<CodeExpr>>) -> CodeExpr {
        self.node(Expr::List(
            items
                .into_iter()
                .map(|item| item.map(CodeExpr::into_expr))
                .collect(),
        ))
    }
}

/// Double-quoted JavaScript string literal with `"` and `\` escaped.
pub fn quote_string(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

fn render_literal(value: &Literal) -> String {
    match value {
        Literal::String(s) => quote_string(s),
        Literal::Number(n) => n.to_string(),
        Literal::Boolean(b) => b.to_string(),
        Literal::Null => "null".to_string(),
    }
}

/// Holes in collection literals render as `null`.
fn render_hole(item: Option<&Expr>, context: &str) -> String {
    match item {
        Some(expr) => render(expr, context),
        None => "null".to_string(),
    }
}

/// Render `expr` as JavaScript, resolving bare names against `context`.
pub fn render(expr: &Expr, context: &str) -> String {
    match expr {
        Expr::Empty => String::new(),
        Expr::Literal(value) => render_literal(value),
        Expr::Identifier(name) if name == "this" => context.to_string(),
        Expr::Identifier(name) => format!("{context}.{name}"),
        Expr::Unary { op, operand } => format!("{}{}", op.symbol(), render(operand, context)),
        Expr::Binary {
            op: BinOp::Pipe,
            left,
            right,
        } => format!("{}({})", render(right, context), render(left, context)),
        Expr::Binary { op, left, right } => format!(
            "{} {} {}",
            render(left, context),
            op.symbol(),
            render(right, context)
        ),
        Expr::Getter { receiver, name } => format!("{}.{name}", render(receiver, context)),
        Expr::Invoke {
            receiver,
            method,
            arguments,
        } => {
            let method = method
                .as_ref()
                .map(|m| format!(".{m}"))
                .unwrap_or_default();
            let arguments: Vec<String> = arguments
                .iter()
                .flatten()
                .map(|arg| render(arg, context))
                .collect();
            format!(
                "{}{method}({})",
                render(receiver, context),
                arguments.join(",")
            )
        }
        Expr::Paren(child) => format!("({})", render(child, context)),
        Expr::Index { receiver, argument } => format!(
            "{}[{}]",
            render(receiver, context),
            render(argument, context)
        ),
        Expr::Ternary {
            condition,
            true_expr,
            false_expr,
        } => format!(
            "{} ? {} : {}",
            render(condition, context),
            render(true_expr, context),
            render(false_expr, context)
        ),
        Expr::Map(entries) => {
            let entries: Vec<String> = entries
                .iter()
                .map(|(key, value)| {
                    format!("{}: {}", quote_string(key), render_hole(value.as_ref(), context))
                })
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Expr::List(items) => {
            let items: Vec<String> = items
                .iter()
                .map(|item| render_hole(item.as_ref(), context))
                .collect();
            format!("[{}]", items.join(", "))
        }
    }
}

/// Parse `source` and render it to JavaScript in one step.
///
/// # Examples
///
/// ```
/// use bindexpr::codegen::{compile, CodeGenOptions};
///
/// let js = compile("{\"a\": b, \"c\": d}", &CodeGenOptions::default()).unwrap();
/// assert_eq!(js, "{\"a\": model.b, \"c\": model.d}");
/// ```
pub fn compile(source: &str, options: &CodeGenOptions) -> Result<String, ParseError> {
    let factory = CodeGenAstFactory::new(options);
    parser::parse(source, &factory).map(|root| root.render())
}
