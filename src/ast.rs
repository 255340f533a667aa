//! # Binding Expression Language - Abstract Syntax Tree
//!
//! This module defines the syntax tree for the binding expression language,
//! the small expression sublanguage used inside data-binding templates.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Prefix and binary operators with their precedence bands
//! - **[expressions]** - Expression nodes (literals, access, calls, operators, collections)
//! - **[factory]** - The construction contract the parser builds trees through
//!
//! ## Quick Start
//!
//! ```text
//! user.name | upper
//! ```
//!
//! Reads `name` off `user` and pipes it through the `upper` filter.
//!
//! ## Core Concepts
//!
//! ### Factory-built trees
//!
//! The parser never constructs nodes itself. It calls an [`AstFactory`], and the
//! factory decides what a node is. [`TreeAstFactory`] builds plain [`Expr`] trees;
//! [`CodeGenAstFactory`](crate::codegen::CodeGenAstFactory) builds nodes that
//! render themselves to JavaScript.
//!
//! ### Precedence, tightest first
//!
//! ```text
//! primary        literal, name, ( ), [ ], { }
//! postfix        .name  .name(args)  (args)  [expr]
//! unary          ! - +
//! multiplicative * / %
//! additive       + -
//! relational     < <= > >=
//! equality       == !=
//! logical and    &&
//! logical or     ||
//! pipe           |
//! ternary        ? :
//! ```
//!
//! ## Examples
//!
//! ### Filter with arguments
//!
//! ```text
//! price | currency("EUR")
//! ```
//!
//! ### Conditional class map
//!
//! ```text
//! {"active": selected == this, "hidden": !visible}
//! ```
pub mod expressions;
pub mod factory;
pub mod number;
pub mod operators;
pub mod tokens;

pub use expressions::{Expr, Literal};
pub use factory::{AstFactory, TreeAstFactory};
pub use number::Number;
pub use operators::{BinOp, UnaryOp};
pub use tokens::{Lexeme, Token};
