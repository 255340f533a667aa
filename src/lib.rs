pub mod ast;
pub mod cli;
pub mod codegen;
pub mod lexer;
pub mod parser;

pub use ast::{AstFactory, BinOp, Expr, Literal, Token, TreeAstFactory, UnaryOp};
pub use codegen::{CodeExpr, CodeGenAstFactory, CodeGenOptions, ConfigError, compile};
pub use lexer::{LexError, Lexer, Position};
pub use parser::{DEFAULT_RECURSION_LIMIT, ParseError, Parser, SyntaxError, parse};
