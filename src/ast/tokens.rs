use std::fmt;

use crate::{ast::Number, lexer::Position};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Integer or decimal number, kept without rounding
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// .5
    /// ```
    Number(Number),

    /// String literal enclosed in single or double quotes.
    ///
    /// Holds the decoded value: no surrounding quotes, no escape markers.
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// 'it\'s'
    /// ```
    String(String),

    /// Boolean values
    ///
    /// # Examples
    /// ```text
    /// true
    /// false
    /// ```
    Boolean(bool),

    /// Null value
    Null,

    // Identifiers
    /// Property, method or filter name
    ///
    /// Starts with a letter, `_` or `$`, followed by letters, digits, `_` or `$`.
    /// `this` is lexed as an identifier and resolved during code generation.
    ///
    /// # Examples
    /// ```text
    /// user
    /// item_count
    /// $index
    /// this
    /// ```
    Identifier(String),

    // Operators
    /// Filter operator, lowest precedence binary operator
    ///
    /// # Examples
    /// ```text
    /// items | sorted
    /// ```
    Pipe,

    /// Logical OR (`||`)
    OrOr,

    /// Logical AND (`&&`)
    AndAnd,

    // Comparison
    /// Equality operator
    EqEq,

    /// Inequality operator
    NotEq,

    /// Less than
    Lt,

    /// Greater than
    Gt,

    /// Less than or equal
    LtEq,

    /// Greater than or equal
    GtEq,

    // Arithmetic
    /// Addition or unary plus
    Plus,

    /// Subtraction or negation
    Minus,

    /// Multiplication
    Star,

    /// Division
    Slash,

    /// Modulo
    Percent,

    /// Logical not
    Exclamation,

    /// Ternary condition marker
    Question,

    /// Ternary branch separator, map key separator
    Colon,

    // Delimiters
    /// Left bracket for index access and list literals
    LBracket,

    /// Right bracket
    RBracket,

    /// Left parenthesis for grouping or invocation
    LParen,

    /// Right parenthesis
    RParen,

    /// Left brace for map literals
    LBrace,

    /// Right brace
    RBrace,

    /// Dot for member access and method calls
    Dot,

    /// Comma for separating arguments, list items and map entries
    Comma,

    /// End of input
    Eof,
}

impl Token {
    /// Human readable name used in syntax error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number `{n}`"),
            Token::String(s) => format!("string {s:?}"),
            Token::Boolean(b) => format!("`{b}`"),
            Token::Null => "`null`".to_string(),
            Token::Identifier(name) => format!("identifier `{name}`"),
            Token::Eof => "end of input".to_string(),
            other => format!("`{}`", other.symbol().unwrap_or_default()),
        }
    }

    /// Source spelling of operator and punctuation tokens.
    pub fn symbol(&self) -> Option<&'static str> {
        let symbol = match self {
            Token::Pipe => "|",
            Token::OrOr => "||",
            Token::AndAnd => "&&",
            Token::EqEq => "==",
            Token::NotEq => "!=",
            Token::Lt => "<",
            Token::Gt => ">",
            Token::LtEq => "<=",
            Token::GtEq => ">=",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::Exclamation => "!",
            Token::Question => "?",
            Token::Colon => ":",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::Dot => ".",
            Token::Comma => ",",
            _ => return None,
        };
        Some(symbol)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// A classified token together with its raw source text and start position.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    /// Source text exactly as written, quotes and escapes included.
    pub text: String,
    pub position: Position,
}
