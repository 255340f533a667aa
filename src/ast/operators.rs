use crate::ast::Token;

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Logical not (`!`)
    Not,
    /// Negation (`-`)
    Negate,
    /// Numeric plus (`+`)
    Plus,
}

impl UnaryOp {
    pub fn from_token(token: &Token) -> Option<Self> {
        match token {
            Token::Exclamation => Some(UnaryOp::Not),
            Token::Minus => Some(UnaryOp::Negate),
            Token::Plus => Some(UnaryOp::Plus),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Negate => "-",
            UnaryOp::Plus => "+",
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Modulo (`%`)
    Modulo,
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,

    // Comparison
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,

    // Logical
    /// Logical AND (`&&`)
    And,
    /// Logical OR (`||`)
    Or,

    /// Filter pipe (`|`)
    Pipe,
}

impl BinOp {
    pub fn from_token(token: &Token) -> Option<Self> {
        let op = match token {
            Token::Star => BinOp::Multiply,
            Token::Slash => BinOp::Divide,
            Token::Percent => BinOp::Modulo,
            Token::Plus => BinOp::Add,
            Token::Minus => BinOp::Subtract,
            Token::Lt => BinOp::LessThan,
            Token::LtEq => BinOp::LessEqual,
            Token::Gt => BinOp::GreaterThan,
            Token::GtEq => BinOp::GreaterEqual,
            Token::EqEq => BinOp::Equal,
            Token::NotEq => BinOp::NotEqual,
            Token::AndAnd => BinOp::And,
            Token::OrOr => BinOp::Or,
            Token::Pipe => BinOp::Pipe,
            _ => return None,
        };
        Some(op)
    }

    /// The operator as written in source, emitted verbatim by code generation.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Multiply => "*",
            BinOp::Divide => "/",
            BinOp::Modulo => "%",
            BinOp::Add => "+",
            BinOp::Subtract => "-",
            BinOp::LessThan => "<",
            BinOp::LessEqual => "<=",
            BinOp::GreaterThan => ">",
            BinOp::GreaterEqual => ">=",
            BinOp::Equal => "==",
            BinOp::NotEqual => "!=",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Pipe => "|",
        }
    }

    /// Precedence band, higher binds tighter. Every band is left-associative.
    ///
    /// | band | operators |
    /// |---|---|
    /// | 7 | `*` `/` `%` |
    /// | 6 | `+` `-` |
    /// | 5 | `<` `<=` `>` `>=` |
    /// | 4 | `==` `!=` |
    /// | 3 | `&&` |
    /// | 2 | `\|\|` |
    /// | 1 | `\|` |
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Multiply | BinOp::Divide | BinOp::Modulo => 7,
            BinOp::Add | BinOp::Subtract => 6,
            BinOp::LessThan | BinOp::LessEqual | BinOp::GreaterThan | BinOp::GreaterEqual => 5,
            BinOp::Equal | BinOp::NotEqual => 4,
            BinOp::And => 3,
            BinOp::Or => 2,
            BinOp::Pipe => 1,
        }
    }
}
