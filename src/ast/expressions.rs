use crate::ast::{BinOp, Number, UnaryOp};

/// Primitive constant value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Decoded string value, without quotes or escape markers
    String(String),
    Number(Number),
    Boolean(bool),
    Null,
}

/// Abstract Syntax Tree node representing a parsed expression.
///
/// Trees are built bottom-up by an [`AstFactory`](crate::ast::AstFactory) and are
/// never mutated afterwards. Every child is owned by exactly one parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// The empty expression (blank input)
    Empty,

    /// Primitive constant
    ///
    /// # Examples
    /// ```text
    /// 42
    /// "hello"
    /// true
    /// null
    /// ```
    Literal(Literal),

    /// Bare name, including the reserved name `this`
    Identifier(String),

    /// Prefix operator application
    ///
    /// # Example
    /// ```text
    /// !done
    /// ```
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Infix operator application, including the pipe operator
    ///
    /// # Examples
    /// ```text
    /// price * 2
    /// items | sorted
    /// ```
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Member access with `.`
    ///
    /// # Example
    /// ```text
    /// user.name
    /// ```
    Getter { receiver: Box<Expr>, name: String },

    /// Function or method call.
    ///
    /// `method: None` calls the receiver itself. `arguments: None` is distinct
    /// from an empty argument list, though both render as `()`.
    ///
    /// # Examples
    /// ```text
    /// format(date)
    /// user.greet("hi")
    /// ```
    Invoke {
        receiver: Box<Expr>,
        method: Option<String>,
        arguments: Option<Vec<Expr>>,
    },

    /// Explicit parenthesization, kept through to code generation
    Paren(Box<Expr>),

    /// Computed access with `[...]`
    ///
    /// # Example
    /// ```text
    /// items[0]
    /// ```
    Index {
        receiver: Box<Expr>,
        argument: Box<Expr>,
    },

    /// Conditional expression
    ///
    /// # Example
    /// ```text
    /// active ? "on" : "off"
    /// ```
    Ternary {
        condition: Box<Expr>,
        true_expr: Box<Expr>,
        false_expr: Box<Expr>,
    },

    /// Map literal, entries in source order.
    ///
    /// A `None` value is a key written without a value (`{a, b: 1}`).
    Map(Vec<(String, Option<Expr>)>),

    /// List literal, items in source order.
    ///
    /// A `None` item is a hole between consecutive commas (`[1,,3]`).
    List(Vec<Option<Expr>>),
}

impl Expr {
    /// Variant name, as used in the JSON tree dump.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Empty => "Empty",
            Expr::Literal(_) => "Literal",
            Expr::Identifier(_) => "ID",
            Expr::Unary { .. } => "Unary",
            Expr::Binary { .. } => "Binary",
            Expr::Getter { .. } => "Getter",
            Expr::Invoke { .. } => "Invoke",
            Expr::Paren(_) => "Paren",
            Expr::Index { .. } => "Index",
            Expr::Ternary { .. } => "Ternary",
            Expr::Map(_) => "Map",
            Expr::List(_) => "List",
        }
    }
}
