use std::mem;

use thiserror::Error;

use crate::{
    ast::{AstFactory, BinOp, Lexeme, Literal, Token, UnaryOp},
    lexer::{LexError, Lexer, Position},
};

/// An unexpected token, with what would have been accepted in its place.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Unexpected {found} at {position}, expected {}", .expected.join(" or "))]
pub struct SyntaxError {
    pub found: String,
    pub position: Position,
    pub expected: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("Exceeded nesting limit of {limit} at {position}")]
    RecursionLimit { limit: usize, position: Position },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(e) => e.position(),
            ParseError::Syntax(e) => e.position,
            ParseError::RecursionLimit { position, .. } => *position,
        }
    }
}

const PRIMARY: &[&str] = &[
    "number", "string", "`true`", "`false`", "`null`", "identifier", "`(`", "`[`", "`{`",
    "`!`", "`-`", "`+`",
];

/// How deeply nodes may nest before parsing gives up.
pub const DEFAULT_RECURSION_LIMIT: usize = 64;

/// Recursive-descent parser with precedence climbing for binary operators.
///
/// The parser is generic over the [`AstFactory`] that builds its nodes and holds
/// a single token of lookahead.
///
/// Every level of nesting (brackets, unary operators, ternary branches, and
/// each link of a binary or postfix chain) counts against a recursion limit,
/// so hostile input fails with [`ParseError::RecursionLimit`] instead of
/// exhausting the stack.
pub struct Parser<'f, F: AstFactory> {
    lexer: Lexer,
    factory: &'f F,
    current: Lexeme,
    recursion_limit: Option<usize>,
    remaining_depth: Option<usize>,
}

/// Parse `source` into a single root node built by `factory`.
pub fn parse<F: AstFactory>(source: &str, factory: &F) -> Result<F::Node, ParseError> {
    Parser::new(Lexer::new(source), factory)?.parse()
}

impl<'f, F: AstFactory> Parser<'f, F> {
    pub fn new(mut lexer: Lexer, factory: &'f F) -> Result<Self, ParseError> {
        let current = lexer.next_lexeme()?;
        Ok(Parser {
            lexer,
            factory,
            current,
            recursion_limit: Some(DEFAULT_RECURSION_LIMIT),
            remaining_depth: Some(DEFAULT_RECURSION_LIMIT),
        })
    }

    #[must_use]
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self.remaining_depth = Some(limit);
        self
    }

    /// Lift the nesting limit. Deep enough input will then overflow the stack.
    #[must_use]
    pub fn without_recursion_limit(mut self) -> Self {
        self.recursion_limit = None;
        self.remaining_depth = None;
        self
    }

    fn enter_recursion(&mut self) -> Result<(), ParseError> {
        if let Some(ref mut remaining) = self.remaining_depth {
            if *remaining == 0 {
                return Err(ParseError::RecursionLimit {
                    limit: self.recursion_limit.unwrap_or_default(),
                    position: self.current.position,
                });
            }
            *remaining -= 1;
        }
        Ok(())
    }

    fn exit_recursion(&mut self) {
        if let Some(ref mut remaining) = self.remaining_depth {
            *remaining += 1;
        }
    }

    /// Run `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.enter_recursion()?;
        let result = parse(self);
        self.exit_recursion();
        result
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current = self.lexer.next_lexeme()?;
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current.token) == mem::discriminant(token)
    }

    fn unexpected(&self, expected: &[&'static str]) -> ParseError {
        ParseError::Syntax(SyntaxError {
            found: self.current.token.describe(),
            position: self.current.position,
            expected: expected.to_vec(),
        })
    }

    fn expect(&mut self, expected: Token, name: &'static str) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.unexpected(&[name]));
        }
        self.advance()
    }

    /// Parse the whole input. Blank input yields the factory's empty node.
    pub fn parse(&mut self) -> Result<F::Node, ParseError> {
        if self.check(&Token::Eof) {
            return Ok(self.factory.empty());
        }
        let expr = self.parse_expression()?;
        self.expect(Token::Eof, "end of input")?;
        Ok(expr)
    }

    pub fn parse_expression(&mut self) -> Result<F::Node, ParseError> {
        self.parse_ternary()
    }

    fn parse_ternary(&mut self) -> Result<F::Node, ParseError> {
        let condition = self.parse_binary(1)?;
        if !self.check(&Token::Question) {
            return Ok(condition);
        }
        self.advance()?;
        let true_expr = self.nested(Self::parse_ternary)?;
        self.expect(Token::Colon, "`:`")?;
        let false_expr = self.nested(Self::parse_ternary)?;
        Ok(self.factory.ternary(condition, true_expr, false_expr))
    }

    /// Precedence climbing over the binary bands; every band is left-associative.
    fn parse_binary(&mut self, min_precedence: u8) -> Result<F::Node, ParseError> {
        let mut left = self.parse_unary()?;
        let depth = self.remaining_depth;

        while let Some(op) = BinOp::from_token(&self.current.token) {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.enter_recursion()?;
            self.advance()?;
            let right = self.parse_binary(precedence + 1)?;
            left = self.factory.binary(left, op, right);
        }

        self.remaining_depth = depth;
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<F::Node, ParseError> {
        if let Some(op) = UnaryOp::from_token(&self.current.token) {
            self.advance()?;
            let operand = self.nested(Self::parse_unary)?;
            return Ok(self.factory.unary(op, operand));
        }
        self.parse_postfix()
    }

    /// Member access, calls and indexing chained onto a primary.
    fn parse_postfix(&mut self) -> Result<F::Node, ParseError> {
        let mut expr = self.parse_primary()?;
        let depth = self.remaining_depth;

        loop {
            match self.current.token {
                Token::Dot => {
                    self.enter_recursion()?;
                    self.advance()?; // consume '.'

                    // After dot, we expect an identifier
                    let name = match &mut self.current.token {
                        Token::Identifier(name) => mem::take(name),
                        _ => return Err(self.unexpected(&["identifier"])),
                    };
                    self.advance()?;

                    if self.check(&Token::LParen) {
                        let arguments = self.parse_arguments()?;
                        expr = self.factory.invoke(expr, Some(name), Some(arguments));
                    } else {
                        expr = self.factory.getter(expr, name);
                    }
                }
                Token::LParen => {
                    self.enter_recursion()?;
                    let arguments = self.parse_arguments()?;
                    expr = self.factory.invoke(expr, None, Some(arguments));
                }
                Token::LBracket => {
                    self.enter_recursion()?;
                    self.advance()?; // consume '['
                    let argument = self.parse_expression()?;
                    self.expect(Token::RBracket, "`]`")?;
                    expr = self.factory.index(expr, argument);
                }
                _ => break,
            }
        }

        self.remaining_depth = depth;
        Ok(expr)
    }

    /// `(` [expression {`,` expression}] `)`
    fn parse_arguments(&mut self) -> Result<Vec<F::Node>, ParseError> {
        self.expect(Token::LParen, "`(`")?;
        let mut arguments = vec![];

        if !self.check(&Token::RParen) {
            loop {
                arguments.push(self.parse_expression()?);
                if self.check(&Token::Comma) {
                    self.advance()?;
                } else {
                    break;
                }
            }
        }

        if !self.check(&Token::RParen) {
            return Err(self.unexpected(&["`,`", "`)`"]));
        }
        self.advance()?;
        Ok(arguments)
    }

    fn parse_primary(&mut self) -> Result<F::Node, ParseError> {
        let node = match mem::replace(&mut self.current.token, Token::Eof) {
            Token::Number(n) => self.factory.literal(Literal::Number(n)),
            Token::String(s) => self.factory.literal(Literal::String(s)),
            Token::Boolean(b) => self.factory.literal(Literal::Boolean(b)),
            Token::Null => self.factory.literal(Literal::Null),
            Token::Identifier(name) => self.factory.identifier(name),
            Token::LParen => return self.nested(Self::parse_paren),
            Token::LBracket => return self.nested(Self::parse_list_literal),
            Token::LBrace => return self.nested(Self::parse_map_literal),
            other => {
                self.current.token = other;
                return Err(self.unexpected(PRIMARY));
            }
        };
        self.advance()?;
        Ok(node)
    }

    fn parse_paren(&mut self) -> Result<F::Node, ParseError> {
        self.advance()?; // consume '('
        let child = self.parse_expression()?;
        self.expect(Token::RParen, "`)`")?;
        Ok(self.factory.paren(child))
    }

    /// Items up to `]`. Consecutive commas leave a hole, a trailing comma is ignored.
    fn parse_list_literal(&mut self) -> Result<F::Node, ParseError> {
        self.advance()?; // consume '['
        let mut items = vec![];

        while !self.check(&Token::RBracket) {
            if self.check(&Token::Comma) {
                self.advance()?;
                items.push(None);
                continue;
            }

            items.push(Some(self.parse_expression()?));

            if !self.check(&Token::RBracket) {
                if !self.check(&Token::Comma) {
                    return Err(self.unexpected(&["`,`", "`]`"]));
                }
                self.advance()?;
            }
        }

        self.advance()?; // consume ']'
        Ok(self.factory.list(items))
    }

    /// `key: value` pairs up to `}`. A key without `:` gets no value;
    /// stray commas are skipped.
    fn parse_map_literal(&mut self) -> Result<F::Node, ParseError> {
        self.advance()?; // consume '{'
        let mut entries = vec![];

        while !self.check(&Token::RBrace) {
            if self.check(&Token::Comma) {
                self.advance()?;
                continue;
            }

            // Bare identifiers are re-encoded as string keys
            let key = match &mut self.current.token {
                Token::String(key) | Token::Identifier(key) => mem::take(key),
                _ => return Err(self.unexpected(&["string", "identifier", "`}`"])),
            };
            self.advance()?;

            let value = if self.check(&Token::Colon) {
                self.advance()?;
                Some(self.parse_expression()?)
            } else {
                None
            };
            entries.push((key, value));

            if !self.check(&Token::RBrace) {
                if !self.check(&Token::Comma) {
                    return Err(self.unexpected(&["`:`", "`,`", "`}`"]));
                }
                self.advance()?;
            }
        }

        self.advance()?; // consume '}'
        Ok(self.factory.map(entries))
    }
}
