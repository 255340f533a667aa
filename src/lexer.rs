use std::fmt;

use thiserror::Error;

use crate::ast::{Lexeme, Number, Token};

/// Location in the source. `offset` counts chars from 0, `line` and `column` start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn start() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("Unterminated string starting at {position}: missing closing {quote}")]
    UnterminatedString { quote: char, position: Position },

    #[error("Unexpected character '{ch}' at {position}{hint}")]
    UnexpectedChar {
        ch: char,
        position: Position,
        hint: &'static str,
    },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnterminatedString { position, .. }
            | LexError::UnexpectedChar { position, .. } => *position,
        }
    }
}

/// Tokenizer over a single expression.
///
/// Also an iterator: it yields lexemes up to and including [`Token::Eof`], then
/// stops. A lex error ends the iteration as well. [`Lexer::reset`] starts over.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    finished: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    pub fn reset(&mut self) {
        self.position = 0;
        self.line = 1;
        self.column = 1;
        self.finished = false;
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        if self.current_char() == Some('\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.position += 1;
    }

    fn here(&self) -> Position {
        Position {
            offset: self.position,
            line: self.line,
            column: self.column,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn is_identifier_start(ch: char) -> bool {
        ch.is_alphabetic() || ch == '_' || ch == '$'
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' || ch == '$' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.here();
        let mut result = String::new();
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance(); // Consume backslash
                    let escaped = match self.current_char() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some('v') => '\u{b}',
                        Some('0') => '\0',
                        // quotes, backslash, and anything else stand for themselves
                        Some(other) => other,
                        None => break,
                    };
                    result.push(escaped);
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString {
            quote,
            position: start,
        })
    }

    fn read_number(&mut self) -> Token {
        let mut number = String::new();
        let mut is_fraction = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_fraction
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_fraction = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::Number(Number::from_digits(&number))
    }

    /// Two-char operator if the next char is `second`, otherwise the single-char one.
    fn either(&mut self, second: char, double: Token, single: Token) -> Token {
        self.advance();
        if self.current_char() == Some(second) {
            self.advance();
            double
        } else {
            single
        }
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    fn required_double(
        &mut self,
        ch: char,
        double: Token,
        hint: &'static str,
    ) -> Result<Token, LexError> {
        if self.peek_char(1) == Some(ch) {
            self.advance();
            self.advance();
            Ok(double)
        } else {
            Err(LexError::UnexpectedChar {
                ch,
                position: self.here(),
                hint,
            })
        }
    }

    pub fn next_lexeme(&mut self) -> Result<Lexeme, LexError> {
        self.skip_whitespace();

        let start = self.here();
        let token = match self.current_char() {
            None => Token::Eof,
            Some('|') => self.either('|', Token::OrOr, Token::Pipe),
            Some('&') => self.required_double('&', Token::AndAnd, " (did you mean '&&'?)")?,
            Some('=') => self.required_double('=', Token::EqEq, " (did you mean '=='?)")?,
            Some('!') => self.either('=', Token::NotEq, Token::Exclamation),
            Some('<') => self.either('=', Token::LtEq, Token::Lt),
            Some('>') => self.either('=', Token::GtEq, Token::Gt),
            Some('.') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number()
            }
            Some('.') => self.single(Token::Dot),
            Some(',') => self.single(Token::Comma),
            Some('+') => self.single(Token::Plus),
            Some('-') => self.single(Token::Minus),
            Some('*') => self.single(Token::Star),
            Some('/') => self.single(Token::Slash),
            Some('%') => self.single(Token::Percent),
            Some('?') => self.single(Token::Question),
            Some(':') => self.single(Token::Colon),
            Some('(') => self.single(Token::LParen),
            Some(')') => self.single(Token::RParen),
            Some('[') => self.single(Token::LBracket),
            Some(']') => self.single(Token::RBracket),
            Some('{') => self.single(Token::LBrace),
            Some('}') => self.single(Token::RBrace),
            Some(quote @ ('"' | '\'')) => Token::String(self.read_string(quote)?),
            Some(ch) if Self::is_identifier_start(ch) => {
                let ident = self.read_identifier();

                match ident.as_str() {
                    "true" => Token::Boolean(true),
                    "false" => Token::Boolean(false),
                    "null" => Token::Null,
                    _ => Token::Identifier(ident),
                }
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some(ch) => {
                return Err(LexError::UnexpectedChar {
                    ch,
                    position: start,
                    hint: "",
                });
            }
        };

        let text = self.input[start.offset..self.position].iter().collect();
        Ok(Lexeme {
            token,
            text,
            position: start,
        })
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.next_lexeme().map(|lexeme| lexeme.token)
    }
}

impl Iterator for Lexer {
    type Item = Result<Lexeme, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_lexeme();
        self.finished = match &result {
            Ok(lexeme) => lexeme.token == Token::Eof,
            Err(_) => true,
        };
        Some(result)
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("true false null this");
    assert_eq!(lexer.next_token(), Ok(Token::Boolean(true)));
    assert_eq!(lexer.next_token(), Ok(Token::Boolean(false)));
    assert_eq!(lexer.next_token(), Ok(Token::Null));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("this".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_pipe() {
    let mut lexer = Lexer::new("items | sorted || [x]");
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("items".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Pipe));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("sorted".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::OrOr));
    assert_eq!(lexer.next_token(), Ok(Token::LBracket));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("x".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::RBracket));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}
