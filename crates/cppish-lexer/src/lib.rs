//! Cppish lexer: converts source text into tokens.
//!
//! The scanner walks the source one character at a time. Alphabetic runs
//! are read as identifier candidates and reclassified through the keyword
//! table in [`TokenKind::keyword`], so keywords can never lose to a longer
//! identifier pattern. The stream-insertion punctuation `<<` is recognized
//! and consumed but produces no token; `cout` items simply follow each
//! other in the stream.

use cppish_syntax::error::LexError;
use cppish_syntax::token::{Token, TokenKind};

/// Streaming character scanner that produces tokens with positions.
pub struct Lexer {
    src: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    /// Create a new lexer over the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }
    fn peek_next(&self) -> Option<char> {
        self.src.get(self.pos + 1).copied()
    }
    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        ch
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start_line = self.line;
        let start_col = self.col;
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        // A dot only belongs to the literal when digits follow it, so
        // `1.x` lexes as integer 1 and leaves the dot behind.
        let kind = if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            s.push('.');
            self.advance();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    s.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
            let val: f64 = s.parse().map_err(|_| LexError::InvalidNumber {
                lexeme: s.clone(),
                line: start_line,
                col: start_col,
            })?;
            // Literals large enough to round to infinity have no writable
            // lexeme, so they are invalid just like overflowing integers.
            if !val.is_finite() {
                return Err(LexError::InvalidNumber {
                    lexeme: s,
                    line: start_line,
                    col: start_col,
                });
            }
            TokenKind::Float(val)
        } else {
            let val: i64 = s.parse().map_err(|_| LexError::InvalidNumber {
                lexeme: s.clone(),
                line: start_line,
                col: start_col,
            })?;
            TokenKind::Int(val)
        };
        Ok(Token {
            kind,
            line: start_line,
            col: start_col,
        })
    }

    fn read_ident_or_keyword(&mut self) -> Token {
        let start_line = self.line;
        let start_col = self.col;
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let kind = TokenKind::keyword(&s).unwrap_or(TokenKind::Ident(s));
        Token {
            kind,
            line: start_line,
            col: start_col,
        }
    }

    /// Reads a string literal after the opening quote has been consumed.
    /// Cppish strings have no escape sequences; every character up to the
    /// closing quote is taken verbatim, newlines included.
    fn read_string(&mut self, start_line: usize, start_col: usize) -> Result<Token, LexError> {
        let mut s = String::new();
        while let Some(c) = self.advance() {
            if c == '"' {
                return Ok(Token {
                    kind: TokenKind::Str(s),
                    line: start_line,
                    col: start_col,
                });
            }
            s.push(c);
        }
        Err(LexError::UnterminatedString {
            line: start_line,
            col: start_col,
        })
    }

    /// Tokenize the entire input into a vector of tokens ending with Eof.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let line = self.line;
            let col = self.col;
            let kind = match self.peek() {
                None => {
                    tokens.push(Token {
                        kind: TokenKind::Eof,
                        line,
                        col,
                    });
                    break;
                }
                Some('(') => {
                    self.advance();
                    TokenKind::LParen
                }
                Some(')') => {
                    self.advance();
                    TokenKind::RParen
                }
                Some('{') => {
                    self.advance();
                    TokenKind::LCurly
                }
                Some('}') => {
                    self.advance();
                    TokenKind::RCurly
                }
                Some(';') => {
                    self.advance();
                    TokenKind::Semicolon
                }
                Some('=') => {
                    self.advance();
                    TokenKind::Assign
                }
                Some('+') => {
                    self.advance();
                    TokenKind::Plus
                }
                Some('-') => {
                    self.advance();
                    TokenKind::Minus
                }
                Some('*') => {
                    self.advance();
                    TokenKind::Star
                }
                Some('/') => {
                    self.advance();
                    TokenKind::Slash
                }
                Some('<') => {
                    if self.peek_next() == Some('<') {
                        // Stream-insertion punctuation: consumed, no token.
                        self.advance();
                        self.advance();
                        continue;
                    }
                    return Err(LexError::UnexpectedChar { ch: '<', line, col });
                }
                Some('"') => {
                    self.advance();
                    tokens.push(self.read_string(line, col)?);
                    continue;
                }
                Some(c) if c.is_ascii_digit() => {
                    tokens.push(self.read_number()?);
                    continue;
                }
                Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                    tokens.push(self.read_ident_or_keyword());
                    continue;
                }
                Some(other) => {
                    return Err(LexError::UnexpectedChar {
                        ch: other,
                        line,
                        col,
                    });
                }
            };
            tokens.push(Token { kind, line, col });
        }
        Ok(tokens)
    }
}
