//! Recursive descent parser for Cppish.
//!
//! The parser owns a token vector and walks it once, building a [`Block`]
//! of statements that the interpreter can execute any number of times.
//! Loop bodies are therefore plain sub-trees; nothing about execution
//! order leaks into parsing.
//!
//! Grammar:
//!
//! ```text
//! program  := stmt* EOF
//! block    := "{" stmt* "}"
//! stmt     := declare | assign | output | if | while
//! declare  := type IDENT ("=" expr)? ";"
//! assign   := IDENT "=" expr ";"
//! output   := "cout" (STRING | IDENT | "endl")* ";"
//! if       := "if" "(" expr ")" block ("else" block)?
//! while    := "while" "(" expr ")" block
//! expr     := term (("+" | "-") term)*
//! term     := primary (("*" | "/") primary)*
//! primary  := INT | FLOAT | STRING | "true" | "false" | IDENT
//!           | "(" expr ")"
//! type     := "int" | "double" | "string" | "bool"
//! ```
//!
//! Conditions require parentheses and `else` requires a braced block;
//! there is no unary minus.

use cppish_syntax::ast::{BinOp, Block, Expr, OutputItem, Stmt, Type};
use cppish_syntax::error::ParseError;
use cppish_syntax::token::{Token, TokenKind};

/// Builds the error for a token that does not fit the grammar. An `Eof`
/// token turns into [`ParseError::UnexpectedEof`] so "found end of input"
/// never carries a misleading position.
fn unexpected(expected: &str, tok: &Token) -> ParseError {
    if tok.kind == TokenKind::Eof {
        ParseError::UnexpectedEof {
            expected: expected.to_string(),
        }
    } else {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: tok.kind.to_string(),
            line: tok.line,
            col: tok.col,
        }
    }
}

/// Single-pass recursive descent parser over a token vector.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a parser over tokens produced by the lexer. The vector is
    /// expected to end with [`TokenKind::Eof`].
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Consumes the current token if it matches `kind`, else errors with
    /// the human-readable `expected` description.
    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<(), ParseError> {
        match self.tokens.get(self.pos) {
            Some(t) if t.kind == kind => {
                self.pos += 1;
                Ok(())
            }
            Some(t) => Err(unexpected(expected, t)),
            None => Err(ParseError::UnexpectedEof {
                expected: expected.to_string(),
            }),
        }
    }

    fn expect_ident(&mut self, expected: &str) -> Result<String, ParseError> {
        match self.tokens.get(self.pos) {
            Some(t) => {
                if let TokenKind::Ident(name) = &t.kind {
                    let name = name.clone();
                    self.pos += 1;
                    Ok(name)
                } else {
                    Err(unexpected(expected, t))
                }
            }
            None => Err(ParseError::UnexpectedEof {
                expected: expected.to_string(),
            }),
        }
    }

    /// Parse a whole program: statements until end of input.
    pub fn parse_program(&mut self) -> Result<Block, ParseError> {
        let mut stmts = Vec::new();
        while !matches!(self.peek_kind(), Some(TokenKind::Eof) | None) {
            stmts.push(self.parse_stmt()?);
        }
        Ok(Block { stmts })
    }

    /// Parse a braced block: `{ stmt* }`.
    pub fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.expect(TokenKind::LCurly, "'{'")?;
        let mut stmts = Vec::new();
        loop {
            match self.peek_kind() {
                Some(TokenKind::RCurly) => {
                    self.advance();
                    break;
                }
                Some(TokenKind::Eof) | None => {
                    return Err(ParseError::UnexpectedEof {
                        expected: "'}'".to_string(),
                    });
                }
                _ => stmts.push(self.parse_stmt()?),
            }
        }
        Ok(Block { stmts })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let tok = match self.tokens.get(self.pos) {
            Some(t) => t.clone(),
            None => {
                return Err(ParseError::UnexpectedEof {
                    expected: "a statement".to_string(),
                });
            }
        };
        match tok.kind {
            TokenKind::Type(ty) => {
                self.advance();
                self.parse_declare(ty)
            }
            TokenKind::Ident(name) => {
                self.advance();
                self.parse_assign(name)
            }
            TokenKind::Cout => {
                self.advance();
                self.parse_output()
            }
            TokenKind::If => {
                self.advance();
                self.parse_if()
            }
            TokenKind::While => {
                self.advance();
                self.parse_while()
            }
            _ => Err(unexpected("a statement", &tok)),
        }
    }

    /// `type IDENT ("=" expr)? ";"` - the type keyword is already consumed.
    fn parse_declare(&mut self, ty: Type) -> Result<Stmt, ParseError> {
        let name = self.expect_ident("a variable name")?;
        let init = if self.peek_kind() == Some(&TokenKind::Assign) {
            self.advance();
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Declare { ty, name, init })
    }

    /// `IDENT "=" expr ";"` - the identifier is already consumed.
    fn parse_assign(&mut self, name: String) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::Assign, "'='")?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Assign { name, expr })
    }

    /// Output items until the terminating semicolon. The lexer has already
    /// swallowed any `<<` punctuation, so items sit next to each other.
    fn parse_output(&mut self) -> Result<Stmt, ParseError> {
        let mut items = Vec::new();
        loop {
            let tok = match self.tokens.get(self.pos) {
                Some(t) => t.clone(),
                None => {
                    return Err(ParseError::UnexpectedEof {
                        expected: "';'".to_string(),
                    });
                }
            };
            match tok.kind {
                TokenKind::Semicolon => {
                    self.advance();
                    break;
                }
                TokenKind::Str(s) => {
                    self.advance();
                    items.push(OutputItem::Literal(s));
                }
                TokenKind::Ident(name) => {
                    self.advance();
                    items.push(OutputItem::Var(name));
                }
                TokenKind::Endl => {
                    self.advance();
                    items.push(OutputItem::Newline);
                }
                _ => return Err(unexpected("a string literal, variable or 'endl'", &tok)),
            }
        }
        Ok(Stmt::Output(items))
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::LParen, "'('")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        let then_block = self.parse_block()?;
        let else_block = if self.peek_kind() == Some(&TokenKind::Else) {
            self.advance();
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Stmt::If {
            cond,
            then_block,
            else_block,
        })
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::LParen, "'('")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        let body = self.parse_block()?;
        Ok(Stmt::While { cond, body })
    }

    /// `term (("+" | "-") term)*`, left-associative.
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinOp::Add,
                Some(TokenKind::Minus) => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// `primary (("*" | "/") primary)*`, left-associative.
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_primary()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinOp::Mul,
                Some(TokenKind::Slash) => BinOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_primary()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let tok = match self.tokens.get(self.pos) {
            Some(t) => t.clone(),
            None => {
                return Err(ParseError::UnexpectedEof {
                    expected: "an expression".to_string(),
                });
            }
        };
        match tok.kind {
            TokenKind::Int(n) => {
                self.advance();
                Ok(Expr::LiteralInt(n))
            }
            TokenKind::Float(x) => {
                self.advance();
                Ok(Expr::LiteralDouble(x))
            }
            TokenKind::Str(s) => {
                self.advance();
                Ok(Expr::LiteralText(s))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::LiteralBool(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::LiteralBool(false))
            }
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Expr::Var(name))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            _ => Err(unexpected("an expression", &tok)),
        }
    }
}
