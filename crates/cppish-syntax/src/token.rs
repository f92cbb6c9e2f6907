//! Token definitions for the Cppish lexer.
//!
//! Tokens are the smallest meaningful units of Cppish source code. The lexer
//! produces them in source order, each carrying its 1-based line and column
//! for error reporting, and the sequence always ends with [`TokenKind::Eof`].
//!
//! # Token categories
//!
//! - **Identifiers**: variable names (`x`, `total_price`)
//! - **Literals**: integers, floats, strings, booleans (`42`, `2.5`, `"hi"`,
//!   `true`)
//! - **Keywords**: `int`, `double`, `string`, `bool`, `cout`, `endl`, `if`,
//!   `else`, `while`
//! - **Operators and punctuation**: `=`, `+`, `-`, `*`, `/`, `(`, `)`, `{`,
//!   `}`, `;`
//!
//! Keywords are not matched by dedicated lexer patterns. The scanner reads
//! every alphabetic run as an identifier candidate and reclassifies it
//! through the fixed table in [`TokenKind::keyword`], so no pattern-ordering
//! contract can be violated.
//!
//! # Examples
//!
//! ```rust
//! use cppish_syntax::token::{Token, TokenKind};
//!
//! let name = Token {
//!     kind: TokenKind::Ident("count".to_string()),
//!     line: 1,
//!     col: 5,
//! };
//! assert_eq!(name.kind.lexeme(), "count");
//!
//! // Keyword reclassification:
//! assert_eq!(TokenKind::keyword("while"), Some(TokenKind::While));
//! assert_eq!(TokenKind::keyword("whilex"), None);
//! ```

use std::fmt;

use crate::ast::Type;

/// Token types produced by the Cppish lexer.
///
/// Numeric literals split into [`Int`](TokenKind::Int) and
/// [`Float`](TokenKind::Float) so integer literals keep full `i64`
/// precision; which one a literal becomes depends on whether it contains a
/// decimal point.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // === Literals and identifiers ===
    /// An identifier (variable name), e.g. `x`, `total`
    Ident(String),
    /// An integer literal, e.g. `42`
    Int(i64),
    /// A floating-point literal, e.g. `2.5`
    Float(f64),
    /// A string literal without its quotes, e.g. `"hello"` -> `hello`.
    /// Cppish strings have no escape sequences; content is verbatim.
    Str(String),

    // === Keywords ===
    /// A type keyword: `int`, `double`, `string` or `bool`
    Type(Type),
    /// The `true` literal
    True,
    /// The `false` literal
    False,
    /// The `cout` keyword - starts an output statement
    Cout,
    /// The `endl` keyword - a line break inside an output statement
    Endl,
    /// The `if` keyword
    If,
    /// The `else` keyword
    Else,
    /// The `while` keyword
    While,

    // === Operators and punctuation ===
    /// Assignment operator `=`
    Assign,
    /// Addition operator `+`
    Plus,
    /// Subtraction operator `-`
    Minus,
    /// Multiplication operator `*`
    Star,
    /// Division operator `/`
    Slash,
    /// Left parenthesis `(`
    LParen,
    /// Right parenthesis `)`
    RParen,
    /// Left curly brace `{`
    LCurly,
    /// Right curly brace `}`
    RCurly,
    /// Statement terminator `;`
    Semicolon,

    /// End-of-input marker - always the final token of a sequence
    Eof,
}

impl TokenKind {
    /// The fixed keyword table. Returns the keyword token for a reserved
    /// word, or `None` if the text is an ordinary identifier.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        let kind = match ident {
            "int" => TokenKind::Type(Type::Int),
            "double" => TokenKind::Type(Type::Double),
            "string" => TokenKind::Type(Type::Text),
            "bool" => TokenKind::Type(Type::Bool),
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "cout" => TokenKind::Cout,
            "endl" => TokenKind::Endl,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            _ => return None,
        };
        Some(kind)
    }

    /// Re-serializes the token to source text. Joining lexemes with spaces
    /// recovers a program the lexer tokenizes back to the same kinds.
    ///
    /// ```rust
    /// use cppish_syntax::ast::Type;
    /// use cppish_syntax::token::TokenKind;
    ///
    /// assert_eq!(TokenKind::Type(Type::Text).lexeme(), "string");
    /// assert_eq!(TokenKind::Float(10.0).lexeme(), "10.0");
    /// assert_eq!(TokenKind::Float(0.00001).lexeme(), "0.00001");
    /// assert_eq!(TokenKind::Str("hi".to_string()).lexeme(), "\"hi\"");
    /// ```
    pub fn lexeme(&self) -> String {
        match self {
            TokenKind::Ident(name) => name.clone(),
            TokenKind::Int(n) => n.to_string(),
            // Display never falls back to exponent notation, which the
            // lexer could not read; whole values get the decimal point
            // restored so the lexeme re-lexes as a float.
            TokenKind::Float(x) => {
                let s = x.to_string();
                if s.contains('.') {
                    s
                } else {
                    format!("{}.0", s)
                }
            }
            TokenKind::Str(s) => format!("\"{}\"", s),
            TokenKind::Type(ty) => ty.keyword().to_string(),
            TokenKind::True => "true".to_string(),
            TokenKind::False => "false".to_string(),
            TokenKind::Cout => "cout".to_string(),
            TokenKind::Endl => "endl".to_string(),
            TokenKind::If => "if".to_string(),
            TokenKind::Else => "else".to_string(),
            TokenKind::While => "while".to_string(),
            TokenKind::Assign => "=".to_string(),
            TokenKind::Plus => "+".to_string(),
            TokenKind::Minus => "-".to_string(),
            TokenKind::Star => "*".to_string(),
            TokenKind::Slash => "/".to_string(),
            TokenKind::LParen => "(".to_string(),
            TokenKind::RParen => ")".to_string(),
            TokenKind::LCurly => "{".to_string(),
            TokenKind::RCurly => "}".to_string(),
            TokenKind::Semicolon => ";".to_string(),
            TokenKind::Eof => String::new(),
        }
    }
}

/// Diagnostic rendering, used when a token shows up in an error message.
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "identifier '{}'", name),
            TokenKind::Int(_) | TokenKind::Float(_) => {
                write!(f, "number '{}'", self.lexeme())
            }
            TokenKind::Str(_) => write!(f, "string literal {}", self.lexeme()),
            TokenKind::Eof => f.write_str("end of input"),
            other => write!(f, "'{}'", other.lexeme()),
        }
    }
}

/// A token with its source location.
///
/// `line` and `col` are 1-based and point at the token's first character,
/// which lets the parser report errors like:
///
/// ```text
/// parse error: expected ')', found '{' at 3:12
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind and semantic content of this token
    pub kind: TokenKind,

    /// Line number in the source (1-based)
    pub line: usize,

    /// Column number in the source (1-based)
    pub col: usize,
}
