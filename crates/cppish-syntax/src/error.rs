//! Error taxonomy for the Cppish pipeline.
//!
//! Each stage has its own error enum: [`LexError`] for tokenization,
//! [`ParseError`] for syntax analysis and [`RuntimeError`] for execution.
//! All three are fatal to the run that raised them but never to the host
//! process; the umbrella [`Error`] lets callers hold "whatever went wrong"
//! in one value and still match on the stage when they care.

use std::error;
use std::fmt;
use std::time::Duration;

/// Convenience alias used across the Cppish crates.
pub type Result<T> = std::result::Result<T, Error>;

/// An error raised while scanning source text into tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// A character no token starts with, e.g. `@` or a lone `<`.
    UnexpectedChar { ch: char, line: usize, col: usize },
    /// A string literal whose closing `"` never arrives.
    UnterminatedString { line: usize, col: usize },
    /// A numeric literal that cannot be represented, e.g. an integer
    /// literal that overflows `i64`.
    InvalidNumber { lexeme: String, line: usize, col: usize },
}

impl LexError {
    /// Source position of the offending character or literal (1-based).
    pub fn position(&self) -> (usize, usize) {
        match self {
            LexError::UnexpectedChar { line, col, .. }
            | LexError::UnterminatedString { line, col }
            | LexError::InvalidNumber { line, col, .. } => (*line, *col),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedChar { ch, line, col } => {
                write!(f, "unexpected character '{}' at {}:{}", ch, line, col)
            }
            LexError::UnterminatedString { line, col } => {
                write!(f, "unterminated string literal starting at {}:{}", line, col)
            }
            LexError::InvalidNumber { lexeme, line, col } => {
                write!(f, "invalid number '{}' at {}:{}", lexeme, line, col)
            }
        }
    }
}

impl error::Error for LexError {}

/// An error raised while parsing tokens into an AST.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The parser needed one thing and found another. Both sides are
    /// pre-rendered diagnostic strings, e.g. `expected ';', found 'cout'`.
    UnexpectedToken {
        expected: String,
        found: String,
        line: usize,
        col: usize,
    },
    /// The token stream ended mid-construct.
    UnexpectedEof { expected: String },
}

impl ParseError {
    /// Source position of the unexpected token, if there was one.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            ParseError::UnexpectedToken { line, col, .. } => Some((*line, *col)),
            ParseError::UnexpectedEof { .. } => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken {
                expected,
                found,
                line,
                col,
            } => {
                write!(f, "expected {}, found {} at {}:{}", expected, found, line, col)
            }
            ParseError::UnexpectedEof { expected } => {
                write!(f, "expected {}, found end of input", expected)
            }
        }
    }
}

impl error::Error for ParseError {}

/// An error raised while executing an AST.
///
/// Runtime errors abort the program mid-run; output and variable effects
/// produced before the failure are preserved by the interpreter.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// A `Declare` for a name that already exists in any live scope.
    Redeclaration { name: String },
    /// A read or assignment of a name no scope declares.
    UndeclaredVariable { name: String },
    /// An arithmetic operator applied to operands it does not support,
    /// e.g. `"a" - 1`.
    TypeMismatch {
        op: &'static str,
        left: String,
        right: String,
    },
    /// Integer division by zero. Float division by zero is not an
    /// error; it follows IEEE 754.
    DivisionByZero,
    /// A value that cannot be converted to the declared type,
    /// e.g. `int x = "abc";`.
    InvalidCoercion { value: String, target: String },
    /// A `while` loop ran more iterations than the configured budget.
    LoopLimitExceeded { limit: u64 },
    /// The whole run exceeded its wall-clock budget.
    TimeLimitExceeded { budget: Duration },
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::Redeclaration { name } => {
                write!(f, "variable '{}' is already declared", name)
            }
            RuntimeError::UndeclaredVariable { name } => {
                write!(f, "variable '{}' is not declared", name)
            }
            RuntimeError::TypeMismatch { op, left, right } => {
                write!(f, "cannot apply '{}' to {} and {}", op, left, right)
            }
            RuntimeError::DivisionByZero => f.write_str("division by zero"),
            RuntimeError::InvalidCoercion { value, target } => {
                write!(f, "cannot convert {} to {}", value, target)
            }
            RuntimeError::LoopLimitExceeded { limit } => {
                write!(f, "while loop exceeded {} iterations", limit)
            }
            RuntimeError::TimeLimitExceeded { budget } => {
                write!(f, "execution exceeded the {:?} time budget", budget)
            }
        }
    }
}

impl error::Error for RuntimeError {}

/// Any error the Cppish pipeline can produce, tagged by stage.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Lex(LexError),
    Parse(ParseError),
    Runtime(RuntimeError),
}

impl Error {
    /// Source position associated with the error, when one exists.
    /// Runtime errors carry no positions; the trace locates them instead.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Lex(e) => Some(e.position()),
            Error::Parse(e) => e.position(),
            Error::Runtime(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lex(e) => write!(f, "lex error: {}", e),
            Error::Parse(e) => write!(f, "parse error: {}", e),
            Error::Runtime(e) => write!(f, "runtime error: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Lex(e) => Some(e),
            Error::Parse(e) => Some(e),
            Error::Runtime(e) => Some(e),
        }
    }
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Error::Lex(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Error::Runtime(e)
    }
}
