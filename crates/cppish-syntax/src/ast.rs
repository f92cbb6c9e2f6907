//! AST (abstract syntax tree) types for the Cppish language.
//!
//! The parser produces one persistent [`Block`] per program; branch and loop
//! bodies are nested `Block`s owned by their statement node. The interpreter
//! only ever borrows the tree, so a loop body can be walked any number of
//! times.

use std::fmt;

/// Declared variable types, doubling as runtime value tags.
///
/// `Text` is spelled `string` in source code, matching the C++-flavored
/// surface syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Int,
    Double,
    Bool,
    Text,
}

impl Type {
    /// The surface keyword that declares this type.
    pub fn keyword(self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Double => "double",
            Type::Bool => "bool",
            Type::Text => "string",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Binary arithmetic operators. The grammar has no comparison or logical
/// operators; conditions rely on truthiness coercion instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// The operator's source symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Expressions (literals, variable references, arithmetic).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    LiteralInt(i64),
    LiteralDouble(f64),
    LiteralBool(bool),
    LiteralText(String),
    Var(String),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// One item of a `cout` statement, in output order.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputItem {
    /// A string literal, emitted verbatim.
    Literal(String),
    /// A variable reference, emitted via its current textual rendering.
    Var(String),
    /// An `endl`, emitted as a line break.
    Newline,
}

/// Statements (declarations, assignment, output, control flow).
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Declare {
        ty: Type,
        name: String,
        init: Option<Expr>,
    },
    Assign {
        name: String,
        expr: Expr,
    },
    Output(Vec<OutputItem>),
    If {
        cond: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },
    While {
        cond: Expr,
        body: Block,
    },
}

/// An ordered sequence of statements. The top level of a program is an
/// implicit brace-less block; nested blocks require braces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}
