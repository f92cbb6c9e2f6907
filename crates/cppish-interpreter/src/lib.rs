//! Cppish interpreter: evaluates AST nodes with a simple tree-walking
//! interpreter.
//!
//! This crate provides the runtime for the Cppish language. The interpreter
//! walks Abstract Syntax Tree (AST) blocks produced by the parser; because
//! the tree is persistent, loop bodies and branches can be executed any
//! number of times. A run never touches the process: `cout` goes to an
//! in-memory buffer and every failure is a value, not a panic or an exit.

pub mod interpreter;
pub mod store;
pub mod value;

pub use interpreter::{Execution, Interpreter, Limits};
pub use store::VariableStore;
pub use value::Value;
