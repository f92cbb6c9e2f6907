//! Value types for the Cppish interpreter.

use std::fmt;

use cppish_syntax::ast::Type;
use cppish_syntax::error::RuntimeError;

/// A runtime value. Every variable keeps the tag of its declared type for
/// its whole lifetime; assignments coerce into that tag instead of changing
/// it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer value
    Int(i64),
    /// A 64-bit IEEE 754 floating-point value
    Double(f64),
    /// A boolean value (true or false)
    Bool(bool),
    /// A UTF-8 encoded string value
    Text(String),
}

impl Value {
    /// The declared type this value inhabits.
    pub fn ty(&self) -> Type {
        match self {
            Value::Int(_) => Type::Int,
            Value::Double(_) => Type::Double,
            Value::Bool(_) => Type::Bool,
            Value::Text(_) => Type::Text,
        }
    }

    /// The surface name of this value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.ty().keyword()
    }

    /// Truthiness for `if`/`while` conditions: zero, `false` and the empty
    /// string are false; everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Double(x) => *x != 0.0,
            Value::Bool(b) => *b,
            Value::Text(s) => !s.is_empty(),
        }
    }

    /// The value a declaration without an initializer starts with.
    pub fn default_for(ty: Type) -> Value {
        match ty {
            Type::Int => Value::Int(0),
            Type::Double => Value::Double(0.0),
            Type::Bool => Value::Bool(false),
            Type::Text => Value::Text(String::new()),
        }
    }

    /// Converts this value into the given declared type.
    ///
    /// Numeric conversions truncate toward zero (saturating at the i64
    /// bounds, NaN becomes 0); booleans convert as 0/1; any value renders
    /// into a string. The only failures are strings that do not parse as
    /// the numeric target, which raise [`RuntimeError::InvalidCoercion`].
    pub fn coerce_to(self, ty: Type) -> Result<Value, RuntimeError> {
        let value = match (ty, self) {
            (Type::Int, Value::Int(n)) => Value::Int(n),
            (Type::Int, Value::Double(x)) => Value::Int(x as i64),
            (Type::Int, Value::Bool(b)) => Value::Int(i64::from(b)),
            (Type::Int, Value::Text(s)) => match s.trim().parse::<i64>() {
                Ok(n) => Value::Int(n),
                Err(_) => return Err(invalid_coercion(&s, ty)),
            },

            (Type::Double, Value::Int(n)) => Value::Double(n as f64),
            (Type::Double, Value::Double(x)) => Value::Double(x),
            (Type::Double, Value::Bool(b)) => Value::Double(if b { 1.0 } else { 0.0 }),
            (Type::Double, Value::Text(s)) => match s.trim().parse::<f64>() {
                Ok(x) => Value::Double(x),
                Err(_) => return Err(invalid_coercion(&s, ty)),
            },

            (Type::Bool, value) => Value::Bool(value.is_truthy()),

            (Type::Text, Value::Text(s)) => Value::Text(s),
            (Type::Text, value) => Value::Text(value.to_string()),
        };
        Ok(value)
    }
}

fn invalid_coercion(text: &str, target: Type) -> RuntimeError {
    RuntimeError::InvalidCoercion {
        value: format!("\"{}\"", text),
        target: target.keyword().to_string(),
    }
}

/// Textual rendering used by `cout` and string coercion. Doubles keep a
/// decimal point (`10.0`, not `10`) and special values print as `inf` /
/// `NaN`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Double(x) => write!(f, "{:?}", x),
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}
