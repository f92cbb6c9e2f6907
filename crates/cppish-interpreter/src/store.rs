//! Variable storage for the Cppish interpreter.

use std::collections::HashMap;

use crate::value::Value;
use cppish_syntax::ast::Type;
use cppish_syntax::error::RuntimeError;

#[derive(Clone)]
struct Binding {
    /// The runtime value of this binding
    value: Value,
    /// The declared type; assignments coerce into it
    ty: Type,
}

/// Lexically scoped variable store.
///
/// Scopes form a stack whose root frame lives for the whole run. Entering a
/// block pushes a frame, leaving pops it; each `while` iteration runs its
/// body in a fresh frame, so body-local declarations work on every pass.
/// Declarations land in the innermost frame but may not reuse a name that
/// is visible anywhere in the stack - Cppish has no shadowing. Lookup and
/// assignment walk the stack from the innermost frame outward.
pub struct VariableStore {
    scopes: Vec<HashMap<String, Binding>>,
}

impl Default for VariableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableStore {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    pub(crate) fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pops the innermost frame. The root frame is never popped.
    pub(crate) fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Whether `name` is visible in any live scope.
    pub fn is_declared(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.contains_key(name))
    }

    /// Declares `name` in the innermost frame with the value coerced to
    /// `ty`, and returns the value as stored.
    pub fn declare(&mut self, name: &str, ty: Type, value: Value) -> Result<Value, RuntimeError> {
        if self.is_declared(name) {
            return Err(RuntimeError::Redeclaration {
                name: name.to_string(),
            });
        }
        let value = value.coerce_to(ty)?;
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(
                name.to_string(),
                Binding {
                    value: value.clone(),
                    ty,
                },
            );
        }
        Ok(value)
    }

    /// Assigns to an existing variable, coercing the value to its declared
    /// type, and returns the value as stored.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<Value, RuntimeError> {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(binding) = scope.get_mut(name) {
                let value = value.coerce_to(binding.ty)?;
                binding.value = value.clone();
                return Ok(value);
            }
        }
        Err(RuntimeError::UndeclaredVariable {
            name: name.to_string(),
        })
    }

    pub fn get(&self, name: &str) -> Result<&Value, RuntimeError> {
        for scope in self.scopes.iter().rev() {
            if let Some(binding) = scope.get(name) {
                return Ok(&binding.value);
            }
        }
        Err(RuntimeError::UndeclaredVariable {
            name: name.to_string(),
        })
    }

    /// Snapshot of the root frame, sorted by name. Block-local bindings
    /// have expired by the time a run finishes, so this is the final state
    /// of the program's variables.
    pub fn globals(&self) -> Vec<(String, Value)> {
        let mut vars: Vec<(String, Value)> = self
            .scopes
            .first()
            .map(|root| {
                root.iter()
                    .map(|(name, binding)| (name.clone(), binding.value.clone()))
                    .collect()
            })
            .unwrap_or_default();
        vars.sort_by(|a, b| a.0.cmp(&b.0));
        vars
    }
}
