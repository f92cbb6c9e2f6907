//! Main interpreter engine for Cppish.

use std::time::{Duration, Instant};

use crate::store::VariableStore;
use crate::value::Value;
use cppish_syntax::ast::*;
use cppish_syntax::error::RuntimeError;

/// Cooperative execution budgets. `while` is the only unbounded construct,
/// so both budgets are checked when a loop is about to run another
/// iteration. The default is unlimited; embedding layers apply their own
/// bounds.
#[derive(Debug, Clone, Default)]
pub struct Limits {
    /// Maximum number of iterations any single `while` loop may run
    pub max_loop_iterations: Option<u64>,
    /// Wall-clock budget for the whole run
    pub max_run_time: Option<Duration>,
}

/// Everything a finished run produced.
///
/// `failure` is `Some` when execution stopped early; `output`, `trace` and
/// `globals` then hold whatever had accumulated up to that point.
#[derive(Debug, Clone)]
pub struct Execution {
    /// Text written by `cout` statements
    pub output: String,
    /// One diagnostic line per executed statement
    pub trace: Vec<String>,
    /// Final root-scope variables, sorted by name
    pub globals: Vec<(String, Value)>,
    /// The error that stopped the run, if any
    pub failure: Option<RuntimeError>,
}

impl Execution {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Tree-walking interpreter. One interpreter can run many programs; each
/// run gets a fresh store, output buffer and trace.
pub struct Interpreter {
    limits: Limits,
    output: String,
    trace: Vec<String>,
    deadline: Option<(Instant, Duration)>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// An interpreter with no execution budgets.
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits,
            output: String::new(),
            trace: Vec::new(),
            deadline: None,
        }
    }

    /// Executes a program against a fresh variable store. Runtime failures
    /// are reported inside the [`Execution`] rather than as an `Err`, so
    /// callers always get the output and trace produced before the stop.
    pub fn run(&mut self, program: &Block) -> Execution {
        self.output.clear();
        self.trace.clear();
        self.deadline = self
            .limits
            .max_run_time
            .map(|budget| (Instant::now() + budget, budget));

        let mut store = VariableStore::new();
        let failure = self.exec_stmts(&mut store, &program.stmts).err();
        Execution {
            output: std::mem::take(&mut self.output),
            trace: std::mem::take(&mut self.trace),
            globals: store.globals(),
            failure,
        }
    }

    fn record(&mut self, entry: String) {
        self.trace.push(entry);
    }

    fn exec_stmts(&mut self, store: &mut VariableStore, stmts: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in stmts {
            self.exec_stmt(store, stmt)?;
        }
        Ok(())
    }

    /// Runs a nested block in a fresh scope. The scope is popped whether
    /// the block succeeds or fails, so error snapshots only ever see the
    /// root frame.
    fn exec_block(&mut self, store: &mut VariableStore, block: &Block) -> Result<(), RuntimeError> {
        store.push_scope();
        let result = self.exec_stmts(store, &block.stmts);
        store.pop_scope();
        result
    }

    fn exec_stmt(&mut self, store: &mut VariableStore, stmt: &Stmt) -> Result<(), RuntimeError> {
        match stmt {
            Stmt::Declare { ty, name, init } => {
                // The name is checked before the initializer runs, so a
                // duplicate declaration is reported even when the
                // initializer itself would fail.
                if store.is_declared(name) {
                    return Err(RuntimeError::Redeclaration {
                        name: name.clone(),
                    });
                }
                let value = match init {
                    Some(expr) => self.eval_expr(store, expr)?,
                    None => Value::default_for(*ty),
                };
                let stored = store.declare(name, *ty, value)?;
                self.record(format!("declare {} {} = {}", ty.keyword(), name, stored));
                Ok(())
            }
            Stmt::Assign { name, expr } => {
                let value = self.eval_expr(store, expr)?;
                let stored = store.assign(name, value)?;
                self.record(format!("assign {} = {}", name, stored));
                Ok(())
            }
            Stmt::Output(items) => {
                // Output statements are atomic: a failing item discards
                // the statement's partial text.
                let mut text = String::new();
                for item in items {
                    match item {
                        OutputItem::Literal(s) => text.push_str(s),
                        OutputItem::Var(name) => {
                            let value = store.get(name)?;
                            text.push_str(&value.to_string());
                        }
                        OutputItem::Newline => text.push('\n'),
                    }
                }
                self.output.push_str(&text);
                self.record(format!("output {:?}", text));
                Ok(())
            }
            Stmt::If {
                cond,
                then_block,
                else_block,
            } => {
                let taken = self.eval_expr(store, cond)?.is_truthy();
                self.record(format!("if condition -> {}", taken));
                if taken {
                    self.exec_block(store, then_block)
                } else if let Some(block) = else_block {
                    self.exec_block(store, block)
                } else {
                    Ok(())
                }
            }
            Stmt::While { cond, body } => {
                let mut completed: u64 = 0;
                loop {
                    let go = self.eval_expr(store, cond)?.is_truthy();
                    self.record(format!("while condition -> {}", go));
                    if !go {
                        break;
                    }
                    // Budgets trip only when another iteration is about to
                    // run; a loop that finishes at exactly the cap succeeds.
                    self.check_budget(completed)?;
                    completed += 1;
                    self.exec_block(store, body)?;
                }
                Ok(())
            }
        }
    }

    fn check_budget(&self, completed: u64) -> Result<(), RuntimeError> {
        if let Some(limit) = self.limits.max_loop_iterations {
            if completed >= limit {
                return Err(RuntimeError::LoopLimitExceeded { limit });
            }
        }
        if let Some((deadline, budget)) = self.deadline {
            if Instant::now() >= deadline {
                return Err(RuntimeError::TimeLimitExceeded { budget });
            }
        }
        Ok(())
    }

    /// Evaluates an expression. Takes the store immutably: expression
    /// evaluation can never change a variable.
    fn eval_expr(&self, store: &VariableStore, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::LiteralInt(n) => Ok(Value::Int(*n)),
            Expr::LiteralDouble(x) => Ok(Value::Double(*x)),
            Expr::LiteralBool(b) => Ok(Value::Bool(*b)),
            Expr::LiteralText(s) => Ok(Value::Text(s.clone())),
            Expr::Var(name) => store.get(name).cloned(),
            Expr::Binary { op, left, right } => {
                let left = self.eval_expr(store, left)?;
                let right = self.eval_expr(store, right)?;
                eval_binary(*op, left, right)
            }
        }
    }
}

/// Numeric view of a value for arithmetic. Booleans participate as 0 or 1,
/// as in C++; text never does.
enum Num {
    Int(i64),
    Double(f64),
}

fn numeric(value: &Value) -> Option<Num> {
    match value {
        Value::Int(n) => Some(Num::Int(*n)),
        Value::Double(x) => Some(Num::Double(*x)),
        Value::Bool(b) => Some(Num::Int(i64::from(*b))),
        Value::Text(_) => None,
    }
}

fn eval_binary(op: BinOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
    // Concatenation is the only string operation.
    if op == BinOp::Add {
        if let (Value::Text(a), Value::Text(b)) = (&left, &right) {
            return Ok(Value::Text(format!("{}{}", a, b)));
        }
    }
    let (l, r) = match (numeric(&left), numeric(&right)) {
        (Some(l), Some(r)) => (l, r),
        _ => {
            return Err(RuntimeError::TypeMismatch {
                op: op.symbol(),
                left: left.type_name().to_string(),
                right: right.type_name().to_string(),
            });
        }
    };
    match (l, r) {
        (Num::Int(x), Num::Int(y)) => eval_int(op, x, y),
        (l, r) => {
            let x = match l {
                Num::Int(n) => n as f64,
                Num::Double(d) => d,
            };
            let y = match r {
                Num::Int(n) => n as f64,
                Num::Double(d) => d,
            };
            Ok(eval_double(op, x, y))
        }
    }
}

fn eval_int(op: BinOp, x: i64, y: i64) -> Result<Value, RuntimeError> {
    let value = match op {
        BinOp::Add => x.wrapping_add(y),
        BinOp::Sub => x.wrapping_sub(y),
        BinOp::Mul => x.wrapping_mul(y),
        BinOp::Div => {
            if y == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            // wrapping_div keeps i64::MIN / -1 from panicking
            x.wrapping_div(y)
        }
    };
    Ok(Value::Int(value))
}

fn eval_double(op: BinOp, x: f64, y: f64) -> Value {
    let value = match op {
        BinOp::Add => x + y,
        BinOp::Sub => x - y,
        BinOp::Mul => x * y,
        // IEEE 754: dividing by zero yields an infinity or NaN, not an error
        BinOp::Div => x / y,
    };
    Value::Double(value)
}
