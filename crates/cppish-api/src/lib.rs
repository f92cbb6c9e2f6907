//! Embedding contract for Cppish.
//!
//! Hosts that run Cppish programs on behalf of callers speak in terms of a
//! [`RunRequest`] and get back a [`RunResponse`]; both serialize to the
//! fixed JSON shapes below, so any transport (HTTP handler, message queue,
//! CLI `--json`) can carry them unchanged:
//!
//! ```text
//! {"status":"success","result":"<program output>"}
//! {"status":"error","message":"<classified failure>"}
//! ```
//!
//! [`execute`] wires lexer, parser and interpreter together with bounded
//! service defaults so a hostile or buggy program cannot hold the host
//! hostage.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use cppish_interpreter::{Interpreter, Limits};
use cppish_lexer::Lexer;
use cppish_parser::Parser;
use cppish_syntax::error::Error;

/// Iteration cap applied by [`execute`] to every `while` loop.
pub const DEFAULT_LOOP_LIMIT: u64 = 100_000;

/// Wall-clock budget applied by [`execute`] to a whole run.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(2);

/// Return types a request may declare.
const VALID_RETURN_TYPES: [&str; 4] = ["int", "double", "string", "bool"];

/// A request to run one Cppish program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Cppish source text
    pub code: String,
    /// Declared result type: `int`, `double`, `string` or `bool`.
    /// Validated here; consumed by native-compilation hosts.
    pub return_type: String,
}

/// The outcome document for a [`RunRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RunResponse {
    /// The program ran to completion; `result` is its output text.
    Success { result: String },
    /// The program was rejected or stopped; `message` classifies why.
    Error { message: String },
}

/// Runs a request end to end and classifies the outcome.
///
/// Failures never escape as panics or process exits; every way a program
/// can go wrong comes back as a [`RunResponse::Error`] whose message names
/// the phase (`lex error: …`, `parse error: …`, `runtime error: …`).
pub fn execute(request: &RunRequest) -> RunResponse {
    if !VALID_RETURN_TYPES.contains(&request.return_type.as_str()) {
        return RunResponse::Error {
            message: format!("invalid return type '{}'", request.return_type),
        };
    }
    match run_source(&request.code) {
        Ok(output) => RunResponse::Success { result: output },
        Err(err) => RunResponse::Error {
            message: err.to_string(),
        },
    }
}

fn run_source(code: &str) -> Result<String, Error> {
    let tokens = Lexer::new(code).tokenize()?;
    let program = Parser::new(tokens).parse_program()?;
    let limits = Limits {
        max_loop_iterations: Some(DEFAULT_LOOP_LIMIT),
        max_run_time: Some(DEFAULT_TIME_BUDGET),
    };
    let exec = Interpreter::with_limits(limits).run(&program);
    match exec.failure {
        Some(e) => Err(Error::Runtime(e)),
        None => Ok(exec.output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(code: &str, return_type: &str) -> RunRequest {
        RunRequest {
            code: code.to_string(),
            return_type: return_type.to_string(),
        }
    }

    #[test]
    fn test_success_wire_shape() {
        let response = execute(&request("cout << \"hello\" << endl;", "string"));
        assert_eq!(
            serde_json::to_value(&response).expect("serialize"),
            json!({"status": "success", "result": "hello\n"})
        );
    }

    #[test]
    fn test_error_wire_shape() {
        let response = execute(&request("int x = 1 / 0;", "int"));
        assert_eq!(
            serde_json::to_value(&response).expect("serialize"),
            json!({"status": "error", "message": "runtime error: division by zero"})
        );
    }

    #[test]
    fn test_invalid_return_type() {
        let response = execute(&request("cout << \"hi\";", "float"));
        assert_eq!(
            response,
            RunResponse::Error {
                message: "invalid return type 'float'".to_string()
            }
        );
    }

    #[test]
    fn test_all_valid_return_types_accepted() {
        for tag in ["int", "double", "string", "bool"] {
            let response = execute(&request("int x = 1;", tag));
            assert!(
                matches!(response, RunResponse::Success { .. }),
                "return type {} rejected",
                tag
            );
        }
    }

    #[test]
    fn test_phase_classification() {
        let lex = execute(&request("int @ = 1;", "int"));
        assert!(
            matches!(&lex, RunResponse::Error { message } if message.starts_with("lex error:")),
            "got {:?}",
            lex
        );

        let parse = execute(&request("int x = 5", "int"));
        assert!(
            matches!(&parse, RunResponse::Error { message } if message.starts_with("parse error:")),
            "got {:?}",
            parse
        );

        let runtime = execute(&request("x = 1;", "int"));
        assert!(
            matches!(&runtime, RunResponse::Error { message } if message.starts_with("runtime error:")),
            "got {:?}",
            runtime
        );
    }

    #[test]
    fn test_loop_guard_applies() {
        let response = execute(&request("while (true) { }", "int"));
        assert_eq!(
            response,
            RunResponse::Error {
                message: "runtime error: while loop exceeded 100000 iterations".to_string()
            }
        );
    }

    #[test]
    fn test_request_round_trips_through_json() {
        let doc = r#"{"code":"int x = 1;","return_type":"int"}"#;
        let parsed: RunRequest = serde_json::from_str(doc).expect("deserialize");
        assert_eq!(parsed, request("int x = 1;", "int"));
    }

    #[test]
    fn test_response_deserializes_by_status() {
        let success: RunResponse =
            serde_json::from_str(r#"{"status":"success","result":"ok"}"#).expect("deserialize");
        assert_eq!(
            success,
            RunResponse::Success {
                result: "ok".to_string()
            }
        );

        let error: RunResponse =
            serde_json::from_str(r#"{"status":"error","message":"bad"}"#).expect("deserialize");
        assert_eq!(
            error,
            RunResponse::Error {
                message: "bad".to_string()
            }
        );
    }
}
