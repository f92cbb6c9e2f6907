use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser as ClapParser;
use owo_colors::OwoColorize;

use cppish_api::{RunRequest, RunResponse};
use cppish_interpreter::{Interpreter, Limits};
use cppish_lexer::Lexer;
use cppish_parser::Parser;
use cppish_syntax::error::Error;

#[derive(ClapParser, Debug)]
#[command(name = "cppish", about = "Run Cppish programs", version)]
struct Cli {
    /// Program file to run (.cppish)
    file: PathBuf,

    /// Print the diagnostic trace to stderr after the run
    #[arg(long = "trace", default_value_t = false)]
    trace: bool,

    /// Print the final variables to stderr after the run
    #[arg(long = "vars", default_value_t = false)]
    vars: bool,

    /// Emit the embedding JSON response document instead of raw output
    /// (service default budgets apply; not combinable with --trace/--vars)
    #[arg(long = "json", default_value_t = false, conflicts_with_all = ["trace", "vars"])]
    json: bool,

    /// Declared result type for --json requests
    #[arg(long = "return-type", default_value = "string")]
    return_type: String,

    /// Maximum iterations for any single while loop
    #[arg(long = "max-iterations")]
    max_iterations: Option<u64>,

    /// Wall-clock budget for the run, in milliseconds
    #[arg(long = "time-limit-ms")]
    time_limit_ms: Option<u64>,
}

fn render_error(source: &str, err: &Error) {
    let (kind, detail) = match err {
        Error::Lex(e) => ("Lex error", e.to_string()),
        Error::Parse(e) => ("Parse error", e.to_string()),
        Error::Runtime(e) => ("Runtime error", e.to_string()),
    };
    eprintln!("{}: {}", kind.red().bold(), detail.red());
    if let Some((line, col)) = err.position() {
        eprintln!("  --> line {}, column {}", line, col);
        if let Some(src_line) = source.lines().nth(line - 1) {
            let line_num_str = format!("{:3} | ", line);
            eprintln!("     |");
            eprintln!("{}{}", line_num_str.bright_black(), src_line);

            let mut marker = String::new();
            marker.push_str(&" ".repeat(line_num_str.len()));
            if col > 1 {
                marker.push_str(&" ".repeat(col - 1));
            }
            marker.push('^');
            eprintln!("{}{}", marker.red(), " error here".red());
            eprintln!("     |");
        }
    }

    if detail.contains("is not declared") {
        eprintln!(
            "{}",
            "Help: Declare the variable first, e.g. 'int x = 0;'.".yellow()
        );
    } else if detail.contains("already declared") {
        eprintln!(
            "{}",
            "Help: Each name is declared once; assign with 'x = ...;' instead.".yellow()
        );
    } else if detail.contains("unterminated string") {
        eprintln!(
            "{}",
            "Help: Make sure every \" has a matching closing \".".yellow()
        );
    } else if detail.contains("while loop exceeded") || detail.contains("time budget") {
        eprintln!(
            "{}",
            "Help: Raise the budget with --max-iterations / --time-limit-ms if the loop is intentional.".yellow()
        );
    }
}

fn run(cli: &Cli) -> i32 {
    let src = match fs::read_to_string(&cli.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "{}: {}",
                "error".red().bold(),
                format!("Failed to read {}: {}", cli.file.display(), e).red()
            );
            return 1;
        }
    };

    if cli.json {
        let request = RunRequest {
            code: src,
            return_type: cli.return_type.clone(),
        };
        let response = cppish_api::execute(&request);
        match serde_json::to_string(&response) {
            Ok(doc) => println!("{}", doc),
            Err(e) => {
                eprintln!("{}: {}", "error".red().bold(), e.to_string().red());
                return 1;
            }
        }
        return match response {
            RunResponse::Success { .. } => 0,
            RunResponse::Error { .. } => 1,
        };
    }

    let mut lexer = Lexer::new(&src);
    let tokens = match lexer.tokenize() {
        Ok(t) => t,
        Err(e) => {
            render_error(&src, &Error::Lex(e));
            return 1;
        }
    };

    let mut parser = Parser::new(tokens);
    let program = match parser.parse_program() {
        Ok(p) => p,
        Err(e) => {
            render_error(&src, &Error::Parse(e));
            return 1;
        }
    };

    let limits = Limits {
        max_loop_iterations: cli.max_iterations,
        max_run_time: cli.time_limit_ms.map(Duration::from_millis),
    };
    let exec = Interpreter::with_limits(limits).run(&program);

    // Output produced before a failure still belongs to the user.
    print!("{}", exec.output);
    let _ = io::stdout().flush();

    if cli.trace {
        for line in &exec.trace {
            eprintln!("{}", line);
        }
    }
    if cli.vars {
        for (name, value) in &exec.globals {
            eprintln!("{} = {}", name, value);
        }
    }

    if let Some(e) = exec.failure {
        render_error(&src, &Error::Runtime(e));
        return 1;
    }
    0
}

fn main() {
    let cli = Cli::parse();
    std::process::exit(run(&cli));
}
