use std::env;
use std::fs;
use std::path::PathBuf;

use cppish_lexer::Lexer;
use cppish_parser::Parser;
use cppish_syntax::ast::*;
use cppish_syntax::token::TokenKind;

fn main() {
    let mut args = env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("Usage: cppish-fmt [--check|--write] <file.cppish>");
        std::process::exit(2);
    }
    let mut check = false;
    let mut write = false;
    let mut file = None;
    while let Some(a) = args.first().cloned() {
        if a == "--check" {
            check = true;
            args.remove(0);
        } else if a == "--write" {
            write = true;
            args.remove(0);
        } else {
            file = Some(PathBuf::from(a));
            break;
        }
    }
    let file = match file {
        Some(f) => f,
        None => {
            eprintln!("Usage: cppish-fmt [--check|--write] <file.cppish>");
            std::process::exit(2);
        }
    };
    let src = fs::read_to_string(&file).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", file.display(), e);
        std::process::exit(1)
    });
    let mut lexer = Lexer::new(&src);
    let tokens = lexer.tokenize().unwrap_or_else(|e| {
        eprintln!("Lex error: {}", e);
        std::process::exit(1)
    });
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program().unwrap_or_else(|e| {
        eprintln!("Parse error: {}", e);
        std::process::exit(1)
    });

    let formatted = format_program(&program);

    if check {
        if normalize_newlines(&formatted) != normalize_newlines(&src) {
            eprintln!("{}: not formatted", file.display());
            std::process::exit(1);
        } else {
            println!("{}: ok", file.display());
        }
    } else if write {
        if let Err(e) = fs::write(&file, formatted) {
            eprintln!("Failed to write {}: {}", file.display(), e);
            std::process::exit(1);
        }
    } else {
        print!("{}", formatted);
    }
}

fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n")
}

fn format_program(program: &Block) -> String {
    let mut out = String::new();
    for stmt in &program.stmts {
        out.push_str(&format_stmt(stmt, 0));
    }
    out
}

fn format_stmt(stmt: &Stmt, indent: usize) -> String {
    let mut out = String::new();
    let pad = " ".repeat(indent);
    match stmt {
        Stmt::Declare { ty, name, init } => {
            out.push_str(&pad);
            out.push_str(ty.keyword());
            out.push(' ');
            out.push_str(name);
            if let Some(expr) = init {
                out.push_str(" = ");
                out.push_str(&format_expr(expr));
            }
            out.push_str(";\n");
        }
        Stmt::Assign { name, expr } => {
            out.push_str(&pad);
            out.push_str(name);
            out.push_str(" = ");
            out.push_str(&format_expr(expr));
            out.push_str(";\n");
        }
        Stmt::Output(items) => {
            out.push_str(&pad);
            out.push_str("cout");
            for item in items {
                out.push_str(" << ");
                match item {
                    OutputItem::Literal(s) => {
                        out.push('"');
                        out.push_str(s);
                        out.push('"');
                    }
                    OutputItem::Var(name) => out.push_str(name),
                    OutputItem::Newline => out.push_str("endl"),
                }
            }
            out.push_str(";\n");
        }
        Stmt::If {
            cond,
            then_block,
            else_block,
        } => {
            out.push_str(&pad);
            out.push_str("if (");
            out.push_str(&format_expr(cond));
            out.push_str(") {\n");
            for st in &then_block.stmts {
                out.push_str(&format_stmt(st, indent + 2));
            }
            if let Some(block) = else_block {
                out.push_str(&pad);
                out.push_str("} else {\n");
                for st in &block.stmts {
                    out.push_str(&format_stmt(st, indent + 2));
                }
            }
            out.push_str(&pad);
            out.push_str("}\n");
        }
        Stmt::While { cond, body } => {
            out.push_str(&pad);
            out.push_str("while (");
            out.push_str(&format_expr(cond));
            out.push_str(") {\n");
            for st in &body.stmts {
                out.push_str(&format_stmt(st, indent + 2));
            }
            out.push_str(&pad);
            out.push_str("}\n");
        }
    }
    out
}

fn format_expr(expr: &Expr) -> String {
    match expr {
        Expr::LiteralInt(n) => n.to_string(),
        // The token's own lexeme is the canonical spelling; it never uses
        // exponent notation, which would not re-lex.
        Expr::LiteralDouble(x) => TokenKind::Float(*x).lexeme(),
        Expr::LiteralText(s) => format!("\"{}\"", s),
        Expr::LiteralBool(b) => {
            if *b {
                "true".into()
            } else {
                "false".into()
            }
        }
        Expr::Var(name) => name.clone(),
        Expr::Binary { op, left, right } => {
            format!("{} {} {}", wrap(left), op.symbol(), wrap(right))
        }
    }
}

// Nested operations always get parentheses; the output re-parses to the
// same tree regardless of precedence.
fn wrap(expr: &Expr) -> String {
    match expr {
        Expr::Binary { .. } => format!("({})", format_expr(expr)),
        _ => format_expr(expr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Block {
        let tokens = Lexer::new(input).tokenize().expect("Lexing should succeed");
        Parser::new(tokens)
            .parse_program()
            .expect("Parsing should succeed")
    }

    #[test]
    fn formats_statements_canonically() {
        let program = parse("int   x=2+3*4 ;cout<<\"x is \"<<x<<endl;");
        assert_eq!(
            format_program(&program),
            "int x = 2 + (3 * 4);\ncout << \"x is \" << x << endl;\n"
        );
    }

    #[test]
    fn formats_blocks_with_two_space_indent() {
        let program = parse("if(x){y=1;}else{while(y){y=y-1;}}");
        assert_eq!(
            format_program(&program),
            "if (x) {\n  y = 1;\n} else {\n  while (y) {\n    y = y - 1;\n  }\n}\n"
        );
    }

    #[test]
    fn formatting_is_idempotent() {
        let program = parse("double d=1.5; if(d){cout<<\"big\"<<endl;} int n; while(n){n=n-1;}");
        let once = format_program(&program);
        let twice = format_program(&parse(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn extreme_doubles_stay_in_decimal_notation() {
        // A rewrite must always produce source that parses again.
        let program = parse("double d = 0.0000000001;");
        let formatted = format_program(&program);
        assert_eq!(formatted, "double d = 0.0000000001;\n");
        assert_eq!(format_program(&parse(&formatted)), formatted);

        let program = parse("double e = 10000000000000000.0;");
        let formatted = format_program(&program);
        assert_eq!(formatted, "double e = 10000000000000000.0;\n");
        assert_eq!(format_program(&parse(&formatted)), formatted);
    }
}
