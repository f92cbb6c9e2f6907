pub mod parser;

pub use parser::Parser;

#[cfg(test)]
mod tests {
    use super::*;
    use cppish_lexer::Lexer;
    use cppish_syntax::ast::*;
    use cppish_syntax::error::ParseError;

    fn parse_expr_str(input: &str) -> Expr {
        let mut lexer = Lexer::new(input);
        let tokens = lexer.tokenize().expect("Lexing should succeed");
        let mut parser = Parser::new(tokens);
        parser.parse_expr().expect("Parsing should succeed")
    }

    fn parse_program_str(input: &str) -> Block {
        let mut lexer = Lexer::new(input);
        let tokens = lexer.tokenize().expect("Lexing should succeed");
        let mut parser = Parser::new(tokens);
        parser.parse_program().expect("Parsing should succeed")
    }

    fn parse_program_err(input: &str) -> ParseError {
        let mut lexer = Lexer::new(input);
        let tokens = lexer.tokenize().expect("Lexing should succeed");
        let mut parser = Parser::new(tokens);
        parser
            .parse_program()
            .expect_err("Parsing should fail")
    }

    fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[test]
    fn test_literal_expressions() {
        assert!(matches!(parse_expr_str("42"), Expr::LiteralInt(42)));
        assert!(matches!(parse_expr_str("2.5"), Expr::LiteralDouble(x) if x == 2.5));
        assert!(matches!(parse_expr_str("\"hello\""), Expr::LiteralText(s) if s == "hello"));
        assert!(matches!(parse_expr_str("true"), Expr::LiteralBool(true)));
        assert!(matches!(parse_expr_str("false"), Expr::LiteralBool(false)));
    }

    #[test]
    fn test_identifier_expressions() {
        assert!(matches!(parse_expr_str("variable"), Expr::Var(s) if s == "variable"));
        assert!(matches!(parse_expr_str("my_var"), Expr::Var(s) if s == "my_var"));
    }

    #[test]
    fn test_binary_arithmetic() {
        assert!(matches!(parse_expr_str("1 + 2"), Expr::Binary { op: BinOp::Add, .. }));
        assert!(matches!(parse_expr_str("5 - 3"), Expr::Binary { op: BinOp::Sub, .. }));
        assert!(matches!(parse_expr_str("4 * 6"), Expr::Binary { op: BinOp::Mul, .. }));
        assert!(matches!(parse_expr_str("8 / 2"), Expr::Binary { op: BinOp::Div, .. }));
    }

    #[test]
    fn test_operator_precedence() {
        // 2 + 3 * 4 groups as 2 + (3 * 4)
        assert_eq!(
            parse_expr_str("2 + 3 * 4"),
            binary(
                BinOp::Add,
                Expr::LiteralInt(2),
                binary(BinOp::Mul, Expr::LiteralInt(3), Expr::LiteralInt(4)),
            )
        );
    }

    #[test]
    fn test_left_associativity() {
        // 10 - 2 - 3 groups as (10 - 2) - 3
        assert_eq!(
            parse_expr_str("10 - 2 - 3"),
            binary(
                BinOp::Sub,
                binary(BinOp::Sub, Expr::LiteralInt(10), Expr::LiteralInt(2)),
                Expr::LiteralInt(3),
            )
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(
            parse_expr_str("(2 + 3) * 4"),
            binary(
                BinOp::Mul,
                binary(BinOp::Add, Expr::LiteralInt(2), Expr::LiteralInt(3)),
                Expr::LiteralInt(4),
            )
        );
    }

    #[test]
    fn test_unary_minus_is_rejected() {
        let err = parse_program_err("int x = -1;");
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { expected, .. } if expected == "an expression"
        ));
    }

    #[test]
    fn test_declarations() {
        let program = parse_program_str("int x; double d = 0.5; string s = \"hi\"; bool b = true;");
        assert_eq!(program.stmts.len(), 4);
        assert!(matches!(
            &program.stmts[0],
            Stmt::Declare { ty: Type::Int, name, init: None } if name == "x"
        ));
        assert!(matches!(
            &program.stmts[1],
            Stmt::Declare { ty: Type::Double, init: Some(_), .. }
        ));
        assert!(matches!(
            &program.stmts[2],
            Stmt::Declare { ty: Type::Text, init: Some(_), .. }
        ));
        assert!(matches!(
            &program.stmts[3],
            Stmt::Declare { ty: Type::Bool, init: Some(Expr::LiteralBool(true)), .. }
        ));
    }

    #[test]
    fn test_assignment() {
        let program = parse_program_str("x = y + 1;");
        assert!(matches!(
            &program.stmts[0],
            Stmt::Assign { name, expr: Expr::Binary { .. } } if name == "x"
        ));
    }

    #[test]
    fn test_output_items_in_order() {
        let program = parse_program_str("cout << \"x is \" << x << endl;");
        assert_eq!(
            program.stmts[0],
            Stmt::Output(vec![
                OutputItem::Literal("x is ".to_string()),
                OutputItem::Var("x".to_string()),
                OutputItem::Newline,
            ])
        );
    }

    #[test]
    fn test_empty_output_statement() {
        let program = parse_program_str("cout;");
        assert_eq!(program.stmts[0], Stmt::Output(Vec::new()));
    }

    #[test]
    fn test_output_rejects_expressions() {
        let err = parse_program_err("cout << 1 + 2;");
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { expected, .. }
                if expected == "a string literal, variable or 'endl'"
        ));
    }

    #[test]
    fn test_if_else_structure() {
        let program = parse_program_str("if (x) { y = 1; } else { y = 2; }");
        match &program.stmts[0] {
            Stmt::If {
                cond,
                then_block,
                else_block,
            } => {
                assert!(matches!(cond, Expr::Var(name) if name == "x"));
                assert_eq!(then_block.stmts.len(), 1);
                assert_eq!(else_block.as_ref().map(|b| b.stmts.len()), Some(1));
            }
            other => panic!("Expected If, got {:?}", other),
        }
    }

    #[test]
    fn test_if_without_else() {
        let program = parse_program_str("if (true) { cout << endl; }");
        assert!(matches!(
            &program.stmts[0],
            Stmt::If { else_block: None, .. }
        ));
    }

    #[test]
    fn test_while_structure() {
        let program = parse_program_str("while (n) { n = n - 1; }");
        match &program.stmts[0] {
            Stmt::While { cond, body } => {
                assert!(matches!(cond, Expr::Var(name) if name == "n"));
                assert_eq!(body.stmts.len(), 1);
            }
            other => panic!("Expected While, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_blocks() {
        let program =
            parse_program_str("while (a) { if (b) { c = 1; } else { while (d) { e = 2; } } }");
        assert_eq!(program.stmts.len(), 1);
    }

    #[test]
    fn test_condition_requires_parens() {
        let err = parse_program_err("while x { }");
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { expected, .. } if expected == "'('"
        ));
    }

    #[test]
    fn test_missing_close_paren() {
        let err = parse_program_err("if (x { y = 1; }");
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { expected, found, .. }
                if expected == "')'" && found == "'{'"
        ));
    }

    #[test]
    fn test_else_requires_block() {
        let err = parse_program_err("if (true) { } else x = 1;");
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { expected, .. } if expected == "'{'"
        ));
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse_program_err("int x = 5");
        assert!(matches!(
            err,
            ParseError::UnexpectedEof { expected } if expected == "';'"
        ));
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_program_err("while (true) { x = 1;");
        assert!(matches!(
            err,
            ParseError::UnexpectedEof { expected } if expected == "'}'"
        ));
    }

    #[test]
    fn test_error_position_points_at_offender() {
        let err = parse_program_err("int x = 5;\nx 4;");
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { line: 2, col: 3, .. }
        ));
    }
}
