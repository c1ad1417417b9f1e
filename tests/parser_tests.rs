// tests/parser_tests.rs

use indoc::indoc;
use rql_lang::ast::{Node, Operator};
use rql_lang::error::{Category, ErrorKind, LexError, LiteralError, SyntaxError};
use rql_lang::parser::MAX_NESTING;
use rql_lang::{NodeKind, Pos, Tree, parse};

fn canonical(input: &str) -> String {
    match parse("root", input) {
        Ok(tree) => tree.root().to_string(),
        Err(e) => panic!("unexpected error for {:?}: {}", input, e),
    }
}

fn parse_err(name: &str, input: &str) -> rql_lang::ParseError {
    match parse(name, input) {
        Ok(tree) => panic!("expected error for {:?}, got {}", input, tree.root()),
        Err(e) => e,
    }
}

// ============================================================================
// Canonical Form
// ============================================================================

#[test]
fn test_empty_statements() {
    assert_eq!(canonical(""), "");
    assert_eq!(canonical(" \n\t"), "");
    assert!(parse("root", "").unwrap().root().operator().is_none());
}

#[test]
fn test_empty_operators() {
    for op in Operator::ALL {
        let input = format!("{}()", op);
        assert_eq!(canonical(&input), input);
    }
}

#[test]
fn test_single_values() {
    assert_eq!(canonical("eq(null)"), "eq(null)");
    assert_eq!(canonical("eq(id)"), "eq(id)");
    assert_eq!(canonical("eq(-12.3)"), "eq(-12.3)");
    assert_eq!(canonical(r#"eq("test")"#), r#"eq("test")"#);
    assert_eq!(canonical("eq(id,true,false)"), "eq(id,true,false)");
}

#[test]
fn test_whitespace_is_dropped() {
    assert_eq!(canonical(r#"eq(id, -12.3, "test")"#), r#"eq(id,-12.3,"test")"#);
    assert_eq!(canonical("  and( eq( id , 12 ) )  "), "and(eq(id,12))");
}

#[test]
fn test_nested_operators() {
    assert_eq!(
        canonical("and(eq(id,12),gt(age,21))"),
        "and(eq(id,12),gt(age,21))"
    );
}

#[test]
fn test_value_lists() {
    assert_eq!(
        canonical(r#"in(first_name, ("Jason","Kevin"))"#),
        r#"in(first_name,("Jason","Kevin"))"#
    );
    assert_eq!(canonical("in(id,((1,2),()))"), "in(id,((1,2),()))");
}

#[test]
fn test_literals_keep_source_spelling() {
    assert_eq!(canonical("eq(n,+1.2)"), "eq(n,+1.2)");
    assert_eq!(canonical("eq(n,073)"), "eq(n,073)");
    assert_eq!(canonical("eq(n,.50)"), "eq(n,.50)");
    assert_eq!(canonical(r#"eq(s,"a\"b")"#), r#"eq(s,"a\"b")"#);
}

#[test]
fn test_trailing_comma() {
    assert_eq!(canonical("and(eq(a,1),)"), "and(eq(a,1))");
    let tree = parse(
        "root",
        indoc! {"
            and(
                eq(id,12),
                lt(height,500),
            )
        "},
    )
    .unwrap();
    assert_eq!(tree.root().to_string(), "and(eq(id,12),lt(height,500))");
}

#[test]
fn test_canonical_form_reparses_to_itself() {
    let inputs = [
        "and(eq(id,12),or(lt(height,500),ge(age,21)),in(tag,(\"a\",\"b\")))",
        "ne(deleted_at,null)",
        "or(eq(active,true),le(score,-0.5))",
    ];
    for input in inputs {
        let once = canonical(input);
        assert_eq!(canonical(&once), once);
    }
}

// ============================================================================
// Tree Shape
// ============================================================================

#[test]
fn test_operator_and_operands() {
    let tree = parse("root", r#"eq(id, 12, "x", null, true)"#).unwrap();
    let op = tree.root().operator().unwrap();
    assert_eq!(op.operator(), Operator::Eq);
    assert_eq!(op.name(), "eq");
    assert_eq!(op.operands().len(), 5);

    let kinds: Vec<_> = op.operands().iter().map(Node::kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Identifier,
            NodeKind::Number,
            NodeKind::String,
            NodeKind::Null,
            NodeKind::Bool,
        ]
    );

    match op.operands().get(0) {
        Some(Node::Identifier(id)) => assert_eq!(id.ident(), "id"),
        other => panic!("expected identifier, got {:?}", other),
    }
    match op.operands().get(1) {
        Some(Node::Number(n)) => assert_eq!(n.as_i64(), Some(12)),
        other => panic!("expected number, got {:?}", other),
    }
    match op.operands().get(2) {
        Some(Node::String(s)) => assert_eq!(s.text(), "x"),
        other => panic!("expected string, got {:?}", other),
    }
    match op.operands().get(4) {
        Some(Node::Bool(b)) => assert!(b.value()),
        other => panic!("expected bool, got {:?}", other),
    }
}

#[test]
fn test_node_positions() {
    let tree = parse("root", "  and(eq(id,12))").unwrap();
    assert_eq!(tree.root().pos(), Pos(0));
    let and = tree.root().operator().unwrap();
    assert_eq!(and.pos(), Pos(2));
    assert_eq!(and.operands().pos(), Pos(5));
    let eq = and.operands().get(0).unwrap();
    assert_eq!(eq.pos(), Pos(6));
}

// ============================================================================
// Syntax Errors
// ============================================================================

#[test]
fn test_trailing_token() {
    let err = parse_err("unexpected token", "12");
    assert_eq!(
        err.to_string(),
        r#"statement: unexpected token:1: unexpected token after operator: "12""#
    );
    assert_eq!(err.category(), Category::Syntax);
    assert!(matches!(
        err.kind(),
        ErrorKind::Syntax(SyntaxError::TrailingToken(_))
    ));

    let err = parse_err("root", "eq(a,1) eq(b,2)");
    assert_eq!(
        err.to_string(),
        "statement: root:1: unexpected token after operator: <eq>"
    );
}

#[test]
fn test_missing_comma() {
    let err = parse_err("unexpected token 2", "eq(id 12)");
    assert_eq!(
        err.to_string(),
        r#"statement: unexpected token 2:1: unexpected "12" in comma or right parentheses"#
    );
    assert_eq!(err.line(), 1);
    assert_eq!(err.pos(), Pos(6));
    assert_eq!(err.column(), 7);
    assert_eq!(err.location(), "unexpected token 2:1:7");
}

#[test]
fn test_missing_left_paren() {
    let err = parse_err("unexpected token 3", "eq,(id 12)");
    assert_eq!(
        err.to_string(),
        r#"statement: unexpected token 3:1: unexpected "," in left parentheses"#
    );
    assert_eq!(err.pos(), Pos(2));
}

#[test]
fn test_stray_commas() {
    let err = parse_err("root", "eq(,id)");
    assert_eq!(
        err.to_string(),
        r#"statement: root:1: unexpected "," in value"#
    );
    let err = parse_err("root", "eq(id,,12)");
    assert_eq!(err.pos(), Pos(6));
    assert_eq!(err.category(), Category::Syntax);
}

#[test]
fn test_error_line_after_newlines() {
    let err = parse_err(
        "multi",
        indoc! {"
            and(
              eq(id,12),
              lt(height 500)
            )
        "},
    );
    assert_eq!(err.line(), 3);
    assert_eq!(err.column(), 13);
    assert_eq!(err.location(), "multi:3:13");
}

// ============================================================================
// Lexical and Literal Errors
// ============================================================================

#[test]
fn test_unterminated_string() {
    let err = parse_err("unterminated string", r#"eq(id,"test)"#);
    assert_eq!(err.category(), Category::Lexical);
    assert_eq!(
        err.kind(),
        &ErrorKind::Lexical(LexError::UnterminatedString)
    );
    assert_eq!(err.pos(), Pos(6));
    assert_eq!(
        err.to_string(),
        "statement: unterminated string:1: unterminated quoted string"
    );
}

#[test]
fn test_bad_numbers() {
    let err = parse_err("invalid number", "eq(-12e3)");
    assert_eq!(
        err.kind(),
        &ErrorKind::Lexical(LexError::BadNumber("-12e".into()))
    );

    let err = parse_err("number", "eq(+2.2.2)");
    assert_eq!(
        err.kind(),
        &ErrorKind::Lexical(LexError::BadNumber("+2.2.".into()))
    );
    assert_eq!(err.pos(), Pos(3));
}

#[test]
fn test_sign_after_digits_starts_a_new_number() {
    let err = parse_err("root", "eq(a,1-2)");
    assert_eq!(
        err.to_string(),
        r#"statement: root:1: unexpected "-2" in comma or right parentheses"#
    );
    assert_eq!(err.pos(), Pos(6));
}

#[test]
fn test_nesting_limit() {
    // in(...) opens one list, each value list one more
    let nested = |d: usize| format!("in(id,{}{})", "(".repeat(d), ")".repeat(d));

    let tree = parse("root", &nested(MAX_NESTING - 1)).unwrap();
    assert_eq!(tree.root().to_string(), nested(MAX_NESTING - 1));
    assert_eq!(tree.copy(), tree);

    for depth in [MAX_NESTING, 1_000, 20_000] {
        let err = parse_err("deep", &nested(depth));
        assert_eq!(
            err.kind(),
            &ErrorKind::Syntax(SyntaxError::NestingTooDeep(MAX_NESTING))
        );
        // the first list past the limit
        assert_eq!(err.pos(), Pos(5 + MAX_NESTING));
        assert_eq!(
            err.to_string(),
            format!("statement: deep:1: statement nested deeper than {} levels", MAX_NESTING)
        );
    }
}

#[test]
fn test_nested_operators_count_toward_limit() {
    let depth = MAX_NESTING + 1;
    let input = format!("{}{}", "and(".repeat(depth), ")".repeat(depth));
    let err = parse_err("root", &input);
    assert_eq!(
        err.kind(),
        &ErrorKind::Syntax(SyntaxError::NestingTooDeep(MAX_NESTING))
    );
    assert_eq!(err.pos(), Pos(4 * MAX_NESTING + 3));
}

#[test]
fn test_unbalanced_parens() {
    let err = parse_err("root", "eq(id,12");
    assert_eq!(err.kind(), &ErrorKind::Lexical(LexError::UnexpectedEnd));

    let err = parse_err("root", "eq(id,12))");
    assert_eq!(
        err.kind(),
        &ErrorKind::Lexical(LexError::UnexpectedRightParen)
    );
    assert_eq!(err.pos(), Pos(9));
}

#[test]
fn test_illegal_number_literals() {
    let err = parse_err("root", "eq(n,-)");
    assert_eq!(
        err.kind(),
        &ErrorKind::Literal(LiteralError::IllegalNumber("-".into()))
    );
    assert_eq!(err.category(), Category::Literal);

    let err = parse_err("root", "eq(n,18446744073709551616)");
    assert_eq!(
        err.kind(),
        &ErrorKind::Literal(LiteralError::IntegerOverflow(
            "18446744073709551616".into()
        ))
    );
    assert_eq!(err.pos(), Pos(5));
}

#[test]
fn test_invalid_string_literal() {
    let err = parse_err("root", r#"eq(s,"\q")"#);
    assert_eq!(err.category(), Category::Literal);
    assert_eq!(
        err.to_string(),
        r#"statement: root:1: invalid string literal: "\q""#
    );
}

#[test]
fn test_tree_parse_matches_free_parse() {
    let a = Tree::parse("root", "and(eq(id,12))").unwrap();
    let b = parse("root", "and(eq(id,12))").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.name(), "root");
    assert_eq!(a.text(), "and(eq(id,12))");
}
