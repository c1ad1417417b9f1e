// tests/integration_tests.rs

use std::thread;

use rql_lang::cli::{self, CheckOptions, CheckOutput, CliError};
use rql_lang::output::{node_to_value, to_json, to_json_pretty, tree_to_value};
use rql_lang::{Category, Node, parse};
use serde_json::{Value, json};

fn check(statement: &str) -> CheckOptions {
    CheckOptions {
        statement: Some(statement.to_string()),
        name: "root".to_string(),
        ..Default::default()
    }
}

// ============================================================================
// Concurrent Parsing
// ============================================================================

#[test]
fn test_concurrent_parses_are_independent() {
    let statements: Vec<String> = (0..16)
        .map(|i| format!("and(eq(id,{}),lt(height,{}),in(tag,(\"t{}\")))", i, i * 10, i))
        .collect();

    let results: Vec<String> = thread::scope(|s| {
        let handles: Vec<_> = statements
            .iter()
            .enumerate()
            .map(|(i, text)| {
                s.spawn(move || {
                    let tree = parse(&format!("stmt{}", i), text).unwrap();
                    assert_eq!(tree.name(), format!("stmt{}", i));
                    tree.root().to_string()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results, statements);
}

#[test]
fn test_trees_can_be_shared_across_threads() {
    let tree = parse("root", "or(eq(a,1),eq(b,2))").unwrap();
    let copies: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| tree.copy())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for copy in &copies {
        assert_eq!(copy, &tree);
        let first = copy.root().operator().unwrap().operands().get(0).unwrap();
        assert!(copy.owns(first));
        assert!(!tree.owns(first));
    }
}

#[test]
fn test_concurrent_errors_report_their_own_statement() {
    let errors: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| s.spawn(move || parse(&format!("bad{}", i), "eq(id 12)").unwrap_err()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for (i, err) in errors.iter().enumerate() {
        assert_eq!(err.location(), format!("bad{}:1:7", i));
    }
}

// ============================================================================
// JSON Output
// ============================================================================

#[test]
fn test_json_shape() {
    let tree = parse("root", r#"in(name,("a",-1),null,true)"#).unwrap();
    let value = tree_to_value(&tree);
    assert_eq!(
        value,
        json!({
            "name": "root",
            "root": {
                "kind": "statement",
                "pos": 0,
                "operator": {
                    "kind": "operator",
                    "pos": 0,
                    "operator": "in",
                    "logical": false,
                    "operands": [
                        {"kind": "identifier", "pos": 3, "name": "name"},
                        {
                            "kind": "list",
                            "pos": 8,
                            "nodes": [
                                {"kind": "string", "pos": 9, "quoted": "\"a\"", "text": "a"},
                                {"kind": "number", "pos": 13, "text": "-1", "int": -1, "float": -1.0}
                            ]
                        },
                        {"kind": "null", "pos": 17},
                        {"kind": "bool", "pos": 22, "value": true}
                    ]
                }
            }
        })
    );
}

#[test]
fn test_json_empty_statement() {
    let tree = parse("empty", "").unwrap();
    let value: Value = serde_json::from_str(&to_json(&tree)).unwrap();
    assert_eq!(value["root"]["operator"], Value::Null);
    assert_eq!(value["name"], "empty");
}

#[test]
fn test_json_number_representations() {
    let tree = parse("root", "eq(n,18446744073709551615)").unwrap();
    let n = tree.root().operator().unwrap().operands().get(1).unwrap();
    let value = node_to_value(n);
    assert!(value.get("int").is_none());
    assert_eq!(value["uint"], json!(u64::MAX));
    assert!(value["float"].is_number());
}

#[test]
fn test_json_pretty_parses_back() {
    let tree = parse("root", "and(eq(id,12))").unwrap();
    let pretty = to_json_pretty(&tree);
    assert!(pretty.contains('\n'));
    let a: Value = serde_json::from_str(&pretty).unwrap();
    let b: Value = serde_json::from_str(&to_json(&tree)).unwrap();
    assert_eq!(a, b);
}

// ============================================================================
// CLI
// ============================================================================

#[test]
fn test_cli_check_canonical() {
    match cli::execute_check(&check("and( eq(id, 12) )")).unwrap() {
        CheckOutput::Canonical(text) => assert_eq!(text, "and(eq(id,12))"),
        other => panic!("expected canonical output, got {:?}", other),
    }
}

#[test]
fn test_cli_check_syntax_only() {
    let mut options = check("eq(id,12)");
    options.syntax_only = true;
    assert!(matches!(
        cli::execute_check(&options).unwrap(),
        CheckOutput::SyntaxValid
    ));
}

#[test]
fn test_cli_check_json() {
    let mut options = check("eq(id,12)");
    options.json = true;
    let CheckOutput::Json(text) = cli::execute_check(&options).unwrap() else {
        panic!("expected JSON output");
    };
    assert!(!text.contains('\n'));
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["root"]["operator"]["operator"], "eq");
    assert_eq!(value["root"]["operator"]["logical"], false);

    options.pretty = true;
    let CheckOutput::Json(pretty) = cli::execute_check(&options).unwrap() else {
        panic!("expected JSON output");
    };
    assert!(pretty.contains('\n'));
}

#[test]
fn test_cli_check_errors() {
    let mut options = check("eq(id 12)");
    options.name = "query".to_string();
    match cli::execute_check(&options) {
        Err(CliError::Parse(err)) => {
            assert_eq!(err.location(), "query:1:7");
            assert_eq!(err.category(), Category::Syntax);
        }
        other => panic!("expected parse error, got {:?}", other),
    }

    let options = CheckOptions::default();
    assert!(matches!(
        cli::execute_check(&options),
        Err(CliError::NoInput)
    ));
}

#[test]
fn test_cli_tokens() {
    let out = cli::format_tokens("eq(id,\n\"x\")");
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 8);
    assert!(lines[0].starts_with("1:1"));
    assert!(lines[0].ends_with("<eq>"));
    assert!(lines[5].starts_with("2:1"));
    assert!(lines[5].contains("string"));
    assert!(lines[7].ends_with("EOF"));

    let out = cli::format_tokens("eq(3k)");
    assert!(out.trim_end().ends_with(r#"bad number syntax: "3k""#));
}

#[test]
fn test_cli_docs() {
    assert!(cli::get_docs_overview().contains("DOCUMENTATION CATEGORIES"));
    for category in ["syntax", "operators", "literals", "errors", "OPS"] {
        assert!(cli::get_doc_category(category).is_ok(), "for {}", category);
    }
    assert!(matches!(
        cli::get_doc_category("nope"),
        Err(CliError::UnknownCategory(name)) if name == "nope"
    ));
}

#[test]
fn test_errors_doc_matches_parser_messages() {
    let doc = cli::get_doc_category("errors").unwrap();
    for statement in ["eq(id 12)", "eq(id,12) x"] {
        let err = parse("root", statement).unwrap_err();
        assert!(doc.contains(&err.to_string()), "missing {:?}", err.to_string());
        assert!(
            doc.contains(&format!("  at {}", err.location())),
            "missing {}",
            err.location()
        );
    }
    let syntax = cli::get_doc_category("syntax").unwrap();
    assert!(syntax.contains(&format!("At most {} lists", rql_lang::parser::MAX_NESTING)));
}

#[test]
fn test_node_reexports() {
    let tree = parse("root", "eq(id,12)").unwrap();
    let root: Node = tree.root().clone().into();
    assert_eq!(root.to_string(), "eq(id,12)");
}
