//! JSON rendering of parse trees.
//!
//! Used by `rql check --json` and by consumers that want the tree in a
//! language-neutral form. Every node becomes an object with a `"kind"` tag and
//! its byte `"pos"`; numbers only carry the representations that are valid.
//!
//! # Examples
//!
//! ```
//! use rql_lang::parse;
//! use rql_lang::output::to_json;
//!
//! let tree = parse("root", "eq(id,12)").unwrap();
//! let json = to_json(&tree);
//! assert!(json.contains(r#""operator":"eq""#));
//! ```

use serde_json::{Map, Value, json};

use crate::ast::{ListNode, Node, NumberNode, OperatorNode, StatementNode};
use crate::tree::Tree;

/// `{"name": ..., "root": ...}` for a whole tree.
pub fn tree_to_value(tree: &Tree) -> Value {
    json!({
        "name": tree.name(),
        "root": statement_to_value(tree.root()),
    })
}

pub fn statement_to_value(statement: &StatementNode) -> Value {
    json!({
        "kind": "statement",
        "pos": statement.pos().offset(),
        "operator": statement.operator().map(operator_to_value),
    })
}

pub fn node_to_value(node: &Node) -> Value {
    match node {
        Node::Statement(n) => statement_to_value(n),
        Node::Operator(n) => operator_to_value(n),
        Node::List(n) => list_to_value(n),
        Node::Identifier(n) => json!({
            "kind": "identifier",
            "pos": n.pos().offset(),
            "name": n.ident(),
        }),
        Node::Null(n) => json!({
            "kind": "null",
            "pos": n.pos().offset(),
        }),
        Node::Bool(n) => json!({
            "kind": "bool",
            "pos": n.pos().offset(),
            "value": n.value(),
        }),
        Node::String(n) => json!({
            "kind": "string",
            "pos": n.pos().offset(),
            "quoted": n.quoted(),
            "text": n.text(),
        }),
        Node::Number(n) => number_to_value(n),
    }
}

fn operator_to_value(op: &OperatorNode) -> Value {
    json!({
        "kind": "operator",
        "pos": op.pos().offset(),
        "operator": op.name(),
        "logical": op.operator().is_logical(),
        "operands": op.operands().iter().map(node_to_value).collect::<Vec<_>>(),
    })
}

fn list_to_value(list: &ListNode) -> Value {
    json!({
        "kind": "list",
        "pos": list.pos().offset(),
        "nodes": list.iter().map(node_to_value).collect::<Vec<_>>(),
    })
}

fn number_to_value(n: &NumberNode) -> Value {
    let mut obj = Map::new();
    obj.insert("kind".into(), json!("number"));
    obj.insert("pos".into(), json!(n.pos().offset()));
    obj.insert("text".into(), json!(n.text()));
    if let Some(i) = n.as_i64() {
        obj.insert("int".into(), json!(i));
    }
    if let Some(u) = n.as_u64() {
        obj.insert("uint".into(), json!(u));
    }
    if let Some(f) = n.as_f64() {
        obj.insert("float".into(), json!(f));
    }
    Value::Object(obj)
}

/// Compact JSON for a tree.
pub fn to_json(tree: &Tree) -> String {
    tree_to_value(tree).to_string()
}

/// Pretty-printed JSON for a tree, 2-space indented.
pub fn to_json_pretty(tree: &Tree) -> String {
    let value = tree_to_value(tree);
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}
