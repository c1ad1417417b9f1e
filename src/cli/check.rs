//! Parse RQL statements and report the result

use super::CliError;
use crate::{Tree, output};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The RQL statement to parse
    pub statement: Option<String>,
    /// Name used in diagnostics
    pub name: String,
    /// Print the tree as JSON instead of canonical form
    pub json: bool,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Only validate syntax, print nothing on success
    pub syntax_only: bool,
}

/// Result of a successful check
#[derive(Debug)]
pub enum CheckOutput {
    /// Syntax validation passed
    SyntaxValid,
    /// Canonical form of the statement
    Canonical(String),
    /// JSON rendering of the tree
    Json(String),
}

/// Parse the statement in `options` and render it as requested
pub fn execute_check(options: &CheckOptions) -> Result<CheckOutput, CliError> {
    let statement = options.statement.as_deref().ok_or(CliError::NoInput)?;
    let tree = Tree::parse(&options.name, statement)?;

    if options.syntax_only {
        return Ok(CheckOutput::SyntaxValid);
    }
    if options.json {
        let value = output::tree_to_value(&tree);
        let json = if options.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        return Ok(CheckOutput::Json(json));
    }
    Ok(CheckOutput::Canonical(tree.root().to_string()))
}
