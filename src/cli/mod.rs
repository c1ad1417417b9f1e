//! CLI support for rql-lang
//!
//! Provides programmatic access to the `rql` commands so other tools can
//! embed them without shelling out.

mod check;
mod docs;
mod tokens;

pub use check::{CheckOptions, CheckOutput, execute_check};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use tokens::{format_tokens, token_kind_name};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The statement is not valid RQL
    #[error("{0}")]
    Parse(#[from] crate::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No statement given and nothing piped on stdin
    #[error("No statement provided. Pass one as an argument or pipe it to stdin.")]
    NoInput,

    #[error("Unknown category: '{0}'\nRun 'rql docs' to see available categories.")]
    UnknownCategory(String),
}
