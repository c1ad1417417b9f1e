use clap::{Parser as ClapParser, Subcommand};
use rql_lang::cli::{self, CheckOptions, CheckOutput, CliError};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "rql")]
#[command(about = "RQL - A resource query language for filter predicates")]
#[command(version)]
struct Cli {
    /// Log parser activity to stderr (RUST_LOG overrides the level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an RQL statement and print its canonical form
    Check {
        /// The RQL statement ('-' or omitted reads from stdin)
        statement: Option<String>,

        /// Name reported in error messages
        #[arg(short, long, default_value = "root")]
        name: String,

        /// Print the syntax tree as JSON
        #[arg(short, long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't print the tree
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the token stream of an RQL statement
    Tokens {
        /// The RQL statement ('-' or omitted reads from stdin)
        statement: Option<String>,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'rql docs' to list categories)
        category: String,
    },
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "rql_lang=debug" } else { "rql_lang=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            statement,
            name,
            json,
            pretty,
            syntax_only,
        } => run_check(statement, name, json, pretty, syntax_only),
        Commands::Tokens { statement } => read_statement(statement).and_then(|statement| {
            let statement = statement.ok_or(CliError::NoInput)?;
            print!("{}", cli::format_tokens(&statement));
            Ok(())
        }),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        if let CliError::Parse(err) = &e {
            eprintln!("  at {}", err.location());
        }
        std::process::exit(1);
    }
}

/// Use the argument, or read stdin when it is `-` or absent and piped.
fn read_statement(statement: Option<String>) -> Result<Option<String>, CliError> {
    match statement {
        Some(s) if s != "-" => Ok(Some(s)),
        Some(_) => read_stdin().map(Some),
        None if !atty::is(atty::Stream::Stdin) => read_stdin().map(Some),
        None => Ok(None),
    }
}

fn read_stdin() -> Result<String, CliError> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn run_check(
    statement: Option<String>,
    name: String,
    json: bool,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let options = CheckOptions {
        statement: read_statement(statement)?,
        name,
        json,
        pretty,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckOutput::SyntaxValid => println!("Syntax is valid"),
        CheckOutput::Canonical(text) | CheckOutput::Json(text) => println!("{}", text),
    }
    Ok(())
}
