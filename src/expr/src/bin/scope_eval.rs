//! # Scope Evaluation CLI
//!
//! Evaluates a scope expression against a scope document.
//!
//! ## Usage
//!
//! ```text
//! scope-eval [--mode <MODE>] <DOCUMENT> <EXPRESSION> [RECORD]
//! ```
//!
//! Without a record file the selected field names are printed as a JSON
//! array. With one, the record (an object or an array of objects) is printed
//! projected onto the selected fields.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `SCOPE_PARSE_MODE` - `compatible` or `strict` (default: compatible)
//! - `SCOPE_CACHE`, `SCOPE_CACHE_CAPACITY`, `SCOPE_CACHE_TTL` - engine cache
//! - `RUST_LOG` - Log level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use fieldscope_expr::{EngineConfig, ParseMode, ScopeDocument, ScopeEngine, ScopedView};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fieldscope expression evaluator
#[derive(Parser, Debug)]
#[command(name = "scope-eval")]
#[command(about = "Evaluate a scope expression against a scope document")]
#[command(version)]
struct Cli {
    /// Scope document (JSON)
    document: PathBuf,

    /// Scope expression, e.g. `*&!sensitive`
    expression: String,

    /// Record to project: a JSON object or an array of objects
    record: Option<PathBuf>,

    /// Parse mode: compatible or strict
    #[arg(short, long, env = "SCOPE_PARSE_MODE")]
    mode: Option<ParseMode>,
}

fn project(view: &ScopedView, record: &Value) -> Value {
    match record {
        Value::Array(records) => Value::Array(view.project_all(records)),
        other => view.project(other),
    }
}

/// Loads the document, compiles the expression and builds the JSON output
fn evaluate(cli: &Cli, config: EngineConfig) -> Result<Value> {
    let engine = ScopeEngine::with_config(config);

    let registry = ScopeDocument::from_path(&cli.document)
        .and_then(ScopeDocument::into_registry)
        .with_context(|| format!("failed to load {}", cli.document.display()))?;

    let view = registry
        .view_str(&engine, &cli.expression)
        .with_context(|| format!("failed to compile '{}'", cli.expression))?;

    info!(
        "Expression '{}' selected {} of {} fields",
        cli.expression,
        view.len(),
        registry.len()
    );

    match &cli.record {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let record: Value = serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            Ok(project(&view, &record))
        }
        None => Ok(serde_json::to_value(view.field_names())?),
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = EngineConfig::from_env().context("failed to load configuration")?;
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    info!("Parse mode: {}", config.mode);

    let output = evaluate(&cli, config)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
