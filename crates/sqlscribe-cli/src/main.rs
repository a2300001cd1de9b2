//! sqlscribe command-line entry point
//!
//! Reads one SQL query (argument or stdin), or several `.sql` files, and
//! writes one JSON result line per query to stdout. Logs go to stderr.
//! The exit status is 0 whenever the result lines were written.

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sqlscribe_core::{Config, ConfigError, QueryResult};
use sqlscribe_engine::QueryProcessor;
use sqlscribe_llm::HuggingFaceClient;

/// Default settings file looked up in the working directory
const DEFAULT_CONFIG_FILE: &str = "sqlscribe.toml";

/// sqlscribe - column lineage and descriptions for a SQL query
#[derive(Parser, Debug)]
#[command(name = "sqlscribe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL query text (read from stdin when omitted)
    #[arg(allow_hyphen_values = true)]
    sql: Option<String>,

    /// SQL files to process, one result line each
    #[arg(short, long = "file", conflicts_with = "sql")]
    files: Vec<PathBuf>,

    /// Path to config file (default: sqlscribe.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let message = e.kind().as_str().unwrap_or("Invalid arguments");
            return write_line(&mut io::stdout().lock(), &QueryResult::error(message));
        }
    };

    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);

    let mut stdout = io::stdout().lock();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            return write_line(&mut stdout, &QueryResult::error(e.to_string()));
        }
    };

    run(&cli, &config, io::stdin().lock(), &mut stdout)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Load the explicit config, else `sqlscribe.toml` if present, else defaults
fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        Config::from_file(default_path)
    } else {
        tracing::debug!("No config file found, using defaults");
        Ok(Config::default())
    }
}

fn run(cli: &Cli, config: &Config, input: impl Read, out: &mut impl Write) -> Result<()> {
    let client = match HuggingFaceClient::from_config(&config.service, config.api_key()) {
        Ok(client) => client,
        Err(e) => return write_line(out, &QueryResult::error(e.to_string())),
    };
    let processor = QueryProcessor::new(Box::new(client));

    if !cli.files.is_empty() {
        for result in processor.process_files(&cli.files) {
            writeln!(out, "{}", serde_json::to_string(&result)?)?;
        }
        return Ok(());
    }

    let result = match query_text(cli.sql.clone(), input) {
        Ok(sql) => processor.process(&sql),
        Err(e) => QueryResult::error(format!("Failed to read stdin: {}", e)),
    };

    write_line(out, &result)
}

/// SQL from the argument, or everything on `input`
fn query_text(sql: Option<String>, mut input: impl Read) -> io::Result<String> {
    match sql {
        Some(sql) => Ok(sql),
        None => {
            let mut buffer = String::new();
            input.read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn write_line(out: &mut impl Write, result: &QueryResult) -> Result<()> {
    writeln!(out, "{}", result.to_json()?)?;
    out.flush()?;
    Ok(())
}
