//! ktd - Keyed Tree Diff CLI tool
//!
//! Computes patches between nested YAML/JSON documents.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use keyed_tree_diff::{reorder, value, Differ, Value};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("{path:?} does not contain a top-level array")]
    NotAnArray { path: PathBuf },

    #[error("failed to create output file {path:?}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

#[derive(Debug, Parser)]
#[command(
    name = "ktd",
    version,
    about = "Diff nested YAML/JSON documents into keyed patches"
)]
struct Cli {
    /// Output location. Use '-' for stdout.
    #[arg(short, long, default_value = "-")]
    output: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the patch transforming OLD into NEW.
    Diff {
        /// The old document.
        #[arg(long)]
        old: PathBuf,
        /// The new document.
        #[arg(long)]
        new: PathBuf,
        /// Property key to exclude from diffing at every level. Repeatable.
        #[arg(long)]
        ignore: Vec<String>,
    },
    /// Show the move-set the reorder engine computes for two arrays.
    Reorder {
        /// The old document; must hold a top-level array.
        #[arg(long)]
        old: PathBuf,
        /// The new document; must hold a top-level array.
        #[arg(long)]
        new: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut output: Box<dyn Write> = if cli.output == "-" {
        Box::new(io::stdout())
    } else {
        let path = PathBuf::from(&cli.output);
        Box::new(fs::File::create(&path).map_err(|e| CliError::Create { path, source: e })?)
    };

    match cli.command {
        Command::Diff { old, new, ignore } => {
            let old_value = load(&old)?;
            let new_value = load(&new)?;

            let differ = if ignore.is_empty() {
                Differ::new()
            } else {
                Differ::builder()
                    .ignore(Box::new(move |key: &str| {
                        ignore.iter().any(|ignored| ignored == key)
                    }))
                    .build()
            };

            let patch = differ.diff(&old_value, &new_value);
            serde_json::to_writer_pretty(&mut output, &patch)?;
            writeln!(output).map_err(CliError::Output)?;
        }
        Command::Reorder { old, new } => {
            let old_value = load(&old)?;
            let new_value = load(&new)?;

            let old_items = old_value
                .as_list()
                .ok_or_else(|| CliError::NotAnArray { path: old.clone() })?;
            let new_items = new_value
                .as_list()
                .ok_or_else(|| CliError::NotAnArray { path: new.clone() })?;

            match reorder(old_items, new_items).moves {
                Some(moves) => {
                    serde_json::to_writer_pretty(&mut output, &moves)?;
                    writeln!(output).map_err(CliError::Output)?;
                }
                None => {
                    writeln!(output, "no moves needed").map_err(CliError::Output)?;
                }
            }
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<Value, CliError> {
    let content = fs::read_to_string(path).map_err(|e| CliError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );

    if is_yaml {
        value::from_yaml(&content).map_err(|e| CliError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    } else {
        value::from_json(&content).map_err(|e| CliError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
