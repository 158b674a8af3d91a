//! # msgtext CLI
//!
//! Extracts text from the given files and prints one JSON document:
//!
//! ```json
//! {"parsed_files": [{"filename": "a.pdf", "text": "..."}]}
//! ```
//!
//! ```bash
//! msgtext report.pdf thread.eml --max-chars 6000 --pretty
//! RUST_LOG=msgtext=debug msgtext inbox/*.msg
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use msgtext::{ExtractConfig, ExtractError, ParsedFile, extract_batch, finish};
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "msgtext")]
#[command(about = "Extract plain text from documents and email messages")]
#[command(version)]
struct Cli {
    /// Files to extract
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum characters of text per file
    #[arg(long)]
    max_chars: Option<usize>,

    /// Prefix email output with From/Subject/Date
    #[arg(long)]
    include_headers: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Response {
    parsed_files: Vec<ParsedFile>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => ExtractConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ExtractConfig::default(),
    };
    if let Some(max_chars) = cli.max_chars {
        config.max_output_chars = max_chars;
    }
    if cli.include_headers {
        config.include_headers = true;
    }

    let mut indices = Vec::new();
    let mut batch: Vec<(String, Vec<u8>)> = Vec::new();
    let mut parsed_files: Vec<(usize, ParsedFile)> = Vec::new();
    for (index, path) in cli.files.iter().enumerate() {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        match std::fs::read(path) {
            Ok(data) => {
                indices.push(index);
                batch.push((name, data));
            }
            Err(e) => {
                warn!("Could not read {}: {e}", path.display());
                let error = ExtractError::decode(name.clone(), e.to_string());
                parsed_files.push((index, finish(&name, Err(error), false, &config)));
            }
        }
    }

    parsed_files.extend(indices.into_iter().zip(extract_batch(&batch, &config)));
    parsed_files.sort_by_key(|(index, _)| *index);

    let response = Response {
        parsed_files: parsed_files.into_iter().map(|(_, file)| file).collect(),
    };
    let json = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{json}");

    Ok(())
}
