//! `ldshape-convert`: Converts a directory of JSON Schema message files
//! into one OpenAPI 3.1 document.
//!
//! **Usage:**
//! ```
//! ldshape-convert <json_schemas_dir> <output.yaml> [--version <v>]
//!                 [--appendices-dir <dir>] [--config <file>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use ldshape_clients::convert::{convert_dir, openapi_document, to_yaml, DEFAULT_VERSION};
use ldshape_clients::{init_logging, io, Config};

/// Convert JSON Schema message files to an OpenAPI document.
#[derive(Parser)]
#[command(
    name = "ldshape-convert",
    about = "Convert a JSON Schema message directory to OpenAPI 3.1 YAML"
)]
struct Args {
    /// Directory of `*.json` message schemas.
    json_schemas_dir: PathBuf,

    /// Output OpenAPI YAML file.
    output_file: PathBuf,

    /// `info.version` of the generated document.
    #[arg(long, default_value = DEFAULT_VERSION)]
    version: String,

    /// Directory of CSV appendices overriding enumeration values.
    #[arg(long)]
    appendices_dir: Option<PathBuf>,

    /// Configuration file (for `[[enum_sources]]`).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    if !args.json_schemas_dir.is_dir() {
        bail!("Not a directory: {}", args.json_schemas_dir.display());
    }
    println!("Processing JSON Schema files from: {}", args.json_schemas_dir.display());
    if let Some(appendices) = &args.appendices_dir {
        println!("Using appendices from: {}", appendices.display());
    }

    let conversion = convert_dir(
        &args.json_schemas_dir,
        args.appendices_dir.as_deref(),
        &config.enum_sources(),
    )?;
    io::print_diagnostics(&conversion.diagnostics);
    if conversion.definitions.is_empty() {
        bail!(
            "No schema definitions found in {}",
            args.json_schemas_dir.display()
        );
    }

    let yaml = to_yaml(&openapi_document(&conversion, &args.version))?;
    io::write_artifact(&args.output_file, &yaml)?;

    println!("  Written: {}", args.output_file.display());
    println!("  Version: {}", args.version);
    println!("  Schemas: {}", conversion.definitions.len());
    println!("  Message types: {}", conversion.message_types.len());
    Ok(())
}
