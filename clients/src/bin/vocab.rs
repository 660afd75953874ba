//! `ldshape-vocab`: Generates the JSON-LD vocabulary of an OpenAPI document.
//!
//! **Usage:**
//! ```
//! ldshape-vocab <spec.yaml> [base_iri] [-o <out>] [--pretty]
//!               [--sanitize-member-ids] [--absolute] [--config <file>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use ldshape_clients::{build_resolver, init_logging, io, Config};
use ldshape_codegen::{generate_vocab, VocabOptions};
use ldshape_schema::merge_documents;

/// Generate a JSON-LD vocabulary (classes and enumerations).
#[derive(Parser)]
#[command(
    name = "ldshape-vocab",
    about = "Generate a JSON-LD vocabulary from OpenAPI component schemas"
)]
struct Args {
    /// OpenAPI document (YAML or JSON).
    spec_file: PathBuf,

    /// Vocabulary root override.
    base_iri: Option<String>,

    /// Output file (default: `vocab.jsonld` beside the input).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,

    /// Turn enumeration values into safe identifier local parts.
    #[arg(long)]
    sanitize_member_ids: bool,

    /// Emit absolute identifiers instead of compact ones.
    #[arg(long)]
    absolute: bool,

    /// Configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    let input = &args.spec_file;

    let document = io::read_document(input)?;
    let name = document.name.clone();
    let (set, diagnostics) = merge_documents(vec![document]);
    io::print_diagnostics(&diagnostics);

    let base_iri = args.base_iri.as_deref().or(config.generator.base_iri.as_deref());
    let resolver = build_resolver(
        input,
        base_iri,
        config.generator.prefix.as_deref(),
        Vec::new(),
        config.identifier_mode(args.absolute),
    )?;

    let pretty = args.pretty || config.generator.pretty;
    let options = VocabOptions {
        sanitize_member_ids: args.sanitize_member_ids || config.generator.sanitize_member_ids,
    };
    let artifact = generate_vocab(&name, &set, &resolver, options, pretty)?;

    let output = io::output_path(input, args.output.as_deref(), "vocab.jsonld");
    io::write_artifact(&output, &artifact.text)?;

    let report = &artifact.report;
    println!("  Written: {}", output.display());
    println!("  Base IRI: {}", resolver.root().iri());
    println!(
        "  Total entries: {}",
        report.class_count + report.enum_type_count + report.enum_value_count
    );
    println!("  Enum types: {}", report.enum_type_count);
    println!("  Enum values: {}", report.enum_value_count);
    println!("  Format: {}", io::format_label(pretty));
    Ok(())
}
