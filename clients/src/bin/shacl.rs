//! `ldshape-shacl`: Generates SHACL shapes from OpenAPI schema documents.
//!
//! Every input document is processed on its own; a failing document does not
//! stop the others, but makes the process exit non-zero.
//!
//! **Usage:**
//! ```
//! ldshape-shacl <yaml_file>... [--context <file>]... [--base-iri <iri>]
//!               [-o <out>] [--pretty] [--dry-run] [--absolute] [--config <file>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Result};
use clap::Parser;
use ldshape_clients::{build_resolver, init_logging, io, Config};
use ldshape_codegen::generate_shacl;
use ldshape_schema::merge_documents;

/// Generate SHACL shapes from OpenAPI schema documents.
#[derive(Parser)]
#[command(
    name = "ldshape-shacl",
    about = "Generate SHACL shapes (JSON-LD) from OpenAPI component schemas"
)]
struct Args {
    /// OpenAPI documents (YAML or JSON) with `components.schemas`.
    #[arg(required = true)]
    yaml_files: Vec<PathBuf>,

    /// Naming context(s); defaults to `context.jsonld` beside each input.
    #[arg(long = "context")]
    contexts: Vec<PathBuf>,

    /// Vocabulary root override.
    #[arg(long)]
    base_iri: Option<String>,

    /// Own compact prefix override.
    #[arg(long)]
    prefix: Option<String>,

    /// Output file (default: `shacl_<stem>.jsonld` beside the input); a
    /// relative path is resolved against the input's folder.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,

    /// Show what would be generated without writing.
    #[arg(long)]
    dry_run: bool,

    /// Emit absolute identifiers instead of compact ones.
    #[arg(long)]
    absolute: bool,

    /// Configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn generate(args: &Args, config: &Config, input: &Path) -> Result<()> {
    let document = io::read_document(input)?;
    let name = document.name.clone();
    let (set, diagnostics) = merge_documents(vec![document]);
    io::print_diagnostics(&diagnostics);

    let contexts = io::load_contexts(&args.contexts, input)?;
    let base_iri = args.base_iri.as_deref().or(config.generator.base_iri.as_deref());
    let prefix = args.prefix.as_deref().or(config.generator.prefix.as_deref());
    let resolver = build_resolver(
        input,
        base_iri,
        prefix,
        contexts,
        config.identifier_mode(args.absolute),
    )?;

    let pretty = args.pretty || config.generator.pretty;
    let artifact = generate_shacl(&name, &set, &resolver, pretty)?;
    io::print_diagnostics(&artifact.report.diagnostics);

    let output = io::output_path(input, args.output.as_deref(), &io::shacl_file_name(input));
    if args.dry_run {
        println!(
            "[DRY RUN] Would generate {} with {} shape(s)",
            output.display(),
            artifact.report.shape_count
        );
    } else {
        io::write_artifact(&output, &artifact.text)?;
        println!(
            "  Written: {} ({} shape(s), {} property shape(s))",
            output.display(),
            artifact.report.shape_count,
            artifact.report.property_count
        );
    }
    println!("  Base IRI: {}", resolver.root().iri());
    println!("  Format: {}", io::format_label(pretty));
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    if args.yaml_files.len() > 1 && args.output.as_deref().is_some_and(Path::is_absolute) {
        bail!("an absolute --output needs exactly one input document");
    }

    let mut failed = 0usize;
    for input in &args.yaml_files {
        if let Err(err) = generate(&args, &config, input) {
            eprintln!("Error: {}: {err:#}", input.display());
            failed += 1;
        }
    }

    if failed > 0 {
        eprintln!(
            "SHACL generation FAILED for {failed} of {} document(s).",
            args.yaml_files.len()
        );
        process::exit(1);
    }
    Ok(())
}
