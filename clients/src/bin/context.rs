//! `ldshape-context`: Writes a naming context for an OpenAPI document.
//!
//! The context maps every schema name to `@id` under the document's
//! vocabulary root and is written as `context.jsonld` beside the input.
//!
//! **Usage:**
//! ```
//! ldshape-context <spec.yaml> [base_iri]
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
use ldshape_clients::{build_resolver, init_logging, io};
use ldshape_codegen::generate_context;
use ldshape_context::IdentifierMode;
use ldshape_schema::merge_documents;

/// Generate a naming context for an OpenAPI document.
#[derive(Parser)]
#[command(
    name = "ldshape-context",
    about = "Generate context.jsonld mapping schema names under the vocabulary root"
)]
struct Args {
    /// OpenAPI document (YAML or JSON).
    spec_file: PathBuf,

    /// Vocabulary root override.
    base_iri: Option<String>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let input = &args.spec_file;

    let document = io::read_document(input)?;
    let (set, diagnostics) = merge_documents(vec![document]);
    io::print_diagnostics(&diagnostics);

    let resolver = build_resolver(
        input,
        args.base_iri.as_deref(),
        None,
        Vec::new(),
        IdentifierMode::Compact,
    )?;
    let text = generate_context(&set, resolver.root().iri());

    let output = io::output_path(input, None, io::DEFAULT_CONTEXT);
    io::write_artifact(&output, &text)?;
    println!("  Written: {} ({} schemas)", output.display(), set.len());
    println!("  Base IRI: {}", resolver.root().iri());
    Ok(())
}
