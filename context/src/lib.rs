//! Identifier resolution for ldshape.
//!
//! Given a schema document's location, zero or more JSON-LD naming contexts
//! and an identifier mode, this crate decides the identifier of every schema
//! and property name:
//!
//! - [`VocabularyRoot`] picks the absolute root and own prefix of the
//!   document (explicit override, context `@vocab`, family prefix binding,
//!   family directory convention, folder fallback).
//! - [`ContextResolver`] maps a term to a compact or absolute
//!   [`Identifier`], consulting the contexts first.
//!
//! This crate has no knowledge of schemas; it only deals in names.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod descriptor;
pub mod error;
pub mod family;
pub mod iri;
pub mod naming;
pub mod resolver;
pub mod root;

pub use descriptor::Descriptor;
pub use error::ContextError;
pub use naming::{NamingContext, PrefixBase};
pub use resolver::{ContextResolver, Identifier, IdentifierMode, TermKind};
pub use root::{RootRequest, RootSource, VocabularyRoot};
