//! Artifact validators (SHACL shapes, vocabulary).

pub mod ids;
pub mod shacl;
pub mod vocab;
