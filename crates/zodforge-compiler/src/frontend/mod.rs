//! Metadata frontends.
//!
//! Each frontend is responsible for:
//! 1. Reading a metadata document in its format
//! 2. Converting it to the common IR
//!
//! Operation-name aliases are canonicalized here so that nothing past the
//! frontend ever sees them.

pub mod dmmf;

use std::path::Path;
use crate::diagnostic::CompilerError;
use crate::ir::SchemaIR;

/// Trait for metadata frontends.
pub trait Frontend {
    /// Returns the format name (e.g., "dmmf").
    fn format(&self) -> &str;

    /// Returns file extensions this frontend handles (e.g., ["json"]).
    fn extensions(&self) -> &[&str];

    /// Reads the metadata document at `path` and returns IR.
    fn load(&mut self, path: &Path) -> Result<SchemaIR, CompilerError>;
}

/// Creates a frontend for the given format.
pub fn create_frontend(format: &str) -> Result<Box<dyn Frontend>, CompilerError> {
    match format {
        "dmmf" | "json" => Ok(Box::new(dmmf::DmmfFrontend::new())),
        _ => Err(CompilerError::UnsupportedFormat {
            format: format.to_string(),
        }),
    }
}
