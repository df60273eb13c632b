//! DMMF-style JSON frontend.

pub mod document;
pub mod to_ir;

use std::path::Path;

use tracing::debug;

use crate::diagnostic::CompilerError;
use crate::ir::SchemaIR;
use super::Frontend;
use document::Document;

/// Reads the JSON metadata document the ORM emits.
#[derive(Debug, Default)]
pub struct DmmfFrontend;

impl DmmfFrontend {
    pub fn new() -> Self {
        Self
    }

    /// Parses a document already in memory. `path` is used for diagnostics.
    pub fn parse_str(&self, content: &str, path: &Path) -> Result<SchemaIR, CompilerError> {
        let document: Document =
            serde_json::from_str(content).map_err(|e| CompilerError::MetadataParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        to_ir::to_ir(document, path.to_path_buf())
    }
}

impl Frontend for DmmfFrontend {
    fn format(&self) -> &str {
        "dmmf"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn load(&mut self, path: &Path) -> Result<SchemaIR, CompilerError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CompilerError::io(path, e.to_string()))?;
        let ir = self.parse_str(&content, path)?;
        debug!(
            path = %path.display(),
            models = ir.models.len(),
            enums = ir.enums.len(),
            composites = ir.composites.len(),
            "loaded metadata"
        );
        Ok(ir)
    }
}
