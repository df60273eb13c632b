//! Validation of metadata IR.

mod structure;

use crate::diagnostic::CompilerError;
use crate::ir::SchemaIR;

/// Validates the metadata before any unit is generated.
pub fn validate_schema(schema: &SchemaIR) -> Result<(), CompilerError> {
    structure::validate_structure(schema)
}
