//! Structure validation for metadata.
//!
//! Checks the invariants the generator relies on: unique model and enum
//! names, non-empty enums, and references that point at declared models.

use std::collections::BTreeSet;

use crate::diagnostic::CompilerError;
use crate::ir::{Model, SchemaIR};

/// Validates the structure of the schema IR.
pub fn validate_structure(schema: &SchemaIR) -> Result<(), CompilerError> {
    let mut models = BTreeSet::new();
    for model in &schema.models {
        if !models.insert(model.name.as_str()) {
            return Err(CompilerError::DuplicateModel {
                name: model.name.clone(),
            });
        }
    }

    let mut enums = BTreeSet::new();
    for e in &schema.enums {
        if !enums.insert(e.name.as_str()) {
            return Err(CompilerError::DuplicateEnum { name: e.name.clone() });
        }
        if e.values.is_empty() {
            return Err(CompilerError::EmptyEnum { name: e.name.clone() });
        }
    }

    for model in &schema.models {
        validate_relations(model, &models)?;
    }

    for ops in &schema.operations {
        if !models.contains(ops.model.as_str()) {
            let operation = ops
                .operations
                .iter()
                .next()
                .map(|op| op.method_name())
                .unwrap_or("*");
            return Err(CompilerError::UnknownModel {
                model: ops.model.clone(),
                operation: operation.to_string(),
            });
        }
    }

    Ok(())
}

/// Every relation field must target a declared model.
fn validate_relations(model: &Model, models: &BTreeSet<&str>) -> Result<(), CompilerError> {
    for field in model.relation_fields() {
        if !models.contains(field.type_name.as_str()) {
            return Err(CompilerError::UnknownRelationTarget {
                model: model.name.clone(),
                field: field.name.clone(),
                target: field.type_name.clone(),
            });
        }
    }
    Ok(())
}
