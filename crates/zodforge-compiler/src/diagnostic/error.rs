//! Compiler error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur during compilation.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum CompilerError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to access '{}': {message}", path.display())]
    #[diagnostic(code(zodforge::io::access_failed))]
    IoError {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error("Failed to parse metadata '{}': {message}", path.display())]
    #[diagnostic(
        code(zodforge::metadata::parse_failed),
        help("The metadata file must be the JSON document emitted by the ORM's introspection step")
    )]
    MetadataParse {
        path: PathBuf,
        message: String,
    },

    #[error("Invalid configuration '{}': {message}", path.display())]
    #[diagnostic(code(zodforge::config::invalid))]
    InvalidConfig {
        path: PathBuf,
        message: String,
    },

    #[error("Unsupported metadata format: {format}")]
    #[diagnostic(
        code(zodforge::frontend::unsupported_format),
        help("Supported formats: dmmf, json")
    )]
    UnsupportedFormat {
        format: String,
    },

    // =========================================================================
    // Structure Errors
    // =========================================================================
    #[error("Duplicate model name: {name}")]
    #[diagnostic(code(zodforge::structure::duplicate_model))]
    DuplicateModel {
        name: String,
    },

    #[error("Duplicate enum name: {name}")]
    #[diagnostic(code(zodforge::structure::duplicate_enum))]
    DuplicateEnum {
        name: String,
    },

    #[error("Enum '{name}' has no values")]
    #[diagnostic(code(zodforge::structure::empty_enum))]
    EmptyEnum {
        name: String,
    },

    #[error("Relation '{model}.{field}' points at unknown model '{target}'")]
    #[diagnostic(code(zodforge::structure::unknown_relation_target))]
    UnknownRelationTarget {
        model: String,
        field: String,
        target: String,
    },

    #[error("Cannot generate '{operation}' for unknown model '{model}'")]
    #[diagnostic(
        code(zodforge::structure::unknown_model),
        help("Every model listed in the operation mapping must also appear in the model list")
    )]
    UnknownModel {
        model: String,
        operation: String,
    },

    // =========================================================================
    // Code Generation Errors
    // =========================================================================
    #[error("Failed to generate {} schema unit(s)", failures.len())]
    #[diagnostic(code(zodforge::codegen::generation_failed))]
    GenerationFailed {
        #[related]
        failures: Vec<CompilerError>,
    },
}

impl CompilerError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }
}
