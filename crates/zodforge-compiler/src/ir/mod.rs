//! Language-agnostic intermediate representation of ORM metadata.
//!
//! This IR is produced by metadata frontends and consumed by the code
//! generator. It captures models, enums, composite input types and the
//! operations each model supports, independent of the metadata format.
//! Values are built once per run and never mutated afterwards.

mod input;
mod model;
mod operations;

pub use input::{CompositeType, Field, InputTypeAlternative, Namespace, TypeLocation};
pub use model::{EnumType, FieldKind, Model, ModelField};
pub use operations::{AggregateSupport, ModelOperations, OperationKind, RawOperation};

use std::collections::BTreeMap;
use std::path::PathBuf;

/// The active database dialect.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Provider {
    /// No dialect was named; no dialect-specific fragments are emitted.
    #[default]
    Unspecified,
    Postgresql,
    Mysql,
    Sqlite,
    Sqlserver,
    Mongodb,
    Cockroachdb,
    Other(String),
}

impl Provider {
    pub fn from_name(s: &str) -> Self {
        match s {
            "postgresql" | "postgres" => Provider::Postgresql,
            "mysql" => Provider::Mysql,
            "sqlite" => Provider::Sqlite,
            "sqlserver" => Provider::Sqlserver,
            "mongodb" => Provider::Mongodb,
            "cockroachdb" => Provider::Cockroachdb,
            other => Provider::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Provider::Unspecified => "unspecified",
            Provider::Postgresql => "postgresql",
            Provider::Mysql => "mysql",
            Provider::Sqlite => "sqlite",
            Provider::Sqlserver => "sqlserver",
            Provider::Mongodb => "mongodb",
            Provider::Cockroachdb => "cockroachdb",
            Provider::Other(name) => name,
        }
    }

    /// Whether `createMany` accepts `skipDuplicates`.
    pub fn supports_skip_duplicates(&self) -> bool {
        matches!(self, Provider::Postgresql | Provider::Mysql)
    }

    /// Whether relevance ordering exists (given the full-text search preview feature).
    pub fn supports_relevance_ordering(&self) -> bool {
        matches!(self, Provider::Postgresql | Provider::Mysql)
    }
}

/// The complete metadata IR for one schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaIR {
    pub provider: Provider,

    /// Enabled preview features (e.g., "fullTextSearch").
    pub preview_features: Vec<String>,

    pub models: Vec<Model>,

    pub enums: Vec<EnumType>,

    /// Composite input types, in metadata order.
    pub composites: Vec<CompositeType>,

    /// Supported operations per model, in metadata order.
    pub operations: Vec<ModelOperations>,

    /// Aggregate support stated by the metadata. Missing models are inferred.
    pub aggregate_support: BTreeMap<String, AggregateSupport>,

    /// Where the metadata was read from.
    pub source: PathBuf,
}

impl SchemaIR {
    pub fn new(source: PathBuf) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }

    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Aggregate support for a model, falling back to inference from its columns.
    pub fn aggregate_support(&self, model: &Model) -> AggregateSupport {
        self.aggregate_support
            .get(&model.name)
            .copied()
            .unwrap_or_else(|| AggregateSupport::infer(model))
    }
}
