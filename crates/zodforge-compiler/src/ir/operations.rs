//! Per-model operation capabilities.

use std::collections::BTreeSet;

use super::Model;

/// The twelve operations a model can expose.
///
/// Declaration order is the order operation schemas are generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    FindUnique,
    FindFirst,
    FindMany,
    CreateOne,
    CreateMany,
    DeleteOne,
    DeleteMany,
    UpdateOne,
    UpdateMany,
    UpsertOne,
    Aggregate,
    GroupBy,
}

impl OperationKind {
    pub const ALL: [OperationKind; 12] = [
        OperationKind::FindUnique,
        OperationKind::FindFirst,
        OperationKind::FindMany,
        OperationKind::CreateOne,
        OperationKind::CreateMany,
        OperationKind::DeleteOne,
        OperationKind::DeleteMany,
        OperationKind::UpdateOne,
        OperationKind::UpdateMany,
        OperationKind::UpsertOne,
        OperationKind::Aggregate,
        OperationKind::GroupBy,
    ];

    /// Canonical method name (e.g., "findMany").
    pub fn method_name(&self) -> &'static str {
        match self {
            OperationKind::FindUnique => "findUnique",
            OperationKind::FindFirst => "findFirst",
            OperationKind::FindMany => "findMany",
            OperationKind::CreateOne => "createOne",
            OperationKind::CreateMany => "createMany",
            OperationKind::DeleteOne => "deleteOne",
            OperationKind::DeleteMany => "deleteMany",
            OperationKind::UpdateOne => "updateOne",
            OperationKind::UpdateMany => "updateMany",
            OperationKind::UpsertOne => "upsertOne",
            OperationKind::Aggregate => "aggregate",
            OperationKind::GroupBy => "groupBy",
        }
    }

    /// Capitalized method name, used in unit names (e.g., "FindMany").
    pub fn verb(&self) -> &'static str {
        match self {
            OperationKind::FindUnique => "FindUnique",
            OperationKind::FindFirst => "FindFirst",
            OperationKind::FindMany => "FindMany",
            OperationKind::CreateOne => "CreateOne",
            OperationKind::CreateMany => "CreateMany",
            OperationKind::DeleteOne => "DeleteOne",
            OperationKind::DeleteMany => "DeleteMany",
            OperationKind::UpdateOne => "UpdateOne",
            OperationKind::UpdateMany => "UpdateMany",
            OperationKind::UpsertOne => "UpsertOne",
            OperationKind::Aggregate => "Aggregate",
            OperationKind::GroupBy => "GroupBy",
        }
    }

    /// Parse a canonical method name. Aliases are resolved by the frontend.
    pub fn from_method_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.method_name() == s)
    }

    /// Whether the operation accepts `select`/`include` projections.
    pub fn accepts_projection(&self) -> bool {
        matches!(
            self,
            OperationKind::FindUnique
                | OperationKind::FindFirst
                | OperationKind::FindMany
                | OperationKind::CreateOne
                | OperationKind::DeleteOne
                | OperationKind::UpdateOne
                | OperationKind::UpsertOne
        )
    }
}

/// Provider-specific raw query operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RawOperation {
    FindRaw,
    AggregateRaw,
}

impl RawOperation {
    pub fn from_method_name(s: &str) -> Option<Self> {
        match s {
            "findRaw" => Some(RawOperation::FindRaw),
            "aggregateRaw" => Some(RawOperation::AggregateRaw),
            _ => None,
        }
    }

    /// Lowercase prefix used by the metadata's argument type names.
    pub fn prefix(&self) -> &'static str {
        match self {
            RawOperation::FindRaw => "find",
            RawOperation::AggregateRaw => "aggregate",
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            RawOperation::FindRaw => "FindRaw",
            RawOperation::AggregateRaw => "AggregateRaw",
        }
    }
}

/// The operations one model supports.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelOperations {
    /// Model name.
    pub model: String,

    /// Supported CRUD/aggregate operations.
    pub operations: BTreeSet<OperationKind>,

    /// Supported raw operations (document databases only).
    pub raw: BTreeSet<RawOperation>,
}

impl ModelOperations {
    pub fn new(model: impl Into<String>, operations: impl IntoIterator<Item = OperationKind>) -> Self {
        Self {
            model: model.into(),
            operations: operations.into_iter().collect(),
            raw: BTreeSet::new(),
        }
    }

    /// All twelve operations.
    pub fn all(model: impl Into<String>) -> Self {
        Self::new(model, OperationKind::ALL)
    }

    pub fn supports(&self, op: OperationKind) -> bool {
        self.operations.contains(&op)
    }
}

/// Which aggregate sub-schemas a model's aggregate operation composes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregateSupport {
    pub count: bool,
    pub min: bool,
    pub max: bool,
    pub avg: bool,
    pub sum: bool,
}

impl AggregateSupport {
    /// Derives support from the model's columns when metadata does not state it.
    pub fn infer(model: &Model) -> Self {
        let comparable = model.fields.iter().any(|f| f.is_comparable());
        let numeric = model.fields.iter().any(|f| f.is_numeric() && !f.is_list);

        Self {
            count: model.scalar_fields().next().is_some(),
            min: comparable,
            max: comparable,
            avg: numeric,
            sum: numeric,
        }
    }
}
