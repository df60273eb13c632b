//! Generated schema units.

use super::expr::Expr;
use super::naming::UnitKind;

/// What a unit defines.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitBody {
    /// An enum validator over literal values.
    Enum(Vec<String>),

    /// A validator expression, optionally annotated with the client's type.
    Schema {
        expr: Expr,
        type_annotation: Option<String>,
    },
}

/// One generated module exporting exactly one validator.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaUnit {
    pub kind: UnitKind,

    /// Base name the symbol and path are derived from.
    pub name: String,

    pub body: UnitBody,
}

impl SchemaUnit {
    pub fn enumeration(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            kind: UnitKind::Enum,
            name: name.into(),
            body: UnitBody::Enum(values),
        }
    }

    pub fn schema(kind: UnitKind, name: impl Into<String>, expr: Expr, type_annotation: Option<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            body: UnitBody::Schema {
                expr,
                type_annotation,
            },
        }
    }

    /// Exported symbol.
    pub fn symbol(&self) -> String {
        self.kind.symbol(&self.name)
    }

    /// Module path without extension, relative to the output root.
    pub fn module_path(&self) -> String {
        self.kind.module_path(&self.name)
    }

    /// File path relative to the output root.
    pub fn file_path(&self) -> String {
        self.kind.file_path(&self.name)
    }

    /// The validator expression, for schema units.
    pub fn expr(&self) -> Option<&Expr> {
        match &self.body {
            UnitBody::Schema { expr, .. } => Some(expr),
            UnitBody::Enum(_) => None,
        }
    }

    pub fn type_annotation(&self) -> Option<&str> {
        match &self.body {
            UnitBody::Schema { type_annotation, .. } => type_annotation.as_deref(),
            UnitBody::Enum(_) => None,
        }
    }

    /// Whether the unit needs the JSON helper.
    pub fn uses_json(&self) -> bool {
        self.expr().is_some_and(Expr::uses_json)
    }

    /// Looks up a top-level field of an object unit.
    pub fn field(&self, name: &str) -> Option<&Expr> {
        match self.expr()? {
            Expr::Object(obj) => obj.fields.iter().find(|(n, _)| n == name).map(|(_, e)| e),
            _ => None,
        }
    }

    /// Top-level field names of an object unit, in order.
    pub fn field_names(&self) -> Vec<&str> {
        match self.expr() {
            Some(Expr::Object(obj)) => obj.fields.iter().map(|(n, _)| n.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}
