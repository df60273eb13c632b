//! Model and enum intermediate representation.
//!
//! Models describe the persisted shape of each record type. Their relation
//! fields form the graph that the include/select schemas are derived from.

/// The kind of value a model field stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A scalar column (String, Int, DateTime, ...).
    Scalar,

    /// A column typed by one of the schema's enums.
    Enum,

    /// A relation to another model.
    Object,
}

impl FieldKind {
    /// Parse a field kind from its metadata spelling.
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "scalar" => Some(FieldKind::Scalar),
            "enum" => Some(FieldKind::Enum),
            "object" => Some(FieldKind::Object),
            _ => None,
        }
    }
}

/// A single field of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelField {
    /// Field name as written in the model (e.g., "email", "posts").
    pub name: String,

    /// What the field stores.
    pub kind: FieldKind,

    /// Underlying type name: a scalar name, an enum name, or a model name.
    pub type_name: String,

    /// Whether the field holds a list.
    pub is_list: bool,

    /// Whether the field must be present.
    pub is_required: bool,
}

impl ModelField {
    /// Creates a required, non-list field.
    pub fn new(name: impl Into<String>, kind: FieldKind, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            type_name: type_name.into(),
            is_list: false,
            is_required: true,
        }
    }

    /// Marks the field as list-valued.
    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    /// Marks the field as optional.
    pub fn optional(mut self) -> Self {
        self.is_required = false;
        self
    }

    /// Returns true if this field is an edge to another model.
    pub fn is_relation(&self) -> bool {
        self.kind == FieldKind::Object
    }

    /// Returns true if this field is a to-many relation.
    pub fn is_to_many(&self) -> bool {
        self.is_relation() && self.is_list
    }

    /// Returns true for numeric scalar columns (the ones avg/sum apply to).
    pub fn is_numeric(&self) -> bool {
        self.kind == FieldKind::Scalar
            && matches!(self.type_name.as_str(), "Int" | "Float" | "Decimal" | "BigInt")
    }

    /// Returns true for columns that can be ordered (the ones min/max apply to).
    pub fn is_comparable(&self) -> bool {
        match self.kind {
            FieldKind::Enum => !self.is_list,
            FieldKind::Scalar => {
                !self.is_list && !matches!(self.type_name.as_str(), "Json" | "Bytes")
            }
            FieldKind::Object => false,
        }
    }
}

/// IR representation of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Name of the model (e.g., "User", "Post").
    pub name: String,

    /// Fields in declaration order.
    pub fields: Vec<ModelField>,
}

impl Model {
    pub fn new(name: impl Into<String>, fields: Vec<ModelField>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Fields that point at other models.
    pub fn relation_fields(&self) -> impl Iterator<Item = &ModelField> {
        self.fields.iter().filter(|f| f.is_relation())
    }

    /// Scalar and enum columns.
    pub fn scalar_fields(&self) -> impl Iterator<Item = &ModelField> {
        self.fields.iter().filter(|f| !f.is_relation())
    }

    /// Fields that are to-many relations.
    pub fn to_many_fields(&self) -> impl Iterator<Item = &ModelField> {
        self.fields.iter().filter(|f| f.is_to_many())
    }

    pub fn has_relations(&self) -> bool {
        self.relation_fields().next().is_some()
    }

    pub fn has_to_many_relations(&self) -> bool {
        self.to_many_fields().next().is_some()
    }
}

/// An enumeration declared in the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    /// Enum name (e.g., "Role", "UserScalarFieldEnum").
    pub name: String,

    /// Literal values in declaration order.
    pub values: Vec<String>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}
