//! Composite input type representation.
//!
//! Composite types are the argument shapes the ORM accepts (filters,
//! create/update inputs, order-by inputs, ...). Each of their fields lists one
//! or more type alternatives, any of which is a valid value.

/// Where an alternative's type is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeLocation {
    /// A built-in scalar (String, Int, Json, ...).
    Scalar,

    /// One of the schema's enums.
    Enum,

    /// Another composite input type.
    Object,

    /// A reference to another field of the same model. Never emitted.
    FieldRef,
}

impl TypeLocation {
    /// Parse a location from its metadata spelling.
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "scalar" => Some(TypeLocation::Scalar),
            "enumTypes" => Some(TypeLocation::Enum),
            "inputObjectTypes" => Some(TypeLocation::Object),
            "fieldRefTypes" => Some(TypeLocation::FieldRef),
            _ => None,
        }
    }
}

/// The namespace a type name originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Namespace {
    /// Types generated by the ORM itself (`prisma`). These may take part in cycles.
    #[default]
    Host,

    /// Types declared by the user's models (`model`).
    Model,
}

impl Namespace {
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "prisma" => Some(Namespace::Host),
            "model" => Some(Namespace::Model),
            _ => None,
        }
    }
}

/// One accepted type for a composite field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTypeAlternative {
    /// Underlying type name (e.g., "String", "Role", "UserWhereInput").
    pub type_name: String,

    /// Whether the alternative accepts a list of the type.
    pub is_list: bool,

    /// Classification of the type.
    pub location: TypeLocation,

    /// Origin namespace of the type.
    pub namespace: Namespace,
}

impl InputTypeAlternative {
    fn new(type_name: impl Into<String>, location: TypeLocation, namespace: Namespace) -> Self {
        Self {
            type_name: type_name.into(),
            is_list: false,
            location,
            namespace,
        }
    }

    pub fn scalar(type_name: impl Into<String>) -> Self {
        Self::new(type_name, TypeLocation::Scalar, Namespace::Host)
    }

    pub fn enumeration(type_name: impl Into<String>) -> Self {
        Self::new(type_name, TypeLocation::Enum, Namespace::Host)
    }

    pub fn object(type_name: impl Into<String>) -> Self {
        Self::new(type_name, TypeLocation::Object, Namespace::Host)
    }

    pub fn field_ref(type_name: impl Into<String>) -> Self {
        Self::new(type_name, TypeLocation::FieldRef, Namespace::Host)
    }

    /// Marks the alternative as list-valued.
    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    /// Overrides the origin namespace.
    pub fn in_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }
}

/// A field of a composite input type.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,

    /// Whether the key must be present.
    pub required: bool,

    /// Whether `null` is an accepted value.
    pub nullable: bool,

    /// Accepted types, in metadata order.
    pub alternatives: Vec<InputTypeAlternative>,
}

impl Field {
    /// Creates an optional, non-nullable field.
    pub fn new(name: impl Into<String>, alternatives: Vec<InputTypeAlternative>) -> Self {
        Self {
            name: name.into(),
            required: false,
            nullable: false,
            alternatives,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// A composite input type.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeType {
    /// Type name (e.g., "UserWhereInput").
    pub name: String,

    /// Fields in metadata order.
    pub fields: Vec<Field>,
}

impl CompositeType {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}
