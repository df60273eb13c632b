//! Validator expression IR.
//!
//! Assemblers build `Expr` trees; the renderer turns them into source text.
//! Keeping the two apart lets the transformation be tested structurally,
//! independent of formatting.

use super::naming::UnitKind;

/// Validator primitives of the target library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    /// A number constrained to integers.
    Int,
    Number,
    BigInt,
    Boolean,
    /// A date that coerces strings and timestamps.
    Date,
    /// The shared recursive JSON helper of the unit.
    Json,
    /// The literal `true`.
    LiteralTrue,
    /// A binary buffer.
    Bytes,
}

/// A reference to another generated unit's exported validator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reference {
    pub kind: UnitKind,

    /// Base name of the target unit (e.g., "UserWhereInput", "Role", "UserFindMany").
    pub name: String,
}

impl Reference {
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self {
            kind: UnitKind::Enum,
            name: name.into(),
        }
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self {
            kind: UnitKind::Object,
            name: name.into(),
        }
    }

    pub fn operation(name: impl Into<String>) -> Self {
        Self {
            kind: UnitKind::Operation,
            name: name.into(),
        }
    }

    /// Exported symbol of the target.
    pub fn symbol(&self) -> String {
        self.kind.symbol(&self.name)
    }
}

/// A validator object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectExpr {
    pub fields: Vec<(String, Expr)>,

    /// Reject unknown keys.
    pub strict: bool,
}

/// A validator expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Primitive(Primitive),
    Ref(Reference),
    /// Resolved when used rather than when defined.
    Lazy(Box<Expr>),
    Array(Box<Expr>),
    Optional(Box<Expr>),
    Nullable(Box<Expr>),
    Union(Vec<Expr>),
    Object(ObjectExpr),
}

impl Expr {
    pub fn reference(reference: Reference) -> Self {
        Expr::Ref(reference)
    }

    pub fn lazy(self) -> Self {
        Expr::Lazy(Box::new(self))
    }

    pub fn array(self) -> Self {
        Expr::Array(Box::new(self))
    }

    pub fn optional(self) -> Self {
        Expr::Optional(Box::new(self))
    }

    pub fn nullable(self) -> Self {
        Expr::Nullable(Box::new(self))
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Expr::Optional(_))
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Expr::Lazy(_))
    }

    /// Removes the outermost optional wrapper, if any.
    pub fn strip_optional(self) -> Self {
        match self {
            Expr::Optional(inner) => *inner,
            other => other,
        }
    }

    /// Calls `f` for every reference in the tree, deferred ones included.
    pub fn visit_references<'a>(&'a self, f: &mut impl FnMut(&'a Reference)) {
        match self {
            Expr::Primitive(_) => {}
            Expr::Ref(reference) => f(reference),
            Expr::Lazy(inner) | Expr::Array(inner) | Expr::Optional(inner) | Expr::Nullable(inner) => {
                inner.visit_references(f)
            }
            Expr::Union(members) => members.iter().for_each(|m| m.visit_references(f)),
            Expr::Object(obj) => obj.fields.iter().for_each(|(_, e)| e.visit_references(f)),
        }
    }

    /// Whether the JSON helper appears anywhere in the tree.
    pub fn uses_json(&self) -> bool {
        match self {
            Expr::Primitive(p) => *p == Primitive::Json,
            Expr::Ref(_) => false,
            Expr::Lazy(inner) | Expr::Array(inner) | Expr::Optional(inner) | Expr::Nullable(inner) => {
                inner.uses_json()
            }
            Expr::Union(members) => members.iter().any(Expr::uses_json),
            Expr::Object(obj) => obj.fields.iter().any(|(_, e)| e.uses_json()),
        }
    }
}

impl From<Primitive> for Expr {
    fn from(p: Primitive) -> Self {
        Expr::Primitive(p)
    }
}
