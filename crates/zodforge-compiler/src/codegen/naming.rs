//! Unit naming and path conventions.
//!
//! A unit's exported symbol and its module path are both derived from the
//! same base name, so the same metadata always yields the same names.

use crate::ir::OperationKind;

/// File suffix shared by every schema module.
pub const SCHEMA_SUFFIX: &str = ".schema";

/// Source file extension of generated modules.
pub const SOURCE_EXTENSION: &str = "ts";

/// The three families of generated units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitKind {
    /// `enums/<Enum>.schema`
    Enum,

    /// `objects/<Composite>.schema`
    Object,

    /// `<Model><Verb>.schema`
    Operation,
}

impl UnitKind {
    /// Directory of the unit, relative to the output root. Empty for the root.
    pub fn directory(&self) -> &'static str {
        match self {
            UnitKind::Enum => "enums",
            UnitKind::Object => "objects",
            UnitKind::Operation => "",
        }
    }

    /// Exported symbol for a unit with the given base name.
    pub fn symbol(&self, base: &str) -> String {
        match self {
            UnitKind::Enum | UnitKind::Operation => format!("{}Schema", base),
            UnitKind::Object => format!("{}ObjectSchema", base),
        }
    }

    /// Module path without extension (e.g., "objects/UserWhereInput.schema").
    pub fn module_path(&self, base: &str) -> String {
        let dir = self.directory();
        if dir.is_empty() {
            format!("{}{}", base, SCHEMA_SUFFIX)
        } else {
            format!("{}/{}{}", dir, base, SCHEMA_SUFFIX)
        }
    }

    /// File path relative to the output root.
    pub fn file_path(&self, base: &str) -> String {
        format!("{}.{}", self.module_path(base), SOURCE_EXTENSION)
    }
}

/// Base name of an operation unit (e.g., "UserFindMany").
pub fn operation_unit_name(model: &str, op: OperationKind) -> String {
    format!("{}{}", capitalize(model), op.verb())
}

/// Uppercases the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_follow_unit_kind() {
        assert_eq!(UnitKind::Enum.symbol("Role"), "RoleSchema");
        assert_eq!(UnitKind::Object.symbol("UserWhereInput"), "UserWhereInputObjectSchema");
        assert_eq!(UnitKind::Operation.symbol("UserFindMany"), "UserFindManySchema");
    }

    #[test]
    fn paths_follow_unit_kind() {
        assert_eq!(UnitKind::Enum.file_path("Role"), "enums/Role.schema.ts");
        assert_eq!(UnitKind::Object.module_path("UserWhereInput"), "objects/UserWhereInput.schema");
        assert_eq!(UnitKind::Operation.file_path("UserFindMany"), "UserFindMany.schema.ts");
    }

    #[test]
    fn operation_names_capitalize_model() {
        assert_eq!(operation_unit_name("user", OperationKind::FindMany), "UserFindMany");
        assert_eq!(operation_unit_name("Post", OperationKind::CreateMany), "PostCreateMany");
        assert_eq!(capitalize(""), "");
    }
}
