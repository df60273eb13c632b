//! Best-effort check for host type availability.
//!
//! Object schemas can carry a strict annotation naming the ORM client's own
//! type (`z.ZodType<Prisma.UserWhereInput>`). The client does not export a type
//! for every composite, and there is no registry to ask, so availability is
//! guessed from naming patterns. A wrong guess only loses or adds the
//! annotation; the validator itself is unaffected.

use crate::ir::CompositeType;

/// Namespace the client exports its input types under.
pub const HOST_TYPE_NAMESPACE: &str = "Prisma";

const ENUM_SUFFIXES: &[&str] = &["ScalarFieldEnum", "OrderByRelevanceFieldEnum"];

const ALWAYS_AVAILABLE: &[&str] = &[
    "JsonNullValueInput",
    "NullableJsonNullValueInput",
    "JsonNullValueFilter",
    "InputJsonValue",
    "SortOrder",
    "SortOrderInput",
    "NullsOrder",
    "QueryMode",
    "TransactionIsolationLevel",
];

const INPUT_SUFFIXES: &[&str] = &[
    "Filter",
    "Select",
    "Include",
    "WhereInput",
    "WhereUniqueInput",
    "ScalarWhereInput",
    "ScalarWhereWithAggregatesInput",
    "CreateInput",
    "UpdateInput",
    "UncheckedCreateInput",
    "UncheckedUpdateInput",
    "CreateManyInput",
    "UpdateManyMutationInput",
    "UncheckedUpdateManyInput",
    "OrderByWithRelationInput",
    "OrderByWithRelationAndSearchRelevanceInput",
    "OrderByWithAggregationInput",
    "OrderByRelationAggregateInput",
    "OrderByRelevanceInput",
    "AggregateInput",
    "InputEnvelope",
];

const NESTED_MARKERS: &[&str] = &["CreateNested", "NestedInput", "RelationFilter"];

/// Whether the client is expected to export a type named `name`.
///
/// `composite` supplies the fields for the relation-aware fallback.
pub fn is_type_available(name: &str, composite: Option<&CompositeType>) -> bool {
    if ENUM_SUFFIXES.iter().any(|s| name.ends_with(s)) {
        return true;
    }
    if ALWAYS_AVAILABLE.contains(&name) {
        return true;
    }

    let bare = name
        .strip_prefix(HOST_TYPE_NAMESPACE)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(name);
    if INPUT_SUFFIXES.iter().any(|s| bare.ends_with(s)) {
        return true;
    }

    composite.is_some_and(has_nested_relation_input)
}

/// Annotation text for a type the client exports.
pub fn host_type(name: &str) -> String {
    format!("{}.{}", HOST_TYPE_NAMESPACE, name)
}

fn has_nested_relation_input(composite: &CompositeType) -> bool {
    composite
        .fields
        .iter()
        .flat_map(|f| &f.alternatives)
        .any(|alt| NESTED_MARKERS.iter().any(|m| alt.type_name.contains(m)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Field, InputTypeAlternative};

    #[test]
    fn enum_suffixes_are_available() {
        assert!(is_type_available("UserScalarFieldEnum", None));
        assert!(is_type_available("PostOrderByRelevanceFieldEnum", None));
    }

    #[test]
    fn allow_list_is_available() {
        assert!(is_type_available("SortOrder", None));
        assert!(is_type_available("NullableJsonNullValueInput", None));
    }

    #[test]
    fn canonical_input_suffixes_are_available() {
        for name in [
            "StringFilter",
            "UserWhereInput",
            "UserWhereUniqueInput",
            "UserUncheckedCreateInput",
            "UserOrderByWithRelationInput",
            "UserCountAggregateInput",
            "PostCreateManyAuthorInputEnvelope",
            "Prisma.UserSelect",
        ] {
            assert!(is_type_available(name, None), "{}", name);
        }
    }

    #[test]
    fn unknown_shapes_are_unavailable() {
        assert!(!is_type_available("UserArgs", None));
        assert!(!is_type_available("UserCountOutputTypeArgs", None));
    }

    #[test]
    fn nested_relation_inputs_fall_back_to_available() {
        let composite = CompositeType::new(
            "UserCreateWithoutProfileInput",
            vec![Field::new(
                "posts",
                vec![InputTypeAlternative::object("PostCreateNestedManyWithoutAuthorInput")],
            )],
        );
        assert!(is_type_available(&composite.name, Some(&composite)));

        let flat = CompositeType::new(
            "UserCreateWithoutProfileInput",
            vec![Field::new("email", vec![InputTypeAlternative::scalar("String")])],
        );
        assert!(!is_type_available(&flat.name, Some(&flat)));
    }

    #[test]
    fn annotation_uses_client_namespace() {
        assert_eq!(host_type("UserWhereInput"), "Prisma.UserWhereInput");
    }
}
