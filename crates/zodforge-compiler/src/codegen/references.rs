//! Resolution of enum and composite references.
//!
//! Decides which unit a non-scalar alternative points at and whether the
//! binding must be deferred. Module-level cycles between composite schemas
//! are legal only because every possibly-cyclic reference is wrapped in a
//! lazy binding that is evaluated on use, never at module load.

use tracing::debug;

use crate::context::GenerationContext;
use crate::ir::{InputTypeAlternative, Namespace, OperationKind, TypeLocation};
use super::expr::{Expr, Reference};
use super::naming::operation_unit_name;

/// Suffix of the bulk-fetch argument shape (`<Model>FindManyArgs`).
pub const BULK_FETCH_SUFFIX: &str = "FindManyArgs";

/// Recognizes a derived model-operation type, returning its model and operation.
pub fn derived_operation(type_name: &str) -> Option<(&str, OperationKind)> {
    let model = type_name.strip_suffix(BULK_FETCH_SUFFIX)?;
    if model.is_empty() {
        return None;
    }
    Some((model, OperationKind::FindMany))
}

/// Resolves references made from within one composite (or operation) unit.
pub struct ReferenceResolver<'a> {
    ctx: &'a GenerationContext,
    current: &'a str,
}

impl<'a> ReferenceResolver<'a> {
    /// `current` is the metadata name of the composite being assembled.
    pub fn new(ctx: &'a GenerationContext, current: &'a str) -> Self {
        Self { ctx, current }
    }

    /// Resolves a non-scalar alternative to its base expression, without
    /// cardinality wrappers. Unresolvable alternatives yield `None`.
    pub fn resolve(&self, alt: &InputTypeAlternative) -> Option<Expr> {
        match alt.location {
            TypeLocation::Enum => self.resolve_enum(&alt.type_name),
            TypeLocation::Object => self.resolve_object(alt),
            TypeLocation::Scalar | TypeLocation::FieldRef => None,
        }
    }

    fn resolve_enum(&self, name: &str) -> Option<Expr> {
        if !self.ctx.is_enum(name) {
            debug!(composite = self.current, enum_name = name, "dropping reference to unregistered enum");
            return None;
        }
        Some(Expr::reference(Reference::enumeration(name)))
    }

    fn resolve_object(&self, alt: &InputTypeAlternative) -> Option<Expr> {
        if let Some((model, op)) = derived_operation(&alt.type_name) {
            if !self.ctx.supports_operation(model, op) {
                debug!(
                    composite = self.current,
                    target = alt.type_name.as_str(),
                    "dropping reference to an operation the model does not support"
                );
                return None;
            }
            // The operation schema projects back into this model's select/include.
            let name = operation_unit_name(model, op);
            return Some(Expr::reference(Reference::operation(name)).lazy());
        }

        let target = Expr::reference(Reference::object(self.ctx.export_name(&alt.type_name)));
        if self.is_deferred(alt) {
            Some(target.lazy())
        } else {
            Some(target)
        }
    }

    /// Self-references and host-namespace types may close a cycle.
    fn is_deferred(&self, alt: &InputTypeAlternative) -> bool {
        alt.type_name == self.current || alt.namespace == Namespace::Host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerConfig;
    use crate::ir::{EnumType, ModelOperations, SchemaIR};

    fn ctx() -> GenerationContext {
        let schema = SchemaIR {
            operations: vec![ModelOperations::new("Post", [OperationKind::FindMany])],
            ..SchemaIR::default()
        };
        let enums = vec![EnumType::new("Role", vec!["USER".into()])];
        GenerationContext::new(&CompilerConfig::default(), &schema, &enums)
    }

    #[test]
    fn enums_are_never_deferred() {
        let ctx = ctx();
        let resolver = ReferenceResolver::new(&ctx, "UserWhereInput");
        assert_eq!(
            resolver.resolve(&InputTypeAlternative::enumeration("Role")),
            Some(Expr::reference(Reference::enumeration("Role")))
        );
        assert_eq!(resolver.resolve(&InputTypeAlternative::enumeration("Status")), None);
    }

    #[test]
    fn self_references_are_deferred() {
        let ctx = ctx();
        let resolver = ReferenceResolver::new(&ctx, "UserWhereInput");
        let alt = InputTypeAlternative::object("UserWhereInput").in_namespace(Namespace::Model);
        let expr = resolver.resolve(&alt).unwrap();
        assert_eq!(expr, Expr::reference(Reference::object("UserWhereInput")).lazy());
    }

    #[test]
    fn host_namespace_references_are_deferred() {
        let ctx = ctx();
        let resolver = ReferenceResolver::new(&ctx, "UserWhereInput");
        let expr = resolver.resolve(&InputTypeAlternative::object("PostListRelationFilter")).unwrap();
        assert!(expr.is_lazy());
    }

    #[test]
    fn model_namespace_references_bind_eagerly() {
        let ctx = ctx();
        let resolver = ReferenceResolver::new(&ctx, "UserCreateInput");
        let alt = InputTypeAlternative::object("AddressCreateInput").in_namespace(Namespace::Model);
        assert_eq!(
            resolver.resolve(&alt),
            Some(Expr::reference(Reference::object("AddressCreateInput")))
        );
    }

    #[test]
    fn bulk_fetch_arguments_point_at_operation_schema() {
        let ctx = ctx();
        let resolver = ReferenceResolver::new(&ctx, "UserInclude");
        let expr = resolver.resolve(&InputTypeAlternative::object("PostFindManyArgs")).unwrap();
        assert_eq!(expr, Expr::reference(Reference::operation("PostFindMany")).lazy());
        let mut symbols = Vec::new();
        expr.visit_references(&mut |r| symbols.push(r.symbol()));
        assert_eq!(symbols, vec!["PostFindManySchema"]);
    }

    #[test]
    fn bulk_fetch_is_deferred_even_from_model_namespace() {
        let ctx = ctx();
        let resolver = ReferenceResolver::new(&ctx, "UserSelect");
        let alt = InputTypeAlternative::object("PostFindManyArgs").in_namespace(Namespace::Model);
        assert!(resolver.resolve(&alt).is_some_and(|e| e.is_lazy()));
    }

    #[test]
    fn unsupported_bulk_fetch_is_dropped() {
        let ctx = ctx();
        let resolver = ReferenceResolver::new(&ctx, "PostInclude");
        assert_eq!(resolver.resolve(&InputTypeAlternative::object("CommentFindManyArgs")), None);
    }

    #[test]
    fn recognizes_derived_operation_types() {
        assert_eq!(derived_operation("UserFindManyArgs"), Some(("User", OperationKind::FindMany)));
        assert_eq!(derived_operation("FindManyArgs"), None);
        assert_eq!(derived_operation("UserArgs"), None);
    }
}
