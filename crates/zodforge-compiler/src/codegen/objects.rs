//! Object schema assembly for composite input types.

use tracing::debug;

use crate::context::GenerationContext;
use crate::ir::{CompositeType, Field, TypeLocation};
use super::availability::{host_type, is_type_available};
use super::combinator::combine;
use super::expr::{Expr, ObjectExpr};
use super::naming::UnitKind;
use super::references::ReferenceResolver;
use super::type_mapper::{map_scalar_alternative, wrap_cardinality};
use super::unit::SchemaUnit;

/// Lowers one field to its validator. `None` when no alternative resolved.
pub fn lower_field(field: &Field, resolver: &ReferenceResolver<'_>) -> Option<Expr> {
    let alternatives: Vec<Expr> = field
        .alternatives
        .iter()
        .filter_map(|alt| {
            let lowered = match alt.location {
                TypeLocation::Scalar => map_scalar_alternative(alt, field.required),
                _ => resolver
                    .resolve(alt)
                    .map(|base| wrap_cardinality(base, alt.is_list, field.required)),
            };
            if lowered.is_none() {
                debug!(field = field.name.as_str(), ty = alt.type_name.as_str(), "discarding alternative");
            }
            lowered
        })
        .collect();

    combine(field, alternatives)
}

/// Assembles the strict object schema of a composite.
pub fn assemble_object(composite: &CompositeType, ctx: &GenerationContext) -> SchemaUnit {
    let resolver = ReferenceResolver::new(ctx, &composite.name);

    let fields = composite
        .fields
        .iter()
        .filter_map(|field| match lower_field(field, &resolver) {
            Some(expr) => Some((field.name.clone(), expr)),
            None => {
                debug!(
                    composite = composite.name.as_str(),
                    field = field.name.as_str(),
                    "omitting field without resolvable alternatives"
                );
                None
            }
        })
        .collect();

    let name = ctx.export_name(&composite.name).to_string();
    let type_annotation = is_type_available(&name, Some(composite)).then(|| host_type(&name));

    SchemaUnit::schema(
        UnitKind::Object,
        name,
        Expr::Object(ObjectExpr {
            fields,
            strict: true,
        }),
        type_annotation,
    )
}
