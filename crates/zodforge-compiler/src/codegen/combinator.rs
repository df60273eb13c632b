//! Merging a field's alternatives into one expression.

use crate::ir::Field;
use super::expr::Expr;

/// Combines the resolved alternatives of `field`.
///
/// Each alternative already carries its own array/optional wrappers. A single
/// alternative is kept as is; several become a union in metadata order with
/// the optional wrapper hoisted to the union. Nullability is applied last.
/// Returns `None` when nothing resolved, in which case the field is dropped.
pub fn combine(field: &Field, alternatives: Vec<Expr>) -> Option<Expr> {
    let combined = match alternatives.len() {
        0 => return None,
        1 => alternatives.into_iter().next()?,
        _ => {
            let members = alternatives.into_iter().map(Expr::strip_optional).collect();
            let union = Expr::Union(members);
            if field.required {
                union
            } else {
                union.optional()
            }
        }
    };

    Some(if field.nullable {
        combined.nullable()
    } else {
        combined
    })
}
