//! Scalar metadata types to validator primitives.

use crate::ir::{InputTypeAlternative, TypeLocation};
use super::expr::{Expr, Primitive};

/// Maps a scalar type name to its primitive. Unknown names yield `None`.
pub fn map_scalar(type_name: &str) -> Option<Primitive> {
    let primitive = match type_name {
        "String" => Primitive::String,
        "Int" => Primitive::Int,
        "Float" | "Decimal" => Primitive::Number,
        "BigInt" => Primitive::BigInt,
        "Boolean" => Primitive::Boolean,
        "DateTime" => Primitive::Date,
        "Json" => Primitive::Json,
        "True" => Primitive::LiteralTrue,
        "Bytes" => Primitive::Bytes,
        _ => return None,
    };
    Some(primitive)
}

/// Applies list and presence modifiers: array first, then optional.
pub fn wrap_cardinality(base: Expr, is_list: bool, required: bool) -> Expr {
    let expr = if is_list { base.array() } else { base };
    if required {
        expr
    } else {
        expr.optional()
    }
}

/// Maps a scalar alternative of a field. Non-scalar or unknown types yield `None`.
pub fn map_scalar_alternative(alt: &InputTypeAlternative, required: bool) -> Option<Expr> {
    if alt.location != TypeLocation::Scalar {
        return None;
    }
    let primitive = map_scalar(&alt.type_name)?;
    Some(wrap_cardinality(primitive.into(), alt.is_list, required))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_scalar_category() {
        let cases = [
            ("String", Primitive::String),
            ("Int", Primitive::Int),
            ("Float", Primitive::Number),
            ("Decimal", Primitive::Number),
            ("BigInt", Primitive::BigInt),
            ("Boolean", Primitive::Boolean),
            ("DateTime", Primitive::Date),
            ("Json", Primitive::Json),
            ("True", Primitive::LiteralTrue),
            ("Bytes", Primitive::Bytes),
        ];
        for (name, expected) in cases {
            assert_eq!(map_scalar(name), Some(expected), "{}", name);
        }
    }

    #[test]
    fn unknown_scalars_are_discarded() {
        assert_eq!(map_scalar("Unsupported"), None);
        assert_eq!(map_scalar("Null"), None);
        assert_eq!(
            map_scalar_alternative(&InputTypeAlternative::scalar("Geometry"), true),
            None
        );
    }

    #[test]
    fn array_wraps_before_optional() {
        let alt = InputTypeAlternative::scalar("String").list();
        let expr = map_scalar_alternative(&alt, false).unwrap();
        assert_eq!(expr, Expr::from(Primitive::String).array().optional());
    }

    #[test]
    fn required_scalars_have_no_wrapper() {
        let expr = map_scalar_alternative(&InputTypeAlternative::scalar("Int"), true).unwrap();
        assert_eq!(expr, Expr::from(Primitive::Int));
    }

    #[test]
    fn ignores_non_scalar_locations() {
        assert_eq!(
            map_scalar_alternative(&InputTypeAlternative::enumeration("String"), true),
            None
        );
        assert_eq!(
            map_scalar_alternative(&InputTypeAlternative::field_ref("String"), true),
            None
        );
    }
}
