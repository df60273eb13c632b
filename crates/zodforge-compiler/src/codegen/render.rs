//! Zod source rendering.
//!
//! Turns a unit's expression tree into TypeScript text. Rendering is pure:
//! the same unit and context always produce the same bytes.

use crate::context::GenerationContext;
use super::expr::{Expr, ObjectExpr, Primitive};
use super::imports::collect_imports;
use super::unit::{SchemaUnit, UnitBody};

/// Local name of the recursive JSON helper.
pub const JSON_HELPER: &str = "jsonSchema";

const JSON_HELPER_SOURCE: &str = "const literalSchema = z.union([z.string(), z.number(), z.boolean()]);
const jsonSchema: z.ZodType<unknown> = z.lazy(() =>
  z.union([literalSchema, z.array(jsonSchema.nullable()), z.record(jsonSchema.nullable())])
);
";

/// Renders a complete module for `unit`.
pub fn render_unit(unit: &SchemaUnit, ctx: &GenerationContext) -> String {
    let mut output = String::new();

    for import in collect_imports(unit, ctx) {
        output.push_str(&import.render());
        output.push('\n');
    }
    output.push('\n');

    match &unit.body {
        UnitBody::Enum(values) => {
            let literals: Vec<String> = values.iter().map(|v| quote(v)).collect();
            output.push_str(&format!(
                "export const {} = z.enum([{}]);\n",
                unit.symbol(),
                literals.join(", ")
            ));
        }
        UnitBody::Schema {
            expr,
            type_annotation,
        } => {
            if expr.uses_json() {
                output.push_str(JSON_HELPER_SOURCE);
                output.push('\n');
            }

            let body = render_top_level(expr);
            match type_annotation {
                Some(annotation) => {
                    output.push_str(&format!("const Schema: z.ZodType<{}> = {};\n\n", annotation, body));
                    output.push_str(&format!("export const {} = Schema;\n", unit.symbol()));
                }
                None => {
                    output.push_str(&format!("export const {} = {};\n", unit.symbol(), body));
                }
            }
        }
    }

    output
}

/// Renders a top-level expression; objects are laid out one field per line.
fn render_top_level(expr: &Expr) -> String {
    let Expr::Object(obj) = expr else {
        return render_expr(expr);
    };
    if obj.fields.is_empty() {
        return render_object(obj);
    }

    let mut output = String::from("z.object({\n");
    for (name, field) in &obj.fields {
        output.push_str(&format!("  {}: {},\n", property_key(name), render_expr(field)));
    }
    output.push_str("})");
    if obj.strict {
        output.push_str(".strict()");
    }
    output
}

/// Renders an expression on a single line.
pub fn render_expr(expr: &Expr) -> String {
    match expr {
        Expr::Primitive(p) => render_primitive(*p).to_string(),
        Expr::Ref(reference) => reference.symbol(),
        Expr::Lazy(inner) => format!("z.lazy(() => {})", render_expr(inner)),
        Expr::Array(inner) => format!("{}.array()", render_expr(inner)),
        Expr::Optional(inner) => format!("{}.optional()", render_expr(inner)),
        Expr::Nullable(inner) => format!("{}.nullable()", render_expr(inner)),
        Expr::Union(members) => {
            let members: Vec<String> = members.iter().map(render_expr).collect();
            format!("z.union([{}])", members.join(", "))
        }
        Expr::Object(obj) => render_object(obj),
    }
}

fn render_object(obj: &ObjectExpr) -> String {
    let fields: Vec<String> = obj
        .fields
        .iter()
        .map(|(name, e)| format!("{}: {}", property_key(name), render_expr(e)))
        .collect();
    let body = if fields.is_empty() {
        "z.object({})".to_string()
    } else {
        format!("z.object({{ {} }})", fields.join(", "))
    };
    if obj.strict {
        format!("{}.strict()", body)
    } else {
        body
    }
}

fn render_primitive(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::String => "z.string()",
        Primitive::Int => "z.number().int()",
        Primitive::Number => "z.number()",
        Primitive::BigInt => "z.bigint()",
        Primitive::Boolean => "z.boolean()",
        Primitive::Date => "z.coerce.date()",
        Primitive::Json => JSON_HELPER,
        Primitive::LiteralTrue => "z.literal(true)",
        Primitive::Bytes => "z.instanceof(Buffer)",
    }
}

/// Object key, quoted unless it is a plain identifier.
fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Single-quoted string literal.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
