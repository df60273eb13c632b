//! The `index.ts` barrel module.

use crate::context::GenerationContext;
use super::imports::relative_specifier;
use super::unit::SchemaUnit;

/// File name of the barrel module.
pub const MANIFEST_FILE: &str = "index.ts";

/// Renders `index.ts`, re-exporting every unit in generation order.
pub fn render_manifest(units: &[SchemaUnit], ctx: &GenerationContext) -> String {
    let extension = ctx.client().import_extension();
    let mut output = String::new();
    for unit in units {
        output.push_str(&format!(
            "export * from '{}';\n",
            relative_specifier("", &unit.module_path(), extension)
        ));
    }
    output
}
