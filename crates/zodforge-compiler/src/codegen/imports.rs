//! Import resolution for generated units.
//!
//! Every unit imports the validator library, the client's type namespace when
//! it carries an annotation, and exactly the units it references. Specifiers
//! are relative to the importing unit's own directory.

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::ClientGeneratorConfig;
use crate::context::GenerationContext;
use super::availability::HOST_TYPE_NAMESPACE;
use super::expr::Reference;
use super::naming::UnitKind;
use super::unit::SchemaUnit;

/// Package the validator library is imported from.
pub const VALIDATOR_PACKAGE: &str = "zod";

/// Package the default client is imported from.
pub const DEFAULT_CLIENT_PACKAGE: &str = "@prisma/client";

/// One import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub symbols: Vec<String>,
    pub specifier: String,

    /// `import type { .. }`.
    pub type_only: bool,
}

impl Import {
    fn named(symbol: impl Into<String>, specifier: impl Into<String>) -> Self {
        Self {
            symbols: vec![symbol.into()],
            specifier: specifier.into(),
            type_only: false,
        }
    }

    /// The statement as source text.
    pub fn render(&self) -> String {
        let keyword = if self.type_only { "import type" } else { "import" };
        format!("{} {{ {} }} from '{}';", keyword, self.symbols.join(", "), self.specifier)
    }
}

/// Resolves the imports of `unit`, in emission order.
pub fn collect_imports(unit: &SchemaUnit, ctx: &GenerationContext) -> Vec<Import> {
    let mut imports = vec![Import::named("z", VALIDATOR_PACKAGE)];

    if unit.type_annotation().is_some() {
        imports.push(Import {
            symbols: vec![HOST_TYPE_NAMESPACE.to_string()],
            specifier: client_specifier(ctx, unit.kind),
            type_only: true,
        });
    }

    let mut references = BTreeSet::new();
    if let Some(expr) = unit.expr() {
        expr.visit_references(&mut |r: &Reference| {
            if r.kind != unit.kind || r.name != unit.name {
                references.insert(r.clone());
            }
        });
    }

    let extension = ctx.client().import_extension();
    for reference in references {
        let specifier = relative_specifier(unit.kind.directory(), &reference.kind.module_path(&reference.name), extension);
        imports.push(Import::named(reference.symbol(), specifier));
    }

    imports
}

/// Specifier of `target` (a module path relative to the output root) as seen
/// from `from_dir`.
pub fn relative_specifier(from_dir: &str, target: &str, extension: Option<&str>) -> String {
    let relative = pathdiff::diff_paths(Path::new(target), Path::new(from_dir))
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|| target.to_string());
    let specifier = if relative.starts_with("../") {
        relative
    } else {
        format!("./{}", relative)
    };
    with_extension(specifier, extension)
}

/// Specifier of the client's type declarations, as seen from a unit of `kind`.
pub fn client_specifier(ctx: &GenerationContext, kind: UnitKind) -> String {
    let client = ctx.client();
    let Some(output) = &client.output else {
        return DEFAULT_CLIENT_PACKAGE.to_string();
    };

    let from = ctx.output_root().join(kind.directory());
    let relative = pathdiff::diff_paths(output, &from)
        .unwrap_or_else(|| output.clone())
        .to_string_lossy()
        .replace('\\', "/");
    let mut specifier = if relative.starts_with("../") || relative.starts_with('/') {
        relative
    } else {
        format!("./{}", relative)
    };

    if client.requires_client_module() && !ends_with_client_module(&specifier) {
        specifier = format!(
            "{}/{}",
            specifier.trim_end_matches('/'),
            ClientGeneratorConfig::CLIENT_MODULE
        );
    }
    with_extension(specifier, client.import_extension())
}

fn ends_with_client_module(specifier: &str) -> bool {
    specifier
        .rsplit('/')
        .next()
        .is_some_and(|last| last == ClientGeneratorConfig::CLIENT_MODULE)
}

fn with_extension(specifier: String, extension: Option<&str>) -> String {
    match extension {
        Some(ext) => format!("{}.{}", specifier, ext),
        None => specifier,
    }
}
