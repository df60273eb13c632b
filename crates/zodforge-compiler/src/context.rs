//! The per-run generation context.
//!
//! Built once from the configuration and the metadata before any unit is
//! assembled, then shared read-only by every component. There are no setters:
//! a context that exists is a context that is final.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::config::{ClientGeneratorConfig, CompilerConfig};
use crate::ir::{EnumType, OperationKind, Provider, SchemaIR};

/// Preview feature that unlocks relevance ordering.
pub const FULL_TEXT_SEARCH: &str = "fullTextSearch";

/// Immutable settings and registries shared by all assemblers.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    output_root: PathBuf,
    provider: Provider,
    client: ClientGeneratorConfig,
    generate_select: bool,
    generate_include: bool,
    preview_features: BTreeSet<String>,
    enum_names: BTreeSet<String>,
    raw_operations: BTreeMap<String, String>,
    model_operations: BTreeMap<String, BTreeSet<OperationKind>>,
}

impl GenerationContext {
    /// Builds the context. `enums` is the full enum list, synthesized ones included.
    pub fn new(config: &CompilerConfig, schema: &SchemaIR, enums: &[EnumType]) -> Self {
        Self {
            output_root: config.output.clone(),
            provider: schema.provider.clone(),
            client: config.client.clone(),
            generate_select: config.generate_select,
            generate_include: config.generate_include,
            preview_features: schema.preview_features.iter().cloned().collect(),
            enum_names: enums.iter().map(|e| e.name.clone()).collect(),
            raw_operations: raw_operation_map(schema),
            model_operations: schema
                .operations
                .iter()
                .map(|o| (o.model.clone(), o.operations.clone()))
                .collect(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    pub fn client(&self) -> &ClientGeneratorConfig {
        &self.client
    }

    pub fn generate_select(&self) -> bool {
        self.generate_select
    }

    pub fn generate_include(&self) -> bool {
        self.generate_include
    }

    pub fn has_preview_feature(&self, feature: &str) -> bool {
        self.preview_features.contains(feature)
    }

    /// Whether order-by fragments use the relevance-aware input.
    pub fn uses_relevance_ordering(&self) -> bool {
        self.provider.supports_relevance_ordering() && self.has_preview_feature(FULL_TEXT_SEARCH)
    }

    /// Whether `name` is a registered enum.
    pub fn is_enum(&self, name: &str) -> bool {
        self.enum_names.contains(name)
    }

    /// Exported base name for a composite, after the raw-operation remap.
    pub fn export_name<'a>(&'a self, composite: &'a str) -> &'a str {
        self.raw_operations
            .get(composite)
            .map(String::as_str)
            .unwrap_or(composite)
    }

    /// Whether an operation schema will be generated for `model`.
    pub fn supports_operation(&self, model: &str, op: OperationKind) -> bool {
        self.model_operations
            .get(model)
            .is_some_and(|ops| ops.contains(&op))
    }
}

/// Maps raw-operation argument types (`findUserRaw`) to their export names
/// (`UserFindRawArgs`).
fn raw_operation_map(schema: &SchemaIR) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for ops in &schema.operations {
        for raw in &ops.raw {
            map.insert(
                format!("{}{}Raw", raw.prefix(), ops.model),
                format!("{}{}Args", ops.model, raw.verb()),
            );
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ModelOperations, RawOperation};

    fn schema(provider: Provider, features: &[&str]) -> SchemaIR {
        let mut ops = ModelOperations::new("User", [OperationKind::FindMany]);
        ops.raw.insert(RawOperation::FindRaw);
        SchemaIR {
            provider,
            preview_features: features.iter().map(|s| s.to_string()).collect(),
            operations: vec![ops],
            ..SchemaIR::default()
        }
    }

    #[test]
    fn context_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GenerationContext>();
    }

    #[test]
    fn relevance_needs_provider_and_feature() {
        let config = CompilerConfig::default();
        let enabled = GenerationContext::new(&config, &schema(Provider::Mysql, &[FULL_TEXT_SEARCH]), &[]);
        let no_feature = GenerationContext::new(&config, &schema(Provider::Postgresql, &[]), &[]);
        let wrong_provider =
            GenerationContext::new(&config, &schema(Provider::Sqlite, &[FULL_TEXT_SEARCH]), &[]);

        assert!(enabled.uses_relevance_ordering());
        assert!(!no_feature.uses_relevance_ordering());
        assert!(!wrong_provider.uses_relevance_ordering());
    }

    #[test]
    fn remaps_raw_operation_arguments() {
        let ctx = GenerationContext::new(&CompilerConfig::default(), &schema(Provider::Mongodb, &[]), &[]);
        assert_eq!(ctx.export_name("findUserRaw"), "UserFindRawArgs");
        assert_eq!(ctx.export_name("aggregateUserRaw"), "aggregateUserRaw");
        assert_eq!(ctx.export_name("UserWhereInput"), "UserWhereInput");
    }

    #[test]
    fn registries_reflect_inputs() {
        let enums = vec![EnumType::new("Role", vec!["USER".into()])];
        let ctx = GenerationContext::new(&CompilerConfig::default(), &schema(Provider::Postgresql, &[]), &enums);
        assert!(ctx.is_enum("Role"));
        assert!(!ctx.is_enum("Status"));
        assert!(ctx.supports_operation("User", OperationKind::FindMany));
        assert!(!ctx.supports_operation("User", OperationKind::FindUnique));
        assert!(!ctx.supports_operation("Post", OperationKind::FindMany));
    }
}
