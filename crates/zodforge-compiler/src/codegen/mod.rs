//! Zod schema generation from metadata IR.
//!
//! Generation runs in two phases:
//! - Assembly builds one [`SchemaUnit`] per enum, composite type and
//!   (model, operation) pair. Each unit is an expression tree, independent
//!   of every other unit.
//! - Rendering turns each unit into a TypeScript module and adds the
//!   `index.ts` barrel once every unit is known.
//!
//! Composite types missing from the metadata (projection shapes, aggregate
//! inputs, scalar-field enums) are synthesized before assembly and go
//! through the same path as declared ones.

mod aggregates;
mod availability;
mod combinator;
mod expr;
mod imports;
mod include_select;
mod manifest;
mod naming;
mod objects;
mod operations;
mod references;
mod render;
mod type_mapper;
mod unit;

pub use expr::{Expr, ObjectExpr, Primitive, Reference};
pub use manifest::MANIFEST_FILE;
pub use naming::{UnitKind, SCHEMA_SUFFIX, SOURCE_EXTENSION};
pub use unit::{SchemaUnit, UnitBody};

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::config::CompilerConfig;
use crate::context::GenerationContext;
use crate::diagnostic::CompilerError;
use crate::ir::{CompositeType, EnumType, SchemaIR};

/// Generated TypeScript code.
pub struct GeneratedCode {
    /// Map of path (relative to the output root) to content.
    pub files: Vec<(String, String)>,

    pub stats: UnitStats,
}

/// Number of units generated per family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitStats {
    pub enums: usize,
    pub objects: usize,
    pub operations: usize,
}

impl UnitStats {
    fn count(units: &[SchemaUnit]) -> Self {
        let of = |kind: UnitKind| units.iter().filter(|u| u.kind == kind).count();
        Self {
            enums: of(UnitKind::Enum),
            objects: of(UnitKind::Object),
            operations: of(UnitKind::Operation),
        }
    }
}

/// Assembled units together with the context they were built in.
pub struct Assembly {
    pub context: GenerationContext,
    pub units: Vec<SchemaUnit>,
}

impl Assembly {
    /// Looks up a unit by kind and base name.
    pub fn unit(&self, kind: UnitKind, name: &str) -> Option<&SchemaUnit> {
        self.units.iter().find(|u| u.kind == kind && u.name == name)
    }
}

/// Generates every schema module for `schema`.
pub fn generate(schema: &SchemaIR, config: &CompilerConfig) -> Result<GeneratedCode, CompilerError> {
    let assembly = assemble_units(schema, config)?;
    let ctx = &assembly.context;

    let mut files: Vec<(String, String)> = assembly
        .units
        .iter()
        .map(|unit| (unit.file_path(), render::render_unit(unit, ctx)))
        .collect();
    files.push((
        MANIFEST_FILE.to_string(),
        manifest::render_manifest(&assembly.units, ctx),
    ));

    Ok(GeneratedCode {
        files,
        stats: UnitStats::count(&assembly.units),
    })
}

/// Builds the context and assembles every unit.
///
/// A unit that fails does not affect its siblings; all failures are
/// reported together.
pub fn assemble_units(schema: &SchemaIR, config: &CompilerConfig) -> Result<Assembly, CompilerError> {
    let mut enums: Vec<EnumType> = schema.enums.clone();
    enums.extend(aggregates::scalar_field_enums(schema));

    let ctx = GenerationContext::new(config, schema, &enums);
    let composites = merge_composites(schema, &ctx);

    let mut units = Vec::new();
    let mut failures = Vec::new();

    for e in &enums {
        units.push(SchemaUnit::enumeration(e.name.clone(), e.values.clone()));
    }
    for composite in &composites {
        units.push(objects::assemble_object(composite, &ctx));
    }

    for model_ops in &schema.operations {
        for &op in &model_ops.operations {
            match operations::assemble_operation(&model_ops.model, op, schema, &ctx) {
                Ok(unit) => units.push(unit),
                Err(e) => failures.push(e),
            }
        }
    }

    if !failures.is_empty() {
        return Err(CompilerError::GenerationFailed { failures });
    }

    for (unit, target) in unresolved_references(&units) {
        warn!(
            unit = unit.as_str(),
            target = target.name.as_str(),
            "referenced unit is not generated; the emitted import will not resolve"
        );
    }

    let stats = UnitStats::count(&units);
    info!(
        enums = stats.enums,
        objects = stats.objects,
        operations = stats.operations,
        "assembled schema units"
    );

    Ok(Assembly { context: ctx, units })
}

/// References whose target unit is not part of `units`, as (referrer, target).
fn unresolved_references(units: &[SchemaUnit]) -> Vec<(String, Reference)> {
    let present: BTreeSet<(UnitKind, &str)> = units.iter().map(|u| (u.kind, u.name.as_str())).collect();
    let mut missing = Vec::new();
    for unit in units {
        let mut targets = BTreeSet::new();
        if let Some(expr) = unit.expr() {
            expr.visit_references(&mut |r: &Reference| {
                if !present.contains(&(r.kind, r.name.as_str())) {
                    targets.insert(r.clone());
                }
            });
        }
        missing.extend(targets.into_iter().map(|r| (unit.name.clone(), r)));
    }
    missing
}

/// Declared composites first, then synthesized ones not already declared.
fn merge_composites(schema: &SchemaIR, ctx: &GenerationContext) -> Vec<CompositeType> {
    let mut seen = BTreeSet::new();
    let mut merged = Vec::new();

    let synthesized = include_select::synthesize(schema, ctx)
        .into_iter()
        .chain(aggregates::aggregate_inputs(schema));

    for composite in schema.composites.iter().cloned().chain(synthesized) {
        if !seen.insert(composite.name.clone()) {
            debug!(composite = composite.name.as_str(), "skipping duplicate composite");
            continue;
        }
        merged.push(composite);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{
        Field, FieldKind, InputTypeAlternative, Model, ModelField, ModelOperations, OperationKind,
    };

    fn schema() -> SchemaIR {
        SchemaIR {
            models: vec![Model::new(
                "Tag",
                vec![ModelField::new("label", FieldKind::Scalar, "String")],
            )],
            composites: vec![CompositeType::new(
                "TagWhereInput",
                vec![Field::new("label", vec![InputTypeAlternative::scalar("String")])],
            )],
            operations: vec![ModelOperations::new("Tag", [OperationKind::FindMany])],
            ..SchemaIR::default()
        }
    }

    #[test]
    fn assembles_every_unit_family() {
        let assembly = assemble_units(&schema(), &CompilerConfig::default()).unwrap();
        assert!(assembly.unit(UnitKind::Enum, "TagScalarFieldEnum").is_some());
        assert!(assembly.unit(UnitKind::Object, "TagWhereInput").is_some());
        assert!(assembly.unit(UnitKind::Object, "TagSelect").is_some());
        assert!(assembly.unit(UnitKind::Object, "TagCountAggregateInput").is_some());
        assert!(assembly.unit(UnitKind::Operation, "TagFindMany").is_some());
    }

    #[test]
    fn declared_composites_win() {
        let mut schema = schema();
        schema.composites.push(CompositeType::new(
            "TagSelect",
            vec![Field::new("label", vec![InputTypeAlternative::scalar("Boolean")])],
        ));
        let assembly = assemble_units(&schema, &CompilerConfig::default()).unwrap();
        let selects: Vec<_> = assembly
            .units
            .iter()
            .filter(|u| u.name == "TagSelect")
            .collect();
        assert_eq!(selects.len(), 1);
        assert_eq!(selects[0].field_names(), vec!["label"]);
    }

    #[test]
    fn reports_references_to_absent_units() {
        let assembly = assemble_units(&schema(), &CompilerConfig::default()).unwrap();
        let missing = unresolved_references(&assembly.units);
        let targets: Vec<(&str, &str)> = missing
            .iter()
            .map(|(unit, r)| (unit.as_str(), r.name.as_str()))
            .collect();
        assert!(targets.contains(&("TagFindMany", "TagWhereUniqueInput")));
        assert!(targets.contains(&("TagFindMany", "TagOrderByWithRelationInput")));
        assert!(!targets.iter().any(|(_, target)| *target == "TagWhereInput" || *target == "TagSelect"));
    }

    #[test]
    fn collects_every_failure() {
        let mut schema = schema();
        schema.operations.push(ModelOperations::new("Ghost", [OperationKind::FindMany, OperationKind::FindFirst]));
        let Err(CompilerError::GenerationFailed { failures }) =
            assemble_units(&schema, &CompilerConfig::default())
        else {
            panic!("expected aggregated failure");
        };
        assert_eq!(failures.len(), 2);
    }

    #[test]
    fn emits_manifest_last() {
        let generated = generate(&schema(), &CompilerConfig::default()).unwrap();
        assert_eq!(generated.stats.operations, 1);
        assert_eq!(generated.files.len(), generated.stats.enums + generated.stats.objects + 2);
        let (path, content) = generated.files.last().unwrap();
        assert_eq!(path, MANIFEST_FILE);
        assert!(content.contains("export * from './TagFindMany.schema';"));
        assert!(generated
            .files
            .iter()
            .any(|(p, _)| p == "objects/TagWhereInput.schema.ts"));
    }
}
