//! Include and select schemas derived from the relation graph.
//!
//! The shapes are built as ordinary composite types, so they go through the
//! same assembly path as metadata composites. Types the metadata already
//! declares are kept as declared; only missing ones are returned here.

use std::collections::BTreeSet;

use tracing::debug;

use crate::context::GenerationContext;
use crate::ir::{CompositeType, Field, InputTypeAlternative, Model, ModelField, SchemaIR};
use super::references::BULK_FETCH_SUFFIX;

/// Key of the relation-count entry.
pub const COUNT_KEY: &str = "_count";

/// Synthesizes the projection composites the metadata does not declare.
pub fn synthesize(schema: &SchemaIR, ctx: &GenerationContext) -> Vec<CompositeType> {
    let declared: BTreeSet<&str> = schema.composites.iter().map(|c| c.name.as_str()).collect();
    let graph = RelationGraph {
        schema,
        ctx,
        declared: &declared,
    };

    let mut synthesized = Vec::new();
    for model in &schema.models {
        let candidates = [
            graph.include(model),
            graph.select(model),
            graph.args(model),
            graph.count_output_select(model),
            graph.count_output_args(model),
        ];
        for composite in candidates.into_iter().flatten() {
            if declared.contains(composite.name.as_str()) {
                continue;
            }
            debug!(model = model.name.as_str(), composite = composite.name.as_str(), "synthesized projection type");
            synthesized.push(composite);
        }
    }
    synthesized
}

struct RelationGraph<'a> {
    schema: &'a SchemaIR,
    ctx: &'a GenerationContext,
    declared: &'a BTreeSet<&'a str>,
}

impl RelationGraph<'_> {
    /// `<Model>Include`: every relation plus `_count` for to-many models.
    fn include(&self, model: &Model) -> Option<CompositeType> {
        if !self.ctx.generate_include() || !model.has_relations() {
            return None;
        }
        let mut fields: Vec<Field> = model.relation_fields().map(|f| self.relation_entry(f)).collect();
        if model.has_to_many_relations() {
            fields.push(self.count_entry(model));
        }
        Some(CompositeType::new(format!("{}Include", model.name), fields))
    }

    /// `<Model>Select`: scalars as flags, relations as include entries.
    fn select(&self, model: &Model) -> Option<CompositeType> {
        if !self.ctx.generate_select() {
            return None;
        }
        let mut fields: Vec<Field> = model
            .fields
            .iter()
            .map(|f| {
                if f.is_relation() {
                    self.relation_entry(f)
                } else {
                    flag(&f.name)
                }
            })
            .collect();
        if model.has_to_many_relations() {
            fields.push(self.count_entry(model));
        }
        Some(CompositeType::new(format!("{}Select", model.name), fields))
    }

    /// `<Model>Args`: the nested projection of a to-one relation.
    fn args(&self, model: &Model) -> Option<CompositeType> {
        let mut fields = Vec::new();
        if self.ctx.generate_select() {
            fields.push(Field::new(
                "select",
                vec![InputTypeAlternative::object(format!("{}Select", model.name))],
            ));
        }
        if self.ctx.generate_include() && model.has_relations() {
            fields.push(Field::new(
                "include",
                vec![InputTypeAlternative::object(format!("{}Include", model.name))],
            ));
        }
        if fields.is_empty() {
            return None;
        }
        Some(CompositeType::new(format!("{}Args", model.name), fields))
    }

    fn count_output_select(&self, model: &Model) -> Option<CompositeType> {
        if !self.ctx.generate_select() || !model.has_to_many_relations() {
            return None;
        }
        let fields = model.to_many_fields().map(|f| flag(&f.name)).collect();
        Some(CompositeType::new(format!("{}CountOutputTypeSelect", model.name), fields))
    }

    fn count_output_args(&self, model: &Model) -> Option<CompositeType> {
        if !self.ctx.generate_select() || !model.has_to_many_relations() {
            return None;
        }
        Some(CompositeType::new(
            format!("{}CountOutputTypeArgs", model.name),
            vec![Field::new(
                "select",
                vec![InputTypeAlternative::object(format!("{}CountOutputTypeSelect", model.name))],
            )],
        ))
    }

    /// A relation entry: a flag or the nested arguments of the target.
    fn relation_entry(&self, field: &ModelField) -> Field {
        let mut alternatives = vec![InputTypeAlternative::scalar("Boolean")];
        if field.is_list {
            // Resolved to the target's findMany schema, or dropped when unsupported.
            alternatives.push(InputTypeAlternative::object(format!("{}{}", field.type_name, BULK_FETCH_SUFFIX)));
        } else if self.has_args(&field.type_name) {
            alternatives.push(InputTypeAlternative::object(format!("{}Args", field.type_name)));
        }
        Field::new(field.name.clone(), alternatives)
    }

    fn count_entry(&self, model: &Model) -> Field {
        let mut alternatives = vec![InputTypeAlternative::scalar("Boolean")];
        if self.ctx.generate_select() {
            alternatives.push(InputTypeAlternative::object(format!("{}CountOutputTypeArgs", model.name)));
        }
        Field::new(COUNT_KEY, alternatives)
    }

    /// Whether `<target>Args` will exist after synthesis.
    fn has_args(&self, target: &str) -> bool {
        let name = format!("{}Args", target);
        self.declared.contains(name.as_str())
            || self
                .schema
                .model(target)
                .is_some_and(|m| self.args(m).is_some())
    }
}

fn flag(name: &str) -> Field {
    Field::new(name, vec![InputTypeAlternative::scalar("Boolean")])
}
