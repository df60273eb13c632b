//! Scalar-field enums and aggregate inputs missing from the metadata.

use std::collections::BTreeSet;

use tracing::debug;

use crate::ir::{CompositeType, EnumType, Field, InputTypeAlternative, Model, ModelField, SchemaIR};

/// Key selecting every row in a count aggregate.
pub const COUNT_ALL_KEY: &str = "_all";

/// `<Model>ScalarFieldEnum` for every model whose enum is not declared.
///
/// Values are the model's scalar and enum columns, in declaration order.
pub fn scalar_field_enums(schema: &SchemaIR) -> Vec<EnumType> {
    let declared: BTreeSet<&str> = schema.enums.iter().map(|e| e.name.as_str()).collect();
    schema
        .models
        .iter()
        .filter(|m| m.scalar_fields().next().is_some())
        .filter_map(|model| {
            let name = format!("{}ScalarFieldEnum", model.name);
            if declared.contains(name.as_str()) {
                return None;
            }
            debug!(model = model.name.as_str(), "synthesized scalar field enum");
            let values = model.scalar_fields().map(|f| f.name.clone()).collect();
            Some(EnumType::new(name, values))
        })
        .collect()
}

/// Aggregate inputs for every supported aggregate the metadata does not declare.
pub fn aggregate_inputs(schema: &SchemaIR) -> Vec<CompositeType> {
    let declared: BTreeSet<&str> = schema.composites.iter().map(|c| c.name.as_str()).collect();
    let mut synthesized = Vec::new();

    for model in &schema.models {
        let support = schema.aggregate_support(model);
        let candidates = [
            (support.count, "Count", count_fields(model)),
            (support.min, "Min", selected(model, ModelField::is_comparable)),
            (support.max, "Max", selected(model, ModelField::is_comparable)),
            (support.avg, "Avg", selected(model, is_averageable)),
            (support.sum, "Sum", selected(model, is_averageable)),
        ];
        for (enabled, kind, fields) in candidates {
            let name = format!("{}{}AggregateInput", model.name, kind);
            if !enabled || declared.contains(name.as_str()) {
                continue;
            }
            debug!(model = model.name.as_str(), composite = name.as_str(), "synthesized aggregate input");
            synthesized.push(CompositeType::new(name, fields));
        }
    }
    synthesized
}

fn count_fields(model: &Model) -> Vec<Field> {
    let mut fields: Vec<Field> = model.scalar_fields().map(|f| flag(&f.name)).collect();
    fields.push(flag(COUNT_ALL_KEY));
    fields
}

fn selected(model: &Model, keep: fn(&ModelField) -> bool) -> Vec<Field> {
    model.fields.iter().filter(|f| keep(f)).map(|f| flag(&f.name)).collect()
}

fn is_averageable(field: &ModelField) -> bool {
    field.is_numeric() && !field.is_list
}

fn flag(name: &str) -> Field {
    Field::new(name, vec![InputTypeAlternative::scalar("True")])
}
