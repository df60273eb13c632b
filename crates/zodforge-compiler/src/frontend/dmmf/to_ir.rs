//! Conversion from the raw DMMF document to IR.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::diagnostic::CompilerError;
use crate::ir::{
    AggregateSupport, CompositeType, EnumType, Field, FieldKind, InputTypeAlternative, Model,
    ModelField, ModelOperations, Namespace, OperationKind, Provider, RawOperation, SchemaIR,
    TypeLocation,
};
use super::document::{
    Document, InputObjectTypes, RawAlternative, RawEnum, RawInputType, RawModel,
    RawModelOperations,
};

/// Converts a parsed document into IR.
pub fn to_ir(document: Document, source: PathBuf) -> Result<SchemaIR, CompilerError> {
    let mut ir = SchemaIR::new(source);
    ir.provider = document
        .provider
        .as_deref()
        .map(Provider::from_name)
        .unwrap_or_default();
    ir.preview_features = document.preview_features;

    let mut raw_models = document.models;
    let mut raw_enums = document.enums;
    let mut inputs = flatten_inputs(document.input_object_types);
    let mut raw_operations = document.model_operations;

    if let Some(datamodel) = document.datamodel {
        raw_models.extend(datamodel.models);
        raw_enums.extend(datamodel.enums);
    }
    if let Some(schema) = document.schema {
        inputs.extend(flatten_inputs(schema.input_object_types));
        if let Some(enum_types) = schema.enum_types {
            raw_enums.extend(enum_types.prisma);
            raw_enums.extend(enum_types.model);
        }
    }
    if let Some(mappings) = document.mappings {
        raw_operations.extend(mappings.model_operations);
    }

    for model in raw_models {
        ir.models.push(convert_model(model, &ir.source)?);
    }
    ir.enums = dedup_enums(raw_enums);
    ir.composites = inputs
        .into_iter()
        .map(|(input, namespace)| convert_input_type(input, namespace))
        .collect();
    ir.operations = merge_operations(raw_operations.into_iter().map(convert_operations));
    ir.aggregate_support = document
        .aggregate_support
        .into_iter()
        .map(|(model, s)| {
            let support = AggregateSupport {
                count: s.count,
                min: s.min,
                max: s.max,
                avg: s.avg,
                sum: s.sum,
            };
            (model, support)
        })
        .collect();

    Ok(ir)
}

/// Input types with the namespace they were declared under.
fn flatten_inputs(types: InputObjectTypes) -> Vec<(RawInputType, Option<Namespace>)> {
    match types {
        InputObjectTypes::Flat(types) => types.into_iter().map(|t| (t, None)).collect(),
        InputObjectTypes::Namespaced { prisma, model } => prisma
            .into_iter()
            .map(|t| (t, Some(Namespace::Host)))
            .chain(model.into_iter().map(|t| (t, Some(Namespace::Model))))
            .collect(),
    }
}

fn convert_model(model: RawModel, source: &Path) -> Result<Model, CompilerError> {
    let mut fields = Vec::with_capacity(model.fields.len());
    for field in model.fields {
        let kind = FieldKind::from_name(&field.kind).ok_or_else(|| CompilerError::MetadataParse {
            path: source.to_path_buf(),
            message: format!(
                "field '{}.{}' has unknown kind '{}'",
                model.name, field.name, field.kind
            ),
        })?;
        fields.push(ModelField {
            name: field.name,
            kind,
            type_name: field.type_name,
            is_list: field.is_list,
            is_required: field.is_required,
        });
    }
    Ok(Model::new(model.name, fields))
}

/// Keeps the first declaration of each enum name. Validation reports
/// duplicates among user enums before this matters.
fn dedup_enums(raw: Vec<RawEnum>) -> Vec<EnumType> {
    let mut enums: Vec<EnumType> = Vec::new();
    for e in raw {
        if enums.iter().any(|existing| existing.name == e.name) {
            continue;
        }
        let values = e.values.into_iter().map(|v| v.into_name()).collect();
        enums.push(EnumType::new(e.name, values));
    }
    enums
}

fn convert_input_type(input: RawInputType, declared_in: Option<Namespace>) -> CompositeType {
    let fields = input
        .fields
        .into_iter()
        .map(|field| {
            let alternatives = field
                .input_types
                .into_iter()
                .filter_map(|alt| convert_alternative(alt, declared_in))
                .collect();
            Field {
                name: field.name,
                required: field.is_required,
                nullable: field.is_nullable,
                alternatives,
            }
        })
        .collect();
    CompositeType::new(input.name, fields)
}

fn convert_alternative(alt: RawAlternative, declared_in: Option<Namespace>) -> Option<InputTypeAlternative> {
    let Some(location) = TypeLocation::from_name(&alt.location) else {
        debug!(ty = alt.type_name.as_str(), location = alt.location.as_str(), "ignoring alternative with unknown location");
        return None;
    };
    let namespace = alt
        .namespace
        .as_deref()
        .and_then(Namespace::from_name)
        .or(declared_in)
        .unwrap_or_default();

    Some(InputTypeAlternative {
        type_name: alt.type_name,
        is_list: alt.is_list,
        location,
        namespace,
    })
}

fn convert_operations(raw: RawModelOperations) -> ModelOperations {
    let mut ops = ModelOperations::new(raw.model, std::iter::empty());
    for (key, value) in raw.operations {
        if value.is_null() {
            continue;
        }
        if let Some(op) = canonical_operation(&key) {
            ops.operations.insert(op);
        } else if let Some(raw_op) = RawOperation::from_method_name(&key) {
            ops.raw.insert(raw_op);
        } else {
            debug!(model = ops.model.as_str(), operation = key.as_str(), "ignoring unsupported operation");
        }
    }
    ops
}

/// Folds entries naming the same model into one, keeping first-seen order.
/// Both document layouts may list a model; its operation sets are unioned.
fn merge_operations(entries: impl IntoIterator<Item = ModelOperations>) -> Vec<ModelOperations> {
    let mut merged: Vec<ModelOperations> = Vec::new();
    for entry in entries {
        match merged.iter_mut().find(|existing| existing.model == entry.model) {
            Some(existing) => {
                debug!(model = entry.model.as_str(), "merging repeated operation mapping");
                existing.operations.extend(entry.operations);
                existing.raw.extend(entry.raw);
            }
            None => merged.push(entry),
        }
    }
    merged
}

/// Resolves an operation key, including the short aliases.
pub fn canonical_operation(key: &str) -> Option<OperationKind> {
    match key {
        "create" => Some(OperationKind::CreateOne),
        "update" => Some(OperationKind::UpdateOne),
        "delete" => Some(OperationKind::DeleteOne),
        "upsert" => Some(OperationKind::UpsertOne),
        other => OperationKind::from_method_name(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SchemaIR {
        let document: Document = serde_json::from_str(json).unwrap();
        to_ir(document, PathBuf::from("schema.json")).unwrap()
    }

    #[test]
    fn canonicalizes_aliases() {
        assert_eq!(canonical_operation("create"), Some(OperationKind::CreateOne));
        assert_eq!(canonical_operation("createOne"), Some(OperationKind::CreateOne));
        assert_eq!(canonical_operation("upsert"), Some(OperationKind::UpsertOne));
        assert_eq!(canonical_operation("findFirstOrThrow"), None);
    }

    #[test]
    fn reads_operation_mapping() {
        let ir = parse(
            r#"{
                "modelOperations": [{
                    "model": "User",
                    "findMany": "findManyUser",
                    "create": "createOneUser",
                    "findRaw": "findUserRaw",
                    "findUniqueOrThrow": "findUniqueUserOrThrow",
                    "groupBy": null
                }]
            }"#,
        );
        let ops = &ir.operations[0];
        assert_eq!(ops.model, "User");
        assert!(ops.supports(OperationKind::FindMany));
        assert!(ops.supports(OperationKind::CreateOne));
        assert!(!ops.supports(OperationKind::GroupBy));
        assert_eq!(ops.operations.len(), 2);
        assert!(ops.raw.contains(&RawOperation::FindRaw));
    }

    #[test]
    fn repeated_model_mappings_are_merged() {
        let ir = parse(
            r#"{
                "modelOperations": [
                    { "model": "Tag", "findMany": "findManyTag" },
                    { "model": "User", "findMany": "findManyUser" }
                ],
                "mappings": {
                    "modelOperations": [
                        { "model": "Tag", "createMany": "createManyTag", "findMany": "findManyTag", "findRaw": "findTagRaw" }
                    ]
                }
            }"#,
        );
        let models: Vec<&str> = ir.operations.iter().map(|o| o.model.as_str()).collect();
        assert_eq!(models, vec!["Tag", "User"]);
        let tag = &ir.operations[0];
        assert!(tag.supports(OperationKind::FindMany));
        assert!(tag.supports(OperationKind::CreateMany));
        assert_eq!(tag.operations.len(), 2);
        assert!(tag.raw.contains(&RawOperation::FindRaw));
    }

    #[test]
    fn missing_provider_names_no_dialect() {
        let ir = parse(r#"{ "models": [] }"#);
        assert_eq!(ir.provider, Provider::Unspecified);
        assert!(!ir.provider.supports_skip_duplicates());
        assert!(!ir.provider.supports_relevance_ordering());
    }

    #[test]
    fn namespaced_inputs_default_alternative_namespace() {
        let ir = parse(
            r#"{
                "schema": {
                    "inputObjectTypes": {
                        "prisma": [{
                            "name": "UserWhereInput",
                            "fields": [{
                                "name": "AND",
                                "isRequired": false,
                                "isNullable": false,
                                "inputTypes": [
                                    { "type": "UserWhereInput", "location": "inputObjectTypes" },
                                    { "type": "UserWhereInput", "location": "inputObjectTypes", "isList": true },
                                    { "type": "Other", "location": "outputObjectTypes" }
                                ]
                            }]
                        }],
                        "model": [{
                            "name": "AddressCreateInput",
                            "fields": [{
                                "name": "street",
                                "isRequired": true,
                                "inputTypes": [{ "type": "String", "location": "scalar" }]
                            }]
                        }]
                    }
                }
            }"#,
        );
        assert_eq!(ir.composites.len(), 2);
        let and = &ir.composites[0].fields[0];
        assert_eq!(and.alternatives.len(), 2);
        assert_eq!(and.alternatives[0].namespace, Namespace::Host);
        assert!(and.alternatives[1].is_list);

        let street = &ir.composites[1].fields[0];
        assert!(street.required);
        assert_eq!(street.alternatives[0].namespace, Namespace::Model);
    }

    #[test]
    fn reads_nested_datamodel() {
        let ir = parse(
            r#"{
                "provider": "mysql",
                "previewFeatures": ["fullTextSearch"],
                "datamodel": {
                    "models": [{
                        "name": "User",
                        "fields": [
                            { "name": "id", "kind": "scalar", "type": "Int", "isRequired": true },
                            { "name": "posts", "kind": "object", "type": "Post", "isList": true, "isRequired": true }
                        ]
                    }],
                    "enums": [{ "name": "Role", "values": [{ "name": "USER", "dbName": null }, { "name": "ADMIN" }] }]
                },
                "schema": { "enumTypes": { "prisma": [{ "name": "SortOrder", "values": ["asc", "desc"] }] } }
            }"#,
        );
        assert_eq!(ir.provider, Provider::Mysql);
        assert_eq!(ir.preview_features, vec!["fullTextSearch"]);
        assert!(ir.models[0].fields[1].is_to_many());
        assert_eq!(ir.enums[0].values, vec!["USER", "ADMIN"]);
        assert_eq!(ir.enums[1].name, "SortOrder");
    }

    #[test]
    fn unknown_field_kind_is_rejected() {
        let document: Document = serde_json::from_str(
            r#"{ "models": [{ "name": "User", "fields": [{ "name": "x", "kind": "weird", "type": "Int" }] }] }"#,
        )
        .unwrap();
        let err = to_ir(document, PathBuf::from("schema.json")).unwrap_err();
        assert!(matches!(err, CompilerError::MetadataParse { .. }));
    }

    #[test]
    fn reads_aggregate_support() {
        let ir = parse(r#"{ "aggregateSupport": { "User": { "count": true, "sum": true } } }"#);
        let support = ir.aggregate_support["User"];
        assert!(support.count && support.sum);
        assert!(!support.min);
    }
}
