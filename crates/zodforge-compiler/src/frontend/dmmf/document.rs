//! Serde mirror of the DMMF-style metadata document.
//!
//! Accepts both the flat layout (`models`, `inputObjectTypes`, ...) and the
//! nested layout the ORM emits (`datamodel`, `schema`, `mappings`). Keys the
//! generator does not use are ignored.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub provider: Option<String>,
    pub preview_features: Vec<String>,

    pub models: Vec<RawModel>,
    pub enums: Vec<RawEnum>,
    pub input_object_types: InputObjectTypes,
    pub model_operations: Vec<RawModelOperations>,
    pub aggregate_support: BTreeMap<String, RawAggregateSupport>,

    pub datamodel: Option<Datamodel>,
    pub schema: Option<Schema>,
    pub mappings: Option<Mappings>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Datamodel {
    pub models: Vec<RawModel>,
    pub enums: Vec<RawEnum>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Schema {
    pub input_object_types: InputObjectTypes,
    pub enum_types: Option<EnumTypes>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Mappings {
    pub model_operations: Vec<RawModelOperations>,
}

/// Input types as one list or split by namespace.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InputObjectTypes {
    Flat(Vec<RawInputType>),
    Namespaced {
        #[serde(default)]
        prisma: Vec<RawInputType>,
        #[serde(default)]
        model: Vec<RawInputType>,
    },
}

impl Default for InputObjectTypes {
    fn default() -> Self {
        InputObjectTypes::Flat(Vec::new())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EnumTypes {
    pub prisma: Vec<RawEnum>,
    pub model: Vec<RawEnum>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModel {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<RawModelField>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModelField {
    pub name: String,
    pub kind: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub is_list: bool,
    #[serde(default)]
    pub is_required: bool,
}

#[derive(Debug, Deserialize)]
pub struct RawEnum {
    pub name: String,
    #[serde(default)]
    pub values: Vec<RawEnumValue>,
}

/// Enum values are plain strings or `{ "name": .. }` objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawEnumValue {
    Plain(String),
    Named { name: String },
}

impl RawEnumValue {
    pub fn into_name(self) -> String {
        match self {
            RawEnumValue::Plain(name) | RawEnumValue::Named { name } => name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawInputType {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<RawInputField>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInputField {
    pub name: String,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_nullable: bool,
    #[serde(default)]
    pub input_types: Vec<RawAlternative>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAlternative {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub is_list: bool,
    pub location: String,
    pub namespace: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawModelOperations {
    pub model: String,

    /// Operation keys mapped to the client method name (or any non-null marker).
    #[serde(flatten)]
    pub operations: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RawAggregateSupport {
    pub count: bool,
    pub min: bool,
    pub max: bool,
    pub avg: bool,
    pub sum: bool,
}
