//! A custom format definition as authored locally, one JSON document per file.

use crate::version::{parse_version, VersionParseError, DEFAULT_VERSION};
use cfsync_arr_api::{Field, Specification};
use semver::Version;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;
use thiserror::Error;

/// Documentation file kept alongside the definitions. It is never synced nor version-tracked.
pub const TEMPLATE_FILENAME: &str = "_template.json";

/// A local custom format definition. Besides the properties pushed to the instances it carries
/// the `cfSync_*` settings controlling how and where it is pushed.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub name: String,

    #[serde(default, alias = "includeInRenaming")]
    pub include_custom_format_when_renaming: bool,

    #[serde(default)]
    pub specifications: Vec<DefinitionSpecification>,

    /// Declared semantic version, validated when the definition is planned.
    #[serde(
        rename = "cfSync_version",
        alias = "syncVersion",
        default = "default_version"
    )]
    pub version: String,

    /// Score to assign to the format in every quality profile that references it.
    #[serde(rename = "cfSync_score", alias = "syncScore", default)]
    pub score: Option<i32>,

    /// Instance names (`Radarr_003`) or bare ordinals (`003`) to sync to. Overrides the
    /// per-family switches when present.
    #[serde(rename = "cfSync_instances", alias = "syncInstanceFilter", default)]
    pub instance_filter: Option<BTreeSet<String>>,

    #[serde(
        rename = "cfSync_radarr",
        alias = "syncEnabledForFamilyA",
        default = "enabled"
    )]
    pub sync_radarr: bool,

    #[serde(
        rename = "cfSync_sonarr",
        alias = "syncEnabledForFamilyB",
        default = "enabled"
    )]
    pub sync_sonarr: bool,
}

fn default_version() -> String {
    String::from(DEFAULT_VERSION)
}

fn enabled() -> bool {
    true
}

impl Definition {
    /// The declared version of this definition.
    pub fn parsed_version(&self) -> Result<Version, VersionParseError> {
        parse_version(&self.version)
    }
}

/// A specification as written in a definition, before its `fields` are normalized.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DefinitionSpecification {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub implementation: String,
    #[serde(default)]
    pub negate: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub fields: RawFields,
}

impl DefinitionSpecification {
    /// Convert to the [Specification] sent to the instances.
    pub fn normalize(&self) -> Result<Specification, SpecificationShapeError> {
        let fields = self.fields.normalize().map_err(|fields| SpecificationShapeError {
            specification: self.name.clone(),
            fields,
        })?;
        Ok(Specification {
            name: self.name.clone(),
            implementation: self.implementation.clone(),
            negate: self.negate,
            required: self.required,
            fields,
        })
    }
}

/// The shapes accepted for a specification's `fields`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawFields {
    /// Already a list of fields.
    List(Vec<RawField>),
    /// Shorthand `{"value": ...}` for a single field named `value`.
    Single { value: Value },
    Unrecognized(Value),
}

impl Default for RawFields {
    fn default() -> Self {
        RawFields::Unrecognized(Value::Null)
    }
}

impl RawFields {
    /// On failure, returns the offending JSON.
    fn normalize(&self) -> Result<Vec<Field>, Value> {
        match self {
            RawFields::List(fields) => fields.iter().map(RawField::normalize).collect(),
            RawFields::Single { value } => Ok(vec![Field::new("value", value.clone())]),
            RawFields::Unrecognized(v) => Err(v.clone()),
        }
    }
}

/// A single entry of a [RawFields::List].
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawField {
    /// `["name", value]`
    Pair(String, Value),
    Object {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        value: Value,
    },
    Unrecognized(Value),
}

impl RawField {
    fn normalize(&self) -> Result<Field, Value> {
        match self {
            RawField::Pair(name, value) => Ok(Field::new(name, value.clone())),
            RawField::Object { name, value } => Ok(Field::new(
                name.as_deref().unwrap_or("value"),
                value.clone(),
            )),
            RawField::Unrecognized(v) => Err(v.clone()),
        }
    }
}

/// A specification's `fields` was neither a `{"value": ...}` object nor a list of fields.
#[derive(Debug, Error)]
#[error("Unrecognized fields in specification \"{specification}\": {fields}")]
pub struct SpecificationShapeError {
    pub specification: String,
    pub fields: Value,
}
