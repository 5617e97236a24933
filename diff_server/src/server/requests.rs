use diff_core::{DiffOptions, Format};
use schemars::JsonSchema;
use serde::{self, Deserialize, Serialize};

/// Required fields are modelled as options so that a missing field produces
/// the documented 400 envelope instead of a generic body-rejection error.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiffRequest {
    pub original: Option<String>,
    pub modified: Option<String>,
    pub options: Option<DiffOptionsBody>,
}

/// Wire representation of the core's diff options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DiffOptionsBody {
    pub ignore_key_order: bool,
    pub ignore_array_order: bool,
    pub ignore_keys: Vec<String>,
    pub sort_keys: bool,
}

impl From<DiffOptionsBody> for DiffOptions {
    fn from(body: DiffOptionsBody) -> Self {
        Self {
            ignore_key_order: body.ignore_key_order,
            ignore_array_order: body.ignore_array_order,
            ignore_keys: body.ignore_keys,
            sort_keys: body.sort_keys,
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ValidateRequest {
    pub json: Option<serde_json::Value>,
    pub schema: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormatRequest {
    pub json: Option<String>,
    pub tab_size: Option<usize>,
    pub minify: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    pub content: Option<String>,
    pub from: Option<FormatBody>,
    pub to: Option<FormatBody>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FormatBody {
    Json,
    Yaml,
    Xml,
}

impl From<FormatBody> for Format {
    fn from(body: FormatBody) -> Self {
        match body {
            FormatBody::Json => Format::Json,
            FormatBody::Yaml => Format::Yaml,
            FormatBody::Xml => Format::Xml,
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSavedDiffRequest {
    pub diff_type: Option<String>,
    pub original: Option<String>,
    pub modified: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
    pub tags: Option<Vec<String>>,
}
