//! OpenAPI specification loading and the typed source model.
//!
//! This module provides functionality for loading OpenAPI specifications from
//! files or URLs and for turning them into the ordered, typed object graph the
//! template builders walk. Every mapping in the model is an `IndexMap`, so
//! paths, methods, responses, media types and named examples keep the order in
//! which the document declares them.
//!
//! # Examples
//!
//! ```no_run
//! use apimtemplate_core::openapi::OpenApiContext;
//! use apimtemplate_core::error::Result;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Load an OpenAPI spec from a file
//! let spec = OpenApiContext::from_file("openapi.yaml").await?;
//!
//! // Access common fields
//! if let Some(title) = spec.title() {
//!     println!("API Title: {}", title);
//! }
//!
//! // Build the typed document
//! let document = spec.document()?;
//! println!("{} paths", document.paths.len());
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::path::Path;

use crate::Error;

// External imports (alphabetized)
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use tokio::fs;

/// Longest chain of `$ref` indirections followed for one object
const MAX_REF_DEPTH: usize = 16;

/// Represents a loaded OpenAPI specification
#[derive(Debug, serde::Serialize)]
#[serde(transparent)]
pub struct OpenApiContext {
    /// The raw JSON value of the OpenAPI spec
    pub json: JsonValue,
}

impl OpenApiContext {
    /// Create a new OpenApiContext from a file or URL (supports both YAML and JSON)
    pub async fn from_file_or_url<P: AsRef<str>>(location: P) -> crate::Result<Self> {
        let location = location.as_ref();

        if location.starts_with("http://") || location.starts_with("https://") {
            return Self::from_url(location).await;
        }

        Self::from_file(location).await
    }

    /// Create a new OpenApiContext from a file (supports both YAML and JSON)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        Self::parse_content(&content).map_err(|e| {
            crate::Error::openapi(format!(
                "Failed to parse OpenAPI spec at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Create a new OpenApiContext from a URL (supports both YAML and JSON)
    pub async fn from_url(url: &str) -> crate::Result<Self> {
        let response = reqwest::get(url).await.map_err(|e| {
            crate::Error::openapi(format!("Failed to fetch OpenAPI spec from {}: {}", url, e))
        })?;

        if !response.status().is_success() {
            return Err(crate::Error::openapi(format!(
                "Failed to fetch OpenAPI spec from {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let content = response.text().await.map_err(|e| {
            crate::Error::openapi(format!("Failed to read response from {}: {}", url, e))
        })?;

        Self::parse_content(&content).map_err(|e| {
            crate::Error::openapi(format!("Failed to parse OpenAPI spec from {}: {}", url, e))
        })
    }

    /// Parse content as either JSON or YAML
    pub fn parse_content(content: &str) -> Result<Self, String> {
        if let Ok(json) = serde_json::from_str(content) {
            return Ok(Self { json });
        }

        // Going through serde_yaml::Value lets integer mapping keys (unquoted
        // status codes) become JSON object keys.
        if let Ok(yaml) = serde_yaml::from_str::<serde_yaml::Value>(content) {
            if let Ok(json) = serde_json::to_value(yaml) {
                return Ok(Self { json });
            }
        }

        Err("content is neither valid JSON nor YAML".to_string())
    }

    /// Get a reference to the raw JSON value
    pub fn as_json(&self) -> &JsonValue {
        &self.json
    }

    /// Get the title of the API
    pub fn title(&self) -> Option<&str> {
        self.json.get("info")?.get("title")?.as_str()
    }

    /// Get the version of the API
    pub fn version(&self) -> Option<&str> {
        self.json.get("info")?.get("version")?.as_str()
    }

    /// Build the typed document.
    ///
    /// Local `$ref`s on parameters, request bodies, responses, response
    /// headers and named examples are inlined first. Schema references are
    /// left as they are. An operation that still cannot be read is kept as a
    /// failure on its path item instead of rejecting the whole document.
    pub fn document(&self) -> crate::Result<OpenApiDocument> {
        let mut json = self.json.clone();
        self.inline_operation_refs(&mut json);
        serde_json::from_value(json)
            .map_err(|e| Error::openapi(format!("Invalid OpenAPI document: {}", e)))
    }

    fn inline_operation_refs(&self, json: &mut JsonValue) {
        let Some(paths) = json.get_mut("paths").and_then(JsonValue::as_object_mut) else {
            return;
        };
        for path_item in paths.values_mut() {
            for method in HttpMethod::ALL {
                let Some(operation) = path_item.get_mut(method.key()) else {
                    continue;
                };
                if let Some(params) = operation
                    .get_mut("parameters")
                    .and_then(JsonValue::as_array_mut)
                {
                    for param in params {
                        self.inline_ref(param);
                        self.inline_examples(param);
                    }
                }
                if let Some(body) = operation.get_mut("requestBody") {
                    self.inline_ref(body);
                    self.inline_content(body);
                }
                if let Some(responses) = operation
                    .get_mut("responses")
                    .and_then(JsonValue::as_object_mut)
                {
                    for response in responses.values_mut() {
                        self.inline_ref(response);
                        self.inline_content(response);
                        if let Some(headers) = response
                            .get_mut("headers")
                            .and_then(JsonValue::as_object_mut)
                        {
                            for header in headers.values_mut() {
                                self.inline_ref(header);
                                self.inline_examples(header);
                            }
                        }
                    }
                }
            }
        }
    }

    /// Inline the named examples of every media type in a body's `content`
    fn inline_content(&self, body: &mut JsonValue) {
        if let Some(content) = body.get_mut("content").and_then(JsonValue::as_object_mut) {
            for media in content.values_mut() {
                self.inline_examples(media);
            }
        }
    }

    fn inline_examples(&self, holder: &mut JsonValue) {
        if let Some(examples) = holder
            .get_mut("examples")
            .and_then(JsonValue::as_object_mut)
        {
            for example in examples.values_mut() {
                self.inline_ref(example);
            }
        }
    }

    /// Replace `value` with the target of its local `$ref`, following chains
    fn inline_ref(&self, value: &mut JsonValue) {
        for _ in 0..MAX_REF_DEPTH {
            let Some(reference) = value.get("$ref").and_then(JsonValue::as_str) else {
                return;
            };
            let Some(target) = reference
                .strip_prefix('#')
                .and_then(|pointer| self.json.pointer(pointer))
            else {
                log::warn!("Leaving unresolved reference '{}'", reference);
                return;
            };
            *value = target.clone();
        }
        log::warn!("Gave up resolving $ref chain longer than {}", MAX_REF_DEPTH);
    }
}

/// Typed view of an OpenAPI document, restricted to what the builders read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenApiDocument {
    /// The available paths and operations for the API, in declaration order.
    #[serde(default)]
    pub paths: IndexMap<String, OpenApiPathItem>,
}

impl OpenApiDocument {
    /// Every (path, method, operation) triple, paths first, then methods in
    /// declaration order. Operations that could not be read yield the reason.
    pub fn operations(
        &self,
    ) -> impl Iterator<Item = (&str, HttpMethod, Result<&OpenApiOperation, &str>)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.operations.iter().map(move |(method, operation)| {
                (
                    path.as_str(),
                    *method,
                    operation.as_ref().map_err(String::as_str),
                )
            })
        })
    }
}

/// HTTP methods an OpenAPI path item can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    /// Method token written into templates (e.g. "Get")
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "Get",
            HttpMethod::Put => "Put",
            HttpMethod::Post => "Post",
            HttpMethod::Delete => "Delete",
            HttpMethod::Options => "Options",
            HttpMethod::Head => "Head",
            HttpMethod::Patch => "Patch",
            HttpMethod::Trace => "Trace",
        }
    }

    /// Path item key declaring this method (e.g. "get")
    pub fn key(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operations declared on a single path, in declaration order.
///
/// Path item keys that are not HTTP methods (`summary`, `parameters`,
/// `servers`, extensions) are ignored. An operation that fails to
/// deserialize is kept as `Err` with a description of the problem.
#[derive(Debug, Clone, Default)]
pub struct OpenApiPathItem {
    pub operations: IndexMap<HttpMethod, Result<OpenApiOperation, String>>,
}

impl<'de> Deserialize<'de> for OpenApiPathItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, JsonValue>::deserialize(deserializer)?;
        let mut operations = IndexMap::new();
        for (key, value) in raw {
            if let Some(method) = HttpMethod::from_key(&key) {
                let operation = serde_json::from_value::<OpenApiOperation>(value.clone())
                    .map_err(|e| describe_operation_error(&value, e));
                operations.insert(method, operation);
            }
        }
        Ok(Self { operations })
    }
}

/// Point at the offending parameter when one is the cause, so the failure
/// can be located without the raw serde path.
fn describe_operation_error(operation: &JsonValue, err: serde_json::Error) -> String {
    let params = operation
        .get("parameters")
        .and_then(JsonValue::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for (index, param) in params.iter().enumerate() {
        if let Err(param_err) = serde_json::from_value::<OpenApiParameter>(param.clone()) {
            let label = match (
                param.get("$ref").and_then(JsonValue::as_str),
                param.get("name").and_then(JsonValue::as_str),
            ) {
                (Some(reference), _) => format!("unresolved reference '{}'", reference),
                (None, Some(name)) => format!("'{}'", name),
                (None, None) => "without a name".to_string(),
            };
            return format!("parameter #{} ({}) is invalid: {}", index, label, param_err);
        }
    }
    format!("operation could not be read: {}", err)
}

/// A single API operation on a path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApiOperation {
    /// Unique string used to identify the operation. The id MUST be unique among all operations described in the API.
    pub operation_id: Option<String>,
    /// A short summary of what the operation does.
    pub summary: Option<String>,
    /// A verbose explanation of the operation behavior.
    pub description: Option<String>,
    /// A list of tags for API documentation control.
    #[serde(default)]
    pub tags: Vec<String>,
    /// A list of parameters that are applicable for this operation.
    #[serde(default)]
    pub parameters: Vec<OpenApiParameter>,
    /// The request body applicable for this operation.
    pub request_body: Option<OpenApiRequestBody>,
    /// The list of possible responses keyed by status code, in declaration order.
    #[serde(default)]
    pub responses: IndexMap<String, OpenApiResponse>,
    /// Declares this operation to be deprecated.
    pub deprecated: Option<bool>,
}

/// The location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

/// Information about a single parameter in an OpenAPI operation.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenApiParameter {
    /// The name of the parameter. Parameter names are case sensitive.
    pub name: String,
    /// The location of the parameter.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// A brief description of the parameter.
    pub description: Option<String>,
    /// Determines whether this parameter is mandatory. Defaults to false.
    #[serde(default)]
    pub required: bool,
    /// The schema defining the type used for the parameter.
    pub schema: Option<OpenApiSchema>,
    /// Example of the parameter's potential value.
    pub example: Option<JsonValue>,
    /// Named examples of the parameter's potential value.
    pub examples: Option<IndexMap<String, OpenApiExample>>,
}

/// Declared `type` of a schema; OpenAPI 3.1 allows a list of types.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

/// The parts of a Schema Object the builders read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenApiSchema {
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,
    pub format: Option<String>,
    /// Names of the properties that must be present.
    #[serde(default)]
    pub required: Vec<String>,
    /// Free-form example of an instance of this schema.
    pub example: Option<JsonValue>,
    /// Unresolved schema reference, if this schema is one.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
}

impl OpenApiSchema {
    /// The declared type, skipping `"null"` in 3.1 type lists.
    pub fn declared_type(&self) -> Option<&str> {
        match self.schema_type.as_ref()? {
            SchemaType::Single(t) => Some(t.as_str()),
            SchemaType::Multiple(types) => types
                .iter()
                .map(String::as_str)
                .find(|t| *t != "null"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenApiRequestBody {
    /// A brief description of the request body.
    pub description: Option<String>,
    /// The content of the request body keyed by media type.
    #[serde(default)]
    pub content: IndexMap<String, OpenApiMediaType>,
    #[serde(default)]
    pub required: bool,
}

/// Describes one media type of a request or response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenApiMediaType {
    pub schema: Option<OpenApiSchema>,
    pub example: Option<JsonValue>,
    pub examples: Option<IndexMap<String, OpenApiExample>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenApiResponse {
    /// A short description of the response.
    pub description: Option<String>,
    /// Maps a header name to its definition.
    #[serde(default)]
    pub headers: IndexMap<String, OpenApiHeader>,
    /// Potential response payloads keyed by media type.
    #[serde(default)]
    pub content: IndexMap<String, OpenApiMediaType>,
}

/// A response header; the name is the key it is declared under.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenApiHeader {
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub schema: Option<OpenApiSchema>,
    pub example: Option<JsonValue>,
    pub examples: Option<IndexMap<String, OpenApiExample>>,
}

/// An OpenAPI Example Object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApiExample {
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Embedded literal example; `null` when only `externalValue` is given.
    #[serde(default)]
    pub value: JsonValue,
    pub external_value: Option<String>,
}

/// Anything carrying an example slot: a single example and/or named examples.
pub trait ExampleSlot {
    fn example(&self) -> Option<&JsonValue>;
    fn examples(&self) -> Option<&IndexMap<String, OpenApiExample>>;
}

macro_rules! impl_example_slot {
    ($($ty:ty),*) => {
        $(impl ExampleSlot for $ty {
            fn example(&self) -> Option<&JsonValue> {
                self.example.as_ref()
            }

            fn examples(&self) -> Option<&IndexMap<String, OpenApiExample>> {
                self.examples.as_ref()
            }
        })*
    };
}

impl_example_slot!(OpenApiParameter, OpenApiHeader, OpenApiMediaType);
