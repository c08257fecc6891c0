//! Operation template records written into the deployment template.
//!
//! Field names are part of the wire contract with Azure Resource Manager and
//! serialize in camelCase. Absent values serialize as `null`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One API Management operation resource
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationTemplate {
    /// The source operation identifier
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub api_version: String,
    pub properties: OperationTemplateProperties,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationTemplateProperties {
    /// Capitalized HTTP method token, e.g. "Get"
    pub method: String,
    /// Source path key, placeholders included
    pub url_template: String,
    pub description: Option<String>,
    pub display_name: Option<String>,
    /// Every operation parameter regardless of location
    pub template_parameters: Vec<OperationTemplateParameter>,
    pub responses: Vec<OperationTemplateResponse>,
    pub request: OperationTemplateRequest,
    /// Policy documents are not generated; always null.
    pub policies: Option<JsonValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationTemplateRequest {
    pub description: Option<String>,
    pub query_parameters: Vec<OperationTemplateParameter>,
    pub headers: Vec<OperationTemplateParameter>,
    /// Null when the operation has no request body
    pub representations: Option<Vec<OperationTemplateRepresentation>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationTemplateResponse {
    pub status_code: String,
    pub description: Option<String>,
    pub headers: Vec<OperationTemplateParameter>,
    pub representations: Vec<OperationTemplateRepresentation>,
}

/// A content-type specific body shape of a request or response
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationTemplateRepresentation {
    pub content_type: String,
    /// Serialized default example
    pub sample: Option<String>,
    /// Schema resources are not generated; always null.
    pub schema_id: Option<String>,
    pub type_name: Option<String>,
    /// Set only for form-encoded content types
    pub form_parameters: Option<Vec<OperationTemplateParameter>>,
}

/// Parameter record shared by template parameters, query parameters,
/// request and response headers, and form fields
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationTemplateParameter {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub parameter_type: Option<String>,
    pub required: bool,
    /// Serialized example values
    pub values: Vec<String>,
    pub default_value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameter_wire_names() {
        let param = OperationTemplateParameter {
            name: "limit".into(),
            parameter_type: Some("integer".into()),
            values: vec!["5".into()],
            default_value: Some("5".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&param).unwrap(),
            json!({
                "name": "limit",
                "description": null,
                "type": "integer",
                "required": false,
                "values": ["5"],
                "defaultValue": "5"
            })
        );
    }

    #[test]
    fn test_operation_wire_names() {
        let op = OperationTemplate {
            name: "listPets".into(),
            resource_type: "Microsoft.ApiManagement/service/apis/operations".into(),
            api_version: "2018-06-01-preview".into(),
            properties: OperationTemplateProperties {
                method: "Get".into(),
                url_template: "/pets".into(),
                ..Default::default()
            },
        };
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["type"], "Microsoft.ApiManagement/service/apis/operations");
        assert_eq!(value["apiVersion"], "2018-06-01-preview");
        assert_eq!(value["properties"]["urlTemplate"], "/pets");
        assert_eq!(value["properties"]["policies"], JsonValue::Null);
        assert_eq!(value["properties"]["request"]["representations"], JsonValue::Null);
        assert_eq!(value["properties"]["request"]["queryParameters"], json!([]));
    }
}
