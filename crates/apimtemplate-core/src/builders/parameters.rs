//! Parameter, header and form field mapping.

use indexmap::IndexMap;

use super::examples::ExampleValues;
use super::OperationLocation;
use crate::openapi::{ExampleSlot, OpenApiHeader, OpenApiParameter, OpenApiSchema};
use crate::templates::OperationTemplateParameter;

/// Source descriptions that map onto an [`OperationTemplateParameter`].
pub trait ParameterSource: ExampleSlot {
    fn description(&self) -> Option<&str>;
    fn schema(&self) -> Option<&OpenApiSchema>;
    fn required(&self) -> bool;
}

impl ParameterSource for OpenApiParameter {
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn schema(&self) -> Option<&OpenApiSchema> {
        self.schema.as_ref()
    }

    fn required(&self) -> bool {
        self.required
    }
}

impl ParameterSource for OpenApiHeader {
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn schema(&self) -> Option<&OpenApiSchema> {
        self.schema.as_ref()
    }

    fn required(&self) -> bool {
        self.required
    }
}

/// Map one parameter or header. Every source must carry a schema.
pub fn map_parameter<S: ParameterSource>(
    name: &str,
    source: &S,
    at: &OperationLocation<'_>,
) -> crate::Result<OperationTemplateParameter> {
    let schema = source
        .schema()
        .ok_or_else(|| at.malformed(format!("parameter '{}' has no schema", name)))?;
    let examples = ExampleValues::from_slot(source);

    Ok(OperationTemplateParameter {
        name: name.to_string(),
        description: source.description().map(String::from),
        parameter_type: schema.declared_type().map(String::from),
        required: source.required(),
        values: examples.values(),
        default_value: examples.default_value(),
    })
}

/// Map operation parameters, keeping their declared order.
pub fn map_parameters<'p, I>(
    parameters: I,
    at: &OperationLocation<'_>,
) -> crate::Result<Vec<OperationTemplateParameter>>
where
    I: IntoIterator<Item = &'p OpenApiParameter>,
{
    parameters
        .into_iter()
        .map(|param| map_parameter(&param.name, param, at))
        .collect()
}

/// Map response headers; each header is named by its key.
pub fn map_headers(
    headers: &IndexMap<String, OpenApiHeader>,
    at: &OperationLocation<'_>,
) -> crate::Result<Vec<OperationTemplateParameter>> {
    headers
        .iter()
        .map(|(name, header)| map_parameter(name, header, at))
        .collect()
}

/// Flatten a form body schema's example into one parameter per field.
///
/// The example must map each field name to an object holding its `value`.
/// A schema without an example yields no fields.
pub fn map_form_parameters(
    schema: &OpenApiSchema,
    at: &OperationLocation<'_>,
) -> crate::Result<Vec<OperationTemplateParameter>> {
    let Some(example) = &schema.example else {
        return Ok(Vec::new());
    };
    let fields = example
        .as_object()
        .ok_or_else(|| at.malformed("form body example is not an object of field examples"))?;

    fields
        .iter()
        .map(|(name, field)| {
            let value = field
                .as_object()
                .and_then(|wrapper| wrapper.get("value").or_else(|| wrapper.get("Value")))
                .ok_or_else(|| {
                    at.malformed(format!(
                        "form field example '{}' is not an object with a 'value' or 'Value'",
                        name
                    ))
                })?;
            Ok(OperationTemplateParameter {
                name: name.clone(),
                required: schema.required.iter().any(|r| r == name),
                default_value: Some(value.to_string()),
                ..Default::default()
            })
        })
        .collect()
}
