//! Request and response body representations.

use indexmap::IndexMap;

use super::examples::ExampleValues;
use super::parameters::map_form_parameters;
use super::OperationLocation;
use crate::openapi::OpenApiMediaType;
use crate::templates::OperationTemplateRepresentation;

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Exact match against the two form-encoded media types.
pub fn is_form_content_type(content_type: &str) -> bool {
    content_type == FORM_URLENCODED || content_type == MULTIPART_FORM_DATA
}

/// Map a content map into representations, one per media type, in order.
pub fn map_representations(
    content: &IndexMap<String, OpenApiMediaType>,
    at: &OperationLocation<'_>,
) -> crate::Result<Vec<OperationTemplateRepresentation>> {
    content
        .iter()
        .map(|(content_type, media)| map_representation(content_type, media, at))
        .collect()
}

fn map_representation(
    content_type: &str,
    media: &OpenApiMediaType,
    at: &OperationLocation<'_>,
) -> crate::Result<OperationTemplateRepresentation> {
    // Form bodies always get a field list, possibly empty; others get none.
    let form_parameters = if is_form_content_type(content_type) {
        match &media.schema {
            Some(schema) => Some(map_form_parameters(schema, at)?),
            None => Some(Vec::new()),
        }
    } else {
        None
    };

    Ok(OperationTemplateRepresentation {
        content_type: content_type.to_string(),
        sample: ExampleValues::from_slot(media).default_value(),
        schema_id: None,
        type_name: media
            .schema
            .as_ref()
            .and_then(|schema| schema.declared_type())
            .map(String::from),
        form_parameters,
    })
}
