//! Operation, request and response template construction.

use indexmap::IndexMap;

use super::parameters::{map_headers, map_parameters};
use super::representations::map_representations;
use super::OperationLocation;
use crate::config::TemplateSettings;
use crate::openapi::{
    HttpMethod, OpenApiDocument, OpenApiOperation, OpenApiResponse, ParameterLocation,
};
use crate::templates::{
    OperationTemplate, OperationTemplateProperties, OperationTemplateRequest,
    OperationTemplateResponse,
};
use crate::Error;

/// Converts OpenAPI operations into API Management operation templates.
#[derive(Debug, Clone, Default)]
pub struct OperationTemplateCreator {
    settings: TemplateSettings,
}

/// Outcome of a fail-soft conversion
#[derive(Debug, Default)]
pub struct ConversionReport {
    /// Converted operations, in document order
    pub templates: Vec<OperationTemplate>,
    /// One entry per skipped operation
    pub failures: Vec<Error>,
}

impl ConversionReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl OperationTemplateCreator {
    pub fn new(settings: TemplateSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &TemplateSettings {
        &self.settings
    }

    /// Build one template per (path, method) pair, stopping at the first
    /// malformed operation.
    pub fn create_operation_templates(
        &self,
        document: &OpenApiDocument,
    ) -> crate::Result<Vec<OperationTemplate>> {
        document
            .operations()
            .map(|(path, method, operation)| self.convert_entry(path, method, operation))
            .collect()
    }

    /// Build templates for every convertible operation, skipping and
    /// reporting the malformed ones.
    pub fn create_operation_templates_lenient(
        &self,
        document: &OpenApiDocument,
    ) -> ConversionReport {
        let mut report = ConversionReport::default();
        for (path, method, operation) in document.operations() {
            match self.convert_entry(path, method, operation) {
                Ok(template) => report.templates.push(template),
                Err(e) => {
                    log::warn!("Skipping operation: {}", e);
                    report.failures.push(e);
                }
            }
        }
        report
    }

    fn convert_entry(
        &self,
        path: &str,
        method: HttpMethod,
        operation: Result<&OpenApiOperation, &str>,
    ) -> crate::Result<OperationTemplate> {
        let operation =
            operation.map_err(|reason| Error::malformed(path, method.as_str(), reason))?;
        self.create_operation_template(path, method, operation)
    }

    pub fn create_operation_template(
        &self,
        path: &str,
        method: HttpMethod,
        operation: &OpenApiOperation,
    ) -> crate::Result<OperationTemplate> {
        let at = OperationLocation { path, method };
        let name = operation
            .operation_id
            .clone()
            .ok_or_else(|| at.malformed("operation has no operationId"))?;

        let template = OperationTemplate {
            resource_type: self.settings.resource_type.clone(),
            api_version: self.settings.api_version.clone(),
            properties: OperationTemplateProperties {
                method: method.as_str().to_string(),
                url_template: path.to_string(),
                description: operation.description.clone(),
                display_name: operation.summary.clone(),
                template_parameters: map_parameters(&operation.parameters, &at)?,
                responses: create_operation_responses(&operation.responses, &at)?,
                request: create_operation_request(operation, &at)?,
                policies: None,
            },
            name,
        };
        log::debug!("Converted {} {} into operation '{}'", method, path, template.name);
        Ok(template)
    }
}

/// Query and header parameters plus the request body representations.
pub fn create_operation_request(
    operation: &OpenApiOperation,
    at: &OperationLocation<'_>,
) -> crate::Result<OperationTemplateRequest> {
    let located = |location: ParameterLocation| {
        operation
            .parameters
            .iter()
            .filter(move |p| p.location == location)
    };

    Ok(OperationTemplateRequest {
        description: operation
            .request_body
            .as_ref()
            .and_then(|body| body.description.clone()),
        query_parameters: map_parameters(located(ParameterLocation::Query), at)?,
        headers: map_parameters(located(ParameterLocation::Header), at)?,
        representations: operation
            .request_body
            .as_ref()
            .map(|body| map_representations(&body.content, at))
            .transpose()?,
    })
}

/// One response record per status code, in declaration order.
pub fn create_operation_responses(
    responses: &IndexMap<String, OpenApiResponse>,
    at: &OperationLocation<'_>,
) -> crate::Result<Vec<OperationTemplateResponse>> {
    let mut templates = Vec::with_capacity(responses.len());
    for (status_code, response) in responses {
        templates.push(OperationTemplateResponse {
            status_code: status_code.clone(),
            description: response.description.clone(),
            headers: map_headers(&response.headers, at)?,
            representations: map_representations(&response.content, at)?,
        });
    }
    Ok(templates)
}
