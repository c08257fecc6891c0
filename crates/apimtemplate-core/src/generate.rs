//! Template generation pipeline: load, convert, write.

use crate::{
    builders::{ConversionReport, OperationTemplateCreator},
    config::Config,
    error::Result,
    openapi::OpenApiContext,
    templates::DeploymentTemplate,
};

/// What a generation run produced
#[derive(Debug)]
pub struct GenerationSummary {
    /// Number of operation templates written
    pub written: usize,
    /// Operations skipped as malformed (always empty with `fail_fast`)
    pub skipped: Vec<crate::Error>,
}

/// Main entry point for template generation
pub async fn generate(config: &Config) -> Result<GenerationSummary> {
    // 1. Load the OpenAPI document
    let spec = OpenApiContext::from_file_or_url(&config.openapi_source).await?;
    log::info!(
        "Loaded OpenAPI document '{}' (version {})",
        spec.title().unwrap_or("untitled"),
        spec.version().unwrap_or("unknown")
    );
    let document = spec.document()?;

    // 2. Convert operations
    let creator = OperationTemplateCreator::new(config.settings());
    let report = if config.fail_fast {
        ConversionReport {
            templates: creator.create_operation_templates(&document)?,
            failures: Vec::new(),
        }
    } else {
        creator.create_operation_templates_lenient(&document)
    };

    // 3. Write the deployment template
    let written = report.templates.len();
    DeploymentTemplate::with_resources(report.templates)
        .save(&config.output_file)
        .await?;
    log::info!(
        "Wrote {} operation templates to {}",
        written,
        config.output_file
    );

    Ok(GenerationSummary {
        written,
        skipped: report.failures,
    })
}
