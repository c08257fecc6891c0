//! apimtemplate Core Library
//!
//! This library converts OpenAPI specifications into the API Management
//! operation resources of an Azure Resource Manager deployment template.

pub mod builders;
pub mod config;
pub mod error;
pub mod generate;
pub mod openapi;
pub mod templates;

pub use crate::{
    builders::{ConversionReport, ExampleValues, OperationTemplateCreator},
    config::{Config, TemplateSettings},
    error::{Error, Result},
    generate::{generate, GenerationSummary},
    openapi::{OpenApiContext, OpenApiDocument},
    templates::{DeploymentTemplate, OperationTemplate},
};
