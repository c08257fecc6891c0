//! Target template model and the deployment template envelope.

mod deployment;
mod types;

pub use deployment::{DeploymentTemplate, DEFAULT_CONTENT_VERSION, DEPLOYMENT_TEMPLATE_SCHEMA};
pub use types::{
    OperationTemplate, OperationTemplateParameter, OperationTemplateProperties,
    OperationTemplateRepresentation, OperationTemplateRequest, OperationTemplateResponse,
};
