//! Deployment template envelope around the generated operations.
//!
//! This module defines the ARM deployment template document the operation
//! templates are written into, plus reading and writing it on disk.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use tokio::fs;

use super::OperationTemplate;

/// Schema URL of an ARM deployment template
pub const DEPLOYMENT_TEMPLATE_SCHEMA: &str =
    "https://schema.management.azure.com/schemas/2015-01-01/deploymentTemplate.json#";

/// Content version stamped on generated templates
pub const DEFAULT_CONTENT_VERSION: &str = "1.0.0.0";

/// The root deployment template document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentTemplate {
    #[serde(rename = "$schema")]
    pub schema: String,

    pub content_version: String,

    /// Template parameters; none are generated
    #[serde(default)]
    pub parameters: JsonMap<String, JsonValue>,

    /// Operation resources in generation order
    #[serde(default)]
    pub resources: Vec<OperationTemplate>,
}

impl Default for DeploymentTemplate {
    fn default() -> Self {
        Self {
            schema: String::from(DEPLOYMENT_TEMPLATE_SCHEMA),
            content_version: String::from(DEFAULT_CONTENT_VERSION),
            parameters: JsonMap::new(),
            resources: Vec::new(),
        }
    }
}

impl DeploymentTemplate {
    /// Wrap the given operations in a template with default metadata
    pub fn with_resources(resources: Vec<OperationTemplate>) -> Self {
        Self {
            resources,
            ..Self::default()
        }
    }

    /// Write the template as pretty-printed JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory can't be created or the file can't be written.
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        log::debug!("Writing deployment template to: {}", path.display());
        fs::write(path, content).await?;
        Ok(())
    }

    /// Read a previously written template.
    pub async fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await.map_err(|e| {
            crate::Error::config(format!(
                "Failed to read deployment template at {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}
