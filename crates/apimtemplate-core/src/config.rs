//! Configuration management for template generation.
//!
//! This module defines the `Config` struct used by the generation pipeline and
//! the `TemplateSettings` consumed by the operation template builders. The
//! configuration can be loaded from a YAML file or created programmatically.
//!
//! # Examples
//!
//! ```no_run
//! use apimtemplate_core::config::Config;
//!
//! # #[tokio::main]
//! # async fn main() -> apimtemplate_core::Result<()> {
//! // Create a new config programmatically
//! let mut config = Config::new("openapi.yaml", "operations.template.json");
//! config.fail_fast = true;
//!
//! // Or load from a config file
//! let config = Config::from_file("apimtemplate.yaml").await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// ARM resource type of an API Management operation
pub const OPERATION_RESOURCE_TYPE: &str = "Microsoft.ApiManagement/service/apis/operations";

/// API Management resource provider version the templates are written against
pub const DEFAULT_API_VERSION: &str = "2018-06-01-preview";

/// Configuration for template generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path or URL of the OpenAPI document
    pub openapi_source: String,

    /// File the deployment template is written to
    pub output_file: String,

    /// Resource provider version stamped on every operation
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Resource type stamped on every operation
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Abort on the first malformed operation instead of skipping it
    #[serde(default)]
    pub fail_fast: bool,
}

/// Constants stamped on every generated operation template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSettings {
    pub resource_type: String,
    pub api_version: String,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            resource_type: default_resource_type(),
            api_version: default_api_version(),
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new(openapi_source: impl Into<String>, output_file: impl Into<String>) -> Self {
        Self {
            openapi_source: openapi_source.into(),
            output_file: output_file.into(),
            api_version: default_api_version(),
            resource_type: default_resource_type(),
            fail_fast: false,
        }
    }

    /// Load configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Settings handed to the operation template builders
    pub fn settings(&self) -> TemplateSettings {
        TemplateSettings {
            resource_type: self.resource_type.clone(),
            api_version: self.api_version.clone(),
        }
    }

    fn validate(&self) -> crate::Result<()> {
        if self.openapi_source.trim().is_empty() {
            return Err(crate::Error::config("openapi_source must not be empty"));
        }
        if self.output_file.trim().is_empty() {
            return Err(crate::Error::config("output_file must not be empty"));
        }
        if self.api_version.trim().is_empty() {
            return Err(crate::Error::config("api_version must not be empty"));
        }
        Ok(())
    }
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_resource_type() -> String {
    OPERATION_RESOURCE_TYPE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_config_roundtrip() -> crate::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("config.yaml");

        let mut config = Config::new("openapi.json", "out/operations.json");
        config.fail_fast = true;
        config.save(&file_path).await?;

        let loaded = Config::from_file(&file_path).await?;
        assert_eq!(loaded.openapi_source, "openapi.json");
        assert_eq!(loaded.output_file, "out/operations.json");
        assert_eq!(loaded.api_version, DEFAULT_API_VERSION);
        assert_eq!(loaded.resource_type, OPERATION_RESOURCE_TYPE);
        assert!(loaded.fail_fast);

        Ok(())
    }

    #[tokio::test]
    async fn test_defaults_fill_missing_fields() -> crate::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("config.yaml");
        tokio::fs::write(
            &file_path,
            "openapi_source: api.yaml\noutput_file: ops.json\n",
        )
        .await?;

        let loaded = Config::from_file(&file_path).await?;
        assert_eq!(loaded.settings(), TemplateSettings::default());
        assert!(!loaded.fail_fast);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_source_is_rejected() -> crate::Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("config.yaml");
        tokio::fs::write(&file_path, "openapi_source: ''\noutput_file: ops.json\n").await?;

        let err = Config::from_file(&file_path).await.unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
        Ok(())
    }
}
