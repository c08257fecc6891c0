//! apimtemplate CLI entrypoint
//! Parses command-line arguments and dispatches to the core generator.

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use apimtemplate_core::Config;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "apimtemplate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Create API Management operation templates from an OpenAPI spec
    Create {
        /// Path or URL to OpenAPI document (YAML or JSON)
        ///
        /// Example: --openapi path/to/openapi.yaml
        /// Example: --openapi https://example.com/openapi.json
        #[arg(long)]
        openapi: Option<String>,
        /// File the deployment template is written to
        #[arg(long)]
        output: Option<PathBuf>,
        /// YAML configuration file; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
        /// Resource provider version stamped on every operation
        #[arg(long)]
        api_version: Option<String>,
        /// Abort on the first malformed operation instead of skipping it
        #[arg(long)]
        fail_fast: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Create {
            openapi,
            output,
            config,
            api_version,
            fail_fast,
        } => {
            let mut config = match config {
                Some(path) => Config::from_file(&path)
                    .await
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => {
                    let openapi = openapi
                        .clone()
                        .context("--openapi is required without --config")?;
                    let output = output
                        .clone()
                        .context("--output is required without --config")?;
                    Config::new(openapi, output.to_string_lossy())
                }
            };
            if let Some(openapi) = openapi {
                config.openapi_source = openapi;
            }
            if let Some(output) = output {
                config.output_file = output.to_string_lossy().to_string();
            }
            if let Some(api_version) = api_version {
                config.api_version = api_version;
            }
            config.fail_fast |= fail_fast;

            tracing::debug!(?config, "Resolved configuration");

            let summary = apimtemplate_core::generate(&config)
                .await
                .context("Failed to generate operation templates")?;

            for skipped in &summary.skipped {
                tracing::warn!("Skipped: {}", skipped);
            }
            println!(
                "Wrote {} operation templates to {} ({} skipped)",
                summary.written,
                config.output_file,
                summary.skipped.len()
            );
        }
    }
    Ok(())
}
