//! Orchestrates fetch and generation, and owns process-exit semantics.

use std::path::PathBuf;

use tracing::error;

use crate::error::GenerateError;
use crate::fetch::fetch_api_definition;
use crate::platform::PlatformConfig;
use crate::services::generate_service_folder;
use crate::typefile::generate_type_file;

/// Construction-time configuration for one generator run. All fields are
/// required; there are no defaults and no CLI surface.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// URL of the backend endpoint serving the API definition document.
    pub metadata_endpoint_url: String,
    /// Destination of the shared type declarations file.
    pub type_file_path: PathBuf,
    /// Destination folder for the per-service client files.
    pub service_folder_path: PathBuf,
    /// Rendering strategy for the target platform.
    pub platform_config: PlatformConfig,
}

/// Fetches the API definition and regenerates the type file and the service
/// folder from it.
#[derive(Debug)]
pub struct ApiGenerator {
    options: GeneratorOptions,
}

impl ApiGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    /// Run the full pipeline, logging any failure and terminating the
    /// process with exit status 1. Everything below this method returns
    /// `Result` and is testable without a process boundary.
    pub async fn run(&self) {
        if let Err(err) = self.execute().await {
            error!(error = %err, "API generation failed.");
            std::process::exit(1);
        }
    }

    /// Fetch the API definition, then generate the type file and the service
    /// folder concurrently. The two generators share nothing but the fetched
    /// definition, which is read-only from here on. Service files already
    /// written when a sibling task fails stay on disk.
    pub async fn execute(&self) -> Result<(), GenerateError> {
        let definition = fetch_api_definition(&self.options.metadata_endpoint_url).await?;
        tokio::try_join!(
            generate_type_file(&definition.types, &self.options.type_file_path),
            generate_service_folder(
                &definition.services,
                &self.options.service_folder_path,
                &self.options.platform_config,
            ),
        )?;
        Ok(())
    }
}
