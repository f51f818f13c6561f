//! Generate TypeScript API clients from a backend metadata endpoint.
//!
//! The pipeline fetches a JSON API definition (shared types plus services
//! with operations), renders one file of shared type declarations and one
//! client class file per service, and hands the results to prettier. Call
//! emission is delegated to a caller-supplied [`PlatformConfig`], so the
//! same generator serves any HTTP layer.
#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

mod definition;
mod error;
mod fetch;
mod format;
mod generator;
mod platform;
mod services;
mod typefile;

pub use definition::{ApiDefinition, Operation, PathParam, ServiceDefinition, TypeDefinition};
pub use error::GenerateError;
pub use fetch::fetch_api_definition;
pub use generator::{ApiGenerator, GeneratorOptions};
pub use platform::{PlatformConfig, RenderCallFn};
pub use services::generate_service_folder;
pub use typefile::generate_type_file;
