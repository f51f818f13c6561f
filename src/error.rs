//! Error taxonomy for the generation pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while fetching the API definition or writing generated
/// sources. Transport and filesystem errors pass through unchanged; there
/// are no retries and no partial recovery anywhere in the pipeline.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The metadata endpoint answered with something other than JSON.
    #[error("unexpected content type: {content_type:?}")]
    ContentType { content_type: Option<String> },

    /// The response body was not a usable API definition (unparsable, or
    /// missing `types`/`services`). Carries the raw decoded body so the
    /// offending payload can be inspected.
    #[error("unexpected response: {body}")]
    MalformedResponse { body: String },

    /// The service folder destination exists but is not a directory.
    #[error("path {} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
