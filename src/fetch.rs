//! Fetches and validates the remote API definition.

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};

use crate::definition::{ApiDefinition, RawApiDefinition};
use crate::error::GenerateError;

/// Fetch the API definition with a single GET, no retries. Invalid TLS
/// certificates are accepted: the metadata endpoint is typically an internal
/// host with a self-signed cert.
pub async fn fetch_api_definition(url: &str) -> Result<ApiDefinition, GenerateError> {
    info!(%url, "Fetching API metadata.");

    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .build()?;
    let response = client.get(url).send().await?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    match content_type.as_deref() {
        Some(value) if value.starts_with("application/json") => {}
        _ => return Err(GenerateError::ContentType { content_type }),
    }

    let body = response.text().await?;
    let raw: RawApiDefinition = serde_json::from_str(&body)
        .map_err(|_| GenerateError::MalformedResponse { body: body.clone() })?;

    match (raw.types, raw.services) {
        (Some(types), Some(services)) => {
            debug!(
                types = types.len(),
                services = services.len(),
                "Fetched API definition."
            );
            Ok(ApiDefinition { types, services })
        }
        _ => Err(GenerateError::MalformedResponse { body }),
    }
}
