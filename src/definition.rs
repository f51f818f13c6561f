//! Wire model of the fetched API definition.

use serde::Deserialize;

/// The fetched API definition: every shared type plus every service the
/// backend exposes. Held in memory for the duration of a single run and
/// never persisted.
#[derive(Debug, Clone)]
pub struct ApiDefinition {
    pub types: Vec<TypeDefinition>,
    pub services: Vec<ServiceDefinition>,
}

/// Wire shape with optional fields so the fetcher can tell "present but
/// empty" from "absent". Validation lives in [`crate::fetch`].
#[derive(Debug, Deserialize)]
pub(crate) struct RawApiDefinition {
    pub types: Option<Vec<TypeDefinition>>,
    pub services: Option<Vec<ServiceDefinition>>,
}

/// One shared type declaration. `definition` is an opaque source fragment
/// emitted verbatim, never parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDefinition {
    /// Declaration kind, e.g. `"interface"` or `"type"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub definition: String,
}

/// One service. Maps to exactly one generated file; `name` doubles as the
/// class name and the filename stem.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDefinition {
    pub name: String,
    pub operations: Vec<Operation>,
}

/// One callable endpoint, rendered into one class method.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub name: String,
    pub method: String,
    pub path: String,
    pub path_params: Vec<PathParam>,
    pub request_type: Option<String>,
    pub response_type: String,
}

/// A path parameter of an operation.
#[derive(Debug, Clone, Deserialize)]
pub struct PathParam {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}
