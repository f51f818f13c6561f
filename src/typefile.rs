//! Renders the shared type declarations into a single source file.

use std::path::Path;

use tracing::info;

use crate::definition::TypeDefinition;
use crate::error::GenerateError;
use crate::format;

/// First line of every generated file.
pub(crate) const GENERATED_FILE_COMMENT: &str =
    "// Attention: This file is auto-generated, do not modify";

/// One export line per declaration under the warning comment.
fn render_type_file(types: &[TypeDefinition]) -> String {
    let mut lines = Vec::with_capacity(types.len() + 1);
    lines.push(GENERATED_FILE_COMMENT.to_string());
    for ty in types {
        lines.push(format!("export {} {} {}", ty.kind, ty.name, ty.definition));
    }
    lines.join("\n")
}

/// Write all shared type declarations to `path`. An empty declaration list
/// writes nothing at all.
pub async fn generate_type_file(
    types: &[TypeDefinition],
    path: &Path,
) -> Result<(), GenerateError> {
    if types.is_empty() {
        return Ok(());
    }
    info!(path = %path.display(), "Generating API type file.");

    tokio::fs::write(path, render_type_file(types)).await?;

    format::format_path(&path.to_string_lossy()).await;
    Ok(())
}
