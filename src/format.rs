//! External formatter collaborator.
//!
//! Formatting is a courtesy pass over freshly generated sources and must
//! never fail a generation run; every failure is logged and swallowed.

use tokio::process::Command;
use tracing::{debug, warn};

/// Extensions prettier is asked to rewrite when formatting a whole folder.
pub(crate) const FORMAT_GLOB_EXTENSIONS: &str = "css,html,js,json,jsx,less,ts,tsx";

/// Run prettier over `target` (a file path or glob), ignoring the outcome.
pub(crate) async fn format_path(target: &str) {
    match Command::new("prettier")
        .arg(target)
        .arg("--write")
        .output()
        .await
    {
        Ok(output) if output.status.success() => {
            debug!(%target, "Formatted generated sources.");
        }
        Ok(output) => {
            warn!(%target, status = %output.status, "Formatter exited with an error.");
        }
        Err(err) => {
            warn!(%target, error = %err, "Failed to run formatter.");
        }
    }
}
