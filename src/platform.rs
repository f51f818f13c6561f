//! Platform adapter contract.

use std::fmt;
use std::sync::Arc;

/// Renders the expression that performs an HTTP call:
/// `(method, path, params expression, body expression)` → call expression.
pub type RenderCallFn = Arc<dyn Fn(&str, &str, &str, &str) -> String + Send + Sync>;

/// Caller-supplied rendering strategy for one target platform.
///
/// A record of pure functions rather than a trait hierarchy: a fake adapter
/// in tests is a three-field struct literal. One config is supplied per
/// generator run and shared read-only across all per-service render tasks.
#[derive(Clone)]
pub struct PlatformConfig {
    /// Module path the generated `import type { ... }` line points at.
    pub type_file_import_path: String,
    /// Import statement emitted ahead of every service class so the rendered
    /// call expression resolves.
    pub ajax_function_import_statement: String,
    /// Emits the call expression used as each method body.
    pub render_call: RenderCallFn,
}

impl fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("type_file_import_path", &self.type_file_import_path)
            .field(
                "ajax_function_import_statement",
                &self.ajax_function_import_statement,
            )
            .finish_non_exhaustive()
    }
}
