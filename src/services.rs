//! Generates one client class file per service.
//!
//! The destination folder is deleted and recreated on every run, then all
//! per-service files are rendered and written concurrently. Rendering is
//! pure string assembly; the platform adapter supplies the call expression
//! for each method body.

use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future::try_join_all;
use tracing::info;

use crate::definition::{Operation, ServiceDefinition};
use crate::error::GenerateError;
use crate::format::{self, FORMAT_GLOB_EXTENSIONS};
use crate::platform::PlatformConfig;
use crate::typefile::GENERATED_FILE_COMMENT;

/// Type names that never need importing from the shared type file.
const PRIMITIVE_TYPES: [&str; 4] = ["void", "number", "string", "boolean"];

/// Render and write one file per service into `folder`, replacing whatever
/// the folder held before. An empty service list leaves the filesystem
/// untouched.
///
/// Per-service writes run concurrently with fail-on-first semantics: files
/// already written by sibling tasks are not rolled back, so a failed run can
/// leave the folder partially populated.
pub async fn generate_service_folder(
    services: &[ServiceDefinition],
    folder: &Path,
    platform: &PlatformConfig,
) -> Result<(), GenerateError> {
    if services.is_empty() {
        return Ok(());
    }

    reset_folder(folder).await?;
    info!(folder = %folder.display(), "Generating API service files.");

    let count = AtomicUsize::new(0);
    try_join_all(services.iter().map(|service| {
        let count = &count;
        async move {
            let contents = service_file_contents(service, platform);
            let path = folder.join(format!("{}.ts", service.name));
            tokio::fs::write(&path, contents).await?;
            let finished = count.fetch_add(1, Ordering::Relaxed) + 1;
            info!("({finished}) {} generated", service.name);
            Ok::<(), GenerateError>(())
        }
    }))
    .await?;

    let glob = format!("{}/**/*.{{{FORMAT_GLOB_EXTENSIONS}}}", folder.display());
    format::format_path(&glob).await;
    Ok(())
}

/// Delete-then-recreate the destination folder. A pre-existing non-directory
/// at the path is an error.
async fn reset_folder(folder: &Path) -> Result<(), GenerateError> {
    match tokio::fs::metadata(folder).await {
        Ok(meta) if meta.is_dir() => tokio::fs::remove_dir_all(folder).await?,
        Ok(_) => {
            return Err(GenerateError::NotADirectory {
                path: folder.to_path_buf(),
            });
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err.into()),
    }
    tokio::fs::create_dir_all(folder).await?;
    Ok(())
}

/// Strip one trailing array marker so a `T[]` reference imports as `T`.
fn bare_type_name(name: &str) -> &str {
    name.strip_suffix("[]").unwrap_or(name)
}

/// Every type name an operation references: path params, request body,
/// response.
fn operation_types(operation: &Operation) -> Vec<&str> {
    let mut types: Vec<&str> = operation
        .path_params
        .iter()
        .map(|param| param.ty.as_str())
        .collect();
    if let Some(request_type) = operation.request_type.as_deref() {
        types.push(request_type);
    }
    types.push(&operation.response_type);
    types.into_iter().map(bare_type_name).collect()
}

/// Custom types a service must import: first-seen order, deduplicated,
/// primitives removed. Comparison is exact and case-sensitive, and nothing
/// checks that a referenced type exists in the fetched type list.
fn custom_types(service: &ServiceDefinition) -> Vec<&str> {
    let mut custom = Vec::new();
    for operation in &service.operations {
        for ty in operation_types(operation) {
            if !PRIMITIVE_TYPES.contains(&ty) && !custom.contains(&ty) {
                custom.push(ty);
            }
        }
    }
    custom
}

fn types_import_statement(service: &ServiceDefinition, platform: &PlatformConfig) -> String {
    let custom = custom_types(service);
    if custom.is_empty() {
        String::new()
    } else {
        format!(
            "import type {{ {} }} from \"{}\";",
            custom.join(", "),
            platform.type_file_import_path
        )
    }
}

fn method_declaration(operation: &Operation, platform: &PlatformConfig) -> String {
    let mut parameters: Vec<String> = operation
        .path_params
        .iter()
        .map(|param| format!("{}: {}", param.name, param.ty))
        .collect();
    if let Some(request_type) = operation.request_type.as_deref() {
        parameters.push(format!("request: {request_type}"));
    }

    let request_params = operation
        .path_params
        .iter()
        .map(|param| param.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let request = if operation.request_type.is_some() {
        "request"
    } else {
        "null"
    };
    let call = (platform.render_call)(
        &operation.method,
        &operation.path,
        &request_params,
        request,
    );

    format!(
        "static {}({}): Promise<{}> {{\n    return {};\n}}",
        operation.name,
        parameters.join(", "),
        operation.response_type,
        call
    )
}

fn class_declaration(service: &ServiceDefinition, platform: &PlatformConfig) -> String {
    let methods = service
        .operations
        .iter()
        .map(|operation| method_declaration(operation, platform))
        .collect::<Vec<_>>()
        .join("\n");
    format!("export class {} {{ {} }}", service.name, methods)
}

/// Full contents of one service file: import line (possibly empty), the
/// adapter's import statement, the warning comment, the class.
fn service_file_contents(service: &ServiceDefinition, platform: &PlatformConfig) -> String {
    [
        types_import_statement(service, platform),
        platform.ajax_function_import_statement.clone(),
        GENERATED_FILE_COMMENT.to_string(),
        class_declaration(service, platform),
    ]
    .join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::definition::PathParam;

    fn fake_platform() -> PlatformConfig {
        PlatformConfig {
            type_file_import_path: "../api.d".to_string(),
            ajax_function_import_statement: "import { ajax } from \"../ajax\";".to_string(),
            render_call: Arc::new(|method, path, params, body| {
                format!("ajax(\"{method}\", \"{path}\", [{params}], {body})")
            }),
        }
    }

    fn param(name: &str, ty: &str) -> PathParam {
        PathParam {
            name: name.to_string(),
            ty: ty.to_string(),
        }
    }

    fn operation(
        name: &str,
        path_params: Vec<PathParam>,
        request_type: Option<&str>,
        response_type: &str,
    ) -> Operation {
        Operation {
            name: name.to_string(),
            method: "GET".to_string(),
            path: format!("/{name}"),
            path_params,
            request_type: request_type.map(str::to_string),
            response_type: response_type.to_string(),
        }
    }

    fn service(name: &str, operations: Vec<Operation>) -> ServiceDefinition {
        ServiceDefinition {
            name: name.to_string(),
            operations,
        }
    }

    #[test]
    fn primitive_only_operations_need_no_import() {
        let svc = service(
            "PingService",
            vec![operation(
                "ping",
                vec![param("id", "number"), param("tag", "string")],
                Some("boolean"),
                "void",
            )],
        );

        assert!(custom_types(&svc).is_empty());
        let contents = service_file_contents(&svc, &fake_platform());
        assert!(!contents.contains("import type"));
    }

    #[test]
    fn custom_types_are_deduplicated_in_first_seen_order() {
        let svc = service(
            "UserService",
            vec![
                operation(
                    "getUser",
                    vec![param("id", "UserId")],
                    None,
                    "User",
                ),
                operation("updateUser", vec![param("id", "UserId")], Some("User"), "User"),
                operation("listUsers", vec![], None, "Page"),
            ],
        );

        assert_eq!(custom_types(&svc), vec!["UserId", "User", "Page"]);
    }

    #[test]
    fn array_suffix_resolves_to_the_bare_type() {
        let svc = service(
            "UserService",
            vec![operation("listUsers", vec![], None, "User[]")],
        );

        assert_eq!(custom_types(&svc), vec!["User"]);
        let import = types_import_statement(&svc, &fake_platform());
        assert_eq!(import, "import type { User } from \"../api.d\";");
    }

    #[test]
    fn array_of_primitive_needs_no_import() {
        let svc = service(
            "TagService",
            vec![operation("listTags", vec![], None, "string[]")],
        );

        assert!(custom_types(&svc).is_empty());
    }

    #[test]
    fn unresolved_type_names_pass_through_silently() {
        // Nothing cross-checks references against the declared type list; a
        // dangling name simply becomes an import of a missing symbol.
        let svc = service(
            "GhostService",
            vec![operation("haunt", vec![], None, "NoSuchType")],
        );

        let import = types_import_statement(&svc, &fake_platform());
        assert!(import.contains("NoSuchType"));
    }

    #[test]
    fn method_with_request_type_takes_a_request_parameter() {
        let op = operation(
            "updateUser",
            vec![param("id", "number")],
            Some("UserPatch"),
            "User",
        );

        let method = method_declaration(&op, &fake_platform());
        assert!(method.contains("static updateUser(id: number, request: UserPatch): Promise<User>"));
        assert!(method.contains("ajax(\"GET\", \"/updateUser\", [id], request)"));
    }

    #[test]
    fn method_without_request_type_passes_a_null_body() {
        let op = operation("getUser", vec![param("id", "number")], None, "User");

        let method = method_declaration(&op, &fake_platform());
        assert!(method.contains("static getUser(id: number): Promise<User>"));
        assert!(method.contains("ajax(\"GET\", \"/getUser\", [id], null)"));
    }

    #[test]
    fn method_without_path_params_renders_an_empty_params_expression() {
        let op = operation("listUsers", vec![], None, "User[]");

        let method = method_declaration(&op, &fake_platform());
        assert!(method.contains("static listUsers(): Promise<User[]>"));
        assert!(method.contains("ajax(\"GET\", \"/listUsers\", [], null)"));
    }

    #[test]
    fn service_without_operations_renders_an_empty_class_body() {
        let svc = service("EmptyService", vec![]);

        let contents = service_file_contents(&svc, &fake_platform());
        assert!(contents.contains("export class EmptyService {  }"));
        assert!(contents.contains(GENERATED_FILE_COMMENT));
        assert!(contents.contains("import { ajax } from \"../ajax\";"));
    }

    #[tokio::test]
    async fn empty_service_list_leaves_the_filesystem_untouched() {
        let dir = TempDir::new().unwrap();
        let folder = dir.path().join("services");

        generate_service_folder(&[], &folder, &fake_platform())
            .await
            .unwrap();

        assert!(!folder.exists());
    }

    #[tokio::test]
    async fn writes_one_file_per_service() {
        let dir = TempDir::new().unwrap();
        let folder = dir.path().join("services");
        let services = vec![
            service("UserService", vec![operation("getUser", vec![], None, "User")]),
            service("OrderService", vec![]),
        ];

        generate_service_folder(&services, &folder, &fake_platform())
            .await
            .unwrap();

        assert!(folder.join("UserService.ts").is_file());
        assert!(folder.join("OrderService.ts").is_file());
        let contents = std::fs::read_to_string(folder.join("UserService.ts")).unwrap();
        assert!(contents.contains("export class UserService"));
        assert!(contents.contains("import type { User }"));
    }

    #[tokio::test]
    async fn pre_existing_folder_is_replaced_wholesale() {
        let dir = TempDir::new().unwrap();
        let folder = dir.path().join("services");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join("Stale.ts"), "old").unwrap();

        let services = vec![service("UserService", vec![])];
        generate_service_folder(&services, &folder, &fake_platform())
            .await
            .unwrap();

        assert!(!folder.join("Stale.ts").exists());
        assert!(folder.join("UserService.ts").is_file());
    }

    #[tokio::test]
    async fn pre_existing_file_at_the_folder_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let folder = dir.path().join("services");
        std::fs::write(&folder, "not a directory").unwrap();

        let services = vec![service("UserService", vec![])];
        let err = generate_service_folder(&services, &folder, &fake_platform())
            .await
            .unwrap_err();

        match err {
            GenerateError::NotADirectory { path } => assert_eq!(path, folder),
            other => panic!("expected NotADirectory error, got {other:?}"),
        }
        // The offending file is left alone and nothing else is written.
        assert_eq!(
            std::fs::read_to_string(&folder).unwrap(),
            "not a directory"
        );
    }

    #[tokio::test]
    async fn a_failing_service_write_fails_the_run_without_rollback() {
        let dir = TempDir::new().unwrap();
        let folder = dir.path().join("services");
        // A name with a path separator targets a subdirectory that was never
        // created, so this write fails while siblings may succeed.
        let services = vec![
            service("UserService", vec![]),
            service("nested/BadService", vec![]),
        ];

        let result = generate_service_folder(&services, &folder, &fake_platform()).await;

        assert!(result.is_err());
        // The folder itself survives; sibling output, if any, stays on disk.
        assert!(folder.is_dir());
    }
}
