//! Command handlers, one module per `dk` subcommand.

pub mod completions;
pub mod create;
pub mod delete;
pub mod list;
pub mod login;
pub mod logout;
pub mod move_cmd;
pub mod show;
pub mod task;
pub mod whoami;

use deck_core::backend::Backend;
use deck_core::error::ErrorCode;
use deck_core::store::{DomainStore, StoreError};

use crate::output::{CliError, OutputMode, render_error};

/// Render a store failure and turn it into a terminal CLI error.
pub(crate) fn store_failure(output: OutputMode, err: &StoreError) -> anyhow::Error {
    let cli: CliError = err.into();
    if let Err(render_err) = render_error(output, &cli) {
        return render_err;
    }
    anyhow::anyhow!("{}", cli.message)
}

/// Render a not-found failure for a user-supplied project reference.
pub(crate) fn resolve_project_id<B: Backend>(
    store: &DomainStore<B>,
    needle: &str,
    output: OutputMode,
) -> anyhow::Result<i64> {
    store.resolve_project(needle).map(|p| p.id).ok_or_else(|| {
        not_found(output, ErrorCode::ProjectNotFound, "project", needle)
    })
}

/// Render a not-found failure for a user-supplied task reference.
pub(crate) fn resolve_task_id<B: Backend>(
    store: &DomainStore<B>,
    project_id: i64,
    needle: &str,
    output: OutputMode,
) -> anyhow::Result<i64> {
    store
        .resolve_task(project_id, needle)
        .map(|t| t.id)
        .ok_or_else(|| not_found(output, ErrorCode::TaskNotFound, "task", needle))
}

fn not_found(output: OutputMode, code: ErrorCode, kind: &str, needle: &str) -> anyhow::Error {
    let cli = CliError::with_details(
        format!("{kind} '{needle}' not found"),
        code.hint().unwrap_or_default(),
        code.code(),
    );
    if let Err(render_err) = render_error(output, &cli) {
        return render_err;
    }
    anyhow::anyhow!("{}", cli.message)
}
