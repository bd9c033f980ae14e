//! `dk delete` — remove a project and everything on it.
//!
//! Deletion runs in two backend steps, tasks first, so a stray row can
//! never outlive its project. When a step fails the error names which
//! step broke; partial damage is visible on the next `dk list`.

use clap::Args;

use deck_core::backend::{AuthBackend, Backend};
use deck_core::store::DomainStore;

use crate::guard;
use crate::output::{OutputMode, render_success};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Project id or name.
    pub project: String,
}

pub fn run_delete<B: Backend + AuthBackend>(
    args: &DeleteArgs,
    backend: B,
    output: OutputMode,
) -> anyhow::Result<()> {
    guard::require_session(&backend, output)?;

    let mut store = DomainStore::new(backend);
    store
        .load()
        .map_err(|err| super::store_failure(output, &err))?;

    let project_id = super::resolve_project_id(&store, &args.project, output)?;
    let removed = store
        .delete_project(project_id)
        .map_err(|err| super::store_failure(output, &err))?;

    render_success(output, &format!("Deleted project \"{}\"", removed.name))
}
