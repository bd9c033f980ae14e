//! `dk move` — advance a task one step around the status cycle.

use clap::Args;

use deck_core::backend::{AuthBackend, Backend};
use deck_core::store::DomainStore;

use crate::guard;
use crate::output::{OutputMode, render_success};

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Task id or name.
    pub task: String,

    /// Project id or name the task belongs to.
    #[arg(short, long)]
    pub project: String,
}

pub fn run_move<B: Backend + AuthBackend>(
    args: &MoveArgs,
    backend: B,
    output: OutputMode,
) -> anyhow::Result<()> {
    guard::require_session(&backend, output)?;

    let mut store = DomainStore::new(backend);
    store
        .load()
        .map_err(|err| super::store_failure(output, &err))?;

    let project_id = super::resolve_project_id(&store, &args.project, output)?;
    let task_id = super::resolve_task_id(&store, project_id, &args.task, output)?;
    let status = store
        .advance_task(task_id, project_id)
        .map_err(|err| super::store_failure(output, &err))?;

    render_success(output, &format!("Task {task_id} is now {status}"))
}
