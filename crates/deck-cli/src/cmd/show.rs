//! `dk show` — one project's tasks, grouped by status column.

use clap::Args;

use deck_core::backend::{AuthBackend, Backend};
use deck_core::model::Status;
use deck_core::store::DomainStore;

use crate::guard;
use crate::output::{OutputMode, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Project id or name.
    pub project: String,
}

pub fn run_show<B: Backend + AuthBackend>(
    args: &ShowArgs,
    backend: B,
    output: OutputMode,
) -> anyhow::Result<()> {
    guard::require_session(&backend, output)?;

    let mut store = DomainStore::new(backend);
    store
        .load()
        .map_err(|err| super::store_failure(output, &err))?;

    let project_id = super::resolve_project_id(&store, &args.project, output)?;
    let project = store
        .project(project_id)
        .expect("resolved project is present")
        .clone();

    render_mode(
        output,
        &project,
        |project, w| {
            for task in &project.tasks {
                writeln!(w, "{}\t{}\t{}", task.id, task.name, task.status)?;
            }
            Ok(())
        },
        |project, w| {
            pretty_section(w, &project.name)?;
            for status in Status::ALL {
                writeln!(w, "{status}:")?;
                let mut any = false;
                for task in project.tasks_with_status(status) {
                    writeln!(w, "  {:>4}  {}", task.id, task.name)?;
                    any = true;
                }
                if !any {
                    writeln!(w, "  (none)")?;
                }
            }
            Ok(())
        },
    )
}
