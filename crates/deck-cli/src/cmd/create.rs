//! `dk create` — create a new project.

use clap::Args;

use deck_core::backend::{AuthBackend, Backend};
use deck_core::store::DomainStore;

use crate::guard;
use crate::output::{OutputMode, render_success};

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Name of the new project.
    #[arg(short, long)]
    pub name: String,
}

pub fn run_create<B: Backend + AuthBackend>(
    args: &CreateArgs,
    backend: B,
    output: OutputMode,
) -> anyhow::Result<()> {
    guard::require_session(&backend, output)?;

    let mut store = DomainStore::new(backend);
    let project = store
        .add_project(&args.name)
        .map_err(|err| super::store_failure(output, &err))?;

    render_success(
        output,
        &format!("Created project \"{}\" (id {})", project.name, project.id),
    )
}
