//! `dk list` — all projects with per-status task counts.

use serde::Serialize;

use deck_core::backend::{AuthBackend, Backend};
use deck_core::store::DomainStore;

use crate::guard;
use crate::output::{OutputMode, pretty_section, render_mode};

#[derive(Debug, Serialize)]
struct ProjectLine {
    id: i64,
    name: String,
    todo: usize,
    in_progress: usize,
    done: usize,
}

pub fn run_list<B: Backend + AuthBackend>(backend: B, output: OutputMode) -> anyhow::Result<()> {
    guard::require_session(&backend, output)?;

    let mut store = DomainStore::new(backend);
    store
        .load()
        .map_err(|err| super::store_failure(output, &err))?;

    let lines: Vec<ProjectLine> = store
        .projects()
        .iter()
        .map(|project| {
            let counts = project.status_counts();
            ProjectLine {
                id: project.id,
                name: project.name.clone(),
                todo: counts.todo,
                in_progress: counts.in_progress,
                done: counts.done,
            }
        })
        .collect();

    render_mode(
        output,
        &lines,
        |lines, w| {
            for line in lines {
                writeln!(
                    w,
                    "{}\t{}\t{}\t{}\t{}",
                    line.id, line.name, line.todo, line.in_progress, line.done
                )?;
            }
            Ok(())
        },
        |lines, w| {
            pretty_section(w, "PROJECTS")?;
            if lines.is_empty() {
                writeln!(w, "  (no projects yet — `dk create --name <name>`)")?;
                return Ok(());
            }
            for line in lines {
                writeln!(
                    w,
                    "  {:>4}  {:<28} Todo: {} | In Progress: {} | Done: {}",
                    line.id, line.name, line.todo, line.in_progress, line.done
                )?;
            }
            Ok(())
        },
    )
}
