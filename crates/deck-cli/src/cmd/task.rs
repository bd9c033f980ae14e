//! `dk task` — add and remove tasks on a project.

use clap::{Args, Subcommand};

use deck_core::backend::{AuthBackend, Backend};
use deck_core::store::DomainStore;

use crate::guard;
use crate::output::{OutputMode, render_success};

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Add a task to a project (new tasks start in Todo).
    Add(AddArgs),
    /// Remove a task from a project.
    Rm(RmArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Name of the new task.
    pub name: String,

    /// Project id or name the task belongs to.
    #[arg(short, long)]
    pub project: String,
}

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Task id or name.
    pub task: String,

    /// Project id or name the task belongs to.
    #[arg(short, long)]
    pub project: String,
}

pub fn run_task<B: Backend + AuthBackend>(
    command: &TaskCommand,
    backend: B,
    output: OutputMode,
) -> anyhow::Result<()> {
    match command {
        TaskCommand::Add(args) => run_task_add(args, backend, output),
        TaskCommand::Rm(args) => run_task_rm(args, backend, output),
    }
}

fn run_task_add<B: Backend + AuthBackend>(
    args: &AddArgs,
    backend: B,
    output: OutputMode,
) -> anyhow::Result<()> {
    guard::require_session(&backend, output)?;

    let mut store = DomainStore::new(backend);
    store
        .load()
        .map_err(|err| super::store_failure(output, &err))?;

    let project_id = super::resolve_project_id(&store, &args.project, output)?;
    let task = store
        .add_task(&args.name, project_id)
        .map_err(|err| super::store_failure(output, &err))?;

    render_success(
        output,
        &format!("Added task \"{}\" (id {})", task.name, task.id),
    )
}

fn run_task_rm<B: Backend + AuthBackend>(
    args: &RmArgs,
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
    let removed = store
        .delete_task(task_id, project_id)
        .map_err(|err| super::store_failure(output, &err))?;

    render_success(output, &format!("Removed task \"{}\"", removed.name))
}

#[cfg(test)]
mod tests {
    use super::{AddArgs, RmArgs, TaskCommand, run_task};
    use crate::output::OutputMode;
    use deck_core::backend::AuthBackend as _;
    use deck_core::backend::Backend as _;
    use deck_core::backend::memory::MemoryBackend;
    use deck_core::model::Status;

    fn signed_in() -> MemoryBackend {
        let backend = MemoryBackend::new();
        backend
            .sign_in_with_password("a@example.com", "pw")
            .expect("sign in");
        backend
    }

    #[test]
    fn task_subcommands_parse() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(subcommand)]
            command: TaskCommand,
        }

        let w = Wrapper::parse_from(["test", "add", "Design", "--project", "Launch"]);
        match w.command {
            TaskCommand::Add(args) => {
                assert_eq!(args.name, "Design");
                assert_eq!(args.project, "Launch");
            }
            TaskCommand::Rm(_) => panic!("expected add"),
        }

        let w = Wrapper::parse_from(["test", "rm", "3", "-p", "1"]);
        match w.command {
            TaskCommand::Rm(args) => {
                assert_eq!(args.task, "3");
                assert_eq!(args.project, "1");
            }
            TaskCommand::Add(_) => panic!("expected rm"),
        }
    }

    #[test]
    fn add_puts_the_task_in_todo() {
        let backend = signed_in();
        backend.insert_project("Launch").expect("insert");

        let command = TaskCommand::Add(AddArgs {
            name: "Design".to_string(),
            project: "Launch".to_string(),
        });
        run_task(&command, backend, OutputMode::Text).expect("add");
    }

    #[test]
    fn add_rejects_blank_names() {
        let backend = signed_in();
        backend.insert_project("Launch").expect("insert");

        let command = TaskCommand::Add(AddArgs {
            name: "  ".to_string(),
            project: "Launch".to_string(),
        });
        assert!(run_task(&command, backend, OutputMode::Text).is_err());
    }

    #[test]
    fn rm_resolves_task_by_name() {
        let backend = signed_in();
        let project = backend.insert_project("Launch").expect("insert");
        backend
            .insert_task("Design", Status::Todo, project.id)
            .expect("insert task");

        let command = TaskCommand::Rm(RmArgs {
            task: "design".to_string(),
            project: "Launch".to_string(),
        });
        run_task(&command, backend, OutputMode::Text).expect("rm");
    }

    #[test]
    fn rm_rejects_tasks_from_other_projects() {
        let backend = signed_in();
        let launch = backend.insert_project("Launch").expect("insert");
        backend.insert_project("Ops").expect("insert");
        backend
            .insert_task("Design", Status::Todo, launch.id)
            .expect("insert task");

        let command = TaskCommand::Rm(RmArgs {
            task: "Design".to_string(),
            project: "Ops".to_string(),
        });
        assert!(run_task(&command, backend, OutputMode::Text).is_err());
    }
}
