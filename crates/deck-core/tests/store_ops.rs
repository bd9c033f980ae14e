//! End-to-end store behavior against the in-process backend.

use deck_core::backend::Backend as _;
use deck_core::backend::memory::{MemoryBackend, Op};
use deck_core::model::Status;
use deck_core::store::{DomainStore, StoreError};

#[test]
fn added_project_survives_reload_exactly_once() {
    let mut store = DomainStore::new(MemoryBackend::new());
    store.add_project("Launch").expect("add project");

    store.load().expect("reload");

    let matches: Vec<_> = store
        .projects()
        .iter()
        .filter(|p| p.name == "Launch")
        .collect();
    assert_eq!(matches.len(), 1);
    assert!(matches[0].tasks.is_empty());
}

#[test]
fn names_are_trimmed_before_insertion() {
    let mut store = DomainStore::new(MemoryBackend::new());
    let id = store.add_project("  Launch  ").expect("add project").id;
    assert_eq!(store.project(id).map(|p| p.name.as_str()), Some("Launch"));
}

#[test]
fn empty_names_are_rejected_without_any_backend_call() {
    let mut store = DomainStore::new(MemoryBackend::new());
    let project_id = store.add_project("Launch").expect("add project").id;
    let calls_before = store.backend().total_calls();

    assert!(matches!(
        store.add_project("   "),
        Err(StoreError::EmptyName)
    ));
    assert!(matches!(
        store.add_task("", project_id),
        Err(StoreError::EmptyName)
    ));

    // No persistence call and no state change.
    assert_eq!(store.backend().total_calls(), calls_before);
    assert_eq!(store.projects().len(), 1);
    assert!(store.project(project_id).expect("project").tasks.is_empty());
}

#[test]
fn deleting_an_empty_project_removes_exactly_that_project() {
    let mut store = DomainStore::new(MemoryBackend::new());
    let keep = store.add_project("Keep").expect("add").id;
    let gone = store.add_project("Drop").expect("add").id;

    store.delete_project(gone).expect("delete");

    assert_eq!(store.projects().len(), 1);
    assert_eq!(store.projects()[0].id, keep);

    store.load().expect("reload");
    assert_eq!(store.projects().len(), 1);
    assert_eq!(store.projects()[0].id, keep);
}

#[test]
fn full_lifecycle_scenario() {
    let mut store = DomainStore::new(MemoryBackend::new());
    assert!(store.projects().is_empty());

    let launch_id = store.add_project("Launch").expect("add project").id;
    assert_eq!(store.projects().len(), 1);
    assert_eq!(store.projects()[0].name, "Launch");
    assert!(store.projects()[0].tasks.is_empty());

    let design_id = store.add_task("Design", launch_id).expect("add task").id;
    {
        let project = store.project(launch_id).expect("project");
        assert_eq!(project.tasks.len(), 1);
        assert_eq!(project.tasks[0].name, "Design");
        assert_eq!(project.tasks[0].status, Status::Todo);
    }

    let next = store.advance_task(design_id, launch_id).expect("advance");
    assert_eq!(next, Status::InProgress);
    assert_eq!(
        store
            .project(launch_id)
            .and_then(|p| p.task(design_id))
            .map(|t| t.status),
        Some(Status::InProgress)
    );

    store.delete_task(design_id, launch_id).expect("delete task");
    assert!(store.project(launch_id).expect("project").tasks.is_empty());
}

#[test]
fn advance_uses_the_cached_status() {
    let backend = MemoryBackend::new();
    let mut store = DomainStore::new(backend);
    let project_id = store.add_project("Launch").expect("add").id;
    let task_id = store.add_task("Design", project_id).expect("add task").id;

    // An external writer moves the task remotely; the store does not
    // re-read before advancing, so its cached Todo still drives the cycle.
    store
        .backend()
        .update_task_status(task_id, Status::Done)
        .expect("external update");

    let next = store.advance_task(task_id, project_id).expect("advance");
    assert_eq!(next, Status::InProgress);

    // Last write wins remotely as well.
    store.load().expect("reload");
    assert_eq!(
        store
            .project(project_id)
            .and_then(|p| p.task(task_id))
            .map(|t| t.status),
        Some(Status::InProgress)
    );
}

#[test]
fn unknown_ids_are_reported_distinctly() {
    let mut store = DomainStore::new(MemoryBackend::new());
    let project_id = store.add_project("Launch").expect("add").id;

    assert!(matches!(
        store.delete_project(99),
        Err(StoreError::ProjectNotFound(99))
    ));
    assert!(matches!(
        store.add_task("Design", 99),
        Err(StoreError::ProjectNotFound(99))
    ));
    assert!(matches!(
        store.delete_task(42, project_id),
        Err(StoreError::TaskNotFound { task_id: 42, .. })
    ));
    assert!(matches!(
        store.advance_task(42, project_id),
        Err(StoreError::TaskNotFound { task_id: 42, .. })
    ));
}

#[test]
fn load_groups_tasks_under_their_projects() {
    let seed = MemoryBackend::new();
    let a = seed.insert_project("A").expect("insert").id;
    let b = seed.insert_project("B").expect("insert").id;
    seed.insert_task("a1", Status::Todo, a).expect("insert");
    seed.insert_task("b1", Status::Done, b).expect("insert");
    seed.insert_task("a2", Status::InProgress, a).expect("insert");

    let mut store = DomainStore::new(seed);
    store.load().expect("load");

    let project_a = store.project(a).expect("project a");
    let project_b = store.project(b).expect("project b");
    assert_eq!(project_a.tasks.len(), 2);
    assert_eq!(project_b.tasks.len(), 1);
    assert_eq!(project_a.status_counts().in_progress, 1);
    assert_eq!(project_b.status_counts().done, 1);

    // Reload is idempotent.
    store.load().expect("reload");
    assert_eq!(store.project(a).expect("project a").tasks.len(), 2);
    assert_eq!(store.backend().calls(Op::SelectProjects), 2);
}
