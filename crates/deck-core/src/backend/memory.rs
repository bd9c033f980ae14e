//! In-process backend for tests and offline simulation.
//!
//! Behaves like the remote row store: ids are assigned monotonically,
//! task inserts enforce the `project_id` foreign key, and deletes of
//! missing rows succeed (the remote treats them as matching zero rows).
//!
//! # Fault injection
//!
//! Tests arm per-operation faults with [`MemoryBackend::fail_on`]; an armed
//! operation fails with a transport error until cleared. Calls are counted
//! per operation so tests can assert that a rejected validation issued no
//! persistence call at all.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::{AuthBackend, Backend, BackendError, ProjectRow, TaskRow};
use crate::model::Status;
use crate::session::Session;

/// One backend operation, used as the fault-injection and call-count key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    SelectProjects,
    SelectTasks,
    InsertProject,
    InsertTask,
    UpdateTaskStatus,
    DeleteProjectTasks,
    DeleteProject,
    DeleteTask,
    GetSession,
    SignIn,
}

#[derive(Debug, Default)]
struct Inner {
    projects: Vec<ProjectRow>,
    tasks: Vec<TaskRow>,
    next_project_id: i64,
    next_task_id: i64,
    faults: HashSet<Op>,
    calls: HashMap<Op, usize>,
    session: Option<Session>,
}

/// In-memory implementation of [`Backend`] and [`AuthBackend`].
#[derive(Debug, Default)]
pub struct MemoryBackend {
    inner: Mutex<Inner>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a fault: `op` fails with a transport error until cleared.
    pub fn fail_on(&self, op: Op) {
        self.lock().faults.insert(op);
    }

    /// Disarm a previously armed fault.
    pub fn clear_fault(&self, op: Op) {
        self.lock().faults.remove(&op);
    }

    /// How many times `op` has been invoked (including failed calls).
    #[must_use]
    pub fn calls(&self, op: Op) -> usize {
        self.lock().calls.get(&op).copied().unwrap_or(0)
    }

    /// Total invocations across all operations.
    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.lock().calls.values().sum()
    }

    /// Install a session for auth-path tests.
    pub fn set_session(&self, session: Option<Session>) {
        self.lock().session = session;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory backend mutex poisoned")
    }

    fn enter(&self, op: Op) -> Result<std::sync::MutexGuard<'_, Inner>, BackendError> {
        let mut inner = self.lock();
        *inner.calls.entry(op).or_insert(0) += 1;
        if inner.faults.contains(&op) {
            return Err(BackendError::Transport(format!("injected fault: {op:?}")));
        }
        Ok(inner)
    }
}

impl Backend for MemoryBackend {
    fn select_projects(&self) -> Result<Vec<ProjectRow>, BackendError> {
        let inner = self.enter(Op::SelectProjects)?;
        Ok(inner.projects.clone())
    }

    fn select_tasks(&self) -> Result<Vec<TaskRow>, BackendError> {
        let inner = self.enter(Op::SelectTasks)?;
        Ok(inner.tasks.clone())
    }

    fn insert_project(&self, name: &str) -> Result<ProjectRow, BackendError> {
        let mut inner = self.enter(Op::InsertProject)?;
        inner.next_project_id += 1;
        let row = ProjectRow {
            id: inner.next_project_id,
            name: name.to_string(),
        };
        inner.projects.push(row.clone());
        Ok(row)
    }

    fn insert_task(
        &self,
        name: &str,
        status: Status,
        project_id: i64,
    ) -> Result<TaskRow, BackendError> {
        let mut inner = self.enter(Op::InsertTask)?;
        if !inner.projects.iter().any(|p| p.id == project_id) {
            return Err(BackendError::Rejected {
                status: 409,
                message: format!(
                    "insert on tasks violates foreign key constraint (project_id={project_id})"
                ),
            });
        }
        inner.next_task_id += 1;
        let row = TaskRow {
            id: inner.next_task_id,
            name: name.to_string(),
            status,
            project_id,
        };
        inner.tasks.push(row.clone());
        Ok(row)
    }

    fn update_task_status(&self, task_id: i64, status: Status) -> Result<(), BackendError> {
        let mut inner = self.enter(Op::UpdateTaskStatus)?;
        if let Some(task) = inner.tasks.iter_mut().find(|t| t.id == task_id) {
            task.status = status;
        }
        Ok(())
    }

    fn delete_project_tasks(&self, project_id: i64) -> Result<(), BackendError> {
        let mut inner = self.enter(Op::DeleteProjectTasks)?;
        inner.tasks.retain(|t| t.project_id != project_id);
        Ok(())
    }

    fn delete_project(&self, project_id: i64) -> Result<(), BackendError> {
        let mut inner = self.enter(Op::DeleteProject)?;
        inner.projects.retain(|p| p.id != project_id);
        Ok(())
    }

    fn delete_task(&self, task_id: i64) -> Result<(), BackendError> {
        let mut inner = self.enter(Op::DeleteTask)?;
        inner.tasks.retain(|t| t.id != task_id);
        Ok(())
    }
}

impl AuthBackend for MemoryBackend {
    fn sign_in_with_password(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<Session, BackendError> {
        let mut inner = self.enter(Op::SignIn)?;
        let session = Session::local(email);
        inner.session = Some(session.clone());
        Ok(session)
    }

    fn get_session(&self) -> Result<Option<Session>, BackendError> {
        let inner = self.enter(Op::GetSession)?;
        Ok(inner.session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryBackend, Op};
    use crate::backend::{Backend, BackendError};
    use crate::model::Status;

    #[test]
    fn ids_are_assigned_monotonically() {
        let backend = MemoryBackend::new();
        let a = backend.insert_project("a").expect("insert a");
        let b = backend.insert_project("b").expect("insert b");
        assert!(b.id > a.id);
    }

    #[test]
    fn task_insert_enforces_project_foreign_key() {
        let backend = MemoryBackend::new();
        let err = backend
            .insert_task("orphan", Status::Todo, 99)
            .expect_err("insert must fail");
        assert!(matches!(err, BackendError::Rejected { status: 409, .. }));
    }

    #[test]
    fn armed_fault_fails_until_cleared() {
        let backend = MemoryBackend::new();
        backend.fail_on(Op::SelectProjects);
        assert!(backend.select_projects().is_err());
        assert!(backend.select_projects().is_err());
        backend.clear_fault(Op::SelectProjects);
        assert!(backend.select_projects().is_ok());
        assert_eq!(backend.calls(Op::SelectProjects), 3);
    }

    #[test]
    fn deleting_missing_rows_succeeds() {
        let backend = MemoryBackend::new();
        backend.delete_task(42).expect("delete missing task");
        backend.delete_project(42).expect("delete missing project");
    }
}
