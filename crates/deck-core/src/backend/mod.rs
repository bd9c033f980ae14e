//! Backend contract: the row-level persistence and auth operations the
//! store depends on.
//!
//! Two tables back the tracker: `projects(id, name)` and
//! `tasks(id, name, status, project_id)`. Implementations are remote
//! round-trips (see `deck-remote`) or the in-process [`memory::MemoryBackend`]
//! used by tests and offline simulation. Calls are blocking, are never
//! retried at this layer, and ids are assigned by the backend.

pub mod memory;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Status, Task};
use crate::session::Session;

/// A row of the `projects` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRow {
    pub id: i64,
    pub name: String,
}

/// A row of the `tasks` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRow {
    pub id: i64,
    pub name: String,
    pub status: Status,
    pub project_id: i64,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            status: row.status,
            project_id: row.project_id,
        }
    }
}

/// Failure reported by a backend implementation.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced a response (DNS, connect, I/O).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The remote answered with a non-success status.
    #[error("remote rejected request: {status} {message}")]
    Rejected { status: u16, message: String },

    /// The response arrived but could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Row-level persistence over the `projects` and `tasks` tables.
///
/// Every method is a single acknowledged round-trip; the store only patches
/// its in-memory state after a method returns `Ok`.
pub trait Backend {
    /// All project rows, in insertion (id) order.
    ///
    /// # Errors
    /// Returns a [`BackendError`] if the select fails.
    fn select_projects(&self) -> Result<Vec<ProjectRow>, BackendError>;

    /// All task rows across every project, in insertion (id) order.
    ///
    /// # Errors
    /// Returns a [`BackendError`] if the select fails.
    fn select_tasks(&self) -> Result<Vec<TaskRow>, BackendError>;

    /// Insert a project and return the stored row (with its assigned id).
    ///
    /// # Errors
    /// Returns a [`BackendError`] if the insert fails.
    fn insert_project(&self, name: &str) -> Result<ProjectRow, BackendError>;

    /// Insert a task and return the stored row (with its assigned id).
    ///
    /// # Errors
    /// Returns a [`BackendError`] if the insert fails.
    fn insert_task(
        &self,
        name: &str,
        status: Status,
        project_id: i64,
    ) -> Result<TaskRow, BackendError>;

    /// Overwrite one task's status.
    ///
    /// # Errors
    /// Returns a [`BackendError`] if the update fails.
    fn update_task_status(&self, task_id: i64, status: Status) -> Result<(), BackendError>;

    /// Delete every task owned by a project.
    ///
    /// # Errors
    /// Returns a [`BackendError`] if the delete fails.
    fn delete_project_tasks(&self, project_id: i64) -> Result<(), BackendError>;

    /// Delete one project row.
    ///
    /// # Errors
    /// Returns a [`BackendError`] if the delete fails.
    fn delete_project(&self, project_id: i64) -> Result<(), BackendError>;

    /// Delete one task row.
    ///
    /// # Errors
    /// Returns a [`BackendError`] if the delete fails.
    fn delete_task(&self, task_id: i64) -> Result<(), BackendError>;
}

/// The identity-provider half of the backend.
pub trait AuthBackend {
    /// Exchange credentials for a session.
    ///
    /// # Errors
    /// Returns a [`BackendError`] if the provider rejects the credentials
    /// or the request fails.
    fn sign_in_with_password(&self, email: &str, password: &str)
    -> Result<Session, BackendError>;

    /// The current session, if one exists and has not expired.
    ///
    /// # Errors
    /// Returns a [`BackendError`] if the session state cannot be read.
    fn get_session(&self) -> Result<Option<Session>, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::{BackendError, TaskRow};
    use crate::model::{Status, Task};

    #[test]
    fn task_row_converts_to_task() {
        let row = TaskRow {
            id: 4,
            name: "Design".to_string(),
            status: Status::Todo,
            project_id: 2,
        };
        let task = Task::from(row.clone());
        assert_eq!(task.id, row.id);
        assert_eq!(task.name, row.name);
        assert_eq!(task.status, row.status);
        assert_eq!(task.project_id, row.project_id);
    }

    #[test]
    fn rejected_error_carries_status_and_message() {
        let err = BackendError::Rejected {
            status: 401,
            message: "JWT expired".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("401"));
        assert!(rendered.contains("JWT expired"));
    }
}
