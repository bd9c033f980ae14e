//! The Domain Store: in-memory projects/tasks kept in sync with a backend.
//!
//! The store is the single in-memory source of truth for the UI; the
//! backend is the durable source of truth. It starts empty, is populated
//! wholesale by [`DomainStore::load`], and is patched incrementally by each
//! mutation.
//!
//! # Confirmed-before-patch invariant
//!
//! Every mutation issues its backend call first and patches memory only
//! after the backend acknowledges success. Nothing is committed
//! optimistically; on failure the in-memory state is left exactly as it
//! was. The one compound operation, [`DomainStore::delete_project`], is two
//! sequential deletes with no atomicity across them — its error reports
//! which step failed rather than collapsing both into one outcome.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::backend::{Backend, BackendError};
use crate::error::ErrorCode;
use crate::model::{Project, Status, Task};

/// The two sequential steps of a project deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStep {
    /// Deleting the project's task rows.
    Tasks,
    /// Deleting the project row itself.
    Project,
}

impl fmt::Display for DeleteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tasks => f.write_str("task deletion"),
            Self::Project => f.write_str("project deletion"),
        }
    }
}

/// Failure of a store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The supplied name trimmed to empty. No backend call was made.
    #[error("name must not be empty")]
    EmptyName,

    #[error("project {0} not found")]
    ProjectNotFound(i64),

    #[error("task {task_id} not found in project {project_id}")]
    TaskNotFound { task_id: i64, project_id: i64 },

    /// A single-call mutation failed at the backend; memory is unchanged.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The two-step project deletion failed at `step`.
    ///
    /// After a failed [`DeleteStep::Tasks`] the project row is untouched.
    /// After a failed [`DeleteStep::Project`] the task rows are already
    /// gone remotely while the store still shows them; a reload reflects
    /// the backend's actual state.
    #[error("deleting project {project_id} failed during {step}: {source}")]
    DeleteProject {
        project_id: i64,
        step: DeleteStep,
        source: BackendError,
    },
}

impl StoreError {
    /// Machine-readable code for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyName => ErrorCode::EmptyName,
            Self::ProjectNotFound(_) => ErrorCode::ProjectNotFound,
            Self::TaskNotFound { .. } => ErrorCode::TaskNotFound,
            Self::Backend(_) | Self::DeleteProject { .. } => ErrorCode::PersistenceFailed,
        }
    }
}

/// In-memory view of all projects and tasks, synchronized with a backend.
#[derive(Debug)]
pub struct DomainStore<B> {
    backend: B,
    projects: Vec<Project>,
}

impl<B: Backend> DomainStore<B> {
    /// An empty store over `backend`; call [`load`](Self::load) to populate.
    #[must_use]
    pub const fn new(backend: B) -> Self {
        Self {
            backend,
            projects: Vec::new(),
        }
    }

    /// Read-only snapshot of the current projects, in backend order.
    ///
    /// Callers must mutate only through the operations on this type.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn project(&self, project_id: i64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    /// Resolve a project by numeric id or exact (case-insensitive) name.
    #[must_use]
    pub fn resolve_project(&self, needle: &str) -> Option<&Project> {
        if let Ok(id) = needle.parse::<i64>() {
            if let Some(project) = self.project(id) {
                return Some(project);
            }
        }
        self.projects
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(needle.trim()))
    }

    /// Resolve a task within a project by numeric id or exact name.
    #[must_use]
    pub fn resolve_task(&self, project_id: i64, needle: &str) -> Option<&Task> {
        let project = self.project(project_id)?;
        if let Ok(id) = needle.parse::<i64>() {
            if let Some(task) = project.task(id) {
                return Some(task);
            }
        }
        project
            .tasks
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(needle.trim()))
    }

    /// Access the underlying backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Fetch all projects and tasks and rebuild the nested collection.
    ///
    /// Tasks are grouped by `project_id`; a task whose project no longer
    /// exists is dropped with a warning. On any backend failure the store
    /// keeps its prior state (empty on first load).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if either select fails.
    pub fn load(&mut self) -> Result<(), StoreError> {
        let project_rows = self.backend.select_projects()?;
        let task_rows = self.backend.select_tasks()?;

        let mut projects: Vec<Project> = project_rows
            .into_iter()
            .map(|row| Project::new(row.id, row.name))
            .collect();
        let index: HashMap<i64, usize> = projects
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect();

        for row in task_rows {
            match index.get(&row.project_id) {
                Some(&i) => projects[i].tasks.push(row.into()),
                None => {
                    tracing::warn!(
                        task_id = row.id,
                        project_id = row.project_id,
                        "dropping task whose project does not exist"
                    );
                }
            }
        }

        tracing::debug!(projects = projects.len(), "store loaded");
        self.projects = projects;
        Ok(())
    }

    /// Create a project and append it to the store once confirmed.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyName`] if `name` trims to empty (no backend call);
    /// [`StoreError::Backend`] if the insert fails (store unchanged).
    pub fn add_project(&mut self, name: &str) -> Result<Project, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }

        let row = self.backend.insert_project(name)?;
        tracing::info!(project_id = row.id, name = %row.name, "project created");
        let project = Project::new(row.id, row.name);
        self.projects.push(project.clone());
        Ok(project)
    }

    /// Delete a project: its task rows first, then the project row.
    ///
    /// Returns the removed project. If the task-deletion step fails the
    /// project row is not touched.
    ///
    /// # Errors
    ///
    /// [`StoreError::ProjectNotFound`] for an unknown id;
    /// [`StoreError::DeleteProject`] naming the failed step otherwise.
    pub fn delete_project(&mut self, project_id: i64) -> Result<Project, StoreError> {
        let position = self
            .projects
            .iter()
            .position(|p| p.id == project_id)
            .ok_or(StoreError::ProjectNotFound(project_id))?;

        self.backend
            .delete_project_tasks(project_id)
            .map_err(|source| StoreError::DeleteProject {
                project_id,
                step: DeleteStep::Tasks,
                source,
            })?;
        self.backend
            .delete_project(project_id)
            .map_err(|source| StoreError::DeleteProject {
                project_id,
                step: DeleteStep::Project,
                source,
            })?;

        tracing::info!(project_id, "project deleted");
        Ok(self.projects.remove(position))
    }

    /// Create a task with status `Todo` in an existing project.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyName`] if `name` trims to empty (no backend call);
    /// [`StoreError::ProjectNotFound`] for an unknown project;
    /// [`StoreError::Backend`] if the insert fails (store unchanged).
    pub fn add_task(&mut self, name: &str, project_id: i64) -> Result<Task, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        let position = self
            .projects
            .iter()
            .position(|p| p.id == project_id)
            .ok_or(StoreError::ProjectNotFound(project_id))?;

        let row = self.backend.insert_task(name, Status::Todo, project_id)?;
        tracing::info!(task_id = row.id, project_id, name = %row.name, "task created");
        let task = Task::from(row);
        self.projects[position].tasks.push(task.clone());
        Ok(task)
    }

    /// Delete a task and remove it from its project once confirmed.
    ///
    /// # Errors
    ///
    /// [`StoreError::ProjectNotFound`] / [`StoreError::TaskNotFound`] for
    /// unknown ids; [`StoreError::Backend`] if the delete fails.
    pub fn delete_task(&mut self, task_id: i64, project_id: i64) -> Result<Task, StoreError> {
        let (project_pos, task_pos) = self.locate(task_id, project_id)?;

        self.backend.delete_task(task_id)?;
        tracing::info!(task_id, project_id, "task deleted");
        Ok(self.projects[project_pos].tasks.remove(task_pos))
    }

    /// Advance a task one step around the status cycle.
    ///
    /// The next status is computed from the status currently held in
    /// memory, not a fresh read; concurrent external updates to the same
    /// task are not detected and the later write wins.
    ///
    /// # Errors
    ///
    /// [`StoreError::ProjectNotFound`] / [`StoreError::TaskNotFound`] for
    /// unknown ids; [`StoreError::Backend`] if the update fails (status
    /// unchanged in memory).
    pub fn advance_task(&mut self, task_id: i64, project_id: i64) -> Result<Status, StoreError> {
        let (project_pos, task_pos) = self.locate(task_id, project_id)?;
        let next = self.projects[project_pos].tasks[task_pos].status.advanced();

        self.backend.update_task_status(task_id, next)?;
        tracing::info!(task_id, project_id, status = %next, "task advanced");
        self.projects[project_pos].tasks[task_pos].status = next;
        Ok(next)
    }

    fn locate(&self, task_id: i64, project_id: i64) -> Result<(usize, usize), StoreError> {
        let project_pos = self
            .projects
            .iter()
            .position(|p| p.id == project_id)
            .ok_or(StoreError::ProjectNotFound(project_id))?;
        let task_pos = self.projects[project_pos]
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or(StoreError::TaskNotFound {
                task_id,
                project_id,
            })?;
        Ok((project_pos, task_pos))
    }
}

#[cfg(test)]
mod tests {
    use super::{DomainStore, StoreError};
    use crate::backend::memory::MemoryBackend;
    use crate::error::ErrorCode;

    #[test]
    fn store_starts_empty() {
        let store = DomainStore::new(MemoryBackend::new());
        assert!(store.projects().is_empty());
    }

    #[test]
    fn resolve_project_by_id_or_name() {
        let mut store = DomainStore::new(MemoryBackend::new());
        let id = store.add_project("Launch").expect("add").id;

        assert_eq!(store.resolve_project(&id.to_string()).map(|p| p.id), Some(id));
        assert_eq!(store.resolve_project("launch").map(|p| p.id), Some(id));
        assert!(store.resolve_project("Landing").is_none());
    }

    #[test]
    fn error_codes_map_by_category() {
        assert_eq!(StoreError::EmptyName.code(), ErrorCode::EmptyName);
        assert_eq!(
            StoreError::ProjectNotFound(1).code(),
            ErrorCode::ProjectNotFound
        );
        assert_eq!(
            StoreError::TaskNotFound {
                task_id: 1,
                project_id: 1
            }
            .code(),
            ErrorCode::TaskNotFound
        );
    }
}
