use serde::{Deserialize, Serialize};

use super::task::{Status, Task};

/// A named container of tasks.
///
/// Tasks are kept in the order the backend returned them. While a project
/// exists, every task in `tasks` has `project_id == self.id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub tasks: Vec<Task>,
}

/// Per-status task counts for the board summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl Project {
    /// A project with no tasks yet, as returned right after creation.
    #[must_use]
    pub const fn new(id: i64, name: String) -> Self {
        Self {
            id,
            name,
            tasks: Vec::new(),
        }
    }

    #[must_use]
    pub fn task(&self, task_id: i64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    /// Count tasks per status, e.g. `Todo: 2 | In Progress: 1 | Done: 0`.
    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for task in &self.tasks {
            match task.status {
                Status::Todo => counts.todo += 1,
                Status::InProgress => counts.in_progress += 1,
                Status::Done => counts.done += 1,
            }
        }
        counts
    }

    /// Tasks with the given status, preserving backend order.
    pub fn tasks_with_status(&self, status: Status) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |task| task.status == status)
    }
}
