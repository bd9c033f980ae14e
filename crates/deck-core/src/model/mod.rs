//! Domain model: projects, tasks, and the status cycle.

pub mod project;
pub mod task;

pub use project::{Project, StatusCounts};
pub use task::{ParseStatusError, Status, Task};
