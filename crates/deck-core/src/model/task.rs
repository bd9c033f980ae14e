use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The three task statuses.
///
/// Wire strings match the backend's `tasks.status` column values exactly,
/// including the space in `"In Progress"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl Status {
    /// All statuses, in board-column order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// The status cycle: `Todo -> In Progress -> Done -> Todo`.
    ///
    /// Pure and total over the three-value domain; three applications
    /// return any status to itself.
    #[must_use]
    pub const fn advanced(self) -> Self {
        match self {
            Self::Todo => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::Todo,
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Todo
    }
}

/// A unit of work owned by exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub status: Status,
    pub project_id: i64,
}

/// Error returned when parsing a status from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    pub got: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid status: '{}'", self.got)
    }
}

impl std::error::Error for ParseStatusError {}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "in progress" | "in-progress" | "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseStatusError { got: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Status, Task};
    use std::str::FromStr;

    #[test]
    fn status_json_uses_column_values() {
        assert_eq!(serde_json::to_string(&Status::Todo).expect("serialize"), "\"Todo\"");
        assert_eq!(
            serde_json::to_string(&Status::InProgress).expect("serialize"),
            "\"In Progress\""
        );
        assert_eq!(serde_json::to_string(&Status::Done).expect("serialize"), "\"Done\"");

        assert_eq!(
            serde_json::from_str::<Status>("\"In Progress\"").expect("deserialize"),
            Status::InProgress
        );
    }

    #[test]
    fn display_parse_roundtrips() {
        for status in Status::ALL {
            let rendered = status.to_string();
            let reparsed = Status::from_str(&rendered).expect("reparse");
            assert_eq!(status, reparsed);
        }
    }

    #[test]
    fn parse_is_lenient_about_case_and_hyphens() {
        assert_eq!(Status::from_str("  TODO ").expect("parse"), Status::Todo);
        assert_eq!(Status::from_str("in-progress").expect("parse"), Status::InProgress);
        assert_eq!(Status::from_str("InProgress").expect("parse"), Status::InProgress);
        assert_eq!(Status::from_str("DONE").expect("parse"), Status::Done);
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert!(Status::from_str("blocked").is_err());
        assert!(Status::from_str("").is_err());
    }

    #[test]
    fn cycle_order_is_fixed() {
        assert_eq!(Status::Todo.advanced(), Status::InProgress);
        assert_eq!(Status::InProgress.advanced(), Status::Done);
        assert_eq!(Status::Done.advanced(), Status::Todo);
    }

    #[test]
    fn task_json_roundtrips() {
        let task = Task {
            id: 7,
            name: "Design".to_string(),
            status: Status::InProgress,
            project_id: 3,
        };
        let json = serde_json::to_string(&task).expect("serialize");
        assert!(json.contains("\"In Progress\""));
        let back: Task = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(task, back);
    }
}
