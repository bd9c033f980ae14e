use std::fmt;

/// Machine-readable error codes surfaced alongside CLI errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotConfigured,
    ConfigParseError,
    EmptyName,
    ProjectNotFound,
    TaskNotFound,
    PersistenceFailed,
    SessionQueryFailed,
    NotAuthenticated,
    LoginFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotConfigured => "E1001",
            Self::ConfigParseError => "E1002",
            Self::EmptyName => "E2001",
            Self::ProjectNotFound => "E2002",
            Self::TaskNotFound => "E2003",
            Self::PersistenceFailed => "E3001",
            Self::SessionQueryFailed => "E4001",
            Self::NotAuthenticated => "E4002",
            Self::LoginFailed => "E4003",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotConfigured => "Remote backend not configured",
            Self::ConfigParseError => "Config file parse error",
            Self::EmptyName => "Name must not be empty",
            Self::ProjectNotFound => "Project not found",
            Self::TaskNotFound => "Task not found",
            Self::PersistenceFailed => "Persistence call failed",
            Self::SessionQueryFailed => "Session check failed",
            Self::NotAuthenticated => "Not signed in",
            Self::LoginFailed => "Invalid login credentials",
        }
    }

    /// Optional remediation hint that can be surfaced to users.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotConfigured => {
                Some("Set DECK_URL and DECK_ANON_KEY, or write ~/.config/deck/config.toml.")
            }
            Self::ConfigParseError => Some("Fix syntax in ~/.config/deck/config.toml and retry."),
            Self::EmptyName => Some("Provide a non-empty name."),
            Self::ProjectNotFound => Some("Run `dk list` to see existing projects."),
            Self::TaskNotFound => Some("Run `dk show <project>` to see its tasks."),
            Self::PersistenceFailed => None,
            Self::SessionQueryFailed => None,
            Self::NotAuthenticated => Some("Run `dk login` to sign in."),
            Self::LoginFailed => Some("Check the email/password pair and try again."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
