//! Sessions and the navigation gate.
//!
//! The gate decides, for each navigation, whether to render the requested
//! view or redirect, based on a session query it is handed explicitly —
//! there is no ambient session global. A failed query leaves the gate in
//! [`GateState::Checking`] and renders nothing; that silent failure mode is
//! deliberate. Callers that want a retry or error surface build it on top
//! of [`GateOutcome`] rather than in here.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::{AuthBackend, BackendError};

/// The signed-in user, as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
}

/// An authenticated session. Expired sessions count as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry as unix seconds.
    pub expires_at: i64,
    pub user: SessionUser,
}

impl Session {
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now.timestamp()
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// A locally minted session, used by the in-process backend.
    #[must_use]
    pub fn local(email: &str) -> Self {
        Self {
            access_token: "local".to_string(),
            refresh_token: "local".to_string(),
            expires_at: (Utc::now() + Duration::hours(1)).timestamp(),
            user: SessionUser {
                id: format!("local-{email}"),
                email: email.to_string(),
            },
        }
    }
}

/// The two navigable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Public landing/login view, reachable without a session.
    Login,
    /// Protected board view.
    Board,
}

/// Observable gate states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Checking,
    Authenticated,
    Unauthenticated,
}

/// What the caller should do after a gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// The session query failed. Stay in `Checking`; render nothing.
    Checking,
    /// Render the protected view with this session.
    Authenticated(Session),
    /// Render the public view; no session exists.
    Unauthenticated,
    /// Navigate to the other view instead of rendering this one.
    Redirect(View),
}

impl GateOutcome {
    /// The observable state this outcome settles into, if any.
    #[must_use]
    pub const fn state(&self) -> Option<GateState> {
        match self {
            Self::Checking => Some(GateState::Checking),
            Self::Authenticated(_) => Some(GateState::Authenticated),
            Self::Unauthenticated => Some(GateState::Unauthenticated),
            Self::Redirect(_) => None,
        }
    }
}

/// Navigation guard over an injected auth backend.
pub struct SessionGate<'a, A: AuthBackend> {
    auth: &'a A,
}

impl<'a, A: AuthBackend> SessionGate<'a, A> {
    #[must_use]
    pub const fn new(auth: &'a A) -> Self {
        Self { auth }
    }

    /// Query the current session and decide what to do for `view`.
    #[must_use]
    pub fn check(&self, view: View) -> GateOutcome {
        decide(view, self.auth.get_session())
    }
}

/// The gate's decision table, as a pure function of the query result.
///
/// - query failed → stay `Checking` (render nothing)
/// - session + `Login` → redirect to `Board`
/// - session + `Board` → `Authenticated`
/// - no session + `Board` → redirect to `Login`
/// - no session + `Login` → `Unauthenticated`
#[must_use]
pub fn decide(view: View, query: Result<Option<Session>, BackendError>) -> GateOutcome {
    let session = match query {
        Ok(session) => session.filter(|s| !s.is_expired()),
        Err(err) => {
            tracing::debug!(error = %err, "session query failed; staying in Checking");
            return GateOutcome::Checking;
        }
    };

    match (session, view) {
        (Some(_), View::Login) => GateOutcome::Redirect(View::Board),
        (Some(session), View::Board) => GateOutcome::Authenticated(session),
        (None, View::Board) => GateOutcome::Redirect(View::Login),
        (None, View::Login) => GateOutcome::Unauthenticated,
    }
}
