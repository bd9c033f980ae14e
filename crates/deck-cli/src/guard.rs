//! Session gate wiring for protected commands.
//!
//! Every command that touches project or task data passes through here
//! first. The three gate verdicts map onto the CLI as:
//!
//! - `Authenticated` → run the command with the session.
//! - redirect to the login view → a "not signed in" error with a hint.
//! - `Checking` (session query failed) → render nothing and exit nonzero,
//!   matching the gate's silent failure mode; details only at debug level.

use deck_core::backend::AuthBackend;
use deck_core::error::ErrorCode;
use deck_core::session::{GateOutcome, Session, SessionGate, View};

use crate::output::{CliError, OutputMode, render_error};

/// Require an authenticated session for a protected command.
pub fn require_session<A: AuthBackend>(auth: &A, output: OutputMode) -> anyhow::Result<Session> {
    match SessionGate::new(auth).check(View::Board) {
        GateOutcome::Authenticated(session) => Ok(session),
        GateOutcome::Checking => {
            tracing::debug!("session query failed; rendering nothing");
            std::process::exit(1);
        }
        GateOutcome::Redirect(_) | GateOutcome::Unauthenticated => {
            let code = ErrorCode::NotAuthenticated;
            render_error(
                output,
                &CliError::with_details(
                    code.message(),
                    code.hint().unwrap_or_default(),
                    code.code(),
                ),
            )?;
            anyhow::bail!("{}", code.message());
        }
    }
}
