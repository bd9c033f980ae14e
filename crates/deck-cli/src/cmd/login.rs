//! `dk login` — sign in with email and password.

use std::io::{BufRead, Write};

use clap::Args;

use deck_core::backend::{AuthBackend, BackendError};
use deck_core::error::ErrorCode;
use deck_core::session::{GateOutcome, SessionGate, View};

use crate::output::{CliError, OutputMode, render_error, render_success};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Email address to sign in with.
    #[arg(short, long)]
    pub email: String,

    /// Password. Falls back to DECK_PASSWORD, then an interactive prompt.
    #[arg(short, long)]
    pub password: Option<String>,
}

pub fn run_login<A: AuthBackend>(
    args: &LoginArgs,
    auth: &A,
    output: OutputMode,
) -> anyhow::Result<()> {
    // The login view is public; a live session redirects to the board.
    match SessionGate::new(auth).check(View::Login) {
        GateOutcome::Redirect(_) => {
            render_success(output, "Already signed in. Run `dk logout` to switch accounts.")?;
            return Ok(());
        }
        GateOutcome::Checking => {
            tracing::debug!("session query failed; rendering nothing");
            std::process::exit(1);
        }
        GateOutcome::Authenticated(_) | GateOutcome::Unauthenticated => {}
    }

    let password = resolve_password(args)?;
    if args.email.trim().is_empty() || password.trim().is_empty() {
        render_error(
            output,
            &CliError::new("Please fill in both email and password."),
        )?;
        anyhow::bail!("missing credentials");
    }

    match auth.sign_in_with_password(args.email.trim(), &password) {
        Ok(session) => {
            render_success(output, &format!("Signed in as {}", session.user.email))?;
            Ok(())
        }
        Err(BackendError::Rejected { status, .. }) if status == 400 || status == 401 => {
            let code = ErrorCode::LoginFailed;
            render_error(
                output,
                &CliError::with_details(
                    "Invalid login credentials. Please try again.",
                    code.hint().unwrap_or_default(),
                    code.code(),
                ),
            )?;
            anyhow::bail!("{}", code.message())
        }
        Err(err) => {
            render_error(
                output,
                &CliError {
                    message: err.to_string(),
                    suggestion: None,
                    error_code: Some(ErrorCode::PersistenceFailed.code().to_string()),
                },
            )?;
            anyhow::bail!("sign-in failed")
        }
    }
}

fn resolve_password(args: &LoginArgs) -> anyhow::Result<String> {
    if let Some(password) = &args.password {
        return Ok(password.clone());
    }
    if let Ok(password) = std::env::var("DECK_PASSWORD") {
        return Ok(password);
    }
    prompt_password()
}

fn prompt_password() -> anyhow::Result<String> {
    let mut err = std::io::stderr();
    write!(err, "Password: ")?;
    err.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::{LoginArgs, run_login};
    use crate::output::OutputMode;
    use deck_core::backend::AuthBackend as _;
    use deck_core::backend::memory::{MemoryBackend, Op};

    fn args(email: &str, password: &str) -> LoginArgs {
        LoginArgs {
            email: email.to_string(),
            password: Some(password.to_string()),
        }
    }

    #[test]
    fn login_args_parse() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: LoginArgs,
        }
        let w = Wrapper::parse_from(["test", "--email", "a@example.com", "--password", "pw"]);
        assert_eq!(w.args.email, "a@example.com");
        assert_eq!(w.args.password.as_deref(), Some("pw"));
    }

    #[test]
    fn blank_credentials_never_reach_the_provider() {
        let backend = MemoryBackend::new();
        assert!(run_login(&args("a@example.com", "   "), &backend, OutputMode::Text).is_err());
        assert_eq!(backend.calls(Op::SignIn), 0);
    }

    #[test]
    fn successful_login_establishes_a_session() {
        let backend = MemoryBackend::new();
        run_login(&args("a@example.com", "pw"), &backend, OutputMode::Text).expect("login");
        let session = backend.get_session().expect("query").expect("present");
        assert_eq!(session.user.email, "a@example.com");
    }

    #[test]
    fn second_login_is_a_noop_redirect() {
        let backend = MemoryBackend::new();
        run_login(&args("a@example.com", "pw"), &backend, OutputMode::Text).expect("login");
        run_login(&args("b@example.com", "pw"), &backend, OutputMode::Text).expect("noop");
        assert_eq!(backend.calls(Op::SignIn), 1);
    }
}
