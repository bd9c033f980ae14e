//! `dk logout` — drop the cached session.

use deck_remote::SessionCache;

use crate::output::{CliError, OutputMode, render_error, render_success};

pub fn run_logout(cache: &SessionCache, output: OutputMode) -> anyhow::Result<()> {
    match cache.clear() {
        Ok(()) => {
            render_success(output, "Signed out.")?;
            Ok(())
        }
        Err(err) => {
            render_error(output, &CliError::new(err.to_string()))?;
            anyhow::bail!("sign-out failed")
        }
    }
}
