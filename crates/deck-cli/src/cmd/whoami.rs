//! `dk whoami` — show the signed-in user.

use chrono::{DateTime, Utc};
use serde::Serialize;

use deck_core::backend::AuthBackend;

use crate::guard;
use crate::output::{OutputMode, pretty_kv, render};

#[derive(Debug, Serialize)]
struct Whoami {
    email: String,
    user_id: String,
    expires_at: i64,
}

pub fn run_whoami<A: AuthBackend>(auth: &A, output: OutputMode) -> anyhow::Result<()> {
    let session = guard::require_session(auth, output)?;
    let value = Whoami {
        email: session.user.email,
        user_id: session.user.id,
        expires_at: session.expires_at,
    };

    render(output, &value, |v, w| {
        pretty_kv(w, "Email", &v.email)?;
        pretty_kv(w, "User ID", &v.user_id)?;
        let expiry = DateTime::<Utc>::from_timestamp(v.expires_at, 0)
            .map_or_else(|| v.expires_at.to_string(), |ts| ts.to_rfc3339());
        pretty_kv(w, "Expires", expiry)
    })
}
