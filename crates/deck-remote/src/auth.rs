//! Password-grant authentication against the hosted identity provider.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::json;

use deck_core::backend::BackendError;
use deck_core::config::RemoteConfig;
use deck_core::session::{Session, SessionUser};

use crate::rest::map_ureq_error;

/// Response body of `POST /auth/v1/token?grant_type=password`.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl TokenResponse {
    /// Providers differ on whether they send an absolute `expires_at`;
    /// fall back to `now + expires_in` (default one hour).
    pub(crate) fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self.expires_at.unwrap_or_else(|| {
            (now + Duration::seconds(self.expires_in.unwrap_or(3600))).timestamp()
        });
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: SessionUser {
                email: self.user.email.unwrap_or_default(),
                id: self.user.id,
            },
        }
    }
}

/// Exchange an email/password pair for a session.
///
/// # Errors
///
/// [`BackendError::Rejected`] when the provider refuses the credentials,
/// [`BackendError::Transport`] / [`BackendError::Decode`] otherwise.
pub fn sign_in_with_password(
    config: &RemoteConfig,
    email: &str,
    password: &str,
) -> Result<Session, BackendError> {
    let url = format!("{}/auth/v1/token?grant_type=password", config.url);
    tracing::debug!(%url, "requesting password-grant token");

    let response = ureq::post(&url)
        .set("apikey", &config.anon_key)
        .send_json(json!({ "email": email, "password": password }))
        .map_err(map_ureq_error)?;

    let token: TokenResponse = response
        .into_json()
        .map_err(|err| BackendError::Decode(format!("token response: {err}")))?;
    Ok(token.into_session(Utc::now()))
}
