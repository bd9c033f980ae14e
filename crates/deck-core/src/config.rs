use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Connection settings for the remote backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Base URL of the hosted service, e.g. `https://abc.supabase.co`.
    pub url: String,
    /// Anonymous API key sent with every request.
    pub anon_key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub remote: RemoteSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteSection {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
}

/// Load the user config file (`~/.config/deck/config.toml`), if present.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("deck/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve remote settings: `DECK_URL`/`DECK_ANON_KEY` env vars win over
/// the user config file.
///
/// # Errors
///
/// Returns an error if the config file is malformed or no complete
/// url/key pair is available from any source.
pub fn resolve_remote_config() -> Result<RemoteConfig> {
    let file = load_user_config()?;
    resolve_remote(
        env::var("DECK_URL").ok(),
        env::var("DECK_ANON_KEY").ok(),
        &file,
    )
}

fn resolve_remote(
    env_url: Option<String>,
    env_key: Option<String>,
    file: &UserConfig,
) -> Result<RemoteConfig> {
    let url = env_url
        .filter(|v| !v.trim().is_empty())
        .or_else(|| file.remote.url.clone());
    let anon_key = env_key
        .filter(|v| !v.trim().is_empty())
        .or_else(|| file.remote.anon_key.clone());

    match (url, anon_key) {
        (Some(url), Some(anon_key)) => Ok(RemoteConfig {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
        }),
        _ => anyhow::bail!(
            "remote backend not configured: set DECK_URL and DECK_ANON_KEY, \
             or [remote] url/anon_key in ~/.config/deck/config.toml"
        ),
    }
}

/// Where the signed-in session is cached between invocations.
#[must_use]
pub fn session_cache_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("deck/session.json"))
}
