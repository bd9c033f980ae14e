//! PostgREST-style row client over blocking HTTP.
//!
//! Each backend operation is one request against `/rest/v1/{table}` with
//! row filters in the query string (`?id=eq.7`). Selects ask for
//! `order=id.asc` so reload order matches insertion order; inserts ask for
//! `Prefer: return=representation` so the backend-assigned row comes back
//! in the response.

use serde::de::DeserializeOwned;
use serde_json::json;

use deck_core::backend::{AuthBackend, Backend, BackendError, ProjectRow, TaskRow};
use deck_core::config::RemoteConfig;
use deck_core::model::Status;
use deck_core::session::Session;

use crate::auth;
use crate::cache::SessionCache;

const BODY_SNIPPET_LEN: usize = 300;

/// HTTP implementation of the persistence and auth contracts.
pub struct RestBackend {
    config: RemoteConfig,
    cache: SessionCache,
    bearer: String,
}

impl RestBackend {
    /// Build a client from connection settings and a session cache.
    ///
    /// Row requests carry the cached session's access token when one is
    /// present and unexpired, the anonymous key otherwise. A cache read
    /// failure falls back to the anonymous key here; `get_session` still
    /// reports it, which is what gates navigation.
    #[must_use]
    pub fn new(config: RemoteConfig, cache: SessionCache) -> Self {
        let bearer = match cache.load() {
            Ok(Some(session)) => session.access_token,
            Ok(None) => config.anon_key.clone(),
            Err(err) => {
                tracing::warn!(error = %err, "session cache unreadable; using anonymous key");
                config.anon_key.clone()
            }
        };
        Self {
            config,
            cache,
            bearer,
        }
    }

    fn table_url(&self, table: &str, query: &str) -> String {
        format!("{}/rest/v1/{table}{query}", self.config.url)
    }

    fn authed(&self, request: ureq::Request) -> ureq::Request {
        request
            .set("apikey", &self.config.anon_key)
            .set("Authorization", &format!("Bearer {}", self.bearer))
    }

    fn select_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &str,
    ) -> Result<Vec<T>, BackendError> {
        let url = self.table_url(table, query);
        tracing::debug!(%url, "select");
        let response = self
            .authed(ureq::get(&url))
            .call()
            .map_err(map_ureq_error)?;
        response
            .into_json()
            .map_err(|err| BackendError::Decode(format!("{table} rows: {err}")))
    }

    fn insert_row<T: DeserializeOwned>(
        &self,
        table: &str,
        body: &serde_json::Value,
    ) -> Result<T, BackendError> {
        let url = self.table_url(table, "");
        tracing::debug!(%url, "insert");
        let response = self
            .authed(ureq::post(&url))
            .set("Prefer", "return=representation")
            .send_json(body.clone())
            .map_err(map_ureq_error)?;
        let rows: Vec<T> = response
            .into_json()
            .map_err(|err| BackendError::Decode(format!("{table} insert response: {err}")))?;
        single_row(rows, table)
    }

    fn exec(
        &self,
        method: &str,
        table: &str,
        query: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<(), BackendError> {
        let url = self.table_url(table, query);
        tracing::debug!(%url, method, "exec");
        let request = self.authed(ureq::request(method, &url));
        let result = match body {
            Some(body) => request.send_json(body.clone()),
            None => request.call(),
        };
        result.map_err(map_ureq_error)?;
        Ok(())
    }
}

impl Backend for RestBackend {
    fn select_projects(&self) -> Result<Vec<ProjectRow>, BackendError> {
        self.select_rows("projects", "?select=id,name&order=id.asc")
    }

    fn select_tasks(&self) -> Result<Vec<TaskRow>, BackendError> {
        self.select_rows("tasks", "?select=id,name,status,project_id&order=id.asc")
    }

    fn insert_project(&self, name: &str) -> Result<ProjectRow, BackendError> {
        self.insert_row("projects", &json!({ "name": name }))
    }

    fn insert_task(
        &self,
        name: &str,
        status: Status,
        project_id: i64,
    ) -> Result<TaskRow, BackendError> {
        self.insert_row(
            "tasks",
            &json!({ "name": name, "status": status, "project_id": project_id }),
        )
    }

    fn update_task_status(&self, task_id: i64, status: Status) -> Result<(), BackendError> {
        self.exec(
            "PATCH",
            "tasks",
            &format!("?id=eq.{task_id}"),
            Some(&json!({ "status": status })),
        )
    }

    fn delete_project_tasks(&self, project_id: i64) -> Result<(), BackendError> {
        self.exec("DELETE", "tasks", &format!("?project_id=eq.{project_id}"), None)
    }

    fn delete_project(&self, project_id: i64) -> Result<(), BackendError> {
        self.exec("DELETE", "projects", &format!("?id=eq.{project_id}"), None)
    }

    fn delete_task(&self, task_id: i64) -> Result<(), BackendError> {
        self.exec("DELETE", "tasks", &format!("?id=eq.{task_id}"), None)
    }
}

impl AuthBackend for RestBackend {
    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        let session = auth::sign_in_with_password(&self.config, email, password)?;
        self.cache.store(&session)?;
        Ok(session)
    }

    fn get_session(&self) -> Result<Option<Session>, BackendError> {
        self.cache.load()
    }
}

/// Map a ureq failure onto the backend error taxonomy.
pub(crate) fn map_ureq_error(err: ureq::Error) -> BackendError {
    match err {
        ureq::Error::Status(status, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            BackendError::Rejected {
                status,
                message: snippet(&message),
            }
        }
        ureq::Error::Transport(transport) => BackendError::Transport(transport.to_string()),
    }
}

fn single_row<T>(rows: Vec<T>, table: &str) -> Result<T, BackendError> {
    rows.into_iter().next().ok_or_else(|| {
        BackendError::Decode(format!("{table} insert returned no representation"))
    })
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.len() <= BODY_SNIPPET_LEN {
        trimmed.to_string()
    } else {
        let mut end = BODY_SNIPPET_LEN;
        while !trimmed.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &trimmed[..end])
    }
}
