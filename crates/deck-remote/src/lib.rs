//! deck-remote library.
//!
//! The Persistence Client: a blocking HTTP implementation of the
//! `deck-core` backend contract against a hosted Postgres service. Rows go
//! through the PostgREST-style `/rest/v1/{table}` API; authentication goes
//! through the `/auth/v1/token` password grant. The signed-in session is
//! cached as a JSON file between invocations (the CLI's stand-in for the
//! browser storage the hosted service's own client library uses).
//!
//! Nothing here retries, queues, or cancels: every call is one blocking
//! round-trip with the transport's default timeouts, and every failure is
//! terminal for that invocation.

pub mod auth;
pub mod cache;
pub mod rest;

pub use cache::SessionCache;
pub use rest::RestBackend;
