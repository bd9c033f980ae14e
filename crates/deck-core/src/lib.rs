//! deck-core library.
//!
//! The client-side half of the deck tracker: the domain model
//! ([`model::Project`], [`model::Task`], [`model::Status`]), the in-memory
//! [`store::DomainStore`] that stays synchronized with a remote backend, the
//! [`backend`] contract that backend implementations satisfy, and the
//! [`session`] gate that decides what an unauthenticated user may see.
//!
//! # Conventions
//!
//! - **Errors**: library types return `thiserror` enums; `anyhow::Result`
//!   is reserved for configuration loading and application-level glue.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `error!`, `debug!`).

pub mod backend;
pub mod config;
pub mod error;
pub mod model;
pub mod session;
pub mod store;
