//! The `taskvault` library crate.
//!
//! Core business logic for a personal task-tracking backend: credential
//! handling and token-based authentication, owner-scoped task access, the
//! storage contracts with their Postgres implementations, and the HTTP
//! routing that exposes it all. The binary (`main.rs`) wires these pieces
//! together and runs the server.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod tasks;

use crate::store::{PgTaskStore, PgUserStore};

/// The authenticator as wired in production, over Postgres-backed
/// credential storage.
pub type AppAuthenticator = auth::Authenticator<PgUserStore>;

/// The task service as wired in production, over Postgres-backed task
/// storage.
pub type AppTaskService = tasks::TaskService<PgTaskStore>;
