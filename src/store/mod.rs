//!
//! # Storage Contracts
//!
//! Async traits for the two record sets the application persists: user
//! identities and tasks. The services own a store value by composition;
//! production code injects the Postgres implementations from
//! [`postgres`], and tests inject in-memory ones.
//!
//! Every task-reading method takes the owner id explicitly. There is no way
//! to query across owners through these interfaces.

pub mod postgres;

use crate::error::AppError;
use crate::models::{Task, TaskFilter, TaskInput, User};
use async_trait::async_trait;
use uuid::Uuid;

pub use postgres::{PgTaskStore, PgUserStore};

/// Persists and looks up user identities.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Inserts a new identity. Username uniqueness is enforced at the
    /// storage level, so concurrent signups racing on one username resolve
    /// to a single success; the losers get `DuplicateUsername`.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError>;

    /// Lookup by username. No side effects.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
}

/// Persists tasks and answers owner-scoped queries.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks of `owner_id`, narrowed by the filter. Result order is
    /// stable across calls on unchanged data (creation order).
    async fn query(&self, owner_id: Uuid, filter: &TaskFilter) -> Result<Vec<Task>, AppError>;

    /// Single-task lookup scoped to the owner. Returns `None` both for ids
    /// that do not exist and for ids owned by someone else.
    async fn find_owned(&self, task_id: Uuid, owner_id: Uuid) -> Result<Option<Task>, AppError>;

    /// Creates a task for `owner_id`. New tasks always start `Open`.
    async fn insert(&self, input: TaskInput, owner_id: Uuid) -> Result<Task, AppError>;

    /// Writes back a mutated task, touching its `updated_at`.
    async fn persist(&self, task: Task) -> Result<Task, AppError>;

    /// Removes a single task.
    async fn delete(&self, task: &Task) -> Result<(), AppError>;
}
