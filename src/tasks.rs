//!
//! # Task Access Control
//!
//! `TaskService` is the only path to task data. Every operation takes the
//! authenticated owner's id and stays inside that owner's slice of the
//! store; a task that exists but belongs to someone else is reported as
//! absent, never as forbidden.

use crate::error::AppError;
use crate::models::{Task, TaskFilter, TaskInput, TaskStatus};
use crate::store::TaskStore;
use uuid::Uuid;

#[derive(Clone)]
pub struct TaskService<S> {
    store: S,
}

impl<S: TaskStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The owner's tasks, narrowed by the optional filters.
    pub async fn list(&self, owner_id: Uuid, filter: &TaskFilter) -> Result<Vec<Task>, AppError> {
        self.store.query(owner_id, filter).await
    }

    /// A single owned task. `TaskNotFound` covers both a missing id and an
    /// id owned by another user.
    pub async fn get_owned(&self, task_id: Uuid, owner_id: Uuid) -> Result<Task, AppError> {
        self.store
            .find_owned(task_id, owner_id)
            .await?
            .ok_or(AppError::TaskNotFound)
    }

    /// Creates a task for the owner. New tasks always start `Open`.
    pub async fn create(&self, input: TaskInput, owner_id: Uuid) -> Result<Task, AppError> {
        self.store.insert(input, owner_id).await
    }

    /// Moves an owned task to a new status. Nothing else changes.
    pub async fn update_status(
        &self,
        task_id: Uuid,
        status: TaskStatus,
        owner_id: Uuid,
    ) -> Result<Task, AppError> {
        let mut task = self.get_owned(task_id, owner_id).await?;
        task.status = status;
        self.store.persist(task).await
    }

    /// Deletes an owned task.
    pub async fn delete(&self, task_id: Uuid, owner_id: Uuid) -> Result<(), AppError> {
        let task = self.get_owned(task_id, owner_id).await?;
        self.store.delete(&task).await
    }
}
