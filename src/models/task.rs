use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Lifecycle state of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Newly created, not yet started. The only legal initial state.
    Open,
    /// Currently being worked on.
    InProgress,
    /// Completed.
    Done,
}

/// Input for creating a task. Status is not accepted here; every task
/// starts out `OPEN`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 1000))]
    pub description: String,
}

/// Body of a status-update request. Enum membership is enforced by
/// deserialization, before any core operation runs.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: TaskStatus,
}

/// A task entity as stored and as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// The user who created the task. Fixed for the task's lifetime.
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional list filters. Absent fields impose no constraint; present
/// fields are combined with AND semantics.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub search: Option<String>,
}

impl TaskFilter {
    /// The filter as a predicate over a single task: exact status match and
    /// case-insensitive substring match against title or description.
    ///
    /// This is the reference semantics for task listing; the SQL produced
    /// for the Postgres store must agree with it.
    pub fn matches(&self, task: &Task) -> bool {
        let status_ok = self.status.map_or(true, |status| status == task.status);
        let search_ok = self.search.as_deref().map_or(true, |needle| {
            let needle = needle.to_lowercase();
            task.title.to_lowercase().contains(&needle)
                || task.description.to_lowercase().contains(&needle)
        });
        status_ok && search_ok
    }
}

impl Task {
    /// Creates a task owned by `owner_id`, always in the `Open` state.
    pub fn new(input: TaskInput, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: TaskStatus::Open,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}
