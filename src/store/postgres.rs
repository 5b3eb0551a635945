use crate::error::AppError;
use crate::models::{Task, TaskFilter, TaskInput, User};
use crate::store::{CredentialStore, TaskStore};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Postgres-backed credential storage. Username uniqueness is guaranteed by
/// the unique index on `users.username`; the resulting SQLSTATE 23505 is
/// translated here and never escapes as a raw storage error.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}

#[async_trait]
impl CredentialStore for PgUserStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        let user = User::new(username.to_string(), password_hash.to_string());

        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, password_hash, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id, username, password_hash, created_at",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateUsername
            } else {
                e.into()
            }
        })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

/// Builds the task list statement for a filter. The owner predicate is
/// always present as `$1`; optional predicates are appended with the next
/// parameter numbers in a fixed order (status, then search). The search
/// pattern is bound once and compared against title and description.
///
/// Must agree with `TaskFilter::matches`.
pub(crate) fn task_query_sql(filter: &TaskFilter) -> String {
    let mut sql = String::from(
        "SELECT id, title, description, status, owner_id, created_at, updated_at \
         FROM tasks WHERE owner_id = $1",
    );
    let mut param = 1;

    if filter.status.is_some() {
        param += 1;
        sql.push_str(&format!(" AND status = ${}", param));
    }
    if filter.search.is_some() {
        param += 1;
        sql.push_str(&format!(
            " AND (title ILIKE ${} OR description ILIKE ${})",
            param, param
        ));
    }

    sql.push_str(" ORDER BY created_at");
    sql
}

/// Postgres-backed task storage.
#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn query(&self, owner_id: Uuid, filter: &TaskFilter) -> Result<Vec<Task>, AppError> {
        let sql = task_query_sql(filter);
        let mut query = sqlx::query_as::<_, Task>(&sql).bind(owner_id);

        if let Some(status) = filter.status {
            query = query.bind(status);
        }
        if let Some(search) = &filter.search {
            query = query.bind(format!("%{}%", search));
        }

        let tasks = query.fetch_all(&self.pool).await?;
        Ok(tasks)
    }

    async fn find_owned(&self, task_id: Uuid, owner_id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, status, owner_id, created_at, updated_at
             FROM tasks WHERE id = $1 AND owner_id = $2",
        )
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn insert(&self, input: TaskInput, owner_id: Uuid) -> Result<Task, AppError> {
        let task = Task::new(input, owner_id);

        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (id, title, description, status, owner_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, title, description, status, owner_id, created_at, updated_at",
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.owner_id)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn persist(&self, task: Task) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks
             SET title = $2, description = $3, status = $4, updated_at = now()
             WHERE id = $1
             RETURNING id, title, description, status, owner_id, created_at, updated_at",
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn delete(&self, task: &Task) -> Result<(), AppError> {
        sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(task.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
