//! In-memory implementations of the storage contracts, shared by the
//! integration suites. State lives behind an `Arc`, so a cloned store
//! handle observes everything the service under test does to it.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use taskvault::error::AppError;
use taskvault::models::{Task, TaskFilter, TaskInput, User};
use taskvault::store::{CredentialStore, TaskStore};

#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<Mutex<Vec<User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops a user record, for exercising tokens that outlive their user.
    pub fn remove(&self, username: &str) {
        self.users
            .lock()
            .unwrap()
            .retain(|u| u.username != username);
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl CredentialStore for MemoryUserStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();

        // Stands in for the database unique index.
        if users.iter().any(|u| u.username == username) {
            return Err(AppError::DuplicateUsername);
        }

        let user = User::new(username.to_string(), password_hash.to_string());
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }
}

#[derive(Clone, Default)]
pub struct MemoryTaskStore {
    tasks: Arc<Mutex<Vec<Task>>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn query(&self, owner_id: Uuid, filter: &TaskFilter) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.lock().unwrap();
        // Vec order is insertion order, which keeps results stable.
        Ok(tasks
            .iter()
            .filter(|t| t.owner_id == owner_id && filter.matches(t))
            .cloned()
            .collect())
    }

    async fn find_owned(&self, task_id: Uuid, owner_id: Uuid) -> Result<Option<Task>, AppError> {
        let tasks = self.tasks.lock().unwrap();
        Ok(tasks
            .iter()
            .find(|t| t.id == task_id && t.owner_id == owner_id)
            .cloned())
    }

    async fn insert(&self, input: TaskInput, owner_id: Uuid) -> Result<Task, AppError> {
        let task = Task::new(input, owner_id);
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn persist(&self, mut task: Task) -> Result<Task, AppError> {
        task.updated_at = chrono::Utc::now();

        let mut tasks = self.tasks.lock().unwrap();
        match tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task.clone(),
            None => tasks.push(task.clone()),
        }
        Ok(task)
    }

    async fn delete(&self, task: &Task) -> Result<(), AppError> {
        self.tasks.lock().unwrap().retain(|t| t.id != task.id);
        Ok(())
    }
}
