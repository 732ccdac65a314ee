//! In-memory stores.
//!
//! Used when no `DATABASE_URL` is configured and throughout the test suite.
//! Ids come from per-store monotonic counters starting at 1, mirroring
//! `BIGSERIAL`. Locks are never held across an `.await`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;

use crate::error::AppError;
use crate::models::{NewTask, NewUser, Task, User};
use crate::store::{TaskStore, UserStore};

/// Users keyed by id. A single lock keeps the username/email uniqueness
/// check and the insert atomic.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.users.read().values().any(|u| u.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.users.read().values().any(|u| u.email == email))
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write();
        if users
            .values()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(AppError::BadRequest(
                "Username or email already exists!".into(),
            ));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
        };
        users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: DashMap<i64, Task>,
    next_id: AtomicI64,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, task: NewTask) -> Result<Task, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = task.into_task(id);
        self.tasks.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, AppError> {
        Ok(self.tasks.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        completed: Option<bool>,
    ) -> Result<Vec<Task>, AppError> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|entry| entry.user_id == owner_id)
            .filter(|entry| completed.map_or(true, |flag| entry.completed == flag))
            .map(|entry| entry.value().clone())
            .collect();
        tasks.sort_by_key(|task| task.id);
        Ok(tasks)
    }

    async fn update(&self, task: &Task) -> Result<Task, AppError> {
        let mut entry = self
            .tasks
            .get_mut(&task.id)
            .ok_or_else(|| AppError::NotFound("Record not found".into()))?;
        *entry.value_mut() = task.clone();
        Ok(task.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tasks.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
