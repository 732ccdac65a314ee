//! Persistence boundary for users and tasks.
//!
//! Services talk to the traits below through `Arc<dyn UserStore>` and
//! `Arc<dyn TaskStore>`. Two implementations exist:
//!
//! - [`postgres`]: sqlx over a shared `PgPool`, used whenever `DATABASE_URL` is set.
//! - [`memory`]: process-local maps for local development and tests.
//!
//! Stores hold no authorization logic. Ownership checks live in
//! [`TaskService`](crate::services::TaskService).

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{NewTask, NewUser, Task, User};

pub use memory::{InMemoryTaskStore, InMemoryUserStore};
pub use postgres::{PgTaskStore, PgUserStore};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError>;

    /// Inserts a user, failing with `BadRequest` if the username or email is taken.
    async fn insert(&self, user: NewUser) -> Result<User, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Cheap round-trip used by the health check.
    async fn ping(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert(&self, task: NewTask) -> Result<Task, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, AppError>;

    /// Tasks of `owner_id` ordered by id, optionally restricted to a completion state.
    async fn list_by_owner(
        &self,
        owner_id: i64,
        completed: Option<bool>,
    ) -> Result<Vec<Task>, AppError>;

    /// Persists every column of `task`. Fails with `NotFound` if the row is gone.
    async fn update(&self, task: &Task) -> Result<Task, AppError>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}
