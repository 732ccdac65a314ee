//! PostgreSQL stores backed by a shared `sqlx::PgPool`.
//!
//! Queries are plain runtime-checked statements so the crate builds without a
//! live database.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{NewTask, NewUser, Task, User};
use crate::store::{TaskStore, UserStore};

const TASK_COLUMNS: &str = "id, title, due_date, priority, completed, user_id";

/// Idempotent bootstrap schema, applied statement by statement.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        username VARCHAR(255) NOT NULL UNIQUE,
        email VARCHAR(255) NOT NULL UNIQUE,
        password_hash VARCHAR(255) NOT NULL
    )",
    "DO $$ BEGIN
        CREATE TYPE task_priority AS ENUM ('HIGH', 'MEDIUM', 'LOW');
    EXCEPTION
        WHEN duplicate_object THEN NULL;
    END $$",
    "CREATE TABLE IF NOT EXISTS tasks (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        due_date DATE,
        priority task_priority,
        completed BOOLEAN NOT NULL DEFAULT FALSE,
        user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
    )",
    "CREATE INDEX IF NOT EXISTS idx_tasks_user_id ON tasks (user_id)",
];

/// Opens a pool against `database_url` and makes sure the schema exists.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}

pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    for statement in SCHEMA {
        sqlx::query(*statement).execute(pool).await?;
    }
    log::info!("database schema is up to date");
    Ok(())
}

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3)
             RETURNING id, username, email, password_hash",
        )
        .bind(user.username)
        .bind(user.email)
        .bind(user.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
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
    async fn insert(&self, task: NewTask) -> Result<Task, AppError> {
        let sql = format!(
            "INSERT INTO tasks (title, due_date, priority, completed, user_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            TASK_COLUMNS
        );
        let created = sqlx::query_as::<_, Task>(&sql)
            .bind(task.title)
            .bind(task.due_date)
            .bind(task.priority)
            .bind(task.completed)
            .bind(task.user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, AppError> {
        let sql = format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS);
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        completed: Option<bool>,
    ) -> Result<Vec<Task>, AppError> {
        let tasks = match completed {
            Some(completed) => {
                let sql = format!(
                    "SELECT {} FROM tasks WHERE user_id = $1 AND completed = $2 ORDER BY id",
                    TASK_COLUMNS
                );
                sqlx::query_as::<_, Task>(&sql)
                    .bind(owner_id)
                    .bind(completed)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY id",
                    TASK_COLUMNS
                );
                sqlx::query_as::<_, Task>(&sql)
                    .bind(owner_id)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(tasks)
    }

    async fn update(&self, task: &Task) -> Result<Task, AppError> {
        let sql = format!(
            "UPDATE tasks
             SET title = $1, due_date = $2, priority = $3, completed = $4
             WHERE id = $5
             RETURNING {}",
            TASK_COLUMNS
        );
        // A concurrent delete surfaces as RowNotFound, i.e. 404.
        let updated = sqlx::query_as::<_, Task>(&sql)
            .bind(&task.title)
            .bind(task.due_date)
            .bind(task.priority)
            .bind(task.completed)
            .bind(task.id)
            .fetch_one(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
