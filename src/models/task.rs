use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

/// Input structure for creating or updating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    /// Must be between 1 and 255 characters.
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,

    pub due_date: Option<NaiveDate>,

    pub priority: Option<TaskPriority>,

    /// Only honored when creating; updates go through the dedicated complete operation.
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<TaskPriority>,
    pub completed: bool,
    /// Owning user. Kept out of the JSON representation.
    #[serde(skip)]
    pub user_id: i64,
}

/// A task ready to be inserted; the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<TaskPriority>,
    pub completed: bool,
    pub user_id: i64,
}

impl NewTask {
    /// Attaches `owner_id` to a validated `TaskInput`.
    pub fn new(input: TaskInput, owner_id: i64) -> Self {
        Self {
            title: input.title,
            due_date: input.due_date,
            priority: input.priority,
            completed: input.completed.unwrap_or(false),
            user_id: owner_id,
        }
    }

    pub fn into_task(self, id: i64) -> Task {
        Task {
            id,
            title: self.title,
            due_date: self.due_date,
            priority: self.priority,
            completed: self.completed,
            user_id: self.user_id,
        }
    }
}

impl Task {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }

    /// Overwrites the editable fields. Completion is left untouched.
    pub fn apply(&mut self, input: TaskInput) {
        self.title = input.title;
        self.due_date = input.due_date;
        self.priority = input.priority;
    }
}

/// Which slice of a user's tasks to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    Completed,
    Pending,
}

impl TaskFilter {
    /// The `completed` value to match, or `None` for no predicate.
    pub fn completed(self) -> Option<bool> {
        match self {
            TaskFilter::All => None,
            TaskFilter::Completed => Some(true),
            TaskFilter::Pending => Some(false),
        }
    }
}
