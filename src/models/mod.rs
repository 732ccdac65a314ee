pub mod task;
pub mod user;

pub use task::{NewTask, Task, TaskFilter, TaskInput, TaskPriority};
pub use user::{NewUser, Principal, Role, User};
