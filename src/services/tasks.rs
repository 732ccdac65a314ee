use std::sync::Arc;

use crate::error::AppError;
use crate::models::{NewTask, Principal, Task, TaskFilter, TaskInput};
use crate::store::TaskStore;

/// Per-owner task CRUD.
///
/// Every operation addressing an existing task first checks that it exists
/// (404 otherwise) and then that the caller owns it (403 otherwise).
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, owner: &Principal, filter: TaskFilter) -> Result<Vec<Task>, AppError> {
        self.store
            .list_by_owner(owner.user_id, filter.completed())
            .await
    }

    pub async fn create(&self, owner: &Principal, input: TaskInput) -> Result<Task, AppError> {
        let task = self.store.insert(NewTask::new(input, owner.user_id)).await?;
        log::debug!("user {} created task {}", owner.username, task.id);
        Ok(task)
    }

    pub async fn get(&self, owner: &Principal, id: i64) -> Result<Task, AppError> {
        self.owned_task(owner, id).await
    }

    /// Replaces title, due date and priority. Completion is not touched.
    pub async fn update(
        &self,
        owner: &Principal,
        id: i64,
        input: TaskInput,
    ) -> Result<Task, AppError> {
        let mut task = self.owned_task(owner, id).await?;
        task.apply(input);
        self.store.update(&task).await
    }

    pub async fn complete(&self, owner: &Principal, id: i64) -> Result<Task, AppError> {
        let mut task = self.owned_task(owner, id).await?;
        task.completed = true;
        self.store.update(&task).await
    }

    pub async fn delete(&self, owner: &Principal, id: i64) -> Result<(), AppError> {
        self.owned_task(owner, id).await?;
        if self.store.delete(id).await? {
            log::debug!("user {} deleted task {}", owner.username, id);
            Ok(())
        } else {
            Err(AppError::NotFound("Task not found".into()))
        }
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }

    async fn owned_task(&self, owner: &Principal, id: i64) -> Result<Task, AppError> {
        let task = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

        if !task.is_owned_by(owner.user_id) {
            log::warn!(
                "user {} attempted to access task {} owned by user {}",
                owner.username,
                id,
                task.user_id
            );
            return Err(AppError::Forbidden(
                "You do not have access to this task".into(),
            ));
        }
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, TaskPriority};
    use crate::store::InMemoryTaskStore;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn principal(user_id: i64, username: &str) -> Principal {
        Principal {
            user_id,
            username: username.to_string(),
            roles: vec![Role::User],
        }
    }

    fn input(title: &str) -> TaskInput {
        TaskInput {
            title: title.to_string(),
            due_date: None,
            priority: Some(TaskPriority::Medium),
            completed: None,
        }
    }

    fn service() -> TaskService {
        TaskService::new(Arc::new(InMemoryTaskStore::new()))
    }

    #[actix_rt::test]
    async fn test_create_attaches_owner() {
        let tasks = service();
        let alice = principal(1, "alice");

        let task = tasks.create(&alice, input("Write report")).await.unwrap();
        assert_eq!(task.user_id, 1);
        assert!(!task.completed);
        assert_eq!(tasks.get(&alice, task.id).await.unwrap(), task);
    }

    #[actix_rt::test]
    async fn test_list_filters_by_completion() {
        let tasks = service();
        let alice = principal(1, "alice");

        let first = tasks.create(&alice, input("first")).await.unwrap();
        let second = tasks.create(&alice, input("second")).await.unwrap();
        tasks.complete(&alice, second.id).await.unwrap();

        let all = tasks.list(&alice, TaskFilter::All).await.unwrap();
        let done = tasks.list(&alice, TaskFilter::Completed).await.unwrap();
        let pending = tasks.list(&alice, TaskFilter::Pending).await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(done.iter().map(|t| t.id).collect::<Vec<_>>(), vec![second.id]);
        assert_eq!(pending.iter().map(|t| t.id).collect::<Vec<_>>(), vec![first.id]);
    }

    #[actix_rt::test]
    async fn test_update_replaces_editable_fields_only() {
        let tasks = service();
        let alice = principal(1, "alice");
        let task = tasks.create(&alice, input("draft")).await.unwrap();
        tasks.complete(&alice, task.id).await.unwrap();

        let due = NaiveDate::from_ymd_opt(2030, 1, 1);
        let updated = tasks
            .update(
                &alice,
                task.id,
                TaskInput {
                    title: "final".to_string(),
                    due_date: due,
                    priority: Some(TaskPriority::High),
                    completed: Some(false),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "final");
        assert_eq!(updated.due_date, due);
        assert_eq!(updated.priority, Some(TaskPriority::High));
        assert!(updated.completed);
    }

    #[actix_rt::test]
    async fn test_foreign_task_is_forbidden() {
        let tasks = service();
        let alice = principal(1, "alice");
        let bob = principal(2, "bob");
        let task = tasks.create(&alice, input("private")).await.unwrap();

        assert!(matches!(tasks.get(&bob, task.id).await, Err(AppError::Forbidden(_))));
        assert!(matches!(
            tasks.update(&bob, task.id, input("hijacked")).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(tasks.complete(&bob, task.id).await, Err(AppError::Forbidden(_))));
        assert!(matches!(tasks.delete(&bob, task.id).await, Err(AppError::Forbidden(_))));
        assert!(tasks.list(&bob, TaskFilter::All).await.unwrap().is_empty());

        let untouched = tasks.get(&alice, task.id).await.unwrap();
        assert_eq!(untouched.title, "private");
        assert!(!untouched.completed);
    }

    #[actix_rt::test]
    async fn test_deleted_task_is_not_found() {
        let tasks = service();
        let alice = principal(1, "alice");
        let task = tasks.create(&alice, input("ephemeral")).await.unwrap();

        tasks.delete(&alice, task.id).await.unwrap();

        assert!(matches!(tasks.get(&alice, task.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            tasks.update(&alice, task.id, input("again")).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(tasks.delete(&alice, task.id).await, Err(AppError::NotFound(_))));
    }
}
