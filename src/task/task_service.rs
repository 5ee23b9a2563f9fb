use std::sync::Arc;

use crate::contact::ContactDirectory;
use crate::error::{AppError, Result};
use crate::store::StoreError;

use super::task_dto::{CreateTaskRequest, TaskDetail, TaskPatch, UpdateTaskRequest};
use super::task_models::{Assignee, Category, Subtask, Task, TaskId, TaskRecord};
use super::task_repository::TaskStore;

/// Service layer for task-related business logic.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    contacts: Arc<dyn ContactDirectory>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>, contacts: Arc<dyn ContactDirectory>) -> Self {
        Self { store, contacts }
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.store.read_all().await?)
    }

    pub async fn get_task(&self, task_id: &TaskId) -> Result<TaskDetail> {
        Ok(self.find(task_id).await?.into())
    }

    pub async fn create_task(&self, payload: CreateTaskRequest) -> Result<Task> {
        let record = TaskRecord {
            title: non_blank_title(&payload.title)?,
            description: payload.description.unwrap_or_default(),
            category: payload.category.unwrap_or(Category::ToDo),
            priority: payload.priority.unwrap_or_default(),
            assigned_to: self.resolve_assignees(&payload.assigned_to).await?,
            subtasks: payload.subtasks.into_iter().map(Subtask::open).collect(),
            due_date: payload.due_date,
        };

        let id = self.store.create_one(&record).await?;
        tracing::info!(task_id = %id, title = %record.title, "task created");
        Ok(Task::from_record(id, record))
    }

    pub async fn update_task(&self, task_id: &TaskId, payload: UpdateTaskRequest) -> Result<Task> {
        let title = match payload.title {
            Some(title) => Some(non_blank_title(&title)?),
            None => None,
        };
        let mut task = self.find(task_id).await?;

        let assigned_to = match &payload.assigned_to {
            Some(names) => Some(self.resolve_assignees(names).await?),
            None => None,
        };
        TaskPatch {
            title,
            description: payload.description,
            category: None,
            priority: payload.priority,
            assigned_to,
            subtasks: payload.subtasks,
            due_date: payload.due_date,
        }
        .apply_to(&mut task);

        self.store.replace_one(&task).await?;
        Ok(task)
    }

    pub async fn move_task(&self, task_id: &TaskId, category: Category) -> Result<Task> {
        let mut task = self.find(task_id).await?;
        self.store
            .update_fields(task_id, &TaskPatch::category(category))
            .await?;
        task.category = category;
        Ok(task)
    }

    pub async fn toggle_subtask(&self, task_id: &TaskId, index: usize) -> Result<Task> {
        let mut task = self.find(task_id).await?;
        let subtask = task
            .subtasks
            .get_mut(index)
            .ok_or_else(|| AppError::NotFound(format!("Subtask {} not found", index)))?;
        subtask.completed = !subtask.completed;

        self.store
            .update_fields(task_id, &TaskPatch::subtasks(task.subtasks.clone()))
            .await?;
        Ok(task)
    }

    pub async fn delete_task(&self, task_id: &TaskId) -> Result<()> {
        self.find(task_id).await?;
        self.store.delete_one(task_id).await?;
        tracing::info!(%task_id, "task deleted");
        Ok(())
    }

    async fn find(&self, task_id: &TaskId) -> Result<Task> {
        match self.store.read_one(task_id).await {
            Ok(task) => Ok(task),
            Err(StoreError::NotFound(_)) => Err(AppError::NotFound("Task not found".into())),
            Err(e) => Err(e.into()),
        }
    }

    async fn resolve_assignees(&self, names: &[String]) -> Result<Vec<Assignee>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let contacts = self.contacts.read_all().await?;
        names
            .iter()
            .map(|name| {
                contacts
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
                    .map(|c| c.to_assignee())
                    .ok_or_else(|| AppError::Validation(format!("Unknown contact: {}", name)))
            })
            .collect()
    }
}

fn non_blank_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Title must not be blank".into()));
    }
    Ok(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{Contact, InMemoryContactDirectory};
    use crate::task::task_repository::InMemoryTaskStore;
    use chrono::NaiveDate;

    fn service() -> TaskService {
        let contacts = InMemoryContactDirectory::new(vec![Contact {
            name: "Sofia Müller".into(),
            email: "sofia@example.com".into(),
            phone: String::new(),
            bgcolor: "#00bee8".into(),
        }]);
        TaskService::new(Arc::new(InMemoryTaskStore::new()), Arc::new(contacts))
    }

    fn create_request(assigned_to: Vec<&str>) -> CreateTaskRequest {
        CreateTaskRequest {
            title: "  Contact form  ".into(),
            description: Some("Build the form".into()),
            category: None,
            priority: None,
            assigned_to: assigned_to.into_iter().map(String::from).collect(),
            subtasks: vec!["Markup".into(), "Validation".into()],
            due_date: NaiveDate::from_ymd_opt(2026, 11, 11).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_resolves_assignees_and_defaults() {
        let service = service();
        let task = service
            .create_task(create_request(vec!["sofia müller"]))
            .await
            .unwrap();

        assert_eq!(task.title, "Contact form");
        assert_eq!(task.category, Category::ToDo);
        assert_eq!(task.assigned_to[0].avatar.initials, "SM");
        assert_eq!(task.subtask_progress(), (0, 2));

        let stored = service.get_task(&task.id).await.unwrap();
        assert_eq!(stored.subtasks_total, 2);
    }

    #[tokio::test]
    async fn test_create_with_unknown_contact_fails() {
        let result = service().create_task(create_request(vec!["Nobody"])).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_toggle_subtask_and_move() {
        let service = service();
        let task = service.create_task(create_request(vec![])).await.unwrap();

        let task = service.toggle_subtask(&task.id, 1).await.unwrap();
        assert!(task.subtasks[1].completed);
        assert!(matches!(
            service.toggle_subtask(&task.id, 5).await,
            Err(AppError::NotFound(_))
        ));

        service.move_task(&task.id, Category::AwaitFeedback).await.unwrap();
        let detail = service.get_task(&task.id).await.unwrap();
        assert_eq!(detail.task.category, Category::AwaitFeedback);
        assert_eq!(detail.subtasks_done, 1);
    }

    #[tokio::test]
    async fn test_update_keeps_absent_fields() {
        let service = service();
        let task = service.create_task(create_request(vec!["Sofia Müller"])).await.unwrap();

        let updated = service
            .update_task(
                &task.id,
                UpdateTaskRequest {
                    title: Some("Contact page".into()),
                    ..UpdateTaskRequest::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Contact page");
        assert_eq!(updated.description, "Build the form");
        assert_eq!(updated.assigned_to.len(), 1);
    }

    #[tokio::test]
    async fn test_update_rejects_blank_title() {
        let service = service();
        let task = service.create_task(create_request(vec![])).await.unwrap();

        let result = service
            .update_task(
                &task.id,
                UpdateTaskRequest {
                    title: Some("   ".into()),
                    ..UpdateTaskRequest::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(service.get_task(&task.id).await.unwrap().task.title, "Contact form");
    }

    #[tokio::test]
    async fn test_delete_missing_task() {
        let result = service().delete_task(&TaskId::new("ghost")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
