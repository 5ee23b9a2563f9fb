use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::task_models::{Assignee, Category, Priority, Subtask, Task};

fn validate_subtask_texts(subtasks: &Vec<String>) -> Result<(), ValidationError> {
    if subtasks.iter().any(|text| text.trim().is_empty()) {
        return Err(ValidationError::new("blank_subtask"));
    }
    Ok(())
}

fn validate_subtasks(subtasks: &Vec<Subtask>) -> Result<(), ValidationError> {
    if subtasks.iter().any(|subtask| subtask.text.trim().is_empty()) {
        return Err(ValidationError::new("blank_subtask"));
    }
    Ok(())
}

/// Payload of the "add task" form.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    /// Contact names; resolved into avatars against the contact directory.
    #[serde(default)]
    pub assigned_to: Vec<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_subtask_texts"))]
    pub subtasks: Vec<String>,
    pub due_date: NaiveDate,
}

/// Payload of the "edit task" overlay. Absent fields are kept.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 120))]
    pub title: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub assigned_to: Option<Vec<String>>,
    #[validate(custom(function = "validate_subtasks"))]
    pub subtasks: Option<Vec<Subtask>>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MoveTaskRequest {
    pub category: Category,
}

/// Partial update sent to the store with `PATCH`. Only set fields are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Vec<Assignee>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<Subtask>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl TaskPatch {
    pub fn category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn subtasks(subtasks: Vec<Subtask>) -> Self {
        Self {
            subtasks: Some(subtasks),
            ..Self::default()
        }
    }

    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(assigned_to) = &self.assigned_to {
            task.assigned_to = assigned_to.clone();
        }
        if let Some(subtasks) = &self.subtasks {
            task.subtasks = subtasks.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
    }
}

/// Data behind the task detail overlay opened by a tap.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    pub subtasks_done: usize,
    pub subtasks_total: usize,
}

impl From<Task> for TaskDetail {
    fn from(task: Task) -> Self {
        let (subtasks_done, subtasks_total) = task.subtask_progress();
        Self {
            task,
            subtasks_done,
            subtasks_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(title: &str, subtasks: Vec<&str>) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.to_string(),
            description: None,
            category: None,
            priority: None,
            assigned_to: vec![],
            subtasks: subtasks.into_iter().map(String::from).collect(),
            due_date: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
        }
    }

    #[test]
    fn test_create_request_validation() {
        assert!(request("Ship it", vec!["build", "tag"]).validate().is_ok());
        assert!(request("", vec![]).validate().is_err());
        assert!(request("Ship it", vec!["build", "  "]).validate().is_err());
    }

    #[test]
    fn test_update_request_rejects_blank_subtask() {
        let edit = |texts: Vec<&str>| UpdateTaskRequest {
            subtasks: Some(texts.into_iter().map(Subtask::open).collect()),
            ..UpdateTaskRequest::default()
        };

        assert!(UpdateTaskRequest::default().validate().is_ok());
        assert!(edit(vec!["Wireframe"]).validate().is_ok());
        assert!(edit(vec!["Wireframe", "  "]).validate().is_err());
    }

    #[test]
    fn test_category_patch_serializes_single_field() {
        let body = serde_json::to_value(TaskPatch::category(Category::InProgress)).unwrap();
        assert_eq!(body, json!({ "category": "in-progress" }));
    }
}
