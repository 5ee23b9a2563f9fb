use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Opaque key assigned by the task store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Board column a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    ToDo,
    InProgress,
    AwaitFeedback,
    Done,
}

impl Category {
    /// Columns in board order.
    pub const ALL: [Category; 4] = [
        Category::ToDo,
        Category::InProgress,
        Category::AwaitFeedback,
        Category::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ToDo => "to-do",
            Category::InProgress => "in-progress",
            Category::AwaitFeedback => "await-feedback",
            Category::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::ToDo => "To do",
            Category::InProgress => "In progress",
            Category::AwaitFeedback => "Await feedback",
            Category::Done => "Done",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    Urgent,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::Urgent => write!(f, "urgent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Avatar {
    pub initials: String,
    pub bgcolor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Assignee {
    pub name: String,
    pub avatar: Avatar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Subtask {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Subtask {
    pub fn open(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

/// A task as stored under `tasks/{id}`. The key is not part of the body.
///
/// The store drops empty arrays, so both lists default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub assigned_to: Vec<Assignee>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[schema(value_type = String)]
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub assigned_to: Vec<Assignee>,
    pub subtasks: Vec<Subtask>,
    pub due_date: NaiveDate,
}

impl Task {
    pub fn from_record(id: TaskId, record: TaskRecord) -> Self {
        Self {
            id,
            title: record.title,
            description: record.description,
            category: record.category,
            priority: record.priority,
            assigned_to: record.assigned_to,
            subtasks: record.subtasks,
            due_date: record.due_date,
        }
    }

    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category,
            priority: self.priority,
            assigned_to: self.assigned_to.clone(),
            subtasks: self.subtasks.clone(),
            due_date: self.due_date,
        }
    }

    /// `(completed, total)` subtask counts for the card progress bar.
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|s| s.completed).count();
        (done, self.subtasks.len())
    }

    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}
