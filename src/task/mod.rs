pub mod task_dto;
pub mod task_handlers;
pub mod task_models;
pub mod task_repository;
pub mod task_service;

pub use task_dto::{CreateTaskRequest, MoveTaskRequest, TaskDetail, TaskPatch, UpdateTaskRequest};
pub use task_handlers::{
    create_task, delete_task, get_task, get_tasks, move_task, toggle_subtask, update_task,
};
pub use task_models::{Assignee, Avatar, Category, Priority, Subtask, Task, TaskId, TaskRecord};
pub use task_repository::{InMemoryTaskStore, RemoteTaskStore, TaskStore};
pub use task_service::TaskService;
