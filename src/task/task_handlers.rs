use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{error::Result, state::AppState, websocket::WsMessage};

use super::{
    task_dto::{CreateTaskRequest, MoveTaskRequest, TaskDetail, UpdateTaskRequest},
    task_models::{Task, TaskId},
};

/// Get all tasks in store order
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "tasks",
    responses(
        (status = 200, description = "List of tasks", body = [Task]),
        (status = 502, description = "Task store unavailable")
    )
)]
pub async fn get_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>> {
    let tasks = state.task_service.list_tasks().await?;
    Ok(Json(tasks))
}

/// Get one task with its subtask progress
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task key")),
    responses(
        (status = 200, description = "Task detail", body = TaskDetail),
        (status = 404, description = "Task not found")
    )
)]
pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<TaskDetail>> {
    let detail = state.task_service.get_task(&TaskId::new(task_id)).await?;
    Ok(Json(detail))
}

/// Create a task
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let task = state.task_service.create_task(payload).await?;
    state.ws_connections.broadcast(WsMessage::BoardStale);

    Ok((StatusCode::CREATED, Json(task)))
}

/// Edit a task; absent fields are kept
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task key")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<Task>> {
    payload.validate()?;

    let task = state
        .task_service
        .update_task(&TaskId::new(task_id), payload)
        .await?;
    state.ws_connections.broadcast(WsMessage::BoardStale);

    Ok(Json(task))
}

/// Move a task to another column
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/category",
    tag = "tasks",
    params(("id" = String, Path, description = "Task key")),
    request_body = MoveTaskRequest,
    responses(
        (status = 200, description = "Task moved", body = Task),
        (status = 404, description = "Task not found")
    )
)]
pub async fn move_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(payload): Json<MoveTaskRequest>,
) -> Result<Json<Task>> {
    let task = state
        .task_service
        .move_task(&TaskId::new(task_id), payload.category)
        .await?;
    state.ws_connections.broadcast(WsMessage::BoardStale);

    Ok(Json(task))
}

/// Flip the completion flag of one subtask
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/subtasks/{index}",
    tag = "tasks",
    params(
        ("id" = String, Path, description = "Task key"),
        ("index" = usize, Path, description = "Subtask position")
    ),
    responses(
        (status = 200, description = "Subtask toggled", body = Task),
        (status = 404, description = "Task or subtask not found")
    )
)]
pub async fn toggle_subtask(
    State(state): State<AppState>,
    Path((task_id, index)): Path<(String, usize)>,
) -> Result<Json<Task>> {
    let task = state
        .task_service
        .toggle_subtask(&TaskId::new(task_id), index)
        .await?;
    state.ws_connections.broadcast(WsMessage::BoardStale);

    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task key")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<StatusCode> {
    state.task_service.delete_task(&TaskId::new(task_id)).await?;
    state.ws_connections.broadcast(WsMessage::BoardStale);

    Ok(StatusCode::NO_CONTENT)
}
