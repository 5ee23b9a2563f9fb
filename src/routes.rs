use crate::{
    board::{self, BoardView, CardView, ColumnView},
    contact::{self, Contact},
    state::AppState,
    task::{
        self, Assignee, Avatar, Category, CreateTaskRequest, MoveTaskRequest, Priority, Subtask,
        Task, TaskDetail, UpdateTaskRequest,
    },
    websocket,
};
use axum::{
    routing::{get, patch},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        board::board_handlers::get_board,
        task::task_handlers::get_tasks,
        task::task_handlers::get_task,
        task::task_handlers::create_task,
        task::task_handlers::update_task,
        task::task_handlers::move_task,
        task::task_handlers::toggle_subtask,
        task::task_handlers::delete_task,
        contact::contact_handlers::get_contacts,
        websocket::handler::ws_handler,
    ),
    components(
        schemas(
            BoardView,
            ColumnView,
            CardView,
            Task,
            TaskDetail,
            CreateTaskRequest,
            UpdateTaskRequest,
            MoveTaskRequest,
            Category,
            Priority,
            Assignee,
            Avatar,
            Subtask,
            Contact,
        )
    ),
    tags(
        (name = "board", description = "Board projection and live gesture socket"),
        (name = "tasks", description = "Task management endpoints"),
        (name = "contacts", description = "Assignable contacts")
    )
)]
struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let task_routes = Router::new()
        .route("/", get(task::get_tasks).post(task::create_task))
        .route(
            "/:id",
            get(task::get_task)
                .put(task::update_task)
                .delete(task::delete_task),
        )
        .route("/:id/category", patch(task::move_task))
        .route("/:id/subtasks/:index", patch(task::toggle_subtask));

    let api_routes = Router::new()
        .route("/board", get(board::get_board))
        .route("/contacts", get(contact::get_contacts))
        .nest("/tasks", task_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .route("/ws", get(websocket::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::InMemoryContactDirectory;
    use crate::state::Config;
    use crate::task::{InMemoryTaskStore, TaskId, TaskRecord};
    use crate::websocket::WsMessage;
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::sync::mpsc;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn task(id: &str, title: &str, category: Category) -> Task {
        Task::from_record(
            TaskId::new(id),
            TaskRecord {
                title: title.to_string(),
                description: String::new(),
                category,
                priority: Priority::Medium,
                assigned_to: vec![],
                subtasks: vec![Subtask::open("Draft")],
                due_date: NaiveDate::from_ymd_opt(2026, 11, 30).unwrap(),
            },
        )
    }

    fn state() -> AppState {
        let store = InMemoryTaskStore::with_tasks(vec![
            task("T1", "Contact form", Category::ToDo),
            task("T2", "Kochwelt recipe", Category::InProgress),
        ]);
        AppState::new(
            Config::default(),
            Arc::new(store),
            Arc::new(InMemoryContactDirectory::new(vec![])),
        )
    }

    async fn send(state: &AppState, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(body.to_string())).unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_board_groups_and_filters() {
        let state = state();

        let (status, body) = send(&state, Method::GET, "/api/board", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["columns"].as_array().unwrap().len(), 4);
        assert_eq!(body["columns"][0]["cards"][0]["dataId"], "T1");
        assert_eq!(body["columns"][1]["cards"][0]["dataId"], "T2");
        assert_eq!(body["columns"][3]["placeholder"], "No tasks Done");

        let (_, body) = send(&state, Method::GET, "/api/board?search=KOCH", None).await;
        assert_eq!(body["columns"][0]["empty"], true);
        assert_eq!(body["columns"][1]["cards"][0]["title"], "Kochwelt recipe");
    }

    #[tokio::test]
    async fn test_create_task_broadcasts_board_stale() {
        let state = state();
        let (tx, mut rx) = mpsc::unbounded_channel();
        state.ws_connections.add_connection(Uuid::new_v4(), tx);

        let (status, body) = send(
            &state,
            Method::POST,
            "/api/tasks",
            Some(json!({
                "title": "Write tests",
                "subtasks": ["Routes"],
                "dueDate": "2026-12-01"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["category"], "to-do");
        assert_eq!(body["priority"], "medium");
        assert!(matches!(rx.try_recv(), Ok(WsMessage::BoardStale)));
    }

    #[tokio::test]
    async fn test_create_task_rejects_invalid_payload() {
        let (status, body) = send(
            &state(),
            Method::POST,
            "/api/tasks",
            Some(json!({ "title": "", "dueDate": "2026-12-01" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_edit_rejects_blank_title_and_subtask() {
        let state = state();

        let (status, _) = send(
            &state,
            Method::PUT,
            "/api/tasks/T1",
            Some(json!({ "subtasks": [{ "text": "  ", "completed": false }] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&state, Method::PUT, "/api/tasks/T1", Some(json!({ "title": "   " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&state, Method::GET, "/api/tasks/T1", None).await;
        assert_eq!(body["title"], "Contact form");
        assert_eq!(body["subtasks"][0]["text"], "Draft");
    }

    #[tokio::test]
    async fn test_move_toggle_and_delete() {
        let state = state();

        let (status, body) = send(
            &state,
            Method::PATCH,
            "/api/tasks/T1/category",
            Some(json!({ "category": "await-feedback" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "await-feedback");

        let (status, body) = send(&state, Method::PATCH, "/api/tasks/T1/subtasks/0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["subtasks"][0]["completed"], true);

        let (_, body) = send(&state, Method::GET, "/api/tasks/T1", None).await;
        assert_eq!(body["category"], "await-feedback");
        assert_eq!(body["subtasksDone"], 1);

        let (status, _) = send(&state, Method::DELETE, "/api/tasks/T1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&state, Method::GET, "/api/tasks/T1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_contacts_empty_directory() {
        let (status, body) = send(&state(), Method::GET, "/api/contacts", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}
