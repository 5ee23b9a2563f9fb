use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{error::Result, state::AppState};

use super::{board_state::Board, board_view::BoardView};

#[derive(Debug, Deserialize)]
pub struct BoardQuery {
    pub search: Option<String>,
}

/// Get the board grouped by column
#[utoipa::path(
    get,
    path = "/api/board",
    tag = "board",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive title/description filter")
    ),
    responses(
        (status = 200, description = "Board projection", body = BoardView),
        (status = 502, description = "Task store unavailable")
    )
)]
pub async fn get_board(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<BoardView>> {
    let tasks = state.task_service.list_tasks().await?;
    let board = Board::from_tasks(tasks);
    Ok(Json(BoardView::project(&board, query.search.as_deref())))
}
