use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::task::{Avatar, Category, Priority, Task};

use super::board_state::Board;

/// A rendered task card. `data_id` is what the browser puts into the card's
/// `data-id` attribute and sends back with pointer events.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub data_id: String,
    pub draggable: bool,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub avatars: Vec<Avatar>,
    pub subtasks_done: usize,
    pub subtasks_total: usize,
    pub due_date: NaiveDate,
}

impl From<&Task> for CardView {
    fn from(task: &Task) -> Self {
        let (subtasks_done, subtasks_total) = task.subtask_progress();
        Self {
            data_id: task.id.to_string(),
            draggable: true,
            title: task.title.clone(),
            description: task.description.clone(),
            category: task.category,
            priority: task.priority,
            avatars: task.assigned_to.iter().map(|a| a.avatar.clone()).collect(),
            subtasks_done,
            subtasks_total,
            due_date: task.due_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView {
    pub column: Category,
    pub label: String,
    /// Shows the "No tasks" placeholder.
    pub empty: bool,
    pub placeholder: String,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
}

impl ColumnView {
    pub fn project(board: &Board, column: Category, search: Option<&str>) -> Self {
        let cards: Vec<CardView> = board
            .lane(column)
            .cards
            .iter()
            .filter_map(|id| board.task(id))
            .filter(|task| search.map_or(true, |query| task.matches(query)))
            .map(CardView::from)
            .collect();

        Self {
            column,
            label: column.label().to_string(),
            empty: cards.is_empty(),
            placeholder: format!("No tasks {}", column.label()),
            cards,
        }
    }
}

impl BoardView {
    pub fn project(board: &Board, search: Option<&str>) -> Self {
        let columns = board
            .lanes()
            .iter()
            .map(|lane| ColumnView::project(board, lane.column, search))
            .collect();
        Self { columns }
    }
}
