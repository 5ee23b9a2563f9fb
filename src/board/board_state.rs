use std::collections::HashMap;

use crate::task::{Category, Task, TaskId};

use super::board_models::{ColumnLayout, Lane, MoveReport, Point};

/// In-memory board: the source of truth for which column shows which card.
///
/// Every task on the board sits in exactly one lane. Order inside a lane is
/// display order only and is never persisted.
#[derive(Debug, Clone)]
pub struct Board {
    lanes: Vec<Lane>,
    tasks: HashMap<TaskId, Task>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            lanes: Category::ALL.into_iter().map(Lane::new).collect(),
            tasks: HashMap::new(),
        }
    }
}

impl Board {
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut board = Self::default();
        board.replace_tasks(tasks);
        board
    }

    /// Reloads every card, keeping client layout and scroll offsets.
    pub fn replace_tasks(&mut self, tasks: impl IntoIterator<Item = Task>) {
        for lane in &mut self.lanes {
            lane.cards.clear();
        }
        self.tasks.clear();

        for task in tasks {
            if self.tasks.contains_key(&task.id) {
                tracing::warn!(task_id = %task.id, "duplicate task id while building board");
                continue;
            }
            self.lane_mut(task.category).cards.push(task.id.clone());
            self.tasks.insert(task.id.clone(), task);
        }
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lane(&self, column: Category) -> &Lane {
        self.lanes
            .iter()
            .find(|lane| lane.column == column)
            .unwrap_or(&self.lanes[0])
    }

    fn lane_mut(&mut self, column: Category) -> &mut Lane {
        let index = self
            .lanes
            .iter()
            .position(|lane| lane.column == column)
            .unwrap_or(0);
        &mut self.lanes[index]
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn column_of(&self, id: &TaskId) -> Option<Category> {
        self.lanes
            .iter()
            .find(|lane| lane.cards.contains(id))
            .map(|lane| lane.column)
    }

    pub fn is_empty(&self, column: Category) -> bool {
        self.lane(column).is_empty()
    }

    /// First column, in board order, whose bounding box contains `point`.
    pub fn column_at(&self, point: Point) -> Option<Category> {
        self.lanes
            .iter()
            .find(|lane| lane.bounds.is_some_and(|bounds| bounds.contains(point)))
            .map(|lane| lane.column)
    }

    pub fn set_layout(&mut self, layout: &[ColumnLayout]) {
        for entry in layout {
            self.lane_mut(entry.column).bounds = Some(entry.bounds);
        }
    }

    pub fn scroll_left(&self, column: Category) -> f64 {
        self.lane(column).scroll_left
    }

    /// Negative offsets clamp to zero, like `Element.scrollLeft`.
    pub fn set_scroll_left(&mut self, column: Category, offset: f64) -> f64 {
        let offset = offset.max(0.0);
        self.lane_mut(column).scroll_left = offset;
        offset
    }

    /// Reparents a card into `to`. Moving a card into the column it already
    /// occupies changes nothing. Returns `None` for unknown tasks.
    pub fn move_card(&mut self, id: &TaskId, to: Category) -> Option<MoveReport> {
        let from = self.column_of(id)?;

        if from != to {
            self.lane_mut(from).cards.retain(|card| card != id);
            self.lane_mut(to).cards.push(id.clone());
            if let Some(task) = self.tasks.get_mut(id) {
                task.category = to;
            }
        }

        let mut touched = vec![(from, self.is_empty(from))];
        if from != to {
            touched.push((to, self.is_empty(to)));
        }

        Some(MoveReport {
            task_id: id.clone(),
            from,
            to,
            touched,
        })
    }
}
