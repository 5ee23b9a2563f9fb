use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::task::{Category, TaskId};

/// Viewport coordinates in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box as reported by `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Edges count as inside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }
}

/// One column container: its cards in display order plus client layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub column: Category,
    pub cards: Vec<TaskId>,
    pub bounds: Option<Rect>,
    pub scroll_left: f64,
}

impl Lane {
    pub fn new(column: Category) -> Self {
        Self {
            column,
            cards: Vec::new(),
            bounds: None,
            scroll_left: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Client-reported geometry of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ColumnLayout {
    pub column: Category,
    pub bounds: Rect,
}

/// Result of reparenting a card.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveReport {
    pub task_id: TaskId,
    pub from: Category,
    pub to: Category,
    /// Columns whose empty-state placeholder must be re-evaluated, with
    /// their emptiness after the move.
    pub touched: Vec<(Category, bool)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(rect.contains(Point::new(10.0, 20.0)));
        assert!(rect.contains(Point::new(110.0, 70.0)));
        assert!(!rect.contains(Point::new(110.5, 40.0)));
        assert!(!rect.contains(Point::new(50.0, 19.9)));
    }
}
