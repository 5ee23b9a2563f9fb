use crate::task::Category;

use super::session::SessionId;

/// Horizontal pan of a column that started on its background.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnScroll {
    pub id: SessionId,
    pub column: Category,
    pub start_x: f64,
    pub start_offset: f64,
}

impl ColumnScroll {
    pub fn new(id: SessionId, column: Category, start_x: f64, start_offset: f64) -> Self {
        Self {
            id,
            column,
            start_x,
            start_offset,
        }
    }

    /// `start_offset - delta * multiplier`, never below zero.
    pub fn offset_at(&self, x: f64, multiplier: f64) -> f64 {
        let delta = x - self.start_x;
        (self.start_offset - delta * multiplier).max(0.0)
    }
}
