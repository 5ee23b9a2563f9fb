use std::time::Duration;

use crate::board::Point;
use crate::task::{Category, TaskId};

use super::input::PointerSource;
use super::scroll::ColumnScroll;

pub type SessionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPhase {
    /// Down on a card; not yet a tap or a drag.
    Pressed,
    Dragging,
    /// Touch moved before the long press fired; the browser scrolls the page.
    Panning,
}

/// Ephemeral state of one gesture on a task card, from press to release.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskGesture {
    pub id: SessionId,
    pub task: TaskId,
    pub source: PointerSource,
    pub origin: Point,
    pub pressed_at_ms: f64,
    pub phase: TaskPhase,
    /// Highlighted drop column, recomputed on every move.
    pub candidate: Option<Category>,
}

impl TaskGesture {
    pub fn new(id: SessionId, task: TaskId, source: PointerSource, origin: Point, at_ms: f64) -> Self {
        Self {
            id,
            task,
            source,
            origin,
            pressed_at_ms: at_ms,
            phase: TaskPhase::Pressed,
            candidate: None,
        }
    }

    /// True unless the displacement stays under `slop` on both axes.
    pub fn exceeds_slop(&self, position: Point, slop: f64) -> bool {
        (position.x - self.origin.x).abs() >= slop || (position.y - self.origin.y).abs() >= slop
    }

    pub fn long_press_due(&self, at_ms: f64, threshold: Duration) -> bool {
        at_ms - self.pressed_at_ms >= threshold.as_secs_f64() * 1000.0
    }
}

/// The single pointer session a controller may hold. A pointer sequence is
/// either a task gesture or a column pan, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerSession {
    Task(TaskGesture),
    Column(ColumnScroll),
}

impl PointerSession {
    pub fn id(&self) -> SessionId {
        match self {
            PointerSession::Task(gesture) => gesture.id,
            PointerSession::Column(scroll) => scroll.id,
        }
    }
}
