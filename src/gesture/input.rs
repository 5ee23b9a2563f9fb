use serde::{Deserialize, Serialize};

use crate::board::Point;
use crate::task::{Category, TaskId};

use super::session::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// What the pointer went down on.
#[derive(Debug, Clone, PartialEq)]
pub enum PressTarget {
    Card(TaskId),
    Column(Category),
    Outside,
}

impl PressTarget {
    /// A card wins over the column that contains it.
    pub fn resolve(card_id: Option<&TaskId>, column: Option<Category>) -> Self {
        match (card_id, column) {
            (Some(id), _) => PressTarget::Card(id.clone()),
            (None, Some(column)) => PressTarget::Column(column),
            (None, None) => PressTarget::Outside,
        }
    }
}

/// Input-source independent pointer stream consumed by the gesture controller.
///
/// Timestamps are the browser's `event.timeStamp` in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Down {
        source: PointerSource,
        target: PressTarget,
        position: Point,
        at_ms: f64,
    },
    /// Native `dragstart`; mouse only.
    DragStart,
    Move {
        position: Point,
        at_ms: f64,
    },
    Up {
        position: Point,
        at_ms: f64,
    },
    Leave,
    /// The platform aborted the sequence (`touchcancel`).
    Cancel,
    LongPressElapsed {
        session: SessionId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseEventKind {
    Mousedown,
    Dragstart,
    Dragover,
    Mousemove,
    Drop,
    Dragend,
    Mouseup,
    Mouseleave,
}

/// Mouse or native drag-and-drop event as captured by the browser.
///
/// `card_id` is the `data-id` of the closest `.task-card` ancestor of the
/// event target, `column` the closest column container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub card_id: Option<TaskId>,
    #[serde(default)]
    pub column: Option<Category>,
    #[serde(default)]
    pub time_stamp: f64,
}

impl MouseEvent {
    pub fn normalize(&self) -> PointerInput {
        let position = Point::new(self.x, self.y);
        let at_ms = self.time_stamp;

        match self.kind {
            MouseEventKind::Mousedown => PointerInput::Down {
                source: PointerSource::Mouse,
                target: PressTarget::resolve(self.card_id.as_ref(), self.column),
                position,
                at_ms,
            },
            MouseEventKind::Dragstart => PointerInput::DragStart,
            MouseEventKind::Dragover | MouseEventKind::Mousemove => {
                PointerInput::Move { position, at_ms }
            }
            MouseEventKind::Drop | MouseEventKind::Dragend | MouseEventKind::Mouseup => {
                PointerInput::Up { position, at_ms }
            }
            MouseEventKind::Mouseleave => PointerInput::Leave,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchEventKind {
    Touchstart,
    Touchmove,
    Touchend,
    Touchcancel,
}

/// Touch event as captured by the browser. `touches` holds the
/// `changedTouches` client coordinates; only the first one is tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchEvent {
    pub kind: TouchEventKind,
    #[serde(default)]
    pub touches: Vec<Point>,
    #[serde(default)]
    pub card_id: Option<TaskId>,
    #[serde(default)]
    pub column: Option<Category>,
    #[serde(default)]
    pub time_stamp: f64,
}

impl TouchEvent {
    /// `None` when a start or move carries no touch point.
    pub fn normalize(&self) -> Option<PointerInput> {
        let at_ms = self.time_stamp;
        let first = self.touches.first().copied();

        match (self.kind, first) {
            (TouchEventKind::Touchstart, Some(position)) => Some(PointerInput::Down {
                source: PointerSource::Touch,
                target: PressTarget::resolve(self.card_id.as_ref(), self.column),
                position,
                at_ms,
            }),
            (TouchEventKind::Touchmove, Some(position)) => {
                Some(PointerInput::Move { position, at_ms })
            }
            (TouchEventKind::Touchend, Some(position)) => Some(PointerInput::Up { position, at_ms }),
            (TouchEventKind::Touchend, None) | (TouchEventKind::Touchcancel, _) => {
                Some(PointerInput::Cancel)
            }
            (TouchEventKind::Touchstart | TouchEventKind::Touchmove, None) => {
                tracing::warn!(kind = ?self.kind, "touch event without touch points");
                None
            }
        }
    }
}
