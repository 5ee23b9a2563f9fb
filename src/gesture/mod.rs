//! Pointer gesture interpretation for the board.
//!
//! Mouse and touch events are normalised by [`input`] into one
//! [`PointerInput`] stream. The [`GestureController`] turns that stream into
//! [`GestureEffect`]s: taps open a task, long presses or native drags move a
//! card between columns, and presses on a column background pan it.

pub mod controller;
pub mod input;
pub mod scroll;
pub mod session;

pub use controller::{GestureController, GestureEffect, GestureState};
pub use input::{MouseEvent, PointerInput, PointerSource, PressTarget, TouchEvent};
pub use scroll::ColumnScroll;
pub use session::{PointerSession, SessionId, TaskGesture, TaskPhase};

use std::time::Duration;
use thiserror::Error;

use crate::task::TaskId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Hold time before a touch press turns into a drag.
    pub long_press: Duration,
    /// Movement on either axis below this stays a tap.
    pub tap_slop: f64,
    pub scroll_multiplier: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press: Duration::from_millis(500),
            tap_slop: 10.0,
            scroll_multiplier: 1.5,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GestureError {
    #[error("gesture session {0} is still active")]
    SessionActive(SessionId),

    #[error("no card for task {0} on the board")]
    UnknownTask(TaskId),
}
