use std::time::Duration;

use crate::board::{Board, Point};
use crate::task::{Category, TaskId};

use super::input::{PointerInput, PointerSource, PressTarget};
use super::scroll::ColumnScroll;
use super::session::{PointerSession, SessionId, TaskGesture, TaskPhase};
use super::{GestureConfig, GestureError};

/// What the board session has to do in response to a pointer input.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEffect {
    /// Start a timer that feeds `LongPressElapsed { session }` back in.
    ArmLongPress { session: SessionId, after: Duration },
    /// Dim the card; a drag is under way.
    DragStarted { task: TaskId },
    /// Touch drags move the card under the finger.
    CardMoved { task: TaskId, position: Point },
    Highlight { column: Option<Category> },
    Dropped { task: TaskId, column: Category },
    /// Released outside every column; the card stays where it was.
    Reverted { task: TaskId },
    Tapped { task: TaskId },
    ColumnScrolled { column: Category, scroll_left: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Pressed,
    Dragging,
    Panning,
    ScrollingColumn,
}

/// Classifies pointer sequences into taps, drags and column pans.
///
/// Holds at most one [`PointerSession`]; a press while one is active is
/// rejected with [`GestureError::SessionActive`].
#[derive(Debug)]
pub struct GestureController {
    config: GestureConfig,
    last_session: SessionId,
    active: Option<PointerSession>,
}

impl GestureController {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            last_session: 0,
            active: None,
        }
    }

    pub fn state(&self) -> GestureState {
        match &self.active {
            None => GestureState::Idle,
            Some(PointerSession::Column(_)) => GestureState::ScrollingColumn,
            Some(PointerSession::Task(g)) => match g.phase {
                TaskPhase::Pressed => GestureState::Pressed,
                TaskPhase::Dragging => GestureState::Dragging,
                TaskPhase::Panning => GestureState::Panning,
            },
        }
    }

    pub fn active(&self) -> Option<&PointerSession> {
        self.active.as_ref()
    }

    pub fn handle(&mut self, input: PointerInput, board: &Board) -> Result<Vec<GestureEffect>, GestureError> {
        match input {
            PointerInput::Down {
                source,
                target,
                position,
                at_ms,
            } => self.press(source, target, position, at_ms, board),
            PointerInput::DragStart => Ok(self.native_drag_start()),
            PointerInput::LongPressElapsed { session } => Ok(self.long_press_elapsed(session)),
            PointerInput::Move { position, at_ms } => Ok(self.pointer_move(position, at_ms, board)),
            PointerInput::Up { position, at_ms } => Ok(self.release(position, at_ms, board)),
            PointerInput::Leave => Ok(self.leave()),
            PointerInput::Cancel => Ok(self.cancel()),
        }
    }

    fn press(
        &mut self,
        source: PointerSource,
        target: PressTarget,
        position: Point,
        at_ms: f64,
        board: &Board,
    ) -> Result<Vec<GestureEffect>, GestureError> {
        if let Some(active) = &self.active {
            return Err(GestureError::SessionActive(active.id()));
        }

        match target {
            PressTarget::Card(task) => {
                if !board.contains(&task) {
                    return Err(GestureError::UnknownTask(task));
                }
                self.last_session += 1;
                let session = self.last_session;
                tracing::debug!(session, %task, ?source, "task pressed");

                let mut effects = Vec::new();
                if source == PointerSource::Touch {
                    effects.push(GestureEffect::ArmLongPress {
                        session,
                        after: self.config.long_press,
                    });
                }
                self.active = Some(PointerSession::Task(TaskGesture::new(
                    session, task, source, position, at_ms,
                )));
                Ok(effects)
            }
            PressTarget::Column(column) => {
                self.last_session += 1;
                let session = self.last_session;
                tracing::debug!(session, %column, "column scroll started");
                self.active = Some(PointerSession::Column(ColumnScroll::new(
                    session,
                    column,
                    position.x,
                    board.scroll_left(column),
                )));
                Ok(Vec::new())
            }
            PressTarget::Outside => Ok(Vec::new()),
        }
    }

    fn native_drag_start(&mut self) -> Vec<GestureEffect> {
        match &mut self.active {
            Some(PointerSession::Task(g)) if g.phase == TaskPhase::Pressed => vec![begin_drag(g)],
            _ => {
                tracing::debug!("dragstart ignored outside a pressed task gesture");
                Vec::new()
            }
        }
    }

    fn long_press_elapsed(&mut self, session: SessionId) -> Vec<GestureEffect> {
        match &mut self.active {
            Some(PointerSession::Task(g)) if g.id == session && g.phase == TaskPhase::Pressed => {
                vec![begin_drag(g)]
            }
            _ => {
                tracing::debug!(session, "stale long-press timer ignored");
                Vec::new()
            }
        }
    }

    fn pointer_move(&mut self, position: Point, at_ms: f64, board: &Board) -> Vec<GestureEffect> {
        let config = self.config;

        match &mut self.active {
            Some(PointerSession::Task(g)) => {
                let mut effects = Vec::new();
                if g.phase == TaskPhase::Pressed {
                    let moved = g.exceeds_slop(position, config.tap_slop);
                    let due = g.long_press_due(at_ms, config.long_press);
                    let source = g.source;
                    match source {
                        PointerSource::Touch if due => {
                            effects.push(begin_drag(g));
                        }
                        PointerSource::Touch if moved => {
                            tracing::debug!(task = %g.task, "long press cancelled by movement");
                            g.phase = TaskPhase::Panning;
                        }
                        PointerSource::Mouse if moved => effects.push(begin_drag(g)),
                        _ => {}
                    }
                }
                if g.phase == TaskPhase::Dragging {
                    effects.extend(drag_to(g, position, board));
                }
                effects
            }
            Some(PointerSession::Column(scroll)) => vec![GestureEffect::ColumnScrolled {
                column: scroll.column,
                scroll_left: scroll.offset_at(position.x, config.scroll_multiplier),
            }],
            None => Vec::new(),
        }
    }

    fn release(&mut self, position: Point, at_ms: f64, board: &Board) -> Vec<GestureEffect> {
        let Some(session) = self.active.take() else {
            tracing::debug!("release without an active gesture");
            return Vec::new();
        };

        let mut g = match session {
            PointerSession::Task(g) => g,
            PointerSession::Column(scroll) => {
                tracing::debug!(column = %scroll.column, "column scroll ended");
                return Vec::new();
            }
        };

        let mut effects = Vec::new();
        if g.phase == TaskPhase::Pressed {
            let moved = g.exceeds_slop(position, self.config.tap_slop);
            let held = g.source == PointerSource::Touch && g.long_press_due(at_ms, self.config.long_press);

            if held || (g.source == PointerSource::Mouse && moved) {
                effects.push(begin_drag(&mut g));
            } else if !moved {
                tracing::debug!(task = %g.task, "task tapped");
                return vec![GestureEffect::Tapped { task: g.task }];
            }
        }

        if g.phase == TaskPhase::Dragging {
            // A release point outside every column falls back to the highlighted one.
            let target = board.column_at(position).or(g.candidate);
            effects.extend(finish_drag(g, target));
        }
        effects
    }

    fn leave(&mut self) -> Vec<GestureEffect> {
        if let Some(PointerSession::Column(scroll)) = &self.active {
            tracing::debug!(column = %scroll.column, "column scroll left");
            self.active = None;
        }
        Vec::new()
    }

    fn cancel(&mut self) -> Vec<GestureEffect> {
        match self.active.take() {
            Some(PointerSession::Task(g)) if g.phase == TaskPhase::Dragging => finish_drag(g, None),
            _ => Vec::new(),
        }
    }
}

fn begin_drag(g: &mut TaskGesture) -> GestureEffect {
    tracing::debug!(task = %g.task, source = ?g.source, "drag started");
    g.phase = TaskPhase::Dragging;
    GestureEffect::DragStarted { task: g.task.clone() }
}

fn drag_to(g: &mut TaskGesture, position: Point, board: &Board) -> Vec<GestureEffect> {
    let mut effects = Vec::new();
    if g.source == PointerSource::Touch {
        effects.push(GestureEffect::CardMoved {
            task: g.task.clone(),
            position,
        });
    }

    let candidate = board.column_at(position);
    if candidate != g.candidate {
        g.candidate = candidate;
        effects.push(GestureEffect::Highlight { column: candidate });
    }
    effects
}

fn finish_drag(g: TaskGesture, target: Option<Category>) -> Vec<GestureEffect> {
    let mut effects = Vec::new();
    if g.candidate.is_some() {
        effects.push(GestureEffect::Highlight { column: None });
    }

    match target {
        Some(column) => {
            tracing::debug!(task = %g.task, %column, "task dropped");
            effects.push(GestureEffect::Dropped { task: g.task, column });
        }
        None => {
            tracing::debug!(task = %g.task, "drop outside every column");
            effects.push(GestureEffect::Reverted { task: g.task });
        }
    }
    effects
}
