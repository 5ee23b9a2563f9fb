use std::time::Duration;
use tokio::task::JoinHandle;

use crate::board::{Board, BoardView, CategoryMutator, ColumnView};
use crate::gesture::{
    GestureConfig, GestureController, GestureEffect, GestureState, PointerInput, SessionId,
};
use crate::task::{Task, TaskId};

use super::types::{ClientMessage, WsMessage};

/// Work the socket loop carries out on behalf of a [`BoardSession`].
#[derive(Debug)]
pub enum SessionAction {
    Reply(WsMessage),
    ArmLongPress { session: SessionId, after: Duration },
    FetchDetail(TaskId),
    Reload,
    /// Background store write for a drop. The socket loop detaches it.
    Persisting { task_id: TaskId, handle: JoinHandle<()> },
}

/// Board state and gesture controller for one connected browser.
pub struct BoardSession {
    board: Board,
    controller: GestureController,
    mutator: CategoryMutator,
}

impl BoardSession {
    pub fn new(board: Board, mutator: CategoryMutator, config: GestureConfig) -> Self {
        Self {
            board,
            controller: GestureController::new(config),
            mutator,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn gesture_state(&self) -> GestureState {
        self.controller.state()
    }

    pub fn snapshot(&self) -> WsMessage {
        WsMessage::Board(BoardView::project(&self.board, None))
    }

    pub fn reload(&mut self, tasks: Vec<Task>) -> WsMessage {
        self.board.replace_tasks(tasks);
        self.snapshot()
    }

    pub fn apply(&mut self, message: ClientMessage) -> Vec<SessionAction> {
        match message {
            ClientMessage::Layout { columns } => {
                self.board.set_layout(&columns);
                Vec::new()
            }
            ClientMessage::Mouse(event) => self.pointer(event.normalize()),
            ClientMessage::Touch(event) => match event.normalize() {
                Some(input) => self.pointer(input),
                None => Vec::new(),
            },
            ClientMessage::Refresh => vec![SessionAction::Reload],
        }
    }

    pub fn long_press_elapsed(&mut self, session: SessionId) -> Vec<SessionAction> {
        self.pointer(PointerInput::LongPressElapsed { session })
    }

    fn pointer(&mut self, input: PointerInput) -> Vec<SessionAction> {
        match self.controller.handle(input, &self.board) {
            Ok(effects) => effects
                .into_iter()
                .flat_map(|effect| self.effect(effect))
                .collect(),
            Err(e) => {
                tracing::warn!("Gesture ignored: {}", e);
                Vec::new()
            }
        }
    }

    fn effect(&mut self, effect: GestureEffect) -> Vec<SessionAction> {
        match effect {
            GestureEffect::ArmLongPress { session, after } => {
                vec![SessionAction::ArmLongPress { session, after }]
            }
            GestureEffect::DragStarted { task } => vec![SessionAction::Reply(WsMessage::CardDimmed {
                task_id: task,
                dimmed: true,
            })],
            GestureEffect::CardMoved { task, position } => {
                vec![SessionAction::Reply(WsMessage::CardPosition {
                    task_id: task,
                    position,
                })]
            }
            GestureEffect::Highlight { column } => {
                vec![SessionAction::Reply(WsMessage::Highlight { column })]
            }
            GestureEffect::Dropped { task, column } => self.drop_task(task, column),
            GestureEffect::Reverted { task } => {
                let mut actions = vec![SessionAction::Reply(WsMessage::CardDimmed {
                    task_id: task.clone(),
                    dimmed: false,
                })];
                if let Some(column) = self.board.column_of(&task) {
                    actions.push(SessionAction::Reply(WsMessage::CardReverted {
                        task_id: task,
                        column,
                    }));
                }
                actions
            }
            GestureEffect::Tapped { task } => vec![SessionAction::FetchDetail(task)],
            GestureEffect::ColumnScrolled { column, scroll_left } => {
                let scroll_left = self.board.set_scroll_left(column, scroll_left);
                vec![SessionAction::Reply(WsMessage::ColumnScrolled {
                    column,
                    scroll_left,
                })]
            }
        }
    }

    fn drop_task(&mut self, task: TaskId, column: crate::task::Category) -> Vec<SessionAction> {
        let mut actions = vec![SessionAction::Reply(WsMessage::CardDimmed {
            task_id: task.clone(),
            dimmed: false,
        })];

        match self.mutator.move_task(&mut self.board, &task, column) {
            Ok(ticket) => {
                let columns = ticket
                    .report
                    .touched
                    .iter()
                    .map(|(touched, _)| ColumnView::project(&self.board, *touched, None))
                    .collect();

                actions.push(SessionAction::Reply(WsMessage::CardPlaced {
                    task_id: task.clone(),
                    column,
                }));
                actions.push(SessionAction::Reply(WsMessage::ColumnsChanged { columns }));
                actions.push(SessionAction::Persisting {
                    task_id: task,
                    handle: ticket.persistence,
                });
            }
            Err(e) => {
                tracing::warn!("Drop not applied: {}", e);
                actions.push(SessionAction::Reply(WsMessage::error(e.to_string())));
            }
        }
        actions
    }
}
