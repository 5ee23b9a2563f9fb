use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::{
    error::{AppError, Result},
    task::{Category, TaskId, TaskPatch, TaskStore},
};

use super::{board_models::MoveReport, board_state::Board};

/// A move that has been applied to the board and whose store write is in
/// flight.
#[derive(Debug)]
pub struct MoveTicket {
    pub report: MoveReport,
    pub persistence: JoinHandle<()>,
}

/// Applies a drop: reparents the card on the board at once, then writes the
/// new `category` to the task store in the background.
///
/// Writes are never rolled back. A failed write is logged and the task is
/// remembered as unsynced until a later write for it succeeds. Concurrent
/// writes for the same task are not serialised; the store keeps whichever
/// lands last.
#[derive(Clone)]
pub struct CategoryMutator {
    store: Arc<dyn TaskStore>,
    pending: Arc<DashMap<TaskId, u64>>,
    unsynced: Arc<DashMap<TaskId, Category>>,
    generation: Arc<AtomicU64>,
}

impl CategoryMutator {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self {
            store,
            pending: Arc::new(DashMap::new()),
            unsynced: Arc::new(DashMap::new()),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn move_task(&self, board: &mut Board, task_id: &TaskId, column: Category) -> Result<MoveTicket> {
        let report = board.move_card(task_id, column).ok_or_else(|| {
            tracing::warn!(%task_id, "move requested for a task that is not on the board");
            AppError::NotFound(format!("Task {} is not on the board", task_id))
        })?;

        tracing::info!(
            %task_id,
            from = %report.from,
            to = %report.to,
            "task moved on board"
        );

        let persistence = self.persist(task_id.clone(), column);
        Ok(MoveTicket { report, persistence })
    }

    fn persist(&self, task_id: TaskId, column: Category) -> JoinHandle<()> {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        self.pending.insert(task_id.clone(), generation);

        let store = self.store.clone();
        let pending = self.pending.clone();
        let unsynced = self.unsynced.clone();

        tokio::spawn(async move {
            let result = store.update_fields(&task_id, &TaskPatch::category(column)).await;
            if let Err(e) = &result {
                tracing::error!(
                    %task_id,
                    category = %column,
                    error = %e,
                    "failed to persist task category"
                );
            }

            // Only the latest write for a task may touch the unsynced ledger.
            if pending.remove_if(&task_id, |_, g| *g == generation).is_none() {
                tracing::debug!(%task_id, generation, "superseded category write finished");
                return;
            }
            match result {
                Ok(()) => {
                    tracing::debug!(%task_id, category = %column, "task category persisted");
                    unsynced.remove(&task_id);
                }
                Err(_) => {
                    unsynced.insert(task_id, column);
                }
            }
        })
    }

    /// A category write for this task has not completed yet.
    pub fn is_pending(&self, task_id: &TaskId) -> bool {
        self.pending.contains_key(task_id)
    }

    /// The category the board shows but the store may not hold.
    pub fn unsynced(&self, task_id: &TaskId) -> Option<Category> {
        self.unsynced.get(task_id).map(|entry| *entry.value())
    }
}
