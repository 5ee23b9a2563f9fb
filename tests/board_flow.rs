use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use task_board::{
    board::{Board, CategoryMutator, ColumnLayout, Point, Rect},
    gesture::{input::TouchEventKind, GestureConfig, GestureState, TouchEvent},
    store::{StoreError, StoreResult},
    task::{Category, InMemoryTaskStore, Priority, Task, TaskId, TaskPatch, TaskRecord, TaskStore},
    websocket::{BoardSession, ClientMessage, SessionAction, WsMessage},
};

/// Store whose writes always fail, as when the network is down.
struct OfflineStore;

#[async_trait]
impl TaskStore for OfflineStore {
    async fn read_all(&self) -> StoreResult<Vec<Task>> {
        Err(StoreError::Unavailable("offline".into()))
    }

    async fn read_one(&self, id: &TaskId) -> StoreResult<Task> {
        Err(StoreError::NotFound(format!("tasks/{}", id)))
    }

    async fn create_one(&self, _task: &TaskRecord) -> StoreResult<TaskId> {
        Err(StoreError::Unavailable("offline".into()))
    }

    async fn update_fields(&self, _id: &TaskId, _fields: &TaskPatch) -> StoreResult<()> {
        Err(StoreError::Unavailable("offline".into()))
    }

    async fn replace_one(&self, _task: &Task) -> StoreResult<()> {
        Err(StoreError::Unavailable("offline".into()))
    }

    async fn delete_one(&self, _id: &TaskId) -> StoreResult<()> {
        Err(StoreError::Unavailable("offline".into()))
    }
}

fn task(id: &str, category: Category) -> Task {
    Task::from_record(
        TaskId::new(id),
        TaskRecord {
            title: format!("Task {}", id),
            description: String::new(),
            category,
            priority: Priority::Urgent,
            assigned_to: vec![],
            subtasks: vec![],
            due_date: NaiveDate::from_ymd_opt(2026, 10, 31).unwrap(),
        },
    )
}

fn tasks() -> Vec<Task> {
    vec![task("T1", Category::ToDo), task("T7", Category::Done)]
}

fn session(mutator: CategoryMutator) -> BoardSession {
    let mut session = BoardSession::new(Board::from_tasks(tasks()), mutator, GestureConfig::default());
    let columns = Category::ALL
        .iter()
        .enumerate()
        .map(|(i, column)| ColumnLayout {
            column: *column,
            bounds: Rect::new(i as f64 * 320.0, 100.0, 300.0, 700.0),
        })
        .collect();
    session.apply(ClientMessage::Layout { columns });
    session
}

fn touch(kind: TouchEventKind, x: f64, y: f64, card: Option<&str>, at: f64) -> ClientMessage {
    ClientMessage::Touch(TouchEvent {
        kind,
        touches: vec![Point::new(x, y)],
        card_id: card.map(TaskId::new),
        column: None,
        time_stamp: at,
    })
}

/// Runs a long-press drag of `card` from `(x0, y)` to `(x1, y)`.
fn long_press_drag(session: &mut BoardSession, card: &str, x0: f64, x1: f64, y: f64) -> Vec<SessionAction> {
    let mut actions = session.apply(touch(TouchEventKind::Touchstart, x0, y, Some(card), 0.0));
    let armed = actions.iter().find_map(|action| match action {
        SessionAction::ArmLongPress { session, .. } => Some(*session),
        _ => None,
    });
    let session_id = armed.expect("touch press arms the long-press timer");

    actions.extend(session.long_press_elapsed(session_id));
    assert_eq!(session.gesture_state(), GestureState::Dragging);

    actions.extend(session.apply(touch(TouchEventKind::Touchmove, x1, y, None, 600.0)));
    actions.extend(session.apply(touch(TouchEventKind::Touchend, x1, y, None, 650.0)));
    actions
}

async fn await_persistence(actions: Vec<SessionAction>) -> usize {
    let mut persisted = 0;
    for action in actions {
        if let SessionAction::Persisting { handle, .. } = action {
            handle.await.unwrap();
            persisted += 1;
        }
    }
    persisted
}

#[tokio::test]
async fn long_press_drag_moves_card_and_persists_category() {
    let store = Arc::new(InMemoryTaskStore::with_tasks(tasks()));
    let mutator = CategoryMutator::new(store.clone());
    let mut session = session(mutator.clone());

    let actions = long_press_drag(&mut session, "T1", 50.0, 400.0, 300.0);

    assert!(actions.iter().any(|action| matches!(
        action,
        SessionAction::Reply(WsMessage::Highlight { column: Some(Category::InProgress) })
    )));
    assert!(actions.iter().any(|action| matches!(
        action,
        SessionAction::Reply(WsMessage::CardPlaced { column: Category::InProgress, .. })
    )));
    assert_eq!(await_persistence(actions).await, 1);

    let board = session.board();
    assert!(board.lane(Category::ToDo).cards.is_empty());
    assert_eq!(board.lane(Category::InProgress).cards, vec![TaskId::new("T1")]);

    let stored = store.read_one(&TaskId::new("T1")).await.unwrap();
    assert_eq!(stored.category, Category::InProgress);
    assert!(!mutator.is_pending(&TaskId::new("T1")));
    assert_eq!(session.gesture_state(), GestureState::Idle);
}

#[tokio::test]
async fn short_touch_opens_task_detail() {
    let store = Arc::new(InMemoryTaskStore::with_tasks(tasks()));
    let mut session = session(CategoryMutator::new(store));

    session.apply(touch(TouchEventKind::Touchstart, 1000.0, 200.0, Some("T7"), 0.0));
    let actions = session.apply(touch(TouchEventKind::Touchend, 1003.0, 204.0, Some("T7"), 200.0));

    assert!(matches!(actions.as_slice(), [SessionAction::FetchDetail(id)] if id.as_str() == "T7"));
    assert_eq!(session.board().column_of(&TaskId::new("T7")), Some(Category::Done));
}

#[tokio::test]
async fn failed_write_keeps_visual_move() {
    let mutator = CategoryMutator::new(Arc::new(OfflineStore));
    let mut session = session(mutator.clone());

    let actions = long_press_drag(&mut session, "T1", 50.0, 1000.0, 300.0);
    assert_eq!(await_persistence(actions).await, 1);

    assert_eq!(session.board().column_of(&TaskId::new("T1")), Some(Category::Done));
    assert_eq!(mutator.unsynced(&TaskId::new("T1")), Some(Category::Done));
}
