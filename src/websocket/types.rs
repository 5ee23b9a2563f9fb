use serde::{Deserialize, Serialize};

use crate::board::{BoardView, ColumnLayout, ColumnView, Point};
use crate::gesture::{MouseEvent, TouchEvent};
use crate::task::{Category, TaskDetail, TaskId};

/// Server-to-client messages. The browser applies them to the DOM.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    Board(BoardView),
    Highlight {
        column: Option<Category>,
    },
    CardDimmed {
        task_id: TaskId,
        dimmed: bool,
    },
    CardPosition {
        task_id: TaskId,
        position: Point,
    },
    CardPlaced {
        task_id: TaskId,
        column: Category,
    },
    CardReverted {
        task_id: TaskId,
        column: Category,
    },
    /// Re-rendered columns after a move, including their empty-state flag.
    ColumnsChanged {
        columns: Vec<ColumnView>,
    },
    ColumnScrolled {
        column: Category,
        scroll_left: f64,
    },
    TaskDetail(TaskDetail),
    /// Tasks changed through the HTTP API; the client should send `refresh`.
    BoardStale,
    Error(ErrorPayload),
}

impl WsMessage {
    pub fn error(message: impl Into<String>) -> Self {
        WsMessage::Error(ErrorPayload {
            message: message.into(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

// Client-to-server messages
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Column bounding boxes, sent on load and after every resize.
    Layout {
        columns: Vec<ColumnLayout>,
    },
    Mouse(MouseEvent),
    Touch(TouchEvent),
    Refresh,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::input::MouseEventKind;
    use serde_json::json;

    #[test]
    fn test_client_mouse_message() {
        let message: ClientMessage = serde_json::from_value(json!({
            "type": "mouse",
            "kind": "dragover",
            "x": 410.0,
            "y": 120.0,
            "timeStamp": 88.5
        }))
        .unwrap();

        match message {
            ClientMessage::Mouse(event) => {
                assert_eq!(event.kind, MouseEventKind::Dragover);
                assert_eq!(event.card_id, None);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_client_layout_message() {
        let message: ClientMessage = serde_json::from_value(json!({
            "type": "layout",
            "columns": [
                { "column": "to-do", "bounds": { "left": 0.0, "top": 80.0, "width": 250.0, "height": 600.0 } }
            ]
        }))
        .unwrap();

        assert!(matches!(message, ClientMessage::Layout { columns } if columns.len() == 1));
    }

    #[test]
    fn test_server_message_shape() {
        let value = serde_json::to_value(WsMessage::CardPlaced {
            task_id: TaskId::new("T1"),
            column: Category::InProgress,
        })
        .unwrap();

        assert_eq!(
            value,
            json!({ "type": "card_placed", "task_id": "T1", "column": "in-progress" })
        );
    }
}
