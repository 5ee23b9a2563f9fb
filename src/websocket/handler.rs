use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    board::Board,
    error::Result,
    gesture::SessionId,
    state::AppState,
    websocket::types::{ClientMessage, WsMessage},
};

use super::connection::WsSender;
use super::session::{BoardSession, SessionAction};

/// Board WebSocket: raw pointer events in, render updates out
#[utoipa::path(
    get,
    path = "/ws",
    tag = "board",
    responses(
        (status = 101, description = "Switching to the board WebSocket protocol")
    )
)]
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn load_session(state: &AppState) -> Result<BoardSession> {
    let tasks = state.task_store.read_all().await?;
    Ok(BoardSession::new(
        Board::from_tasks(tasks),
        state.mutator.clone(),
        state.config.gesture(),
    ))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: AppState) {
    let connection_id = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();

    state.ws_connections.add_connection(connection_id, tx.clone());

    let mut session = match load_session(&state).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to load board for connection {}: {:?}", connection_id, e);
            let _ = tx.send(WsMessage::error("Board could not be loaded"));
            BoardSession::new(Board::default(), state.mutator.clone(), state.config.gesture())
        }
    };
    let _ = tx.send(session.snapshot());

    // Spawn task to send messages from channel to WebSocket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(json) = serde_json::to_string(&msg) {
                if sender.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
        }
    });

    // Spawn task to receive messages and long-press timers
    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        let (timer_tx, mut timer_rx) = mpsc::unbounded_channel::<SessionId>();

        loop {
            let actions = tokio::select! {
                incoming = receiver.next() => match incoming {
                    Some(Ok(Message::Text(text))) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(message) => session.apply(message),
                        Err(e) => {
                            tracing::warn!("Invalid board message: {}", e);
                            vec![SessionAction::Reply(WsMessage::error(format!(
                                "Invalid message format: {}",
                                e
                            )))]
                        }
                    },
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => continue,
                },
                Some(session_id) = timer_rx.recv() => session.long_press_elapsed(session_id),
            };

            for action in actions {
                perform(action, &mut session, &state_clone, &tx, &timer_tx).await;
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.ws_connections.remove_connection(&connection_id);
}

async fn perform(
    action: SessionAction,
    session: &mut BoardSession,
    state: &AppState,
    tx: &WsSender,
    timer_tx: &mpsc::UnboundedSender<SessionId>,
) {
    match action {
        SessionAction::Reply(message) => {
            let _ = tx.send(message);
        }
        SessionAction::ArmLongPress { session: session_id, after } => {
            let timer_tx = timer_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(after).await;
                let _ = timer_tx.send(session_id);
            });
        }
        SessionAction::FetchDetail(task_id) => {
            let store = state.task_store.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                match store.read_one(&task_id).await {
                    Ok(task) => {
                        let _ = tx.send(WsMessage::TaskDetail(task.into()));
                    }
                    Err(e) => {
                        tracing::error!(%task_id, "Failed to load task detail: {}", e);
                        let _ = tx.send(WsMessage::error("Task could not be loaded"));
                    }
                }
            });
        }
        SessionAction::Reload => match state.task_store.read_all().await {
            Ok(tasks) => {
                let _ = tx.send(session.reload(tasks));
            }
            Err(e) => {
                tracing::error!("Failed to reload board: {}", e);
                let _ = tx.send(WsMessage::error("Board could not be reloaded"));
            }
        },
        SessionAction::Persisting { task_id, .. } => {
            tracing::debug!(%task_id, "category write detached");
        }
    }
}
