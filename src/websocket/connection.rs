use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::types::WsMessage;

pub type WsSender = mpsc::UnboundedSender<WsMessage>;

/// Open board sockets, keyed by a per-connection id.
#[derive(Clone)]
pub struct ConnectionManager {
    connections: Arc<DashMap<Uuid, WsSender>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(DashMap::new()),
        }
    }

    pub fn add_connection(&self, connection_id: Uuid, sender: WsSender) {
        self.connections.insert(connection_id, sender);
        tracing::info!("Board connection {} opened", connection_id);
    }

    pub fn remove_connection(&self, connection_id: &Uuid) {
        self.connections.remove(connection_id);
        tracing::info!("Board connection {} closed", connection_id);
    }

    /// Sends to every open connection, dropping the ones whose receiver is gone.
    pub fn broadcast(&self, message: WsMessage) {
        self.connections
            .retain(|_, sender| sender.send(message.clone()).is_ok());
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}
