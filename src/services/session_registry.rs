use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

/// Per-connection state for a live client.
#[derive(Clone, Debug, Serialize)]
pub struct ConnectionState {
    pub connection_id: String,
    /// Set when the upgrade request carried a valid bearer token.
    pub user_id: Option<String>,
    pub connected_at: DateTime<Utc>,
}

/// Registry of live real-time connections keyed by connection id.
///
/// Connect and disconnect events arrive from independent socket tasks, so
/// every mutation goes through the lock.
#[derive(Default)]
pub struct SessionRegistry {
    connections: RwLock<HashMap<String, ConnectionState>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fresh, empty state for the connection. An existing entry
    /// with the same id is replaced.
    pub async fn connect(&self, connection_id: &str, user_id: Option<String>) -> ConnectionState {
        let state = ConnectionState {
            connection_id: connection_id.to_string(),
            user_id,
            connected_at: Utc::now(),
        };

        let mut connections = self.connections.write().await;
        connections.insert(connection_id.to_string(), state.clone());
        log::info!(
            "Client connected: {} ({} live)",
            connection_id,
            connections.len()
        );

        state
    }

    /// Removes the connection. Returns `false` if it was not registered.
    pub async fn disconnect(&self, connection_id: &str) -> bool {
        let mut connections = self.connections.write().await;
        let removed = connections.remove(connection_id).is_some();
        if removed {
            log::info!(
                "Client disconnected: {} ({} live)",
                connection_id,
                connections.len()
            );
        }
        removed
    }

    pub async fn get(&self, connection_id: &str) -> Option<ConnectionState> {
        self.connections.read().await.get(connection_id).cloned()
    }

    pub async fn contains(&self, connection_id: &str) -> bool {
        self.connections.read().await.contains_key(connection_id)
    }

    pub async fn len(&self) -> usize {
        self.connections.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.connections.read().await.is_empty()
    }

    pub async fn connection_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.connections.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}
