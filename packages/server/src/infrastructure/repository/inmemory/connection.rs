//! InMemory Connection Registry 実装
//!
//! ドメイン層が定義する ConnectionRegistry trait の具体的な実装。
//! 登録順を保つため、接続は Vec で保持します（接続数は小さい前提）。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Connection, ConnectionId, ConnectionRegistry};

/// インメモリ Connection Registry 実装
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    connections: Arc<Mutex<Vec<Connection>>>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, connection: Connection) -> bool {
        let mut connections = self.connections.lock().await;
        if connections.iter().any(|c| c.id == connection.id) {
            tracing::debug!("Connection '{}' already registered", connection.id);
            return false;
        }
        tracing::debug!("Connection '{}' registered", connection.id);
        connections.push(connection);
        true
    }

    async fn unregister(&self, connection_id: &ConnectionId) -> Option<Connection> {
        let mut connections = self.connections.lock().await;
        let position = connections.iter().position(|c| &c.id == connection_id)?;
        tracing::debug!("Connection '{}' unregistered", connection_id);
        Some(connections.remove(position))
    }

    async fn contains(&self, connection_id: &ConnectionId) -> bool {
        let connections = self.connections.lock().await;
        connections.iter().any(|c| &c.id == connection_id)
    }

    async fn all(&self) -> Vec<ConnectionId> {
        let connections = self.connections.lock().await;
        connections.iter().map(|c| c.id.clone()).collect()
    }

    async fn all_except(&self, connection_id: &ConnectionId) -> Vec<ConnectionId> {
        let connections = self.connections.lock().await;
        connections
            .iter()
            .filter(|c| &c.id != connection_id)
            .map(|c| c.id.clone())
            .collect()
    }

    async fn connections(&self) -> Vec<Connection> {
        let connections = self.connections.lock().await;
        connections.clone()
    }

    async fn count(&self) -> usize {
        let connections = self.connections.lock().await;
        connections.len()
    }
}
