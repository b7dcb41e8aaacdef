//! UseCase: 接続のライフサイクル管理
//!
//! 接続ごとの状態遷移: `Connecting -> Active -> Disconnected`（終端）
//!
//! - Active に入るとき: Registry / MessagePusher に登録し、ホワイトボードを replay
//! - Disconnected に入るとき: Registry / MessagePusher から登録解除
//!   （他の参加者への通知はしない。WebRTC 側は自身のタイムアウトで切断を検知する）

use std::sync::Arc;

use kokuban_shared::time::Clock;

use crate::domain::{
    Connection, ConnectionId, ConnectionRegistry, MessagePusher, PusherChannel, Timestamp,
};

use super::{broadcast_router::BroadcastRouter, error::ConnectError, sequencer::EventSequencer};

/// 接続・切断のユースケース
pub struct SessionLifecycle {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    router: Arc<BroadcastRouter>,
    sequencer: Arc<EventSequencer>,
    clock: Arc<dyn Clock>,
}

impl SessionLifecycle {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        router: Arc<BroadcastRouter>,
        sequencer: Arc<EventSequencer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            router,
            sequencer,
            clock,
        }
    }

    /// 接続を Active にする
    ///
    /// 登録と replay は同じターンの中で行う。replay が送信チャンネルに積まれる
    /// 前に、他の接続の線分がこの接続に届くことはない。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - トランスポート層が払い出した接続 ID
    /// * `sender` - この接続への送信チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - replay した線分の数
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn connect(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<usize, ConnectError> {
        let turn = self.sequencer.begin().await;

        let mut connection =
            Connection::new(connection_id.clone(), Timestamp::new(self.clock.now_millis()));
        connection.activate()?;

        if !self.registry.register(connection).await {
            tracing::debug!("Connection '{}' was already registered", connection_id);
        }
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        let replayed = self.router.replay_in_turn(&turn, &connection_id).await?;
        tracing::info!(
            seq = turn.seq(),
            "Connection '{}' active, replayed {} stroke(s)",
            connection_id,
            replayed
        );
        Ok(replayed)
    }

    /// 接続を Disconnected にする
    ///
    /// 未知の ID は no-op（`None` を返す）。
    pub async fn disconnect(&self, connection_id: &ConnectionId) -> Option<Connection> {
        let turn = self.sequencer.begin().await;

        let removed = self.registry.unregister(connection_id).await;
        self.message_pusher.unregister_client(connection_id).await;

        let Some(mut connection) = removed else {
            tracing::debug!("Connection '{}' was not registered", connection_id);
            return None;
        };
        if let Err(e) = connection.disconnect() {
            tracing::warn!("Connection '{}': {}", connection_id, e);
        }

        tracing::info!(
            seq = turn.seq(),
            "Connection '{}' disconnected ({} remaining)",
            connection_id,
            self.registry.count().await
        );
        Some(connection)
    }
}
