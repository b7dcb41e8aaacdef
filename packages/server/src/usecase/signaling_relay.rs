//! UseCase: Signaling Relay
//!
//! WebRTC のネゴシエーション（offer / answer / ICE candidate）を、送信者以外の
//! 接続にそのまま中継する。ペイロードは解釈しない。
//!
//! 2 者間の通話を前提としている。3 接続以上ある場合は送信者以外の全員に届く
//! （グループ通話としては不正確だが、2 者間での挙動を優先してそのままにしている）。
//! 相手が既に切断していれば黙って捨てる。キューイングも再送もしない。

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{ConnectionId, OutboundEvent, SignalKind, SignalingEnvelope};

use super::{broadcast_router::BroadcastRouter, error::RouteError};

/// シグナリング中継のユースケース
pub struct SignalingRelay {
    router: Arc<BroadcastRouter>,
}

impl SignalingRelay {
    pub fn new(router: Arc<BroadcastRouter>) -> Self {
        Self { router }
    }

    pub async fn relay_offer(
        &self,
        sender: &ConnectionId,
        payload: Value,
    ) -> Result<Vec<ConnectionId>, RouteError> {
        self.relay(sender, SignalingEnvelope::new(SignalKind::Offer, payload))
            .await
    }

    pub async fn relay_answer(
        &self,
        sender: &ConnectionId,
        payload: Value,
    ) -> Result<Vec<ConnectionId>, RouteError> {
        self.relay(sender, SignalingEnvelope::new(SignalKind::Answer, payload))
            .await
    }

    pub async fn relay_candidate(
        &self,
        sender: &ConnectionId,
        payload: Value,
    ) -> Result<Vec<ConnectionId>, RouteError> {
        self.relay(sender, SignalingEnvelope::new(SignalKind::Candidate, payload))
            .await
    }

    /// 送信者以外の接続に封筒をそのまま届ける
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 中継先（相手がいなければ空）
    pub async fn relay(
        &self,
        sender: &ConnectionId,
        envelope: SignalingEnvelope,
    ) -> Result<Vec<ConnectionId>, RouteError> {
        let kind = envelope.kind;
        let targets = self
            .router
            .route(sender, OutboundEvent::Signal(envelope))
            .await?;

        if targets.is_empty() {
            tracing::debug!(
                "No peer to receive '{}' from '{}', dropped",
                kind.as_str(),
                sender
            );
        }
        Ok(targets)
    }
}
