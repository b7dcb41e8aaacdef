//! UseCase: Broadcast Router
//!
//! 1 つの接続から届いたイベントを、どの接続に配送するかを決めて fan-out する。
//!
//! - `draw`: ログに追加してから配送（`draw_fanout` に従う）
//! - `clear_canvas`: ログを消去してから全員に配送（送信者を含む）
//! - `send_message`: 全員に配送（ログには残さない）
//! - 新規接続: 現在のログを 1 件ずつ、その接続だけに再送（replay）
//!
//! 到着順がそのまま全体の順序になる。タイムスタンプや論理時計は使わない。

use std::sync::Arc;

use crate::domain::{
    ChatText, ConnectionId, ConnectionRegistry, DeliveryPolicy, DrawAction, MessagePusher,
    OutboundEvent, WhiteboardRepository,
};

use super::{
    error::RouteError,
    sequencer::{EventSequencer, Turn},
};

/// ブロードキャストのユースケース
pub struct BroadcastRouter {
    registry: Arc<dyn ConnectionRegistry>,
    whiteboard: Arc<dyn WhiteboardRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<EventSequencer>,
    /// 線分の配送ポリシー。プロセスの生存期間中は変えない
    /// （途中で変えると送信者側の線が重複・欠落する）。
    draw_fanout: DeliveryPolicy,
}

impl BroadcastRouter {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        whiteboard: Arc<dyn WhiteboardRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<EventSequencer>,
        draw_fanout: DeliveryPolicy,
    ) -> Self {
        Self {
            registry,
            whiteboard,
            message_pusher,
            sequencer,
            draw_fanout,
        }
    }

    /// 線分を受信したときの処理
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 配送先の接続 ID
    /// * `Err(RouteError::UnknownConnection)` - 未登録の送信者（ログは変更しない）
    pub async fn handle_draw(
        &self,
        sender: &ConnectionId,
        action: DrawAction,
    ) -> Result<Vec<ConnectionId>, RouteError> {
        let turn = self.sequencer.begin().await;
        self.ensure_registered(sender).await?;

        self.whiteboard.append(action.clone()).await;
        self.fan_out(&turn, sender, &OutboundEvent::Draw(action)).await
    }

    /// キャンバス消去を受信したときの処理
    ///
    /// 消去した本人も含め、全員が同じサーバー側のイベントで白紙になる。
    pub async fn handle_clear(
        &self,
        sender: &ConnectionId,
    ) -> Result<Vec<ConnectionId>, RouteError> {
        let turn = self.sequencer.begin().await;
        self.ensure_registered(sender).await?;

        self.whiteboard.reset().await;
        tracing::info!(seq = turn.seq(), "Canvas cleared by '{}'", sender);
        self.fan_out(&turn, sender, &OutboundEvent::ClearCanvas).await
    }

    /// チャットメッセージを受信したときの処理
    pub async fn handle_chat(
        &self,
        sender: &ConnectionId,
        text: ChatText,
    ) -> Result<Vec<ConnectionId>, RouteError> {
        self.route(sender, OutboundEvent::Chat(text)).await
    }

    /// 現在のログをその接続だけに再送する
    ///
    /// # Returns
    ///
    /// 再送した線分の数
    pub async fn replay(&self, connection_id: &ConnectionId) -> Result<usize, RouteError> {
        let turn = self.sequencer.begin().await;
        self.replay_in_turn(&turn, connection_id).await
    }

    /// Replay while the caller already holds the turn.
    pub(crate) async fn replay_in_turn(
        &self,
        turn: &Turn<'_>,
        connection_id: &ConnectionId,
    ) -> Result<usize, RouteError> {
        let snapshot = self.whiteboard.snapshot().await;
        let count = snapshot.len();

        for action in snapshot {
            self.message_pusher
                .push_to(connection_id, &OutboundEvent::Draw(action))
                .await?;
        }

        tracing::debug!(
            seq = turn.seq(),
            "Replayed {} stroke(s) to '{}'",
            count,
            connection_id
        );
        Ok(count)
    }

    /// Take a turn, check the sender, and fan the event out unchanged.
    pub(crate) async fn route(
        &self,
        sender: &ConnectionId,
        event: OutboundEvent,
    ) -> Result<Vec<ConnectionId>, RouteError> {
        let turn = self.sequencer.begin().await;
        self.ensure_registered(sender).await?;
        self.fan_out(&turn, sender, &event).await
    }

    async fn ensure_registered(&self, sender: &ConnectionId) -> Result<(), RouteError> {
        if self.registry.contains(sender).await {
            Ok(())
        } else {
            Err(RouteError::UnknownConnection(sender.to_string()))
        }
    }

    async fn fan_out(
        &self,
        turn: &Turn<'_>,
        sender: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<Vec<ConnectionId>, RouteError> {
        let targets = match event.delivery_policy(self.draw_fanout) {
            DeliveryPolicy::ToAll => self.registry.all().await,
            DeliveryPolicy::ToOthers => self.registry.all_except(sender).await,
        };

        if !targets.is_empty() {
            self.message_pusher.broadcast(targets.clone(), event).await?;
        }

        tracing::debug!(
            seq = turn.seq(),
            "Routed '{}' from '{}' to {} connection(s)",
            event.name(),
            sender,
            targets.len()
        );
        Ok(targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessagePushError, MockMessagePusher},
        infrastructure::repository::{InMemoryConnectionRegistry, InMemoryWhiteboardRepository},
        usecase::fixture::{Fixture, drain, id, segment, segment_json},
    };
    use serde_json::json;

    #[tokio::test]
    async fn test_draw_reaches_others_but_not_sender() {
        // テスト項目: peer-echo では線分が送信者以外に届き、送信者には戻らない
        // given (前提条件):
        let fixture = Fixture::new(DeliveryPolicy::ToOthers);
        let (alice, mut alice_rx) = fixture.join("alice").await;
        let (bob, mut bob_rx) = fixture.join("bob").await;
        let (charlie, mut charlie_rx) = fixture.join("charlie").await;

        // when (操作):
        let targets = fixture.router.handle_draw(&alice, segment(0.0)).await.unwrap();

        // then (期待する結果):
        assert_eq!(targets, vec![bob, charlie]);
        assert!(drain(&mut alice_rx).is_empty());
        assert_eq!(drain(&mut bob_rx), vec![segment_json(0.0)]);
        assert_eq!(drain(&mut charlie_rx), vec![segment_json(0.0)]);
        assert_eq!(fixture.whiteboard.snapshot().await, vec![segment(0.0)]);
    }

    #[tokio::test]
    async fn test_draw_with_to_all_echoes_to_sender() {
        // テスト項目: ToAll では送信者自身にもサーバー側のコピーが届く
        // given (前提条件):
        let fixture = Fixture::new(DeliveryPolicy::ToAll);
        let (alice, mut alice_rx) = fixture.join("alice").await;
        let (bob, mut bob_rx) = fixture.join("bob").await;

        // when (操作):
        let targets = fixture.router.handle_draw(&alice, segment(1.0)).await.unwrap();

        // then (期待する結果):
        assert_eq!(targets, vec![alice, bob]);
        assert_eq!(drain(&mut alice_rx), vec![segment_json(1.0)]);
        assert_eq!(drain(&mut bob_rx), vec![segment_json(1.0)]);
    }

    #[tokio::test]
    async fn test_clear_reaches_everyone_including_sender() {
        // テスト項目: clear_canvas は送信者を含む全員に届き、ログが空になる
        // given (前提条件):
        let fixture = Fixture::new(DeliveryPolicy::ToOthers);
        let (alice, mut alice_rx) = fixture.join("alice").await;
        let (_bob, mut bob_rx) = fixture.join("bob").await;
        fixture.router.handle_draw(&alice, segment(0.0)).await.unwrap();
        drain(&mut bob_rx);

        // when (操作):
        let targets = fixture.router.handle_clear(&alice).await.unwrap();

        // then (期待する結果):
        assert_eq!(targets.len(), 2);
        assert_eq!(drain(&mut alice_rx), vec![json!({"type": "clear_canvas"})]);
        assert_eq!(drain(&mut bob_rx), vec![json!({"type": "clear_canvas"})]);
        assert!(fixture.whiteboard.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_replay_sends_only_strokes_after_last_clear() {
        // テスト項目: N 本描画 → clear → M 本描画の後に参加した接続は M 本だけを受け取る
        // given (前提条件):
        let fixture = Fixture::new(DeliveryPolicy::ToOthers);
        let (alice, _alice_rx) = fixture.join("alice").await;
        for n in 0..5 {
            fixture.router.handle_draw(&alice, segment(f64::from(n))).await.unwrap();
        }
        fixture.router.handle_clear(&alice).await.unwrap();
        for n in 10..13 {
            fixture.router.handle_draw(&alice, segment(f64::from(n))).await.unwrap();
        }

        // when (操作):
        let (_late, mut late_rx) = fixture.join("late").await;

        // then (期待する結果):
        assert_eq!(
            drain(&mut late_rx),
            vec![segment_json(10.0), segment_json(11.0), segment_json(12.0)]
        );
    }

    #[tokio::test]
    async fn test_replay_to_unknown_connection_fails() {
        // テスト項目: 送信チャンネルのない接続への replay は ClientNotFound で失敗する
        // given (前提条件):
        let fixture = Fixture::new(DeliveryPolicy::ToOthers);
        let (alice, _alice_rx) = fixture.join("alice").await;
        fixture.router.handle_draw(&alice, segment(0.0)).await.unwrap();

        // when (操作):
        let result = fixture.router.replay(&id("ghost")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RouteError::Push(MessagePushError::ClientNotFound(
                "ghost".to_string()
            )))
        );
    }

    #[tokio::test]
    async fn test_replay_of_empty_log_sends_nothing() {
        // テスト項目: ログが空なら replay は何も送らない
        // given (前提条件):
        let fixture = Fixture::new(DeliveryPolicy::ToOthers);
        let (alice, mut alice_rx) = fixture.join("alice").await;

        // when (操作):
        let count = fixture.router.replay(&alice).await.unwrap();

        // then (期待する結果):
        assert_eq!(count, 0);
        assert!(drain(&mut alice_rx).is_empty());
    }

    #[tokio::test]
    async fn test_events_from_unregistered_connection_are_noops() {
        // テスト項目: 未登録の接続からの draw / clear はログを変更しない
        // given (前提条件):
        let fixture = Fixture::new(DeliveryPolicy::ToOthers);
        let (alice, mut alice_rx) = fixture.join("alice").await;
        fixture.router.handle_draw(&alice, segment(0.0)).await.unwrap();
        let ghost = id("ghost");

        // when (操作):
        let draw = fixture.router.handle_draw(&ghost, segment(9.0)).await;
        let clear = fixture.router.handle_clear(&ghost).await;

        // then (期待する結果):
        assert_eq!(draw, Err(RouteError::UnknownConnection("ghost".to_string())));
        assert_eq!(clear, Err(RouteError::UnknownConnection("ghost".to_string())));
        assert_eq!(fixture.whiteboard.snapshot().await, vec![segment(0.0)]);
        assert!(drain(&mut alice_rx).is_empty());
    }

    #[tokio::test]
    async fn test_chat_reaches_everyone() {
        // テスト項目: チャットは送信者を含む全員に receive_message として届く
        // given (前提条件):
        let fixture = Fixture::new(DeliveryPolicy::ToOthers);
        let (alice, mut alice_rx) = fixture.join("alice").await;
        let (_bob, mut bob_rx) = fixture.join("bob").await;

        // when (操作):
        let text = ChatText::new("hello".to_string()).unwrap();
        fixture.router.handle_chat(&alice, text).await.unwrap();

        // then (期待する結果):
        let expected = json!({"type": "receive_message", "text": "hello"});
        assert_eq!(drain(&mut alice_rx), vec![expected.clone()]);
        assert_eq!(drain(&mut bob_rx), vec![expected]);
        assert!(fixture.whiteboard.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_draw_broadcasts_to_registry_targets() {
        // テスト項目: MessagePusher には Registry が返す送信者以外の接続が渡される
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let alice = Fixture::register(registry.as_ref(), "alice").await;
        let bob = Fixture::register(registry.as_ref(), "bob").await;
        let expected_targets = vec![bob.clone()];

        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .withf(move |targets, event| {
                targets == &expected_targets && matches!(event, OutboundEvent::Draw(_))
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let router = BroadcastRouter::new(
            registry,
            Arc::new(InMemoryWhiteboardRepository::default()),
            Arc::new(pusher),
            Arc::new(EventSequencer::new()),
            DeliveryPolicy::ToOthers,
        );

        // when (操作):
        let result = router.handle_draw(&alice, segment(0.0)).await;

        // then (期待する結果):
        assert_eq!(result, Ok(vec![bob]));
    }

    #[tokio::test]
    async fn test_draw_without_peers_does_not_touch_pusher() {
        // テスト項目: 送信者しかいない場合、MessagePusher は呼ばれないがログには残る
        // given (前提条件):
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let alice = Fixture::register(registry.as_ref(), "alice").await;
        let whiteboard = Arc::new(InMemoryWhiteboardRepository::default());

        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().never();

        let router = BroadcastRouter::new(
            registry,
            whiteboard.clone(),
            Arc::new(pusher),
            Arc::new(EventSequencer::new()),
            DeliveryPolicy::ToOthers,
        );

        // when (操作):
        let result = router.handle_draw(&alice, segment(0.0)).await;

        // then (期待する結果):
        assert_eq!(result, Ok(vec![]));
        assert_eq!(whiteboard.stroke_count().await, 1);
    }
}
