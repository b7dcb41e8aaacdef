//! Test fixture wiring the use cases to the in-memory infrastructure.

use std::sync::Arc;

use serde_json::{Value, json};
use tokio::sync::mpsc;

use crate::{
    domain::{
        Connection, ConnectionId, ConnectionRegistry, DeliveryPolicy, DrawAction, Point,
        StrokeColor, StrokeWidth, Timestamp,
    },
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryConnectionRegistry, InMemoryWhiteboardRepository},
    },
};
use kokuban_shared::time::FixedClock;

use super::{BroadcastRouter, EventSequencer, SessionLifecycle, SignalingRelay};

pub const FIXED_NOW: i64 = 1_672_531_200_000;

pub struct Fixture {
    pub registry: Arc<InMemoryConnectionRegistry>,
    pub whiteboard: Arc<InMemoryWhiteboardRepository>,
    pub router: Arc<BroadcastRouter>,
    pub relay: SignalingRelay,
    pub lifecycle: SessionLifecycle,
}

impl Fixture {
    pub fn new(draw_fanout: DeliveryPolicy) -> Self {
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let whiteboard = Arc::new(InMemoryWhiteboardRepository::default());
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let sequencer = Arc::new(EventSequencer::new());

        let router = Arc::new(BroadcastRouter::new(
            registry.clone(),
            whiteboard.clone(),
            pusher.clone(),
            sequencer.clone(),
            draw_fanout,
        ));
        let relay = SignalingRelay::new(router.clone());
        let lifecycle = SessionLifecycle::new(
            registry.clone(),
            pusher,
            router.clone(),
            sequencer,
            Arc::new(FixedClock::new(FIXED_NOW)),
        );

        Self {
            registry,
            whiteboard,
            router,
            relay,
            lifecycle,
        }
    }

    /// Connect a client through the session lifecycle.
    pub async fn join(&self, name: &str) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection_id = id(name);
        self.lifecycle
            .connect(connection_id.clone(), tx)
            .await
            .unwrap();
        (connection_id, rx)
    }

    /// Register an active connection directly in a registry.
    pub async fn register(registry: &dyn ConnectionRegistry, name: &str) -> ConnectionId {
        let mut connection = Connection::new(id(name), Timestamp::new(FIXED_NOW));
        connection.activate().unwrap();
        registry.register(connection).await;
        id(name)
    }
}

pub fn id(name: &str) -> ConnectionId {
    ConnectionId::new(name.to_string()).unwrap()
}

/// A vertical black segment at `x`.
pub fn segment(x: f64) -> DrawAction {
    DrawAction::new(
        Point::new(x, 0.0).unwrap(),
        Point::new(x, 10.0).unwrap(),
        StrokeColor::new("#000".to_string()).unwrap(),
        StrokeWidth::new(3.0).unwrap(),
    )
}

/// `segment(x)` as it appears on the wire.
pub fn segment_json(x: f64) -> Value {
    json!({"type": "draw", "x0": x, "y0": 0.0, "x1": x, "y1": 10.0, "color": "#000", "width": 3.0})
}

/// Everything pushed to a connection so far, decoded.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<Value> {
    let mut messages = Vec::new();
    while let Ok(text) = rx.try_recv() {
        messages.push(serde_json::from_str(&text).unwrap());
    }
    messages
}
