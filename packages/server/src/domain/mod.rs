//! Domain layer: entities, value objects, and the interfaces the use cases
//! depend on.

pub mod delivery;
pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod signaling;
pub mod value_object;
pub mod whiteboard;

pub use delivery::{DeliveryPolicy, OutboundEvent};
pub use entity::{Connection, ConnectionState, DrawAction};
pub use error::{ConnectionStateError, MessagePushError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{ConnectionRegistry, WhiteboardRepository};
pub use signaling::{SignalKind, SignalingEnvelope};
pub use value_object::{
    ChatText, ConnectionId, ConnectionIdFactory, Point, StrokeColor, StrokeWidth, Timestamp,
};
pub use whiteboard::WhiteboardLog;

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
