//! Delivery policies and the events they apply to.

use super::{entity::DrawAction, signaling::SignalingEnvelope, value_object::ChatText};

/// Who receives an inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryPolicy {
    /// Everyone except the sender (peer-echo).
    ToOthers,
    /// Everyone, the sender included.
    ToAll,
}

/// An event the server delivers to one or more connections.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundEvent {
    Draw(DrawAction),
    ClearCanvas,
    Signal(SignalingEnvelope),
    Chat(ChatText),
}

impl OutboundEvent {
    /// Event name on the wire, used for logging.
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::Draw(_) => "draw",
            OutboundEvent::ClearCanvas => "clear_canvas",
            OutboundEvent::Signal(envelope) => envelope.kind.as_str(),
            OutboundEvent::Chat(_) => "receive_message",
        }
    }

    /// Delivery policy for this kind of event.
    ///
    /// Strokes follow the deployment-wide `draw_fanout`. Clears and chat
    /// always reach the sender too, signaling never does.
    pub fn delivery_policy(&self, draw_fanout: DeliveryPolicy) -> DeliveryPolicy {
        match self {
            OutboundEvent::Draw(_) => draw_fanout,
            OutboundEvent::ClearCanvas | OutboundEvent::Chat(_) => DeliveryPolicy::ToAll,
            OutboundEvent::Signal(_) => DeliveryPolicy::ToOthers,
        }
    }
}
