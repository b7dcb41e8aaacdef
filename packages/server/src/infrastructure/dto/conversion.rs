//! Conversion logic between DTOs and domain entities.

use crate::domain::{
    Connection, DrawAction, OutboundEvent, Point, SignalKind, SignalingEnvelope, StrokeColor,
    StrokeWidth, ValueObjectError,
};
use crate::infrastructure::dto::{http, websocket as dto};
use kokuban_shared::time::millis_to_rfc3339;

// ========================================
// DTO → Domain Entity
// ========================================

impl TryFrom<dto::DrawMessage> for DrawAction {
    type Error = ValueObjectError;

    fn try_from(dto: dto::DrawMessage) -> Result<Self, Self::Error> {
        Ok(DrawAction::new(
            Point::new(dto.x0, dto.y0)?,
            Point::new(dto.x1, dto.y1)?,
            StrokeColor::new(dto.color)?,
            StrokeWidth::new(dto.width)?,
        ))
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&DrawAction> for dto::DrawMessage {
    fn from(action: &DrawAction) -> Self {
        Self {
            x0: action.from.x(),
            y0: action.from.y(),
            x1: action.to.x(),
            y1: action.to.y(),
            color: action.color.as_str().to_string(),
            width: action.width.value(),
        }
    }
}

impl From<&SignalingEnvelope> for dto::ServerMessage {
    fn from(envelope: &SignalingEnvelope) -> Self {
        let payload = envelope.payload.clone();
        match envelope.kind {
            SignalKind::Offer => Self::Offer { payload },
            SignalKind::Answer => Self::Answer { payload },
            SignalKind::Candidate => Self::IceCandidate { payload },
        }
    }
}

impl From<&OutboundEvent> for dto::ServerMessage {
    fn from(event: &OutboundEvent) -> Self {
        match event {
            OutboundEvent::Draw(action) => Self::Draw(action.into()),
            OutboundEvent::ClearCanvas => Self::ClearCanvas,
            OutboundEvent::Signal(envelope) => envelope.into(),
            OutboundEvent::Chat(text) => Self::ReceiveMessage {
                text: text.as_str().to_string(),
            },
        }
    }
}

impl From<&Connection> for http::ConnectionDetailDto {
    fn from(connection: &Connection) -> Self {
        let millis = connection.connected_at.value();
        Self {
            id: connection.id.as_str().to_string(),
            connected_at: millis_to_rfc3339(millis).unwrap_or_else(|| millis.to_string()),
            live: connection.is_live(),
        }
    }
}
