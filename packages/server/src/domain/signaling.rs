//! WebRTC signaling envelopes.
//!
//! The relay never looks inside the payload; SDP and ICE semantics belong to
//! the peers.

use serde_json::Value;

/// Kind of negotiation message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Offer,
    Answer,
    Candidate,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Offer => "offer",
            SignalKind::Answer => "answer",
            SignalKind::Candidate => "ice_candidate",
        }
    }
}

/// One negotiation message for one relay hop. Never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalingEnvelope {
    pub kind: SignalKind,
    pub payload: Value,
}

impl SignalingEnvelope {
    pub fn new(kind: SignalKind, payload: Value) -> Self {
        Self { kind, payload }
    }
}
