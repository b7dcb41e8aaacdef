//! Entity 定義
//!
//! - `DrawAction`: ホワイトボード上の 1 本の線分（不変）
//! - `Connection`: 1 つのクライアント接続とそのライフサイクル

use super::{
    error::ConnectionStateError,
    value_object::{ConnectionId, Point, StrokeColor, StrokeWidth, Timestamp},
};

// ========================================
// DrawAction
// ========================================

/// One line segment drawn by a client.
///
/// There is no id: a stroke is identified by its position in the whiteboard
/// log, which is the arrival order at the server.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawAction {
    pub from: Point,
    pub to: Point,
    pub color: StrokeColor,
    pub width: StrokeWidth,
}

impl DrawAction {
    pub fn new(from: Point, to: Point, color: StrokeColor, width: StrokeWidth) -> Self {
        Self {
            from,
            to,
            color,
            width,
        }
    }
}

// ========================================
// Connection
// ========================================

/// 接続のライフサイクル: `Connecting -> Active -> Disconnected`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Active,
    /// Terminal.
    Disconnected,
}

/// 1 つのクライアント接続
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    pub connected_at: Timestamp,
    state: ConnectionState,
}

impl Connection {
    /// `Connecting` 状態の接続を作成
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            connected_at,
            state: ConnectionState::Connecting,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_live(&self) -> bool {
        self.state == ConnectionState::Active
    }

    /// `Connecting -> Active`
    pub fn activate(&mut self) -> Result<(), ConnectionStateError> {
        self.transition(ConnectionState::Connecting, ConnectionState::Active)
    }

    /// `Connecting | Active -> Disconnected`
    pub fn disconnect(&mut self) -> Result<(), ConnectionStateError> {
        if self.state == ConnectionState::Disconnected {
            return Err(ConnectionStateError {
                from: self.state,
                to: ConnectionState::Disconnected,
            });
        }
        self.state = ConnectionState::Disconnected;
        Ok(())
    }

    fn transition(
        &mut self,
        expected: ConnectionState,
        next: ConnectionState,
    ) -> Result<(), ConnectionStateError> {
        if self.state != expected {
            return Err(ConnectionStateError {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}
