//! Domain error types.

use thiserror::Error;

use super::entity::ConnectionState;

/// Value Object の生成に失敗したときのエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueObjectError {
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    #[error("coordinates must be finite numbers")]
    NonFiniteCoordinate,

    #[error("stroke color must not be empty")]
    EmptyStrokeColor,

    #[error("stroke color must be at most {0} characters")]
    StrokeColorTooLong(usize),

    #[error("stroke color '{0}' contains control characters")]
    InvalidStrokeColor(String),

    #[error("stroke width must be a positive finite number (got {0})")]
    InvalidStrokeWidth(f64),

    #[error("chat text must not be empty")]
    EmptyChatText,

    #[error("chat text must be at most {0} characters")]
    ChatTextTooLong(usize),
}

/// 接続状態の不正な遷移
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid connection state transition: {from:?} -> {to:?}")]
pub struct ConnectionStateError {
    pub from: ConnectionState,
    pub to: ConnectionState,
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to encode message: {0}")]
    Encode(String),
}
