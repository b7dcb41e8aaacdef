//! UseCase error types.

use thiserror::Error;

use crate::domain::{ConnectionStateError, MessagePushError};

/// ブロードキャスト / シグナリング中継のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// 未登録の接続からのイベント（no-op として扱う）
    #[error("connection '{0}' is not registered")]
    UnknownConnection(String),

    #[error(transparent)]
    Push(#[from] MessagePushError),
}

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error(transparent)]
    InvalidState(#[from] ConnectionStateError),

    #[error("failed to replay the whiteboard: {0}")]
    Replay(#[from] RouteError),
}
