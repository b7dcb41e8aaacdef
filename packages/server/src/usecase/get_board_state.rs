//! UseCase: ホワイトボードの状態取得（HTTP / デバッグ用）

use std::sync::Arc;

use crate::domain::{Connection, ConnectionRegistry, DrawAction, WhiteboardRepository};

use super::sequencer::EventSequencer;

/// ある時点の接続一覧と線分ログ
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub connections: Vec<Connection>,
    pub strokes: Vec<DrawAction>,
}

/// ホワイトボード状態取得のユースケース
pub struct GetBoardStateUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    whiteboard: Arc<dyn WhiteboardRepository>,
    sequencer: Arc<EventSequencer>,
}

impl GetBoardStateUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        whiteboard: Arc<dyn WhiteboardRepository>,
        sequencer: Arc<EventSequencer>,
    ) -> Self {
        Self {
            registry,
            whiteboard,
            sequencer,
        }
    }

    /// 接続一覧と線分ログを同じターンで読み出す
    pub async fn execute(&self) -> BoardState {
        let _turn = self.sequencer.begin().await;
        BoardState {
            connections: self.registry.connections().await,
            strokes: self.whiteboard.snapshot().await,
        }
    }

    /// 接続数と線分数
    pub async fn summary(&self) -> (usize, usize) {
        let _turn = self.sequencer.begin().await;
        (
            self.registry.count().await,
            self.whiteboard.stroke_count().await,
        )
    }
}
