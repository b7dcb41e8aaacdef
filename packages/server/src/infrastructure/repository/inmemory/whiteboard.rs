//! InMemory Whiteboard Repository 実装
//!
//! `WhiteboardLog` をプロセス内に 1 つだけ保持します。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{DrawAction, WhiteboardLog, WhiteboardRepository};

/// インメモリ Whiteboard Repository 実装
pub struct InMemoryWhiteboardRepository {
    log: Arc<Mutex<WhiteboardLog>>,
}

impl InMemoryWhiteboardRepository {
    pub fn new(log: Arc<Mutex<WhiteboardLog>>) -> Self {
        Self { log }
    }
}

impl Default for InMemoryWhiteboardRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(WhiteboardLog::new())))
    }
}

#[async_trait]
impl WhiteboardRepository for InMemoryWhiteboardRepository {
    async fn append(&self, action: DrawAction) {
        let mut log = self.log.lock().await;
        log.append(action);
    }

    async fn reset(&self) {
        let mut log = self.log.lock().await;
        log.reset();
    }

    async fn snapshot(&self) -> Vec<DrawAction> {
        let log = self.log.lock().await;
        log.snapshot()
    }

    async fn stroke_count(&self) -> usize {
        let log = self.log.lock().await;
        log.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point, StrokeColor, StrokeWidth};

    fn segment(x: f64) -> DrawAction {
        DrawAction::new(
            Point::new(x, 0.0).unwrap(),
            Point::new(x, 10.0).unwrap(),
            StrokeColor::new("#ff0000".to_string()).unwrap(),
            StrokeWidth::new(2.0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_append_and_snapshot() {
        // テスト項目: append した線分が到着順に snapshot で取得できる
        // given (前提条件):
        let repository = InMemoryWhiteboardRepository::default();

        // when (操作):
        repository.append(segment(1.0)).await;
        repository.append(segment(2.0)).await;

        // then (期待する結果):
        assert_eq!(repository.snapshot().await, vec![segment(1.0), segment(2.0)]);
        assert_eq!(repository.stroke_count().await, 2);
    }

    #[tokio::test]
    async fn test_reset_clears_shared_log() {
        // テスト項目: reset は共有しているログ本体を空にする
        // given (前提条件):
        let log = Arc::new(Mutex::new(WhiteboardLog::new()));
        let repository = InMemoryWhiteboardRepository::new(log.clone());
        repository.append(segment(1.0)).await;

        // when (操作):
        repository.reset().await;

        // then (期待する結果):
        assert!(log.lock().await.is_empty());
        assert_eq!(repository.stroke_count().await, 0);
    }
}
