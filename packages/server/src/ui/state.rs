//! Shared application state.

use std::sync::Arc;

use crate::usecase::{BroadcastRouter, GetBoardStateUseCase, SessionLifecycle, SignalingRelay};

/// Shared application state
pub struct AppState {
    /// SessionLifecycle（接続・切断のユースケース）
    pub session_lifecycle: Arc<SessionLifecycle>,
    /// BroadcastRouter（線分・消去・チャットのユースケース）
    pub broadcast_router: Arc<BroadcastRouter>,
    /// SignalingRelay（シグナリング中継のユースケース）
    pub signaling_relay: Arc<SignalingRelay>,
    /// GetBoardStateUseCase（ホワイトボード状態取得のユースケース）
    pub get_board_state_usecase: Arc<GetBoardStateUseCase>,
}
