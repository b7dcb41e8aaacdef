//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{BoardDetailDto, BoardSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Number of open connections and strokes on the board
pub async fn get_board_summary(State(state): State<Arc<AppState>>) -> Json<BoardSummaryDto> {
    let (connections, strokes) = state.get_board_state_usecase.summary().await;
    Json(BoardSummaryDto {
        connections,
        strokes,
    })
}

/// Debug endpoint to dump the connections and the full stroke log
pub async fn debug_board_state(State(state): State<Arc<AppState>>) -> Json<BoardDetailDto> {
    let board = state.get_board_state_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(BoardDetailDto {
        connections: board.connections.iter().map(Into::into).collect(),
        strokes: board.strokes.iter().map(Into::into).collect(),
    })
}
