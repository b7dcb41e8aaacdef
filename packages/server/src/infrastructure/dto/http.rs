//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::DrawMessage;

/// `GET /api/board`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSummaryDto {
    pub connections: usize,
    pub strokes: usize,
}

/// One entry of `GET /debug/board`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionDetailDto {
    pub id: String,
    /// RFC 3339 (UTC)
    pub connected_at: String,
    pub live: bool,
}

/// `GET /debug/board`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardDetailDto {
    pub connections: Vec<ConnectionDetailDto>,
    pub strokes: Vec<DrawMessage>,
}
