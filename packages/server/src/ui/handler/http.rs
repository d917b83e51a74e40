//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{BoardSnapshotDto, BoardSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Board metadata: generation, segment count, live connections
pub async fn get_board(State(state): State<Arc<AppState>>) -> Json<BoardSummaryDto> {
    let (summary, connections) = state.get_board_state_usecase.summary().await;
    Json(BoardSummaryDto::new(summary, connections))
}

/// Debug endpoint returning the full board (for testing purposes)
pub async fn debug_board_state(State(state): State<Arc<AppState>>) -> Json<BoardSnapshotDto> {
    let snapshot = state.get_board_state_usecase.snapshot().await;
    Json(snapshot.into())
}
