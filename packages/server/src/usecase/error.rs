//! UseCase errors.

use thiserror::Error;

use crate::domain::{PushError, TransitionError};

/// 接続（リプレイ）処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("failed to encode load-drawings: {0}")]
    Encode(String),

    #[error("failed to deliver load-drawings: {0}")]
    ReplayFailed(PushError),
}

/// drawing 中継処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendDrawingError {
    #[error("failed to encode drawing: {0}")]
    Encode(String),

    #[error("broadcast failed: {0}")]
    BroadcastFailed(String),
}

/// clear-board 中継処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClearBoardError {
    #[error("failed to encode clear-board: {0}")]
    Encode(String),

    #[error("broadcast failed: {0}")]
    BroadcastFailed(String),
}

/// 切断処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
}
