//! UseCase: ボード状態の取得（HTTP 参照用）

use std::sync::Arc;

use crate::domain::{BoardRepository, BoardSnapshot, BoardSummary, EventPusher};

/// ボード状態取得のユースケース
pub struct GetBoardStateUseCase {
    repository: Arc<dyn BoardRepository>,
    message_pusher: Arc<dyn EventPusher>,
}

impl GetBoardStateUseCase {
    pub fn new(repository: Arc<dyn BoardRepository>, message_pusher: Arc<dyn EventPusher>) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 現在のボード全体の snapshot
    pub async fn snapshot(&self) -> BoardSnapshot {
        self.repository.snapshot().await
    }

    /// ボードのメタデータと Live な接続数
    pub async fn summary(&self) -> (BoardSummary, usize) {
        let summary = self.repository.summary().await;
        let connections = self.message_pusher.connected_ids().await.len();
        (summary, connections)
    }
}
