//! InMemory Board Repository 実装
//!
//! ドメイン層が定義する BoardRepository trait の具体的な実装。
//! `Board` エンティティを 1 つの Mutex で保護し、append / clear / snapshot を
//! 直列化します。プロセス終了とともにボードは失われます。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Board, BoardRepository, BoardSnapshot, BoardSummary, ClearGeneration, StrokeSegment,
};

/// インメモリ Board Repository 実装
pub struct InMemoryBoardRepository {
    /// Board ドメインモデル
    board: Arc<Mutex<Board>>,
}

impl InMemoryBoardRepository {
    /// 新しい InMemoryBoardRepository を作成
    pub fn new(board: Arc<Mutex<Board>>) -> Self {
        Self { board }
    }
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn append(&self, segment: StrokeSegment) -> ClearGeneration {
        let mut board = self.board.lock().await;
        board.append(segment)
    }

    async fn clear(&self) -> ClearGeneration {
        let mut board = self.board.lock().await;
        board.clear()
    }

    async fn snapshot(&self) -> BoardSnapshot {
        let board = self.board.lock().await;
        board.snapshot()
    }

    async fn summary(&self) -> BoardSummary {
        let board = self.board.lock().await;
        board.summary()
    }
}
