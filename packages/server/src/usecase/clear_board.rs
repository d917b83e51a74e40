//! UseCase: clear-board 中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ClearBoardUseCase::execute() メソッド
//! - Store のクリア（世代の更新）と送信者以外へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 全クライアントが空のボードに収束することを保証
//! - クリア後に接続したクライアントには空の load-drawings が届くことを保証

use std::sync::Arc;

use rakugaki_shared::protocol::ServerEvent;

use crate::domain::{BoardRepository, ConnectionId, EventPusher};

use super::{Delivery, error::ClearBoardError, exclude_sender, sequencer::RelaySequencer};

/// clear-board 中継のユースケース
pub struct ClearBoardUseCase {
    repository: Arc<dyn BoardRepository>,
    message_pusher: Arc<dyn EventPusher>,
    sequencer: Arc<RelaySequencer>,
}

impl ClearBoardUseCase {
    /// 新しい ClearBoardUseCase を作成
    pub fn new(
        repository: Arc<dyn BoardRepository>,
        message_pusher: Arc<dyn EventPusher>,
        sequencer: Arc<RelaySequencer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            sequencer,
        }
    }

    /// clear-board 中継を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Delivery)` - クリア後の世代とブロードキャスト対象
    /// * `Err(ClearBoardError)` - ブロードキャスト失敗（Store はクリア済み）
    pub async fn execute(&self, from: &ConnectionId) -> Result<Delivery, ClearBoardError> {
        let payload = ServerEvent::ClearBoard
            .encode()
            .map_err(|e| ClearBoardError::Encode(e.to_string()))?;

        let _guard = self.sequencer.enter().await;

        let generation = self.repository.clear().await;

        let targets = exclude_sender(self.message_pusher.connected_ids().await, from);
        self.message_pusher
            .broadcast(targets.clone(), &payload)
            .await
            .map_err(|e| ClearBoardError::BroadcastFailed(e.to_string()))?;

        tracing::info!(
            "Board cleared by '{}' (generation {})",
            from,
            generation.value()
        );

        Ok(Delivery {
            generation,
            targets,
        })
    }
}
