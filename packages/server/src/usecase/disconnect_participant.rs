//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - ファンアウト集合からの削除と Closed への遷移
//!
//! ### なぜこのテストが必要か
//! - 切断した接続にイベントが送られ続けないことを保証
//! - 切断済みのセグメントがロールバックされないことを確認（Store には触れない）

use std::sync::Arc;

use crate::domain::{Connection, EventPusher};

use super::error::DisconnectError;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// EventPusher（ファンアウトの抽象化）
    message_pusher: Arc<dyn EventPusher>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(message_pusher: Arc<dyn EventPusher>) -> Self {
        Self { message_pusher }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 残りの接続数
    /// * `Err(DisconnectError)` - 既に Closed の接続
    pub async fn execute(&self, connection: &mut Connection) -> Result<usize, DisconnectError> {
        tracing::debug!("Closing connection {} ({:?})", connection.id, connection.phase());
        connection.close()?;
        self.message_pusher.unregister_client(&connection.id).await;
        Ok(self.message_pusher.connected_ids().await.len())
    }
}
