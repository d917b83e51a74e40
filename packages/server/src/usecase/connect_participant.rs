//! UseCase: 参加者接続処理（リプレイ）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 接続時のボード状態の送信（load-drawings）とファンアウト集合への登録
//!
//! ### なぜこのテストが必要か
//! - 遅れて参加したクライアントが現在のボードを再構築できることを保証
//! - load-drawings がどのライブイベントよりも先に届くことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のボード、履歴のあるボードへの接続
//! - 異常系：送信キューが既に閉じている接続

use std::sync::Arc;

use rakugaki_shared::{protocol::ServerEvent, time::Clock};

use crate::domain::{
    BoardRepository, ClearGeneration, Connection, ConnectionIdFactory, EventPusher,
    PusherChannel, Timestamp,
};

use super::{error::ConnectError, sequencer::RelaySequencer};

/// 接続直後のリプレイ結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replayed {
    /// Live 状態になった接続
    pub connection: Connection,
    /// load-drawings に含めたセグメント数
    pub segment_count: usize,
    /// リプレイしたボードの世代
    pub generation: ClearGeneration,
}

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（Drawing Store の抽象化）
    repository: Arc<dyn BoardRepository>,
    /// EventPusher（ファンアウトの抽象化）
    message_pusher: Arc<dyn EventPusher>,
    /// Relay 全体のクリティカルセクション
    sequencer: Arc<RelaySequencer>,
    /// 接続時刻の取得元
    clock: Arc<dyn Clock>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn BoardRepository>,
        message_pusher: Arc<dyn EventPusher>,
        sequencer: Arc<RelaySequencer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            sequencer,
            clock,
        }
    }

    /// 参加者接続を実行
    ///
    /// `Connecting -> Replaying` に遷移し、現在のボードを 1 つの load-drawings
    /// として送信キューに積んでから `Live` に遷移する。
    ///
    /// # Arguments
    ///
    /// * `sender` - クライアントへのイベント送信用キュー
    ///
    /// # Returns
    ///
    /// * `Ok(Replayed)` - Live になった接続とリプレイ内容
    /// * `Err(ConnectError)` - 接続失敗（ファンアウト集合には残らない）
    pub async fn execute(&self, sender: PusherChannel) -> Result<Replayed, ConnectError> {
        let mut connection = Connection::new(
            ConnectionIdFactory::generate(),
            Timestamp::new(self.clock.now_millis()),
        );

        let _guard = self.sequencer.enter().await;

        // 1. Replaying に遷移し、ボードの snapshot を取得
        connection.begin_replay()?;
        let snapshot = self.repository.snapshot().await;
        let segment_count = snapshot.segments.len();
        let generation = snapshot.generation;

        let payload = ServerEvent::LoadDrawings(snapshot.segments)
            .encode()
            .map_err(|e| ConnectError::Encode(e.to_string()))?;

        // 2. ファンアウト集合に登録し、最初のイベントとして load-drawings を送信
        //    sequencer を保持しているため、この間に他のイベントが割り込むことはない
        self.message_pusher
            .register_client(connection.id.clone(), sender)
            .await;
        if let Err(e) = self.message_pusher.push_to(&connection.id, &payload).await {
            self.message_pusher.unregister_client(&connection.id).await;
            return Err(ConnectError::ReplayFailed(e));
        }

        // 3. Live に遷移
        connection.go_live()?;
        tracing::debug!(
            "Replayed {} segments (generation {}) to '{}'",
            segment_count,
            generation.value(),
            connection.id
        );

        Ok(Replayed {
            connection,
            segment_count,
            generation,
        })
    }
}
