//! UseCase: drawing 中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendDrawingUseCase::execute() メソッド
//! - Store への追加と、送信者を除く Live な接続へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 送信者は既にローカルで描画しているため、エコーしてはならない
//! - Store に追加されたセグメントは必ず他のクライアントにも届く
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数クライアントへの中継
//! - 異常系：ブロードキャストの失敗
//! - エッジケース：送信者のみが接続している場合（ブロードキャスト対象なし）

use std::sync::Arc;

use rakugaki_shared::protocol::ServerEvent;

use crate::domain::{BoardRepository, ConnectionId, EventPusher, StrokeSegment};

use super::{Delivery, error::SendDrawingError, exclude_sender, sequencer::RelaySequencer};

/// drawing 中継のユースケース
pub struct SendDrawingUseCase {
    /// Repository（Drawing Store の抽象化）
    repository: Arc<dyn BoardRepository>,
    /// EventPusher（ファンアウトの抽象化）
    message_pusher: Arc<dyn EventPusher>,
    /// Relay 全体のクリティカルセクション
    sequencer: Arc<RelaySequencer>,
}

impl SendDrawingUseCase {
    /// 新しい SendDrawingUseCase を作成
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

    /// drawing 中継を実行
    ///
    /// # Arguments
    ///
    /// * `from` - セグメントを送信した接続の ID
    /// * `segment` - 検証・正規化済みのセグメント
    ///
    /// # Returns
    ///
    /// * `Ok(Delivery)` - 受理された世代とブロードキャスト対象
    /// * `Err(SendDrawingError)` - 中継失敗
    pub async fn execute(
        &self,
        from: &ConnectionId,
        segment: StrokeSegment,
    ) -> Result<Delivery, SendDrawingError> {
        let payload = ServerEvent::Drawing(segment.clone())
            .encode()
            .map_err(|e| SendDrawingError::Encode(e.to_string()))?;

        let _guard = self.sequencer.enter().await;

        // 1. Store に追加
        let generation = self.repository.append(segment).await;

        // 2. 送信者以外の Live な接続にブロードキャスト
        let targets = exclude_sender(self.message_pusher.connected_ids().await, from);
        self.message_pusher
            .broadcast(targets.clone(), &payload)
            .await
            .map_err(|e| SendDrawingError::BroadcastFailed(e.to_string()))?;

        Ok(Delivery {
            generation,
            targets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ClearGeneration, PushError, pusher::MockEventPusher, repository::MockBoardRepository,
    };
    use rakugaki_shared::segment::Point;

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn segment() -> StrokeSegment {
        StrokeSegment::between(Point::new(0.0, 0.0), Point::new(10.0, 10.0), "#ff0000", 2.0)
    }

    fn usecase(repository: MockBoardRepository, pusher: MockEventPusher) -> SendDrawingUseCase {
        SendDrawingUseCase::new(
            Arc::new(repository),
            Arc::new(pusher),
            Arc::new(RelaySequencer::new()),
        )
    }

    #[tokio::test]
    async fn test_send_drawing_excludes_sender() {
        // テスト項目: セグメントが Store に追加され、送信者以外にブロードキャストされる
        // given (前提条件):
        let mut repository = MockBoardRepository::new();
        repository
            .expect_append()
            .withf(|s| *s == segment())
            .times(1)
            .returning(|_| ClearGeneration::initial());

        let mut pusher = MockEventPusher::new();
        pusher
            .expect_connected_ids()
            .returning(|| vec![id("alice"), id("bob"), id("charlie")]);
        pusher
            .expect_broadcast()
            .withf(|targets, content| {
                targets.len() == 2
                    && !targets.contains(&id("alice"))
                    && content.contains(r#""type":"drawing""#)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        // when (操作): alice がセグメントを送信
        let result = usecase(repository, pusher)
            .execute(&id("alice"), segment())
            .await;

        // then (期待する結果):
        let delivery = result.unwrap();
        assert_eq!(delivery.targets, vec![id("bob"), id("charlie")]);
        assert_eq!(delivery.generation, ClearGeneration::initial());
    }

    #[tokio::test]
    async fn test_send_drawing_no_broadcast_targets() {
        // テスト項目: 送信者のみが接続している場合、ブロードキャスト対象は空
        // given (前提条件):
        let mut repository = MockBoardRepository::new();
        repository
            .expect_append()
            .times(1)
            .returning(|_| ClearGeneration::new(3));

        let mut pusher = MockEventPusher::new();
        pusher.expect_connected_ids().returning(|| vec![id("alice")]);
        pusher
            .expect_broadcast()
            .withf(|targets, _| targets.is_empty())
            .returning(|_, _| Ok(()));

        // when (操作):
        let delivery = usecase(repository, pusher)
            .execute(&id("alice"), segment())
            .await
            .unwrap();

        // then (期待する結果): Store には追加されている
        assert!(delivery.targets.is_empty());
        assert_eq!(delivery.generation, ClearGeneration::new(3));
    }

    #[tokio::test]
    async fn test_broadcast_failure_is_reported() {
        // テスト項目: ブロードキャストに失敗した場合はエラーになる（Store には追加済み）
        // given (前提条件):
        let mut repository = MockBoardRepository::new();
        repository
            .expect_append()
            .times(1)
            .returning(|_| ClearGeneration::initial());

        let mut pusher = MockEventPusher::new();
        pusher
            .expect_connected_ids()
            .returning(|| vec![id("alice"), id("bob")]);
        pusher
            .expect_broadcast()
            .returning(|_, _| Err(PushError::PushFailed("bob".to_string())));

        // when (操作):
        let result = usecase(repository, pusher)
            .execute(&id("alice"), segment())
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(SendDrawingError::BroadcastFailed(_))));
    }
}
