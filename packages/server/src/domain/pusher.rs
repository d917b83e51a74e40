//! EventPusher trait 定義
//!
//! Relay のファンアウト先（Live な接続の集合）へのインターフェース。
//! WebSocket など具体的なトランスポートは Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, PushError};

/// 接続ごとの送信キュー（エンコード済み JSON）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// EventPusher trait
///
/// 登録されている接続はすべて Live 状態であり、登録解除された接続には
/// 以後イベントが届かない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPusher: Send + Sync {
    /// 接続をファンアウト集合に登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続をファンアウト集合から削除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定の接続にイベントを送信
    async fn push_to(&self, connection_id: &ConnectionId, content: &str)
    -> Result<(), PushError>;

    /// 複数の接続にイベントを送信（一部の失敗は許容）
    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) -> Result<(), PushError>;

    /// 登録中の全接続 ID を取得
    async fn connected_ids(&self) -> Vec<ConnectionId>;
}
