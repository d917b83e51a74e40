//! Repository trait 定義
//!
//! Drawing Store のインターフェース。ボード状態の唯一の所有者であり、
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{BoardSnapshot, BoardSummary, ClearGeneration};
use rakugaki_shared::segment::StrokeSegment;

/// Board Repository trait (Drawing Store)
///
/// `append` と `clear` は互いに排他的に実行され、観測可能な形で
/// 交錯することはない。`snapshot` はクリア前後のセグメントが
/// 混在しない原子的なコピーを返す。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// セグメントを末尾に追加し、受理された世代を返す
    async fn append(&self, segment: StrokeSegment) -> ClearGeneration;

    /// 全セグメントを破棄し、新しい世代を返す
    async fn clear(&self) -> ClearGeneration;

    /// 現在のボード状態のコピーを取得
    async fn snapshot(&self) -> BoardSnapshot;

    /// セグメントを含まないボードのメタデータを取得
    async fn summary(&self) -> BoardSummary;
}
