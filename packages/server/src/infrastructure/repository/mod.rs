//! Repository 実装
//!
//! - `inmemory`: プロセス内メモリに保持する Drawing Store

pub mod inmemory;

pub use inmemory::InMemoryBoardRepository;
