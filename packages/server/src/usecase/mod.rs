//! UseCase layer: the Broadcast Relay.
//!
//! Each use case performs one relay operation against the Drawing Store
//! (`BoardRepository`) and the fan-out set (`EventPusher`). Operations that
//! mutate the store or change the fan-out set run inside the shared
//! `RelaySequencer`, so every connection observes events in store order.

mod clear_board;
mod connect_participant;
mod disconnect_participant;
mod error;
mod get_board_state;
mod send_drawing;
mod sequencer;

pub use clear_board::ClearBoardUseCase;
pub use connect_participant::{ConnectParticipantUseCase, Replayed};
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ClearBoardError, ConnectError, DisconnectError, SendDrawingError};
pub use get_board_state::GetBoardStateUseCase;
pub use send_drawing::SendDrawingUseCase;
pub use sequencer::RelaySequencer;

use crate::domain::{ClearGeneration, ConnectionId};

/// Result of a relayed mutation: the generation it applied to and the peers
/// it was fanned out to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub generation: ClearGeneration,
    pub targets: Vec<ConnectionId>,
}

/// 送信者以外の全ての接続 ID を返す
fn exclude_sender(all: Vec<ConnectionId>, sender: &ConnectionId) -> Vec<ConnectionId> {
    all.into_iter().filter(|id| id != sender).collect()
}
