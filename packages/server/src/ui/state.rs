//! Server state and connection management.

use std::sync::Arc;

use crate::usecase::{
    ClearBoardUseCase, ConnectParticipantUseCase, DisconnectParticipantUseCase,
    GetBoardStateUseCase, SendDrawingUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（接続とリプレイ）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（切断）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// SendDrawingUseCase（drawing の中継）
    pub send_drawing_usecase: Arc<SendDrawingUseCase>,
    /// ClearBoardUseCase（clear-board の中継）
    pub clear_board_usecase: Arc<ClearBoardUseCase>,
    /// GetBoardStateUseCase（HTTP 参照用）
    pub get_board_state_usecase: Arc<GetBoardStateUseCase>,
}
