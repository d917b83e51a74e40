//! Server execution logic.

use std::{collections::HashMap, sync::Arc};

use axum::{Router, routing::get};
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::trace::TraceLayer;

use rakugaki_shared::time::{Clock, SystemClock};

use crate::{
    domain::{Board, BoardRepository, EventPusher, Timestamp},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryBoardRepository},
    usecase::{
        ClearBoardUseCase, ConnectParticipantUseCase, DisconnectParticipantUseCase,
        GetBoardStateUseCase, RelaySequencer, SendDrawingUseCase,
    },
};

use super::{
    handler::{debug_board_state, get_board, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Runtime settings for the relay server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to (e.g., "127.0.0.1")
    pub host: String,
    /// Port number to bind to (0 picks an ephemeral port)
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// WebSocket relay server
///
/// This struct encapsulates the use cases and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::in_memory(&ServerConfig::default());
/// server.run(&ServerConfig::default()).await?;
/// ```
pub struct Server {
    connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    send_drawing_usecase: Arc<SendDrawingUseCase>,
    clear_board_usecase: Arc<ClearBoardUseCase>,
    get_board_state_usecase: Arc<GetBoardStateUseCase>,
}

impl Server {
    /// Create a new Server instance from its use cases
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        send_drawing_usecase: Arc<SendDrawingUseCase>,
        clear_board_usecase: Arc<ClearBoardUseCase>,
        get_board_state_usecase: Arc<GetBoardStateUseCase>,
    ) -> Self {
        Self {
            connect_participant_usecase,
            disconnect_participant_usecase,
            send_drawing_usecase,
            clear_board_usecase,
            get_board_state_usecase,
        }
    }

    /// Wire an in-memory Drawing Store and WebSocket fan-out into a server.
    ///
    /// Dependencies are created in order:
    /// 1. Repository (the Drawing Store, exclusive owner of the board)
    /// 2. EventPusher (the fan-out set)
    /// 3. UseCases sharing one RelaySequencer
    pub fn in_memory(config: &ServerConfig) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        // 1. Create Repository (in-memory board)
        let board = Board::new(Timestamp::new(clock.now_millis()));
        let repository: Arc<dyn BoardRepository> =
            Arc::new(InMemoryBoardRepository::new(Arc::new(Mutex::new(board))));

        // 2. Create EventPusher (WebSocket implementation)
        let message_pusher: Arc<dyn EventPusher> =
            Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(HashMap::new()))));

        // 3. Create UseCases
        let sequencer = Arc::new(RelaySequencer::new());
        Self::new(
            Arc::new(ConnectParticipantUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                sequencer.clone(),
                clock,
            )),
            Arc::new(DisconnectParticipantUseCase::new(message_pusher.clone())),
            Arc::new(SendDrawingUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                sequencer.clone(),
            )),
            Arc::new(ClearBoardUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                sequencer,
            )),
            Arc::new(GetBoardStateUseCase::new(repository, message_pusher)),
        )
    }

    /// Build the axum router
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_participant_usecase: self.connect_participant_usecase,
            disconnect_participant_usecase: self.disconnect_participant_usecase,
            send_drawing_usecase: self.send_drawing_usecase,
            clear_board_usecase: self.clear_board_usecase,
            get_board_state_usecase: self.get_board_state_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/board", get(get_board))
            .route("/debug/board", get(debug_board_state))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the relay server on the configured address until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(config.bind_addr()).await?;

        tracing::info!("Whiteboard relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until the task is dropped
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        axum::serve(listener, self.router()).await
    }
}
