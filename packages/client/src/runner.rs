//! Client execution logic with reconnection support.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

use crate::{
    board::Whiteboard,
    canvas::RecordingSurface,
    config::ClientConfig,
    domain::{next_failed_attempts, should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
    session::{SharedBoard, run_client_session},
    ui::spawn_line_reader,
};

/// Run the whiteboard client on terminal input until the user exits
pub async fn run_client(config: ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let board = shared_board(&config);
    let mut input = spawn_line_reader();
    run_client_with_input(&config, board, &mut input).await?;
    Ok(())
}

/// A whiteboard with an in-memory surface attached and no connection yet
pub fn shared_board(config: &ClientConfig) -> SharedBoard {
    let mut whiteboard = Whiteboard::new(config.brush.clone());
    whiteboard.attach_surface(RecordingSurface::new());
    Arc::new(Mutex::new(whiteboard))
}

/// Run the client with reconnection logic, reading commands from `input`.
///
/// Every successful connection replays the board from scratch. Gives up
/// after `config.max_reconnect_attempts` consecutive failures; a connection
/// that loaded the board resets the count.
pub async fn run_client_with_input(
    config: &ClientConfig,
    board: SharedBoard,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let max_attempts = config.max_reconnect_attempts;
    let mut failed_attempts = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} (attempt {}/{})",
            config.server_url,
            failed_attempts + 1,
            max_attempts
        );

        match run_client_session(&config.server_url, board.clone(), input).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                // If the user exited, don't reconnect
                break;
            }
            Err(e) => {
                if should_exit_immediately(&e) {
                    tracing::error!("{}. Exiting.", e);
                    return Err(e);
                }

                tracing::warn!("{}", e);
                failed_attempts = next_failed_attempts(&e, failed_attempts);

                if !should_attempt_reconnect(&e, failed_attempts, max_attempts) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        max_attempts
                    );
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {:?}... (attempt {}/{})",
                    config.reconnect_interval,
                    failed_attempts + 1,
                    max_attempts
                );

                tokio::time::sleep(config.reconnect_interval).await;
            }
        }
    }

    Ok(())
}
