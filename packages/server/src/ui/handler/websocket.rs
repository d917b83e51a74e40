//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use rakugaki_shared::protocol::ClientEvent;

use crate::{
    domain::ConnectionId,
    ui::state::AppState,
    usecase::{ConnectError, Replayed},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the connection's outbound queue into the WebSocket.
///
/// Events from the relay (the initial `load-drawings` and every fanned-out
/// peer event) are pushed into `rx` and written here in queue order.
///
/// # Arguments
///
/// * `rx` - Outbound queue for this connection
/// * `sender` - WebSocket sink to send events to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Create a queue for this connection to receive events
    let (tx, rx) = mpsc::unbounded_channel();
    let mut send_task = pusher_loop(rx, sender);

    // Connecting -> Replaying -> Live
    let Replayed {
        mut connection,
        segment_count,
        generation,
    } = match state.connect_participant_usecase.execute(tx).await {
        Ok(replayed) => replayed,
        Err(ConnectError::ReplayFailed(e)) => {
            tracing::warn!("Connection closed before replay could be delivered: {}", e);
            send_task.abort();
            return;
        }
        Err(e) => {
            tracing::error!("Failed to connect participant: {}", e);
            send_task.abort();
            return;
        }
    };
    tracing::info!(
        "Connection '{}' is live (replayed {} segments, generation {})",
        connection.id,
        segment_count,
        generation.value()
    );

    let connection_id = connection.id.clone();
    let state_clone = state.clone();

    // Spawn a task to receive events from this client, one at a time in arrival order
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch_client_event(&state_clone, &connection_id, text.as_str()).await;
                }
                Message::Binary(data) => {
                    tracing::warn!(
                        "Ignoring {} byte binary frame from '{}'",
                        data.len(),
                        connection_id
                    );
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                Message::Ping(_) | Message::Pong(_) => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Live -> Closed
    match state
        .disconnect_participant_usecase
        .execute(&mut connection)
        .await
    {
        Ok(remaining) => tracing::info!(
            "Connection '{}' closed ({} connections remaining)",
            connection.id,
            remaining
        ),
        Err(e) => tracing::warn!("Failed to disconnect '{}': {}", connection.id, e),
    }
}

/// Decode one inbound frame and hand it to the matching use case.
///
/// Malformed frames are logged and dropped; they never reach the store or
/// other peers and never close the connection.
async fn dispatch_client_event(state: &AppState, from: &ConnectionId, text: &str) {
    let event = match ClientEvent::decode(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Dropping malformed event from '{}': {}", from, e);
            return;
        }
    };
    tracing::debug!("Received '{}' from '{}'", event.name(), from);

    match event {
        ClientEvent::Drawing(segment) => {
            if let Err(e) = state.send_drawing_usecase.execute(from, segment).await {
                tracing::warn!("Failed to relay drawing from '{}': {}", from, e);
            }
        }
        ClientEvent::ClearBoard => {
            if let Err(e) = state.clear_board_usecase.execute(from).await {
                tracing::warn!("Failed to relay clear-board from '{}': {}", from, e);
            }
        }
    }
}
