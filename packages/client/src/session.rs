//! WebSocket client session management.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Error as WsError, protocol::Message},
};

use rakugaki_shared::{protocol::ServerEvent, time::now_millis};

use crate::{
    board::{Applied, Whiteboard},
    canvas::{RecordingSurface, Surface},
    channel::SyncChannel,
    command::{Command, CommandError, parse},
    error::ClientError,
    formatter::BoardFormatter,
    ui::redisplay_prompt,
};

/// Whiteboard shared between the socket reader and the input loop.
pub type SharedBoard = Arc<Mutex<Whiteboard<RecordingSurface>>>;

/// Run one WebSocket session against the relay.
///
/// Commands from `input` are held until the board has been replayed, so a
/// local stroke is never wiped by the replay that follows it.
///
/// Returns `Ok(())` when `input` is exhausted (the user quit). A connection
/// that drops after the replay is `ConnectionLost`; one that fails or closes
/// before it is `ConnectionError`.
pub async fn run_client_session(
    url: &str,
    board: SharedBoard,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url).await.map_err(|e| match e {
        WsError::Url(_) | WsError::HttpFormat(_) => ClientError::InvalidUrl(url.to_string()),
        other => ClientError::ConnectionError(other.to_string()),
    })?;

    tracing::info!("Connected to whiteboard relay at {}", url);
    println!("\nType 'help' for commands. Press Ctrl+D to exit.\n");

    let (mut write, mut read) = ws_stream.split();

    // Outbound queue: the Sync Channel pushes, this task writes
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    board.lock().await.connect(SyncChannel::open(tx));

    let mut write_task = tokio::spawn(async move {
        while let Some(json) = rx.recv().await {
            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send event: {}", e);
                return e.to_string();
            }
        }
        write.close().await.ok();
        "Sync channel closed".to_string()
    });

    // Spawn a task to handle incoming events
    let (replayed_tx, mut replayed_rx) = oneshot::channel::<()>();
    let board_for_read = board.clone();
    let mut read_task = tokio::spawn(async move {
        let mut replayed_tx = Some(replayed_tx);
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => match ServerEvent::decode(text.as_str()) {
                    Ok(event) => {
                        tracing::debug!("Received '{}'", event.name());
                        let applied = board_for_read.lock().await.handle_server_event(event);
                        if let Applied::Replayed(_) = applied
                            && let Some(tx) = replayed_tx.take()
                        {
                            tx.send(()).ok();
                        }
                        print!("{}", format_applied(&applied));
                        redisplay_prompt();
                    }
                    Err(e) => {
                        tracing::warn!("Ignoring malformed event: {}", e);
                        print!("{}", BoardFormatter::format_raw_message(text.as_str()));
                        redisplay_prompt();
                    }
                },
                Ok(Message::Binary(data)) => {
                    print!("{}", BoardFormatter::format_binary_message(data.len()));
                    redisplay_prompt();
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return "Server closed the connection".to_string();
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return e.to_string();
                }
                _ => {}
            }
        }
        "Connection closed".to_string()
    });

    let mut awaiting_replay = true;
    let mut live = false;
    let result = loop {
        tokio::select! {
            replayed = &mut replayed_rx, if awaiting_replay => {
                awaiting_replay = false;
                live = replayed.is_ok();
            }
            line = input.recv(), if live => match line {
                Some(line) => {
                    print!("{}", execute_line(&board, &line).await);
                    redisplay_prompt();
                }
                None => break Ok(()),
            },
            reason = &mut read_task => {
                break Err(reason.unwrap_or_else(|e| e.to_string()));
            }
            reason = &mut write_task => {
                break Err(reason.unwrap_or_else(|e| e.to_string()));
            }
        }
    };
    let replayed = board.lock().await.channel().is_replayed();
    let result = match result {
        Ok(()) => Ok(()),
        Err(reason) if replayed => Err(ClientError::ConnectionLost(reason)),
        Err(reason) => Err(ClientError::ConnectionError(format!(
            "closed before the board was loaded: {}",
            reason
        ))),
    };

    // Live -> Closed; dropping the queue lets the writer send a close frame
    board.lock().await.disconnect();
    if result.is_ok() {
        let _ = tokio::time::timeout(std::time::Duration::from_secs(1), &mut write_task).await;
    }
    read_task.abort();
    write_task.abort();

    result
}

async fn execute_line(board: &SharedBoard, line: &str) -> String {
    let result = match parse(line) {
        Ok(command) => apply_command(&mut *board.lock().await, command),
        Err(e) => Err(e),
    };
    result.unwrap_or_else(|e| format!("error: {}\n", e))
}

/// Apply one parsed command to the local whiteboard and describe the result.
pub fn apply_command<S: Surface>(
    board: &mut Whiteboard<S>,
    command: Command,
) -> Result<String, CommandError> {
    match command {
        Command::Stroke(points) => {
            let drawn = board.stroke(&points).len();
            Ok(BoardFormatter::format_sent(drawn, board.channel().is_open()))
        }
        Command::Color(color) => {
            board.set_color(&color)?;
            Ok(BoardFormatter::format_brush(board.brush()))
        }
        Command::Width(width) => {
            board.set_width(width)?;
            Ok(BoardFormatter::format_brush(board.brush()))
        }
        Command::Clear => {
            board.clear_board();
            Ok(BoardFormatter::format_local_clear())
        }
        Command::Show => Ok(match board.canvas() {
            Some(canvas) => BoardFormatter::format_board(canvas.segments()),
            None => BoardFormatter::format_board(std::iter::empty()),
        }),
        Command::Help => Ok(BoardFormatter::format_help()),
    }
}

fn format_applied(applied: &Applied) -> String {
    match applied {
        Applied::Replayed(count) => BoardFormatter::format_replayed(*count, now_millis()),
        Applied::Drew(segment) => BoardFormatter::format_remote_drawing(segment),
        Applied::Cleared => BoardFormatter::format_remote_clear(),
        Applied::Dropped => String::new(),
    }
}
