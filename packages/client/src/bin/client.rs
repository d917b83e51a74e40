//! Headless whiteboard client with reconnection support.
//!
//! Connects to the whiteboard relay, replays the current board, and draws
//! strokes typed on stdin (`stroke`, `line`, `color`, `width`, `clear`, `show`).
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin rakugaki-client
//! cargo run --bin rakugaki-client -- --server-url ws://127.0.0.1:5000/ws --color '#ff0000' --width 4
//! ```

use clap::Parser;

use rakugaki_client::{
    capture::{Brush, DEFAULT_COLOR, DEFAULT_WIDTH},
    config::{ClientConfig, DEFAULT_SERVER_URL},
};
use rakugaki_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "rakugaki-client")]
#[command(about = "Headless shared whiteboard client", long_about = None)]
struct Args {
    /// WebSocket URL of the whiteboard relay
    #[arg(short = 'u', long, env = "RAKUGAKI_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,

    /// Initial brush color (#rgb or #rrggbb)
    #[arg(long, default_value = DEFAULT_COLOR)]
    color: String,

    /// Initial brush width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: f64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let brush = match Brush::new(&args.color, args.width) {
        Ok(brush) => brush,
        Err(e) => {
            tracing::error!("Invalid brush: {}", e);
            std::process::exit(1);
        }
    };
    let config = ClientConfig {
        server_url: args.server_url,
        brush,
        ..ClientConfig::default()
    };

    // Run the client
    if let Err(e) = rakugaki_client::run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
