//! UI layer: axum router, WebSocket relay endpoint and HTTP inspection API.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{Server, ServerConfig};
