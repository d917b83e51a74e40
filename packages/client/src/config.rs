//! Client settings.

use std::time::Duration;

use crate::{
    capture::Brush,
    domain::{MAX_RECONNECT_ATTEMPTS, RECONNECT_INTERVAL_SECS},
};

/// Default relay endpoint.
pub const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:5000/ws";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// WebSocket URL of the relay's `/ws` endpoint
    pub server_url: String,
    /// Brush used until changed with `color` / `width`
    pub brush: Brush,
    /// Consecutive failed connection attempts tolerated before giving up
    pub max_reconnect_attempts: u32,
    /// Wait between connection attempts
    pub reconnect_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            brush: Brush::default(),
            max_reconnect_attempts: MAX_RECONNECT_ATTEMPTS,
            reconnect_interval: Duration::from_secs(RECONNECT_INTERVAL_SECS),
        }
    }
}
