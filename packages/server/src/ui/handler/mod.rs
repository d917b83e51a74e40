mod http;
mod websocket;

pub use http::{debug_board_state, get_board, health_check};
pub use websocket::websocket_handler;
