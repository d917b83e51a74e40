//! Stroke relay server for the Rakugaki shared whiteboard.
//!
//! Clients connect over WebSocket, receive the current board as one
//! `load-drawings` event, and from then on exchange `drawing` and
//! `clear-board` events through the relay.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
