//! Headless whiteboard client.
//!
//! Captures strokes from line commands, renders them onto a local canvas,
//! sends them to the relay and applies peers' events as they arrive.

pub mod board;
pub mod canvas;
pub mod capture;
pub mod channel;
pub mod command;
pub mod config;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod replay;
pub mod runner;
pub mod session;
pub mod ui;

pub use runner::{run_client, run_client_with_input, shared_board};
