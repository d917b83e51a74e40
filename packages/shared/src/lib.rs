//! Code shared by the Rakugaki server and client.
//!
//! - `segment`: the StrokeSegment model and its validation
//! - `protocol`: the WebSocket event envelope exchanged with the relay
//! - `logger` / `time`: ambient utilities used by both binaries

pub mod logger;
pub mod protocol;
pub mod segment;
pub mod time;
