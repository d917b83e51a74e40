//! Wire protocol between whiteboard clients and the relay.
//!
//! Every WebSocket text frame carries exactly one event in an adjacently
//! tagged envelope:
//!
//! ```text
//! {"type":"load-drawings","data":[<segment>, ...]}   server -> client
//! {"type":"drawing","data":<segment>}                 both directions
//! {"type":"clear-board"}                              both directions
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::segment::{SegmentError, StrokeSegment};

/// Event names as they appear in the `type` field.
pub mod event_name {
    pub const LOAD_DRAWINGS: &str = "load-drawings";
    pub const DRAWING: &str = "drawing";
    pub const CLEAR_BOARD: &str = "clear-board";
}

/// Protocol decoding failures.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Not JSON, unknown event type, or a payload of the wrong shape
    #[error("malformed event: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Well-formed JSON whose segment breaks a model invariant
    #[error("invalid segment: {0}")]
    InvalidSegment(#[from] SegmentError),
}

/// Events a client sends to the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// "Render and persist this segment"
    Drawing(StrokeSegment),
    /// "Discard all history"
    ClearBoard,
}

impl ClientEvent {
    /// Decode and validate an inbound frame.
    ///
    /// Drawing segments come back normalized, so nothing malformed can reach
    /// the store or other peers.
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        match serde_json::from_str::<Self>(text)? {
            Self::Drawing(segment) => Ok(Self::Drawing(segment.normalized()?)),
            Self::ClearBoard => Ok(Self::ClearBoard),
        }
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Drawing(_) => event_name::DRAWING,
            Self::ClearBoard => event_name::CLEAR_BOARD,
        }
    }
}

/// Events the relay sends to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Full board state, sent once right after connect
    LoadDrawings(Vec<StrokeSegment>),
    /// A peer produced this segment
    Drawing(StrokeSegment),
    /// A peer cleared the board
    ClearBoard,
}

impl ServerEvent {
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadDrawings(_) => event_name::LOAD_DRAWINGS,
            Self::Drawing(_) => event_name::DRAWING,
            Self::ClearBoard => event_name::CLEAR_BOARD,
        }
    }
}
