//! Domain entities: the board (Drawing Store state) and connections.

use serde::Serialize;

use super::{
    error::TransitionError,
    value_object::{ClearGeneration, ConnectionId, Timestamp},
};
use rakugaki_shared::segment::StrokeSegment;

/// Board State: every segment accepted since the last clear.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    segments: Vec<StrokeSegment>,
    generation: ClearGeneration,
    created_at: Timestamp,
}

/// Atomic copy of the board at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    pub generation: ClearGeneration,
    pub segments: Vec<StrokeSegment>,
}

/// Board metadata without the segments themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSummary {
    pub generation: ClearGeneration,
    pub segment_count: usize,
    pub created_at: Timestamp,
}

impl Board {
    pub fn new(created_at: Timestamp) -> Self {
        Self {
            segments: Vec::new(),
            generation: ClearGeneration::initial(),
            created_at,
        }
    }

    /// Append a segment, returning the generation it was accepted into.
    pub fn append(&mut self, segment: StrokeSegment) -> ClearGeneration {
        self.segments.push(segment);
        self.generation
    }

    /// Drop every segment and start a new generation.
    ///
    /// Repeated clears leave the same empty board; each one still bumps the
    /// generation.
    pub fn clear(&mut self) -> ClearGeneration {
        self.segments.clear();
        self.generation = self.generation.next();
        self.generation
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            generation: self.generation,
            segments: self.segments.clone(),
        }
    }

    pub fn summary(&self) -> BoardSummary {
        BoardSummary {
            generation: self.generation,
            segment_count: self.segments.len(),
            created_at: self.created_at,
        }
    }
}

/// Relay-side lifecycle of a connection.
///
/// ```text
/// Connecting -> Replaying -> Live -> Closed
///      \____________\___________________^
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionPhase {
    Connecting,
    Replaying,
    Live,
    Closed,
}

/// A single client's channel session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    pub connected_at: Timestamp,
    phase: ConnectionPhase,
}

impl Connection {
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            connected_at,
            phase: ConnectionPhase::Connecting,
        }
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.phase
    }

    pub fn begin_replay(&mut self) -> Result<(), TransitionError> {
        self.transition(ConnectionPhase::Connecting, ConnectionPhase::Replaying)
    }

    pub fn go_live(&mut self) -> Result<(), TransitionError> {
        self.transition(ConnectionPhase::Replaying, ConnectionPhase::Live)
    }

    /// Close from any open phase. Closing twice is an error.
    pub fn close(&mut self) -> Result<(), TransitionError> {
        if self.phase == ConnectionPhase::Closed {
            return Err(TransitionError {
                from: self.phase,
                to: ConnectionPhase::Closed,
            });
        }
        self.phase = ConnectionPhase::Closed;
        Ok(())
    }

    fn transition(
        &mut self,
        expected: ConnectionPhase,
        next: ConnectionPhase,
    ) -> Result<(), TransitionError> {
        if self.phase != expected {
            return Err(TransitionError {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        Ok(())
    }
}
