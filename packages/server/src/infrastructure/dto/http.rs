//! HTTP API response DTOs.

use serde::Serialize;

use rakugaki_shared::{segment::StrokeSegment, time::millis_to_rfc3339};

use crate::domain::{BoardSnapshot, BoardSummary};

/// `GET /api/board`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummaryDto {
    pub generation: u64,
    pub segment_count: usize,
    pub connections: usize,
    pub created_at: String,
}

impl BoardSummaryDto {
    pub fn new(summary: BoardSummary, connections: usize) -> Self {
        Self {
            generation: summary.generation.value(),
            segment_count: summary.segment_count,
            connections,
            created_at: millis_to_rfc3339(summary.created_at.value()),
        }
    }
}

/// `GET /debug/board`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshotDto {
    pub generation: u64,
    pub segments: Vec<StrokeSegment>,
}

impl From<BoardSnapshot> for BoardSnapshotDto {
    fn from(snapshot: BoardSnapshot) -> Self {
        Self {
            generation: snapshot.generation.value(),
            segments: snapshot.segments,
        }
    }
}
