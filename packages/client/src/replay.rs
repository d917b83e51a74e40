//! Replay Loader: rebuilds the canvas from a `load-drawings` snapshot.

use rakugaki_shared::segment::StrokeSegment;

use crate::canvas::{Canvas, Surface};

/// Reset the canvas and render `segments` in order.
///
/// The reset makes a reconnect converge even when a `clear-board` was
/// missed while offline. Returns the number of segments replayed.
pub fn replay<S: Surface>(canvas: &mut Canvas<S>, segments: Vec<StrokeSegment>) -> usize {
    canvas.clear();
    let count = segments.len();
    for segment in segments {
        canvas.draw(segment);
    }
    tracing::debug!("Replayed {} segments", count);
    count
}
