//! The local whiteboard: canvas, capture and sync channel together.

use rakugaki_shared::{
    protocol::{ClientEvent, ServerEvent},
    segment::{Point, SegmentError, StrokeSegment},
};

use crate::{
    canvas::{Canvas, Surface},
    capture::{Brush, Capture},
    channel::{ChannelError, SyncChannel},
    replay::replay,
};

/// What a server event did to the local board.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// `load-drawings` rebuilt the canvas from this many segments
    Replayed(usize),
    /// A peer's segment was drawn
    Drew(StrokeSegment),
    /// A peer cleared the board
    Cleared,
    /// No surface attached yet
    Dropped,
}

/// Local participant state.
///
/// Strokes render locally before they are sent, so drawing never waits on
/// the network. Incoming events are dropped while no surface is attached.
#[derive(Debug)]
pub struct Whiteboard<S> {
    canvas: Option<Canvas<S>>,
    capture: Capture,
    channel: SyncChannel,
}

impl<S: Surface> Whiteboard<S> {
    pub fn new(brush: Brush) -> Self {
        Self {
            canvas: None,
            capture: Capture::new(brush),
            channel: SyncChannel::closed(),
        }
    }

    pub fn attach_surface(&mut self, surface: S) {
        self.canvas = Some(Canvas::new(surface));
    }

    pub fn canvas(&self) -> Option<&Canvas<S>> {
        self.canvas.as_ref()
    }

    pub fn brush(&self) -> &Brush {
        self.capture.brush()
    }

    pub fn set_color(&mut self, color: &str) -> Result<(), SegmentError> {
        self.capture.set_color(color)
    }

    pub fn set_width(&mut self, width: f64) -> Result<(), SegmentError> {
        self.capture.set_width(width)
    }

    pub fn channel(&self) -> &SyncChannel {
        &self.channel
    }

    /// Bind a fresh connection's outbound queue.
    pub fn connect(&mut self, channel: SyncChannel) {
        self.channel = channel;
    }

    pub fn disconnect(&mut self) {
        self.channel.close();
    }

    pub fn start_stroke(&mut self, origin: Point) {
        self.capture.start_stroke(origin);
    }

    pub fn extend_stroke(
        &mut self,
        prev: Point,
        current: Point,
        color: &str,
        width: f64,
    ) -> Option<StrokeSegment> {
        let segment = self.capture.extend_stroke(prev, current, color, width)?;
        self.commit(segment.clone());
        Some(segment)
    }

    pub fn pointer_moved(&mut self, current: Point) -> Option<StrokeSegment> {
        let segment = self.capture.pointer_moved(current)?;
        self.commit(segment.clone());
        Some(segment)
    }

    pub fn end_stroke(&mut self) {
        self.capture.end_stroke();
    }

    /// Draw a whole polyline as one stroke; returns the segments emitted.
    pub fn stroke(&mut self, points: &[Point]) -> Vec<StrokeSegment> {
        let Some((&origin, rest)) = points.split_first() else {
            return Vec::new();
        };
        self.start_stroke(origin);
        let segments = rest
            .iter()
            .filter_map(|&point| self.pointer_moved(point))
            .collect();
        self.end_stroke();
        segments
    }

    /// Clear locally and tell the relay.
    pub fn clear_board(&mut self) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.clear();
        }
        self.send(&ClientEvent::ClearBoard);
    }

    pub fn handle_server_event(&mut self, event: ServerEvent) -> Applied {
        let Some(canvas) = self.canvas.as_mut() else {
            tracing::debug!("No surface attached, dropping '{}'", event.name());
            return Applied::Dropped;
        };

        match event {
            ServerEvent::LoadDrawings(segments) => {
                let count = replay(canvas, segments);
                self.channel.mark_replayed();
                Applied::Replayed(count)
            }
            ServerEvent::Drawing(segment) => {
                canvas.draw(segment.clone());
                Applied::Drew(segment)
            }
            ServerEvent::ClearBoard => {
                canvas.clear();
                Applied::Cleared
            }
        }
    }

    fn commit(&mut self, segment: StrokeSegment) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.draw(segment.clone());
        }
        self.send(&ClientEvent::Drawing(segment));
    }

    fn send(&self, event: &ClientEvent) {
        match self.channel.send(event) {
            Ok(()) => {}
            Err(ChannelError::Closed) => {
                tracing::debug!("Sync channel closed, '{}' not sent", event.name());
            }
            Err(e) => tracing::warn!("Failed to send '{}': {}", event.name(), e),
        }
    }
}
