//! Message formatting utilities for client display.

use rakugaki_shared::{segment::StrokeSegment, time::millis_to_rfc3339};

use crate::capture::Brush;

const RULE: &str = "============================================================";

/// Formatter for terminal output
pub struct BoardFormatter;

impl BoardFormatter {
    /// Format the result of a `load-drawings` replay
    ///
    /// # Arguments
    ///
    /// * `segment_count` - Number of segments replayed
    /// * `loaded_at` - Unix timestamp when the replay finished (milliseconds)
    pub fn format_replayed(segment_count: usize, loaded_at: i64) -> String {
        format!(
            "\n\n{RULE}\nBoard loaded: {} segment{} (at {})\n{RULE}\n",
            segment_count,
            if segment_count == 1 { "" } else { "s" },
            millis_to_rfc3339(loaded_at)
        )
    }

    /// Format a segment drawn by a peer
    pub fn format_remote_drawing(segment: &StrokeSegment) -> String {
        format!("\n← {}\n", Self::describe_segment(segment))
    }

    /// Format a clear issued by a peer
    pub fn format_remote_clear() -> String {
        "\n← Board cleared by a peer\n".to_string()
    }

    /// Format confirmation after a local stroke
    pub fn format_sent(segment_count: usize, connected: bool) -> String {
        if connected {
            format!("drew {} segment(s)\n", segment_count)
        } else {
            format!("drew {} segment(s) locally (offline, not sent)\n", segment_count)
        }
    }

    pub fn format_local_clear() -> String {
        "board cleared\n".to_string()
    }

    pub fn format_brush(brush: &Brush) -> String {
        format!("brush: {} width {}\n", brush.color, brush.width)
    }

    /// Format the visible segments, oldest first
    pub fn format_board<'a>(segments: impl IntoIterator<Item = &'a StrokeSegment>) -> String {
        let mut output = String::new();
        output.push_str(RULE);
        output.push('\n');

        let mut count = 0;
        for (index, segment) in segments.into_iter().enumerate() {
            output.push_str(&format!("{:>4}: {}\n", index + 1, Self::describe_segment(segment)));
            count += 1;
        }
        if count == 0 {
            output.push_str("(Empty board)\n");
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    pub fn format_help() -> String {
        [
            "Commands:",
            "  stroke x1,y1 x2,y2 [...]  draw a polyline",
            "  line x1,y1 x2,y2          draw one segment",
            "  color #rrggbb             set brush color",
            "  width N                   set brush width",
            "  clear                     clear the board for everyone",
            "  show                      list visible segments",
            "",
        ]
        .join("\n")
    }

    /// Format a binary frame notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Ignored {} bytes of binary data\n", byte_count)
    }

    /// Format a frame that is not a known event
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Unrecognized: {}\n", text)
    }

    fn describe_segment(segment: &StrokeSegment) -> String {
        format!(
            "({}, {}) -> ({}, {}) {} w{}",
            segment.prev_x, segment.prev_y, segment.x, segment.y, segment.color, segment.width
        )
    }
}
