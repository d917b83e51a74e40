//! Pointer capture: turns a gesture into stroke segments.
//!
//! A stroke starts with [`Capture::start_stroke`], produces one segment per
//! sampled movement, and ends with [`Capture::end_stroke`]. Starting and
//! ending a stroke never produce a segment.

use rakugaki_shared::segment::{Point, SegmentError, StrokeSegment, normalize_color};

pub const DEFAULT_COLOR: &str = "#000000";
pub const DEFAULT_WIDTH: f64 = 2.0;

/// Current color and line width.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub color: String,
    pub width: f64,
}

impl Brush {
    /// Build a brush, normalizing the color to `#rrggbb`.
    pub fn new(color: &str, width: f64) -> Result<Self, SegmentError> {
        Ok(Self {
            color: normalize_color(color)?,
            width: check_width(width)?,
        })
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            width: DEFAULT_WIDTH,
        }
    }
}

fn check_width(width: f64) -> Result<f64, SegmentError> {
    if width.is_finite() && width > 0.0 {
        Ok(width)
    } else {
        Err(SegmentError::InvalidWidth(width))
    }
}

#[derive(Debug, Default)]
pub struct Capture {
    brush: Brush,
    /// Last sampled point of the active stroke; `None` while idle.
    last_point: Option<Point>,
}

impl Capture {
    pub fn new(brush: Brush) -> Self {
        Self {
            brush,
            last_point: None,
        }
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn set_color(&mut self, color: &str) -> Result<(), SegmentError> {
        self.brush.color = normalize_color(color)?;
        Ok(())
    }

    pub fn set_width(&mut self, width: f64) -> Result<(), SegmentError> {
        self.brush.width = check_width(width)?;
        Ok(())
    }

    pub fn is_drawing(&self) -> bool {
        self.last_point.is_some()
    }

    pub fn start_stroke(&mut self, origin: Point) {
        self.last_point = Some(origin);
    }

    /// Emit the segment `prev -> current` if a stroke is active.
    ///
    /// The segment is normalized first; one the relay would reject is dropped
    /// and the stroke stays at its last point.
    pub fn extend_stroke(
        &mut self,
        prev: Point,
        current: Point,
        color: &str,
        width: f64,
    ) -> Option<StrokeSegment> {
        self.last_point?;
        match StrokeSegment::between(prev, current, color, width).normalized() {
            Ok(segment) => {
                self.last_point = Some(current);
                Some(segment)
            }
            Err(e) => {
                tracing::warn!("Dropping invalid segment: {}", e);
                None
            }
        }
    }

    /// Emit the segment from the last sampled point to `current` with the
    /// current brush.
    pub fn pointer_moved(&mut self, current: Point) -> Option<StrokeSegment> {
        let prev = self.last_point?;
        let Brush { color, width } = self.brush.clone();
        self.extend_stroke(prev, current, &color, width)
    }

    pub fn end_stroke(&mut self) {
        self.last_point = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_brush() {
        // テスト項目: デフォルトのブラシは黒・太さ 2
        // given (前提条件):
        let capture = Capture::default();

        // when (操作):
        let brush = capture.brush();

        // then (期待する結果):
        assert_eq!(brush.color, "#000000");
        assert_eq!(brush.width, 2.0);
        assert!(!capture.is_drawing());
    }

    #[test]
    fn test_start_and_end_emit_nothing() {
        // テスト項目: start と end だけのジェスチャーはセグメントを生成しない
        // given (前提条件):
        let mut capture = Capture::default();

        // when (操作):
        capture.start_stroke(Point::new(1.0, 1.0));
        capture.end_stroke();

        // then (期待する結果): ストローク外の移動も無視される
        assert_eq!(capture.pointer_moved(Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_pointer_moved_chains_from_last_point() {
        // テスト項目: 連続した移動が直前の点から繋がったセグメントになる
        // given (前提条件):
        let mut capture = Capture::new(Brush::new("#F00", 4.0).unwrap());
        capture.start_stroke(Point::new(0.0, 0.0));

        // when (操作):
        let first = capture.pointer_moved(Point::new(3.0, 4.0)).unwrap();
        let second = capture.pointer_moved(Point::new(6.0, 8.0)).unwrap();

        // then (期待する結果):
        assert_eq!(first.start(), Point::new(0.0, 0.0));
        assert_eq!(first.end(), Point::new(3.0, 4.0));
        assert_eq!(second.start(), first.end());
        assert_eq!(second.color, "#ff0000");
        assert_eq!(second.width, 4.0);
    }

    #[test]
    fn test_extend_stroke_uses_given_endpoints() {
        // テスト項目: extend_stroke は指定された端点・色・太さでセグメントを作る
        // given (前提条件):
        let mut capture = Capture::default();
        capture.start_stroke(Point::new(0.0, 0.0));

        // when (操作):
        let segment = capture
            .extend_stroke(Point::new(10.0, 10.0), Point::new(20.0, 20.0), "#00ff00", 7.0)
            .unwrap();

        // then (期待する結果):
        assert_eq!(segment.prev_x, 10.0);
        assert_eq!(segment.x, 20.0);
        assert_eq!(segment.color, "#00ff00");
        assert_eq!(segment.width, 7.0);
    }

    #[test]
    fn test_extend_stroke_normalizes_color() {
        // テスト項目: extend_stroke の色は #rrggbb の小文字に正規化される
        // given (前提条件):
        let mut capture = Capture::default();
        capture.start_stroke(Point::new(0.0, 0.0));

        // when (操作):
        let segment = capture
            .extend_stroke(Point::new(0.0, 0.0), Point::new(1.0, 1.0), "#0F0", 1.0)
            .unwrap();

        // then (期待する結果):
        assert_eq!(segment.color, "#00ff00");
    }

    #[test]
    fn test_extend_stroke_drops_invalid_segments() {
        // テスト項目: 名前付きの色や不正な太さのセグメントは生成されず、ストロークの位置も進まない
        // given (前提条件):
        let mut capture = Capture::default();
        capture.start_stroke(Point::new(0.0, 0.0));

        // when (操作):
        let named = capture.extend_stroke(Point::new(0.0, 0.0), Point::new(5.0, 5.0), "red", 2.0);
        let zero_width =
            capture.extend_stroke(Point::new(0.0, 0.0), Point::new(5.0, 5.0), "#ff0000", 0.0);
        let infinite = capture.extend_stroke(
            Point::new(0.0, 0.0),
            Point::new(f64::INFINITY, 5.0),
            "#ff0000",
            2.0,
        );

        // then (期待する結果):
        assert_eq!(named, None);
        assert_eq!(zero_width, None);
        assert_eq!(infinite, None);
        let next = capture.pointer_moved(Point::new(1.0, 1.0)).unwrap();
        assert_eq!(next.start(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_invalid_brush_settings_are_rejected() {
        // テスト項目: 不正な色・太さの設定は拒否され、ブラシは変わらない
        // given (前提条件):
        let mut capture = Capture::default();

        // when (操作):
        let color_result = capture.set_color("red");
        let width_result = capture.set_width(0.0);

        // then (期待する結果):
        assert!(matches!(color_result, Err(SegmentError::InvalidColor(_))));
        assert!(matches!(width_result, Err(SegmentError::InvalidWidth(_))));
        assert_eq!(capture.brush(), &Brush::default());
    }
}
