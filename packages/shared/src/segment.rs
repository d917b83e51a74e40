//! StrokeSegment: the atomic unit of drawn data.
//!
//! A segment is one straight line from `(prevX, prevY)` to `(x, y)` with a
//! color and a width. The JSON field names are part of the wire protocol and
//! must stay exactly `x`, `y`, `prevX`, `prevY`, `color`, `width`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Validation failures for an inbound segment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SegmentError {
    #[error("coordinate '{0}' is not a finite number")]
    NonFiniteCoordinate(&'static str),

    #[error("width must be a positive finite number (got {0})")]
    InvalidWidth(f64),

    #[error("color '{0}' is not a #rgb or #rrggbb hex color")]
    InvalidColor(String),
}

/// One line primitive between two adjacent sampled points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeSegment {
    pub x: f64,
    pub y: f64,
    pub prev_x: f64,
    pub prev_y: f64,
    pub color: String,
    pub width: f64,
}

impl StrokeSegment {
    /// Build a segment from `prev` to `current`.
    pub fn between(prev: Point, current: Point, color: impl Into<String>, width: f64) -> Self {
        Self {
            x: current.x,
            y: current.y,
            prev_x: prev.x,
            prev_y: prev.y,
            color: color.into(),
            width,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.prev_x, self.prev_y)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Zero-length segments are legal; they render as no-ops.
    pub fn is_zero_length(&self) -> bool {
        self.start() == self.end()
    }

    /// Check the invariants a relay must enforce before storing a segment.
    pub fn validate(&self) -> Result<(), SegmentError> {
        for (name, value) in [
            ("x", self.x),
            ("y", self.y),
            ("prevX", self.prev_x),
            ("prevY", self.prev_y),
        ] {
            if !value.is_finite() {
                return Err(SegmentError::NonFiniteCoordinate(name));
            }
        }

        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(SegmentError::InvalidWidth(self.width));
        }

        normalize_color(&self.color)?;
        Ok(())
    }

    /// Validate and return a copy with the color in canonical `#rrggbb` form.
    pub fn normalized(self) -> Result<Self, SegmentError> {
        self.validate()?;
        let color = normalize_color(&self.color)?;
        Ok(Self { color, ..self })
    }
}

/// Normalize a CSS hex color to lowercase `#rrggbb`.
///
/// `#rgb` shorthand is expanded; surrounding whitespace is ignored.
pub fn normalize_color(color: &str) -> Result<String, SegmentError> {
    let invalid = || SegmentError::InvalidColor(color.to_string());

    let hex = color.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let hex = hex.to_ascii_lowercase();
    match hex.len() {
        6 => Ok(format!("#{hex}")),
        3 => Ok(hex.chars().fold(String::from("#"), |mut out, c| {
            out.push(c);
            out.push(c);
            out
        })),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_segment() -> StrokeSegment {
        StrokeSegment::between(Point::new(0.0, 0.0), Point::new(10.0, 10.0), "#ff0000", 2.0)
    }

    #[test]
    fn test_segment_serializes_with_wire_field_names() {
        // テスト項目: StrokeSegment が互換性のあるフィールド名で JSON 化される
        // given (前提条件):
        let segment = red_segment();

        // when (操作):
        let json = serde_json::to_value(&segment).unwrap();

        // then (期待する結果):
        let object = json.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["color", "prevX", "prevY", "width", "x", "y"]);
        assert_eq!(json["prevX"], 0.0);
        assert_eq!(json["x"], 10.0);
    }

    #[test]
    fn test_segment_deserializes_integer_coordinates() {
        // テスト項目: JavaScript クライアントが送る整数値の座標を受け付ける
        // given (前提条件):
        let json = r##"{"prevX":0,"prevY":0,"x":10,"y":10,"color":"#ff0000","width":2}"##;

        // when (操作):
        let segment: StrokeSegment = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(segment, red_segment());
    }

    #[test]
    fn test_segment_missing_width_is_rejected() {
        // テスト項目: width が欠けた payload はデシリアライズに失敗する
        // given (前提条件):
        let json = r##"{"prevX":0,"prevY":0,"x":10,"y":10,"color":"#ff0000"}"##;

        // when (操作):
        let result = serde_json::from_str::<StrokeSegment>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_segment_string_width_is_rejected() {
        // テスト項目: width が数値でない payload はデシリアライズに失敗する
        // given (前提条件):
        let json = r##"{"prevX":0,"prevY":0,"x":10,"y":10,"color":"#ff0000","width":"wide"}"##;

        // when (操作):
        let result = serde_json::from_str::<StrokeSegment>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_width() {
        // テスト項目: width が 0 以下の場合は検証エラーになる
        // given (前提条件):
        let mut segment = red_segment();
        segment.width = 0.0;

        // when (操作):
        let result = segment.validate();

        // then (期待する結果):
        assert_eq!(result, Err(SegmentError::InvalidWidth(0.0)));
    }

    #[test]
    fn test_validate_rejects_non_finite_coordinate() {
        // テスト項目: 有限でない座標は検証エラーになる
        // given (前提条件):
        let mut segment = red_segment();
        segment.prev_y = f64::INFINITY;

        // when (操作):
        let result = segment.validate();

        // then (期待する結果):
        assert_eq!(result, Err(SegmentError::NonFiniteCoordinate("prevY")));
    }

    #[test]
    fn test_zero_length_segment_is_valid() {
        // テスト項目: 長さ 0 のセグメントは有効（描画しても何も起きない）
        // given (前提条件):
        let segment =
            StrokeSegment::between(Point::new(5.0, 5.0), Point::new(5.0, 5.0), "#000000", 1.0);

        // when (操作):
        let result = segment.validate();

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(segment.is_zero_length());
    }

    #[test]
    fn test_normalize_color_variants() {
        // テスト項目: 色文字列が小文字の #rrggbb に正規化される
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(normalize_color("#FF0000").unwrap(), "#ff0000");
        assert_eq!(normalize_color("#0aF").unwrap(), "#00aaff");
        assert_eq!(normalize_color(" #123456 ").unwrap(), "#123456");
        assert!(normalize_color("red").is_err());
        assert!(normalize_color("#12345").is_err());
        assert!(normalize_color("#gg0000").is_err());
        assert!(normalize_color("").is_err());
    }

    #[test]
    fn test_normalized_rewrites_color_only() {
        // テスト項目: normalized は色だけを書き換え、座標と幅は保持する
        // given (前提条件):
        let segment =
            StrokeSegment::between(Point::new(1.0, 2.0), Point::new(3.0, 4.0), "#ABC", 3.5);

        // when (操作):
        let normalized = segment.normalized().unwrap();

        // then (期待する結果):
        assert_eq!(normalized.color, "#aabbcc");
        assert_eq!(normalized.start(), Point::new(1.0, 2.0));
        assert_eq!(normalized.end(), Point::new(3.0, 4.0));
        assert_eq!(normalized.width, 3.5);
    }
}
