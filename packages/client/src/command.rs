//! Line commands read from stdin by the headless client.
//!
//! ```text
//! stroke x1,y1 x2,y2 [x3,y3 ...]   draw a polyline as one stroke
//! line x1,y1 x2,y2                 draw a single segment
//! color #rrggbb                    change the brush color
//! width N                          change the brush width
//! clear                            clear the board for everyone
//! show                             print the visible segments
//! help                             list commands
//! ```

use thiserror::Error;

use rakugaki_shared::segment::{Point, SegmentError};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Stroke(Vec<Point>),
    Color(String),
    Width(f64),
    Clear,
    Show,
    Help,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error("'{0}' is not a point (expected x,y)")]
    InvalidPoint(String),

    #[error("'{command}' needs {expected} points, got {got}")]
    WrongPointCount {
        command: &'static str,
        expected: &'static str,
        got: usize,
    },

    #[error("'{0}' is missing its argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error(transparent)]
    InvalidBrush(#[from] SegmentError),
}

/// Parse one non-empty input line.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Err(CommandError::Unknown(String::new()));
    };
    let args: Vec<&str> = words.collect();

    match name.to_ascii_lowercase().as_str() {
        "stroke" => {
            let points = parse_points(&args)?;
            if points.len() < 2 {
                return Err(CommandError::WrongPointCount {
                    command: "stroke",
                    expected: "at least 2",
                    got: points.len(),
                });
            }
            Ok(Command::Stroke(points))
        }
        "line" => {
            let points = parse_points(&args)?;
            if points.len() != 2 {
                return Err(CommandError::WrongPointCount {
                    command: "line",
                    expected: "exactly 2",
                    got: points.len(),
                });
            }
            Ok(Command::Stroke(points))
        }
        "color" => {
            let color = args.first().ok_or(CommandError::MissingArgument("color"))?;
            Ok(Command::Color(color.to_string()))
        }
        "width" => {
            let raw = args.first().ok_or(CommandError::MissingArgument("width"))?;
            let width = raw
                .parse::<f64>()
                .map_err(|_| CommandError::InvalidNumber(raw.to_string()))?;
            Ok(Command::Width(width))
        }
        "clear" => Ok(Command::Clear),
        "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_points(args: &[&str]) -> Result<Vec<Point>, CommandError> {
    args.iter().map(|arg| parse_point(arg)).collect()
}

fn parse_point(raw: &str) -> Result<Point, CommandError> {
    let invalid = || CommandError::InvalidPoint(raw.to_string());
    let (x, y) = raw.split_once(',').ok_or_else(invalid)?;
    let x: f64 = x.trim().parse().map_err(|_| invalid())?;
    let y: f64 = y.trim().parse().map_err(|_| invalid())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(invalid());
    }
    Ok(Point::new(x, y))
}
