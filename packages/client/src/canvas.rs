//! Drawing surface abstraction and the canvas command log.
//!
//! Every visible change goes through a [`DrawCommand`]. The [`Canvas`] keeps
//! the commands drawn since the last clear and forwards each one to its
//! [`Surface`], so the same log can always be re-rendered onto a fresh
//! surface with [`render`].

use rakugaki_shared::segment::StrokeSegment;

pub use rakugaki_shared::segment::Point;

/// Logical canvas width in pixels.
pub const CANVAS_WIDTH: f64 = 800.0;
/// Logical canvas height in pixels.
pub const CANVAS_HEIGHT: f64 = 600.0;

/// Axis-aligned rectangle in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole logical canvas.
    pub const fn canvas() -> Self {
        Self::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn covers(&self, other: &Rect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.x + self.width >= other.x + other.width
            && self.y + self.height >= other.y + other.height
    }
}

/// A 2D render target.
pub trait Surface {
    /// Stroke a straight line with the given CSS hex color and width.
    fn draw_line(&mut self, from: Point, to: Point, color: &str, width: f64, round_cap: bool);

    /// Erase everything inside `bounds`.
    fn clear_rect(&mut self, bounds: Rect);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Segment(StrokeSegment),
    Clear,
}

/// Render a command sequence onto `surface` in order.
pub fn render<S: Surface + ?Sized>(commands: &[DrawCommand], surface: &mut S) {
    for command in commands {
        apply(command, surface);
    }
}

fn apply<S: Surface + ?Sized>(command: &DrawCommand, surface: &mut S) {
    match command {
        // zero-length segments are no-ops
        DrawCommand::Segment(segment) if segment.is_zero_length() => {}
        DrawCommand::Segment(segment) => surface.draw_line(
            segment.start(),
            segment.end(),
            &segment.color,
            segment.width,
            true,
        ),
        DrawCommand::Clear => surface.clear_rect(Rect::canvas()),
    }
}

/// A surface plus the segments currently visible on it.
#[derive(Debug)]
pub struct Canvas<S> {
    surface: S,
    commands: Vec<DrawCommand>,
}

impl<S: Surface> Canvas<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            commands: Vec::new(),
        }
    }

    /// Draw one segment and record it.
    pub fn draw(&mut self, segment: StrokeSegment) {
        let command = DrawCommand::Segment(segment);
        apply(&command, &mut self.surface);
        self.commands.push(command);
    }

    /// Erase the whole canvas and forget the recorded segments.
    pub fn clear(&mut self) {
        apply(&DrawCommand::Clear, &mut self.surface);
        self.commands.clear();
    }

    /// Commands drawn since the last clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn segments(&self) -> impl Iterator<Item = &StrokeSegment> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Segment(segment) => Some(segment),
            DrawCommand::Clear => None,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

/// One stroked line as seen by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    pub color: String,
    pub width: f64,
    pub round_cap: bool,
}

/// In-memory surface that remembers the lines currently visible.
///
/// Two recording surfaces with equal [`lines`](RecordingSurface::lines) would
/// show the same pixels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    lines: Vec<Line>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}

impl Surface for RecordingSurface {
    fn draw_line(&mut self, from: Point, to: Point, color: &str, width: f64, round_cap: bool) {
        self.lines.push(Line {
            from,
            to,
            color: color.to_string(),
            width,
            round_cap,
        });
    }

    fn clear_rect(&mut self, bounds: Rect) {
        if bounds.covers(&Rect::canvas()) {
            self.lines.clear();
        } else {
            self.lines
                .retain(|line| !(bounds.contains(line.from) && bounds.contains(line.to)));
        }
    }
}
