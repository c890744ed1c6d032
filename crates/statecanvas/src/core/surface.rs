//! Drawing surface abstraction
//!
//! The renderers only ever talk to a [`Surface`]: a 2D path/arc/text API in
//! the shape of an HTML canvas context. [`RecordingSurface`] keeps the issued
//! commands in memory, which is what tests and headless hosts inspect.

use super::Point;

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

/// Vertical text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Middle,
    Bottom,
    Top,
}

/// 2D drawing collaborator
///
/// Path construction follows canvas semantics: `arc` connects from the
/// current point with a straight segment, angles are radians measured
/// clockwise in y-down space, and `translate` affects subsequent commands
/// until the matching `restore`.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Push the current style and transform
    fn save(&mut self);
    /// Pop the style and transform pushed by the last `save`
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);

    /// Erase everything drawn so far
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn quadratic_curve_to(&mut self, control: Point, end: Point);
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn set_fill_color(&mut self, color: &str);
    fn set_stroke_color(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn fill_text(&mut self, text: &str, at: Point);
}

/// A single recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate(f64, f64),
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    QuadraticCurveTo { control: Point, end: Point },
    Arc { center: Point, radius: f64, start_angle: f64, end_angle: f64 },
    ClosePath,
    Fill,
    Stroke,
    FillColor(String),
    StrokeColor(String),
    LineWidth(f64),
    Font(String),
    TextAlign(TextAlign),
    TextBaseline(TextBaseline),
    FillText { text: String, at: Point },
}

/// Surface that records every call instead of rasterising
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Commands issued since the last `clear`
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the surface empty
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// All `(control, end)` pairs of quadratic curves
    pub fn curves(&self) -> Vec<(Point, Point)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::QuadraticCurveTo { control, end } => Some((*control, *end)),
                _ => None,
            })
            .collect()
    }

    /// All arcs as `(center, radius, start_angle, end_angle)`
    pub fn arcs(&self) -> Vec<(Point, f64, f64, f64)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                } => Some((*center, *radius, *start_angle, *end_angle)),
                _ => None,
            })
            .collect()
    }

    /// All texts with their anchor points
    pub fn texts(&self) -> Vec<(String, Point)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, at } => Some((text.clone(), *at)),
                _ => None,
            })
            .collect()
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn save(&mut self) {
        self.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.push(DrawCommand::Translate(dx, dy));
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.push(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.push(DrawCommand::LineTo(p));
    }

    fn quadratic_curve_to(&mut self, control: Point, end: Point) {
        self.push(DrawCommand::QuadraticCurveTo { control, end });
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        self.push(DrawCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn set_fill_color(&mut self, color: &str) {
        self.push(DrawCommand::FillColor(color.to_string()));
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.push(DrawCommand::StrokeColor(color.to_string()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(DrawCommand::LineWidth(width));
    }

    fn set_font(&mut self, font: &str) {
        self.push(DrawCommand::Font(font.to_string()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.push(DrawCommand::TextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.push(DrawCommand::TextBaseline(baseline));
    }

    fn fill_text(&mut self, text: &str, at: Point) {
        self.push(DrawCommand::FillText {
            text: text.to_string(),
            at,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface() {
        let surface = RecordingSurface::new(640.0, 480.0);
        assert_eq!(surface.width(), 640.0);
        assert_eq!(surface.height(), 480.0);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_records_in_order() {
        let mut surface = RecordingSurface::new(10.0, 10.0);
        surface.begin_path();
        surface.move_to(Point::new(1.0, 2.0));
        surface.quadratic_curve_to(Point::new(3.0, 4.0), Point::new(5.0, 6.0));
        surface.stroke();
        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::BeginPath,
                DrawCommand::MoveTo(Point::new(1.0, 2.0)),
                DrawCommand::QuadraticCurveTo {
                    control: Point::new(3.0, 4.0),
                    end: Point::new(5.0, 6.0),
                },
                DrawCommand::Stroke,
            ]
        );
        assert_eq!(surface.curves().len(), 1);
    }

    #[test]
    fn test_clear_drops_commands() {
        let mut surface = RecordingSurface::new(10.0, 10.0);
        surface.fill_text("q0", Point::new(0.0, 0.0));
        assert_eq!(surface.texts().len(), 1);
        surface.clear();
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_take_commands() {
        let mut surface = RecordingSurface::new(10.0, 10.0);
        surface.save();
        surface.restore();
        let taken = surface.take_commands();
        assert_eq!(taken, vec![DrawCommand::Save, DrawCommand::Restore]);
        assert!(surface.commands().is_empty());
    }
}
