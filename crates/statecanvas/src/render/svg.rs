//! SVG drawing surface
//!
//! Implements [`Surface`] by emitting SVG markup. Canvas arcs become SVG
//! elliptical-arc segments; translation is baked into emitted coordinates.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt::Write as _;

use crate::core::{Point, Surface, TextAlign, TextBaseline};

#[derive(Debug, Clone)]
struct DrawState {
    fill: String,
    stroke: String,
    line_width: f64,
    font_size: f64,
    font_family: String,
    align: TextAlign,
    baseline: TextBaseline,
    tx: f64,
    ty: f64,
}

impl Default for DrawState {
    fn default() -> Self {
        // Canvas context defaults
        Self {
            fill: "#000000".to_string(),
            stroke: "#000000".to_string(),
            line_width: 1.0,
            font_size: 10.0,
            font_family: "sans-serif".to_string(),
            align: TextAlign::Start,
            baseline: TextBaseline::Alphabetic,
            tx: 0.0,
            ty: 0.0,
        }
    }
}

/// Surface that accumulates an SVG document
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    state: DrawState,
    stack: Vec<DrawState>,
    path: String,
    current: Option<Point>,
    subpath_start: Option<Point>,
    body: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            state: DrawState::default(),
            stack: Vec::new(),
            path: String::new(),
            current: None,
            subpath_start: None,
            body: String::new(),
        }
    }

    /// Complete SVG document for everything drawn so far
    pub fn to_svg(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }

    /// Pixel dimensions, rounded up
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width.ceil().max(1.0) as u32,
            self.height.ceil().max(1.0) as u32,
        )
    }

    fn map(&self, p: Point) -> Point {
        p.offset(self.state.tx, self.state.ty)
    }

    fn push_move(&mut self, p: Point) {
        let _ = write!(self.path, "M{} {} ", p.x, p.y);
        self.current = Some(p);
        self.subpath_start = Some(p);
    }

    /// Continue the path to `p`, opening a subpath there if none is open
    fn push_line_or_move(&mut self, p: Point) {
        if self.current.is_some() {
            let _ = write!(self.path, "L{} {} ", p.x, p.y);
            self.current = Some(p);
        } else {
            self.push_move(p);
        }
    }
}

impl Surface for SvgSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.tx += dx;
        self.state.ty += dy;
    }

    fn clear(&mut self) {
        self.body.clear();
        self.path.clear();
        self.current = None;
        self.subpath_start = None;
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let origin = self.map(Point::new(x, y));
        let _ = writeln!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            origin.x,
            origin.y,
            width,
            height,
            escape(&self.state.fill)
        );
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.current = None;
        self.subpath_start = None;
    }

    fn move_to(&mut self, p: Point) {
        let p = self.map(p);
        self.push_move(p);
    }

    fn line_to(&mut self, p: Point) {
        let p = self.map(p);
        self.push_line_or_move(p);
    }

    fn quadratic_curve_to(&mut self, control: Point, end: Point) {
        let control = self.map(control);
        let end = self.map(end);
        if self.current.is_none() {
            self.push_move(control);
        }
        let _ = write!(
            self.path,
            "Q{} {} {} {} ",
            control.x, control.y, end.x, end.y
        );
        self.current = Some(end);
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        let center = self.map(center);
        let sweep = match end_angle - start_angle {
            s if s >= TAU => TAU,
            s if s < 0.0 => s.rem_euclid(TAU),
            s => s,
        };
        let at = |angle: f64| center.offset(radius * angle.cos(), radius * angle.sin());

        self.push_line_or_move(at(start_angle));

        // Quarter-turn segments keep every SVG arc unambiguous
        let segments = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
        for i in 1..=segments {
            let p = at(start_angle + sweep * i as f64 / segments as f64);
            let _ = write!(self.path, "A{r} {r} 0 0 1 {} {} ", p.x, p.y, r = radius);
            self.current = Some(p);
        }
    }

    fn close_path(&mut self) {
        if self.current.is_some() {
            self.path.push_str("Z ");
            self.current = self.subpath_start;
        }
    }

    fn fill(&mut self) {
        if self.path.is_empty() {
            return;
        }
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" fill=\"{}\" stroke=\"none\"/>",
            self.path.trim_end(),
            escape(&self.state.fill)
        );
    }

    fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
            self.path.trim_end(),
            escape(&self.state.stroke),
            self.state.line_width
        );
    }

    fn set_fill_color(&mut self, color: &str) {
        self.state.fill = color.to_string();
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.state.stroke = color.to_string();
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_font(&mut self, font: &str) {
        let (size, family) = parse_font(font);
        if let Some(size) = size {
            self.state.font_size = size;
        }
        if !family.is_empty() {
            self.state.font_family = family;
        }
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.baseline = baseline;
    }

    fn fill_text(&mut self, text: &str, at: Point) {
        let at = self.map(at);
        let anchor = match self.state.align {
            TextAlign::Start => "start",
            TextAlign::Center => "middle",
            TextAlign::End => "end",
        };
        let baseline = match self.state.baseline {
            TextBaseline::Alphabetic => "auto",
            TextBaseline::Middle => "central",
            TextBaseline::Bottom => "text-after-edge",
            TextBaseline::Top => "text-before-edge",
        };
        let _ = writeln!(
            self.body,
            "<text x=\"{}\" y=\"{}\" font-family=\"{}, sans-serif\" font-size=\"{}\" text-anchor=\"{}\" dominant-baseline=\"{}\" fill=\"{}\">{}</text>",
            at.x,
            at.y,
            escape(&self.state.font_family),
            self.state.font_size,
            anchor,
            baseline,
            escape(&self.state.fill),
            escape(text)
        );
    }
}

/// Split a CSS font shorthand like `16px Inter` into size and family
fn parse_font(font: &str) -> (Option<f64>, String) {
    let mut size = None;
    let mut family = Vec::new();
    for token in font.split_whitespace() {
        match token.strip_suffix("px").and_then(|n| n.parse::<f64>().ok()) {
            Some(px) if size.is_none() => size = Some(px),
            _ => family.push(token),
        }
    }
    (size, family.join(" "))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
