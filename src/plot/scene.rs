//! Backend-independent drawing primitives.
//!
//! A [`Scene`] is an ordered list of primitives in pixel space. Renderers
//! draw them in order; [`Scene::to_svg`] is the built-in renderer.

use std::fmt;

use serde::Serialize;

use super::frame::Point;

/// Colors used by the panels.
pub mod palette {
    pub const AXIS: &str = "#888";
    pub const TEXT: &str = "#333";
    pub const MEAN: &str = "#FF4136";
    pub const POINT: &str = "#0074D9";
    pub const DIMMED: &str = "#bbb";
    pub const HIGHLIGHT: &str = "#FF851B";
    pub const RESIDUAL: &str = "#2ECC40";
    pub const STEP: &str = "#111";
    pub const APPROXIMATION: &str = "#B10DC9";
}

/// Line color, width and optional dash pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
    pub dash: Option<[f64; 2]>,
}

impl Stroke {
    pub fn solid(color: &'static str, width: f64) -> Self {
        Self { color, width, dash: None }
    }

    pub fn dashed(color: &'static str, width: f64, dash: [f64; 2]) -> Self {
        Self { color, width, dash: Some(dash) }
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    Start,
    Center,
    End,
}

/// Vertical text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Baseline {
    Top,
    Middle,
    Bottom,
}

/// Font and placement of a text primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub size: f64,
    pub bold: bool,
    pub color: &'static str,
    pub align: Align,
    pub baseline: Baseline,
    /// Clockwise rotation in degrees around the anchor.
    pub rotation: f64,
}

impl TextStyle {
    pub fn new(size: f64, color: &'static str, align: Align, baseline: Baseline) -> Self {
        Self { size, bold: false, color, align, baseline, rotation: 0.0 }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }
}

/// One drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Primitive {
    Line { from: Point, to: Point, stroke: Stroke },
    Polyline { points: Vec<Point>, stroke: Stroke },
    Circle { center: Point, radius: f64, fill: &'static str },
    Text { at: Point, content: String, style: TextStyle },
}

/// An ordered list of primitives on a canvas of fixed size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    /// Empty scene.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, primitives: Vec::new() }
    }

    pub fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.primitives.push(Primitive::Line { from, to, stroke });
    }

    pub fn polyline(&mut self, points: Vec<Point>, stroke: Stroke) {
        if points.len() >= 2 {
            self.primitives.push(Primitive::Polyline { points, stroke });
        }
    }

    pub fn circle(&mut self, center: Point, radius: f64, fill: &'static str) {
        self.primitives.push(Primitive::Circle { center, radius, fill });
    }

    pub fn text(&mut self, at: Point, content: impl Into<String>, style: TextStyle) {
        self.primitives.push(Primitive::Text { at, content: content.into(), style });
    }

    /// Text contents in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }

    /// Circles in drawing order as `(center, fill)`.
    pub fn circles(&self) -> impl Iterator<Item = (Point, &'static str)> + '_ {
        self.primitives.iter().filter_map(|p| match *p {
            Primitive::Circle { center, fill, .. } => Some((center, fill)),
            _ => None,
        })
    }

    /// Render as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        Svg(self).to_string()
    }
}

struct Svg<'a>(&'a Scene);

impl fmt::Display for Svg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scene = self.0;
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = scene.width,
            h = scene.height
        )?;
        for p in &scene.primitives {
            match p {
                Primitive::Line { from, to, stroke } => {
                    write!(
                        f,
                        r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}""#,
                        from.x, from.y, to.x, to.y
                    )?;
                    write_stroke(f, stroke)?;
                    writeln!(f, "/>")?;
                }
                Primitive::Polyline { points, stroke } => {
                    f.write_str(r#"  <polyline fill="none" points=""#)?;
                    for (i, pt) in points.iter().enumerate() {
                        if i > 0 {
                            f.write_str(" ")?;
                        }
                        write!(f, "{:.2},{:.2}", pt.x, pt.y)?;
                    }
                    f.write_str("\"")?;
                    write_stroke(f, stroke)?;
                    writeln!(f, "/>")?;
                }
                Primitive::Circle { center, radius, fill } => {
                    writeln!(
                        f,
                        r#"  <circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}"/>"#,
                        center.x, center.y, radius, fill
                    )?;
                }
                Primitive::Text { at, content, style } => {
                    let anchor = match style.align {
                        Align::Start => "start",
                        Align::Center => "middle",
                        Align::End => "end",
                    };
                    let baseline = match style.baseline {
                        Baseline::Top => "hanging",
                        Baseline::Middle => "middle",
                        Baseline::Bottom => "text-after-edge",
                    };
                    write!(
                        f,
                        r#"  <text x="{:.2}" y="{:.2}" font-family="Arial" font-size="{}" fill="{}" text-anchor="{}" dominant-baseline="{}""#,
                        at.x, at.y, style.size, style.color, anchor, baseline
                    )?;
                    if style.bold {
                        f.write_str(r#" font-weight="bold""#)?;
                    }
                    if style.rotation != 0.0 {
                        write!(f, r#" transform="rotate({} {:.2} {:.2})""#, style.rotation, at.x, at.y)?;
                    }
                    writeln!(f, ">{}</text>", Escaped(content))?;
                }
            }
        }
        writeln!(f, "</svg>")
    }
}

fn write_stroke(f: &mut fmt::Formatter<'_>, stroke: &Stroke) -> fmt::Result {
    write!(f, r#" stroke="{}" stroke-width="{}""#, stroke.color, stroke.width)?;
    if let Some([on, off]) = stroke.dash {
        write!(f, r#" stroke-dasharray="{on} {off}""#)?;
    }
    Ok(())
}

struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                _ => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}
