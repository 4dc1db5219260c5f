//! Data-to-pixel mapping, axis ticks and hit testing.
//!
//! Pixel coordinates follow canvas conventions: origin at the top-left,
//! y growing downward.

use serde::Serialize;

/// Number of tick intervals per axis (six ticks including both ends).
pub const TICK_INTERVALS: usize = 5;

/// Radius in pixels within which a click selects a point.
pub const HIT_RADIUS: f64 = 10.0;

/// A position in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Canvas size and inner padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotFrame {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for PlotFrame {
    fn default() -> Self {
        Self { width: 600.0, height: 400.0, padding: 60.0 }
    }
}

impl PlotFrame {
    /// Width of the plotting area inside the padding.
    #[inline]
    pub fn plot_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    /// Height of the plotting area inside the padding.
    #[inline]
    pub fn plot_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }

    /// Pixel y of the x axis.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.height - self.padding
    }

    /// Pixel x of the right edge of the plotting area.
    #[inline]
    pub fn right(&self) -> f64 {
        self.width - self.padding
    }
}

/// Closed value range of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Smallest range covering `values`, or `None` when there are none.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| {
            Some(match acc {
                None => Bounds { min: v, max: v },
                Some(b) => b.including(v),
            })
        })
    }

    /// The range extended to cover `v`.
    pub fn including(self, v: f64) -> Self {
        Bounds { min: self.min.min(v), max: self.max.max(v) }
    }

    /// Width of the range.
    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// A range with non-zero width: a single value is widened by 0.5 on
    /// each side.
    pub fn non_degenerate(self) -> Self {
        if self.span() > 0.0 {
            self
        } else {
            Bounds { min: self.min - 0.5, max: self.max + 0.5 }
        }
    }

    /// Position of `v` within the range, 0 at `min` and 1 at `max`.
    #[inline]
    pub fn normalize(&self, v: f64) -> f64 {
        (v - self.min) / self.span()
    }
}

/// An axis tick: data value, pixel position along the axis, and label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub value: f64,
    pub pixel: f64,
    pub label: String,
}

/// Mapping from data space to the pixels of a [`PlotFrame`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    frame: PlotFrame,
    x: Bounds,
    y: Bounds,
}

impl Viewport {
    /// Create a viewport; degenerate bounds are widened.
    pub fn new(frame: PlotFrame, x: Bounds, y: Bounds) -> Self {
        Self { frame, x: x.non_degenerate(), y: y.non_degenerate() }
    }

    /// The underlying frame.
    #[inline]
    pub fn frame(&self) -> &PlotFrame {
        &self.frame
    }

    /// X range in data units.
    #[inline]
    pub fn x_bounds(&self) -> Bounds {
        self.x
    }

    /// Y range in data units.
    #[inline]
    pub fn y_bounds(&self) -> Bounds {
        self.y
    }

    /// Pixel x of data x.
    #[inline]
    pub fn px(&self, x: f64) -> f64 {
        self.frame.padding + self.x.normalize(x) * self.frame.plot_width()
    }

    /// Pixel y of data y.
    #[inline]
    pub fn py(&self, y: f64) -> f64 {
        self.frame.bottom() - self.y.normalize(y) * self.frame.plot_height()
    }

    /// Pixel position of a data point.
    #[inline]
    pub fn to_pixel(&self, x: f64, y: f64) -> Point {
        Point::new(self.px(x), self.py(y))
    }

    /// Evenly spaced ticks along the x axis.
    pub fn x_ticks(&self) -> Vec<Tick> {
        ticks(self.x, |v| self.px(v))
    }

    /// Evenly spaced ticks along the y axis.
    pub fn y_ticks(&self) -> Vec<Tick> {
        ticks(self.y, |v| self.py(v))
    }

    /// Index of the first point within [`HIT_RADIUS`] of `(px, py)`.
    ///
    /// `points` are in data space; the scan stops at the first hit, so
    /// overlapping points resolve to the lowest index.
    pub fn hit_test(&self, points: &[(f64, f64)], px: f64, py: f64) -> Option<usize> {
        let click = Point::new(px, py);
        points
            .iter()
            .position(|&(x, y)| self.to_pixel(x, y).distance(click) < HIT_RADIUS)
    }
}

fn ticks(bounds: Bounds, to_pixel: impl Fn(f64) -> f64) -> Vec<Tick> {
    (0..=TICK_INTERVALS)
        .map(|i| {
            let value = bounds.min + (i as f64 / TICK_INTERVALS as f64) * bounds.span();
            Tick { value, pixel: to_pixel(value), label: format!("{value:.2}") }
        })
        .collect()
}
