//! Panel builders for the data, residual and approximation plots.
//!
//! Each builder takes everything it draws as arguments, including the
//! current [`Selection`]; nothing is read from shared state.

use crate::repr::StepFunction;

use super::frame::{Bounds, PlotFrame, Point, Viewport};
use super::scene::{palette, Align, Baseline, Scene, Stroke, TextStyle};

const POINT_RADIUS: f64 = 6.0;
const TICK_LENGTH: f64 = 8.0;

/// The selected sample, by original index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection(pub Option<usize>);

impl Selection {
    /// Nothing selected.
    pub const NONE: Selection = Selection(None);

    /// Select sample `index`.
    pub fn of(index: usize) -> Self {
        Selection(Some(index))
    }

    /// Selected original index, if any.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.0
    }

    /// Whether sample `i` is the selected one.
    #[inline]
    pub fn is_selected(&self, i: usize) -> bool {
        self.0 == Some(i)
    }

    /// Whether sample `i` is drawn normally (nothing selected, or selected).
    #[inline]
    pub fn is_emphasized(&self, i: usize) -> bool {
        self.0.map_or(true, |s| s == i)
    }
}

/// Viewport over the original data, as used by the data and approximation
/// panels and for hit testing.
pub fn data_viewport(frame: PlotFrame, xs: &[f64], ys: &[f64]) -> Option<Viewport> {
    Some(Viewport::new(
        frame,
        Bounds::of(xs.iter().copied())?,
        Bounds::of(ys.iter().copied())?,
    ))
}

/// Scatter plot of the data with the dashed mean line.
///
/// The selected point gets a connector down (or up) to the mean line, its
/// residual and its coordinates.
pub fn data_panel(frame: PlotFrame, xs: &[f64], ys: &[f64], mean: f64, selection: Selection) -> Scene {
    let mut scene = Scene::new(frame.width, frame.height);
    let Some(vp) = data_viewport(frame, xs, ys) else {
        return scene;
    };
    draw_axes(&mut scene, &vp, "y");

    let mean_py = vp.py(mean);
    scene.line(
        Point::new(frame.padding, mean_py),
        Point::new(frame.right(), mean_py),
        Stroke::dashed(palette::MEAN, 1.5, [6.0, 6.0]),
    );
    scene.text(
        Point::new(frame.right() + 8.0, mean_py - 2.0),
        "mean(y)",
        TextStyle::new(14.0, palette::MEAN, Align::Start, Baseline::Bottom),
    );

    for (i, (&x, &y)) in xs.iter().zip(ys).enumerate() {
        let p = vp.to_pixel(x, y);
        let fill = if selection.is_emphasized(i) { palette::POINT } else { palette::DIMMED };
        scene.circle(p, POINT_RADIUS, fill);

        if selection.is_selected(i) {
            scene.line(p, Point::new(p.x, mean_py), Stroke::solid(palette::HIGHLIGHT, 2.0));
            scene.text(
                Point::new(p.x + 10.0, p.y + (mean_py - p.y) / 2.0),
                format!("residual: {:.2}", y - mean),
                TextStyle::new(16.0, palette::HIGHLIGHT, Align::Start, Baseline::Middle).bold(),
            );
            scene.text(
                Point::new(p.x, p.y - 12.0),
                format!("({x:.2}, {y:.2})"),
                TextStyle::new(14.0, palette::POINT, Align::Center, Baseline::Bottom),
            );
        }
    }

    scene
}

/// Residuals of one stage with that stage's fitted step overlaid.
///
/// The y range covers both the residuals and the step's predictions.
pub fn residual_panel(
    frame: PlotFrame,
    xs: &[f64],
    residuals: &[f64],
    step: Option<&StepFunction>,
    selection: Selection,
) -> Scene {
    let mut scene = Scene::new(frame.width, frame.height);
    let Some(x_bounds) = Bounds::of(xs.iter().copied()) else {
        return scene;
    };
    let Some(mut y_bounds) = Bounds::of(residuals.iter().copied()) else {
        return scene;
    };
    if let Some(step) = step {
        y_bounds = step.predictions().iter().fold(y_bounds, |b, &p| b.including(p));
    }
    let vp = Viewport::new(frame, x_bounds, y_bounds);
    draw_axes(&mut scene, &vp, "residual");

    if let Some(step) = step {
        scene.polyline(step_path(&vp, step), Stroke::solid(palette::STEP, 3.0));
    }

    for (i, (&x, &r)) in xs.iter().zip(residuals).enumerate() {
        let p = vp.to_pixel(x, r);
        let fill = if selection.is_emphasized(i) { palette::RESIDUAL } else { palette::DIMMED };
        scene.circle(p, POINT_RADIUS, fill);

        if selection.is_selected(i) {
            scene.line(p, Point::new(frame.padding, p.y), Stroke::solid(palette::HIGHLIGHT, 2.0));
            scene.text(
                Point::new(frame.padding + 10.0, p.y - 8.0),
                format!("residual: {r:.2}"),
                TextStyle::new(16.0, palette::HIGHLIGHT, Align::Start, Baseline::Bottom).bold(),
            );
            scene.text(
                Point::new(p.x, p.y + 12.0),
                format!("({x:.2}, {r:.2})"),
                TextStyle::new(14.0, palette::RESIDUAL, Align::Center, Baseline::Top),
            );
        }
    }

    scene
}

/// Original data with `base + cumulative step` overlaid.
pub fn approximation_panel(
    frame: PlotFrame,
    xs: &[f64],
    ys: &[f64],
    base: f64,
    cumulative: Option<&StepFunction>,
) -> Scene {
    let mut scene = Scene::new(frame.width, frame.height);
    let Some(vp) = data_viewport(frame, xs, ys) else {
        return scene;
    };
    draw_axes(&mut scene, &vp, "y");

    for (&x, &y) in xs.iter().zip(ys) {
        scene.circle(vp.to_pixel(x, y), POINT_RADIUS, palette::POINT);
    }

    if let Some(step) = cumulative {
        scene.polyline(step_path(&vp, &step.offset(base)), Stroke::solid(palette::APPROXIMATION, 3.0));
    }

    scene
}

/// Vertices of a step function's stroke.
///
/// Each sorted sample contributes a vertex at `(x_i, p_i)` followed by a
/// horizontal run to `x_{i+1}`, so value changes appear as vertical risers.
pub fn step_path(vp: &Viewport, step: &StepFunction) -> Vec<Point> {
    let xs = step.xs();
    let preds = step.predictions();
    let mut points = Vec::with_capacity(2 * xs.len());
    for (i, (&x, &p)) in xs.iter().zip(preds).enumerate() {
        let py = vp.py(p);
        points.push(Point::new(vp.px(x), py));
        if let Some(&next) = xs.get(i + 1) {
            points.push(Point::new(vp.px(next), py));
        }
    }
    points
}

fn draw_axes(scene: &mut Scene, vp: &Viewport, y_label: &str) {
    let frame = *vp.frame();
    let axis = Stroke::solid(palette::AXIS, 1.5);
    let (left, bottom) = (frame.padding, frame.bottom());

    scene.line(Point::new(left, bottom), Point::new(frame.right(), bottom), axis);
    scene.line(Point::new(left, frame.padding), Point::new(left, bottom), axis);

    for tick in vp.x_ticks() {
        scene.line(Point::new(tick.pixel, bottom), Point::new(tick.pixel, bottom + TICK_LENGTH), axis);
        scene.text(
            Point::new(tick.pixel, bottom + 10.0),
            tick.label,
            TextStyle::new(14.0, palette::TEXT, Align::Center, Baseline::Top),
        );
    }
    scene.text(
        Point::new(left + frame.plot_width() / 2.0, bottom + 36.0),
        "x",
        TextStyle::new(16.0, palette::TEXT, Align::Center, Baseline::Top),
    );

    for tick in vp.y_ticks() {
        scene.line(Point::new(left - TICK_LENGTH, tick.pixel), Point::new(left, tick.pixel), axis);
        scene.text(
            Point::new(left - 12.0, tick.pixel),
            tick.label,
            TextStyle::new(14.0, palette::TEXT, Align::End, Baseline::Middle),
        );
    }
    scene.text(
        Point::new(left - 38.0, frame.padding + frame.plot_height() / 2.0),
        y_label,
        TextStyle::new(16.0, palette::TEXT, Align::Center, Baseline::Bottom).rotated(-90.0),
    );
}
