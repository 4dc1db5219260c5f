//! Headless plotting for the boosting walkthrough.
//!
//! Everything here produces geometry, not pixels: panels are [`Scene`]s of
//! lines, polylines, circles and text in canvas coordinates, ready for any
//! 2D backend. [`Scene::to_svg`] renders one without extra dependencies.
//!
//! - [`frame`]: data-to-pixel mapping, ticks, hit testing
//! - [`panels`]: data, residual and approximation panels
//! - [`Dashboard`]: all panels of a trained model and click handling

mod dashboard;
pub mod frame;
pub mod panels;
mod scene;

pub use dashboard::{Dashboard, DashboardScenes};
pub use frame::{Bounds, PlotFrame, Point, Tick, Viewport, HIT_RADIUS};
pub use panels::{approximation_panel, data_panel, residual_panel, step_path, Selection};
pub use scene::{palette, Align, Baseline, Primitive, Scene, Stroke, TextStyle};
