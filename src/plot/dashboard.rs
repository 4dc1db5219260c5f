//! All panels of one boosting run, plus click handling.
//!
//! Layout mirrors the teaching page: one data panel, then one residual
//! panel and one approximation panel per stage. A click on the data panel
//! is hit-tested into a [`Selection`], and [`Dashboard::render`] redraws
//! every panel for it.

use serde::Serialize;

use crate::data::{Dataset, DatasetError};
use crate::model::BoostedModel;

use super::frame::PlotFrame;
use super::panels::{approximation_panel, data_panel, data_viewport, residual_panel, Selection};
use super::scene::Scene;

/// Every scene of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardScenes {
    /// Data with the mean line.
    pub data: Scene,
    /// Residual panel of each stage.
    pub residuals: Vec<Scene>,
    /// Cumulative approximation after each stage.
    pub approximations: Vec<Scene>,
}

/// Renders a trained model against its data.
#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    frame: PlotFrame,
    xs: Vec<f64>,
    model: &'a BoostedModel,
}

impl<'a> Dashboard<'a> {
    /// Pair a dataset with the model trained on it.
    ///
    /// # Errors
    ///
    /// [`DatasetError::LengthMismatch`] when the model was trained on a
    /// different number of samples.
    pub fn new(dataset: &Dataset, model: &'a BoostedModel, frame: PlotFrame) -> Result<Self, DatasetError> {
        if dataset.len() != model.targets().len() {
            return Err(DatasetError::LengthMismatch {
                xs: dataset.len(),
                ys: model.targets().len(),
            });
        }
        Ok(Self { frame, xs: dataset.xs(), model })
    }

    /// The frame every panel is drawn in.
    pub fn frame(&self) -> PlotFrame {
        self.frame
    }

    /// Map a click on the data panel to a selection.
    ///
    /// A click that misses every point clears the selection.
    pub fn click(&self, px: f64, py: f64) -> Selection {
        let ys = self.model.targets();
        let Some(vp) = data_viewport(self.frame, &self.xs, ys) else {
            return Selection::NONE;
        };
        let points: Vec<(f64, f64)> = self.xs.iter().copied().zip(ys.iter().copied()).collect();
        Selection(vp.hit_test(&points, px, py))
    }

    /// Draw every panel for `selection`.
    ///
    /// A stage whose cumulative step cannot be formed is drawn without its
    /// overlay; the other panels are unaffected.
    pub fn render(&self, selection: Selection) -> DashboardScenes {
        let ys = self.model.targets();
        let base = self.model.base_score();
        let data = data_panel(self.frame, &self.xs, ys, base, selection);

        let mut residuals = Vec::with_capacity(self.model.n_stages());
        let mut approximations = Vec::with_capacity(self.model.n_stages());

        for (k, stage) in self.model.stages().iter().enumerate() {
            residuals.push(residual_panel(
                self.frame,
                &self.xs,
                stage.targets(),
                Some(stage.step()),
                selection,
            ));

            let cumulative = match self.model.cumulative_step(k + 1) {
                Ok(step) => Some(step),
                Err(err) => {
                    tracing::warn!(stage = k + 1, %err, "skipping approximation overlay");
                    None
                }
            };
            approximations.push(approximation_panel(self.frame, &self.xs, ys, base, cumulative.as_ref()));
        }

        DashboardScenes { data, residuals, approximations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{noisy_quadratic, QuadraticParams};
    use crate::model::BoostConfig;

    fn setup() -> (Dataset, BoostedModel) {
        let data = noisy_quadratic(&QuadraticParams::default()).unwrap();
        let model = BoostedModel::train(&data, BoostConfig::default()).unwrap();
        (data, model)
    }

    #[test]
    fn renders_one_panel_pair_per_stage() {
        let (data, model) = setup();
        let dash = Dashboard::new(&data, &model, PlotFrame::default()).unwrap();
        let scenes = dash.render(Selection::NONE);
        assert_eq!(scenes.residuals.len(), 4);
        assert_eq!(scenes.approximations.len(), 4);
    }

    #[test]
    fn click_on_point_selects_it() {
        let (data, model) = setup();
        let dash = Dashboard::new(&data, &model, PlotFrame::default()).unwrap();
        let scenes = dash.render(Selection::NONE);

        let (center, _) = scenes.data.circles().nth(3).unwrap();
        assert_eq!(dash.click(center.x + 2.0, center.y - 2.0), Selection::of(3));
        assert_eq!(dash.click(0.0, 0.0), Selection::NONE);
    }

    #[test]
    fn selection_propagates_to_residual_panels() {
        let (data, model) = setup();
        let dash = Dashboard::new(&data, &model, PlotFrame::default()).unwrap();
        let scenes = dash.render(Selection::of(0));
        for scene in &scenes.residuals {
            assert!(scene.texts().any(|t| t.starts_with("residual: ")));
        }
    }

    #[test]
    fn rejects_mismatched_model() {
        let (_, model) = setup();
        let other = Dataset::from_xy(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        assert!(Dashboard::new(&other, &model, PlotFrame::default()).is_err());
    }
}
