//! Radial bar chart controller.

use chart_config::{ConfigStore, ConfigValue, PathMutation, PolarConfig, PolarConfigPatch};
use tracing::debug;

use crate::angle::{AngleSlice, allocate};
use crate::error::ChartError;
use crate::layout::{AngleAxisLayout, RadiusAxisLayout};
use crate::scale::{BandScale, PiecewiseLinearScale};
use crate::surface::{BAR_DURATION_MS, BarTransition, ClickEvent, PointerEvent, RenderSurface};
use crate::tween::{BarBand, bar_tween, label_position_tween, label_text_tween};

type ClickHandler = Box<dyn FnMut(&ClickEvent)>;

/// Work triggered by a dispatched config path.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderStage {
    /// Re-tween bars from their previous values.
    Bars,
    /// New angular partition: redraw both axes and sweep bars in again.
    Layout,
    /// Tick geometry only.
    AngleAxis,
}

impl RenderStage {
    /// The polar dispatch table. Paths without a stage are accepted by the
    /// store but render nothing.
    pub fn for_path(path: &str) -> Option<Self> {
        match path {
            "data.dataset" => Some(RenderStage::Bars),
            "angleAxis.startAngle" | "angleAxis.endAngle" | "angleAxis.scaleWeight" => {
                Some(RenderStage::Layout)
            }
            "angleAxis.tick.distance" => Some(RenderStage::AngleAxis),
            _ => None,
        }
    }
}

/// Scales and partition derived from one config state.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarLayout {
    pub radius: f64,
    pub slices: Vec<AngleSlice>,
    pub values: PiecewiseLinearScale,
    pub bands: BandScale,
}

impl PolarLayout {
    pub fn build(config: &PolarConfig) -> Self {
        let radius = config.dimensions.outer_radius();
        let axis = &config.angle_axis;
        let slices = allocate(&axis.scale_weight, axis.start_angle, axis.end_angle);
        let values = PiecewiseLinearScale::for_slices(
            axis.min_value,
            axis.max_value,
            axis.start_angle,
            &slices,
        );
        let bands = BandScale::for_radius_axis(&config.radius_axis, radius);
        Self {
            radius,
            slices,
            values,
            bands,
        }
    }

    pub fn band_for(&self, index: usize) -> Option<BarBand> {
        let start = self.bands.band_at(index)?;
        Some(BarBand::new(self.radius, start, self.bands.bandwidth()))
    }
}

pub struct PolarChart<S: RenderSurface> {
    surface: S,
    store: ConfigStore<PolarConfig>,
    layout: PolarLayout,
    label_click: Option<ClickHandler>,
    bar_click: Option<ClickHandler>,
}

impl<S: RenderSurface> PolarChart<S> {
    /// Merges `overrides` onto the defaults, validates, and renders the
    /// initial state with bars sweeping in from the start angle.
    pub fn new(surface: S, overrides: PolarConfigPatch) -> Result<Self, ChartError> {
        let store = ConfigStore::with_overrides(PolarConfig::default(), overrides)?;
        let layout = PolarLayout::build(store.config());
        let mut chart = Self {
            surface,
            store,
            layout,
            label_click: None,
            bar_click: None,
        };
        let (width, height) = {
            let dims = &chart.store.config().dimensions;
            (dims.width, dims.height)
        };
        chart.surface.set_size(width, height);
        chart.draw_axes();
        chart.animate_bars(None);
        Ok(chart)
    }

    pub fn config(&self) -> &PolarConfig {
        self.store.config()
    }

    pub fn layout(&self) -> &PolarLayout {
        &self.layout
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Observes every accepted config write, recognized or not.
    pub fn on_change(&mut self, listener: impl FnMut(&PathMutation) + 'static) {
        self.store.on_change(listener);
    }

    pub fn on_label_click(&mut self, handler: impl FnMut(&ClickEvent) + 'static) {
        self.label_click = Some(Box::new(handler));
    }

    pub fn on_bar_click(&mut self, handler: impl FnMut(&ClickEvent) + 'static) {
        self.bar_click = Some(Box::new(handler));
    }

    /// Writes one config leaf and re-renders the affected stage.
    pub fn update(&mut self, path: &str, value: impl Into<ConfigValue>) -> Result<(), ChartError> {
        self.store.apply(path, value)?;
        self.flush();
        Ok(())
    }

    pub fn update_dataset(&mut self, dataset: Vec<f64>) -> Result<(), ChartError> {
        self.update("data.dataset", dataset)
    }

    /// Merges a partial config. Each changed leaf is dispatched on its own.
    /// Returns the number of changed leaves.
    pub fn reconfigure(&mut self, patch: PolarConfigPatch) -> Result<usize, ChartError> {
        let changed = self.store.apply_patch(patch)?;
        self.flush();
        Ok(changed)
    }

    fn flush(&mut self) {
        while let Some(mutation) = self.store.next_mutation() {
            self.dispatch(&mutation);
        }
        self.store.settle();
    }

    fn dispatch(&mut self, mutation: &PathMutation) {
        // Scales follow every accepted write, drawn or not.
        self.layout = PolarLayout::build(self.store.config());
        let Some(stage) = RenderStage::for_path(mutation.path.as_str()) else {
            debug!(path = %mutation.path, "no render stage for config path");
            return;
        };
        debug!(path = %mutation.path, ?stage, "dispatching config mutation");

        match stage {
            RenderStage::Bars => {
                let previous = self.store.previous().map(|s| s.dataset.clone());
                self.animate_bars(previous.as_deref());
            }
            RenderStage::Layout => {
                self.draw_axes();
                self.animate_bars(None);
            }
            RenderStage::AngleAxis => {
                let axis = self.angle_axis_layout();
                self.surface.draw_angle_axis(&axis);
            }
        }
    }

    pub fn radius_axis_layout(&self) -> RadiusAxisLayout {
        RadiusAxisLayout::new(
            &self.layout.bands,
            self.layout.radius,
            self.store.config().angle_axis.start_angle,
        )
    }

    pub fn angle_axis_layout(&self) -> AngleAxisLayout {
        AngleAxisLayout::new(
            &self.store.config().angle_axis,
            self.layout.slices.clone(),
            &self.layout.values,
            self.layout.radius,
        )
    }

    fn draw_axes(&mut self) {
        let radius_axis = self.radius_axis_layout();
        let angle_axis = self.angle_axis_layout();
        self.surface.draw_radius_axis(&radius_axis);
        self.surface.draw_angle_axis(&angle_axis);
    }

    /// Bar tweens from `previous` values (by index) to the current dataset.
    /// Bars without a previous value sweep in from the start angle.
    pub fn bar_transitions(&self, previous: Option<&[f64]>) -> Vec<BarTransition> {
        let config = self.store.config();
        let start_angle = config.angle_axis.start_angle;
        let scale = &self.layout.values;
        config
            .data
            .dataset
            .iter()
            .enumerate()
            .filter_map(|(index, &value)| {
                let category = config.radius_axis.categories.get(index)?;
                let band = self.layout.band_for(index)?;
                let old = previous.and_then(|p| p.get(index).copied());
                Some(BarTransition {
                    index,
                    category: category.clone(),
                    value,
                    arc: bar_tween(old, value, scale, start_angle, band),
                    label_position: label_position_tween(old, value, scale, start_angle, band),
                    label_text: label_text_tween(old, value, scale),
                })
            })
            .collect()
    }

    fn animate_bars(&mut self, previous: Option<&[f64]>) {
        let bars = self.bar_transitions(previous);
        self.surface.animate_bars(bars, BAR_DURATION_MS);
    }

    fn click_event(&self, index: usize, pointer: PointerEvent) -> Option<ClickEvent> {
        let config = self.store.config();
        Some(ClickEvent {
            index,
            category: config.radius_axis.categories.get(index)?.clone(),
            value: *config.data.dataset.get(index)?,
            pointer,
        })
    }

    /// Called by the surface when a category label is clicked. Returns whether
    /// a handler received the event.
    pub fn activate_label(&mut self, index: usize, pointer: PointerEvent) -> bool {
        let Some(event) = self.click_event(index, pointer) else {
            return false;
        };
        match self.label_click.as_mut() {
            Some(handler) => {
                handler(&event);
                true
            }
            None => false,
        }
    }

    pub fn activate_bar(&mut self, index: usize, pointer: PointerEvent) -> bool {
        let Some(event) = self.click_event(index, pointer) else {
            return false;
        };
        match self.bar_click.as_mut() {
            Some(handler) => {
                handler(&event);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::f64::consts::PI;
    use std::rc::Rc;

    use chart_config::{ConfigError, PolarConfigPatch};
    use foundation::math::Vec2;
    use pretty_assertions::assert_eq;

    use super::{PolarChart, RenderStage};
    use crate::error::ChartError;
    use crate::recording::RecordingSurface;
    use crate::surface::{ClickEvent, PointerEvent};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn chart() -> PolarChart<RecordingSurface> {
        let patch = PolarConfigPatch::from_json_str(
            r#"{
                "angleAxis": {"startAngle": 0, "endAngle": 3.141592653589793, "scaleWeight": [1, 1, 1]},
                "radiusAxis": {"categories": ["A", "B", "C"]},
                "data": {"dataset": [30, 50, 70]}
            }"#,
        )
        .expect("patch");
        PolarChart::new(RecordingSurface::new(60.0), patch).expect("chart")
    }

    #[test]
    fn dispatch_table_covers_recognized_paths() {
        assert_eq!(RenderStage::for_path("data.dataset"), Some(RenderStage::Bars));
        assert_eq!(
            RenderStage::for_path("angleAxis.scaleWeight"),
            Some(RenderStage::Layout)
        );
        assert_eq!(
            RenderStage::for_path("angleAxis.tick.distance"),
            Some(RenderStage::AngleAxis)
        );
        assert_eq!(RenderStage::for_path("angleAxis.tick.length"), None);
        assert_eq!(RenderStage::for_path("radiusAxis.padding"), None);
    }

    #[test]
    fn initial_render_draws_axes_and_bars() {
        let mut chart = chart();
        chart.surface_mut().run_until_idle(600);
        let scene = chart.surface().scene();
        assert_eq!(scene.size, Some((500.0, 500.0)));
        assert!(scene.radius_axis.is_some());
        assert_eq!(scene.angle_axis.as_ref().map(|a| a.ticks.len()), Some(3));
        assert_eq!(scene.bars.len(), 3);
        assert_close(scene.bars[0].arc.end_angle, 0.2 * PI, 1e-9);
        assert_eq!(scene.bars[2].label_text, "70");
    }

    #[test]
    fn dataset_update_tweens_from_previous_values() {
        let mut chart = chart();
        chart.surface_mut().run_until_idle(600);
        chart.update_dataset(vec![60.0, 50.0, 10.0]).expect("update");

        chart.surface_mut().tick();
        {
            let scene = chart.surface().scene();
            assert_eq!(scene.bar_transitions, 2);
            assert_close(scene.bars[0].arc.end_angle, 0.2 * PI, 1e-9);
            assert_eq!(scene.bars[0].label_text, "30");
        }
        chart.surface_mut().run_until_idle(600);
        let scene = chart.surface().scene();
        assert_close(scene.bars[0].arc.end_angle, 0.4 * PI, 1e-9);
        assert_eq!(scene.bars[0].label_text, "60");
    }

    #[test]
    fn unrecognized_path_notifies_without_rendering() {
        let mut chart = chart();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        chart.on_change(move |m| sink.borrow_mut().push(m.path.to_string()));

        chart.update("angleAxis.tick.length", 8.0).expect("update");
        assert_eq!(*seen.borrow(), vec!["angleAxis.tick.length".to_string()]);
        assert_eq!(chart.surface().scene().bar_transitions, 1);
        assert_eq!(chart.config().angle_axis.tick.length, 8.0);
    }

    #[test]
    fn value_range_change_rebuilds_scale() {
        let mut chart = chart();
        chart.update("angleAxis.maxValue", 200.0).expect("update");
        assert_eq!(chart.layout().values.domain(), &[0.0, 100.0, 200.0]);
        let ticks: Vec<f64> = chart
            .angle_axis_layout()
            .ticks
            .iter()
            .map(|t| t.value)
            .collect();
        assert_eq!(ticks, vec![0.0, 100.0, 200.0]);
        assert_eq!(chart.surface().scene().bar_transitions, 1);
    }

    #[test]
    fn size_change_rebuilds_bands() {
        let mut chart = chart();
        chart.update("dimensions.width", 200.0).expect("update");
        assert_eq!(chart.layout().radius, 100.0);
        let before = chart.layout().bands.bandwidth();
        chart.update("radiusAxis.padding", 0.0).expect("update");
        assert_close(chart.layout().bands.bandwidth(), 100.0 / 3.0, 1e-9);
        assert!(chart.layout().bands.bandwidth() > before);
        let label = &chart.radius_axis_layout().labels[0];
        assert_close(label.position.y, -(100.0 - 50.0 / 3.0), 1e-9);
    }

    #[test]
    fn tick_distance_redraws_angle_axis_only() {
        let mut chart = chart();
        chart.update("angleAxis.tick.distance", 20.0).expect("update");
        let scene = chart.surface().scene();
        assert_eq!(scene.bar_transitions, 1);
        let tick = scene.angle_axis.as_ref().expect("axis").ticks[0];
        assert_close(-tick.inner.y, 270.0, 1e-9);
    }

    #[test]
    fn start_angle_rebuilds_partition() {
        let mut chart = chart();
        chart.update("angleAxis.startAngle", PI / 2.0).expect("update");
        assert_close(chart.layout().slices[0].start_angle, PI / 2.0, 1e-12);
        assert_close(chart.layout().slices[0].end_angle, PI / 2.0 + PI / 6.0, 1e-12);
        assert_eq!(chart.surface().scene().bar_transitions, 2);
    }

    #[test]
    fn invalid_update_is_rejected_without_render() {
        let mut chart = chart();
        let err = chart.update_dataset(vec![1.0]).expect_err("mismatch");
        assert!(matches!(
            err,
            ChartError::Config(ConfigError::LengthMismatch { dataset: 1, .. })
        ));
        assert_eq!(chart.surface().scene().bar_transitions, 1);
        assert_eq!(chart.config().data.dataset, vec![30.0, 50.0, 70.0]);
    }

    #[test]
    fn reconfigure_dispatches_each_changed_leaf() {
        let mut chart = chart();
        let patch = PolarConfigPatch::from_json_str(
            r#"{"angleAxis": {"endAngle": 6.0}, "data": {"dataset": [1, 2, 3]}}"#,
        )
        .expect("patch");
        assert_eq!(chart.reconfigure(patch).expect("reconfigure"), 2);
        assert_eq!(chart.surface().scene().bar_transitions, 3);
    }

    #[test]
    fn clicks_reach_registered_handlers() {
        let mut chart = chart();
        let pointer = PointerEvent {
            position: Vec2::new(3.0, 4.0),
        };
        assert!(!chart.activate_bar(1, pointer));

        let clicks: Rc<RefCell<Vec<ClickEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = clicks.clone();
        chart.on_bar_click(move |e| sink.borrow_mut().push(e.clone()));
        assert!(chart.activate_bar(1, pointer));
        assert!(!chart.activate_bar(7, pointer));
        assert!(!chart.activate_label(0, pointer));

        assert_eq!(
            *clicks.borrow(),
            vec![ClickEvent {
                index: 1,
                category: "B".to_string(),
                value: 50.0,
                pointer,
            }]
        );
    }
}
