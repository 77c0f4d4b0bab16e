use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::dimensions::{Dimensions, DimensionsPatch};
use crate::error::ConfigError;
use crate::merge::{Merge, merge_section, replace};
use crate::store::Configurable;
use crate::value::{ConfigValue, PatchFailure, Patchable, PathMutation, push_if_changed};

/// Configuration of the polar (radial) bar chart.
///
/// One category per radial band; `angle_axis.scale_weight`,
/// `radius_axis.categories` and `data.dataset` are index-aligned and must have
/// equal lengths (checked by [`Configurable::validate`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolarConfig {
    pub dimensions: Dimensions,
    pub angle_axis: AngleAxis,
    pub radius_axis: RadiusAxis,
    pub data: Data,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AngleAxis {
    /// Radians, clockwise from 12 o'clock.
    pub start_angle: f64,
    pub end_angle: f64,
    /// Relative angular share of each category's slice.
    pub scale_weight: Vec<f64>,
    pub min_value: f64,
    pub max_value: f64,
    pub tick: Tick,
    /// Dash length of the angle axis guide lines (px).
    pub dash: f64,
}

impl Default for AngleAxis {
    fn default() -> Self {
        Self {
            start_angle: 0.0,
            end_angle: TAU,
            scale_weight: Vec::new(),
            min_value: 0.0,
            max_value: 100.0,
            tick: Tick::default(),
            dash: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tick {
    /// Gap between the outer radius and the tick mark (px).
    pub distance: f64,
    pub length: f64,
}

impl Default for Tick {
    fn default() -> Self {
        Self {
            distance: 10.0,
            length: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RadiusAxis {
    pub categories: Vec<String>,
    /// Sets both inner and outer band padding, as a fraction of the step.
    pub padding: f64,
    /// Overrides the inner padding when non-zero.
    pub inner_padding: f64,
    /// Overrides the outer padding when non-zero.
    pub outer_padding: f64,
}

impl Default for RadiusAxis {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            padding: 0.1,
            inner_padding: 0.0,
            outer_padding: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Data {
    pub dataset: Vec<f64>,
}

/// Tween "from" state captured before a mutation is applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolarSnapshot {
    pub dataset: Vec<f64>,
}

// Partial overrides, as accepted from user JSON.

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolarConfigPatch {
    pub dimensions: Option<DimensionsPatch>,
    pub angle_axis: Option<AngleAxisPatch>,
    pub radius_axis: Option<RadiusAxisPatch>,
    pub data: Option<DataPatch>,
}

impl PolarConfigPatch {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(payload).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AngleAxisPatch {
    pub start_angle: Option<f64>,
    pub end_angle: Option<f64>,
    pub scale_weight: Option<Vec<f64>>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub tick: Option<TickPatch>,
    pub dash: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TickPatch {
    pub distance: Option<f64>,
    pub length: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RadiusAxisPatch {
    pub categories: Option<Vec<String>>,
    pub padding: Option<f64>,
    pub inner_padding: Option<f64>,
    pub outer_padding: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataPatch {
    pub dataset: Option<Vec<f64>>,
}

impl Merge for PolarConfig {
    type Patch = PolarConfigPatch;

    fn merge(&mut self, patch: PolarConfigPatch) -> &mut Self {
        merge_section(&mut self.dimensions, patch.dimensions);
        merge_section(&mut self.angle_axis, patch.angle_axis);
        merge_section(&mut self.radius_axis, patch.radius_axis);
        merge_section(&mut self.data, patch.data);
        self
    }
}

impl Merge for AngleAxis {
    type Patch = AngleAxisPatch;

    fn merge(&mut self, patch: AngleAxisPatch) -> &mut Self {
        replace(&mut self.start_angle, patch.start_angle);
        replace(&mut self.end_angle, patch.end_angle);
        replace(&mut self.scale_weight, patch.scale_weight);
        replace(&mut self.min_value, patch.min_value);
        replace(&mut self.max_value, patch.max_value);
        merge_section(&mut self.tick, patch.tick);
        replace(&mut self.dash, patch.dash);
        self
    }
}

impl Merge for Tick {
    type Patch = TickPatch;

    fn merge(&mut self, patch: TickPatch) -> &mut Self {
        replace(&mut self.distance, patch.distance);
        replace(&mut self.length, patch.length);
        self
    }
}

impl Merge for RadiusAxis {
    type Patch = RadiusAxisPatch;

    fn merge(&mut self, patch: RadiusAxisPatch) -> &mut Self {
        replace(&mut self.categories, patch.categories);
        replace(&mut self.padding, patch.padding);
        replace(&mut self.inner_padding, patch.inner_padding);
        replace(&mut self.outer_padding, patch.outer_padding);
        self
    }
}

impl Merge for Data {
    type Patch = DataPatch;

    fn merge(&mut self, patch: DataPatch) -> &mut Self {
        replace(&mut self.dataset, patch.dataset);
        self
    }
}

impl Patchable for PolarConfig {
    fn set(&mut self, segments: &[&str], value: ConfigValue) -> Result<(), PatchFailure> {
        match segments {
            ["dimensions", rest @ ..] => self.dimensions.set(rest, value),
            ["angleAxis", rest @ ..] => self.angle_axis.set(rest, value),
            ["radiusAxis", rest @ ..] => self.radius_axis.set(rest, value),
            ["data", "dataset"] => {
                self.data.dataset = value.into_numbers()?;
                Ok(())
            }
            _ => Err(PatchFailure::UnknownField),
        }
    }
}

impl Patchable for AngleAxis {
    fn set(&mut self, segments: &[&str], value: ConfigValue) -> Result<(), PatchFailure> {
        match segments {
            ["startAngle"] => self.start_angle = value.into_number()?,
            ["endAngle"] => self.end_angle = value.into_number()?,
            ["scaleWeight"] => self.scale_weight = value.into_numbers()?,
            ["minValue"] => self.min_value = value.into_number()?,
            ["maxValue"] => self.max_value = value.into_number()?,
            ["tick", "distance"] => self.tick.distance = value.into_number()?,
            ["tick", "length"] => self.tick.length = value.into_number()?,
            ["dash"] => self.dash = value.into_number()?,
            _ => return Err(PatchFailure::UnknownField),
        }
        Ok(())
    }
}

impl Patchable for RadiusAxis {
    fn set(&mut self, segments: &[&str], value: ConfigValue) -> Result<(), PatchFailure> {
        match segments {
            ["categories"] => self.categories = value.into_texts()?,
            ["padding"] => self.padding = value.into_number()?,
            ["innerPadding"] => self.inner_padding = value.into_number()?,
            ["outerPadding"] => self.outer_padding = value.into_number()?,
            _ => return Err(PatchFailure::UnknownField),
        }
        Ok(())
    }
}

fn check_finite(path: &str, v: f64) -> Result<(), ConfigError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFiniteValue {
            path: path.to_string(),
        })
    }
}

impl Configurable for PolarConfig {
    type Snapshot = PolarSnapshot;

    fn validate(&self) -> Result<(), ConfigError> {
        let axis = &self.angle_axis;
        let weights = &axis.scale_weight;
        if weights.is_empty() {
            return Err(ConfigError::EmptyWeights);
        }
        let categories = self.radius_axis.categories.len();
        let dataset = self.data.dataset.len();
        if weights.len() != categories || categories != dataset {
            return Err(ConfigError::LengthMismatch {
                scale_weight: weights.len(),
                categories,
                dataset,
            });
        }
        if let Some((index, &weight)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !(w.is_finite() && **w > 0.0))
        {
            return Err(ConfigError::NonPositiveWeight { index, weight });
        }

        check_finite("angleAxis.startAngle", axis.start_angle)?;
        check_finite("angleAxis.endAngle", axis.end_angle)?;
        check_finite("angleAxis.minValue", axis.min_value)?;
        check_finite("angleAxis.maxValue", axis.max_value)?;
        if axis.min_value >= axis.max_value {
            return Err(ConfigError::InvalidRange {
                min: axis.min_value,
                max: axis.max_value,
            });
        }
        for (i, v) in self.data.dataset.iter().enumerate() {
            check_finite(&format!("data.dataset[{i}]"), *v)?;
        }
        Ok(())
    }

    fn snapshot(&self) -> PolarSnapshot {
        PolarSnapshot {
            dataset: self.data.dataset.clone(),
        }
    }

    fn diff(&self, next: &Self) -> Vec<PathMutation> {
        let mut out = Vec::new();
        let (a, b) = (&self.dimensions, &next.dimensions);
        push_if_changed(&mut out, "dimensions.width", &a.width, &b.width);
        push_if_changed(&mut out, "dimensions.height", &a.height, &b.height);
        push_if_changed(&mut out, "dimensions.padding", &a.padding, &b.padding);

        let (a, b) = (&self.angle_axis, &next.angle_axis);
        push_if_changed(&mut out, "angleAxis.startAngle", &a.start_angle, &b.start_angle);
        push_if_changed(&mut out, "angleAxis.endAngle", &a.end_angle, &b.end_angle);
        push_if_changed(&mut out, "angleAxis.scaleWeight", &a.scale_weight, &b.scale_weight);
        push_if_changed(&mut out, "angleAxis.minValue", &a.min_value, &b.min_value);
        push_if_changed(&mut out, "angleAxis.maxValue", &a.max_value, &b.max_value);
        push_if_changed(&mut out, "angleAxis.tick.distance", &a.tick.distance, &b.tick.distance);
        push_if_changed(&mut out, "angleAxis.tick.length", &a.tick.length, &b.tick.length);
        push_if_changed(&mut out, "angleAxis.dash", &a.dash, &b.dash);

        let (a, b) = (&self.radius_axis, &next.radius_axis);
        push_if_changed(&mut out, "radiusAxis.categories", &a.categories, &b.categories);
        push_if_changed(&mut out, "radiusAxis.padding", &a.padding, &b.padding);
        push_if_changed(&mut out, "radiusAxis.innerPadding", &a.inner_padding, &b.inner_padding);
        push_if_changed(&mut out, "radiusAxis.outerPadding", &a.outer_padding, &b.outer_padding);

        push_if_changed(&mut out, "data.dataset", &self.data.dataset, &next.data.dataset);
        out
    }
}
