use serde::{Deserialize, Serialize};

use crate::merge::{Merge, replace};
use crate::value::{ConfigValue, PatchFailure, Patchable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    /// Space between the chart's outer radius and the viewport edge (px).
    pub padding: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            padding: 0.0,
        }
    }
}

impl Dimensions {
    /// Largest radius that fits the viewport after padding. Never negative.
    pub fn outer_radius(&self) -> f64 {
        (self.width.min(self.height) / 2.0 - self.padding).max(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DimensionsPatch {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub padding: Option<f64>,
}

impl Merge for Dimensions {
    type Patch = DimensionsPatch;

    fn merge(&mut self, patch: DimensionsPatch) -> &mut Self {
        replace(&mut self.width, patch.width);
        replace(&mut self.height, patch.height);
        replace(&mut self.padding, patch.padding);
        self
    }
}

impl Patchable for Dimensions {
    fn set(&mut self, segments: &[&str], value: ConfigValue) -> Result<(), PatchFailure> {
        match segments {
            ["width"] => self.width = value.into_number()?,
            ["height"] => self.height = value.into_number()?,
            ["padding"] => self.padding = value.into_number()?,
            _ => return Err(PatchFailure::UnknownField),
        }
        Ok(())
    }
}
