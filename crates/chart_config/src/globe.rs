use serde::{Deserialize, Serialize};

use crate::dimensions::{Dimensions, DimensionsPatch};
use crate::error::ConfigError;
use crate::merge::{Merge, merge_section, replace};
use crate::store::Configurable;
use crate::value::{ConfigValue, PatchFailure, Patchable, PathMutation, push_if_changed};

/// Configuration of the rotating globe map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobeConfig {
    pub dimensions: Dimensions,
    pub map: MapConfig,
    /// Sphere radius in pixels.
    pub scale: f64,
    /// Latitude offset (degrees) kept while panning between points.
    pub tilt: f64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            map: MapConfig::default(),
            scale: 250.0,
            tilt: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    /// Longitude rotation (degrees) the globe spins to.
    pub angle: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self { angle: 360.0 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlobeSnapshot {
    pub angle: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobeConfigPatch {
    pub dimensions: Option<DimensionsPatch>,
    pub map: Option<MapConfigPatch>,
    pub scale: Option<f64>,
    pub tilt: Option<f64>,
}

impl GlobeConfigPatch {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(payload).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfigPatch {
    pub angle: Option<f64>,
}

impl Merge for GlobeConfig {
    type Patch = GlobeConfigPatch;

    fn merge(&mut self, patch: GlobeConfigPatch) -> &mut Self {
        merge_section(&mut self.dimensions, patch.dimensions);
        merge_section(&mut self.map, patch.map);
        replace(&mut self.scale, patch.scale);
        replace(&mut self.tilt, patch.tilt);
        self
    }
}

impl Merge for MapConfig {
    type Patch = MapConfigPatch;

    fn merge(&mut self, patch: MapConfigPatch) -> &mut Self {
        replace(&mut self.angle, patch.angle);
        self
    }
}

impl Patchable for GlobeConfig {
    fn set(&mut self, segments: &[&str], value: ConfigValue) -> Result<(), PatchFailure> {
        match segments {
            ["dimensions", rest @ ..] => return self.dimensions.set(rest, value),
            ["map", "angle"] => self.map.angle = value.into_number()?,
            ["scale"] => self.scale = value.into_number()?,
            ["tilt"] => self.tilt = value.into_number()?,
            _ => return Err(PatchFailure::UnknownField),
        }
        Ok(())
    }
}

impl Configurable for GlobeConfig {
    type Snapshot = GlobeSnapshot;

    fn validate(&self) -> Result<(), ConfigError> {
        for (path, v) in [
            ("map.angle", self.map.angle),
            ("tilt", self.tilt),
            ("scale", self.scale),
        ] {
            if !v.is_finite() {
                return Err(ConfigError::NonFiniteValue {
                    path: path.to_string(),
                });
            }
        }
        if self.scale <= 0.0 {
            return Err(ConfigError::NonPositiveValue {
                path: "scale".to_string(),
                value: self.scale,
            });
        }
        Ok(())
    }

    fn snapshot(&self) -> GlobeSnapshot {
        GlobeSnapshot {
            angle: self.map.angle,
        }
    }

    fn diff(&self, next: &Self) -> Vec<PathMutation> {
        let mut out = Vec::new();
        let (a, b) = (&self.dimensions, &next.dimensions);
        push_if_changed(&mut out, "dimensions.width", &a.width, &b.width);
        push_if_changed(&mut out, "dimensions.height", &a.height, &b.height);
        push_if_changed(&mut out, "dimensions.padding", &a.padding, &b.padding);
        push_if_changed(&mut out, "map.angle", &self.map.angle, &next.map.angle);
        push_if_changed(&mut out, "scale", &self.scale, &next.scale);
        push_if_changed(&mut out, "tilt", &self.tilt, &next.tilt);
        out
    }
}
