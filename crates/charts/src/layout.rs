//! Static axis geometry derived from the current polar config.

use chart_config::AngleAxis;
use foundation::math::{Vec2, polar_to_cartesian};

use crate::angle::AngleSlice;
use crate::scale::{BandScale, PiecewiseLinearScale};
use crate::tween::BarBand;

#[derive(Debug, Clone, PartialEq)]
pub struct RadiusLabel {
    pub index: usize,
    pub category: String,
    pub band: BarBand,
    /// Anchor on the start ray, centered in the band.
    pub position: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadiusAxisLayout {
    pub radius: f64,
    pub start_angle: f64,
    pub labels: Vec<RadiusLabel>,
}

impl RadiusAxisLayout {
    pub fn new(bands: &BandScale, radius: f64, start_angle: f64) -> Self {
        let labels = bands
            .categories()
            .iter()
            .enumerate()
            .filter_map(|(index, category)| {
                let band = BarBand::new(radius, bands.band_at(index)?, bands.bandwidth());
                Some(RadiusLabel {
                    index,
                    category: category.clone(),
                    band,
                    position: polar_to_cartesian(start_angle, band.mid_radius()),
                })
            })
            .collect();
        Self {
            radius,
            start_angle,
            labels,
        }
    }
}

/// A tick mark outside the outer radius at a value-scale breakpoint.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AxisTick {
    pub angle: f64,
    pub value: f64,
    pub inner: Vec2,
    pub outer: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AngleAxisLayout {
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Dash length for slice boundary guides.
    pub dash: f64,
    pub slices: Vec<AngleSlice>,
    pub ticks: Vec<AxisTick>,
}

impl AngleAxisLayout {
    pub fn new(
        axis: &AngleAxis,
        slices: Vec<AngleSlice>,
        scale: &PiecewiseLinearScale,
        radius: f64,
    ) -> Self {
        let inner_r = radius + axis.tick.distance;
        let outer_r = inner_r + axis.tick.length;
        let ticks = scale
            .domain()
            .iter()
            .zip(scale.range())
            .map(|(&value, &angle)| AxisTick {
                angle,
                value,
                inner: polar_to_cartesian(angle, inner_r),
                outer: polar_to_cartesian(angle, outer_r),
            })
            .collect();
        Self {
            radius,
            start_angle: axis.start_angle,
            end_angle: axis.end_angle,
            dash: axis.dash,
            slices,
            ticks,
        }
    }
}
