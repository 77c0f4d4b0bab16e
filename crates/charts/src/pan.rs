//! Two-leg globe pan between geographic points.
//!
//! The first leg turns the globe along the shortest rotation while a
//! great-circle arc grows out of the start point. The second leg holds the
//! destination view and retracts the arc into the end point.

use foundation::math::{
    GeoPoint, Orthographic, Rotation, geo_interpolate, versor::interpolate_angles,
};
use foundation::tween::{Easing, Tween};

use crate::surface::{GLOBE_LEG_DURATION_MS, GlobeFrame, GlobeLeg};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PanAnimation {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub from_rotation: Rotation,
    pub to_rotation: Rotation,
    pub leg_duration_ms: f64,
    pub easing: Easing,
}

impl PanAnimation {
    pub fn new(from: GeoPoint, to: GeoPoint, tilt: f64) -> Self {
        Self {
            from,
            to,
            from_rotation: Self::centering_rotation(from, tilt),
            to_rotation: Self::centering_rotation(to, tilt),
            leg_duration_ms: GLOBE_LEG_DURATION_MS,
            easing: Easing::default(),
        }
    }

    pub fn with_leg_duration(self, leg_duration_ms: f64) -> Self {
        Self {
            leg_duration_ms,
            ..self
        }
    }

    /// Rotation that puts `p` at the view center, offset by `tilt` degrees of
    /// latitude.
    pub fn centering_rotation(p: GeoPoint, tilt: f64) -> Rotation {
        [-p.lon_deg, tilt - p.lat_deg, 0.0]
    }

    pub fn rotation_tween(&self) -> Tween<Rotation> {
        interpolate_angles(self.from_rotation, self.to_rotation)
    }

    pub fn legs(&self, base: Orthographic, highlight: Option<usize>) -> Vec<GlobeLeg> {
        let (from, to) = (self.from, self.to);

        let turn = self.rotation_tween();
        let grow = geo_interpolate(from, to);
        let first = GlobeLeg {
            duration_ms: self.leg_duration_ms,
            easing: self.easing,
            frame: Box::new(move |t| GlobeFrame {
                projection: base.with_rotation(turn(t)),
                arc: Some((from, grow(t))),
                highlight,
            }),
        };

        let held = base.with_rotation(self.to_rotation);
        let shrink = geo_interpolate(from, to);
        let second = GlobeLeg {
            duration_ms: self.leg_duration_ms,
            easing: self.easing,
            frame: Box::new(move |t| GlobeFrame {
                projection: held,
                arc: Some((shrink(t), to)),
                highlight,
            }),
        };

        vec![first, second]
    }
}
