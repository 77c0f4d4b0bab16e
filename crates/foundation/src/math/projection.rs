//! Orthographic globe projection.
//!
//! Rotation follows the `[lambda, phi, gamma]` convention of [`Rotation`]:
//! the sphere is first spun by `lambda` around the polar axis, then tilted by
//! `phi` and rolled by `gamma`. A rotation of `[-lon, -lat, 0]` brings
//! `(lon, lat)` to the center of the view.

use super::{GeoPoint, Rotation, Vec2};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Orthographic {
    /// Sphere radius in pixels.
    pub scale: f64,
    /// Screen position of the projection center.
    pub translate: Vec2,
    pub rotation: Rotation,
}

impl Orthographic {
    pub fn new(scale: f64, translate: Vec2) -> Self {
        Self {
            scale,
            translate,
            rotation: [0.0, 0.0, 0.0],
        }
    }

    /// Fits the whole sphere into a `width` x `height` viewport.
    pub fn fit(width: f64, height: f64) -> Self {
        Self::new(width.min(height) / 2.0, Vec2::new(width / 2.0, height / 2.0))
    }

    pub fn with_rotation(self, rotation: Rotation) -> Self {
        Self { rotation, ..self }
    }

    /// Applies the view rotation to a point, in degrees.
    pub fn rotate(&self, p: GeoPoint) -> GeoPoint {
        let [dl, dp, dg] = self.rotation;
        let lambda = (p.lon_deg + dl).to_radians();
        let phi = p.lat_deg.to_radians();
        if dp == 0.0 && dg == 0.0 {
            return GeoPoint::new(wrap_degrees(lambda.to_degrees()), p.lat_deg);
        }

        let (sin_dp, cos_dp) = dp.to_radians().sin_cos();
        let (sin_dg, cos_dg) = dg.to_radians().sin_cos();
        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * cos_dp + x * sin_dp;

        GeoPoint::new(
            (y * cos_dg - k * sin_dg)
                .atan2(x * cos_dp - z * sin_dp)
                .to_degrees(),
            (k * cos_dg + y * sin_dg).clamp(-1.0, 1.0).asin().to_degrees(),
        )
    }

    /// Projects a point to screen space, or `None` when it lies on the far
    /// hemisphere.
    pub fn project(&self, p: GeoPoint) -> Option<Vec2> {
        let r = self.rotate(p);
        let (sin_l, cos_l) = r.lon_deg.to_radians().sin_cos();
        let (sin_p, cos_p) = r.lat_deg.to_radians().sin_cos();
        if cos_p * cos_l <= 0.0 {
            return None;
        }
        let offset = Vec2::new(self.scale * cos_p * sin_l, -self.scale * sin_p);
        Some(self.translate + offset)
    }
}

fn wrap_degrees(d: f64) -> f64 {
    if d > 180.0 {
        d - 360.0
    } else if d < -180.0 {
        d + 360.0
    } else {
        d
    }
}
