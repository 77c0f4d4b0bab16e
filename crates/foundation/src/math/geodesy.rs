//! Spherical geodesy on geographic coordinates in degrees.

use super::Vec3;
use crate::tween::Tween;

/// Geographic coordinates in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }

    /// Unit vector with +x through (0, 0) and +z through the north pole.
    pub fn to_unit_vector(self) -> Vec3 {
        let (sin_lon, cos_lon) = self.lon_deg.to_radians().sin_cos();
        let (sin_lat, cos_lat) = self.lat_deg.to_radians().sin_cos();
        Vec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
    }

    pub fn from_unit_vector(v: Vec3) -> Self {
        Self::new(
            v.y.atan2(v.x).to_degrees(),
            v.z.atan2(v.x.hypot(v.y)).to_degrees(),
        )
    }
}

fn haversin(x: f64) -> f64 {
    let s = (x / 2.0).sin();
    s * s
}

/// Great-circle distance between two points, in radians.
pub fn geo_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let (x0, y0) = (a.lon_deg.to_radians(), a.lat_deg.to_radians());
    let (x1, y1) = (b.lon_deg.to_radians(), b.lat_deg.to_radians());
    let h = haversin(y1 - y0) + y0.cos() * y1.cos() * haversin(x1 - x0);
    2.0 * h.sqrt().clamp(0.0, 1.0).asin()
}

/// Interpolates along the great circle from `a` to `b`.
///
/// Coincident points yield a constant tween at `a`.
pub fn geo_interpolate(a: GeoPoint, b: GeoPoint) -> Tween<GeoPoint> {
    let d = geo_distance(a, b);
    if d == 0.0 {
        return Box::new(move |_| a);
    }

    let (x0, y0) = (a.lon_deg.to_radians(), a.lat_deg.to_radians());
    let (x1, y1) = (b.lon_deg.to_radians(), b.lat_deg.to_radians());
    let (cy0, sy0) = (y0.cos(), y0.sin());
    let (cy1, sy1) = (y1.cos(), y1.sin());
    let (kx0, ky0) = (cy0 * x0.cos(), cy0 * x0.sin());
    let (kx1, ky1) = (cy1 * x1.cos(), cy1 * x1.sin());
    let k = d.sin();

    Box::new(move |t| {
        let t = t * d;
        let bw = t.sin() / k;
        let aw = (d - t).sin() / k;
        let x = aw * kx0 + bw * kx1;
        let y = aw * ky0 + bw * ky1;
        let z = aw * sy0 + bw * sy1;
        GeoPoint::new(y.atan2(x).to_degrees(), z.atan2(x.hypot(y)).to_degrees())
    })
}

/// Spherical centroid of a set of rings.
///
/// Each ring is treated as a closed polyline; the centroid is the normalized
/// mean of edge midpoints weighted by edge arc length, projected back onto the
/// sphere. Returns `None` for empty input or when the weighted mean vanishes
/// (e.g. a ring that wraps a great circle).
pub fn geo_centroid(rings: &[Vec<GeoPoint>]) -> Option<GeoPoint> {
    let mut sum = Vec3::default();
    let mut total = 0.0;
    let mut fallback = Vec3::default();
    let mut count = 0usize;

    for ring in rings {
        for (i, p) in ring.iter().enumerate() {
            let q = ring[(i + 1) % ring.len()];
            let (va, vb) = (p.to_unit_vector(), q.to_unit_vector());
            fallback = fallback + va;
            count += 1;

            let w = geo_distance(*p, q);
            if w == 0.0 {
                continue;
            }
            let Some(mid) = (va + vb).normalized() else {
                continue;
            };
            sum = sum + mid * w;
            total += w;
        }
    }

    if count == 0 {
        return None;
    }
    // Degenerate rings (a single repeated point) have no edges with length.
    let v = if total > 0.0 { sum } else { fallback };
    v.normalized().map(GeoPoint::from_unit_vector)
}
