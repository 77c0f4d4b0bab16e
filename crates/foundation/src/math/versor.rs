//! Versors (unit quaternions) for globe orientation.
//!
//! Orientations are exchanged with projections as `[lambda, phi, gamma]`
//! rotation triples in degrees (longitude, latitude, roll). Interpolating in
//! quaternion space follows the great-circle arc between two orientations,
//! which Euler-angle interpolation does not.

use crate::tween::Tween;

/// Rotation triple `[lambda, phi, gamma]` in degrees.
pub type Rotation = [f64; 3];

/// Above this dot product two versors are treated as coincident and blended
/// linearly; `sin(acos(dot))` is too close to zero for the spherical formula.
pub const SLERP_DOT_THRESHOLD: f64 = 0.9995;

/// Unit quaternion `[a, b, c, d]` with `a` the scalar part.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Versor(pub [f64; 4]);

impl Versor {
    pub const IDENTITY: Versor = Versor([1.0, 0.0, 0.0, 0.0]);

    /// Builds a versor from a rotation triple.
    ///
    /// Angles are halved while converting to radians (`PI / 360`).
    pub fn from_angles([l, p, g]: Rotation) -> Self {
        let l = l * std::f64::consts::PI / 360.0;
        let p = p * std::f64::consts::PI / 360.0;
        let g = g * std::f64::consts::PI / 360.0;
        let (sl, cl) = l.sin_cos();
        let (sp, cp) = p.sin_cos();
        let (sg, cg) = g.sin_cos();
        Versor([
            cl * cp * cg + sl * sp * sg,
            sl * cp * cg - cl * sp * sg,
            cl * sp * cg + sl * cp * sg,
            cl * cp * sg - sl * sp * cg,
        ])
    }

    pub fn to_angles(self) -> Rotation {
        let [a, b, c, d] = self.0;
        // Rounding can push the sine marginally outside asin's domain.
        let sin_phi = (2.0 * (a * c - d * b)).clamp(-1.0, 1.0);
        [
            (2.0 * (a * b + c * d))
                .atan2(1.0 - 2.0 * (b * b + c * c))
                .to_degrees(),
            sin_phi.asin().to_degrees(),
            (2.0 * (a * d + b * c))
                .atan2(1.0 - 2.0 * (c * c + d * d))
                .to_degrees(),
        ]
    }

    pub fn dot(self, other: Versor) -> f64 {
        let [a1, b1, c1, d1] = self.0;
        let [a2, b2, c2, d2] = other.0;
        a1 * a2 + b1 * b2 + c1 * c2 + d1 * d2
    }

    pub fn magnitude(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn negated(self) -> Versor {
        let [a, b, c, d] = self.0;
        Versor([-a, -b, -c, -d])
    }
}

/// Linear blend followed by renormalization to unit length.
pub fn interpolate_linear(from: Versor, to: Versor) -> Tween<Versor> {
    let [a1, b1, c1, d1] = from.0;
    let [a2, b2, c2, d2] = to.0;
    let (da, db, dc, dd) = (a2 - a1, b2 - b1, c2 - c1, d2 - d1);
    Box::new(move |t| {
        let x = [a1 + da * t, b1 + db * t, c1 + dc * t, d1 + dd * t];
        let l = x[0].hypot(x[1]).hypot(x[2]).hypot(x[3]);
        Versor([x[0] / l, x[1] / l, x[2] / l, x[3] / l])
    })
}

/// Shortest-arc spherical interpolation between two versors.
pub fn interpolate(from: Versor, to: Versor) -> Tween<Versor> {
    let mut to = to;
    let mut dot = from.dot(to);
    // `q` and `-q` encode the same rotation; flip to stay on the short arc.
    if dot < 0.0 {
        to = to.negated();
        dot = -dot;
    }
    if dot > SLERP_DOT_THRESHOLD {
        return interpolate_linear(from, to);
    }

    let theta0 = dot.clamp(-1.0, 1.0).acos();
    let [a1, b1, c1, d1] = from.0;
    let [a2, b2, c2, d2] = to.0;
    // Component of `to` orthogonal to `from`, normalized.
    let (a2, b2, c2, d2) = (a2 - a1 * dot, b2 - b1 * dot, c2 - c1 * dot, d2 - d1 * dot);
    let l = a2.hypot(b2).hypot(c2).hypot(d2);
    let (a2, b2, c2, d2) = (a2 / l, b2 / l, c2 / l, d2 / l);

    Box::new(move |t| {
        let (s, c) = (theta0 * t).sin_cos();
        Versor([
            a1 * c + a2 * s,
            b1 * c + b2 * s,
            c1 * c + c2 * s,
            d1 * c + d2 * s,
        ])
    })
}

/// Interpolates between two rotation triples along the great-circle arc.
pub fn interpolate_angles(from: Rotation, to: Rotation) -> Tween<Rotation> {
    let i = interpolate(Versor::from_angles(from), Versor::from_angles(to));
    Box::new(move |t| i(t).to_angles())
}
