//! Per-bar tweens for the polar chart.
//!
//! Every bar sweeps clockwise from the chart's start angle. Its end angle moves
//! linearly from where the previous value put it (or from the start angle on a
//! first render) to where the new value puts it. The label follows the middle
//! of the sweep and counts through whole numbers.

use foundation::math::{Vec2, midpoint_angle, polar_to_cartesian};
use foundation::tween::{Tween, interpolate_number, interpolate_round};

use crate::scale::PiecewiseLinearScale;

/// Annular sector in chart angle convention (radians, 0 at 12 o'clock,
/// clockwise) and pixels relative to the chart center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcDescriptor {
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

/// Radial placement of one bar, measured inward from the outer radius.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BarBand {
    pub outer_radius: f64,
    pub inner_radius: f64,
}

impl BarBand {
    /// `band_start` is the band's offset along the radius axis.
    pub fn new(radius: f64, band_start: f64, bandwidth: f64) -> Self {
        let outer_radius = radius - band_start;
        Self {
            outer_radius,
            inner_radius: outer_radius - bandwidth,
        }
    }

    pub fn mid_radius(&self) -> f64 {
        (self.outer_radius + self.inner_radius) / 2.0
    }
}

/// End angles the sweep moves between.
fn sweep_ends(
    old: Option<f64>,
    new: f64,
    scale: &PiecewiseLinearScale,
    start_angle: f64,
) -> (f64, f64) {
    let from = old.map_or(start_angle, |v| scale.apply(v));
    (from, scale.apply(new))
}

pub fn bar_tween(
    old: Option<f64>,
    new: f64,
    scale: &PiecewiseLinearScale,
    start_angle: f64,
    band: BarBand,
) -> Tween<ArcDescriptor> {
    let (from, to) = sweep_ends(old, new, scale, start_angle);
    let end = interpolate_number(from, to);
    Box::new(move |t| ArcDescriptor {
        start_angle,
        end_angle: end(t),
        inner_radius: band.inner_radius,
        outer_radius: band.outer_radius,
    })
}

/// Label anchor at the middle of the sweep, halfway through the band.
pub fn label_position_tween(
    old: Option<f64>,
    new: f64,
    scale: &PiecewiseLinearScale,
    start_angle: f64,
    band: BarBand,
) -> Tween<Vec2> {
    let (from, to) = sweep_ends(old, new, scale, start_angle);
    let end = interpolate_number(from, to);
    let radius = band.mid_radius();
    Box::new(move |t| polar_to_cartesian(midpoint_angle(start_angle, end(t)), radius))
}

/// Displayed value, rounded to an integer at every sample. Without a previous
/// value it counts up from the scale's lowest value, where the bar starts.
pub fn label_text_tween(
    old: Option<f64>,
    new: f64,
    scale: &PiecewiseLinearScale,
) -> Tween<String> {
    let floor = scale.domain().first().copied().unwrap_or(0.0);
    let value = interpolate_round(old.unwrap_or(floor), new);
    Box::new(move |t| {
        let v = value(t);
        // Avoid "-0" while crossing zero.
        format!("{}", if v == 0.0 { 0.0 } else { v })
    })
}

#[cfg(test)]
mod tests {
    use super::{BarBand, bar_tween, label_position_tween, label_text_tween};
    use crate::angle::allocate;
    use crate::scale::PiecewiseLinearScale;
    use foundation::math::polar_to_cartesian;
    use std::f64::consts::PI;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn half_circle() -> PiecewiseLinearScale {
        let slices = allocate(&[1.0, 1.0, 1.0], 0.0, PI);
        PiecewiseLinearScale::for_slices(0.0, 100.0, 0.0, &slices)
    }

    #[test]
    fn first_render_sweeps_from_start_angle() {
        let scale = half_circle();
        let band = BarBand::new(100.0, 10.0, 20.0);
        let tween = bar_tween(None, 30.0, &scale, 0.0, band);

        let a0 = tween(0.0);
        assert_eq!(a0.start_angle, 0.0);
        assert_eq!(a0.end_angle, 0.0);
        assert_eq!(a0.outer_radius, 90.0);
        assert_eq!(a0.inner_radius, 70.0);
        assert_close(tween(1.0).end_angle, 0.2 * PI, 1e-12);
    }

    #[test]
    fn update_starts_from_previous_value() {
        let scale = half_circle();
        let band = BarBand::new(100.0, 0.0, 10.0);
        let tween = bar_tween(Some(50.0), 70.0, &scale, 0.0, band);
        assert_close(tween(0.0).end_angle, scale.apply(50.0), 1e-12);
        assert_close(tween(1.0).end_angle, scale.apply(70.0), 1e-12);
        assert_close(
            tween(0.5).end_angle,
            (scale.apply(50.0) + scale.apply(70.0)) / 2.0,
            1e-12,
        );
    }

    #[test]
    fn label_sits_mid_sweep_mid_band() {
        let scale = half_circle();
        let band = BarBand::new(100.0, 10.0, 20.0);
        let tween = label_position_tween(None, 30.0, &scale, 0.0, band);
        let expected = polar_to_cartesian(0.1 * PI, 80.0);
        let p = tween(1.0);
        assert_close(p.x, expected.x, 1e-9);
        assert_close(p.y, expected.y, 1e-9);
        // Collapsed sweep at t=0 puts the label on the start ray.
        assert_close(tween(0.0).x, 0.0, 1e-12);
    }

    #[test]
    fn label_text_counts_in_integers() {
        let tween = label_text_tween(Some(12.0), 30.0, &half_circle());
        assert_eq!(tween(0.0), "12");
        assert_eq!(tween(1.0), "30");
        for i in 0..=10 {
            let text = tween(i as f64 / 10.0);
            assert!(text.parse::<i64>().is_ok(), "not an integer: {text}");
        }
        assert_eq!(label_text_tween(None, 30.0, &half_circle())(1.0), "30");
    }

    #[test]
    fn first_label_starts_at_min_value() {
        let slices = allocate(&[1.0, 1.0], 0.0, PI);
        let scale = PiecewiseLinearScale::for_slices(40.0, 90.0, 0.0, &slices);
        let band = BarBand::new(100.0, 0.0, 10.0);
        let text = label_text_tween(None, 60.0, &scale);
        let bar = bar_tween(None, 60.0, &scale, 0.0, band);
        assert_eq!(text(0.0), "40");
        assert_close(scale.invert(bar(0.0).end_angle), 40.0, 1e-9);
        assert_eq!(text(1.0), "60");
    }
}
