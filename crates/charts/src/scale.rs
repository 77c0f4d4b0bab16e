//! Continuous and banded scales used by the polar chart.

use chart_config::RadiusAxis;

use crate::angle::AngleSlice;

/// Monotonic piecewise-linear map between two breakpoint sequences.
///
/// Values outside the domain extrapolate the nearest segment.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseLinearScale {
    domain: Vec<f64>,
    range: Vec<f64>,
}

impl PiecewiseLinearScale {
    /// Extra breakpoints on the longer side are ignored.
    pub fn new(mut domain: Vec<f64>, mut range: Vec<f64>) -> Self {
        let n = domain.len().min(range.len());
        domain.truncate(n);
        range.truncate(n);
        Self { domain, range }
    }

    /// Value-to-angle scale for a slice partition.
    ///
    /// The domain holds one evenly spaced value per slice, from `min_value`
    /// to `max_value`, and is paired with the leading breakpoints of
    /// `[start_angle, slice ends...]`. A single slice still spans
    /// `[min_value, max_value]`.
    pub fn for_slices(
        min_value: f64,
        max_value: f64,
        start_angle: f64,
        slices: &[AngleSlice],
    ) -> Self {
        let count = slices.len().max(2);
        let step = (max_value - min_value) / (count - 1) as f64;
        let domain = (0..count)
            .map(|i| {
                if i + 1 == count {
                    max_value
                } else {
                    min_value + step * i as f64
                }
            })
            .collect();
        let range = std::iter::once(start_angle)
            .chain(slices.iter().map(|s| s.end_angle))
            .collect();
        Self::new(domain, range)
    }

    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    pub fn range(&self) -> &[f64] {
        &self.range
    }

    pub fn apply(&self, value: f64) -> f64 {
        piecewise(&self.domain, &self.range, value)
    }

    pub fn invert(&self, output: f64) -> f64 {
        piecewise(&self.range, &self.domain, output)
    }
}

fn piecewise(xs: &[f64], ys: &[f64], v: f64) -> f64 {
    match xs.len() {
        0 => return f64::NAN,
        1 => return ys[0],
        _ => {}
    }
    let n = xs.len();
    let inner = &xs[1..n - 1];
    let seg = if xs[n - 1] >= xs[0] {
        inner.partition_point(|&x| x <= v)
    } else {
        inner.partition_point(|&x| x >= v)
    };
    let (x0, x1) = (xs[seg], xs[seg + 1]);
    let (y0, y1) = (ys[seg], ys[seg + 1]);
    if x1 == x0 {
        return y0;
    }
    y0 + (v - x0) / (x1 - x0) * (y1 - y0)
}

/// Maps categories to evenly sized bands along `[range.0, range.1]`.
///
/// Follows the usual band-scale layout: `padding_inner` is the fraction of a
/// step left empty between bands and `padding_outer` the number of steps
/// reserved at each end. Leftover space is split evenly on both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    categories: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(
        categories: Vec<String>,
        range: (f64, f64),
        padding_inner: f64,
        padding_outer: f64,
    ) -> Self {
        let padding_inner = padding_inner.clamp(0.0, 1.0);
        let (lo, hi) = if range.0 <= range.1 {
            range
        } else {
            (range.1, range.0)
        };
        let n = categories.len() as f64;
        let step = (hi - lo) / (n - padding_inner + padding_outer * 2.0).max(1.0);
        let start = lo + (hi - lo - step * (n - padding_inner)) * 0.5;
        Self {
            categories,
            start,
            step,
            bandwidth: step * (1.0 - padding_inner),
        }
    }

    /// Radial bands on `[0, outer_radius]`. `padding` sets both inner and
    /// outer padding; non-zero `inner_padding` / `outer_padding` override it.
    pub fn for_radius_axis(axis: &RadiusAxis, outer_radius: f64) -> Self {
        let inner = if axis.inner_padding != 0.0 {
            axis.inner_padding
        } else {
            axis.padding
        };
        let outer = if axis.outer_padding != 0.0 {
            axis.outer_padding
        } else {
            axis.padding
        };
        Self::new(axis.categories.clone(), (0.0, outer_radius), inner, outer)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn band_at(&self, index: usize) -> Option<f64> {
        (index < self.categories.len()).then(|| self.start + self.step * index as f64)
    }

    pub fn band(&self, category: &str) -> Option<f64> {
        let index = self.categories.iter().position(|c| c == category)?;
        self.band_at(index)
    }
}
