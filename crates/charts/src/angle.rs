/// One category's share of the angular range.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AngleSlice {
    pub start_angle: f64,
    pub end_angle: f64,
    /// Position of the category in the input.
    pub index: usize,
}

impl AngleSlice {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Partitions `[start_angle, end_angle]` proportionally to `weights`.
///
/// Slices are laid out in input order regardless of weight magnitude, and the
/// last slice ends exactly at `end_angle`. Callers must pass at least one
/// weight and a positive weight sum; config validation guarantees both.
pub fn allocate(weights: &[f64], start_angle: f64, end_angle: f64) -> Vec<AngleSlice> {
    let total: f64 = weights.iter().sum();
    let span = end_angle - start_angle;
    let k = if total > 0.0 { span / total } else { 0.0 };

    let mut slices = Vec::with_capacity(weights.len());
    let mut acc = start_angle;
    for (index, w) in weights.iter().enumerate() {
        let end = if index + 1 == weights.len() {
            end_angle
        } else {
            acc + w * k
        };
        slices.push(AngleSlice {
            start_angle: acc,
            end_angle: end,
            index,
        });
        acc = end;
    }
    slices
}
