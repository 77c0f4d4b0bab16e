/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64); // seconds

impl Time {
    pub fn from_millis(ms: f64) -> Self {
        Time(ms / 1000.0)
    }

    pub fn as_millis(self) -> f64 {
        self.0 * 1000.0
    }
}

/// Half-open interval of engine time occupied by one animation phase.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    pub fn starting_at(start: Time, duration_s: f64) -> Self {
        Self {
            start,
            end: Time(start.0 + duration_s.max(0.0)),
        }
    }

    pub fn duration(&self) -> f64 {
        (self.end.0 - self.start.0).max(0.0)
    }

    /// Linear progress of `at` through the span, clamped to `[0, 1]`.
    ///
    /// Zero-length spans are complete as soon as they start.
    pub fn progress(&self, at: Time) -> f64 {
        let d = self.duration();
        if d == 0.0 {
            return if at.0 >= self.start.0 { 1.0 } else { 0.0 };
        }
        ((at.0 - self.start.0) / d).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, at: Time) -> bool {
        at.0 >= self.end.0
    }
}
