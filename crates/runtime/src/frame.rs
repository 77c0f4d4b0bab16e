use foundation::time::Time;

/// One tick of a fixed-rate animation clock.
///
/// Time is `index * dt_s`, so replaying the same frame rate yields the same
/// samples regardless of how long rendering a frame actually took.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub index: u64,
    /// Seconds between consecutive frames.
    pub dt_s: f64,
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        let time = Time(index as f64 * dt_s);
        Self { index, dt_s, time }
    }

    /// Frame zero of a clock ticking `fps` times per second (at least once).
    pub fn first_at_fps(fps: f64) -> Self {
        let fps = if fps.is_finite() { fps.max(1.0) } else { 60.0 };
        Self::new(0, fps.recip())
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.time.as_millis()
    }
}
