//! Turns display-refresh timestamps into frame deltas.

/// Tracks the previous refresh timestamp.
///
/// The first tick only records a baseline and reports `dt = 0`, so nothing spawns or
/// integrates on frame 0.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    previous: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `now` (seconds) and return the time since the previous tick.
    ///
    /// A timestamp earlier than the previous one yields zero rather than a negative delta.
    pub fn tick(&mut self, now: f64) -> f32 {
        let dt = match self.previous {
            Some(previous) => (now - previous).max(0.0) as f32,
            None => 0.0,
        };
        self.previous = Some(now);
        dt
    }

    pub fn previous(&self) -> Option<f64> {
        self.previous
    }
}
