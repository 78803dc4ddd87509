//! Countdown state machine deciding when bricks are dropped.
//!
//! The scheduler is fed the frame's elapsed time once per frame. It emits at most one
//! spawn per call: a long frame that spans several intervals still yields a single brick,
//! and the countdown restarts from the full interval.

/// Current phase of the scheduler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpawnState {
    /// Counting down to the next spawn (seconds remaining, may go negative).
    Waiting { countdown: f32 },
    /// Every brick has been spawned. Terminal.
    Exhausted,
}

/// Emitted when the scheduler decides a brick should be dropped this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnEvent {
    /// 1-based ordinal of the brick being spawned.
    pub ordinal: u32,
}

#[derive(Clone, Debug)]
pub struct SpawnScheduler {
    countdown: f32,
    spawned: u32,
    limit: u32,
    interval: f32,
}

impl SpawnScheduler {
    pub fn new(initial_countdown: f32, interval: f32, limit: u32) -> Self {
        Self {
            countdown: initial_countdown,
            spawned: 0,
            limit,
            interval,
        }
    }

    /// Feed `dt` seconds of elapsed time.
    pub fn advance(&mut self, dt: f32) -> Option<SpawnEvent> {
        self.countdown -= dt;

        if self.countdown < 0.0 && self.spawned < self.limit {
            self.countdown = self.interval;
            self.spawned += 1;
            return Some(SpawnEvent {
                ordinal: self.spawned,
            });
        }

        None
    }

    pub fn state(&self) -> SpawnState {
        if self.is_exhausted() {
            SpawnState::Exhausted
        } else {
            SpawnState::Waiting {
                countdown: self.countdown,
            }
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.spawned >= self.limit
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}
