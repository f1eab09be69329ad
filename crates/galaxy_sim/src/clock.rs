/// Turns wall-clock frame time into simulated time and holds the pause flag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    /// Simulated time units per wall-clock second
    pub speed: f32,
    pub paused: bool,
}

impl FrameClock {
    pub fn new(speed: f32) -> Self {
        Self { speed, paused: false }
    }

    /// Simulated time step for a frame that took `frame_secs` of wall time
    pub fn sim_dt(&self, frame_secs: f32) -> f32 {
        frame_secs * self.speed
    }

    /// Flip the pause flag and return the new state
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }
}
