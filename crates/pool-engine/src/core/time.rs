/// Fixed timestep accumulator.
/// Turns variable frame time into a whole number of fixed steps, so the
/// table always advances in identical ticks. Also used with a 1-second
/// step to drive the elapsed-time clock.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per step, in seconds.
    dt: f64,
    /// Accumulated time from variable frame deltas.
    accumulator: f64,
    /// Most steps a single frame may produce.
    max_steps: u32,
}

impl FixedTimestep {
    pub const DEFAULT_MAX_STEPS: u32 = 10;

    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f64) -> u32 {
        if !(frame_dt > 0.0) {
            return 0;
        }
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f64);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f64 * self.dt;
        steps
    }

    /// Fraction of a step left over (0.0 to 1.0).
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Drop any partial step.
    pub fn clear(&mut self) {
        self.accumulator = 0.0;
    }
}
