use pool_engine::{
    ConfigError, FixedTimestep, Game, GameConfig, InputEvent, InputQueue, ProtocolLayout,
    RenderBuffer, SetupReport,
};

/// Wires the table simulation to a frame-driven host.
///
/// Each frame: apply queued input, run as many fixed ticks as the elapsed
/// time covers, advance the seconds clock, then pack the read-back buffer.
/// Input is only ever applied between ticks.
pub struct GameRunner {
    game: Game,
    input: InputQueue,
    timestep: FixedTimestep,
    /// 1-second steps feeding the table's elapsed-time counter.
    clock: FixedTimestep,
    render_buffer: RenderBuffer,
    layout: ProtocolLayout,
    frame_buffer: Vec<f32>,
    frame: u32,
    setup: SetupReport,
}

impl GameRunner {
    pub fn new(game: Game, setup: SetupReport) -> Self {
        let config = game.config().clone();
        let layout = ProtocolLayout::from_config(&config);
        let mut runner = Self {
            game,
            input: InputQueue::new(),
            timestep: FixedTimestep::new(config.fixed_dt),
            clock: FixedTimestep::new(1.0),
            render_buffer: RenderBuffer::with_capacity(config.max_balls),
            frame_buffer: Vec::with_capacity(layout.buffer_total_floats),
            layout,
            frame: 0,
            setup,
        };
        runner.pack_frame();
        runner
    }

    pub fn from_json(json: &str, config: GameConfig) -> Result<Self, ConfigError> {
        let (game, setup) = Game::from_json(json, config)?;
        for (index, colour) in &setup.skipped {
            log::warn!("Config ball {} has unknown colour {:?}", index, colour);
        }
        Ok(Self::new(game, setup))
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        // Clear per-frame transient data
        self.game.clear_frame_data();

        for event in self.input.drain() {
            event.apply(&mut self.game);
        }

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.game.tick();
        }

        let secs = self.clock.accumulate(dt);
        if secs > 0 {
            self.game.advance_clock(secs);
        }

        self.frame = self.frame.wrapping_add(1);
        self.pack_frame();
    }

    fn pack_frame(&mut self) {
        self.render_buffer.rebuild(self.game.table().balls());
        self.layout
            .pack(self.frame, &self.game, &self.render_buffer, &mut self.frame_buffer);
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn setup(&self) -> &SetupReport {
        &self.setup
    }

    // ---- Pointer accessors for host reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame_buffer.len() as u32
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.game.events().as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.game.events().len() as u32
    }

    // ---- Scalar accessors ----

    pub fn score(&self) -> u32 {
        self.game.table().score()
    }

    pub fn seconds(&self) -> u32 {
        self.game.table().seconds()
    }

    pub fn is_won(&self) -> bool {
        self.game.is_won()
    }

    pub fn history_depth(&self) -> u32 {
        self.game.table().history().len() as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pool_engine::bridge::protocol::{HEADER_FRAME_COUNTER, HEADER_SCORE, HEADER_SECONDS};
    use pool_engine::BallId;

    const CONFIG: &str = r#"{
        "Table": { "colour": "green", "friction": 0.01, "size": { "x": 800, "y": 400 } },
        "Balls": { "ball": [
            { "colour": "white", "position": { "x": 495, "y": 305 } },
            { "colour": "red", "position": { "x": 695, "y": 105 } },
            { "colour": "pink", "position": { "x": 50, "y": 50 } }
        ] }
    }"#;

    fn runner() -> GameRunner {
        GameRunner::from_json(CONFIG, GameConfig::default()).unwrap()
    }

    fn frame(r: &GameRunner) -> &[f32] {
        &r.frame_buffer
    }

    #[test]
    fn frame_buffer_is_ready_before_first_tick() {
        let r = runner();
        assert_eq!(r.frame_len(), r.buffer_total_floats());
        assert_eq!(r.instance_count(), 2);
        assert_eq!(r.setup().skipped_count(), 1);
    }

    #[test]
    fn frame_time_becomes_fixed_ticks() {
        let mut r = runner();
        r.push_input(InputEvent::Strike { ball: BallId(0), vx: 5.0, vy: -5.0 });
        // Two and a half ticks' worth of time.
        r.tick(2.5 / 60.0);
        let cue = r.game().table().balls()[0].pos();
        assert!(cue.x > 495.0 && cue.x < 495.0 + 3.0 * 5.0, "cue at {:?}", cue);
        assert_eq!(r.history_depth(), 1);
        assert_eq!(frame(&r)[HEADER_FRAME_COUNTER], 1.0);
    }

    #[test]
    fn clock_counts_whole_seconds() {
        let mut r = runner();
        for _ in 0..5 {
            r.tick(0.5);
        }
        assert_eq!(r.seconds(), 2);
        assert_eq!(frame(&r)[HEADER_SECONDS], 2.0);
    }

    #[test]
    fn shot_scores_and_rollback_restores() {
        let mut r = runner();
        r.push_input(InputEvent::Strike { ball: BallId(0), vx: 5.0, vy: -5.0 });
        for _ in 0..300 {
            r.tick(1.0 / 60.0);
        }
        assert_eq!(r.score(), 1);
        assert!(r.is_won());
        assert_eq!(frame(&r)[HEADER_SCORE], 1.0);

        r.push_input(InputEvent::Rollback);
        r.tick(0.0);
        assert_eq!(r.score(), 0);
        assert!(!r.game().table().balls()[1].is_disabled());
        assert_eq!(r.game_events_len(), 1);
    }

    #[test]
    fn reset_input_re_racks() {
        let mut r = runner();
        r.push_input(InputEvent::Strike { ball: BallId(0), vx: 5.0, vy: -5.0 });
        for _ in 0..30 {
            r.tick(1.0 / 60.0);
        }
        r.push_input(InputEvent::Reset);
        r.tick(0.0);
        let cue = r.game().table().balls()[0].pos();
        assert_eq!((cue.x, cue.y), (495.0, 305.0));
        assert!(!r.is_won());
    }
}
