use glam::DVec2;

use crate::api::types::{BallId, GameEvent, StrikeSeq};
use crate::api::view::TableView;
use crate::config::{PoolConfig, SetupReport};
use crate::core::table::{SnapshotTrigger, Table, TickReport};
use crate::error::ConfigError;

/// Engine settings chosen by the host, separate from the table layout.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60). One tick per step.
    pub fixed_dt: f64,
    /// When a strike is written to the rollback history.
    pub snapshot_trigger: SnapshotTrigger,
    /// Maximum number of balls in the read-back buffer (default: 32).
    pub max_balls: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            snapshot_trigger: SnapshotTrigger::OnStrike,
            max_balls: 32,
            max_events: 32,
        }
    }
}

/// Top-level driver: one table, the win latch, and the per-tick events.
pub struct Game {
    table: Table,
    config: GameConfig,
    won: bool,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(table: Table, config: GameConfig) -> Self {
        let table = table.with_snapshot_trigger(config.snapshot_trigger);
        Self {
            table,
            config,
            won: false,
            events: Vec::new(),
        }
    }

    pub fn from_config(
        pool: &PoolConfig,
        config: GameConfig,
    ) -> Result<(Self, SetupReport), ConfigError> {
        let (table, report) = Table::from_config(pool)?;
        Ok((Self::new(table, config), report))
    }

    /// Parse a JSON table config and build the game.
    pub fn from_json(json: &str, config: GameConfig) -> Result<(Self, SetupReport), ConfigError> {
        let pool = PoolConfig::from_json(json)?;
        Self::from_config(&pool, config)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Whether the win has been announced since the last reset.
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Run one tick. The win check comes first, so a win produced by this
    /// tick's captures is announced on the next one.
    pub fn tick(&mut self) -> TickReport {
        if !self.won && self.table.has_won() {
            self.won = true;
            log::info!("All numbered balls pocketed, score {}", self.table.score());
            self.emit_event(GameEvent::won());
        }

        let report = self.table.step();
        for capture in &report.captures {
            self.emit_event(GameEvent::pocketed(capture.ball, capture.points, self.table.score()));
        }
        if report.snapshot_taken {
            self.emit_event(GameEvent::snapshot(self.table.history().len()));
        }
        report
    }

    pub fn strike(&mut self, ball: BallId, vel: DVec2) -> Option<StrikeSeq> {
        self.table.strike(ball, vel)
    }

    /// Undo the last recorded shot.
    ///
    /// The win latch is left alone: rolling back a winning shot keeps
    /// `is_won()` true even though the table no longer satisfies
    /// `Table::has_won`, and potting the balls again emits no second `WON`.
    /// Only `reset` clears the latch.
    pub fn rollback(&mut self) -> bool {
        let applied = self.table.rollback();
        if applied {
            self.emit_event(GameEvent::rollback(self.table.history().len()));
        }
        applied
    }

    /// Fresh rack: clears the win latch, puts every ball back and zeroes
    /// score and clock. History is kept.
    pub fn reset(&mut self) {
        self.won = false;
        self.table.reset();
        self.table.reset_scoreboard();
        self.emit_event(GameEvent::reset());
    }

    pub fn advance_clock(&mut self, secs: u32) {
        self.table.advance_clock(secs);
    }

    pub fn view(&self) -> TableView {
        TableView::capture(&self.table, self.won)
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() >= self.config.max_events {
            log::warn!("Event buffer full, dropping event kind {}", event.kind);
            return;
        }
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::event_kind;

    const CONFIG: &str = r#"{
        "Table": { "colour": "green", "friction": 0.01, "size": { "x": 800, "y": 400 } },
        "Balls": { "ball": [
            { "colour": "white", "position": { "x": 495, "y": 305 } },
            { "colour": "red", "position": { "x": 695, "y": 105 } },
            { "colour": "teal", "position": { "x": 100, "y": 100 } }
        ] }
    }"#;

    fn game() -> Game {
        let (game, report) = Game::from_json(CONFIG, GameConfig::default()).unwrap();
        assert_eq!(report.skipped_count(), 1);
        game
    }

    fn kinds(game: &Game) -> Vec<f32> {
        game.events().iter().map(|e| e.kind).collect()
    }

    #[test]
    fn game_config_sets_the_snapshot_trigger() {
        assert_eq!(game().table().snapshot_trigger(), SnapshotTrigger::OnStrike);
        let config = GameConfig {
            snapshot_trigger: SnapshotTrigger::OnSettle,
            ..GameConfig::default()
        };
        let (game, _) = Game::from_json(CONFIG, config).unwrap();
        assert_eq!(game.table().snapshot_trigger(), SnapshotTrigger::OnSettle);
    }

    #[test]
    fn rollback_of_winning_shot_keeps_the_latch() {
        let mut game = game();
        game.strike(BallId(0), DVec2::new(5.0, -5.0)).unwrap();
        for _ in 0..400 {
            game.tick();
        }
        assert!(game.is_won());

        assert!(game.rollback());
        assert!(!game.table().has_won());
        assert!(game.is_won());
        assert!(game.view().won);

        // Pot the red again: the table is won but no new WON event appears.
        game.strike(BallId(0), DVec2::new(5.0, -5.0)).unwrap();
        let mut won_events = 0;
        for _ in 0..400 {
            game.clear_frame_data();
            game.tick();
            won_events += game.events().iter().filter(|e| e.kind == event_kind::WON).count();
        }
        assert!(game.table().has_won());
        assert_eq!(won_events, 0);

        game.reset();
        assert!(!game.is_won());
    }

    #[test]
    fn bad_json_is_a_config_error() {
        let err = Game::from_json("{ not json", GameConfig::default()).err().unwrap();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn win_is_announced_exactly_once() {
        let mut game = game();
        game.strike(BallId(0), DVec2::new(5.0, -5.0)).unwrap();

        let mut won_events = 0;
        for _ in 0..400 {
            game.clear_frame_data();
            game.tick();
            won_events += game.events().iter().filter(|e| e.kind == event_kind::WON).count();
        }
        assert!(game.is_won());
        assert_eq!(won_events, 1);
        assert_eq!(game.table().score(), 1);
    }

    #[test]
    fn capture_and_snapshot_events() {
        let mut game = game();
        game.strike(BallId(0), DVec2::new(5.0, -5.0)).unwrap();
        game.tick();
        assert_eq!(kinds(&game), vec![event_kind::SNAPSHOT]);

        let mut pocketed = None;
        for _ in 0..400 {
            game.clear_frame_data();
            game.tick();
            if let Some(e) = game.events().iter().find(|e| e.kind == event_kind::BALL_POCKETED) {
                pocketed = Some(*e);
                break;
            }
        }
        let e = pocketed.expect("no capture event");
        assert_eq!((e.a, e.b, e.c), (1.0, 1.0, 1.0));
    }

    #[test]
    fn reset_clears_latch_and_scoreboard() {
        let mut game = game();
        game.strike(BallId(0), DVec2::new(5.0, -5.0)).unwrap();
        for _ in 0..400 {
            game.tick();
        }
        game.advance_clock(9);
        assert!(game.is_won());

        game.clear_frame_data();
        game.reset();
        assert!(!game.is_won());
        assert_eq!(kinds(&game), vec![event_kind::RESET]);
        let view = game.view();
        assert_eq!((view.score, view.seconds), (0, 0));
        assert_eq!(view.enabled_balls().count(), 2);
        assert_eq!(view.history_depth, 1);

        game.tick();
        assert!(!game.is_won());
    }

    #[test]
    fn rollback_emits_event_only_when_applied() {
        let mut game = game();
        assert!(!game.rollback());
        assert!(game.events().is_empty());

        game.strike(BallId(0), DVec2::new(5.0, -5.0)).unwrap();
        game.tick();
        game.clear_frame_data();
        assert!(game.rollback());
        assert_eq!(game.events(), &[GameEvent::rollback(0)]);
    }

    #[test]
    fn view_exposes_render_state() {
        let game = game();
        let view = game.view();
        assert_eq!((view.width, view.height), (800.0, 400.0));
        assert_eq!(view.friction, 0.01);
        assert_eq!(view.colour, "green");
        assert_eq!(view.pockets.len(), 6);
        assert_eq!(view.balls.len(), 2);
        assert!(!view.won);
        assert_eq!(view.balls[1].pos, DVec2::new(695.0, 105.0));
    }

    #[test]
    fn event_buffer_is_capped() {
        let config = GameConfig {
            max_events: 2,
            ..GameConfig::default()
        };
        let (mut game, _) = Game::from_json(CONFIG, config).unwrap();
        for _ in 0..5 {
            game.emit_event(GameEvent::reset());
        }
        assert_eq!(game.events().len(), 2);
    }
}
