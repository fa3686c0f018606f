//! The table: owns balls, pockets, score and shot history, and runs the
//! phases of one tick in a fixed order.
//!
//! Every phase is a full pass over the balls in setup order, so a run is
//! reproducible for a given config and strike sequence.
//!
//! Collisions are resolved in one pass of nested iteration. A ball touching
//! two others in the same tick is resolved against them one after the
//! other, in index order, not simultaneously. Tight clusters may need a few
//! ticks to sort themselves out.

use glam::DVec2;

use crate::api::types::{BallId, StrikeSeq};
use crate::config::{BallConfig, PoolConfig, SetupReport};
use crate::core::ball::{Ball, BallColour};
use crate::core::geometry::Bounds;
use crate::core::pocket::Pocket;
use crate::core::record::{History, TableRecord};
use crate::error::ConfigError;

/// When a pending strike is written to history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotTrigger {
    /// At the end of the first tick after the strike, while balls are still rolling.
    #[default]
    OnStrike,
    /// At the end of the first tick after the strike in which every enabled ball is at rest.
    OnSettle,
}

impl SnapshotTrigger {
    pub fn fires(self, strike_pending: bool, at_rest: bool) -> bool {
        match self {
            SnapshotTrigger::OnStrike => strike_pending,
            SnapshotTrigger::OnSettle => strike_pending && at_rest,
        }
    }
}

/// A ball that fell into a pocket this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub ball: BallId,
    /// Index into `Table::pockets()`.
    pub pocket: usize,
    pub points: u32,
}

/// What happened during one `Table::step`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub captures: Vec<Capture>,
    /// Ball pairs whose velocities were exchanged.
    pub collisions: usize,
    pub snapshot_taken: bool,
}

pub struct Table {
    colour: String,
    friction: f64,
    bounds: Bounds,
    balls: Vec<Ball>,
    pockets: [Pocket; 6],
    score: u32,
    seconds: u32,
    /// Strikes accepted so far.
    hit_count: u64,
    /// `hit_count` as of the last snapshot.
    last_hit_count: u64,
    history: History,
    snapshot_trigger: SnapshotTrigger,
}

impl Table {
    /// Create an empty table. Fails on zero area or friction outside `[0, 1)`.
    pub fn new(colour: &str, friction: f64, width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::DegenerateTable { width, height });
        }
        if !(0.0..1.0).contains(&friction) {
            return Err(ConfigError::InvalidFriction(friction));
        }
        let (w, h) = (width as f64, height as f64);
        Ok(Self {
            colour: colour.to_string(),
            friction,
            bounds: Bounds::from_size(w, h),
            balls: Vec::new(),
            pockets: Pocket::standard_layout(w, h),
            score: 0,
            seconds: 0,
            hit_count: 0,
            last_hit_count: 0,
            history: History::new(),
            snapshot_trigger: SnapshotTrigger::default(),
        })
    }

    /// Build a table and its balls. Unknown ball colours are skipped and
    /// listed in the report; a non-positive radius fails the whole build.
    pub fn from_config(config: &PoolConfig) -> Result<(Self, SetupReport), ConfigError> {
        let t = &config.table;
        let mut table = Self::new(&t.colour, t.friction, t.size.x, t.size.y)?;
        let report = table.setup_balls(&config.balls.ball)?;
        Ok((table, report))
    }

    pub fn with_snapshot_trigger(mut self, trigger: SnapshotTrigger) -> Self {
        self.snapshot_trigger = trigger;
        self
    }

    fn setup_balls(&mut self, configs: &[BallConfig]) -> Result<SetupReport, ConfigError> {
        let mut report = SetupReport::default();
        for (index, bc) in configs.iter().enumerate() {
            let Some(colour) = BallColour::from_name(&bc.colour) else {
                log::warn!("Unknown ball colour {:?} at entry {}, skipping", bc.colour, index);
                report.skipped.push((index, bc.colour.clone()));
                continue;
            };
            if !(bc.radius > 0.0 && bc.radius.is_finite()) {
                return Err(ConfigError::DegenerateBall {
                    index,
                    radius: bc.radius,
                });
            }
            let id = BallId(self.balls.len() as u32);
            let ball = Ball::new(id, colour, bc.position.into(), bc.radius)
                .with_velocity(bc.velocity.into());
            self.balls.push(ball);
        }
        log::info!(
            "Table {}x{} set up with {} balls ({} skipped)",
            self.bounds.width(),
            self.bounds.height(),
            self.balls.len(),
            report.skipped_count()
        );
        Ok(report)
    }

    // -- Read-back --

    pub fn colour(&self) -> &str {
        &self.colour
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    /// Balls in setup order. Read-only: state changes go through the table.
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.balls.get(id.index())
    }

    pub fn pockets(&self) -> &[Pocket] {
        &self.pockets
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn snapshot_trigger(&self) -> SnapshotTrigger {
        self.snapshot_trigger
    }

    /// Sequence number of the most recent accepted strike, if any.
    pub fn last_strike(&self) -> Option<StrikeSeq> {
        (self.hit_count > 0).then_some(StrikeSeq(self.hit_count))
    }

    // -- External input --

    /// Elapsed-time hook for the host's once-per-second timer.
    pub fn advance_clock(&mut self, secs: u32) {
        self.seconds = self.seconds.saturating_add(secs);
    }

    /// Shoot a ball. Returns the strike's sequence number, or `None` when
    /// the id is unknown, the ball is disabled, or the velocity is zero.
    pub fn strike(&mut self, id: BallId, vel: DVec2) -> Option<StrikeSeq> {
        let ball = self.balls.get_mut(id.index())?;
        if !ball.strike(vel) {
            log::debug!("Strike on ball {} ignored", id.0);
            return None;
        }
        self.hit_count += 1;
        log::debug!("Strike #{} on ball {}: {:?}", self.hit_count, id.0, vel);
        Some(StrikeSeq(self.hit_count))
    }

    // -- Tick phases --

    /// Run one tick: pockets, collisions, friction, integration, strike check.
    pub fn step(&mut self) -> TickReport {
        let captures = self.check_pockets();
        let collisions = self.handle_collisions();
        self.apply_friction();
        self.integrate();
        let snapshot_taken = self.check_hit();
        TickReport {
            captures,
            collisions,
            snapshot_taken,
        }
    }

    /// Phase 1: capture every enabled ball whose centre is inside a pocket
    /// and award its points. A captured ball is never checked again.
    pub fn check_pockets(&mut self) -> Vec<Capture> {
        let mut captures = Vec::new();
        for (pocket_idx, pocket) in self.pockets.iter().enumerate() {
            for ball in self.balls.iter_mut() {
                if ball.is_disabled() || !pocket.contains(ball.pos()) {
                    continue;
                }
                ball.fall_into_pocket();
                let points = ball.points();
                self.score += points;
                if ball.is_cue() {
                    log::info!("Cue ball {} fell into pocket {}", ball.id().0, pocket_idx);
                } else {
                    log::info!(
                        "Ball {} ({}) pocketed into pocket {} for {} points, score {}",
                        ball.id().0,
                        ball.colour().name(),
                        pocket_idx,
                        points,
                        self.score
                    );
                }
                captures.push(Capture {
                    ball: ball.id(),
                    pocket: pocket_idx,
                    points,
                });
            }
        }
        captures
    }

    /// Phase 2: cushion reflection for every enabled ball, then one pass
    /// over unordered pairs `(i, j)`, `i < j`. Returns the number of pairs resolved.
    pub fn handle_collisions(&mut self) -> usize {
        for ball in self.balls.iter_mut() {
            ball.reflect_off_boundary(&self.bounds);
        }

        let n = self.balls.len();
        let mut resolved = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.balls.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);
                if a.is_colliding_with(b) && a.resolve_collision_with(b) {
                    resolved += 1;
                }
            }
        }
        resolved
    }

    /// Phase 3.
    pub fn apply_friction(&mut self) {
        let friction = self.friction;
        for ball in self.balls.iter_mut() {
            ball.apply_friction(friction);
        }
    }

    /// Phase 4.
    pub fn integrate(&mut self) {
        for ball in self.balls.iter_mut() {
            ball.integrate();
        }
    }

    /// Phase 5: push a snapshot when the trigger fires for a pending strike.
    pub fn check_hit(&mut self) -> bool {
        if !self
            .snapshot_trigger
            .fires(self.strike_pending(), self.all_at_rest())
        {
            return false;
        }
        self.record_snapshot();
        self.last_hit_count = self.hit_count;
        true
    }

    /// A strike has been accepted since the last snapshot.
    pub fn strike_pending(&self) -> bool {
        self.hit_count != self.last_hit_count
    }

    /// No enabled ball is moving.
    pub fn all_at_rest(&self) -> bool {
        self.balls
            .iter()
            .all(|b| b.is_disabled() || b.is_at_rest())
    }

    // -- History --

    /// Copy of the current state, as it would be recorded.
    pub fn snapshot(&self) -> TableRecord {
        TableRecord::capture(&self.balls, self.score, self.seconds)
    }

    /// Push the current state onto the history stack.
    pub fn record_snapshot(&mut self) {
        self.history.push(self.snapshot());
        log::info!("Snapshot recorded, history depth {}", self.history.len());
    }

    /// Undo back to the most recent snapshot, popping it. Every ball comes
    /// back at rest; any strike not yet recorded is dropped. Returns `false`
    /// with no change when the history is empty.
    pub fn rollback(&mut self) -> bool {
        let Some(record) = self.history.pop() else {
            log::debug!("Rollback requested with empty history");
            return false;
        };
        record.apply_to(&mut self.balls);
        self.score = record.score();
        self.seconds = record.seconds();
        self.last_hit_count = self.hit_count;
        log::info!(
            "Rolled back to score {}, {}s, history depth {}",
            self.score,
            self.seconds,
            self.history.len()
        );
        true
    }

    // -- Game state --

    /// Every non-cue ball is down. The cue ball's own state does not matter.
    pub fn has_won(&self) -> bool {
        self.balls
            .iter()
            .filter(|b| !b.is_cue())
            .all(Ball::is_disabled)
    }

    /// Put every ball back in its setup state. Score, clock and history are untouched.
    pub fn reset(&mut self) {
        for ball in self.balls.iter_mut() {
            ball.reset();
        }
        self.last_hit_count = self.hit_count;
        log::info!("Table reset, {} balls re-racked", self.balls.len());
    }

    /// Zero the score and the clock.
    pub fn reset_scoreboard(&mut self) {
        self.score = 0;
        self.seconds = 0;
    }
}
