use glam::DVec2;

use crate::api::game::Game;
use crate::api::types::BallId;

/// User actions the table understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A cue shot: set `ball`'s velocity to `(vx, vy)` units per tick.
    Strike { ball: BallId, vx: f64, vy: f64 },
    /// Undo the most recent recorded shot.
    Rollback,
    /// Re-rack the table.
    Reset,
}

impl InputEvent {
    /// Apply this event to the game. Never runs inside a tick.
    pub fn apply(self, game: &mut Game) {
        match self {
            InputEvent::Strike { ball, vx, vy } => {
                game.strike(ball, DVec2::new(vx, vy));
            }
            InputEvent::Rollback => {
                game.rollback();
            }
            InputEvent::Reset => game.reset(),
        }
    }
}

/// A queue of input events.
/// The host pushes events as they happen; the runner drains them between ticks.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::game::GameConfig;
    use crate::config::PoolConfig;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Strike { ball: BallId(0), vx: 1.0, vy: 0.0 });
        q.push(InputEvent::Rollback);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events, vec![
            InputEvent::Strike { ball: BallId(0), vx: 1.0, vy: 0.0 },
            InputEvent::Rollback,
        ]);
        assert!(q.is_empty());
    }

    #[test]
    fn apply_routes_to_the_game() {
        let pool = PoolConfig::new("green", 0.01, 800, 400).with_ball("white", 100.0, 200.0);
        let (mut game, _) = Game::from_config(&pool, GameConfig::default()).unwrap();

        InputEvent::Strike { ball: BallId(0), vx: 2.0, vy: 1.0 }.apply(&mut game);
        assert_eq!(game.table().balls()[0].vel(), DVec2::new(2.0, 1.0));

        game.tick();
        game.tick();
        InputEvent::Rollback.apply(&mut game);
        assert!(game.table().balls()[0].is_at_rest());

        InputEvent::Reset.apply(&mut game);
        assert_eq!(game.table().balls()[0].pos(), DVec2::new(100.0, 200.0));
    }
}
