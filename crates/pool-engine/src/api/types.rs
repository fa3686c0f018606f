use bytemuck::{Pod, Zeroable};

/// Identifier of a ball: its index in the table's setup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BallId(pub u32);

impl BallId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Sequence number handed out by the table for every accepted strike.
/// Monotonic for the lifetime of the table, never reused after rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrikeSeq(pub u64);

/// Event kinds carried in `GameEvent::kind`.
pub mod event_kind {
    /// All numbered balls are down. Fires once per win.
    pub const WON: f32 = 1.0;
    /// a = ball id, b = points awarded, c = score after the capture.
    pub const BALL_POCKETED: f32 = 2.0;
    /// a = history depth after the push.
    pub const SNAPSHOT: f32 = 3.0;
    /// a = history depth after the pop.
    pub const ROLLBACK: f32 = 4.0;
    pub const RESET: f32 = 5.0;
}

/// A game event handed to the host through a flat float buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }

    pub fn won() -> Self {
        Self::new(event_kind::WON, 0.0, 0.0, 0.0)
    }

    pub fn pocketed(ball: BallId, points: u32, score: u32) -> Self {
        Self::new(event_kind::BALL_POCKETED, ball.0 as f32, points as f32, score as f32)
    }

    pub fn snapshot(depth: usize) -> Self {
        Self::new(event_kind::SNAPSHOT, depth as f32, 0.0, 0.0)
    }

    pub fn rollback(depth: usize) -> Self {
        Self::new(event_kind::ROLLBACK, depth as f32, 0.0, 0.0)
    }

    pub fn reset() -> Self {
        Self::new(event_kind::RESET, 0.0, 0.0, 0.0)
    }
}
