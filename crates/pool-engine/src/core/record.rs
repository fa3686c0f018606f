//! Table snapshots for shot rollback.

use glam::DVec2;

use crate::core::ball::Ball;

/// Immutable copy of the table state at one instant.
///
/// Per-ball entries are parallel sequences in table order. Nothing here
/// points back at live balls.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRecord {
    positions: Vec<DVec2>,
    disabled: Vec<bool>,
    fall_counters: Vec<u32>,
    score: u32,
    seconds: u32,
}

impl TableRecord {
    pub fn capture(balls: &[Ball], score: u32, seconds: u32) -> Self {
        Self {
            positions: balls.iter().map(Ball::pos).collect(),
            disabled: balls.iter().map(Ball::is_disabled).collect(),
            fall_counters: balls.iter().map(Ball::fall_counter).collect(),
            score,
            seconds,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[DVec2] {
        &self.positions
    }

    pub fn disabled(&self) -> &[bool] {
        &self.disabled
    }

    pub fn fall_counters(&self) -> &[u32] {
        &self.fall_counters
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Write the recorded per-ball state back. Velocities are zeroed.
    pub(crate) fn apply_to(&self, balls: &mut [Ball]) {
        for (i, ball) in balls.iter_mut().enumerate().take(self.len()) {
            ball.restore(self.positions[i], self.disabled[i], self.fall_counters[i]);
        }
    }
}

/// LIFO stack of records. One pop undoes one recorded shot.
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<TableRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: TableRecord) {
        self.records.push(record);
    }

    pub fn pop(&mut self) -> Option<TableRecord> {
        self.records.pop()
    }

    pub fn latest(&self) -> Option<&TableRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
