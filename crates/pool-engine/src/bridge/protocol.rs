//! Flat read-back buffer layout.
//! Must stay in sync with the host renderer.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [Pockets: 6 × 2 floats (x, y)]
//! [Balls: max_balls × 8 floats]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written into the header so the host can compute
//! offsets without hardcoding them.

use crate::api::game::{Game, GameConfig};
use crate::api::types::GameEvent;
use crate::renderer::instance::{BallInstance, RenderBuffer};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_TABLE_WIDTH: usize = 2;
pub const HEADER_TABLE_HEIGHT: usize = 3;
pub const HEADER_FRICTION: usize = 4;
pub const HEADER_SCORE: usize = 5;
pub const HEADER_SECONDS: usize = 6;
pub const HEADER_WON: usize = 7;
pub const HEADER_MAX_BALLS: usize = 8;
pub const HEADER_BALL_COUNT: usize = 9;
pub const HEADER_MAX_EVENTS: usize = 10;
pub const HEADER_EVENT_COUNT: usize = 11;
pub const HEADER_HISTORY_DEPTH: usize = 12;
pub const HEADER_POCKET_RADIUS: usize = 13;

pub const PROTOCOL_VERSION: f32 = 1.0;

pub const POCKET_COUNT: usize = 6;
pub const POCKET_FLOATS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_balls: usize,
    pub max_events: usize,

    pub pocket_data_offset: usize,
    pub ball_data_offset: usize,
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_balls: usize, max_events: usize) -> Self {
        let pocket_data_offset = HEADER_FLOATS;
        let ball_data_offset = pocket_data_offset + POCKET_COUNT * POCKET_FLOATS;
        let event_data_offset = ball_data_offset + max_balls * BallInstance::FLOATS;
        let buffer_total_floats = event_data_offset + max_events * GameEvent::FLOATS;

        Self {
            max_balls,
            max_events,
            pocket_data_offset,
            ball_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_balls, config.max_events)
    }

    /// Write one frame into `out`, resizing it to `buffer_total_floats`.
    /// Ball and event counts are clamped to capacity.
    pub fn pack(&self, frame: u32, game: &Game, balls: &RenderBuffer, out: &mut Vec<f32>) {
        out.clear();
        out.resize(self.buffer_total_floats, 0.0);

        let table = game.table();
        let ball_floats = balls.as_floats();
        let ball_count = (ball_floats.len() / BallInstance::FLOATS).min(self.max_balls);
        let events = game.events();
        let event_count = events.len().min(self.max_events);

        let header = &mut out[..HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_FRAME_COUNTER] = frame as f32;
        header[HEADER_TABLE_WIDTH] = table.width() as f32;
        header[HEADER_TABLE_HEIGHT] = table.height() as f32;
        header[HEADER_FRICTION] = table.friction() as f32;
        header[HEADER_SCORE] = table.score() as f32;
        header[HEADER_SECONDS] = table.seconds() as f32;
        header[HEADER_WON] = if game.is_won() { 1.0 } else { 0.0 };
        header[HEADER_MAX_BALLS] = self.max_balls as f32;
        header[HEADER_BALL_COUNT] = ball_count as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = event_count as f32;
        header[HEADER_HISTORY_DEPTH] = table.history().len() as f32;
        header[HEADER_POCKET_RADIUS] = table.pockets().first().map_or(0.0, |p| p.radius() as f32);

        for (i, pocket) in table.pockets().iter().take(POCKET_COUNT).enumerate() {
            let at = self.pocket_data_offset + i * POCKET_FLOATS;
            out[at] = pocket.center().x as f32;
            out[at + 1] = pocket.center().y as f32;
        }

        let n = ball_count * BallInstance::FLOATS;
        out[self.ball_data_offset..self.ball_data_offset + n].copy_from_slice(&ball_floats[..n]);

        let event_floats: &[f32] = bytemuck::cast_slice(&events[..event_count]);
        out[self.event_data_offset..self.event_data_offset + event_floats.len()]
            .copy_from_slice(event_floats);
    }
}
