//! Owned read-back copies for renderers. Nothing here borrows the table.

use glam::DVec2;

use crate::api::types::BallId;
use crate::core::ball::{Ball, BallColour, BallRole};
use crate::core::table::Table;

#[derive(Debug, Clone, PartialEq)]
pub struct BallView {
    pub id: BallId,
    pub colour: BallColour,
    pub role: BallRole,
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    pub enabled: bool,
    pub fall_counter: u32,
}

impl From<&Ball> for BallView {
    fn from(ball: &Ball) -> Self {
        Self {
            id: ball.id(),
            colour: ball.colour(),
            role: ball.role(),
            pos: ball.pos(),
            vel: ball.vel(),
            radius: ball.radius(),
            enabled: !ball.is_disabled(),
            fall_counter: ball.fall_counter(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub width: f64,
    pub height: f64,
    pub friction: f64,
    pub colour: String,
    pub score: u32,
    pub seconds: u32,
    pub won: bool,
    pub pockets: Vec<DVec2>,
    pub pocket_radius: f64,
    pub balls: Vec<BallView>,
    pub history_depth: usize,
}

impl TableView {
    pub fn capture(table: &Table, won: bool) -> Self {
        Self {
            width: table.width(),
            height: table.height(),
            friction: table.friction(),
            colour: table.colour().to_string(),
            score: table.score(),
            seconds: table.seconds(),
            won,
            pockets: table.pockets().iter().map(|p| p.center()).collect(),
            pocket_radius: table.pockets().first().map_or(0.0, |p| p.radius()),
            balls: table.balls().iter().map(BallView::from).collect(),
            history_depth: table.history().len(),
        }
    }

    pub fn enabled_balls(&self) -> impl Iterator<Item = &BallView> {
        self.balls.iter().filter(|b| b.enabled)
    }
}
