use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::ball::DEFAULT_BALL_RADIUS;

/// Table and ball layout supplied by the host. Loaded from a JSON file at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    #[serde(rename = "Table")]
    pub table: TableConfig,
    #[serde(rename = "Balls")]
    pub balls: BallsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Cosmetic only.
    pub colour: String,
    /// Fraction of speed lost per tick, in `[0, 1)`.
    pub friction: f64,
    pub size: SizeConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SizeConfig {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BallsConfig {
    #[serde(default)]
    pub ball: Vec<BallConfig>,
}

/// One ball descriptor. `colour` selects the ball type; unknown
/// colours are skipped at setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallConfig {
    pub colour: String,
    pub position: PointConfig,
    #[serde(default)]
    pub velocity: PointConfig,
    #[serde(default = "default_radius")]
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointConfig {
    pub x: f64,
    pub y: f64,
}

impl From<PointConfig> for DVec2 {
    fn from(p: PointConfig) -> Self {
        DVec2::new(p.x, p.y)
    }
}

fn default_radius() -> f64 {
    DEFAULT_BALL_RADIUS
}

impl PoolConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn new(colour: &str, friction: f64, width: u32, height: u32) -> Self {
        Self {
            table: TableConfig {
                colour: colour.to_string(),
                friction,
                size: SizeConfig { x: width, y: height },
            },
            balls: BallsConfig::default(),
        }
    }

    /// Append a stationary ball of the default radius.
    pub fn with_ball(mut self, colour: &str, x: f64, y: f64) -> Self {
        self.balls.ball.push(BallConfig {
            colour: colour.to_string(),
            position: PointConfig { x, y },
            velocity: PointConfig::default(),
            radius: DEFAULT_BALL_RADIUS,
        });
        self
    }
}

/// Outcome of building a table: config entries that were not used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupReport {
    /// `(config index, colour name)` of every skipped ball.
    pub skipped: Vec<(usize, String)>,
}

impl SetupReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}
