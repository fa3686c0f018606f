pub mod api;
pub mod core;
pub mod config;
pub mod error;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig};
pub use api::types::{BallId, StrikeSeq, GameEvent, event_kind};
pub use api::view::{TableView, BallView};
pub use config::{PoolConfig, TableConfig, BallConfig, SetupReport};
pub use error::ConfigError;
pub use crate::core::ball::{Ball, BallColour, BallRole, REST_SPEED, DEFAULT_BALL_RADIUS};
pub use crate::core::geometry::Bounds;
pub use crate::core::pocket::{Pocket, POCKET_OFFSET, POCKET_RADIUS};
pub use crate::core::record::{TableRecord, History};
pub use crate::core::table::{Table, TickReport, Capture, SnapshotTrigger};
pub use crate::core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::instance::{BallInstance, RenderBuffer};
pub use bridge::protocol::ProtocolLayout;

pub use glam::DVec2;
