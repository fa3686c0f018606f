pub mod ball;
pub mod geometry;
pub mod pocket;
pub mod record;
pub mod table;
pub mod time;
