use glam::DVec2;

use crate::core::geometry;

/// Distance from the cushion to the pocket centres along each edge.
pub const POCKET_OFFSET: f64 = 5.0;

/// Capture radius: a ball whose centre is closer than this falls in.
pub const POCKET_RADIUS: f64 = 15.0;

/// A static capture zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pocket {
    center: DVec2,
    radius: f64,
}

impl Pocket {
    pub fn new(center: DVec2) -> Self {
        Self {
            center,
            radius: POCKET_RADIUS,
        }
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn contains(&self, point: DVec2) -> bool {
        geometry::point_in_circle(point, self.center, self.radius)
    }

    /// The six pockets of a `width` x `height` table: four corners and the
    /// midpoints of the long edges, each pulled in by `POCKET_OFFSET`.
    /// Order: top row left to right, then bottom row left to right.
    pub fn standard_layout(width: f64, height: f64) -> [Pocket; 6] {
        let o = POCKET_OFFSET;
        let mid = width / 2.0;
        [
            Pocket::new(DVec2::new(o, o)),
            Pocket::new(DVec2::new(mid, o)),
            Pocket::new(DVec2::new(width - o, o)),
            Pocket::new(DVec2::new(o, height - o)),
            Pocket::new(DVec2::new(mid, height - o)),
            Pocket::new(DVec2::new(width - o, height - o)),
        ]
    }
}
