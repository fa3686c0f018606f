//! 2D overlap tests shared by balls, pockets and the table cushions.

use glam::DVec2;

/// Axis-aligned rectangle in table space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    /// Rectangle anchored at the origin with the given size.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            min: DVec2::ZERO,
            max: DVec2::new(width, height),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Whether a circle lies entirely inside (touching the edge counts as inside).
    pub fn contains_circle(&self, center: DVec2, radius: f64) -> bool {
        center.x - radius >= self.min.x
            && center.x + radius <= self.max.x
            && center.y - radius >= self.min.y
            && center.y + radius <= self.max.y
    }
}

/// Strict overlap: circles that merely touch are not overlapping.
pub fn circles_overlap(a: DVec2, radius_a: f64, b: DVec2, radius_b: f64) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) < reach * reach
}

pub fn point_in_circle(point: DVec2, center: DVec2, radius: f64) -> bool {
    point.distance_squared(center) < radius * radius
}
