//! A single ball: identity, kinematic state and the per-ball physics.
//!
//! All balls share the same mass, so mass cancels out of every impulse
//! and is not stored. One tick is one unit of time: `integrate` adds the
//! velocity to the position unscaled.

use glam::DVec2;

use crate::api::types::BallId;
use crate::core::geometry::{self, Bounds};

/// Below this speed (units per tick) friction stops the ball outright.
pub const REST_SPEED: f64 = 0.01;

/// Radius used when the config does not give one.
pub const DEFAULT_BALL_RADIUS: f64 = 10.0;

/// Ball colour. Decides the points a capture is worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallColour {
    White,
    Red,
    Yellow,
    Green,
    Brown,
    Blue,
    Purple,
    Orange,
    Black,
}

impl BallColour {
    pub const ALL: [BallColour; 9] = [
        BallColour::White,
        BallColour::Red,
        BallColour::Yellow,
        BallColour::Green,
        BallColour::Brown,
        BallColour::Blue,
        BallColour::Purple,
        BallColour::Orange,
        BallColour::Black,
    ];

    /// Parse a config colour name (case-insensitive). Unknown names give `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn name(self) -> &'static str {
        match self {
            BallColour::White => "white",
            BallColour::Red => "red",
            BallColour::Yellow => "yellow",
            BallColour::Green => "green",
            BallColour::Brown => "brown",
            BallColour::Blue => "blue",
            BallColour::Purple => "purple",
            BallColour::Orange => "orange",
            BallColour::Black => "black",
        }
    }

    /// Points for pocketing a ball of this colour.
    pub fn points(self) -> u32 {
        match self {
            BallColour::White => 0,
            BallColour::Red => 1,
            BallColour::Yellow => 2,
            BallColour::Green => 3,
            BallColour::Brown => 4,
            BallColour::Blue => 5,
            BallColour::Purple => 6,
            BallColour::Orange => 7,
            BallColour::Black => 8,
        }
    }

    /// Numeric code for the render buffer (index into `ALL`).
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// The role a ball of this colour plays on the table.
    pub fn role(self) -> BallRole {
        match self {
            BallColour::White => BallRole::Cue,
            _ => BallRole::Numbered,
        }
    }
}

/// What a ball is for, independent of how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallRole {
    /// Struck by the player. Never scores, never counts toward the win.
    Cue,
    Numbered,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    id: BallId,
    colour: BallColour,
    role: BallRole,
    radius: f64,
    pos: DVec2,
    vel: DVec2,
    disabled: bool,
    fall_counter: u32,
    /// Setup position, restored by `reset`.
    origin: DVec2,
}

impl Ball {
    /// Create an enabled, stationary ball. The role follows the colour.
    pub fn new(id: BallId, colour: BallColour, pos: DVec2, radius: f64) -> Self {
        Self {
            id,
            colour,
            role: colour.role(),
            radius,
            pos,
            vel: DVec2::ZERO,
            disabled: false,
            fall_counter: 0,
            origin: pos,
        }
    }

    pub fn with_velocity(mut self, vel: DVec2) -> Self {
        self.vel = vel;
        self
    }

    // -- Accessors --

    pub fn id(&self) -> BallId {
        self.id
    }

    pub fn colour(&self) -> BallColour {
        self.colour
    }

    pub fn role(&self) -> BallRole {
        self.role
    }

    pub fn is_cue(&self) -> bool {
        self.role == BallRole::Cue
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn pos(&self) -> DVec2 {
        self.pos
    }

    pub fn vel(&self) -> DVec2 {
        self.vel
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn fall_counter(&self) -> u32 {
        self.fall_counter
    }

    pub fn is_at_rest(&self) -> bool {
        self.vel == DVec2::ZERO
    }

    /// Points awarded when this ball is captured. Cue balls are worth nothing.
    pub fn points(&self) -> u32 {
        match self.role {
            BallRole::Cue => 0,
            BallRole::Numbered => self.colour.points(),
        }
    }

    // -- Physics --

    /// Advance one tick.
    pub fn integrate(&mut self) {
        if self.disabled {
            return;
        }
        self.pos += self.vel;
    }

    /// Scale speed by `1 - friction`. A ball already slower than
    /// `REST_SPEED` is stopped instead.
    pub fn apply_friction(&mut self, friction: f64) {
        if self.disabled {
            return;
        }
        if self.vel.length() < REST_SPEED {
            self.vel = DVec2::ZERO;
        } else {
            self.vel *= 1.0 - friction;
        }
    }

    pub fn is_colliding_with(&self, other: &Ball) -> bool {
        self.id != other.id
            && !self.disabled
            && !other.disabled
            && geometry::circles_overlap(self.pos, self.radius, other.pos, other.radius)
    }

    /// Equal-mass elastic response along the line of centres: the normal
    /// components of the two velocities are exchanged, tangential components
    /// are kept. Positions are not separated.
    ///
    /// Only an approaching pair is resolved, so a pair that is still
    /// overlapping on the next tick does not swap back. Returns whether
    /// velocities changed.
    pub fn resolve_collision_with(&mut self, other: &mut Ball) -> bool {
        let delta = other.pos - self.pos;
        let dist = delta.length();
        if dist <= f64::EPSILON {
            return false;
        }
        let normal = delta / dist;
        let closing = (self.vel - other.vel).dot(normal);
        if closing <= 0.0 {
            return false;
        }
        let impulse = normal * closing;
        self.vel -= impulse;
        other.vel += impulse;
        true
    }

    /// Keep the ball inside `bounds`. On each axis where the circle pokes
    /// out, the velocity is turned back inward and the edge of the ball is
    /// placed exactly on the boundary. Returns whether anything changed.
    pub fn reflect_off_boundary(&mut self, bounds: &Bounds) -> bool {
        if self.disabled || bounds.contains_circle(self.pos, self.radius) {
            return false;
        }
        let r = self.radius;
        if self.pos.x + r > bounds.max.x {
            self.vel.x = -self.vel.x.abs();
            self.pos.x = bounds.max.x - r;
        } else if self.pos.x - r < bounds.min.x {
            self.vel.x = self.vel.x.abs();
            self.pos.x = bounds.min.x + r;
        }
        if self.pos.y + r > bounds.max.y {
            self.vel.y = -self.vel.y.abs();
            self.pos.y = bounds.max.y - r;
        } else if self.pos.y - r < bounds.min.y {
            self.vel.y = self.vel.y.abs();
            self.pos.y = bounds.min.y + r;
        }
        true
    }

    /// Capture: the ball leaves play. Scoring is the table's job.
    pub fn fall_into_pocket(&mut self) {
        self.disabled = true;
        self.vel = DVec2::ZERO;
        self.fall_counter += 1;
    }

    /// Set the velocity from an external shot. Ignored for disabled balls
    /// and for a zero vector. Returns whether the shot was taken.
    pub fn strike(&mut self, vel: DVec2) -> bool {
        if self.disabled || vel == DVec2::ZERO || !vel.is_finite() {
            return false;
        }
        self.vel = vel;
        true
    }

    /// Back to the setup state: origin position, at rest, enabled, never captured.
    pub fn reset(&mut self) {
        self.pos = self.origin;
        self.vel = DVec2::ZERO;
        self.disabled = false;
        self.fall_counter = 0;
    }

    /// Overwrite state from a snapshot. Velocity is always cleared.
    pub(crate) fn restore(&mut self, pos: DVec2, disabled: bool, fall_counter: u32) {
        self.pos = pos;
        self.vel = DVec2::ZERO;
        self.disabled = disabled;
        self.fall_counter = fall_counter;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn ball(id: u32, colour: BallColour, x: f64, y: f64) -> Ball {
        Ball::new(BallId(id), colour, DVec2::new(x, y), 10.0)
    }

    #[test]
    fn colour_names_parse_case_insensitively() {
        assert_eq!(BallColour::from_name("RED"), Some(BallColour::Red));
        assert_eq!(BallColour::from_name(" white "), Some(BallColour::White));
        assert_eq!(BallColour::from_name("magenta"), None);
    }

    #[test]
    fn scoring_table() {
        let points: Vec<u32> = BallColour::ALL.iter().map(|c| c.points()).collect();
        assert_eq!(points, vec![0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn white_is_cue_and_worth_nothing() {
        let cue = ball(0, BallColour::White, 0.0, 0.0);
        assert!(cue.is_cue());
        assert_eq!(cue.points(), 0);
        let black = ball(1, BallColour::Black, 0.0, 0.0);
        assert_eq!(black.role(), BallRole::Numbered);
        assert_eq!(black.points(), 8);
    }

    #[test]
    fn integrate_adds_velocity() {
        let mut b = ball(0, BallColour::Red, 100.0, 100.0).with_velocity(DVec2::new(3.0, -2.0));
        b.integrate();
        assert_eq!(b.pos(), DVec2::new(103.0, 98.0));
    }

    #[test]
    fn disabled_ball_does_not_move() {
        let mut b = ball(0, BallColour::Red, 100.0, 100.0);
        b.fall_into_pocket();
        assert!(!b.strike(DVec2::new(5.0, 0.0)));
        b.integrate();
        b.apply_friction(0.5);
        assert_eq!(b.pos(), DVec2::new(100.0, 100.0));
        assert_eq!(b.vel(), DVec2::ZERO);
    }

    #[test]
    fn friction_reduces_speed_without_reversing() {
        let mut b = ball(0, BallColour::Red, 0.0, 0.0).with_velocity(DVec2::new(4.0, -3.0));
        let before = b.vel();
        for _ in 0..50 {
            let speed = b.vel().length();
            b.apply_friction(0.1);
            assert!(b.vel().length() < speed);
            assert!(b.vel().dot(before) >= 0.0, "velocity reversed: {:?}", b.vel());
        }
    }

    #[test]
    fn friction_snaps_slow_ball_to_rest() {
        let mut b = ball(0, BallColour::Red, 0.0, 0.0).with_velocity(DVec2::new(0.005, 0.0));
        b.apply_friction(0.01);
        assert!(b.is_at_rest());
    }

    #[test]
    fn head_on_collision_swaps_velocities() {
        let mut a = ball(0, BallColour::White, 100.0, 200.0).with_velocity(DVec2::new(3.0, 0.0));
        let mut b = ball(1, BallColour::Red, 115.0, 200.0).with_velocity(DVec2::new(-2.0, 0.0));
        let energy = a.vel().length_squared() + b.vel().length_squared();
        assert!(a.is_colliding_with(&b));
        assert!(a.resolve_collision_with(&mut b));
        assert!((a.vel() - DVec2::new(-2.0, 0.0)).length() < EPS);
        assert!((b.vel() - DVec2::new(3.0, 0.0)).length() < EPS);
        let after = a.vel().length_squared() + b.vel().length_squared();
        assert!((energy - after).abs() < EPS);
    }

    #[test]
    fn glancing_collision_keeps_tangential_component() {
        // Normal along +x, incoming velocity has a y component.
        let mut a = ball(0, BallColour::White, 0.0, 0.0).with_velocity(DVec2::new(4.0, 1.5));
        let mut b = ball(1, BallColour::Red, 18.0, 0.0);
        assert!(a.resolve_collision_with(&mut b));
        assert!((a.vel() - DVec2::new(0.0, 1.5)).length() < EPS);
        assert!((b.vel() - DVec2::new(4.0, 0.0)).length() < EPS);
    }

    #[test]
    fn separating_pair_is_left_alone() {
        let mut a = ball(0, BallColour::White, 0.0, 0.0).with_velocity(DVec2::new(-1.0, 0.0));
        let mut b = ball(1, BallColour::Red, 15.0, 0.0).with_velocity(DVec2::new(1.0, 0.0));
        assert!(!a.resolve_collision_with(&mut b));
        assert_eq!(a.vel(), DVec2::new(-1.0, 0.0));
    }

    #[test]
    fn ball_does_not_collide_with_itself_or_disabled() {
        let a = ball(0, BallColour::White, 0.0, 0.0);
        assert!(!a.is_colliding_with(&a.clone()));
        let mut b = ball(1, BallColour::Red, 5.0, 0.0);
        assert!(a.is_colliding_with(&b));
        b.fall_into_pocket();
        assert!(!a.is_colliding_with(&b));
    }

    #[test]
    fn reflection_keeps_ball_inside_and_points_inward() {
        let bounds = Bounds::from_size(800.0, 400.0);
        let mut b = ball(0, BallColour::Red, 795.0, 3.0).with_velocity(DVec2::new(6.0, -4.0));
        assert!(b.reflect_off_boundary(&bounds));
        assert!(bounds.contains_circle(b.pos(), b.radius()));
        assert_eq!(b.pos(), DVec2::new(790.0, 10.0));
        assert!(b.vel().x < 0.0);
        assert!(b.vel().y > 0.0);
    }

    #[test]
    fn reflection_does_not_flip_an_already_inward_velocity() {
        let bounds = Bounds::from_size(800.0, 400.0);
        let mut b = ball(0, BallColour::Red, 5.0, 200.0).with_velocity(DVec2::new(2.0, 0.0));
        b.reflect_off_boundary(&bounds);
        assert_eq!(b.pos().x, 10.0);
        assert_eq!(b.vel().x, 2.0);
    }

    #[test]
    fn fall_into_pocket_disables_and_counts() {
        let mut b = ball(0, BallColour::Blue, 5.0, 5.0).with_velocity(DVec2::new(1.0, 1.0));
        b.fall_into_pocket();
        assert!(b.is_disabled());
        assert!(b.is_at_rest());
        assert_eq!(b.fall_counter(), 1);
    }

    #[test]
    fn strike_rejects_zero_vector() {
        let mut b = ball(0, BallColour::White, 50.0, 50.0);
        assert!(!b.strike(DVec2::ZERO));
        assert!(b.strike(DVec2::new(0.0, 2.0)));
        assert_eq!(b.vel(), DVec2::new(0.0, 2.0));
    }

    #[test]
    fn reset_returns_to_origin() {
        let mut b = ball(0, BallColour::Green, 50.0, 50.0);
        b.strike(DVec2::new(5.0, 0.0));
        b.integrate();
        b.fall_into_pocket();
        b.reset();
        assert_eq!(b.pos(), DVec2::new(50.0, 50.0));
        assert!(!b.is_disabled());
        assert_eq!(b.fall_counter(), 0);
        assert!(b.is_at_rest());
    }
}
