use bytemuck::{Pod, Zeroable};

use crate::core::ball::{Ball, BallRole};

/// Per-ball render data handed to the host renderer.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BallInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// `BallColour::as_u8()`.
    pub colour: f32,
    /// 1.0 on the table, 0.0 once pocketed.
    pub enabled: f32,
    /// 1.0 for the cue ball.
    pub cue: f32,
    pub fall_counter: f32,
    /// Setup index of the ball.
    pub id: f32,
}

impl BallInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

impl From<&Ball> for BallInstance {
    fn from(ball: &Ball) -> Self {
        let pos = ball.pos();
        Self {
            x: pos.x as f32,
            y: pos.y as f32,
            radius: ball.radius() as f32,
            colour: ball.colour().as_u8() as f32,
            enabled: if ball.is_disabled() { 0.0 } else { 1.0 },
            cue: if ball.role() == BallRole::Cue { 1.0 } else { 0.0 },
            fall_counter: ball.fall_counter() as f32,
            id: ball.id().0 as f32,
        }
    }
}

/// Ball instances for one frame, in table order.
pub struct RenderBuffer {
    pub instances: Vec<BallInstance>,
    capacity: usize,
}

impl RenderBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild from the table's balls. Balls past capacity are not drawn.
    pub fn rebuild<'a>(&mut self, balls: impl IntoIterator<Item = &'a Ball>) {
        self.instances.clear();
        for ball in balls.into_iter().take(self.capacity) {
            self.instances.push(BallInstance::from(ball));
        }
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raw pointer to instance data for host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::with_capacity(32)
    }
}
