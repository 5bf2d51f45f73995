//! A single pipe: paired top/bottom halves scrolling left together

use glam::Vec2;

use super::collision::Aabb;
use super::state::Entity;
use crate::consts::*;

/// One half of a pipe and the host sprite that draws it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeHalf {
    pub entity: Entity,
    pub pos: Vec2,
}

/// A pipe pair. Lives in a pool slot for the whole game; never destroyed.
#[derive(Debug, Clone)]
pub struct Pipe {
    /// Upper half, anchored at its bottom edge (the gap ceiling)
    pub top: PipeHalf,
    /// Lower half, anchored at its top edge (the gap floor)
    pub bottom: PipeHalf,
    /// Height of the gap floor
    pub height_base: f32,
    pub active: bool,
    pub x: f32,
    /// Leftward speed (pixels/s)
    pub vx: f32,
    /// Whether the bird has already been credited for passing this pipe
    pub scored: bool,
}

impl Pipe {
    /// Bind the pair of sprites and park them off screen
    pub fn initialize(top: Entity, bottom: Entity) -> Self {
        let mut pipe = Self {
            top: PipeHalf {
                entity: top,
                pos: Vec2::ZERO,
            },
            bottom: PipeHalf {
                entity: bottom,
                pos: Vec2::ZERO,
            },
            height_base: 0.0,
            active: false,
            x: PIPE_PARK_X,
            vx: SCROLL_VELOCITY,
            scored: false,
        };
        pipe.park();
        pipe
    }

    /// Bring the pipe into play at `x` with its gap spanning
    /// `height_base..height_base + gap`
    pub fn reset(&mut self, x: f32, height_base: f32, gap: f32) {
        self.active = true;
        self.scored = false;
        self.x = x;
        self.height_base = height_base;
        self.top.pos = Vec2::new(x, height_base + gap);
        self.bottom.pos = Vec2::new(x, height_base);
    }

    /// Scroll left; retire once past the cull line (position is kept)
    pub fn update(&mut self, dt: f32) {
        self.x -= self.vx * dt;
        if self.x < PIPE_CULL_X {
            self.active = false;
        }

        self.top.pos.x = self.x;
        self.bottom.pos.x = self.x;
    }

    /// Move both halves off screen and take the pipe out of play
    pub fn park(&mut self) {
        self.active = false;
        self.x = PIPE_PARK_X;
        self.top.pos = Vec2::new(PIPE_PARK_X, PIPE_PARK_TOP_Y);
        self.bottom.pos = Vec2::new(PIPE_PARK_X, PIPE_PARK_BOTTOM_Y);
    }

    /// Hit box of the upper half
    pub fn top_box(&self) -> Aabb {
        Aabb::new(
            self.top.pos.x - PIPE_HALF_WIDTH,
            self.top.pos.y,
            PIPE_WIDTH,
            PIPE_HEIGHT,
        )
    }

    /// Hit box of the lower half
    pub fn bottom_box(&self) -> Aabb {
        Aabb::new(
            self.bottom.pos.x - PIPE_HALF_WIDTH,
            self.bottom.pos.y - PIPE_HEIGHT,
            PIPE_WIDTH,
            PIPE_HEIGHT,
        )
    }
}
