//! Platform abstraction layer
//!
//! The narrow set of host-engine services the game talks to:
//! - Sprite creation and transforms
//! - Input polling
//! - Flipbook animation control
//!
//! `Headless` implements all of them in memory, for tests and the native runner.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use crate::sim::Entity;

/// Opaque texture handle, passed through to the host untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Logical buttons the game polls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Primary pointer button / touch / space
    Tap,
    /// On-screen restart control
    Restart,
}

/// Creates drawables (called at scene entry only)
pub trait SpriteFactory {
    /// `anchor` is the normalized pivot inside the sprite, `(0.5, 0.5)` = centre
    fn spawn_sprite(
        &mut self,
        texture: TextureId,
        size: Vec2,
        anchor: Vec2,
        z_order: i32,
    ) -> Entity;
}

/// Positions and rotates drawables
pub trait Transforms {
    fn set_position(&mut self, entity: Entity, pos: Vec2);
    fn set_rotation(&mut self, entity: Entity, angle: f32);
}

/// Polled once per tick
pub trait Input {
    fn was_just_pressed(&self, button: Button) -> bool;
}

/// Flipbook animation playback
pub trait Animation {
    fn play(&mut self, entity: Entity, name: &str);
    fn stop(&mut self, entity: Entity);
}

/// Everything a running scene needs from the host
pub trait Platform: Transforms + Input + Animation {}

impl<T: Transforms + Input + Animation> Platform for T {}

/// One recorded animation command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationCall {
    Play(Entity, String),
    Stop(Entity),
}

/// In-memory host: records every call, replays queued button presses
#[derive(Debug, Default)]
pub struct Headless {
    next_entity: u32,
    pub textures: HashMap<Entity, TextureId>,
    pub positions: HashMap<Entity, Vec2>,
    pub rotations: HashMap<Entity, f32>,
    pub animations: Vec<AnimationCall>,
    pressed: HashSet<Button>,
}

impl Headless {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `button` as just pressed until the next `end_frame`
    pub fn press(&mut self, button: Button) {
        self.pressed.insert(button);
    }

    /// Clear one-shot input
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }

    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        self.positions.get(&entity).copied()
    }

    pub fn rotation(&self, entity: Entity) -> Option<f32> {
        self.rotations.get(&entity).copied()
    }

    pub fn stop_count(&self, entity: Entity) -> usize {
        self.animations
            .iter()
            .filter(|c| **c == AnimationCall::Stop(entity))
            .count()
    }
}

impl SpriteFactory for Headless {
    fn spawn_sprite(
        &mut self,
        texture: TextureId,
        _size: Vec2,
        _anchor: Vec2,
        _z_order: i32,
    ) -> Entity {
        let entity = Entity(self.next_entity);
        self.next_entity += 1;
        self.textures.insert(entity, texture);
        entity
    }
}

impl Transforms for Headless {
    fn set_position(&mut self, entity: Entity, pos: Vec2) {
        self.positions.insert(entity, pos);
    }

    fn set_rotation(&mut self, entity: Entity, angle: f32) {
        self.rotations.insert(entity, angle);
    }
}

impl Input for Headless {
    fn was_just_pressed(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }
}

impl Animation for Headless {
    fn play(&mut self, entity: Entity, name: &str) {
        self.animations.push(AnimationCall::Play(entity, name.to_string()));
    }

    fn stop(&mut self, entity: Entity) {
        self.animations.push(AnimationCall::Stop(entity));
    }
}
