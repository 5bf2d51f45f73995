//! Game scene: binds the simulation to the host engine
//!
//! Creates the sprites once at scene entry, then per frame polls input, runs
//! one `tick`, forwards the resulting events to the animation service and
//! pushes every transform back to the host.

use glam::Vec2;

use crate::consts::*;
use crate::platform::{Animation, Button, Input, Platform, SpriteFactory, TextureId, Transforms};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, PipeSystem, TickInput, tick};

/// Flipbook name of the bird's wing-flap loop
pub const FLYING: &str = "flying";

/// Textures the scene draws with
#[derive(Debug, Clone, Copy)]
pub struct Textures {
    pub bird: TextureId,
    pub ground: TextureId,
    pub pipe_top: TextureId,
    pub pipe_bottom: TextureId,
}

/// One running game
#[derive(Debug)]
pub struct GameScene {
    state: GameState,
    idle_mode: bool,
}

impl GameScene {
    /// Create the bird, ground and every pipe sprite, and arm the pipe pool
    pub fn enter<S: SpriteFactory>(
        settings: &Settings,
        seed: u64,
        textures: &Textures,
        sprites: &mut S,
    ) -> Self {
        let bird = sprites.spawn_sprite(
            textures.bird,
            Vec2::new(BIRD_WIDTH, BIRD_HEIGHT),
            Vec2::splat(0.5),
            2,
        );
        let ground = sprites.spawn_sprite(
            textures.ground,
            Vec2::new(GROUND_WIDTH, GROUND_HEIGHT),
            Vec2::new(0.0, 1.0),
            1,
        );

        let pipe_size = Vec2::new(PIPE_WIDTH, PIPE_HEIGHT);
        let pipes = PipeSystem::initialize(settings.pipe_capacity, |_| {
            // Top half hangs from the gap ceiling, bottom half stands on the gap floor
            let top = sprites.spawn_sprite(textures.pipe_top, pipe_size, Vec2::new(0.5, 0.0), 0);
            let bottom =
                sprites.spawn_sprite(textures.pipe_bottom, pipe_size, Vec2::new(0.5, 1.0), 0);
            (top, bottom)
        });

        log::info!(
            "Scene entered with seed {} ({} pipe slots)",
            seed,
            settings.pipe_capacity
        );

        Self {
            state: GameState::with_pipes(settings, seed, bird, ground, pipes),
            idle_mode: false,
        }
    }

    /// Place every sprite and start the bird's flap loop
    pub fn start<P: Platform>(&self, host: &mut P) {
        self.sync(host);
        host.play(self.state.bird.entity, FLYING);
    }

    /// Run one frame
    pub fn update<P: Platform>(&mut self, dt: f32, host: &mut P) {
        let input = TickInput {
            tap: host.was_just_pressed(Button::Tap),
            restart: host.was_just_pressed(Button::Restart),
            idle_mode: self.idle_mode,
        };
        tick(&mut self.state, &input, dt);

        let bird = self.state.bird.entity;
        for event in &self.state.events {
            match event {
                GameEvent::BirdDied => host.stop(bird),
                GameEvent::Restarted => host.play(bird, FLYING),
                GameEvent::Started | GameEvent::Flapped | GameEvent::Scored(_) => {}
            }
        }

        self.sync(host);
    }

    /// Push the simulation's transforms to the host
    fn sync<T: Transforms>(&self, host: &mut T) {
        let bird = &self.state.bird;
        host.set_position(bird.entity, bird.pos);
        host.set_rotation(bird.entity, bird.rotation);

        let ground = &self.state.ground;
        host.set_position(ground.entity, ground.pos());

        for pipe in self.state.pipes.pipes() {
            host.set_position(pipe.top.entity, pipe.top.pos);
            host.set_position(pipe.bottom.entity, pipe.bottom.pos);
        }
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.idle_mode = idle;
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
