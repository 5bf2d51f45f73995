//! Game state and core simulation types
//!
//! Everything one scene instance owns lives here: the bird, the ground strip,
//! the pipe pool, the seeded RNG and the current phase.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::pipes::PipeSystem;
use crate::consts::*;
use crate::settings::Settings;

/// Opaque handle to a drawable owned by the host engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(pub u32);

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// "Get ready" prompt, waiting for the first tap
    Ready,
    /// Bird under physics, pipes scrolling
    Running,
    /// Run ended, waiting for restart
    Over,
}

/// Side effects of a tick, for the host to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ready -> Running
    Started,
    /// Tap during a run
    Flapped,
    /// A pipe was passed; carries the new score
    Scored(u32),
    /// The bird just died (emitted once per run)
    BirdDied,
    /// Over -> Ready
    Restarted,
}

/// The player's bird
#[derive(Debug, Clone)]
pub struct Bird {
    pub entity: Entity,
    pub pos: Vec2,
    /// Vertical velocity (positive is up)
    pub vy: f32,
    /// Tilt in radians (positive is nose up)
    pub rotation: f32,
    pub alive: bool,
    pub size: Vec2,
}

impl Bird {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            pos: Vec2::new(BIRD_START_X, BIRD_START_Y),
            vy: 0.0,
            rotation: 0.0,
            alive: true,
            size: Vec2::new(BIRD_WIDTH, BIRD_HEIGHT),
        }
    }

    /// Back to the ready pose: start position, at rest, level, alive
    pub fn reset(&mut self) {
        self.pos = Vec2::new(BIRD_START_X, BIRD_START_Y);
        self.vy = 0.0;
        self.rotation = 0.0;
        self.alive = true;
    }

    /// Mark dead; returns false if it already was
    pub fn kill(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }

    /// Tilt toward the max angle while climbing fast, toward the min angle
    /// while falling fast, otherwise hold
    pub fn update_rotation(&mut self, dt: f32) {
        let step = ANGULAR_VELOCITY * dt;
        if self.vy > ROT_TRIGGER && self.rotation < MAX_ANGLE {
            self.rotation = crate::approach(self.rotation, MAX_ANGLE, step);
        } else if self.vy < -ROT_TRIGGER && self.rotation > MIN_ANGLE {
            self.rotation = crate::approach(self.rotation, MIN_ANGLE, step);
        }
    }
}

/// Scrolling ground strip
#[derive(Debug, Clone)]
pub struct Ground {
    pub entity: Entity,
    pub x: f32,
}

impl Ground {
    pub fn new(entity: Entity) -> Self {
        Self { entity, x: 0.0 }
    }

    /// Scroll left; past the wrap limit, nudge forward by one stripe period
    pub fn scroll(&mut self, speed: f32, dt: f32) {
        self.x -= speed * dt;
        if self.x < GROUND_WRAP_LIMIT {
            self.x += GROUND_WRAP_OFFSET;
        }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, FLOOR_Y)
    }
}

/// Bird and scroll tuning copied out of `Settings`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    pub gravity: f32,
    pub tap_impulse: f32,
    pub scroll_speed: f32,
}

impl From<&Settings> for Physics {
    fn from(s: &Settings) -> Self {
        Self {
            gravity: s.gravity,
            tap_impulse: s.tap_impulse,
            scroll_speed: s.scroll_speed,
        }
    }
}

/// Sprite handles the state is bound to
#[derive(Debug, Clone, Copy)]
pub struct Handles {
    pub bird: Entity,
    pub ground: Entity,
    /// First pipe handle; pipes take consecutive pairs after it
    pub first_pipe: u32,
}

impl Default for Handles {
    fn default() -> Self {
        Self {
            bird: Entity(0),
            ground: Entity(1),
            first_pipe: 2,
        }
    }
}

/// Complete game state for one scene
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub physics: Physics,
    pub bird: Bird,
    pub ground: Ground,
    pub pipes: PipeSystem,
    /// Pipes passed this run
    pub score: u32,
    /// Best score this session
    pub best_score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised by the latest tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with sequential default handles
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let handles = Handles::default();
        let pipes = PipeSystem::with_capacity(settings.pipe_capacity, handles.first_pipe);
        Self::with_pipes(settings, seed, handles.bird, handles.ground, pipes)
    }

    /// Create a game state around an already-bound pipe pool
    pub fn with_pipes(
        settings: &Settings,
        seed: u64,
        bird: Entity,
        ground: Entity,
        mut pipes: PipeSystem,
    ) -> Self {
        pipes.set_delay(settings.pipe_delay);
        pipes.set_rate(settings.pipe_rate);
        pipes.set_gap(settings.pipe_gap);
        pipes.set_limit(settings.pipe_max_height, settings.pipe_min_height);
        pipes.set_velocity(settings.scroll_speed);
        pipes.start_scroll();

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Ready,
            physics: Physics::from(settings),
            bird: Bird::new(bird),
            ground: Ground::new(ground),
            pipes,
            score: 0,
            best_score: 0,
            time_ticks: 0,
            events: Vec::with_capacity(8),
        }
    }

    /// Kill the bird and end the run; a second call does nothing
    pub fn die(&mut self) {
        if !self.bird.kill() {
            return;
        }
        self.pipes.stop_scroll();
        self.phase = GamePhase::Over;
        self.best_score = self.best_score.max(self.score);
        self.events.push(GameEvent::BirdDied);
        log::info!(
            "Game over after {} ticks (score {}, best {})",
            self.time_ticks,
            self.score,
            self.best_score
        );
    }

    /// Back to Ready with a fresh bird and an empty field
    pub fn restart(&mut self) {
        self.phase = GamePhase::Ready;
        self.bird.reset();
        self.score = 0;
        self.pipes.reset();
        self.pipes.start_scroll();
        self.events.push(GameEvent::Restarted);
        log::info!("Game restarted");
    }
}
