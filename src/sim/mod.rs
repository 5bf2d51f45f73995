//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (pipes in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod pipe;
pub mod pipes;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionResult, overlap_ab};
pub use pipe::{Pipe, PipeHalf};
pub use pipes::{PipeSystem, Timer};
pub use state::{Bird, Entity, GameEvent, GamePhase, GameState, Ground, Handles, Physics};
pub use tick::{TickInput, tick};
