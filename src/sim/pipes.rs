//! Pipe pool and spawner
//!
//! A fixed arena of pipe slots, allocated once. Slots move between an ordered
//! in-flight queue (oldest first, which is also leftmost first) and an
//! unordered free list. New pipes are only ever pushed at the back of the
//! queue and retired pipes only popped from the front, so the inactive pipes
//! always form a prefix of the queue and recycling never scans past the first
//! live pipe.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;

use super::collision::{Aabb, CollisionResult};
use super::pipe::Pipe;
use super::state::Entity;
use crate::consts::*;

/// Elapsed-time accumulator compared against a limit
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timer {
    pub elapsed: f32,
    pub limit: f32,
}

impl Timer {
    /// Slack absorbing f32 drift when summing many small steps
    const EPSILON: f32 = 1e-4;

    pub fn new(limit: f32) -> Self {
        Self {
            elapsed: 0.0,
            limit,
        }
    }

    #[inline]
    pub fn done(&self) -> bool {
        self.elapsed + Self::EPSILON >= self.limit
    }

    pub fn rearm(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Uniform sample in `[min, max)`; an empty, inverted or unbounded range
/// yields `min`
pub fn uniform<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min && (max - min).is_finite() {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// Pool of pipes with timed spawning and oldest-first recycling
#[derive(Debug, Clone)]
pub struct PipeSystem {
    gap: f32,
    /// Upper bound of the random gap-floor height
    top: f32,
    /// Lower bound of the random gap-floor height
    bottom: f32,
    respawn_x: f32,
    scroll: bool,

    delay: Timer,
    generate: Timer,

    /// Slot indices in spawn order
    in_flight: VecDeque<usize>,
    /// Slot indices ready for reuse
    free: Vec<usize>,

    pool: Vec<Pipe>,
}

impl PipeSystem {
    /// Allocate `capacity` pipes up front; `bind` supplies the top/bottom
    /// sprite handles for each slot.
    pub fn initialize<F>(capacity: usize, mut bind: F) -> Self
    where
        F: FnMut(usize) -> (Entity, Entity),
    {
        let pool: Vec<Pipe> = (0..capacity)
            .map(|i| {
                let (top, bottom) = bind(i);
                Pipe::initialize(top, bottom)
            })
            .collect();

        // Reserve both lists at full size so steady-state play never allocates
        let mut free = Vec::with_capacity(capacity);
        free.extend(0..capacity);

        Self {
            gap: PIPE_GAP,
            top: PIPE_MAX_HEIGHT,
            bottom: PIPE_MIN_HEIGHT,
            respawn_x: PIPE_RESPAWN_X,
            scroll: false,
            delay: Timer::new(0.0),
            generate: Timer::new(0.0),
            in_flight: VecDeque::with_capacity(capacity),
            free,
            pool,
        }
    }

    /// Pool with sequential sprite handles starting at `first_entity`
    pub fn with_capacity(capacity: usize, first_entity: u32) -> Self {
        Self::initialize(capacity, |i| {
            let base = first_entity + 2 * i as u32;
            (Entity(base), Entity(base + 1))
        })
    }

    /// Grace period after `start_scroll` before anything spawns
    pub fn set_delay(&mut self, seconds: f32) {
        self.delay.limit = seconds;
    }

    /// Seconds between spawns
    pub fn set_rate(&mut self, seconds: f32) {
        self.generate.limit = seconds;
    }

    /// Vertical opening between top and bottom halves
    pub fn set_gap(&mut self, gap: f32) {
        self.gap = gap;
    }

    /// Random gap-floor height range, from `bottom` to `top`
    pub fn set_limit(&mut self, top: f32, bottom: f32) {
        self.top = top;
        self.bottom = bottom;
    }

    /// Scroll speed of every slot
    pub fn set_velocity(&mut self, vx: f32) {
        for pipe in &mut self.pool {
            pipe.vx = vx;
        }
    }

    pub fn start_scroll(&mut self) {
        self.scroll = true;
        self.delay.rearm();
    }

    pub fn stop_scroll(&mut self) {
        self.scroll = false;
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll
    }

    /// Advance spawning, movement and recycling by `dt`
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        if !self.scroll {
            return;
        }

        if !self.delay.done() {
            self.delay.elapsed += dt;
            return;
        }

        // At most one spawn per tick; missed periods are dropped
        self.generate.elapsed += dt;
        if self.generate.done() {
            self.generate.rearm();
            self.new_pipe(rng);
        }

        for &slot in &self.in_flight {
            self.pool[slot].update(dt);
        }

        self.recycle();
    }

    /// Take the whole field out of play: every in-flight pipe is parked off
    /// screen, deactivated and handed back to the free list.
    pub fn reset(&mut self) {
        for &slot in &self.in_flight {
            self.pool[slot].park();
        }
        self.recycle();
        self.generate.rearm();
        self.delay.rearm();
    }

    fn new_pipe<R: Rng>(&mut self, rng: &mut R) {
        let Some(slot) = self.free.pop() else {
            log::debug!("Pipe pool exhausted, spawn skipped");
            return;
        };
        let height = uniform(rng, self.bottom, self.top);
        self.in_flight.push_back(slot);
        self.pool[slot].reset(self.respawn_x, height, self.gap);
        log::debug!("Spawned pipe {} at height {:.1}", slot, height);
    }

    /// Move the retired prefix of the queue to the free list
    fn recycle(&mut self) {
        while let Some(&slot) = self.in_flight.front() {
            if self.pool[slot].active {
                break;
            }
            self.in_flight.pop_front();
            self.free.push(slot);
            log::debug!("Recycled pipe {}", slot);
        }
    }

    /// Test the bird against every in-flight pipe
    ///
    /// The bird box is shrunk by `HIT_TOLERANCE` on both axes so grazes are
    /// forgiven. Returns on the first hit.
    pub fn check_collision(&self, bird_pos: Vec2, bird_size: Vec2) -> CollisionResult {
        let size = bird_size - Vec2::splat(HIT_TOLERANCE);
        let bird = Aabb::centered(bird_pos, size);

        for pipe in self.in_flight() {
            let top = pipe.top_box();
            if bird.overlaps(&top) {
                return CollisionResult::hit(bird.x - top.x);
            }

            let bottom = pipe.bottom_box();
            if bird.overlaps(&bottom) {
                return CollisionResult::hit(bird.x - top.x);
            }
        }

        CollisionResult::miss()
    }

    /// Credit every live pipe whose centre has passed `bird_x`; returns how
    /// many were newly passed
    pub fn count_passed(&mut self, bird_x: f32) -> u32 {
        let mut passed = 0;
        for &slot in &self.in_flight {
            let pipe = &mut self.pool[slot];
            if pipe.active && !pipe.scored && pipe.x < bird_x {
                pipe.scored = true;
                passed += 1;
            }
        }
        passed
    }

    /// First live pipe whose right edge is still ahead of `x`
    pub fn next_ahead(&self, x: f32) -> Option<&Pipe> {
        self.in_flight()
            .find(|p| p.active && p.x + PIPE_HALF_WIDTH >= x)
    }

    /// In-flight pipes, oldest first
    pub fn in_flight(&self) -> impl Iterator<Item = &Pipe> + '_ {
        self.in_flight.iter().map(move |&slot| &self.pool[slot])
    }

    /// Every slot, whether in play or not
    pub fn pipes(&self) -> &[Pipe] {
        &self.pool
    }

    pub fn capacity(&self) -> usize {
        self.pool.len()
    }

    pub fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    pub fn active_count(&self) -> usize {
        self.pool.iter().filter(|p| p.active).count()
    }

    #[cfg(test)]
    fn slots(&self) -> (Vec<usize>, Vec<usize>) {
        (self.in_flight.iter().copied().collect(), self.free.clone())
    }
}
