//! Fixed timestep simulation tick
//!
//! One explicit state-machine step per frame: `(state, input, dt)` in, mutated
//! state and a list of `GameEvent`s out. No rendering, no input polling.

use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Tap / click / space this frame
    pub tap: bool,
    /// Restart control activated
    pub restart: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one step
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    let mut input = *input;
    if input.idle_mode {
        input.tap = autopilot_tap(state);
    }

    match state.phase {
        GamePhase::Ready => {
            state.time_ticks += 1;
            tick_ready(state, &input, dt);
        }
        GamePhase::Running => {
            state.time_ticks += 1;
            tick_running(state, &input, dt);
        }
        GamePhase::Over => tick_over(state, &input),
    }
}

fn tick_ready(state: &mut GameState, input: &TickInput, dt: f32) {
    state.ground.scroll(state.physics.scroll_speed, dt);

    if input.tap {
        state.bird.reset();
        state.phase = GamePhase::Running;
        state.events.push(GameEvent::Started);
        log::info!("Run started (seed {})", state.seed);
    }
}

fn tick_running(state: &mut GameState, input: &TickInput, dt: f32) {
    let physics = state.physics;
    let bird = &mut state.bird;

    // A tap sets the climb speed outright; taps do not stack
    if input.tap {
        bird.vy = physics.tap_impulse;
        state.events.push(GameEvent::Flapped);
    }
    bird.vy -= physics.gravity * dt;
    bird.pos.y += bird.vy * dt;
    bird.update_rotation(dt);

    state.ground.scroll(physics.scroll_speed, dt);
    state.pipes.update(dt, &mut state.rng);

    // Ground strike ends the run; the stored position is left where the
    // fatal step put it
    if state.bird.pos.y < FLOOR_Y {
        state.die();
        return;
    }
    // The sky only holds the bird back
    if state.bird.pos.y > CEILING_Y {
        state.bird.pos.y = CEILING_Y;
    }

    if state
        .pipes
        .check_collision(state.bird.pos, state.bird.size)
        .hit
    {
        state.die();
        return;
    }

    // Only a bird that survived the step gets credit for it
    let passed = state.pipes.count_passed(state.bird.pos.x);
    if passed > 0 {
        state.score += passed;
        state.events.push(GameEvent::Scored(state.score));
    }
}

fn tick_over(state: &mut GameState, input: &TickInput) {
    if input.restart {
        state.restart();
    }
}

/// Demo pilot: tap in Ready, then keep the bird a little under the centre of
/// the next gap (or mid-sky when no pipe is coming)
fn autopilot_tap(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Ready => true,
        GamePhase::Running => {
            let bird = &state.bird;
            let target = state
                .pipes
                .next_ahead(bird.pos.x - bird.size.x / 2.0)
                .map(|p| (p.top.pos.y + p.bottom.pos.y) / 2.0)
                .unwrap_or((FLOOR_Y + CEILING_Y) / 2.0);
            bird.vy < 0.0 && bird.pos.y < target - 25.0
        }
        GamePhase::Over => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use glam::Vec2;

    const TAP: TickInput = TickInput {
        tap: true,
        restart: false,
        idle_mode: false,
    };
    const NO_INPUT: TickInput = TickInput {
        tap: false,
        restart: false,
        idle_mode: false,
    };
    const RESTART: TickInput = TickInput {
        tap: false,
        restart: true,
        idle_mode: false,
    };

    fn running_state() -> GameState {
        let mut state = GameState::new(&Settings::default(), 12345);
        tick(&mut state, &TAP, SIM_DT);
        assert_eq!(state.phase, GamePhase::Running);
        state
    }

    #[test]
    fn test_ready_waits_for_tap() {
        let mut state = GameState::new(&Settings::default(), 12345);
        for _ in 0..10 {
            tick(&mut state, &NO_INPUT, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.bird.pos, Vec2::new(BIRD_START_X, BIRD_START_Y));
        // Ground keeps scrolling while waiting
        assert!(state.ground.x < 0.0);

        tick(&mut state, &TAP, SIM_DT);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.events, vec![GameEvent::Started]);
        // No physics on the transition tick
        assert_eq!(state.bird.vy, 0.0);
        assert_eq!(state.bird.pos, Vec2::new(BIRD_START_X, BIRD_START_Y));
    }

    #[test]
    fn test_gravity_step_hits_ground() {
        let mut state = running_state();
        state.bird.pos.y = 100.0;
        state.bird.vy = 0.0;

        tick(&mut state, &NO_INPUT, 0.1);

        assert!((state.bird.vy - -66.0).abs() < 1e-4);
        assert!((state.bird.pos.y - 93.4).abs() < 1e-4);
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.events, vec![GameEvent::BirdDied]);
    }

    #[test]
    fn test_tap_sets_velocity_without_stacking() {
        let mut state = running_state();
        tick(&mut state, &TAP, 0.01);
        let after_one = state.bird.vy;
        tick(&mut state, &TAP, 0.01);
        assert!((state.bird.vy - after_one).abs() < 1e-4);
        assert!((after_one - (TAP_IMPULSE - GRAVITY * 0.01)).abs() < 1e-4);
        assert!(state.events.contains(&GameEvent::Flapped));
    }

    #[test]
    fn test_ceiling_clamps_without_death() {
        let mut state = running_state();
        state.bird.pos.y = CEILING_Y - 1.0;
        tick(&mut state, &TAP, SIM_DT);
        assert_eq!(state.bird.pos.y, CEILING_Y);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_over_is_frozen_until_restart() {
        let mut state = running_state();
        state.die();
        let pos = state.bird.pos;
        let ticks = state.time_ticks;

        for _ in 0..10 {
            tick(&mut state, &TAP, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.bird.pos, pos);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_death_is_reported_once() {
        let mut state = running_state();
        state.bird.pos.y = FLOOR_Y + 0.5;
        state.bird.vy = -200.0;
        tick(&mut state, &NO_INPUT, SIM_DT);
        assert_eq!(state.events, vec![GameEvent::BirdDied]);

        // Re-triggering death while Over does nothing
        state.die();
        tick(&mut state, &NO_INPUT, SIM_DT);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_restart_is_full_reset() {
        let mut state = running_state();
        // Fly long enough for pipes to spawn
        for i in 0..400 {
            let input = if i % 25 == 0 { TAP } else { NO_INPUT };
            tick(&mut state, &input, SIM_DT);
            if state.phase == GamePhase::Over {
                break;
            }
        }
        state.die();
        assert_eq!(state.phase, GamePhase::Over);

        tick(&mut state, &RESTART, SIM_DT);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.events, vec![GameEvent::Restarted]);
        assert_eq!(state.bird.pos, Vec2::new(BIRD_START_X, BIRD_START_Y));
        assert_eq!(state.bird.vy, 0.0);
        assert_eq!(state.bird.rotation, 0.0);
        assert!(state.bird.alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.pipes.active_count(), 0);
        assert!(state.pipes.is_scrolling());
    }

    /// One pipe slot, spawned on the first running tick, gap floor fixed at 200
    fn pinned_settings() -> Settings {
        Settings {
            pipe_delay: 0.0,
            pipe_rate: 0.01,
            pipe_capacity: 1,
            pipe_min_height: 200.0,
            pipe_max_height: 200.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_pipe_collision_ends_run() {
        let mut state = GameState::new(&pinned_settings(), 3);
        tick(&mut state, &TAP, SIM_DT);
        tick(&mut state, &TAP, SIM_DT);
        let pipe = state.pipes.in_flight().next().unwrap().clone();
        assert_eq!(pipe.bottom.pos.y, 200.0);
        assert_eq!(pipe.top.pos.y, 320.0);

        // Inside the lower half, well clear of the ground
        state.bird.pos = Vec2::new(pipe.x, 160.0);
        state.bird.vy = 0.0;
        tick(&mut state, &TAP, 0.001);
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.events, vec![GameEvent::Flapped, GameEvent::BirdDied]);
    }

    #[test]
    fn test_crash_while_passing_pipe_scores_nothing() {
        let mut state = GameState::new(&pinned_settings(), 3);
        tick(&mut state, &TAP, SIM_DT);
        tick(&mut state, &NO_INPUT, SIM_DT);
        assert_eq!(state.pipes.in_flight_len(), 1);

        // Hold the bird in the gap until the next step carries the pipe's
        // centre past it
        let step = SCROLL_VELOCITY * SIM_DT;
        for _ in 0..200 {
            let x = state.pipes.in_flight().next().unwrap().x;
            if x - step < state.bird.pos.x {
                break;
            }
            state.bird.pos.y = 260.0;
            state.bird.vy = 0.0;
            tick(&mut state, &NO_INPUT, SIM_DT);
            assert_eq!(state.phase, GamePhase::Running);
            assert_eq!(state.score, 0);
        }

        state.bird.pos.y = 160.0;
        state.bird.vy = 0.0;
        tick(&mut state, &NO_INPUT, SIM_DT);
        assert!(state.pipes.in_flight().next().unwrap().x < state.bird.pos.x);
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.events, vec![GameEvent::BirdDied]);
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 0);
    }

    #[test]
    fn test_scoring_when_passing_pipe() {
        let settings = Settings {
            pipe_delay: 0.0,
            pipe_rate: 0.01,
            pipe_capacity: 1,
            ..Default::default()
        };
        let mut state = GameState::new(&settings, 3);
        tick(&mut state, &TAP, SIM_DT);
        tick(&mut state, &NO_INPUT, SIM_DT);
        assert_eq!(state.pipes.in_flight_len(), 1);

        // Hold the bird in the gap by hand while the pipe scrolls past
        let mut scored = false;
        for _ in 0..200 {
            let pipe = state.pipes.in_flight().next().unwrap();
            state.bird.pos.y = (pipe.top.pos.y + pipe.bottom.pos.y) / 2.0;
            state.bird.vy = 0.0;
            tick(&mut state, &NO_INPUT, SIM_DT);
            assert_eq!(state.phase, GamePhase::Running);
            if state.events.contains(&GameEvent::Scored(1)) {
                scored = true;
                break;
            }
        }
        assert!(scored);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_idle_mode_plays_by_itself() {
        let mut state = GameState::new(&Settings::default(), 777);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Running);

        // Keeps the bird airborne for a while
        for _ in 0..120 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings::default();
        let mut state1 = GameState::new(&settings, 99999);
        let mut state2 = GameState::new(&settings, 99999);

        for i in 0..600 {
            let input = TickInput {
                tap: i % 20 == 0,
                ..Default::default()
            };
            tick(&mut state1, &input, SIM_DT);
            tick(&mut state2, &input, SIM_DT);
        }

        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.bird.pos, state2.bird.pos);
        let h1: Vec<f32> = state1.pipes.in_flight().map(|p| p.height_base).collect();
        let h2: Vec<f32> = state2.pipes.in_flight().map(|p| p.height_base).collect();
        assert_eq!(h1, h2);
    }
}
