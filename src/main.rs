//! Flappy entry point
//!
//! Native builds have no renderer; this runs the scene headless in demo mode
//! and logs how each run went.
//!
//! Usage: `flappy [settings.json]`

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use flappy::Settings;
use flappy::consts::SIM_DT;
use flappy::platform::{Button, Headless, TextureId};
use flappy::scene::{GameScene, Textures};
use flappy::sim::GamePhase;

/// One minute of simulated play
const DEMO_FRAMES: u32 = 60 * 60;

fn main() {
    env_logger::init();
    log::info!("Flappy (headless) starting...");

    let settings = std::env::args()
        .nth(1)
        .map(|path| Settings::load(Path::new(&path)))
        .unwrap_or_default();

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let textures = Textures {
        bird: TextureId(0),
        ground: TextureId(1),
        pipe_top: TextureId(2),
        pipe_bottom: TextureId(3),
    };

    let mut host = Headless::new();
    let mut scene = GameScene::enter(&settings, seed, &textures, &mut host);
    scene.set_idle_mode(true);
    scene.start(&mut host);

    let mut runs = 0u32;
    for _ in 0..DEMO_FRAMES {
        if scene.phase() == GamePhase::Over {
            runs += 1;
            log::info!("Run {} ended with score {}", runs, scene.state().score);
            host.press(Button::Restart);
        }
        scene.update(SIM_DT, &mut host);
        host.end_frame();
    }

    let state = scene.state();
    log::info!(
        "Demo finished: {} completed runs, best score {}, current score {}",
        runs,
        state.best_score.max(state.score),
        state.score
    );
}
