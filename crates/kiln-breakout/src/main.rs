//! Headless Breakout runner.
//!
//! Plays a short scripted session against a recording renderer and logs how
//! it went. Useful for checking settings files and watching the simulation
//! with `RUST_LOG=debug` (or `trace` for per-tick detail).
//!
//! ```text
//! kiln-breakout [settings.json]
//! ```

use std::time::Duration;

use kiln::input::{InputSnapshot, KeyCode};
use kiln::render::RecordingRenderer;
use kiln::shape::Body;
use kiln::EngineError;
use kiln_breakout::{BreakoutGame, BreakoutSettings};

const DEFAULT_SETTINGS: &str = "breakout.json";
const FRAMES: u32 = 600;

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), EngineError> {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_SETTINGS.to_string());
    let settings = BreakoutSettings::load(&path)?;
    let frame_delta = Duration::from_secs_f64(1.0 / f64::from(settings.engine.updates_per_second.max(1)));

    let mut game = BreakoutGame::new(settings)?;
    let mut renderer = RecordingRenderer::new();
    let mut ticks = 0u64;

    for frame in 0..FRAMES {
        let snapshot = scripted_input(frame);
        let stats = game.frame(&snapshot, frame_delta);
        ticks += u64::from(stats.ticks);

        renderer.clear();
        game.render(&mut renderer);

        if frame % 60 == 0 {
            log::debug!(
                "frame {frame}: {:?}, speed {:.2}, {} draw calls",
                stats.game_state,
                stats.speed,
                renderer.calls.len()
            );
        }
        if game.is_stopped() {
            log::info!("stopped at frame {frame}");
            break;
        }
    }

    let ball = game.world().component::<Body>(game.scene().ball).center();
    log::info!(
        "ran {} ticks over {} frames ({:.1}s); ball at ({:.1}, {:.1}), state {:?}",
        ticks,
        game.time().frame_count(),
        game.time().elapsed_secs(),
        ball.x,
        ball.y,
        game.shared().game_state
    );
    Ok(())
}

/// Launch with a nudge to the right, speed up for a second, reset, then quit
/// on the last frame.
fn scripted_input(frame: u32) -> InputSnapshot {
    match frame {
        30 => InputSnapshot::new().press(KeyCode::ArrowRight),
        60 => InputSnapshot::new().release(KeyCode::ArrowRight),
        120 => InputSnapshot::new().press(KeyCode::Equal),
        180 => InputSnapshot::new().release(KeyCode::Equal),
        300 => InputSnapshot::new().press(KeyCode::Digit0),
        301 => InputSnapshot::new().release(KeyCode::Digit0),
        f if f == FRAMES - 1 => InputSnapshot::new().press(KeyCode::Escape),
        _ => InputSnapshot::new(),
    }
}
