//! Runs the arena without a window.
//!
//! Usage: `breadkill-headless [config.json] [frames]`
//!
//! The pointer is scripted and geometry goes to an in-memory batch, so this
//! exercises the whole frame loop end to end. Set `RUST_LOG=debug` to see
//! every shot.

mod script;

use std::process::ExitCode;

use breadkill::{ArenaConfig, ArenaError, ArenaRunner, EntityKind, FixedClock, TriangleBatch};

use script::ScriptedPlatform;

const DEFAULT_FRAMES: u64 = 600;

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ArenaError> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            log::info!("Loading config from {path}");
            ArenaConfig::from_path(&path)?
        }
        None => ArenaConfig::default(),
    };
    let frames = match args.next() {
        Some(n) => n
            .parse()
            .map_err(|_| ArenaError::InvalidArgument(format!("frame count must be a number, got {n:?}")))?,
        None => DEFAULT_FRAMES,
    };

    let mut platform = ScriptedPlatform::new(config.window_width, config.window_height, frames);
    let mut clock = FixedClock(config.timing.fixed_dt);
    let mut renderer = TriangleBatch::new();
    let mut runner = ArenaRunner::new(config)?;

    let summary = runner.run(&mut platform, &mut renderer, &mut clock);

    let scene = runner.scene();
    if let Some(player) = scene.player() {
        log::info!("Player centroid: {:?}", player.centroid(runner.world()));
    }
    log::info!(
        "{} entities ({} bullets), {} triangles in the last frame, {} presented in total",
        scene.len(),
        scene.count_kind(EntityKind::Bullet),
        renderer.last_frame.len(),
        renderer.triangles_presented,
    );
    log::info!(
        "{} frames, {} physics steps, {} shots",
        summary.frames,
        summary.steps,
        summary.shots
    );
    log::info!("{}", timing_line(&runner));
    Ok(())
}

/// Step policy and how much frame time was left unstepped when the run ended.
fn timing_line(runner: &ArenaRunner) -> String {
    let timer = runner.timer();
    format!(
        "Timing after frame {}: {:?} policy, dt {:.4}s, {:.4}s pending",
        runner.frame_count(),
        timer.policy(),
        timer.dt(),
        timer.pending()
    )
}
