//! Folio Breakout entry point
//!
//! Headless demo: the autopilot plays one run and the final frame is printed
//! as ASCII art followed by a JSON summary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use folio_breakout::GameConfig;
use folio_breakout::platform::{Autopilot, FrameLoop};
use folio_breakout::renderer::{AsciiRenderer, LogReporter};
use folio_breakout::sim::{GameEngine, SeededRandom};

/// Give up after this many frames (about five minutes at 60 Hz)
const MAX_FRAMES: u64 = 60 * 60 * 5;

/// Headless Breakout demo driven by the autopilot
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct Args {
    /// JSON game config; built-in defaults when omitted
    config: Option<PathBuf>,

    /// Seed for the launch-angle RNG
    #[arg(default_value_t = 0x5EED)]
    seed: u64,

    /// Width of the printed frame in characters
    #[arg(long, default_value_t = 80)]
    cols: usize,

    /// Height of the printed frame in characters
    #[arg(long, default_value_t = 30)]
    rows: usize,

    /// Frame cap for the run
    #[arg(long, default_value_t = MAX_FRAMES)]
    max_frames: u64,
}

fn main() -> Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    log::info!("Folio Breakout (native) starting, seed {}", args.seed);

    let renderer =
        AsciiRenderer::new(config.board_width, config.board_height, args.cols, args.rows);
    let mut engine = GameEngine::new(
        config,
        renderer,
        LogReporter::new(),
        SeededRandom::new(args.seed),
    )
    .context("Invalid game config")?;

    let mut frames = FrameLoop::new();
    let ran = frames.run_until(&mut engine, &mut Autopilot::default(), args.max_frames, |s| {
        s.phase.is_terminal()
    });

    print!("{}", engine.renderer().render_to_string());

    let state = engine.state();
    let summary = serde_json::json!({
        "seed": args.seed,
        "frames": ran,
        "phase": state.phase,
        "score": state.score,
        "lives": state.lives,
        "bricks_left": state.bricks.alive_count(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("Failed to serialise run summary")?
    );
    Ok(())
}
