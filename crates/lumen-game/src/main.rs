mod config;
mod headless;
mod screens;
mod state;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use lumen_engine::logging::init_logging;
use lumen_engine::window::Runtime;

use config::GameConfig;
use state::Game;

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "Fixed-timestep 2D game shell")]
struct Args {
    #[arg(long, default_value_t = 200.0, help = "Logic updates per second")]
    ups: f64,

    #[arg(long, default_value_t = 120.0, help = "Rendered frames per second")]
    fps: f64,

    #[arg(long, default_value_t = 1.5, help = "Window size multiplier (base 640x360)")]
    scale: f64,

    #[arg(long, value_name = "MAX", help = "Run up to MAX updates per iteration to catch up after stalls")]
    catch_up: Option<u32>,

    #[arg(long, help = "Poll instead of sleeping between steps")]
    busy_wait: bool,

    #[arg(long, help = "Let the display cap the frame rate")]
    vsync: bool,

    #[arg(long, value_name = "FILTER", help = "Log filter, e.g. info or lumen_engine=debug")]
    log: Option<String>,

    #[arg(long, value_name = "SECS", help = "Run the game loop without a window for SECS seconds")]
    headless: Option<f64>,
}

impl From<Args> for GameConfig {
    fn from(args: Args) -> Self {
        Self {
            updates_per_second: args.ups,
            frames_per_second: args.fps,
            scale: args.scale,
            catch_up: args.catch_up,
            busy_wait: args.busy_wait,
            vsync: args.vsync,
            log_filter: args.log,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let headless = args.headless;

    let config = GameConfig::from(args);
    init_logging(config.logging_config());
    config.validate()?;

    if let Some(secs) = headless {
        let duration = Duration::try_from_secs_f64(secs)
            .map_err(|e| anyhow::anyhow!("invalid --headless duration {secs}: {e}"))?;
        headless::run(&config, duration)?;
        return Ok(());
    }

    let game = Game::new(config.window_size());
    Runtime::run(config.runtime_config(), config.gpu_init(), game)
}
