//! # chair_app
//!
//! Runs the seating service against an in-memory world and a script of host
//! events, logging what happens to each seat.
//!
//! ## Startup Sequence
//!
//! 1. Load the seating configuration (`--config`, JSON) or use the defaults.
//! 2. Build the demo world and load the script (`--script`, JSON) or use the
//!    built-in one.
//! 3. Run the tick loop until `--max-ticks` or Ctrl-C.
//! 4. Shut the service down, removing every remaining seat.

mod scene;
mod tick;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use chair_core::{ChairConfig, ChairService};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tick::{TickConfig, TickLoop};

#[derive(Parser)]
#[command(name = "chair_app", about = "Stair seating over a simulated world")]
struct Args {
    /// Target ticks per second
    #[arg(short, long, default_value_t = 20.0)]
    tick_rate: f64,

    /// Number of ticks to run (0 = until Ctrl-C)
    #[arg(short, long, default_value_t = 20)]
    max_ticks: u64,

    /// Seating configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Event script file (JSON)
    #[arg(short, long)]
    script: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("chair_app=info".parse()?)
                .add_directive("chair_core=info".parse()?),
        )
        .init();

    let args = Args::parse();
    ensure!(
        args.tick_rate > 0.0,
        "tick rate must be positive, got {}",
        args.tick_rate
    );

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ChairConfig::default(),
    };

    let (host, cast) = scene::demo_scene()?;
    let script = match &args.script {
        Some(path) => {
            info!(path = %path.display(), "loading script");
            scene::load_script(path)?
        }
        None => scene::demo_script(&cast),
    };
    if script.is_empty() {
        warn!("script has no events, only the tick loop will run");
    } else {
        info!(events = script.len(), last_tick = script.last_tick(), "script ready");
    }

    let mut tick_loop = TickLoop::new(
        TickConfig {
            tick_rate: args.tick_rate,
            max_ticks: args.max_ticks,
        },
        host,
        ChairService::new(config),
        script,
    );
    tick_loop.run_async().await;
    info!(
        seats = tick_loop.service().registry().len(),
        players = tick_loop.host().player_count(),
        "script finished"
    );
    tick_loop.shutdown();

    info!("chair demo finished");
    Ok(())
}

fn load_config(path: &Path) -> Result<ChairConfig> {
    info!(path = %path.display(), "loading configuration");
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}
