/// Vitrine terminal showcase
///
/// Renders the animated views as ASCII art.
/// Controls:
///   - Tab: Cycle the displayed view
///   - Up/Down, PageUp/PageDown, mouse wheel: Scroll
///   - Mouse: Pointer parallax
///   - T: Toggle theme
///   - Q/ESC: Quit

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vitrine_core::{Config, ViewKey};
use vitrine_terminal::TerminalApp;

#[derive(Parser, Debug)]
#[command(name = "vitrine-terminal")]
#[command(about = "Animated showcase scenes rendered in the terminal")]
#[command(version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for procedural placement (overrides the config)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Mount only this view (background, hero, product1, product2, tech)
    #[arg(long)]
    view: Option<ViewKey>,

    /// Log level or filter directive, used when RUST_LOG is unset
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Write logs to this file; logs are discarded otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .with_context(|| format!("Invalid log level `{}`", args.log_level))?;

    match &args.log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file))
                .init();
        }
        // The renderer owns the screen, so stderr output would corrupt it
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init(),
    }
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    info!("Vitrine v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let mut app = TerminalApp::new(&config, args.view, clock_seed())?;
    app.run()?;

    println!("Thanks for visiting Vitrine!");
    Ok(())
}
