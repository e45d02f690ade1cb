//! Gaze Bridge - eye-tracker to key-event bridge
//!
//! Polls the gaze file written by an external eye tracker and translates
//! gaze position into arrow-key events for the focused application.

use gaze_bridge::app::cli::{Cli, Commands};
use gaze_bridge::app::config::BridgeConfig;
use gaze_bridge::bridge::BridgeLoop;
use gaze_bridge::emit::{platform_emitter, KeyEmitter, NullEmitter};
use gaze_bridge::gaze::reader::{GazeReader, ReadOutcome};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        BridgeConfig::load(path)?
    } else {
        BridgeConfig::load_default()?
    };

    match cli.command {
        Commands::Run {
            source,
            interval_ms,
            follow_x,
            follow_y,
            dry_run,
        } => run_bridge(config, source, interval_ms, follow_x, follow_y, dry_run)?,
        Commands::Check { source } => run_check(config, source)?,
        Commands::Init { force } => run_init(force, &config)?,
    }

    Ok(())
}

fn run_bridge(
    mut config: BridgeConfig,
    source: Option<PathBuf>,
    interval_ms: Option<u64>,
    follow_x: bool,
    follow_y: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    // CLI overrides on top of the config file
    if let Some(path) = source {
        config.source.path = path;
    }
    if let Some(ms) = interval_ms {
        config.tick.interval_ms = ms;
    }
    if follow_x {
        config.mapping.follow_x = true;
    }
    if follow_y {
        config.mapping.follow_y = true;
    }
    config.validate()?;

    if !config.mapping.follow_x && !config.mapping.follow_y {
        info!("no axis enabled; pass --follow-x/--follow-y or set them in the config");
    }

    let mut bridge = BridgeLoop::new(&config);

    let emitter: Box<dyn KeyEmitter> = if dry_run {
        info!("dry run: key events will be logged, not injected");
        Box::new(NullEmitter)
    } else {
        platform_emitter()
    };

    match bridge.start(emitter) {
        Ok(()) => {}
        Err(e @ gaze_bridge::Error::SourceNotFound(_)) => {
            anyhow::bail!("{}. Make sure the eye tracker is writing the gaze file.", e);
        }
        Err(e) => return Err(e.into()),
    }

    info!("bridge running; press Ctrl+C to stop");

    // Set up Ctrl+C handler
    let stop_flag = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let stop_flag_handler = stop_flag.clone();

    ctrlc::set_handler(move || {
        stop_flag_handler.store(true, std::sync::atomic::Ordering::SeqCst);
    })?;

    // Report the published status once a second until interrupted
    while !stop_flag.load(std::sync::atomic::Ordering::SeqCst) {
        std::thread::sleep(std::time::Duration::from_millis(1000));

        let status = bridge.status();
        match status.last_sample {
            Some(sample) => info!(
                "gaze ({:.2}, {:.2}) | ticks {} fresh {} unavailable {} invalid {}",
                sample.x, sample.y, status.ticks, status.fresh, status.unavailable, status.invalid
            ),
            None => info!("waiting for first valid gaze sample..."),
        }
        if let Some(err) = status.last_emission_error {
            tracing::warn!("last emission error: {}", err);
        }
    }

    bridge.stop();

    let status = bridge.status();
    println!("\nBridge stopped.");
    println!("  Ticks:       {}", status.ticks);
    println!("  Fresh reads: {}", status.fresh);
    println!("  Unavailable: {}", status.unavailable);
    println!("  Invalid:     {}", status.invalid);
    println!("  Key events:  {}", status.emitted);

    Ok(())
}

fn run_check(mut config: BridgeConfig, source: Option<PathBuf>) -> anyhow::Result<()> {
    if let Some(path) = source {
        config.source.path = path;
    }

    let reader = GazeReader::new(&config.source.path);
    let checked_at = chrono::Local::now().format("%H:%M:%S%.3f");

    match reader.read() {
        ReadOutcome::Fresh(sample) => {
            println!(
                "[{}] {} -> gaze ({:.3}, {:.3})",
                checked_at,
                reader.path().display(),
                sample.x,
                sample.y
            );
            if let Some(ts) = sample.produced_at {
                println!("  producer timestamp: {:.3}", ts);
            }
            Ok(())
        }
        ReadOutcome::Unavailable => {
            anyhow::bail!(
                "[{}] {} not found. Start the eye tracker first.",
                checked_at,
                reader.path().display()
            )
        }
        ReadOutcome::Invalid(err) => {
            anyhow::bail!(
                "[{}] {} is not a valid gaze record: {}",
                checked_at,
                reader.path().display(),
                err
            )
        }
    }
}

fn run_init(force: bool, config: &BridgeConfig) -> anyhow::Result<()> {
    let config_path = BridgeConfig::default_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save_default()?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    Ok(())
}
