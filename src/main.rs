//! padnav monitor
//!
//! Headless driver for the input helper: polls physical gamepads through
//! gilrs on a fixed frame interval and logs every normalised event.

use anyhow::Result;
use clap::Parser;
use colored::*;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use padnav::config::{ConfigReload, ConfigWatcher, PadnavConfig};
use padnav::input::{GamepadSource, GilrsSource, Listener};
use padnav::GamepadHelper;

/// padnav - log normalised gamepad input
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "padnav.yaml")]
    config: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// List connected gamepads and exit
    #[arg(long)]
    list_pads: bool,

    /// Poll only on explicit forced polls (overrides the config)
    #[arg(long)]
    manual_polling: bool,
}

/// Event counters shared with the logging listener
#[derive(Debug, Default)]
struct Stats {
    presses: u64,
    releases: u64,
    moves: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level)?;

    info!("Starting padnav monitor...");

    if args.list_pads {
        list_pads()?;
        return Ok(());
    }

    let (config_watcher, mut config) = if Path::new(&args.config).exists() {
        let (watcher, initial) = ConfigWatcher::new(args.config.clone()).await?;
        info!("Configuration loaded from {} with hot-reload enabled", args.config);
        (Some(watcher), (*initial).clone())
    } else {
        info!("No configuration at {}, using defaults", args.config);
        (None, PadnavConfig::default())
    };
    if args.manual_polling {
        config.polling.manual = true;
    }

    let source = GilrsSource::new()?;
    let mut helper = GamepadHelper::new().with_source(Box::new(source));
    helper.apply_config(&config);

    let stats = Arc::new(Mutex::new(Stats::default()));
    helper.register(logging_listener(stats.clone()));

    run(helper, config, config_watcher, args.manual_polling, shutdown_signal()).await;

    let stats = stats.lock();
    info!(
        "padnav shutdown complete ({} presses, {} releases, {} stick moves)",
        stats.presses, stats.releases, stats.moves
    );
    Ok(())
}

async fn run(
    mut helper: GamepadHelper,
    mut config: PadnavConfig,
    mut config_watcher: Option<ConfigWatcher>,
    force_manual: bool,
    shutdown: impl std::future::Future<Output = ()>,
) {
    let mut ticker = tokio::time::interval(frame_interval(&config));
    tokio::pin!(shutdown);

    info!("Polling every {} ms", config.polling.frame_interval_ms);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if config.polling.manual {
                    helper.force_poll();
                } else {
                    helper.tick();
                }
            }

            Some(reload) = next_reload(&mut config_watcher) => {
                reload.apply(&mut helper);
                if force_manual {
                    helper.set_manual_polling(true);
                }
                if reload.frame_interval_changed() {
                    ticker = tokio::time::interval(frame_interval(&reload.current));
                    info!("Polling every {} ms", reload.current.polling.frame_interval_ms);
                }
                config = (*reload.current).clone();
                config.polling.manual |= force_manual;
            }

            _ = &mut shutdown => {
                info!("Shutdown signal received, stopping poll loop");
                break;
            }
        }
    }

    helper.teardown();
}

async fn next_reload(watcher: &mut Option<ConfigWatcher>) -> Option<ConfigReload> {
    match watcher {
        Some(watcher) => watcher.next_reload().await,
        None => std::future::pending().await,
    }
}

fn frame_interval(config: &PadnavConfig) -> Duration {
    Duration::from_millis(config.polling.frame_interval_ms.max(1))
}

fn logging_listener(stats: Arc<Mutex<Stats>>) -> Listener {
    let (down_stats, up_stats, move_stats) = (stats.clone(), stats.clone(), stats);
    Listener::new()
        .on_down(move |pad, button| {
            down_stats.lock().presses += 1;
            info!("{} {} {}", "▼".green(), pad, button);
        })
        .on_up(move |pad, button| {
            up_stats.lock().releases += 1;
            debug!("{} {} {}", "▲".yellow(), pad, button);
        })
        .on_velocity(move |pad, axis, value| {
            move_stats.lock().moves += 1;
            debug!("{} {} {} {:+.3}", "~".cyan(), pad, axis, value);
        })
        .on_connect(|info| {
            info!("Pad {} connected: {} ({} buttons, {} axes)", info.index, info.device_id, info.buttons, info.axes);
        })
        .on_disconnect(|info| {
            warn!("Pad {} disconnected: {}", info.index, info.device_id);
        })
}

fn list_pads() -> Result<()> {
    let mut source = GilrsSource::new()?;

    println!("\n{}", "=== Connected Gamepads ===".bold().cyan());

    let pads: Vec<_> = source.snapshots().into_iter().filter(|p| p.connected).collect();
    if pads.is_empty() {
        println!("  {}", "none".yellow());
        return Ok(());
    }

    for pad in pads {
        println!(
            "  [{}] {} ({} buttons, {} axes{})",
            pad.index.to_string().green(),
            pad.id.bright_white(),
            pad.buttons.len(),
            pad.axes.len(),
            if pad.has_rumble { ", rumble" } else { "" }
        );
    }

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
}
