//! `wavebridge` – the gesture teleoperation bridge daemon.
//!
//! A single long-running foreground process:
//!
//! 1. Initialises structured logging (and OTLP span export when configured).
//! 2. Loads `~/.wavebridge/config.toml`, falling back to defaults.
//! 3. Opens the actuator transport and obstacle source, probing both so a
//!    dead collaborator shows up in the logs before the first client.
//! 4. Runs the sequential gesture server until Ctrl-C.

mod config;

use std::time::Duration;

use colored::Colorize;
use tokio::sync::watch;
use tracing::{info, warn};

use config::{Config, ObstacleMode, TransportMode};
use wavebridge_hal::{
    BusCommandSink, CommandSink, FileObstacleSource, ObstacleSource, ProbeObstacleSource,
    SerialCommandSink,
};
use wavebridge_server::{BridgePipeline, GestureServer, telemetry};
use wavebridge_types::BridgeError;

fn main() {
    // The OTLP exporter must be built before the Tokio runtime exists.
    let _guard = telemetry::init_tracing("wavebridge");

    print_banner();

    let mut cfg = match config::load() {
        Ok(Some(cfg)) => {
            println!(
                "  Config loaded from {}",
                config::config_path().display().to_string().bold()
            );
            cfg
        }
        Ok(None) => {
            println!(
                "  No config at {}, using defaults",
                config::config_path().display().to_string().bold()
            );
            Config::default()
        }
        Err(e) => {
            println!("{}: {e}", "Config error".red());
            println!("  Using default configuration.");
            Config::default()
        }
    };
    config::apply_env_overrides(&mut cfg);

    // ── Ctrl-C handler ────────────────────────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    if let Err(e) = ctrlc::set_handler(move || {
        println!();
        println!("{}", "Ctrl-C received, shutting down".yellow().bold());
        let _ = shutdown_tx.send(true);
    }) {
        warn!(
            error = %e,
            "failed to install Ctrl-C handler; stop with SIGTERM instead"
        );
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{} building async runtime: {e}", "fatal:".red().bold());
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run_bridge(cfg, shutdown_rx)) {
        eprintln!("{} {e}", "fatal:".red().bold());
        std::process::exit(1);
    }
}

/// Build both transports, report their state, and serve until shutdown.
async fn run_bridge(cfg: Config, shutdown: watch::Receiver<bool>) -> Result<(), BridgeError> {
    let source = build_obstacle_source(&cfg);

    // Test-fire the ranging side once so a dead sensor is visible before
    // the first gesture arrives.
    match source.fetch().await {
        Ok(snapshot) => info!(source = source.id(), ?snapshot, "ranging source answering"),
        Err(e) => warn!(
            source = source.id(),
            error = %e,
            "ranging source not answering, motion will assume clear zones"
        ),
    }

    let sink = build_command_sink(&cfg).await;
    info!(sink = sink.id(), ready = sink.is_ready(), "actuator transport state");

    let pipeline = BridgePipeline::new(source, sink)
        .with_obstacle_timeout(Duration::from_millis(cfg.obstacle_timeout_ms));

    info!(
        obstacle = %cfg.obstacle_mode,
        transport = %cfg.transport,
        port = cfg.listen_port,
        "bridge configured"
    );

    GestureServer::new(pipeline)
        .with_port(cfg.listen_port)
        .run(shutdown)
        .await
}

fn build_obstacle_source(cfg: &Config) -> Box<dyn ObstacleSource> {
    match cfg.obstacle_mode {
        ObstacleMode::StatusFile => {
            let mut source = FileObstacleSource::new(&cfg.status_file);
            if let Some(ms) = cfg.stale_after_ms {
                source = source.with_stale_after(Duration::from_millis(ms));
            }
            Box::new(source)
        }
        ObstacleMode::Probe => Box::new(
            ProbeObstacleSource::new(&cfg.probe_program)
                .with_timeout(Duration::from_millis(cfg.obstacle_timeout_ms)),
        ),
    }
}

async fn build_command_sink(cfg: &Config) -> Box<dyn CommandSink> {
    match cfg.transport {
        TransportMode::Bus => {
            Box::new(BusCommandSink::open(&cfg.bus_device, cfg.bus_register).await)
        }
        TransportMode::Serial => Box::new(SerialCommandSink::open(&cfg.serial_device).await),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Banner
// ─────────────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("{}", "  ╔══════════════════════════════════════╗".bold().cyan());
    println!("{}", "  ║   WaveBridge Gesture Teleoperation   ║".bold().cyan());
    println!("{}", "  ╚══════════════════════════════════════╝".bold().cyan());
    println!();
    println!(
        "  {} {}",
        "wavebridge".bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("  Gesture events in, obstacle-vetted motion commands out");
    println!();
}
