use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use drivemon::{
    Config, ServerAddr, SimulatedDrives, SnapshotAssembler, StatusRegistry, TcpDiffServer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod demo;
mod shutdown;

use demo::ActivityScript;
use shutdown::ShutdownSignal;

#[derive(Parser)]
#[command(name = "drivemon")]
#[command(about = "Drive status push server with a simulated drive bank")]
struct Args {
    #[arg(short, long, default_value = "drivemon.toml")]
    config: PathBuf,

    /// Enable the status server regardless of the config file.
    #[arg(long, conflicts_with = "no_server")]
    server: bool,

    /// Disable the status server regardless of the config file.
    #[arg(long)]
    no_server: bool,

    /// Bind address spec, e.g. ip4://127.0.0.1:6511.
    #[arg(short, long)]
    address: Option<String>,

    /// Number of simulated units to animate (1-4).
    #[arg(short, long, default_value_t = 1)]
    units: usize,

    /// Milliseconds per simulation tick.
    #[arg(long, default_value_t = 20)]
    tick_ms: u64,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("drivemon=info".parse()?))
        .init();

    let args = Args::parse();

    info!("drivemon starting...");

    // Load config
    let mut config = match Config::load(&args.config) {
        Ok(c) => {
            info!("Loaded config from {:?}", args.config);
            c
        }
        Err(e) if e.is_not_found() => {
            info!("No config file at {:?}, using defaults", args.config);
            Config::default()
        }
        Err(e) => {
            warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        }
    };

    apply_overrides(&mut config, &args);

    let mut server = TcpDiffServer::new(ServerAddr::parse(drivemon::DEFAULT_ADDRESS)?);
    // A bad address or a busy port should not kill the host.
    if let Err(e) = server.apply_config(&config.server) {
        warn!("Status server not started: {}", e);
    }
    if server.is_enabled() {
        match server.local_addr() {
            Some(addr) => info!("Status server listening on {}", addr),
            None => info!("Status server enabled on {}", server.address()),
        }
    }

    let shutdown = Arc::new(ShutdownSignal::new());
    let handler = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        info!("Shutting down...");
        handler.trigger();
    })?;

    run_demo(&args, &mut server, &shutdown);

    info!("drivemon stopped");
    Ok(())
}

/// Command-line flags win over the config file.
fn apply_overrides(config: &mut Config, args: &Args) {
    if args.server {
        config.server.enabled = true;
    }
    if args.no_server {
        config.server.enabled = false;
    }
    if let Some(address) = &args.address {
        config.server.address = address.clone();
    }
}

fn run_demo(args: &Args, server: &mut TcpDiffServer, shutdown: &ShutdownSignal) {
    let units = args.units.clamp(1, drivemon::NUM_UNITS);
    let tick = Duration::from_millis(args.tick_ms.max(1));

    let mut registry = StatusRegistry::new();
    let mut sim = SimulatedDrives::new();
    for unit in 0..units {
        sim.attach(unit);
    }
    let mut script = ActivityScript::new(units);

    info!("Animating {} simulated unit(s)", units);

    let mut was_connected = false;
    while !shutdown.wait(tick) {
        script.tick(&mut sim, &mut registry);

        let mut drives = SnapshotAssembler::new(&mut registry, &sim);
        server.poll(&mut drives);

        let connected = server.has_client();
        if connected != was_connected {
            if connected {
                info!("Client connected");
            } else {
                info!("Client disconnected");
            }
            was_connected = connected;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["drivemon"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_overrides_beat_config_file() {
        let mut config = Config::default();
        config.server.enabled = true;
        config.server.address = "ip4://127.0.0.1:9000".to_string();

        apply_overrides(&mut config, &args(&["--no-server"]));
        assert!(!config.server.enabled);
        // Address from the file survives when not overridden.
        assert_eq!(config.server.address, "ip4://127.0.0.1:9000");

        apply_overrides(
            &mut config,
            &args(&["--server", "--address", "ip4://0.0.0.0:7000"]),
        );
        assert!(config.server.enabled);
        assert_eq!(config.server.address, "ip4://0.0.0.0:7000");
    }

    #[test]
    fn test_no_flags_leave_config_alone() {
        let mut config = Config::default();
        apply_overrides(&mut config, &args(&[]));
        assert_eq!(config, Config::default());
    }
}
