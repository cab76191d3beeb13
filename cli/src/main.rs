//! Charger agent CLI server
//!
//! Runs the edge agent next to a physical charger: serves the reservation
//! API on an OS-assigned port and registers that port with the registry.
//!
//! ```sh
//! # Run with ./config.yml
//! charger-agent
//!
//! # Custom config path (YAML, or TOML by extension)
//! charger-agent --config /etc/charger-agent/config.toml
//!
//! # Validate config without starting
//! charger-agent --check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use charger_agent::config::AppConfig;
use charger_agent::infrastructure::registry::DEFAULT_REGISTRY_URL;
use charger_agent::server::{init_tracing, AgentHandle, AgentOptions};

/// Charger edge agent: reservation API and registry self-registration.
#[derive(Parser, Debug)]
#[command(
    name = "charger-agent",
    version,
    about = "Edge agent for an EV charger",
    long_about = "Serves the reservation API for a single EV charger and \
                  announces its endpoint to the central charger registry.\n\n\
                  Default config: ./config.yml"
)]
struct Cli {
    /// Path to the configuration file (YAML, or TOML with a .toml extension).
    #[arg(short, long, env = "CHARGER_CONFIG")]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Registry endpoint to announce this charger to.
    #[arg(long, env = "CHARGER_REGISTRY_URL", default_value = DEFAULT_REGISTRY_URL)]
    registry_url: String,

    /// Validate the configuration file and exit without starting the agent.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(charger_agent::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            // Without identity the agent cannot register; give up.
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    init_tracing(&config.logging);
    info!("Configuration loaded from {}", config_path.display());

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Charger UUID: {}", config.charger.uuid);
        println!(
            "   Location    : {}, {}",
            config.charger.location.latitude, config.charger.location.longitude
        );
        println!("   Bind host   : {}", config.server.host);
        println!("   Registry    : {}", cli.registry_url);
        println!("   Log level   : {}", config.logging.level);
        return ExitCode::SUCCESS;
    }

    // ── Start agent ────────────────────────────────────────────
    let opts = AgentOptions::new(config).with_registry_url(cli.registry_url);
    let handle = match AgentHandle::start(opts).await {
        Ok(handle) => handle,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;

    ExitCode::SUCCESS
}
