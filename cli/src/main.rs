//! FreshPress — CLI Server
//!
//! Headless order-management backend for a laundry / dry-cleaning shop,
//! suitable for deployment as a systemd service, Docker container, or
//! standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/freshpress/config.toml)
//! freshpress
//!
//! # Custom config path
//! freshpress --config /etc/freshpress/config.toml
//!
//! # Override the API port and seed the demo catalog
//! freshpress --api-port 8080 --seed-demo
//!
//! # Validate config without starting
//! freshpress --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use freshpress::config::AppConfig;
use freshpress::server::{init_tracing, ServerHandle, ServerOptions};

/// FreshPress — order, catalog and customer management for laundries.
#[derive(Parser, Debug)]
#[command(
    name = "freshpress",
    version,
    about = "Order management backend for laundry and dry-cleaning shops",
    long_about = "FreshPress — REST API server tracking customers, a priced service \
                  catalog and orders through their pickup-to-delivery lifecycle.\n\n\
                  Default config: ~/.config/freshpress/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "FRESHPRESS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin user.
    #[arg(long)]
    no_admin: bool,

    /// Seed the demo catalog, customers and orders when the catalog is empty.
    #[arg(long)]
    seed_demo: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(freshpress::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        config.server.api_port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.seed_demo {
        config.seed.demo_data = true;
    }

    init_tracing(&config);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file       : {}", config_path.display());
        println!("   API address       : {}:{}", config.server.api_host, config.server.api_port);
        println!("   Database          : {}", config.database.connection_url());
        println!("   Log level         : {}", config.logging.level);
        println!("   Transition policy : {}", config.orders.transition_policy);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
