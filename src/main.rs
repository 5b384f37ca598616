use tracing::{error, info};

use sharebox::{Config, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let mut config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    config.apply_env_overrides();

    // Initialize logging
    if let Err(e) = sharebox::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        sharebox::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    info!("Sharebox - self-hosted file sharing");
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    let server = match WebServer::new(&config) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to start web server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
