mod cli;
mod shell;

use std::path::Path;

use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

fn main() {
    // Parse CLI arguments
    let args = cli::parse();

    // Initialize logging
    let log_directive = args.log_level.as_deref().unwrap_or("sentinel=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "sentinel=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Sentinel v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load config
    let config = match args.config.as_deref() {
        Some(path) => sentinel_config::load_from_path(Path::new(path)),
        None => sentinel_config::load_config(),
    }
    .unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        sentinel_config::SentinelConfig::default()
    });
    tracing::info!("Config loaded (content url: {})", config.content.url);

    // Create event loop and run
    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut app = shell::SentinelShell::new(config);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
