//! HeadOrbit - Face-Tracked Puppet Service
//!
//! Main entry point for the CLI application.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use headorbit::{
    config::Config, puppet::Prop, tracking::receiver::FaceReceiver, web::WebServer, AppState,
};

/// HeadOrbit - Face-tracked puppet service
#[derive(Parser, Debug)]
#[command(name = "headorbit", version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prop to mount on startup (catalog index, overrides config)
    #[arg(long)]
    prop: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable HTTP server
    #[arg(long)]
    no_http: bool,

    /// HTTP server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    info!("Starting {} v{}", headorbit::NAME, headorbit::VERSION);

    let runtime = tokio::runtime::Runtime::new()?;

    let state = runtime.block_on(async { setup_and_spawn_services(&args).await })?;

    // Wait for Ctrl+C / SIGTERM
    runtime.block_on(async {
        shutdown_signal().await;
        info!("Shutdown signal received");
        state.shutdown();

        // Give tasks a moment to clean up
        tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;
    });

    info!("HeadOrbit stopped");
    Ok(())
}

/// Setup config, create AppState, and spawn all background services.
async fn setup_and_spawn_services(args: &Args) -> anyhow::Result<Arc<AppState>> {
    // Load configuration
    let mut config = if let Some(ref path) = args.config {
        Config::from_file(path)?
    } else {
        Config::load()?
    };

    // Apply CLI overrides
    if let Some(prop) = args.prop {
        config.scene.default_prop = prop;
    }
    if args.no_http {
        config.http.enabled = false;
    }
    if let Some(port) = args.port {
        config.http.port = port;
    }

    // Validate configuration
    config.validate()?;

    info!(
        "Default prop: {}",
        Prop::from_index(config.scene.default_prop)
            .map(|p| p.name())
            .unwrap_or("?")
    );
    info!("Tracking port: {}", config.tracking.port);
    info!("HTTP server: {}", config.http.enabled);

    // Create shared application state
    let state = AppState::new(config.clone());

    // Start the face tracking loop
    let tracking_state = Arc::clone(&state);
    tokio::spawn(async move {
        if let Err(e) = run_face_tracking(tracking_state).await {
            error!("Face tracking error: {}", e);
        }
    });

    // Start HTTP server if enabled
    if config.http.enabled {
        let http_state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = run_http_server(http_state).await {
                error!("HTTP server error: {}", e);
            }
        });
    }

    Ok(state)
}

async fn run_face_tracking(state: Arc<AppState>) -> anyhow::Result<()> {
    let config = state.config.read().await;
    let tracking_config = config.tracking.clone();
    drop(config);

    let mut shutdown_rx = state.subscribe_shutdown();

    let mut receiver = FaceReceiver::new(&tracking_config);
    receiver.start()?;

    info!("Face tracking started (port: {})", tracking_config.port);

    loop {
        tokio::select! {
            result = receiver.process() => {
                match result {
                    Ok(Some(data)) if data.has_data => {
                        // Map only complete frames; anything else is a
                        // per-frame no-op (no face, missing blendshapes,
                        // no puppet mounted, prop not articulated)
                        if let Some(sample) = data.packet.as_ref().and_then(|p| p.sample()) {
                            state.apply_sample(sample).await;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("Face tracking receive error: {}", e);
                        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                    }
                }
            }
            _ = shutdown_rx.recv() => {
                info!("Face tracking shutting down");
                break;
            }
        }

        // Small yield to avoid busy-spinning when no data arrives
        tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;
    }

    receiver.stop();
    Ok(())
}

async fn run_http_server(state: Arc<AppState>) -> anyhow::Result<()> {
    let config = state.config.read().await;
    let http_config = config.http.clone();
    drop(config);

    let web_server = WebServer::new(state.clone(), &http_config);

    let addr = format!("{}:{}", http_config.host, http_config.port);
    info!("HTTP server listening on {}", addr);

    let app = web_server.router();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let mut shutdown_rx = state.subscribe_shutdown();

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
