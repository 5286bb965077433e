use api::state::AppState;
use db::ReadingStore;
use ingestor::Ingestor;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tracing_appender::rolling;
use util::config::AppConfig;

#[tokio::main]
async fn main() {
    // Load configuration and initialize logging
    let config = AppConfig::from_env().expect("Invalid configuration");
    let _log_guard = init_logging(&config);

    // Shared store handle for the ingestor (writer) and the API (reader)
    let db = db::connect(&config.database_path)
        .await
        .expect("Failed to open database");
    let store = ReadingStore::new(db);

    let shutdown = CancellationToken::new();
    spawn_shutdown_listener(shutdown.clone());

    // Start the MQTT ingestor on its own task
    let ingestor = Ingestor::new(store.clone(), config.mqtt.clone());
    let app_state = AppState::new(store, ingestor.status());
    let ingestor_handle = ingestor.spawn(shutdown.clone());

    let app = api::app(app_state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid address");

    tracing::info!(
        "Starting {} on http://{}:{}",
        config.project_name,
        config.host,
        config.port
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown.clone().cancelled_owned())
    .await;

    if let Err(err) = served {
        // The ingestor keeps collecting readings until the process is told to stop.
        tracing::error!(error = %err, "HTTP server stopped; ingestor still running");
    }

    shutdown.cancelled().await;
    if let Err(err) = ingestor_handle.await {
        tracing::error!(error = %err, "ingestor task panicked");
    }
    tracing::info!("Shutdown complete");
}

fn spawn_shutdown_listener(shutdown: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(err) => tracing::error!(error = %err, "Failed to listen for shutdown signal"),
        }
        shutdown.cancel();
    });
}

fn init_logging(config: &AppConfig) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", &config.log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = config.log_to_stdout.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true)
            .with_thread_ids(true)
    });

    let env_filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("api=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    guard
}
