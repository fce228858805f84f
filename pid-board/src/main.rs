use pid_board::config::ServerConfig;
use pid_board::golemio::{GolemioClient, GolemioConfig};
use pid_board::stops::StopDatabaseCache;
use pid_board::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pid_board=info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    // Create Golemio client
    let golemio_config = GolemioConfig::new(&config.api_key);
    let client = GolemioClient::new(golemio_config).expect("Failed to create Golemio client");

    // Warm the stop database so a broken file shows up at start-up
    let stops = StopDatabaseCache::new(&config.stops_db);
    match stops.get().await {
        Ok(db) => info!(path = ?stops.path(), stops = db.len(), "stop database ready"),
        Err(e) => warn!(path = ?stops.path(), error = %e, "stop database unavailable, nearby board will show an error"),
    }

    // Build app state
    let state = AppState::new(client, stops, config.board, config.configured);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = config.bind_addr;
    info!(%addr, "PID departure board listening");
    info!("GET /health          - Health check");
    info!("GET /board/nearby    - Departures around ?lat=&lon=[&accuracy=]");
    info!("GET /board/stops     - Configured stops, ?layout=large|medium");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
