use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use sitepulse_core::store::FileStore;
use sitepulse_server::geo::MaxMindGeolocate;
use sitepulse_server::state::AppState;

/// `sitepulse health` — liveness probe for Docker HEALTHCHECK.
///
/// Calls `GET http://localhost:$SITEPULSE_PORT/health`.
/// Exits 0 if the server responds with HTTP 200, exits 1 otherwise.
fn run_health_check() -> ! {
    let port = std::env::var("SITEPULSE_PORT").unwrap_or_else(|_| "3002".to_string());
    let url = format!("http://localhost:{}/health", port);
    match ureq::get(&url).call() {
        Ok(resp) if resp.status() == 200 => std::process::exit(0),
        _ => std::process::exit(1),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Health-check subcommand — handled before tokio runtime work so the
    // binary stays small and fast when used as a Docker HEALTHCHECK probe.
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(|s| s.as_str()) == Some("health") {
        run_health_check();
    }

    // Initialise structured JSON logging. Level controlled via RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sitepulse=info".parse()?),
        )
        .json()
        .init();

    let cfg = sitepulse_core::config::Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    if !std::path::Path::new(&cfg.geoip_path).exists() {
        tracing::warn!(
            geoip_path = %cfg.geoip_path,
            "GeoIP database not found. Visits will be recorded with location \"Unknown\". \
             Point SITEPULSE_GEOIP_PATH at a City .mmdb file to enable geolocation."
        );
    }

    if !std::path::Path::new(&cfg.site_dir).exists() {
        tracing::warn!(
            site_dir = %cfg.site_dir,
            "Site directory not found. Static requests will return 404 until it exists."
        );
    }

    let store = Arc::new(FileStore::new(&cfg.data_file));
    let geo = Arc::new(MaxMindGeolocate::new(cfg.geoip_path.clone()));
    let state = Arc::new(AppState::new(store, geo, cfg.clone()));

    let addr = format!("0.0.0.0:{}", cfg.port);
    let app = sitepulse_server::app::build_app(Arc::clone(&state));

    info!(port = cfg.port, "sitepulse listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        tokio::signal::ctrl_c().await.ok();
    })
    .await?;

    Ok(())
}
