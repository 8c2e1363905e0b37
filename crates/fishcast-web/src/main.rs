use std::net::SocketAddr;
use tokio::net::TcpListener;

use chrono_tz::Tz;
use fishcast_astro::MoonEphemeris;
use fishcast_config::AppConfig;
use fishcast_core::Forecaster;
use fishcast_fmi::FmiClient;
use fishcast_web::DashboardConfig;

#[tokio::main]
async fn main() {
    // Observability
    fishcast_obs::init("fishcast-web");

    // Config
    let cfg = AppConfig::load().unwrap_or_default();
    let timezone: Tz = cfg
        .timezone()
        .parse()
        .expect("Invalid timezone in configuration");
    let http_bind = cfg.http_bind();

    // Build app and state
    let forecaster = Forecaster::new(Box::new(FmiClient::new()), Box::new(MoonEphemeris::new()));
    let (app, state) = fishcast_web::build_app(
        forecaster,
        DashboardConfig {
            timezone,
            place: cfg.location(),
            hours: cfg.hours(),
        },
    );

    // Start HTTP server
    let addr: SocketAddr = http_bind.parse().expect("Invalid HTTP bind address");
    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind TCP listener");

    // Mark ready just before serving
    fishcast_web::set_ready(&state, true);

    tracing::info!(%addr, "HTTP server listening");
    axum::serve(listener, app).await.expect("server error");
}
