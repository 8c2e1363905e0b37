use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use opentelemetry::metrics::{Counter, MeterProvider};
use opentelemetry_prometheus::exporter;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use prometheus::{Encoder, Registry, TextEncoder};
use serde::Deserialize;

use fishcast_core::{top_n, ForecastError, ForecastRequest, Forecaster};

/// Defaults applied when the dashboard does not say otherwise.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub timezone: Tz,
    pub place: String,
    pub hours: u32,
}

pub struct AppState {
    ready: AtomicBool,
    registry: Registry,
    #[allow(dead_code)]
    provider: SdkMeterProvider,
    requests_total: Counter<u64>,
    forecaster: Forecaster,
    config: DashboardConfig,
}

pub fn build_app(forecaster: Forecaster, config: DashboardConfig) -> (Router, Arc<AppState>) {
    // Prometheus exporter via OpenTelemetry
    let registry = Registry::new();
    let reader = exporter()
        .with_registry(registry.clone())
        .build()
        .expect("prom exporter");
    let provider = SdkMeterProvider::builder().with_reader(reader).build();
    let meter = provider.meter("fishcast-web");

    let requests_total = meter
        .u64_counter("fishcast_requests_total")
        .with_description("Total HTTP requests served")
        .init();

    let state = Arc::new(AppState {
        ready: AtomicBool::new(false),
        registry,
        provider,
        requests_total,
        forecaster,
        config,
    });

    let router = Router::new()
        .route("/", get(dashboard))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .route("/api/v1/forecast", get(forecast))
        .route("/api/v1/moon", get(moon))
        .with_state(Arc::clone(&state));

    (router, state)
}

pub fn set_ready(state: &Arc<AppState>, is_ready: bool) {
    state.ready.store(is_ready, Ordering::Relaxed);
}

async fn dashboard() -> Html<&'static str> {
    Html(include_str!("../assets/dashboard.html"))
}

async fn healthz(State(state): State<Arc<AppState>>) -> StatusCode {
    state.requests_total.add(1, &[]);
    StatusCode::OK
}

async fn readyz(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.ready.load(Ordering::Relaxed) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn metrics(
    State(state): State<Arc<AppState>>,
) -> (
    [(axum::http::header::HeaderName, axum::http::HeaderValue); 1],
    String,
) {
    let encoder = TextEncoder::new();
    let metric_families = state.registry.gather();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buf) {
        tracing::warn!(error=?e, "failed to encode metrics");
    }
    let body = String::from_utf8(buf).unwrap_or_default();
    let header = (
        header::CONTENT_TYPE,
        axum::http::HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    ([header], body)
}

#[derive(Deserialize)]
struct ForecastQuery {
    place: Option<String>,
    hours: Option<u32>,
    /// Sea level measurement location; enables sea level scoring
    sealevel: Option<String>,
}

async fn forecast(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ForecastQuery>,
) -> Response {
    state.requests_total.add(1, &[]);

    let place = query.place.unwrap_or_else(|| state.config.place.clone());
    let hours = query.hours.unwrap_or(state.config.hours);

    let mut request = ForecastRequest::new(state.config.timezone, place.clone(), hours);
    if let Some(sealevel) = query.sealevel {
        request = request.with_sea_level(sealevel);
    }

    match state.forecaster.score_forecast(&request).await {
        Ok(records) => {
            let top = top_n(&records, 5);
            let body = serde_json::json!({
                "place": place,
                "hours": hours,
                "records": records,
                "top": top,
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => {
            tracing::warn!(%place, %error, "forecast request failed");
            let status = match &error {
                ForecastError::InvalidConfiguration(_) => StatusCode::BAD_REQUEST,
                ForecastError::DataUnavailable(_) => StatusCode::BAD_GATEWAY,
            };
            let body = serde_json::json!({ "error": error.to_string() });
            (status, Json(body)).into_response()
        }
    }
}

async fn moon(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.requests_total.add(1, &[]);

    let window = state.forecaster.moon_window(Utc::now());
    let local = |instant: DateTime<Utc>| {
        instant
            .with_timezone(&state.config.timezone)
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, false)
    };

    Json(serde_json::json!({
        "prev_full": local(window.prev_full),
        "next_full": local(window.next_full),
        "prev_new": local(window.prev_new),
        "next_new": local(window.next_new),
    }))
}
