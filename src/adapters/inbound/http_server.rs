//! HTTP Server
//!
//! Serves the caller's IP as plain text (CLI clients) or HTML (browsers),
//! plus a per-IP stats page and a health endpoint.

use crate::adapters::inbound::client_ip::client_ip;
use crate::application::GeoService;
use crate::domain::entities::GeoRecord;
use crate::domain::ports::VisitCounter;
use crate::infrastructure::shutdown_signal;
use axum::{
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const TEXT_HTML: &str = "text/html; charset=utf-8";

/// User-agent fragments that get the plain-text response.
const CLI_AGENTS: [&str; 3] = ["curl", "wget", "httpie"];

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub geo_cache_entries: usize,
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub geo: Arc<GeoService>,
    pub visits: Arc<dyn VisitCounter>,
}

impl AppState {
    pub fn new(geo: Arc<GeoService>, visits: Arc<dyn VisitCounter>) -> Self {
        Self { geo, visits }
    }
}

/// Build the application router.
///
/// `/stats` and `/health` are explicit routes; every other path and method
/// lands on the IP page.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", any(stats_handler))
        .fallback(index_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// HTTP server for the IP page.
pub struct HttpServer {
    listen_addr: String,
    state: AppState,
}

impl HttpServer {
    pub fn new(listen_addr: String, state: AppState) -> Self {
        Self { listen_addr, state }
    }

    /// Bind the configured address and serve until a shutdown signal.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run(&self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.listen_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already-bound listener until a shutdown signal.
    pub async fn serve(&self, listener: TcpListener) -> anyhow::Result<()> {
        tracing::info!("ipcheck listening on {}", listener.local_addr()?);

        let app = router(self.state.clone());
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        tracing::info!("ipcheck stopped");
        Ok(())
    }
}

// Handler functions

async fn index_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Response {
    let ip = client_ip(&headers, Some(peer));
    let geo = state.geo.lookup(&ip).await;

    if let Err(e) = state.visits.record_visit(&ip).await {
        tracing::error!("db update error: {:?}", e);
        return internal_error();
    }

    if is_cli(&headers) {
        ([(header::CONTENT_TYPE, TEXT_PLAIN)], format!("{}\n", ip)).into_response()
    } else {
        ([(header::CONTENT_TYPE, TEXT_HTML)], render_page(&ip, &geo)).into_response()
    }
}

async fn stats_handler(State(state): State<AppState>) -> Response {
    let visits = match state.visits.all_visits().await {
        Ok(visits) => visits,
        Err(e) => {
            tracing::error!("db view error: {:?}", e);
            return internal_error();
        }
    };

    let mut body = String::new();
    for visit in visits {
        let geo = state.geo.lookup(&visit.ip).await;
        body.push_str(&format!(
            "IP: {} | Country: {} ({}) | Count: {}\n",
            visit.ip,
            fallback(&geo.country, "unknown"),
            fallback(&geo.code, "--"),
            visit.count
        ));
    }

    ([(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response()
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        geo_cache_entries: state.geo.cached_entries(),
    };
    Json(response)
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, TEXT_PLAIN)],
        "internal error\n",
    )
        .into_response()
}

fn is_cli(headers: &HeaderMap) -> bool {
    let ua = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_lowercase();
    CLI_AGENTS.iter().any(|agent| ua.contains(agent))
}

fn fallback<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_page(ip: &str, geo: &GeoRecord) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>IP Check</title>
    <style>
        body {{font-family: -apple-system, system-ui, sans-serif; background: #fdfdfd; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0; color: #444;}}
        .container {{text-align: center; padding: 20px;}}
        h1 {{font-weight: normal; font-size: 1.1rem; color: #888; margin-bottom: 5px;}}
        .ip {{font-size: clamp(1.5rem, 8vw, 2.5rem); font-weight: bold; color: #222; margin-bottom: 10px;}}
        .country {{font-size: 1.1rem; color: #666;}}
    </style>
</head>
<body>
    <div class="container">
        <h1>Your IP address</h1>
        <div class="ip">{ip}</div>
        <div class="country">{country} ({code})</div>
    </div>
</body>
</html>"#,
        ip = escape_html(ip),
        country = escape_html(fallback(&geo.country, "unknown")),
        code = escape_html(fallback(&geo.code, "--")),
    )
}
