//! Visit-recording middleware: the ingestion pipeline.
//!
//! Runs in front of every request and decides whether it is a qualifying
//! page view. Qualifying requests append one visit record to the store and
//! tag the response with `X-Session-Id` so client-side code can reference
//! the session in later heartbeat/track-nav calls.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{error, info};

use sitepulse_core::{referral, session, ua, visit::Visit};

use crate::geo::location_label;
use crate::state::AppState;

pub const SESSION_HEADER: &str = "x-session-id";

pub async fn record_visit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    // Only page loads count — not assets, media, or API calls.
    let path = request.uri().path();
    if path != "/" && path != "/index.html" {
        return next.run(request).await;
    }

    let user_agent = header_str(request.headers(), header::USER_AGENT.as_str()).to_string();
    let ip = client_ip(&request);

    if ua::is_bot(&user_agent) || state.config.is_excluded_ip(&ip) {
        return next.run(request).await;
    }

    let location = location_label(state.geo.locate(&ip));
    let referrer = referrer_header(request.headers()).to_string();
    let now = Utc::now();
    let session_id = session::mint_session_id(&ip, now);

    let visit = Visit {
        id: session_id.clone(),
        timestamp: now,
        ip,
        location,
        device: ua::device_type(&user_agent),
        browser: ua::browser(&user_agent),
        os: ua::os(&user_agent),
        source: referral::source(&referrer),
        user_agent,
        duration: 0,
        nav_count: 0,
    };

    let mut log = state.store.load().await;
    log.visits.push(visit);
    match state.store.save(&mut log).await {
        Ok(()) => info!(session_id = %session_id, "Visit recorded"),
        // Recording is best-effort: a dropped write never fails the page load.
        Err(e) => error!(error = %e, "Failed to persist visit"),
    }

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&session_id) {
        response.headers_mut().insert(SESSION_HEADER, value);
    }
    response
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// The `Referer` header, with the commonly seen misspelled variant as a
/// fallback.
fn referrer_header(headers: &HeaderMap) -> &str {
    let referer = header_str(headers, header::REFERER.as_str());
    if referer.is_empty() {
        header_str(headers, "referrer")
    } else {
        referer
    }
}

/// Resolve the client IP: first comma-separated entry of `X-Forwarded-For`
/// (proxy scenario), else the TCP peer address.
///
/// The header is client-supplied and trusted only for analytics labeling,
/// never for a security decision.
fn client_ip(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return forwarded.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
