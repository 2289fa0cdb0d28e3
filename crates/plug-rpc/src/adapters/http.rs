//! HTTP adapter.
//!
//! `GET /` dispatches the query string; `POST /` additionally merges a
//! form-encoded body over it. Every call answers 200 with the envelope,
//! failures included.

use std::net::SocketAddr;

use axum::extract::{RawQuery as UriQuery, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::{decode_form, extend_form};
use crate::domain::envelope::PlugResponse;
use crate::domain::params::RawQuery;
use crate::service::PlugService;

/// Build the router for a service
pub fn router(service: PlugService) -> Router {
    Router::new()
        .route("/", get(handle_get).post(handle_post))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve until the listener fails
pub async fn serve(listener: TcpListener, service: PlugService) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Plug HTTP server listening");
    }
    axum::serve(listener, router(service)).await
}

/// Bind `addr` and serve
pub async fn bind_and_serve(addr: SocketAddr, service: PlugService) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve(listener, service).await
}

async fn handle_get(State(service): State<PlugService>, UriQuery(query): UriQuery) -> impl IntoResponse {
    let query = RawQuery::Structured(decode_form(query.as_deref().unwrap_or_default()));
    into_http(service.handle(&query))
}

async fn handle_post(
    State(service): State<PlugService>,
    UriQuery(query): UriQuery,
    body: String,
) -> impl IntoResponse {
    let mut pairs = decode_form(query.as_deref().unwrap_or_default());
    extend_form(&mut pairs, &body);
    into_http(service.handle(&RawQuery::Structured(pairs)))
}

fn into_http(response: PlugResponse) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, response.content_type)], response.body)
}
