//! HTTP read API over the aggregate store.
//!
//! Uses `axum` for routing with CORS support. Handlers only read the
//! store; they never trigger a fetch.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::core::store::{AggregateStore, DataResponse};

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AggregateStore>,
}

/// `?limit=N`; kept as text so a bad value degrades to "all" instead of 400
#[derive(Debug, Default, Deserialize)]
pub struct DataQuery {
    limit: Option<String>,
}

impl DataQuery {
    /// Positive limit, or `None` for absent, zero or unparsable values.
    pub fn limit(&self) -> Option<usize> {
        self.limit
            .as_deref()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
    }
}

/// Build the router (separate from `start_server` for tests).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/data", get(data_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server.
///
/// Blocks until the server shuts down.
pub async fn start_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    info!(address = %addr, "Starting read API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

/// GET /health: server status
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().timestamp_millis(),
    }))
}

/// GET /api/data: ranked comparison records plus run statistics
async fn data_handler(
    State(state): State<AppState>,
    Query(query): Query<DataQuery>,
) -> Json<DataResponse> {
    Json(state.store.read(query.limit()).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::types::{InstrumentQuote, VenueSnapshot};
    use crate::core::spread::SpreadEngine;

    async fn spawn_server(store: Arc<AggregateStore>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(AppState { store })).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn get_json(url: &str) -> serde_json::Value {
        let response = reqwest::get(url).await.unwrap();
        assert_eq!(response.status(), 200);
        response.json().await.unwrap()
    }

    async fn populated_store() -> Arc<AggregateStore> {
        let engine = SpreadEngine::default();
        let a = VenueSnapshot::from_quotes(vec![
            InstrumentQuote::new("BTC", 3600).with_price(100.0).with_funding(0.03),
        ]);
        let b = VenueSnapshot::from_quotes(vec![
            InstrumentQuote::new("BTC", 3600).with_price(101.0).with_funding(0.001),
            InstrumentQuote::new("ETH", 3600).with_price(10.0).with_funding(0.002),
            InstrumentQuote::new("SOL", 3600).with_price(5.0).with_funding(-0.001),
        ]);
        let store = Arc::new(AggregateStore::new());
        store.replace(engine.join(&a, &b, None), engine.counts(&a, &b)).await;
        store
    }

    #[test]
    fn test_limit_parsing() {
        let q = |s: &str| DataQuery { limit: Some(s.to_string()) }.limit();
        assert_eq!(q("5"), Some(5));
        assert_eq!(q("0"), None);
        assert_eq!(q("abc"), None);
        assert_eq!(q("-3"), None);
        assert_eq!(DataQuery::default().limit(), None);
    }

    #[tokio::test]
    async fn test_data_before_first_cycle() {
        let base = spawn_server(Arc::new(AggregateStore::new())).await;
        let body = get_json(&format!("{}/api/data", base)).await;
        assert_eq!(body["summary"], serde_json::json!([]));
        assert_eq!(body["stats"]["update_count"], 0);
        assert_eq!(body["stats"]["last_update"], "-");
    }

    #[tokio::test]
    async fn test_data_with_limit() {
        let base = spawn_server(populated_store().await).await;

        let body = get_json(&format!("{}/api/data", base)).await;
        let summary = body["summary"].as_array().unwrap();
        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0]["symbol"], "BTC");
        assert_eq!(summary[0]["recommendation"]["tier"], 3);
        assert_eq!(body["stats"]["total_symbols"], 3);
        assert_eq!(body["stats"]["high_funding_count"], 1);

        let body = get_json(&format!("{}/api/data?limit=1", base)).await;
        assert_eq!(body["summary"].as_array().unwrap().len(), 1);

        let body = get_json(&format!("{}/api/data?limit=oops", base)).await;
        assert_eq!(body["summary"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_health() {
        let base = spawn_server(Arc::new(AggregateStore::new())).await;
        let body = get_json(&format!("{}/health", base)).await;
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].as_i64().unwrap() > 0);
    }
}
