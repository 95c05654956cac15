//! HTTP server for the transaction history page with HTMX support
//!
//! Routes are organized into modules:
//! - routes::transactions: Filtered list, summary, refresh

pub mod error;
pub mod routes;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use bankweb_config::Config;
use bankweb_core::TransactionHistory;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub history: Arc<RwLock<TransactionHistory>>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::transactions::{
        api_transaction_detail, api_transactions, api_transactions_refresh, api_transactions_summary,
        htmx_transactions_list, htmx_transactions_refresh, page_transactions,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions/summary", get(api_transactions_summary))
        .route("/api/transactions/refresh", post(api_transactions_refresh))
        .route("/api/transactions/:id", get(api_transaction_detail))
        // HTMX page routes
        .route("/", get(page_transactions))
        .route("/transactions", get(page_transactions))
        // HTMX partial routes
        .route("/transactions/list", get(htmx_transactions_list))
        .route("/transactions/refresh", post(htmx_transactions_refresh))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Bankweb</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        bankweb_utils::escape_html(title),
        content
    )
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, inner_content: &str) -> String {
    let main = format!(
        "<main class='max-w-5xl mx-auto p-6'>{}</main>",
        inner_content
    );
    if is_htmx_request(headers) {
        main
    } else {
        base_html(title, &main)
    }
}

/// Start the HTTP server and serve until Ctrl+C
pub async fn start_server(config: Config, history: Arc<RwLock<TransactionHistory>>) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { history, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Bankweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /transactions (Transaction history)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}
