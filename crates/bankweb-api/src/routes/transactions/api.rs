//! Transactions API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Filtered, sorted list with summary (JSON)
//! - api_transaction_detail: Single transaction (JSON)
//! - api_transactions_summary: Summary for a filter (JSON)
//! - api_transactions_refresh: Simulated refresh (JSON)
//! - htmx_transactions_list: List fragment (HTML)
//! - htmx_transactions_refresh: List fragment plus flash (HTML)

use super::page::{render_flash, render_summary_cards, render_transaction_list};
use crate::{ApiError, AppState};
use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::{Form, Json};
use bankweb_config::{Config, ViewMode};
use bankweb_core::{BufferedNotifier, FilterSpec, FilteredView, LogNotifier, Notification, Notifier, Summary, Transaction};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Filter parameters as submitted by the page's form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterQuery {
    pub date_from: String,
    pub date_to: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub search: String,
    pub view: Option<String>,
}

impl FilterQuery {
    pub fn to_filter(&self) -> FilterSpec {
        FilterSpec::from_inputs(&self.date_from, &self.date_to, &self.kind, &self.search)
    }

    /// No filter field was submitted
    pub fn is_empty(&self) -> bool {
        self.date_from.is_empty() && self.date_to.is_empty() && self.kind.is_empty() && self.search.is_empty()
    }

    /// Requested view mode, falling back to the configured default
    pub fn view_mode(&self, config: &Config) -> ViewMode {
        self.view
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or(config.history.default_view)
    }
}

/// Refresh result for JSON clients
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    #[serde(flatten)]
    pub view: FilteredView,
    pub notifications: Vec<Notification>,
}

/// Filtered transactions, newest first, with their summary (JSON API)
pub async fn api_transactions(state: State<AppState>, params: Query<FilterQuery>) -> Json<FilteredView> {
    let history = state.history.read().await;
    Json(history.apply(&params.to_filter()))
}

/// Get single transaction detail (JSON API)
pub async fn api_transaction_detail(
    state: State<AppState>,
    path: Path<String>,
) -> Result<Json<Transaction>, ApiError> {
    let history = state.history.read().await;
    history
        .transaction(path.as_str())
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound {
            resource: format!("transaction {}", path.as_str()),
        })
}

/// Summary for the submitted filter (JSON API)
pub async fn api_transactions_summary(state: State<AppState>, params: Query<FilterQuery>) -> Json<Summary> {
    let history = state.history.read().await;
    Json(history.apply(&params.to_filter()).summary)
}

/// Simulated refresh: waits, re-applies the filter and reports (JSON API)
pub async fn api_transactions_refresh(state: State<AppState>, params: Query<FilterQuery>) -> Json<RefreshResponse> {
    refresh_delay(&state.config).await;

    let history = state.history.read().await;
    let notifier = BufferedNotifier::new();
    let view = history.refresh(&params.to_filter(), &notifier);
    Json(RefreshResponse {
        view,
        notifications: drain_logged(&notifier),
    })
}

/// Transaction list fragment (HTML)
///
/// The summary cards ride along as an out-of-band swap so they always
/// describe the list being shown.
pub async fn htmx_transactions_list(state: State<AppState>, params: Query<FilterQuery>) -> Html<String> {
    let history = state.history.read().await;
    let view = history.apply(&params.to_filter());
    Html(render_list_fragment(&view, &state.config))
}

/// Refresh fragment: the list plus a flash message (HTML)
///
/// The page posts its filter form, so the filter arrives as a form body.
pub async fn htmx_transactions_refresh(state: State<AppState>, params: Form<FilterQuery>) -> Html<String> {
    refresh_delay(&state.config).await;

    let history = state.history.read().await;
    let notifier = BufferedNotifier::new();
    let view = history.refresh(&params.to_filter(), &notifier);

    let flashes: String = drain_logged(&notifier)
        .iter()
        .map(|n| render_flash(n, &state.config))
        .collect();

    Html(format!(
        "{}<div id='flash-container' class='fixed top-4 right-4 z-50 space-y-2' hx-swap-oob='true'>{}</div>",
        render_list_fragment(&view, &state.config),
        flashes
    ))
}

fn render_list_fragment(view: &FilteredView, config: &Config) -> String {
    format!(
        "{}<div id='summary-cards' hx-swap-oob='true'>{}</div>",
        render_transaction_list(view, config),
        render_summary_cards(&view.summary, config)
    )
}

/// Take pending notifications, echoing each to the server log
fn drain_logged(notifier: &BufferedNotifier) -> Vec<Notification> {
    let notifications = notifier.drain();
    for notification in &notifications {
        LogNotifier.notify(notification.clone());
    }
    notifications
}

async fn refresh_delay(config: &Config) {
    let delay = config.history.refresh_delay_ms;
    if delay > 0 {
        log::debug!("Simulating refresh latency of {}ms", delay);
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}
