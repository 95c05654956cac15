//! Transactions page rendering - Full page and shared HTML helpers
//!
//! Endpoints:
//! - page_transactions: Transaction history page
//!
//! Helper functions:
//! - render_transaction_list: List container content or the empty state
//! - render_summary_cards: Summary counters above the list
//! - render_flash: Flash notification

use super::api::FilterQuery;
use crate::AppState;
use bankweb_config::{Config, ViewMode};
use bankweb_core::{FilterSpec, FilteredView, Notification, Severity, Summary, Transaction, TransactionKind};
use bankweb_utils::{escape_html, format_currency, format_number};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Transaction history page - filter form, summary cards and the list
///
/// A first visit without query parameters starts from the configured
/// default window.
pub async fn page_transactions(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    params: axum::extract::Query<FilterQuery>,
) -> axum::response::Html<String> {
    let history = state.history.read().await;
    let spec = if params.is_empty() {
        history.default_filter(state.config.history.default_window_days)
    } else {
        params.to_filter()
    };
    let view = history.apply(&spec);
    let view_mode = params.view_mode(&state.config);

    let inner_content = format!(
        r#"<div id='flash-container' class='fixed top-4 right-4 z-50 space-y-2'></div>
        <div class='flex items-center justify-between mb-4'>
            <h2 class='text-2xl font-bold'>Transaction History</h2>
            <div class='flex gap-2'>
                <button type='button' id='view-list' onclick="setView('list')" class='px-3 py-2 rounded-lg border {}' title='List view'>☰</button>
                <button type='button' id='view-card' onclick="setView('card')" class='px-3 py-2 rounded-lg border {}' title='Card view'>▦</button>
                <button hx-post='/transactions/refresh' hx-include='#filter-form' hx-target='#transaction-list' hx-indicator='#refresh-indicator'
                    class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 flex items-center gap-2'>
                    <span id='refresh-indicator' class='htmx-indicator'>⏳</span>
                    Refresh
                </button>
            </div>
        </div>
        {}
        <div id='summary-cards'>{}</div>
        <div id='transaction-list' class='{}'>{}</div>
        {}"#,
        toggle_class(view_mode == ViewMode::List),
        toggle_class(view_mode == ViewMode::Card),
        render_filter_form(&spec, &state.config),
        render_summary_cards(&view.summary, &state.config),
        view_class(view_mode),
        render_transaction_list(&view, &state.config),
        page_script(),
    );

    axum::response::Html(crate::page_response(&headers, "Transactions", &inner_content))
}

fn toggle_class(active: bool) -> &'static str {
    if active {
        "bg-indigo-50 text-indigo-600 border-indigo-200"
    } else {
        "bg-white text-gray-600"
    }
}

fn view_class(view_mode: ViewMode) -> &'static str {
    match view_mode {
        ViewMode::List => "list-view space-y-2",
        ViewMode::Card => "card-view grid grid-cols-1 md:grid-cols-3 gap-3",
    }
}

/// Filter form; every control re-requests the list fragment
pub fn render_filter_form(spec: &FilterSpec, config: &Config) -> String {
    let selected_kind = spec.kind.as_deref().unwrap_or("");
    let mut kind_options = format!(
        "<option value=''{}>All Types</option>",
        if selected_kind.is_empty() { " selected" } else { "" }
    );
    for kind in TransactionKind::all_known() {
        let selected = if kind.as_str() == selected_kind { " selected" } else { "" };
        kind_options.push_str(&format!(
            "<option value='{}'{}>{}</option>",
            kind.as_str(),
            selected,
            kind.label()
        ));
    }

    format!(
        r#"<form id='filter-form' class='flex flex-wrap gap-2 mb-4' onsubmit='return false'>
            <input type='date' name='date_from' value='{}' hx-get='/transactions/list' hx-include='#filter-form' hx-target='#transaction-list' hx-trigger='change'
                class='px-3 py-2 border rounded-lg'>
            <input type='date' name='date_to' value='{}' hx-get='/transactions/list' hx-include='#filter-form' hx-target='#transaction-list' hx-trigger='change'
                class='px-3 py-2 border rounded-lg'>
            <select name='type' hx-get='/transactions/list' hx-include='#filter-form' hx-target='#transaction-list' hx-trigger='change'
                class='px-3 py-2 border rounded-lg'>{}</select>
            <input type='search' id='search-input' name='search' value='{}' placeholder='Search transactions...'
                hx-get='/transactions/list' hx-include='#filter-form' hx-target='#transaction-list' hx-trigger='keyup changed delay:{}ms, search'
                class='px-3 py-2 border rounded-lg flex-1'>
        </form>"#,
        date_value(spec.date_from),
        date_value(spec.date_to),
        kind_options,
        escape_html(spec.search_term.as_deref().unwrap_or("")),
        config.history.search_debounce_ms,
    )
}

fn date_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Summary counters; carries its own id so it can be swapped out-of-band
pub fn render_summary_cards(summary: &Summary, config: &Config) -> String {
    let money = |amount: Decimal| format_currency(amount, &config.currency.symbol, config.currency.decimal_places);
    format!(
        r#"<div class='grid grid-cols-2 md:grid-cols-4 gap-3 mb-4'>
            <div class='bg-indigo-50 p-3 rounded-lg border border-indigo-100'><p class='text-xs text-indigo-600'>Total Transactions</p><p class='text-xl font-bold' data-summary='count'>{}</p></div>
            <div class='bg-red-50 p-3 rounded-lg border border-red-100'><p class='text-xs text-red-600'>Total Sent</p><p class='text-xl font-bold' data-summary='sent'>{}</p></div>
            <div class='bg-green-50 p-3 rounded-lg border border-green-100'><p class='text-xs text-green-600'>Total Received</p><p class='text-xl font-bold' data-summary='received'>{}</p></div>
            <div class='bg-purple-50 p-3 rounded-lg border border-purple-100'><p class='text-xs text-purple-600'>This Month</p><p class='text-xl font-bold' data-summary='month'>{}</p></div>
        </div>"#,
        format_number(summary.count),
        money(summary.total_sent),
        money(summary.total_received),
        format_number(summary.count_this_month),
    )
}

/// The list content, or the empty state when nothing matched
pub fn render_transaction_list(view: &FilteredView, config: &Config) -> String {
    if view.is_empty() {
        return render_empty_state();
    }
    view.transactions
        .iter()
        .map(|t| render_transaction_item(t, config))
        .collect()
}

pub fn render_empty_state() -> String {
    r#"<div class='empty-state text-center py-12 text-gray-500'>
            <div class='text-4xl mb-2'>📭</div>
            <h3 class='text-lg font-semibold'>No Transactions Found</h3>
            <p>No transactions match your current filters. Try adjusting your search criteria.</p>
        </div>"#
        .to_string()
}

fn render_transaction_item(t: &Transaction, config: &Config) -> String {
    let (direction, amount_class) = if t.is_sent() {
        ("sent", "text-red-600")
    } else {
        ("received", "text-green-600")
    };
    let title = if t.title().is_empty() { t.kind().label() } else { t.title() };
    let description = if t.description().is_empty() {
        String::new()
    } else {
        format!(
            "<p class='transaction-description text-sm text-gray-500'>{}</p>",
            escape_html(t.description())
        )
    };

    format!(
        r#"<div class='transaction-item {} flex items-center gap-3 p-3 bg-white rounded-lg border' data-id='{}' data-type='{}'>
            <div class='transaction-icon text-2xl' title='{}'>{}</div>
            <div class='transaction-details flex-1'>
                <p class='transaction-title font-medium'>{}</p>
                {}
                <p class='transaction-date text-xs text-gray-400'>{}</p>
            </div>
            <div class='transaction-amount font-semibold {}'>{}</div>
        </div>"#,
        direction,
        escape_html(t.id()),
        escape_html(t.kind().as_str()),
        t.kind().label(),
        kind_icon(t.kind()),
        escape_html(title),
        description,
        format_date(&t.date()),
        amount_class,
        format_amount(t, config),
    )
}

/// Icon for a kind; unknown tags use the transfer icon
pub fn kind_icon(kind: &TransactionKind) -> &'static str {
    match kind.display_kind() {
        TransactionKind::Deposit => "💰",
        TransactionKind::Withdrawal => "🏧",
        TransactionKind::Loan => "🏦",
        _ => "💸",
    }
}

/// Signed display amount: `-$50.00` when sent, `+$50.00` when received
pub fn format_amount(t: &Transaction, config: &Config) -> String {
    let sign = if t.is_sent() { '-' } else { '+' };
    format!(
        "{}{}",
        sign,
        format_currency(t.amount(), &config.currency.symbol, config.currency.decimal_places)
    )
}

/// Display date like `January 5, 2024, 09:30 AM`
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y, %I:%M %p").to_string()
}

/// Flash message; removed client-side after the configured delay
pub fn render_flash(notification: &Notification, config: &Config) -> String {
    let color = match notification.severity {
        Severity::Success => "bg-green-50 text-green-800 border-green-200",
        Severity::Info => "bg-blue-50 text-blue-800 border-blue-200",
        Severity::Warning => "bg-yellow-50 text-yellow-800 border-yellow-200",
        Severity::Error => "bg-red-50 text-red-800 border-red-200",
    };
    format!(
        r#"<div class='flash flash-{} px-4 py-3 rounded-lg border shadow {}' role='alert' data-auto-hide='{}'>
            <span>{}</span>
            <button type='button' class='ml-2' onclick='this.parentElement.remove()'>&times;</button>
        </div>"#,
        notification.severity,
        color,
        config.notifications.auto_hide_ms,
        escape_html(&notification.message),
    )
}

fn page_script() -> &'static str {
    r#"<script>
        function setView(mode) {
            var list = document.getElementById('transaction-list');
            list.className = mode === 'card'
                ? 'card-view grid grid-cols-1 md:grid-cols-3 gap-3'
                : 'list-view space-y-2';
            ['list', 'card'].forEach(function(m) {
                var btn = document.getElementById('view-' + m);
                btn.classList.toggle('bg-indigo-50', m === mode);
                btn.classList.toggle('text-indigo-600', m === mode);
            });
        }
        document.addEventListener('keydown', function(e) {
            var search = document.getElementById('search-input');
            if ((e.ctrlKey || e.metaKey) && e.key === 'f') {
                e.preventDefault();
                search.focus();
            } else if (e.key === 'Escape') {
                document.querySelectorAll('#filter-form input, #filter-form select').forEach(function(el) { el.value = ''; });
                htmx.trigger(search, 'search');
            }
        });
        document.body.addEventListener('htmx:afterSettle', function() {
            document.querySelectorAll('[data-auto-hide]').forEach(function(el) {
                if (el.dataset.scheduled) return;
                el.dataset.scheduled = '1';
                setTimeout(function() { el.remove(); }, Number(el.dataset.autoHide));
            });
        });
    </script>"#
}
