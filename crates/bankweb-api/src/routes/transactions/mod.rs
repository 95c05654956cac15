//! Transaction routes - Filtered history, summary and simulated refresh
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering and shared HTML helpers

pub mod api;
pub mod page;

pub use api::{
    api_transaction_detail,
    api_transactions,
    api_transactions_refresh,
    api_transactions_summary,
    htmx_transactions_list,
    htmx_transactions_refresh,
    FilterQuery,
};

pub use page::page_transactions;
