// API handlers - thin HTTP orchestration layer
// Handlers only deal with HTTP concerns:
// 1. Extract parameters from request
// 2. Call the proxy or domain logic
// 3. Transform the result to an HTTP response

pub mod dashboard;
pub mod proxy;

pub use dashboard::{
    address_summary_handler, latest_transactions_handler, stats_handler, transaction_handler,
};
pub use proxy::{preflight_handler, proxy_handler};
