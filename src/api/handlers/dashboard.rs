// Typed dashboard endpoints - validate path input, then delegate to the
// domain layer which calls the proxy and normalizes the payload.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::api::error::ApiResult;
use crate::api::SharedProxy;
use crate::domain::{self, validate_chain};
use crate::models::dashboard::{AddressSummary, LatestTransactionEntry, TransactionDetail};

#[tracing::instrument(skip(proxy))]
pub async fn address_summary_handler(
    Path((chain, address)): Path<(String, String)>,
    State(proxy): State<SharedProxy>,
) -> ApiResult<Json<AddressSummary>> {
    let chain = validate_chain(&chain)?;
    Ok(Json(domain::fetch_address_summary(&proxy, chain, &address).await?))
}

#[tracing::instrument(skip(proxy))]
pub async fn latest_transactions_handler(
    Path((chain, address)): Path<(String, String)>,
    State(proxy): State<SharedProxy>,
) -> ApiResult<Json<Vec<LatestTransactionEntry>>> {
    let chain = validate_chain(&chain)?;
    Ok(Json(domain::fetch_latest_transactions(&proxy, chain, &address).await?))
}

#[tracing::instrument(skip(proxy))]
pub async fn transaction_handler(
    Path((chain, tx_hash)): Path<(String, String)>,
    State(proxy): State<SharedProxy>,
) -> ApiResult<Json<TransactionDetail>> {
    let chain = validate_chain(&chain)?;
    Ok(Json(domain::fetch_transaction_details(&proxy, chain, &tx_hash).await?))
}

#[tracing::instrument(skip(proxy))]
pub async fn stats_handler(
    Path(chain): Path<String>,
    State(proxy): State<SharedProxy>,
) -> ApiResult<Json<Value>> {
    let chain = validate_chain(&chain)?;
    Ok(Json(domain::fetch_blockchain_stats(&proxy, chain).await?))
}
