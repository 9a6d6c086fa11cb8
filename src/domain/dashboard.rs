// Dashboard lookups: validate input, forward through the proxy, then reshape
// the raw Blockchair payload into the dashboard's stable schema.

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::chain::Chain;
use super::DomainError;
use crate::models::blockchair::{
    AddressDashboard, DetailedAddressDashboard, Envelope, MinorAmount, TransactionDashboard,
    Transfer,
};
use crate::models::dashboard::{
    AddressSummary, LatestTransactionEntry, TransactionDetail, TransferEntry,
};
use crate::models::request::{Action, ProxyRequest};
use crate::proxy::BlockchairProxy;

/// Blockchair's timestamp layout, always UTC
const BLOCKCHAIR_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[tracing::instrument(skip(proxy))]
pub async fn fetch_address_summary(
    proxy: &BlockchairProxy,
    chain: Chain,
    address: &str,
) -> Result<AddressSummary, DomainError> {
    chain.validate_address(address)?;
    let address = address.trim();

    let request = ProxyRequest::new(Action::Address, chain.as_str()).with_address(address);
    let payload = proxy.forward(&request).await?;
    normalize_address_summary(payload, chain, address)
}

#[tracing::instrument(skip(proxy))]
pub async fn fetch_transaction_details(
    proxy: &BlockchairProxy,
    chain: Chain,
    tx_hash: &str,
) -> Result<TransactionDetail, DomainError> {
    super::validation::validate_transaction_hash(tx_hash)?;
    let tx_hash = tx_hash.trim();

    let request = ProxyRequest::new(Action::Transaction, chain.as_str()).with_tx_hash(tx_hash);
    let payload = proxy.forward(&request).await?;
    normalize_transaction_detail(payload, chain, tx_hash)
}

#[tracing::instrument(skip(proxy))]
pub async fn fetch_latest_transactions(
    proxy: &BlockchairProxy,
    chain: Chain,
    address: &str,
) -> Result<Vec<LatestTransactionEntry>, DomainError> {
    chain.validate_address(address)?;
    let address = address.trim();

    let request = ProxyRequest::new(Action::Latest, chain.as_str()).with_address(address);
    let payload = proxy.forward(&request).await?;
    normalize_latest_transactions(payload, chain, address)
}

/// Network statistics are passed through untyped: the `data` object of the
/// stats endpoint differs too much between chains to model.
#[tracing::instrument(skip(proxy))]
pub async fn fetch_blockchain_stats(
    proxy: &BlockchairProxy,
    chain: Chain,
) -> Result<Value, DomainError> {
    let mut payload = proxy
        .forward(&ProxyRequest::new(Action::Stats, chain.as_str()))
        .await?;

    match payload.get_mut("data").map(Value::take) {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(DomainError::NotFound(format!("Stats not available for {}", chain))),
    }
}

pub fn normalize_address_summary(
    payload: Value,
    chain: Chain,
    address: &str,
) -> Result<AddressSummary, DomainError> {
    let mut envelope: Envelope<AddressDashboard> = parse_envelope(payload)?;
    let info = envelope
        .take(address)
        .ok_or_else(|| DomainError::NotFound("Address not found".to_string()))?
        .address;

    Ok(AddressSummary {
        address: address.to_string(),
        balance: chain.to_major_units(info.balance.unwrap_or_default().0),
        balance_usd: info.balance_usd.unwrap_or(0.0),
        tx_count: info.transaction_count.unwrap_or(0),
        first_seen: parse_optional_time(info.first_seen_receiving.as_deref())?,
        last_seen: parse_optional_time(info.last_seen_receiving.as_deref())?,
        chain,
    })
}

pub fn normalize_transaction_detail(
    payload: Value,
    chain: Chain,
    tx_hash: &str,
) -> Result<TransactionDetail, DomainError> {
    let mut envelope: Envelope<TransactionDashboard> = parse_envelope(payload)?;
    let state = envelope.state();
    let dashboard = envelope
        .take(tx_hash)
        .ok_or_else(|| DomainError::NotFound("Transaction not found".to_string()))?;
    let tx = dashboard.transaction;

    let major = |amount: Option<MinorAmount>| chain.to_major_units(amount.unwrap_or_default().0);
    let transfers = |list: Vec<Transfer>| {
        list.into_iter()
            .map(|t| TransferEntry {
                recipient: t.recipient,
                value: chain.to_major_units(t.value.0),
            })
            .collect::<Vec<_>>()
    };

    Ok(TransactionDetail {
        hash: tx_hash.to_string(),
        block_id: tx.block_id,
        time: parse_time(&tx.time)?,
        size: tx.size.unwrap_or(0),
        fee: major(tx.fee),
        fee_usd: tx.fee_usd.unwrap_or(0.0),
        input_count: tx.input_count.unwrap_or(0),
        output_count: tx.output_count.unwrap_or(0),
        input_total: major(tx.input_total),
        output_total: major(tx.output_total),
        confirmations: confirmations(state, tx.block_id),
        inputs: transfers(dashboard.inputs),
        outputs: transfers(dashboard.outputs),
    })
}

/// Entries of the detailed address dashboard's `transactions` list. A
/// dashboard without that list (ethereum reports `calls`) yields no entries.
pub fn normalize_latest_transactions(
    payload: Value,
    chain: Chain,
    address: &str,
) -> Result<Vec<LatestTransactionEntry>, DomainError> {
    let mut envelope: Envelope<DetailedAddressDashboard> = parse_envelope(payload)?;
    let dashboard = envelope
        .take(address)
        .ok_or_else(|| DomainError::NotFound("Address not found".to_string()))?;

    let Some(transactions) = dashboard.transactions else {
        debug!(%chain, "Address dashboard has no transactions list");
        return Ok(Vec::new());
    };

    transactions
        .into_iter()
        .map(|tx| -> Result<LatestTransactionEntry, DomainError> {
            Ok(LatestTransactionEntry {
                time: parse_time(&tx.time)?,
                balance_change: chain.to_major_units(tx.balance_change.0),
                hash: tx.hash,
            })
        })
        .collect()
}

/// Blocks mined on top of (and including) the transaction's block.
/// Unconfirmed transactions report block id -1.
fn confirmations(state: Option<i64>, block_id: i64) -> u64 {
    match state {
        Some(state) if block_id >= 0 && state >= block_id => (state - block_id + 1) as u64,
        _ => 0,
    }
}

fn parse_envelope<T: DeserializeOwned>(payload: Value) -> Result<Envelope<T>, DomainError> {
    serde_json::from_value(payload).map_err(|e| {
        debug!(error = %e, "Unexpected Blockchair payload shape");
        DomainError::Malformed(e.to_string())
    })
}

fn parse_time(value: &str) -> Result<NaiveDateTime, DomainError> {
    NaiveDateTime::parse_from_str(value.trim(), BLOCKCHAIR_TIME_FORMAT)
        .map_err(|e| DomainError::Malformed(format!("invalid timestamp '{}': {}", value, e)))
}

fn parse_optional_time(value: Option<&str>) -> Result<Option<NaiveDateTime>, DomainError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_time(v).map(Some),
    }
}
