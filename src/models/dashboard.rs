use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::chain::Chain;

/// Balance overview of one address. Amounts are in the chain's major unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSummary {
    pub address: String,
    pub balance: Decimal,
    pub balance_usd: f64,
    pub tx_count: u64,
    pub first_seen: Option<NaiveDateTime>,
    pub last_seen: Option<NaiveDateTime>,
    pub chain: Chain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetail {
    pub hash: String,
    pub block_id: i64,
    pub time: NaiveDateTime,
    pub size: u64,
    pub fee: Decimal,
    pub fee_usd: f64,
    pub input_count: u64,
    pub output_count: u64,
    pub input_total: Decimal,
    pub output_total: Decimal,
    pub confirmations: u64,
    pub inputs: Vec<TransferEntry>,
    pub outputs: Vec<TransferEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferEntry {
    pub recipient: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestTransactionEntry {
    pub hash: String,
    pub time: NaiveDateTime,
    pub balance_change: Decimal,
}
