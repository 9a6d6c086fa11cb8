// Raw Blockchair dashboard payloads, as returned by the provider.
// Only the fields the dashboard reads are modelled; everything else is
// ignored during deserialization.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::str::FromStr;

/// `{ data: { <address|hash>: T }, context: {...} }`
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(default = "HashMap::new", deserialize_with = "null_as_default")]
    pub data: HashMap<String, T>,
    #[serde(default)]
    pub context: Option<Context>,
}

impl<T> Envelope<T> {
    /// Find the entry for `key`. Blockchair echoes keys in its own casing
    /// (lower-case for ethereum), so fall back to a case-insensitive match.
    pub fn take(&mut self, key: &str) -> Option<T> {
        if let Some(entry) = self.data.remove(key) {
            return Some(entry);
        }
        let found = self
            .data
            .keys()
            .find(|k| k.eq_ignore_ascii_case(key))
            .cloned()?;
        self.data.remove(&found)
    }

    /// Latest block height known to the provider
    pub fn state(&self) -> Option<i64> {
        self.context.as_ref().and_then(|c| c.state)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Context {
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub state: Option<i64>,
}

/// Address dashboard as returned by the plain `address` lookup. Its
/// `transactions` field is a list of bare hashes there and is not read.
#[derive(Debug, Deserialize)]
pub struct AddressDashboard {
    pub address: AddressInfo,
}

/// Address dashboard fetched with `transaction_details=true`
///
/// Ethereum dashboards carry `calls` instead of `transactions`, which leaves
/// `transactions` as `None`.
#[derive(Debug, Deserialize)]
pub struct DetailedAddressDashboard {
    #[serde(default)]
    pub transactions: Option<Vec<AddressTransaction>>,
}

#[derive(Debug, Deserialize)]
pub struct AddressInfo {
    #[serde(default)]
    pub balance: Option<MinorAmount>,
    #[serde(default)]
    pub balance_usd: Option<f64>,
    #[serde(default)]
    pub transaction_count: Option<u64>,
    #[serde(default)]
    pub first_seen_receiving: Option<String>,
    #[serde(default)]
    pub last_seen_receiving: Option<String>,
}

/// Entry of the address dashboard's `transactions` list when requested
/// with `transaction_details=true`
#[derive(Debug, Deserialize)]
pub struct AddressTransaction {
    pub hash: String,
    pub time: String,
    pub balance_change: MinorAmount,
}

#[derive(Debug, Deserialize)]
pub struct TransactionDashboard {
    pub transaction: TransactionInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inputs: Vec<Transfer>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub outputs: Vec<Transfer>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionInfo {
    /// -1 while the transaction sits in the mempool
    pub block_id: i64,
    pub time: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub fee: Option<MinorAmount>,
    #[serde(default)]
    pub fee_usd: Option<f64>,
    #[serde(default)]
    pub input_count: Option<u64>,
    #[serde(default)]
    pub output_count: Option<u64>,
    #[serde(default)]
    pub input_total: Option<MinorAmount>,
    #[serde(default)]
    pub output_total: Option<MinorAmount>,
}

#[derive(Debug, Deserialize)]
pub struct Transfer {
    pub recipient: String,
    pub value: MinorAmount,
}

/// An amount in the chain's minor unit. Bitcoin-like chains report plain
/// integers, ethereum reports wei as decimal strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MinorAmount(pub Decimal);

impl<'de> Deserialize<'de> for MinorAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Signed(i64),
            Unsigned(u64),
            Float(f64),
            Text(String),
        }

        let amount = match Raw::deserialize(deserializer)? {
            Raw::Signed(v) => Decimal::from(v),
            Raw::Unsigned(v) => Decimal::from(v),
            Raw::Float(v) => Decimal::try_from(v).map_err(serde::de::Error::custom)?,
            Raw::Text(v) => Decimal::from_str(v.trim()).map_err(serde::de::Error::custom)?,
        };
        Ok(MinorAmount(amount))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
