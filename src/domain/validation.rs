// Pre-flight input validation - runs before any upstream call is made.
// Every check returns at most one message; rules are applied in the order
// required -> length -> pattern and the first violation wins.

use super::chain::Chain;

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const TX_HASH_MIN_LEN: usize = 32;
const TX_HASH_MAX_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a chain identifier (exact, case-sensitive match)
pub fn validate_chain(value: &str) -> ValidationResult<Chain> {
    value.parse()
}

/// Validate a wallet address for the given chain identifier
pub fn validate_address(address: &str, chain: &str) -> ValidationResult<()> {
    if address.trim().is_empty() {
        return Err(ValidationError::new("Address is required"));
    }
    validate_chain(chain)?.validate_address(address)
}

/// Validate a transaction hash: 32-128 characters of hex, optionally `0x`-prefixed
pub fn validate_transaction_hash(hash: &str) -> ValidationResult<()> {
    let trimmed = hash.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("Transaction hash is required"));
    }

    let len = trimmed.chars().count();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let well_formed = (TX_HASH_MIN_LEN..=TX_HASH_MAX_LEN).contains(&len)
        && !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_hexdigit());

    if !well_formed {
        return Err(ValidationError::new("Invalid transaction hash format"));
    }
    Ok(())
}

impl Chain {
    /// Check the shape of an address on this chain. Leading and trailing
    /// whitespace is ignored.
    pub fn validate_address(&self, address: &str) -> ValidationResult<()> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ValidationError::new("Address is required"));
        }

        match self {
            Chain::Bitcoin => {
                check_length(address, "Bitcoin", 26, 62)?;
                check_pattern(
                    is_base58_address(address, &['1', '3'], 25, 34)
                        || is_bech32_address(address, "bc1"),
                    "Invalid Bitcoin address format",
                )
            }
            Chain::Ethereum => check_pattern(
                is_ethereum_address(address),
                "Invalid Ethereum address format",
            ),
            Chain::Litecoin => {
                check_length(address, "Litecoin", 26, 62)?;
                check_pattern(
                    is_base58_address(address, &['L', 'M'], 25, 34)
                        || is_bech32_address(address, "ltc1"),
                    "Invalid Litecoin address format",
                )
            }
            Chain::Dogecoin => {
                check_length(address, "Dogecoin", 26, 34)?;
                check_pattern(is_dogecoin_address(address), "Invalid Dogecoin address format")
            }
        }
    }
}

fn check_length(address: &str, label: &str, min: usize, max: usize) -> ValidationResult<()> {
    let len = address.chars().count();
    if len < min {
        return Err(ValidationError::new(format!(
            "{} address must be at least {} characters",
            label, min
        )));
    }
    if len > max {
        return Err(ValidationError::new(format!(
            "{} address must be at most {} characters",
            label, max
        )));
    }
    Ok(())
}

fn check_pattern(matched: bool, message: &str) -> ValidationResult<()> {
    if matched {
        Ok(())
    } else {
        Err(ValidationError::new(message))
    }
}

/// Address patterns are matched case-insensitively, so a character is
/// accepted when either of its cases belongs to the alphabet.
fn is_base58_char(c: char) -> bool {
    BASE58_ALPHABET.contains(c.to_ascii_lowercase()) || BASE58_ALPHABET.contains(c.to_ascii_uppercase())
}

fn count_all(body: &str, pred: fn(char) -> bool) -> Option<usize> {
    body.chars().try_fold(0, |n, c| pred(c).then_some(n + 1))
}

/// `<version char><base58 body>` as used by legacy and script addresses
fn is_base58_address(address: &str, versions: &[char], min_body: usize, max_body: usize) -> bool {
    let mut chars = address.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !versions.iter().any(|v| v.eq_ignore_ascii_case(&first)) {
        return false;
    }
    count_all(chars.as_str(), is_base58_char).is_some_and(|n| (min_body..=max_body).contains(&n))
}

/// `<hrp><39..=59 alphanumerics>` segwit addresses
fn is_bech32_address(address: &str, hrp: &str) -> bool {
    let Some(prefix) = address.get(..hrp.len()) else {
        return false;
    };
    if !prefix.eq_ignore_ascii_case(hrp) {
        return false;
    }
    count_all(&address[hrp.len()..], |c| c.is_ascii_alphanumeric())
        .is_some_and(|n| (39..=59).contains(&n))
}

fn is_ethereum_address(address: &str) -> bool {
    address.len() == 42
        && address.starts_with("0x")
        && address[2..].chars().all(|c| c.is_ascii_hexdigit())
}

fn is_dogecoin_address(address: &str) -> bool {
    let mut chars = address.chars();
    let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
        return false;
    };
    let second_ok = match second.to_ascii_uppercase() {
        '5'..='9' => true,
        c @ 'A'..='U' => c != 'I' && c != 'O',
        _ => false,
    };
    first.eq_ignore_ascii_case(&'D')
        && second_ok
        && count_all(chars.as_str(), is_base58_char).is_some_and(|n| (24..=32).contains(&n))
}
