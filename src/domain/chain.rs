use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::validation::ValidationError;

/// Blockchains the dashboard can query through Blockchair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Bitcoin,
    Ethereum,
    Litecoin,
    Dogecoin,
}

impl Chain {
    pub const ALL: [Chain; 4] = [
        Chain::Bitcoin,
        Chain::Ethereum,
        Chain::Litecoin,
        Chain::Dogecoin,
    ];

    /// Identifier used both by callers and in Blockchair URL paths
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Bitcoin => "bitcoin",
            Chain::Ethereum => "ethereum",
            Chain::Litecoin => "litecoin",
            Chain::Dogecoin => "dogecoin",
        }
    }

    /// Number of decimal places between the minor unit Blockchair reports
    /// (satoshi, wei, ...) and the chain's major unit
    pub fn decimals(&self) -> u32 {
        match self {
            Chain::Ethereum => 18,
            Chain::Bitcoin | Chain::Litecoin | Chain::Dogecoin => 8,
        }
    }

    /// Convert a minor-unit amount into the chain's major unit
    pub fn to_major_units(&self, minor: Decimal) -> Decimal {
        // 10^18 still fits in a u64
        let scale = Decimal::from(10u64.pow(self.decimals()));
        (minor / scale).normalize()
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chain {
    type Err = ValidationError;

    /// Case-sensitive: "Bitcoin" is not a chain
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chain::ALL
            .into_iter()
            .find(|chain| chain.as_str() == s)
            .ok_or_else(|| ValidationError::new("Invalid chain selected"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!("litecoin".parse::<Chain>().unwrap(), Chain::Litecoin);
        assert!("Litecoin".parse::<Chain>().is_err());
        assert!("".parse::<Chain>().is_err());
    }

    #[test]
    fn test_display_matches_identifier() {
        for chain in Chain::ALL {
            assert_eq!(chain.to_string().parse::<Chain>().unwrap(), chain);
        }
    }

    #[test]
    fn test_satoshi_conversion() {
        assert_eq!(Chain::Bitcoin.to_major_units(dec!(150000000)), dec!(1.5));
        assert_eq!(Chain::Dogecoin.to_major_units(dec!(1)), dec!(0.00000001));
    }

    #[test]
    fn test_wei_conversion_uses_eighteen_decimals() {
        assert_eq!(
            Chain::Ethereum.to_major_units(dec!(2500000000000000000)),
            dec!(2.5)
        );
    }
}
