use ethers_core::types::U256;
use ethers_core::utils::format_units;

use crate::error::NormalizeError;

/// Parses a JSON-RPC quantity. Always base 16, with or without `0x`.
pub fn parse_hex_quantity(field: &'static str, raw: &str) -> Result<U256, NormalizeError> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    if digits.is_empty() {
        return Err(NormalizeError::BadQuantity {
            field,
            raw: raw.to_string(),
        });
    }
    U256::from_str_radix(digits, 16).map_err(|_| NormalizeError::BadQuantity {
        field,
        raw: raw.to_string(),
    })
}

pub fn to_u64(field: &'static str, value: U256) -> Result<u64, NormalizeError> {
    let as_u128: u128 = value
        .try_into()
        .map_err(|_| NormalizeError::Overflow { field })?;
    u64::try_from(as_u128).map_err(|_| NormalizeError::Overflow { field })
}

pub fn ether(field: &'static str, wei: U256) -> Result<String, NormalizeError> {
    human(field, wei, "ether")
}

pub fn gwei(field: &'static str, wei: U256) -> Result<String, NormalizeError> {
    human(field, wei, "gwei")
}

fn human(field: &'static str, amount: U256, unit: &str) -> Result<String, NormalizeError> {
    let formatted = format_units(amount, unit).map_err(|e| NormalizeError::Units {
        field,
        reason: e.to_string(),
    })?;
    Ok(trim_fraction(&formatted))
}

// "1.500000000" -> "1.5", "2.000" -> "2.0", "7" -> "7.0"
fn trim_fraction(formatted: &str) -> String {
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => format!("{formatted}.0"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_quantities_parse_base16() {
        assert_eq!(parse_hex_quantity("nonce", "0x5").unwrap(), U256::from(5u64));
        assert_eq!(parse_hex_quantity("nonce", "0x1f").unwrap(), U256::from(31u64));
        assert_eq!(parse_hex_quantity("nonce", "10").unwrap(), U256::from(16u64));
        assert_eq!(parse_hex_quantity("nonce", "0x0").unwrap(), U256::zero());
    }

    #[test]
    fn bad_hex_is_rejected() {
        assert!(matches!(
            parse_hex_quantity("gas", "0x"),
            Err(NormalizeError::BadQuantity { field: "gas", .. })
        ));
        assert!(parse_hex_quantity("gas", "0xzz").is_err());
    }

    #[test]
    fn u64_overflow_is_reported() {
        assert_eq!(to_u64("nonce", U256::from(42u64)).unwrap(), 42);
        assert_eq!(
            to_u64("nonce", U256::from(u64::MAX) + U256::one()),
            Err(NormalizeError::Overflow { field: "nonce" })
        );
    }

    #[test]
    fn formats_ether_and_gwei() {
        let one_ether = U256::exp10(18);
        assert_eq!(ether("value", one_ether).unwrap(), "1.0");
        assert_eq!(ether("value", U256::zero()).unwrap(), "0.0");
        assert_eq!(
            ether("value", U256::from(1_500_000_000_000_000_000u64)).unwrap(),
            "1.5"
        );
        assert_eq!(gwei("gasPrice", U256::from(1_500_000_000u64)).unwrap(), "1.5");
        assert_eq!(gwei("gasPrice", U256::from(1u64)).unwrap(), "0.000000001");
    }

    #[test]
    fn trims_fraction() {
        assert_eq!(trim_fraction("3.100"), "3.1");
        assert_eq!(trim_fraction("3.000"), "3.0");
        assert_eq!(trim_fraction("12"), "12.0");
    }
}
