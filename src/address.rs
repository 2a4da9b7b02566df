use std::str::FromStr;

use ethers_core::types::Address;
use ethers_core::utils::to_checksum;

use crate::error::PendingError;

/// Parses a caller-supplied address.
///
/// Accepts 40 hex characters with an optional `0x` prefix. All-lowercase and
/// all-uppercase inputs are taken as-is; mixed-case inputs must carry a valid
/// EIP-55 checksum.
pub fn parse_address(raw: &str) -> Result<Address, PendingError> {
    let invalid = || PendingError::InvalidAddress(raw.to_string());

    let hex = raw.strip_prefix("0x").unwrap_or(raw);
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let address = Address::from_str(hex).map_err(|_| invalid())?;

    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && &to_checksum(&address, None)[2..] != hex {
        return Err(invalid());
    }

    Ok(address)
}

/// Key used by the `pending` bucket of `txpool_content`.
pub fn lower_hex(address: &Address) -> String {
    format!("0x{:x}", address)
}

/// Key used by the `baseFee` bucket of `txpool_content`.
pub fn checksum(address: &Address) -> String {
    to_checksum(address, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[test]
    fn accepts_checksummed_lower_and_unprefixed() {
        let a = parse_address(CHECKSUMMED).unwrap();
        let b = parse_address(&CHECKSUMMED.to_lowercase()).unwrap();
        let c = parse_address(&CHECKSUMMED[2..]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn rejects_bad_checksum() {
        let broken = "0x5AAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
        assert!(matches!(
            parse_address(broken),
            Err(PendingError::InvalidAddress(_))
        ));
    }

    #[test]
    fn rejects_wrong_length_and_non_hex() {
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address("").is_err());
        assert!(parse_address("0xzzzzb6053f3e94c9b9a09f33669435e7ef1beaed").is_err());
        assert!(parse_address("not-an-address").is_err());
    }

    #[test]
    fn renders_both_key_forms() {
        let address = parse_address(&CHECKSUMMED.to_lowercase()).unwrap();
        assert_eq!(lower_hex(&address), CHECKSUMMED.to_lowercase());
        assert_eq!(checksum(&address), CHECKSUMMED);
    }
}
