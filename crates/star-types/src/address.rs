use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Wallet address of a star owner.
///
/// An address is the lowercase hex encoding of a 32-byte Ed25519 verifying
/// key. Parsing normalizes case, so `ABCD...` and `abcd...` name the same
/// wallet.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Length of an address in hex characters.
    pub const HEX_LEN: usize = 64;

    /// Build an address from raw verifying key bytes.
    pub fn from_key_bytes(bytes: [u8; 32]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Parse and normalize an address string.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s.len() != Self::HEX_LEN {
            return Err(TypeError::InvalidAddress(format!(
                "expected {} hex characters, got {}",
                Self::HEX_LEN,
                s.len()
            )));
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidAddress(
                "address must be hex encoded".into(),
            ));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// The verifying key bytes this address names.
    pub fn key_bytes(&self) -> Result<[u8; 32], TypeError> {
        let bytes = hex::decode(&self.0).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        bytes.try_into().map_err(|b: Vec<u8>| TypeError::InvalidLength {
            expected: 32,
            actual: b.len(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form for logs (first 8 hex characters).
    pub fn short(&self) -> &str {
        &self.0[..8]
    }
}

impl fmt::Debug for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletAddress({})", self.short())
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for WalletAddress {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WalletAddress> for String {
    fn from(address: WalletAddress) -> Self {
        address.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_bytes_roundtrip() {
        let address = WalletAddress::from_key_bytes([9; 32]);
        assert_eq!(address.key_bytes().unwrap(), [9; 32]);
        assert_eq!(address.as_str().len(), WalletAddress::HEX_LEN);
    }

    #[test]
    fn parse_normalizes_case() {
        let upper = "AB".repeat(32);
        let address = WalletAddress::parse(&upper).unwrap();
        assert_eq!(address.as_str(), "ab".repeat(32));
    }

    #[test]
    fn parse_rejects_short_input() {
        assert!(matches!(
            WalletAddress::parse("1xyz"),
            Err(TypeError::InvalidAddress(_))
        ));
    }

    #[test]
    fn parse_rejects_non_hex() {
        let bad = "g".repeat(64);
        assert!(matches!(
            WalletAddress::parse(&bad),
            Err(TypeError::InvalidAddress(_))
        ));
    }

    #[test]
    fn deserialize_validates() {
        let err = serde_json::from_str::<WalletAddress>("\"nope\"");
        assert!(err.is_err());
    }
}
