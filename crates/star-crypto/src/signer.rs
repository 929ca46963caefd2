use std::fmt;

use star_types::WalletAddress;

/// Prefix bound into every signed message so a wallet signature over a
/// challenge can never double as a signature over anything else.
pub const SIGNED_MESSAGE_PREFIX: &[u8] = b"star-registry-signed-message-v1:";

/// Bytes actually covered by a wallet message signature:
/// prefix, message length as little-endian u64, message.
pub fn signed_message_bytes(message: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(SIGNED_MESSAGE_PREFIX.len() + 8 + message.len());
    bytes.extend_from_slice(SIGNED_MESSAGE_PREFIX);
    bytes.extend_from_slice(&(message.len() as u64).to_le_bytes());
    bytes.extend_from_slice(message.as_bytes());
    bytes
}

/// Ed25519 wallet key (private). Lives with the wallet, never with the ledger.
pub struct WalletKey(ed25519_dalek::SigningKey);

/// Ed25519 verifying key recovered from a wallet address.
#[derive(Clone, PartialEq, Eq)]
pub struct WalletVerifier(ed25519_dalek::VerifyingKey);

/// Ed25519 signature over a wallet message.
#[derive(Clone, PartialEq, Eq)]
pub struct MessageSignature(ed25519_dalek::Signature);

impl WalletKey {
    /// Generate a new random wallet key.
    pub fn generate() -> Self {
        let mut csprng = rand::thread_rng();
        Self(ed25519_dalek::SigningKey::generate(&mut csprng))
    }

    /// Create from raw 32-byte secret.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(ed25519_dalek::SigningKey::from_bytes(&bytes))
    }

    /// Parse a hex-encoded 32-byte secret.
    pub fn from_hex(s: &str) -> Result<Self, SignatureError> {
        let bytes = hex::decode(s.trim()).map_err(|_| SignatureError::InvalidKey)?;
        let arr: [u8; 32] = bytes.try_into().map_err(|_| SignatureError::InvalidKey)?;
        Ok(Self::from_bytes(arr))
    }

    /// The wallet address owned by this key.
    pub fn address(&self) -> WalletAddress {
        WalletAddress::from_key_bytes(self.0.verifying_key().to_bytes())
    }

    /// Sign a wallet message under the registry message-signing scheme.
    pub fn sign_message(&self, message: &str) -> MessageSignature {
        use ed25519_dalek::Signer;
        MessageSignature(self.0.sign(&signed_message_bytes(message)))
    }

    /// Hex-encoded secret key.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.as_bytes())
    }
}

impl WalletVerifier {
    /// Recover the verifying key named by a wallet address.
    pub fn from_address(address: &WalletAddress) -> Result<Self, SignatureError> {
        let bytes = address.key_bytes().map_err(|_| SignatureError::InvalidKey)?;
        let key = ed25519_dalek::VerifyingKey::from_bytes(&bytes)
            .map_err(|_| SignatureError::InvalidKey)?;
        Ok(Self(key))
    }

    /// Verify a wallet signature on a message.
    pub fn verify_message(
        &self,
        message: &str,
        signature: &MessageSignature,
    ) -> Result<(), SignatureError> {
        use ed25519_dalek::Verifier;
        self.0
            .verify(&signed_message_bytes(message), &signature.0)
            .map_err(|_| SignatureError::InvalidSignature)
    }
}

impl MessageSignature {
    /// Hex-encoded 64-byte signature.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.to_bytes())
    }

    /// Parse a hex-encoded 64-byte signature.
    pub fn from_hex(s: &str) -> Result<Self, SignatureError> {
        let bytes = hex::decode(s.trim()).map_err(|_| SignatureError::MalformedSignature)?;
        let arr: [u8; 64] = bytes
            .try_into()
            .map_err(|_| SignatureError::MalformedSignature)?;
        Ok(Self(ed25519_dalek::Signature::from_bytes(&arr)))
    }
}

/// Verify `signature` (hex) over `message` against the wallet at `address`.
///
/// Every failure, including an address that names no valid key, is reported;
/// callers decide how to fold them.
pub fn verify_wallet_message(
    address: &str,
    message: &str,
    signature: &str,
) -> Result<(), SignatureError> {
    let address = WalletAddress::parse(address).map_err(|_| SignatureError::InvalidKey)?;
    let signature = MessageSignature::from_hex(signature)?;
    WalletVerifier::from_address(&address)?.verify_message(message, &signature)
}

impl fmt::Debug for WalletKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletKey(<redacted>)")
    }
}

impl fmt::Debug for WalletVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletVerifier({})", hex::encode(self.0.to_bytes()))
    }
}

impl fmt::Debug for MessageSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageSignature({}...)", hex::encode(&self.0.to_bytes()[..8]))
    }
}

impl fmt::Display for MessageSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Errors from signing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("malformed signature encoding")]
    MalformedSignature,
    #[error("invalid key")]
    InvalidKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify() {
        let key = WalletKey::generate();
        let sig = key.sign_message("hello world");
        let verifier = WalletVerifier::from_address(&key.address()).unwrap();
        assert!(verifier.verify_message("hello world", &sig).is_ok());
    }

    #[test]
    fn verify_fails_on_wrong_message() {
        let key = WalletKey::generate();
        let sig = key.sign_message("correct message");
        let verifier = WalletVerifier::from_address(&key.address()).unwrap();
        assert_eq!(
            verifier.verify_message("wrong message", &sig),
            Err(SignatureError::InvalidSignature)
        );
    }

    #[test]
    fn verify_fails_with_wrong_wallet() {
        let alice = WalletKey::generate();
        let bob = WalletKey::generate();
        let sig = alice.sign_message("message");
        let result = verify_wallet_message(bob.address().as_str(), "message", &sig.to_hex());
        assert_eq!(result, Err(SignatureError::InvalidSignature));
    }

    #[test]
    fn raw_signature_over_message_is_not_accepted() {
        use ed25519_dalek::Signer;
        let key = WalletKey::generate();
        let raw = MessageSignature(key.0.sign(b"message"));
        let verifier = WalletVerifier::from_address(&key.address()).unwrap();
        assert!(verifier.verify_message("message", &raw).is_err());
    }

    #[test]
    fn hex_signature_roundtrip_verifies() {
        let key = WalletKey::generate();
        let hex_sig = key.sign_message("m").to_hex();
        assert_eq!(hex_sig.len(), 128);
        assert!(verify_wallet_message(key.address().as_str(), "m", &hex_sig).is_ok());
    }

    #[test]
    fn malformed_signature_is_reported() {
        let key = WalletKey::generate();
        assert_eq!(
            verify_wallet_message(key.address().as_str(), "m", "abcd"),
            Err(SignatureError::MalformedSignature)
        );
    }

    #[test]
    fn non_key_address_is_reported() {
        assert_eq!(
            verify_wallet_message("1xyz", "m", &"00".repeat(64)),
            Err(SignatureError::InvalidKey)
        );
    }

    #[test]
    fn secret_hex_roundtrip() {
        let key = WalletKey::generate();
        let restored = WalletKey::from_hex(&key.to_hex()).unwrap();
        assert_eq!(key.address(), restored.address());
    }

    #[test]
    fn debug_redacts_wallet_key() {
        let key = WalletKey::generate();
        assert!(format!("{key:?}").contains("redacted"));
    }
}
