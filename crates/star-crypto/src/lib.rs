//! Cryptographic primitives for the star registry ledger.
//!
//! Provides domain-separated BLAKE3 hashing for ledger records and the
//! Ed25519 wallet message-signing scheme used to prove star ownership.
//!
//! All crypto operations wrap established libraries — no custom cryptography.

pub mod hasher;
pub mod signer;

pub use hasher::{ContentHasher, HasherError};
pub use signer::{
    signed_message_bytes, verify_wallet_message, MessageSignature, SignatureError, WalletKey,
    WalletVerifier,
};
