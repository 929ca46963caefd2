//! Foundation types for the star registry ledger.
//!
//! # Key Types
//!
//! - [`RecordHash`] — BLAKE3 digest identifying a ledger record
//! - [`WalletAddress`] — Hex-encoded Ed25519 verifying key of a star owner
//! - [`Challenge`] — The `address:seconds:starRegistry` message a wallet signs
//! - [`StarClaim`] / [`GenesisMarker`] — Record payload objects
//! - [`Clock`] — Injected wall-clock source

pub mod address;
pub mod challenge;
pub mod claim;
pub mod clock;
pub mod error;
pub mod hash;

pub use address::WalletAddress;
pub use challenge::Challenge;
pub use claim::{GenesisMarker, StarClaim};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::TypeError;
pub use hash::RecordHash;
