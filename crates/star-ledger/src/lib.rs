//! Append-only star registry ledger.
//!
//! This crate is the integrity engine of the registry. It provides:
//! - `RecordDraft` / `LedgerRecord` with hash-linked, order-sensitive hashing
//! - `StarRegistry`, the single-writer chain owner: genesis bootstrap,
//!   challenge issue, signed claim admission, and point/range queries
//! - `ChainAuditor`, a full-sweep hash and link audit

pub mod audit;
pub mod config;
pub mod error;
pub mod record;
pub mod registry;

pub use audit::{ChainAuditor, Violation, ViolationKind};
pub use config::RegistryConfig;
pub use error::{RegistryError, RegistryResult};
pub use record::{record_hash, LedgerRecord, RecordDraft};
pub use registry::{ClaimQuery, QueryWarning, StarRegistry};
