use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use star_crypto::ContentHasher;
use star_types::{RecordHash, StarClaim};

use crate::error::{RegistryError, RegistryResult};

/// A payload encoded for the ledger but not yet committed.
///
/// Drafts carry only the encoded payload. Position, timestamp, back link and
/// hash are assigned in one step when the registry commits the draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordDraft {
    payload: String,
}

impl RecordDraft {
    /// Encode `payload` as hex of its JSON bytes.
    pub fn new<T: Serialize>(payload: &T) -> RegistryResult<Self> {
        let bytes =
            serde_json::to_vec(payload).map_err(|e| RegistryError::Serialization(e.to_string()))?;
        Ok(Self {
            payload: hex::encode(bytes),
        })
    }

    /// The encoded payload.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub(crate) fn seal(
        self,
        position: u64,
        created_at: u64,
        back_link: Option<RecordHash>,
    ) -> RegistryResult<LedgerRecord> {
        let self_hash = record_hash(position, &self.payload, created_at, back_link.as_ref())?;
        Ok(LedgerRecord {
            position,
            payload: self.payload,
            created_at,
            back_link,
            self_hash,
        })
    }
}

/// One committed unit of the chain.
///
/// Every field is fixed when the registry commits the record. There is no
/// public mutation path; a stored record that no longer matches its hash has
/// been tampered with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub(crate) position: u64,
    pub(crate) payload: String,
    pub(crate) created_at: u64,
    pub(crate) back_link: Option<RecordHash>,
    pub(crate) self_hash: RecordHash,
}

impl LedgerRecord {
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Hex encoding of the payload JSON.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Unix seconds at which the record was committed.
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Hash of the preceding record; `None` only for genesis.
    pub fn back_link(&self) -> Option<RecordHash> {
        self.back_link
    }

    pub fn self_hash(&self) -> RecordHash {
        self.self_hash
    }

    pub fn is_genesis(&self) -> bool {
        self.position == 0
    }

    /// Recompute the hash over the current field values and compare it to
    /// the stored hash. A mismatch is `Ok(false)`; only a payload that is
    /// not hex at all is reported as [`RegistryError::CorruptRecord`].
    pub fn validate_self(&self) -> RegistryResult<bool> {
        hex::decode(&self.payload).map_err(|e| RegistryError::CorruptRecord {
            position: self.position,
            reason: format!("payload is not hex: {e}"),
        })?;
        let computed = record_hash(
            self.position,
            &self.payload,
            self.created_at,
            self.back_link.as_ref(),
        )?;
        Ok(computed == self.self_hash)
    }

    /// Decode the payload back into the object it was built from.
    ///
    /// The genesis payload is an internal marker and is never returned.
    pub fn decode_payload<T: DeserializeOwned>(&self) -> RegistryResult<T> {
        if self.is_genesis() {
            return Err(RegistryError::GenesisPayloadUnavailable);
        }
        let bytes = hex::decode(&self.payload).map_err(|e| RegistryError::DecodeError {
            position: self.position,
            reason: e.to_string(),
        })?;
        serde_json::from_slice(&bytes).map_err(|e| RegistryError::DecodeError {
            position: self.position,
            reason: e.to_string(),
        })
    }

    /// Decode the payload as a star claim.
    pub fn decode_claim(&self) -> RegistryResult<StarClaim> {
        self.decode_payload()
    }
}

/// Record hash over `(position, payload, created_at, back_link)` in that
/// order. Genesis hashes an empty string in the back link slot.
pub fn record_hash(
    position: u64,
    payload: &str,
    created_at: u64,
    back_link: Option<&RecordHash>,
) -> RegistryResult<RecordHash> {
    let back_link = back_link.map(RecordHash::to_hex).unwrap_or_default();
    Ok(ContentHasher::RECORD.hash_json(&(position, payload, created_at, back_link))?)
}
