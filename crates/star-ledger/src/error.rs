/// Errors produced by star registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("registry is not ready: genesis record has not been committed")]
    NotReady,

    #[error("malformed challenge: {0}")]
    MalformedChallenge(String),

    #[error("challenge expired: issued at {issued_at}, now {now}, window {window}s")]
    ChallengeExpired { issued_at: u64, now: u64, window: u64 },

    #[error("signature does not verify for the given address and message")]
    InvalidSignature,

    #[error("corrupt record at position {position}: {reason}")]
    CorruptRecord { position: u64, reason: String },

    #[error("cannot decode payload of record {position}: {reason}")]
    DecodeError { position: u64, reason: String },

    #[error("genesis record payload is not ledger data")]
    GenesisPayloadUnavailable,

    #[error("no record found for the given hash")]
    NotFound,

    #[error("integrity violation: {reason}")]
    IntegrityViolation { reason: String },

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<star_crypto::HasherError> for RegistryError {
    fn from(err: star_crypto::HasherError) -> Self {
        match err {
            star_crypto::HasherError::Serialization(reason) => Self::Serialization(reason),
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
