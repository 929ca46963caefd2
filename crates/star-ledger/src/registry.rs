use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use star_crypto::verify_wallet_message;
use star_types::{
    Challenge, Clock, GenesisMarker, RecordHash, StarClaim, SystemClock, WalletAddress,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::audit::{ChainAuditor, Violation};
use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};
use crate::record::{LedgerRecord, RecordDraft};

/// Owner of the star registry chain.
///
/// All chain growth goes through `StarRegistry::commit` while the write
/// guard is held. Tokio's `RwLock` admits waiters in FIFO order, so
/// concurrent appends are totally ordered and never share a predecessor.
/// Readers hold the read guard for the whole call and see one consistent
/// chain.
pub struct StarRegistry {
    config: RegistryConfig,
    clock: Arc<dyn Clock>,
    inner: RwLock<ChainState>,
}

#[derive(Default)]
struct ChainState {
    chain: Vec<LedgerRecord>,
}

impl ChainState {
    fn height(&self) -> Option<u64> {
        (self.chain.len() as u64).checked_sub(1)
    }

    fn require_ready(&self) -> RegistryResult<()> {
        if self.chain.is_empty() {
            return Err(RegistryError::NotReady);
        }
        Ok(())
    }
}

/// Claims matching an address, plus the records that could not be decoded.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimQuery {
    pub claims: Vec<StarClaim>,
    pub warnings: Vec<QueryWarning>,
}

/// A record skipped by a query because its payload did not decode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryWarning {
    pub position: u64,
    pub reason: String,
}

impl StarRegistry {
    /// Create an empty registry on the system clock. Call
    /// [`StarRegistry::bootstrap`] before anything else.
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: RegistryConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            inner: RwLock::new(ChainState::default()),
        }
    }

    /// Create a registry and commit its genesis record.
    pub async fn open(config: RegistryConfig) -> RegistryResult<Self> {
        let registry = Self::new(config);
        registry.bootstrap().await?;
        Ok(registry)
    }

    /// Commit the genesis record if the chain is empty. Returns the genesis
    /// record either way.
    pub async fn bootstrap(&self) -> RegistryResult<LedgerRecord> {
        let mut state = self.inner.write().await;
        if let Some(genesis) = state.chain.first() {
            return Ok(genesis.clone());
        }
        let draft = RecordDraft::new(&GenesisMarker::new(self.config.genesis_data.clone()))?;
        let genesis = self.commit(&mut state, draft)?;
        info!(hash = %genesis.self_hash().short_hex(), "genesis record committed");
        Ok(genesis)
    }

    /// Append a draft to a bootstrapped chain.
    pub async fn append(&self, draft: RecordDraft) -> RegistryResult<LedgerRecord> {
        let mut state = self.inner.write().await;
        state.require_ready()?;
        self.commit(&mut state, draft)
    }

    /// The single place where records receive position, timestamp, back link
    /// and hash. Nothing is pushed unless sealing succeeded.
    fn commit(&self, state: &mut ChainState, draft: RecordDraft) -> RegistryResult<LedgerRecord> {
        let back_link = state.chain.last().map(LedgerRecord::self_hash);
        let created_at = self.clock.now_secs();
        let position = state.chain.len() as u64;

        let record = draft.seal(position, created_at, back_link)?;
        state.chain.push(record.clone());

        info!(
            position,
            hash = %record.self_hash().short_hex(),
            "record appended"
        );
        Ok(record)
    }

    /// Position of the newest record, `None` before genesis.
    pub async fn height(&self) -> Option<u64> {
        self.inner.read().await.height()
    }

    /// Message the wallet at `address` must sign to prove ownership.
    pub fn request_challenge(&self, address: &str) -> String {
        let challenge = Challenge::new(address, self.clock.now_secs());
        debug!(%address, issued_at = challenge.issued_at, "challenge issued");
        challenge.to_string()
    }

    /// Verify a signed challenge and append the star claim it authorizes.
    pub async fn submit_claim(
        &self,
        address: &str,
        message: &str,
        signature: &str,
        star: Value,
    ) -> RegistryResult<LedgerRecord> {
        let challenge = Challenge::parse(message)
            .map_err(|e| RegistryError::MalformedChallenge(e.to_string()))?;
        if !challenge.address.eq_ignore_ascii_case(address) {
            return Err(RegistryError::MalformedChallenge(
                "challenge was issued to a different address".into(),
            ));
        }

        // A challenge stamped ahead of the clock has elapsed zero seconds.
        let now = self.clock.now_secs();
        let elapsed = now.saturating_sub(challenge.issued_at);
        if elapsed >= self.config.challenge_window_secs {
            return Err(RegistryError::ChallengeExpired {
                issued_at: challenge.issued_at,
                now,
                window: self.config.challenge_window_secs,
            });
        }

        if let Err(err) = verify_wallet_message(address, message, signature) {
            debug!(%address, error = %err, "claim signature rejected");
            return Err(RegistryError::InvalidSignature);
        }

        // Verification already proved the address parses.
        let owner = WalletAddress::parse(address).map_err(|_| RegistryError::InvalidSignature)?;
        let claim = StarClaim {
            address: owner.to_string(),
            star,
            message: message.to_string(),
        };
        let record = self.append(RecordDraft::new(&claim)?).await?;
        info!(owner = owner.short(), position = record.position(), "star claim registered");
        Ok(record)
    }

    /// Find the record whose stored hash equals `hash`.
    pub async fn get_by_hash(&self, hash: &RecordHash) -> RegistryResult<LedgerRecord> {
        let state = self.inner.read().await;
        state.require_ready()?;

        let mut matches = state.chain.iter().filter(|r| r.self_hash() == *hash);
        let found = matches.next().ok_or(RegistryError::NotFound)?;
        if matches.next().is_some() {
            return Err(RegistryError::IntegrityViolation {
                reason: format!("hash {} is stored by more than one record", hash.short_hex()),
            });
        }
        Ok(found.clone())
    }

    /// Record at `position`, or `None` outside `[0, height]`.
    pub async fn get_by_height(&self, position: u64) -> Option<LedgerRecord> {
        let state = self.inner.read().await;
        usize::try_from(position)
            .ok()
            .and_then(|index| state.chain.get(index))
            .cloned()
    }

    /// Every claim owned by `address`. Records that fail to decode are left
    /// out of `claims` and reported in `warnings`; the scan continues.
    pub async fn list_claims_by_address(&self, address: &str) -> RegistryResult<ClaimQuery> {
        let state = self.inner.read().await;
        state.require_ready()?;

        let mut query = ClaimQuery::default();
        for record in state.chain.iter().skip(1) {
            match record.decode_claim() {
                Ok(claim) if claim.address.eq_ignore_ascii_case(address) => {
                    query.claims.push(claim);
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(position = record.position(), error = %err, "skipping undecodable record");
                    query.warnings.push(QueryWarning {
                        position: record.position(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        Ok(query)
    }

    /// Check every record's hash and back link. Empty means consistent.
    pub async fn audit_chain(&self) -> RegistryResult<Vec<Violation>> {
        let state = self.inner.read().await;
        state.require_ready()?;
        let violations = ChainAuditor::audit(&state.chain);
        debug!(
            records = state.chain.len(),
            violations = violations.len(),
            "audit complete"
        );
        Ok(violations)
    }

    /// Consistent copy of the whole chain.
    pub async fn snapshot(&self) -> Vec<LedgerRecord> {
        self.inner.read().await.chain.clone()
    }
}
