use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::LedgerRecord;

/// A specific integrity violation detected during an audit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Index of the offending record in the chain.
    pub position: u64,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    /// Stored hash differs from the hash recomputed over the record fields.
    HashMismatch,
    /// Back link differs from the hash of the preceding record.
    LinkMismatch,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HashMismatch => f.write_str("hash mismatch"),
            Self::LinkMismatch => f.write_str("link mismatch"),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}: {}", self.position, self.kind, self.description)
    }
}

/// Full-sweep chain auditor.
///
/// Never stops at the first finding: every record is checked and every
/// violation is returned in chain order.
pub struct ChainAuditor;

impl ChainAuditor {
    pub fn audit(records: &[LedgerRecord]) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let position = index as u64;

            match record.validate_self() {
                Ok(true) => {}
                Ok(false) => violations.push(Violation {
                    position,
                    kind: ViolationKind::HashMismatch,
                    description: "stored hash does not match recomputed hash".into(),
                }),
                Err(err) => violations.push(Violation {
                    position,
                    kind: ViolationKind::HashMismatch,
                    description: format!("hash cannot be recomputed: {err}"),
                }),
            }

            let expected_link = index.checked_sub(1).map(|prev| records[prev].self_hash());
            if record.back_link() != expected_link {
                let description = match expected_link {
                    None => "genesis record carries a back link".to_string(),
                    Some(_) => "back link does not match previous record hash".to_string(),
                };
                violations.push(Violation {
                    position,
                    kind: ViolationKind::LinkMismatch,
                    description,
                });
            }
        }

        for violation in &violations {
            tracing::warn!(
                position = violation.position,
                kind = %violation.kind,
                "audit violation: {}",
                violation.description
            );
        }

        violations
    }
}
