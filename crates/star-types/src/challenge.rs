use std::fmt;

use crate::error::TypeError;

/// Ownership-verification challenge handed to a wallet for signing.
///
/// Wire format: `"<address>:<unixSeconds>:starRegistry"`. The same string is
/// produced by [`Challenge::to_string`] and accepted by [`Challenge::parse`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenge {
    /// Address the challenge was issued to, exactly as requested.
    pub address: String,
    /// Unix seconds at which the challenge was issued.
    pub issued_at: u64,
}

impl Challenge {
    /// Fixed trailing tag of every challenge.
    pub const TAG: &'static str = "starRegistry";

    pub fn new(address: impl Into<String>, issued_at: u64) -> Self {
        Self {
            address: address.into(),
            issued_at,
        }
    }

    /// Parse a challenge message. Exactly three colon-separated fields are
    /// required: a non-empty address, decimal seconds, and the tag.
    pub fn parse(message: &str) -> Result<Self, TypeError> {
        let parts: Vec<&str> = message.split(':').collect();
        let [address, timestamp, tag] = parts.as_slice() else {
            return Err(TypeError::MalformedChallenge(format!(
                "expected 3 colon-separated fields, got {}",
                parts.len()
            )));
        };
        if address.is_empty() {
            return Err(TypeError::MalformedChallenge("empty address".into()));
        }
        if *tag != Self::TAG {
            return Err(TypeError::MalformedChallenge(format!(
                "unexpected tag {tag:?}"
            )));
        }
        // u64::from_str also takes a leading '+'; only plain digits are allowed.
        if timestamp.is_empty() || !timestamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypeError::MalformedChallenge(format!(
                "bad timestamp {timestamp:?}: expected decimal digits"
            )));
        }
        let issued_at = timestamp.parse::<u64>().map_err(|e| {
            TypeError::MalformedChallenge(format!("bad timestamp {timestamp:?}: {e}"))
        })?;
        Ok(Self::new(*address, issued_at))
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.address, self.issued_at, Self::TAG)
    }
}

impl std::str::FromStr for Challenge {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
