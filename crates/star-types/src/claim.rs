use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A star-ownership claim as stored in a ledger record payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarClaim {
    /// Wallet address that signed the challenge.
    pub address: String,
    /// Client-supplied star metadata (name, coordinates, story...).
    pub star: Value,
    /// The signed challenge message.
    pub message: String,
}

/// Fixed payload of the genesis record. Never surfaced as ledger data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisMarker {
    pub data: String,
}

impl GenesisMarker {
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

impl Default for GenesisMarker {
    fn default() -> Self {
        Self::new("Genesis Block")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn claim_json_shape() {
        let claim = StarClaim {
            address: "1xyz".into(),
            star: json!({"starName": "Polaris"}),
            message: "1xyz:1:starRegistry".into(),
        };
        let value = serde_json::to_value(&claim).unwrap();
        assert_eq!(value["address"], "1xyz");
        assert_eq!(value["star"]["starName"], "Polaris");
    }

    #[test]
    fn genesis_default_marker() {
        let value = serde_json::to_value(GenesisMarker::default()).unwrap();
        assert_eq!(value, json!({"data": "Genesis Block"}));
    }
}
