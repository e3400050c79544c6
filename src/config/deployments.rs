use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::error::AppError;

/// Deployment metadata produced by the contract deployment script:
/// the network name, the exchange contract address, and a
/// symbol -> address mapping for the mock tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInfo {
    pub network: String,
    pub exchange_address: String,
    #[serde(default)]
    pub tokens: HashMap<String, String>,
}

impl DeploymentInfo {
    /// Load deployment metadata from disk. A missing file is not an
    /// error: it simply means no contract has been deployed, and the
    /// settlement service falls back to simulated mode.
    pub fn load(path: &str) -> Result<Option<Self>, AppError> {
        if !Path::new(path).exists() {
            warn!("No deployment metadata at {}, settlement will run in demo mode", path);
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::ConfigError(format!("Failed to read {}: {}", path, e)))?;
        let info: DeploymentInfo = serde_json::from_str(&raw)
            .map_err(|e| AppError::ConfigError(format!("Invalid deployment metadata: {}", e)))?;

        info!(
            network = %info.network,
            exchange = %info.exchange_address,
            tokens = info.tokens.len(),
            "Loaded deployment metadata"
        );
        Ok(Some(info))
    }

    pub fn token_address(&self, symbol: &str) -> Option<&String> {
        self.tokens.get(&symbol.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_none() {
        let result = DeploymentInfo::load("does-not-exist.json").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_parse_deployment_metadata() {
        let raw = r#"{
            "network": "localhost",
            "exchangeAddress": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            "tokens": {
                "USDC": "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512",
                "DAI": "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0"
            }
        }"#;
        let info: DeploymentInfo = serde_json::from_str(raw).unwrap();
        assert_eq!(info.network, "localhost");
        assert_eq!(info.tokens.len(), 2);
        // Lookup uppercases the symbol before indexing.
        assert!(info.token_address("usdc").is_some());
        assert!(info.token_address("WBTC").is_none());
    }
}
