//! Base launch adapter: ERC-20 deployment with an initial supply

use async_trait::async_trait;
use sha3::{Digest, Keccak256};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use crate::config::BaseSigner;
use crate::error::AdapterError;

/// Decimals of the deployed token and of ETH.
pub const BASE_UNIT_DECIMALS: u32 = 18;

/// Convert whole units to base units (`amount * 10^18`), or `None` on overflow.
pub fn to_base_units(whole_units: u128) -> Option<u128> {
    whole_units.checked_mul(10u128.pow(BASE_UNIT_DECIMALS))
}

/// What a successful deployment returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDeployment {
    pub transaction_hash: String,
    /// Known only once the deployment is mined.
    pub contract_address: Option<String>,
}

/// Token-deployment capability for Base.
#[async_trait]
pub trait BaseTokenDeployer: Send + Sync {
    async fn deploy(
        &self,
        name: &str,
        symbol: &str,
        initial_supply_base_units: u128,
    ) -> Result<BaseDeployment, AdapterError>;
}

/// Simulated deployer. Produces a deterministic Keccak-256 transaction hash
/// over the deployer key, the constructor arguments and a per-adapter nonce.
#[derive(Debug)]
pub struct SimulatedBaseDeployer {
    rpc_endpoint: String,
    chain_id: u64,
    deployer: Vec<u8>,
    nonce: AtomicU64,
}

impl SimulatedBaseDeployer {
    pub fn new(rpc_endpoint: impl Into<String>, chain_id: u64, signer: Option<&BaseSigner>) -> Self {
        let rpc_endpoint = rpc_endpoint.into();
        info!(endpoint = %rpc_endpoint, chain_id, "Base launch adapter initialized (simulated)");
        Self {
            rpc_endpoint,
            chain_id,
            deployer: signer.map(BaseSigner::key_material).unwrap_or_default(),
            nonce: AtomicU64::new(0),
        }
    }

    pub fn rpc_endpoint(&self) -> &str {
        &self.rpc_endpoint
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn transaction_hash(&self, name: &str, symbol: &str, supply: u128, nonce: u64) -> String {
        let mut hasher = Keccak256::new();
        hasher.update(self.chain_id.to_be_bytes());
        hasher.update(&self.deployer);
        hasher.update(name.as_bytes());
        hasher.update([0u8]);
        hasher.update(symbol.as_bytes());
        hasher.update([0u8]);
        hasher.update(supply.to_be_bytes());
        hasher.update(nonce.to_be_bytes());
        format!("0x{}", hex::encode(hasher.finalize()))
    }
}

#[async_trait]
impl BaseTokenDeployer for SimulatedBaseDeployer {
    async fn deploy(
        &self,
        name: &str,
        symbol: &str,
        initial_supply_base_units: u128,
    ) -> Result<BaseDeployment, AdapterError> {
        let nonce = self.nonce.fetch_add(1, Ordering::Relaxed);
        info!(
            token_name = name,
            token_symbol = symbol,
            initial_supply = %initial_supply_base_units,
            nonce,
            "Deploying Base token (simulated)"
        );

        Ok(BaseDeployment {
            transaction_hash: self.transaction_hash(name, symbol, initial_supply_base_units, nonce),
            contract_address: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_base_units() {
        assert_eq!(to_base_units(0), Some(0));
        assert_eq!(to_base_units(1), Some(1_000_000_000_000_000_000));
        assert_eq!(to_base_units(100), Some(100_000_000_000_000_000_000));
        assert_eq!(to_base_units(u128::MAX / 10), None);
    }

    #[tokio::test]
    async fn test_simulated_deploy_hash_shape() {
        let deployer = SimulatedBaseDeployer::new("https://sepolia.base.org", 84532, None);
        let deployment = deployer.deploy("Test Token", "TEST", 1).await.unwrap();

        assert!(deployment.transaction_hash.starts_with("0x"));
        assert_eq!(deployment.transaction_hash.len(), 66);
        assert!(deployment.contract_address.is_none());
    }

    /// The nonce makes repeated deployments distinct
    #[tokio::test]
    async fn test_simulated_deploy_hashes_differ_per_call() {
        let deployer = SimulatedBaseDeployer::new("https://sepolia.base.org", 84532, None);
        let first = deployer.deploy("Test Token", "TEST", 1).await.unwrap();
        let second = deployer.deploy("Test Token", "TEST", 1).await.unwrap();
        assert_ne!(first.transaction_hash, second.transaction_hash);
    }

    #[test]
    fn test_hash_depends_on_signer_and_chain() {
        let signer = BaseSigner::parse_private_key(
            "0x4f3edf983ac636a65a842ce7c78d9aa706d3b113bce9c46f30d7d21715b23b1d",
        )
        .unwrap();
        let with_signer = SimulatedBaseDeployer::new("http://localhost", 8453, Some(&signer));
        let without = SimulatedBaseDeployer::new("http://localhost", 8453, None);
        let other_chain = SimulatedBaseDeployer::new("http://localhost", 84532, Some(&signer));

        let a = with_signer.transaction_hash("T", "T", 1, 0);
        assert_eq!(a, with_signer.transaction_hash("T", "T", 1, 0));
        assert_ne!(a, without.transaction_hash("T", "T", 1, 0));
        assert_ne!(a, other_chain.transaction_hash("T", "T", 1, 0));
    }
}
