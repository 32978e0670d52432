//! Solana launch adapter: bonding-curve token creation with an initial buy

use async_trait::async_trait;
use solana_sdk::commitment_config::CommitmentLevel;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::signature::{read_keypair_file, Keypair, Signer};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{AdapterError, ConfigError};

/// Default slippage for the initial buy: 5%.
pub const DEFAULT_SLIPPAGE_BASIS_POINTS: u64 = 500;

/// Convert whole SOL to lamports, or `None` when the result exceeds `u64`.
pub fn to_lamports(whole_sol: u128) -> Option<u64> {
    whole_sol
        .checked_mul(u128::from(LAMPORTS_PER_SOL))
        .and_then(|lamports| u64::try_from(lamports).ok())
}

/// Token metadata as the Solana launch program expects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTokenMetadata {
    pub name: String,
    pub symbol: String,
    pub metadata_uri: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub telegram: Option<String>,
}

/// Compute-unit price attached to the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityFee {
    pub unit_limit: u32,
    pub unit_price_micro_lamports: u64,
}

/// Arguments for one create-and-buy call. The creator and mint signers are
/// borrowed for the duration of the call only.
pub struct CreateTokenRequest<'a> {
    pub creator: &'a Keypair,
    pub mint: &'a Keypair,
    pub metadata: &'a CreateTokenMetadata,
    pub buy_amount_lamports: u64,
    pub slippage_basis_points: u64,
    pub priority_fee: Option<PriorityFee>,
    pub commitment: CommitmentLevel,
}

/// What a successful create-and-buy returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTokenReceipt {
    pub signature: String,
    pub mint: String,
}

/// Token-creation capability for Solana.
#[async_trait]
pub trait SolanaTokenCreator: Send + Sync {
    async fn create_and_buy(&self, request: CreateTokenRequest<'_>) -> Result<CreateTokenReceipt, AdapterError>;
}

/// Commitment used for a launch: lighter in test mode, durable in production.
pub fn commitment_for(test_mode: bool) -> CommitmentLevel {
    if test_mode {
        CommitmentLevel::Confirmed
    } else {
        CommitmentLevel::Finalized
    }
}

/// Simulated pump.fun-style creator. Nothing is submitted; the returned
/// signature is the creator's real ed25519 signature over the launch message.
#[derive(Debug, Clone)]
pub struct SimulatedPumpFun {
    rpc_endpoint: String,
}

impl SimulatedPumpFun {
    pub fn new(rpc_endpoint: impl Into<String>) -> Self {
        let rpc_endpoint = rpc_endpoint.into();
        info!(endpoint = %rpc_endpoint, "Solana launch adapter initialized (simulated)");
        Self { rpc_endpoint }
    }

    pub fn rpc_endpoint(&self) -> &str {
        &self.rpc_endpoint
    }

    fn launch_message(request: &CreateTokenRequest<'_>) -> Vec<u8> {
        format!(
            "create:{}:{}:{}:{}:{}:{}",
            request.mint.pubkey(),
            request.metadata.name,
            request.metadata.symbol,
            request.metadata.metadata_uri,
            request.buy_amount_lamports,
            request.slippage_basis_points,
        )
        .into_bytes()
    }
}

#[async_trait]
impl SolanaTokenCreator for SimulatedPumpFun {
    async fn create_and_buy(&self, request: CreateTokenRequest<'_>) -> Result<CreateTokenReceipt, AdapterError> {
        info!(
            token_name = %request.metadata.name,
            token_symbol = %request.metadata.symbol,
            mint = %request.mint.pubkey(),
            creator = %request.creator.pubkey(),
            buy_amount = request.buy_amount_lamports,
            commitment = ?request.commitment,
            "Creating Solana token"
        );

        if request.mint.pubkey() == request.creator.pubkey() {
            return Err(AdapterError::signature(format!(
                "mint {} must be a fresh keypair, not the creator",
                request.mint.pubkey()
            ))
            .with_short_message("Mint and creator keypairs must differ"));
        }

        let signature = request.creator.sign_message(&Self::launch_message(&request));

        Ok(CreateTokenReceipt {
            signature: signature.to_string(),
            mint: request.mint.pubkey().to_string(),
        })
    }
}

/// Where per-call creator identities come from.
///
/// Every launch receives its own `Keypair` value, so concurrent launches never
/// share a signer instance.
pub enum CreatorSource {
    /// A keypair loaded from disk, cloned for each launch.
    Configured(Keypair),
    /// A fresh throwaway keypair for each launch.
    Ephemeral,
}

impl CreatorSource {
    pub fn from_keypair_file(path: &Path) -> Result<Self, ConfigError> {
        let keypair = read_keypair_file(path).map_err(|e| ConfigError::Keypair {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        info!(creator = %keypair.pubkey(), "Loaded Solana creator keypair");
        Ok(CreatorSource::Configured(keypair))
    }

    pub fn from_optional_path(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_keypair_file(path),
            None => {
                warn!("No SOLANA_KEYPAIR_PATH configured; each Solana launch uses an ephemeral creator");
                Ok(CreatorSource::Ephemeral)
            }
        }
    }

    pub fn creator_for_launch(&self) -> Keypair {
        match self {
            CreatorSource::Configured(keypair) => keypair.insecure_clone(),
            CreatorSource::Ephemeral => Keypair::new(),
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        matches!(self, CreatorSource::Ephemeral)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdapterErrorKind;
    use solana_sdk::signature::{write_keypair_file, Signature};
    use std::str::FromStr;

    fn metadata() -> CreateTokenMetadata {
        CreateTokenMetadata {
            name: "Test Token".to_string(),
            symbol: "TEST".to_string(),
            metadata_uri: "https://example.com/metadata.json".to_string(),
            description: None,
            website: None,
            twitter: None,
            telegram: None,
        }
    }

    #[test]
    fn test_commitment_by_mode() {
        assert_eq!(commitment_for(true), CommitmentLevel::Confirmed);
        assert_eq!(commitment_for(false), CommitmentLevel::Finalized);
    }

    /// The simulated signature is a real creator signature over the launch message
    #[tokio::test]
    async fn test_simulated_signature_verifies_against_creator() {
        let adapter = SimulatedPumpFun::new("https://api.devnet.solana.com");
        let creator = Keypair::new();
        let mint = Keypair::new();
        let metadata = metadata();

        let request = CreateTokenRequest {
            creator: &creator,
            mint: &mint,
            metadata: &metadata,
            buy_amount_lamports: 1,
            slippage_basis_points: DEFAULT_SLIPPAGE_BASIS_POINTS,
            priority_fee: None,
            commitment: CommitmentLevel::Confirmed,
        };
        let message = SimulatedPumpFun::launch_message(&request);
        let receipt = adapter.create_and_buy(request).await.unwrap();

        assert_eq!(receipt.mint, mint.pubkey().to_string());
        let signature = Signature::from_str(&receipt.signature).unwrap();
        assert!(signature.verify(creator.pubkey().as_ref(), &message));
    }

    /// Reusing the creator as mint is refused as a signature fault
    #[tokio::test]
    async fn test_mint_equal_to_creator_is_rejected() {
        let adapter = SimulatedPumpFun::new("https://api.devnet.solana.com");
        let creator = Keypair::new();
        let metadata = metadata();

        let err = adapter
            .create_and_buy(CreateTokenRequest {
                creator: &creator,
                mint: &creator,
                metadata: &metadata,
                buy_amount_lamports: 0,
                slippage_basis_points: DEFAULT_SLIPPAGE_BASIS_POINTS,
                priority_fee: None,
                commitment: CommitmentLevel::Confirmed,
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind, AdapterErrorKind::Signature);
        assert_eq!(err.user_message(), "Mint and creator keypairs must differ");
    }

    #[test]
    fn test_to_lamports() {
        assert_eq!(to_lamports(0), Some(0));
        assert_eq!(to_lamports(1), Some(1_000_000_000));
        assert_eq!(to_lamports(18_446_744_073), Some(18_446_744_073_000_000_000));
        assert_eq!(to_lamports(18_446_744_074), None);
    }

    #[test]
    fn test_ephemeral_source_gives_distinct_creators() {
        let source = CreatorSource::Ephemeral;
        assert!(source.is_ephemeral());
        assert_ne!(source.creator_for_launch().pubkey(), source.creator_for_launch().pubkey());
    }

    /// A configured keypair is handed out as a fresh clone each launch
    #[test]
    fn test_configured_source_clones_keypair_per_launch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("creator.json");
        let keypair = Keypair::new();
        write_keypair_file(&keypair, &path).unwrap();

        let source = CreatorSource::from_optional_path(Some(&path)).unwrap();
        assert!(!source.is_ephemeral());
        assert_eq!(source.creator_for_launch().pubkey(), keypair.pubkey());
        assert_eq!(source.creator_for_launch().pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_unreadable_keypair_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = CreatorSource::from_keypair_file(&path).err().unwrap();
        assert!(matches!(err, ConfigError::Keypair { .. }));
    }
}
