//! Dual-network token launch dispatcher
//!
//! [`TokenLauncher`] is the error boundary for everything launch related:
//! validation failures, unavailable networks and adapter faults all come back
//! as a [`TokenLaunchResult`] with `success: false`, never as an `Err`.

use solana_sdk::signature::{Keypair, Signer};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::base::{self, BaseTokenDeployer, SimulatedBaseDeployer};
use crate::config::LauncherConfig;
use crate::error::LaunchError;
use crate::solana::{
    self, commitment_for, CreateTokenMetadata, CreateTokenRequest, SimulatedPumpFun, SolanaTokenCreator,
    DEFAULT_SLIPPAGE_BASIS_POINTS,
};
use crate::token::{Network, TokenLaunchConfig, TokenLaunchResult};
use crate::validation::validate;

/// Per-chain capability handles, resolved from a network tag.
enum ChainAdapter<'a> {
    Solana(&'a dyn SolanaTokenCreator),
    Base(&'a dyn BaseTokenDeployer),
}

/// Launches tokens on Solana and Base through injected chain adapters.
#[derive(Clone)]
pub struct TokenLauncher {
    solana: Option<Arc<dyn SolanaTokenCreator>>,
    base: Option<Arc<dyn BaseTokenDeployer>>,
    test_mode: bool,
}

impl std::fmt::Debug for TokenLauncher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenLauncher")
            .field("networks", &self.networks())
            .field("test_mode", &self.test_mode)
            .finish()
    }
}

/// Builder for [`TokenLauncher`]. The mode is fixed at construction.
pub struct TokenLauncherBuilder {
    solana: Option<Arc<dyn SolanaTokenCreator>>,
    base: Option<Arc<dyn BaseTokenDeployer>>,
    test_mode: bool,
}

impl TokenLauncherBuilder {
    pub fn solana(mut self, adapter: Arc<dyn SolanaTokenCreator>) -> Self {
        self.solana = Some(adapter);
        self
    }

    pub fn base(mut self, adapter: Arc<dyn BaseTokenDeployer>) -> Self {
        self.base = Some(adapter);
        self
    }

    pub fn build(self) -> TokenLauncher {
        TokenLauncher {
            solana: self.solana,
            base: self.base,
            test_mode: self.test_mode,
        }
    }
}

impl TokenLauncher {
    pub fn builder(test_mode: bool) -> TokenLauncherBuilder {
        TokenLauncherBuilder {
            solana: None,
            base: None,
            test_mode,
        }
    }

    /// Launcher wired to the simulated adapters for the configured endpoints.
    pub fn from_config(config: &LauncherConfig) -> Self {
        let endpoints = config.endpoints();
        Self::builder(config.test_mode)
            .solana(Arc::new(SimulatedPumpFun::new(endpoints.solana_rpc)))
            .base(Arc::new(SimulatedBaseDeployer::new(
                endpoints.base_rpc,
                endpoints.base_chain_id,
                config.base_signer.as_ref(),
            )))
            .build()
    }

    pub fn test_mode(&self) -> bool {
        self.test_mode
    }

    /// Networks this launcher has an adapter for.
    pub fn networks(&self) -> Vec<Network> {
        Network::ALL
            .into_iter()
            .filter(|n| self.adapter(*n).is_some())
            .collect()
    }

    fn adapter(&self, network: Network) -> Option<ChainAdapter<'_>> {
        match network {
            Network::Solana => self.solana.as_deref().map(|a| ChainAdapter::Solana(a)),
            Network::Base => self.base.as_deref().map(|a| ChainAdapter::Base(a)),
        }
    }

    /// Launch on `network`. Solana requires a `creator`; Base ignores it.
    pub async fn launch(
        &self,
        network: Network,
        config: &TokenLaunchConfig,
        creator: Option<&Keypair>,
    ) -> TokenLaunchResult {
        match network {
            Network::Solana => match creator {
                Some(creator) => self.launch_solana_token(creator, config).await,
                None => TokenLaunchResult::failure(
                    Network::Solana,
                    "A creator keypair is required to launch on Solana",
                ),
            },
            Network::Base => self.launch_base_token(config).await,
        }
    }

    /// Create a token on Solana with `creator` as payer and authority.
    #[instrument(skip_all, fields(token_name = %config.name, token_symbol = %config.symbol, creator = %creator.pubkey()))]
    pub async fn launch_solana_token(&self, creator: &Keypair, config: &TokenLaunchConfig) -> TokenLaunchResult {
        match self.try_launch_solana(creator, config).await {
            Ok(result) => {
                info!(signature = ?result.transaction_hash(), mint = ?result.mint(), "Solana token launched");
                result
            }
            Err(e) => {
                error!("Solana token launch failed: {}", e);
                TokenLaunchResult::failure(Network::Solana, e.user_message())
            }
        }
    }

    /// Deploy a token on Base from the configured signer.
    #[instrument(skip_all, fields(token_name = %config.name, token_symbol = %config.symbol))]
    pub async fn launch_base_token(&self, config: &TokenLaunchConfig) -> TokenLaunchResult {
        match self.try_launch_base(config).await {
            Ok(result) => {
                info!(transaction_hash = ?result.transaction_hash(), "Base token launched");
                result
            }
            Err(e) => {
                error!("Base token launch failed: {}", e);
                TokenLaunchResult::failure(Network::Base, e.user_message())
            }
        }
    }

    async fn try_launch_solana(
        &self,
        creator: &Keypair,
        config: &TokenLaunchConfig,
    ) -> Result<TokenLaunchResult, LaunchError> {
        Self::check_request(Network::Solana, config)?;

        let Some(ChainAdapter::Solana(adapter)) = self.adapter(Network::Solana) else {
            return Err(LaunchError::NetworkUnavailable(Network::Solana));
        };

        // Validation guarantees the amount is non-negative.
        let whole_sol = config.initial_buy_amount.unwrap_or(0) as u128;
        let buy_amount_lamports =
            solana::to_lamports(whole_sol).ok_or(LaunchError::AmountOverflow(Network::Solana))?;

        let metadata = CreateTokenMetadata {
            name: config.name.clone(),
            symbol: config.symbol.clone(),
            metadata_uri: config.uri.clone(),
            description: config.description.clone(),
            website: config.website.clone(),
            twitter: config.twitter.clone(),
            telegram: config.telegram.clone(),
        };
        let mint = Keypair::new();

        let receipt = adapter
            .create_and_buy(CreateTokenRequest {
                creator,
                mint: &mint,
                metadata: &metadata,
                buy_amount_lamports,
                slippage_basis_points: DEFAULT_SLIPPAGE_BASIS_POINTS,
                priority_fee: None,
                commitment: commitment_for(self.effective_test_mode(config)),
            })
            .await?;

        Ok(TokenLaunchResult::solana_success(
            receipt.signature,
            receipt.mint,
            config.metadata(),
        ))
    }

    async fn try_launch_base(&self, config: &TokenLaunchConfig) -> Result<TokenLaunchResult, LaunchError> {
        Self::check_request(Network::Base, config)?;

        let Some(ChainAdapter::Base(adapter)) = self.adapter(Network::Base) else {
            return Err(LaunchError::NetworkUnavailable(Network::Base));
        };

        // Validation guarantees the amount is non-negative.
        let whole_units = config.initial_buy_amount.unwrap_or(0) as u128;
        let initial_supply =
            base::to_base_units(whole_units).ok_or(LaunchError::AmountOverflow(Network::Base))?;

        let deployment = adapter
            .deploy(&config.name, &config.symbol, initial_supply)
            .await?;

        Ok(TokenLaunchResult::base_success(
            deployment.transaction_hash,
            deployment.contract_address,
            config.metadata(),
        ))
    }

    /// Validation, then the network tag check. Runs before any adapter call.
    fn check_request(invoked: Network, config: &TokenLaunchConfig) -> Result<(), LaunchError> {
        validate(config)?;
        match config.network {
            Some(requested) if requested != invoked => {
                Err(LaunchError::NetworkMismatch { requested, invoked })
            }
            _ => Ok(()),
        }
    }

    /// A request may ask for test-mode confirmation on its own; endpoints stay fixed.
    fn effective_test_mode(&self, config: &TokenLaunchConfig) -> bool {
        match config.test_mode {
            Some(requested) => {
                if requested != self.test_mode {
                    warn!(
                        requested,
                        launcher_test_mode = self.test_mode,
                        "Request test mode differs from launcher; only the commitment level follows the request"
                    );
                }
                requested
            }
            None => self.test_mode,
        }
    }
}
