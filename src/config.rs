//! Launcher configuration, loaded once at startup from the environment

use anyhow::{Context, Result};
use bip39::{Language, Mnemonic};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use url::Url;

use crate::error::ConfigError;

pub const SOLANA_MAINNET_RPC: &str = "https://api.mainnet-beta.solana.com";
pub const SOLANA_DEVNET_RPC: &str = "https://api.devnet.solana.com";
pub const BASE_MAINNET_RPC: &str = "https://mainnet.base.org";
pub const BASE_SEPOLIA_RPC: &str = "https://sepolia.base.org";
pub const BASE_MAINNET_CHAIN_ID: u64 = 8453;
pub const BASE_SEPOLIA_CHAIN_ID: u64 = 84532;

/// A string that never shows up in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(**redacted**)")
    }
}

/// Coinbase developer platform API key.
#[derive(Debug, Clone)]
pub struct CoinbaseCredentials {
    pub api_key_name: String,
    pub api_private_key: Secret,
}

/// Key material for the Base deployment account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseSigner {
    /// 32-byte secp256k1 key, hex encoded.
    PrivateKey(Secret),
    /// English BIP-39 phrase.
    Mnemonic(Secret),
}

impl BaseSigner {
    pub fn parse_private_key(raw: &str) -> Result<Self, ConfigError> {
        let hex_part = raw.trim().trim_start_matches("0x");
        let bytes = hex::decode(hex_part).map_err(|e| ConfigError::InvalidCredential {
            name: "BASE_PRIVATE_KEY",
            reason: format!("not valid hex ({})", e),
        })?;
        if bytes.len() != 32 {
            return Err(ConfigError::InvalidCredential {
                name: "BASE_PRIVATE_KEY",
                reason: format!("expected 32 bytes, got {}", bytes.len()),
            });
        }
        if bytes.iter().all(|b| *b == 0) {
            return Err(ConfigError::InvalidCredential {
                name: "BASE_PRIVATE_KEY",
                reason: "key must not be zero".to_string(),
            });
        }
        Ok(BaseSigner::PrivateKey(Secret::new(hex::encode(bytes))))
    }

    pub fn parse_mnemonic(raw: &str) -> Result<Self, ConfigError> {
        let mnemonic = Mnemonic::parse_in_normalized(Language::English, raw.trim()).map_err(|e| {
            ConfigError::InvalidCredential {
                name: "SEED_PHRASE",
                reason: e.to_string(),
            }
        })?;
        Ok(BaseSigner::Mnemonic(Secret::new(mnemonic.to_string())))
    }

    /// Bytes that identify this signer without revealing it.
    pub fn key_material(&self) -> Vec<u8> {
        match self {
            BaseSigner::PrivateKey(key) => hex::decode(key.expose()).unwrap_or_default(),
            BaseSigner::Mnemonic(phrase) => match Mnemonic::parse_in_normalized(Language::English, phrase.expose()) {
                Ok(m) => m.to_seed("")[..32].to_vec(),
                Err(_) => Vec::new(),
            },
        }
    }
}

/// Optional RPC endpoint overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RpcOverrides {
    pub solana_mainnet: Option<String>,
    pub solana_devnet: Option<String>,
    pub base_mainnet: Option<String>,
    pub base_testnet: Option<String>,
}

/// Endpoints chosen for this process, fixed once the mode is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkEndpoints {
    pub test_mode: bool,
    pub solana_rpc: String,
    pub base_rpc: String,
    pub base_chain_id: u64,
}

/// Everything the launcher needs from its environment.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    pub test_mode: bool,
    pub coinbase: Option<CoinbaseCredentials>,
    pub base_signer: Option<BaseSigner>,
    pub rpc: RpcOverrides,
    pub solana_keypair_path: Option<PathBuf>,
}

impl LauncherConfig {
    /// Config with no credentials, usable only in test mode.
    pub fn for_test_mode() -> Self {
        Self {
            test_mode: true,
            coinbase: None,
            base_signer: None,
            rpc: RpcOverrides::default(),
            solana_keypair_path: None,
        }
    }

    /// Load a `.env` file into the process environment.
    ///
    /// A missing default `.env` is fine; an explicitly requested file must exist.
    pub fn load_dotenv(path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path)
                    .with_context(|| format!("Failed to load env file: {}", path.display()))?;
                info!("Loaded environment from {}", path.display());
            }
            None => {
                if let Ok(path) = dotenvy::dotenv() {
                    info!("Loaded environment from {}", path.display());
                }
            }
        }
        Ok(())
    }

    /// Read configuration from process environment variables.
    pub fn from_env(force_test_mode: bool) -> Result<Self, ConfigError> {
        Self::from_lookup(force_test_mode, |key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, so callers can supply any source.
    ///
    /// Credentials may be absent in test mode; when present they are always
    /// validated. In production a missing credential is an error.
    pub fn from_lookup<F>(force_test_mode: bool, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let test_mode = force_test_mode
            || match get("LAUNCHER_TEST_MODE") {
                Some(raw) => parse_bool("LAUNCHER_TEST_MODE", &raw)?,
                None => false,
            };

        let coinbase = match (get("COINBASE_API_KEY_NAME"), get("COINBASE_API_PRIVATE_KEY")) {
            (Some(api_key_name), Some(private_key)) => Some(CoinbaseCredentials {
                api_key_name,
                api_private_key: Secret::new(private_key),
            }),
            (None, _) if !test_mode => return Err(ConfigError::MissingVariable("COINBASE_API_KEY_NAME")),
            (_, None) if !test_mode => return Err(ConfigError::MissingVariable("COINBASE_API_PRIVATE_KEY")),
            _ => None,
        };

        let base_signer = if let Some(key) = get("BASE_PRIVATE_KEY") {
            Some(BaseSigner::parse_private_key(&key)?)
        } else if let Some(phrase) = get("SEED_PHRASE") {
            Some(BaseSigner::parse_mnemonic(&phrase)?)
        } else if test_mode {
            None
        } else {
            return Err(ConfigError::MissingVariable("SEED_PHRASE"));
        };

        let rpc = RpcOverrides {
            solana_mainnet: parse_url("SOLANA_RPC_URL", get("SOLANA_RPC_URL"))?,
            solana_devnet: parse_url("SOLANA_DEVNET_RPC_URL", get("SOLANA_DEVNET_RPC_URL"))?,
            base_mainnet: parse_url("BASE_RPC_URL", get("BASE_RPC_URL"))?,
            base_testnet: parse_url("BASE_DEVNET_RPC_URL", get("BASE_DEVNET_RPC_URL"))?,
        };

        let solana_keypair_path = get("SOLANA_KEYPAIR_PATH").map(PathBuf::from);

        if test_mode && base_signer.is_none() {
            warn!("No Base signer configured; launches run against simulated adapters only");
        }

        Ok(Self {
            test_mode,
            coinbase,
            base_signer,
            rpc,
            solana_keypair_path,
        })
    }

    /// Resolve the endpoints for the configured mode.
    pub fn endpoints(&self) -> NetworkEndpoints {
        if self.test_mode {
            NetworkEndpoints {
                test_mode: true,
                solana_rpc: self
                    .rpc
                    .solana_devnet
                    .clone()
                    .unwrap_or_else(|| SOLANA_DEVNET_RPC.to_string()),
                base_rpc: self
                    .rpc
                    .base_testnet
                    .clone()
                    .unwrap_or_else(|| BASE_SEPOLIA_RPC.to_string()),
                base_chain_id: BASE_SEPOLIA_CHAIN_ID,
            }
        } else {
            NetworkEndpoints {
                test_mode: false,
                solana_rpc: self
                    .rpc
                    .solana_mainnet
                    .clone()
                    .unwrap_or_else(|| SOLANA_MAINNET_RPC.to_string()),
                base_rpc: self
                    .rpc
                    .base_mainnet
                    .clone()
                    .unwrap_or_else(|| BASE_MAINNET_RPC.to_string()),
                base_chain_id: BASE_MAINNET_CHAIN_ID,
            }
        }
    }
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            reason: format!("expected a boolean, got '{}'", raw),
        }),
    }
}

fn parse_url(name: &'static str, raw: Option<String>) -> Result<Option<String>, ConfigError> {
    match raw {
        Some(raw) => {
            Url::parse(&raw).map_err(|e| ConfigError::InvalidValue {
                name,
                reason: e.to_string(),
            })?;
            Ok(Some(raw))
        }
        None => Ok(None),
    }
}
