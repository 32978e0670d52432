//! Launch request and result types shared by every chain

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Supported launch targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Solana,
    Base,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Solana, Network::Base];

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Solana => "solana",
            Network::Base => "base",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solana" => Ok(Network::Solana),
            "base" => Ok(Network::Base),
            other => Err(format!("unsupported network '{}', expected 'solana' or 'base'", other)),
        }
    }
}

/// A token launch request.
///
/// `initial_buy_amount` is expressed in the target chain's whole native unit
/// and travels as a decimal string on the wire so that values wider than an
/// IEEE double survive intact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenLaunchConfig {
    /// Token name, at most 32 characters
    #[serde(default)]
    pub name: String,
    /// Ticker symbol, at most 10 characters
    #[serde(default)]
    pub symbol: String,
    /// Absolute URI of the token metadata JSON
    #[serde(default)]
    pub uri: String,
    /// Initial buy in whole units (SOL on Solana, tokens on Base), as a decimal string
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "amount::serialize",
        deserialize_with = "amount::deserialize"
    )]
    #[schemars(with = "Option<String>")]
    pub initial_buy_amount: Option<i128>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    /// Must match the tool's network when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,
    /// Request-level confirmation mode; endpoints stay those of the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_mode: Option<bool>,
}

impl TokenLaunchConfig {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            uri: uri.into(),
            ..Default::default()
        }
    }

    pub fn with_initial_buy_amount(mut self, amount: i128) -> Self {
        self.initial_buy_amount = Some(amount);
        self
    }

    pub fn metadata(&self) -> LaunchMetadata {
        LaunchMetadata {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            uri: self.uri.clone(),
        }
    }
}

/// Echo of the submitted metadata, returned on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

/// Uniform result envelope for every launch.
///
/// Fields are private to the crate so that the only ways to build one are the
/// success and failure constructors, which keep `error` and the success-only
/// fields mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenLaunchResult {
    pub(crate) success: bool,
    pub(crate) network: Network,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) transaction_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) mint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) metadata: Option<LaunchMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

impl TokenLaunchResult {
    pub fn solana_success(signature: String, mint: String, metadata: LaunchMetadata) -> Self {
        Self {
            success: true,
            network: Network::Solana,
            transaction_hash: Some(signature),
            mint: Some(mint),
            contract_address: None,
            metadata: Some(metadata),
            error: None,
        }
    }

    pub fn base_success(
        transaction_hash: String,
        contract_address: Option<String>,
        metadata: LaunchMetadata,
    ) -> Self {
        Self {
            success: true,
            network: Network::Base,
            transaction_hash: Some(transaction_hash),
            mint: None,
            contract_address,
            metadata: Some(metadata),
            error: None,
        }
    }

    pub fn failure(network: Network, error: impl Into<String>) -> Self {
        Self {
            success: false,
            network,
            transaction_hash: None,
            mint: None,
            contract_address: None,
            metadata: None,
            error: Some(error.into()),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn transaction_hash(&self) -> Option<&str> {
        self.transaction_hash.as_deref()
    }

    pub fn mint(&self) -> Option<&str> {
        self.mint.as_deref()
    }

    pub fn contract_address(&self) -> Option<&str> {
        self.contract_address.as_deref()
    }

    pub fn metadata(&self) -> Option<&LaunchMetadata> {
        self.metadata.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Wire format for buy amounts: decimal strings out, strings or integers in.
pub(crate) mod amount {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<i128>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i128>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => parse(&s).map(Some).map_err(serde::de::Error::custom),
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    Ok(Some(i as i128))
                } else if let Some(u) = n.as_u64() {
                    Ok(Some(u as i128))
                } else {
                    Err(serde::de::Error::custom(format!(
                        "initialBuyAmount must be an integer, got {}",
                        n
                    )))
                }
            }
            Some(other) => Err(serde::de::Error::custom(format!(
                "initialBuyAmount must be a string or integer, got {}",
                other
            ))),
        }
    }

    /// Parse a decimal integer, tolerating surrounding whitespace and a trailing `n`.
    pub fn parse(raw: &str) -> Result<i128, String> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_suffix('n').unwrap_or(trimmed);
        digits
            .parse::<i128>()
            .map_err(|e| format!("invalid initialBuyAmount '{}': {}", raw, e))
    }
}
