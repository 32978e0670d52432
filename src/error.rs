//! Error types for configuration, validation, chain adapters and tool routing

use thiserror::Error;

use crate::token::Network;

/// Fatal startup errors raised while building [`crate::config::LauncherConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVariable(&'static str),
    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
    #[error("invalid credential in {name}: {reason}")]
    InvalidCredential { name: &'static str, reason: String },
    #[error("failed to read Solana keypair from {path}: {reason}")]
    Keypair { path: String, reason: String },
}

/// A launch request rejected before any chain is contacted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid token configuration: name, symbol, and URI are required")]
    MissingField,
    #[error("Initial buy amount must be non-negative")]
    NegativeAmount,
    #[error("Symbol must be 10 characters or less")]
    SymbolTooLong,
    #[error("Name must be 32 characters or less")]
    NameTooLong,
    #[error("Invalid URI format")]
    InvalidUri,
}

/// Failure category reported by a chain adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterErrorKind {
    Network,
    Signature,
    Rejected,
    Other,
}

/// The single fault channel of a chain adapter.
///
/// `short_message` carries the chain-specific one-liner when the underlying
/// client provides one; it takes precedence over `message` when shown to users.
#[derive(Debug, Clone, Error)]
#[error("{kind:?} error: {message}")]
pub struct AdapterError {
    pub kind: AdapterErrorKind,
    pub message: String,
    pub short_message: Option<String>,
}

impl AdapterError {
    pub fn new(kind: AdapterErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            short_message: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AdapterErrorKind::Network, message)
    }

    pub fn signature(message: impl Into<String>) -> Self {
        Self::new(AdapterErrorKind::Signature, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(AdapterErrorKind::Rejected, message)
    }

    pub fn with_short_message(mut self, short: impl Into<String>) -> Self {
        self.short_message = Some(short.into());
        self
    }

    /// Most specific human-readable text available.
    pub fn user_message(&self) -> String {
        if let Some(short) = self.short_message.as_deref().filter(|s| !s.trim().is_empty()) {
            return short.to_string();
        }
        if !self.message.trim().is_empty() {
            return self.message.clone();
        }
        "Unknown error occurred".to_string()
    }
}

/// Everything that can turn a launch into a `success: false` envelope.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    #[error("Network {0} is not configured on this launcher")]
    NetworkUnavailable(Network),
    #[error("Launch request targets {requested} but was submitted to {invoked}")]
    NetworkMismatch { requested: Network, invoked: Network },
    #[error("Initial buy amount is too large for {0}")]
    AmountOverflow(Network),
}

impl LaunchError {
    /// Text placed in `TokenLaunchResult::error`.
    pub fn user_message(&self) -> String {
        match self {
            LaunchError::Adapter(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Router-level faults. These propagate to the MCP caller as protocol errors.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool {0} not found")]
    NotFound(String),
    #[error("Tool {0} is already registered")]
    Duplicate(String),
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },
    #[error("Failed to serialize result of {tool}: {reason}")]
    Serialization { tool: String, reason: String },
}

impl From<ToolError> for rmcp::ErrorData {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::NotFound(_) | ToolError::InvalidArguments { .. } => {
                rmcp::ErrorData::invalid_params(err.to_string(), None)
            }
            ToolError::Duplicate(_) | ToolError::Serialization { .. } => {
                rmcp::ErrorData::internal_error(err.to_string(), None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_short_message() {
        let err = AdapterError::rejected("execution reverted: 0x08c379a0...")
            .with_short_message("Execution reverted");
        assert_eq!(err.user_message(), "Execution reverted");
    }

    #[test]
    fn test_user_message_falls_back_to_message() {
        let err = AdapterError::network("connection refused").with_short_message("  ");
        assert_eq!(err.user_message(), "connection refused");
    }

    #[test]
    fn test_user_message_unknown_when_empty() {
        let err = AdapterError::new(AdapterErrorKind::Other, "");
        assert_eq!(err.user_message(), "Unknown error occurred");
    }

    #[test]
    fn test_launch_error_wraps_adapter_message() {
        let err = LaunchError::from(AdapterError::network("timeout").with_short_message("RPC timeout"));
        assert_eq!(err.user_message(), "RPC timeout");

        let err = LaunchError::from(ValidationError::InvalidUri);
        assert_eq!(err.user_message(), "Invalid URI format");
    }

    #[test]
    fn test_tool_not_found_maps_to_invalid_params() {
        let data: rmcp::ErrorData = ToolError::NotFound("nope".to_string()).into();
        assert!(data.message.contains("nope"));
    }
}
