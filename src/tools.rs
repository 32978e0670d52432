//! Tool registry and router
//!
//! Tools are keyed by [`ToolName`]. The registry is filled once at startup and
//! only read afterwards; it holds no blockchain state of its own.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use crate::config::{LauncherConfig, NetworkEndpoints};
use crate::error::{ConfigError, ToolError};
use crate::launcher::TokenLauncher;
use crate::solana::CreatorSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    LaunchSolanaToken,
    LaunchBaseToken,
    ValidateTokenConfig,
    ListLaunchNetworks,
    GetNetworkStatus,
}

impl ToolName {
    pub const ALL: [ToolName; 5] = [
        ToolName::LaunchSolanaToken,
        ToolName::LaunchBaseToken,
        ToolName::ValidateTokenConfig,
        ToolName::ListLaunchNetworks,
        ToolName::GetNetworkStatus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::LaunchSolanaToken => "launch_solana_token",
            ToolName::LaunchBaseToken => "launch_base_token",
            ToolName::ValidateTokenConfig => "validate_token_config",
            ToolName::ListLaunchNetworks => "list_launch_networks",
            ToolName::GetNetworkStatus => "get_network_status",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ToolError::NotFound(s.to_string()))
    }
}

/// Name, description and JSON input schema of one tool.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: ToolName,
    pub description: String,
    pub input_schema: JsonObject,
}

impl ToolDescriptor {
    pub fn to_mcp_tool(&self) -> Tool {
        Tool::new(
            self.name.as_str(),
            self.description.clone(),
            Arc::new(self.input_schema.clone()),
        )
    }
}

/// Shared state handed to every tool invocation.
#[derive(Clone)]
pub struct ToolContext {
    pub launcher: Arc<TokenLauncher>,
    pub creators: Arc<CreatorSource>,
    pub endpoints: NetworkEndpoints,
}

impl ToolContext {
    pub fn new(launcher: TokenLauncher, creators: CreatorSource, endpoints: NetworkEndpoints) -> Self {
        Self {
            launcher: Arc::new(launcher),
            creators: Arc::new(creators),
            endpoints,
        }
    }

    /// Context wired to the simulated adapters and the configured creator keypair.
    pub fn from_config(config: &LauncherConfig) -> Result<Self, ConfigError> {
        let creators = CreatorSource::from_optional_path(config.solana_keypair_path.as_deref())?;
        Ok(Self::new(
            TokenLauncher::from_config(config),
            creators,
            config.endpoints(),
        ))
    }
}

#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, ctx: &ToolContext, args: JsonObject) -> Result<Value, ToolError>;
}

#[derive(Default)]
pub struct ToolRegistry {
    descriptors: Vec<ToolDescriptor>,
    handlers: HashMap<ToolName, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: ToolDescriptor, handler: Arc<dyn ToolHandler>) -> Result<(), ToolError> {
        if self.handlers.contains_key(&descriptor.name) {
            return Err(ToolError::Duplicate(descriptor.name.to_string()));
        }
        self.handlers.insert(descriptor.name, handler);
        self.descriptors.push(descriptor);
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<Arc<dyn ToolHandler>, ToolError> {
        let key = ToolName::from_str(name)?;
        self.handlers
            .get(&key)
            .cloned()
            .ok_or_else(|| ToolError::NotFound(name.to_string()))
    }

    /// Descriptors in registration order.
    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    pub fn list_tools(&self) -> Vec<Tool> {
        self.descriptors.iter().map(ToolDescriptor::to_mcp_tool).collect()
    }

    /// Run `name` and wrap its JSON result in a single text content block.
    pub async fn invoke(&self, name: &str, args: JsonObject, ctx: &ToolContext) -> Result<CallToolResult, ToolError> {
        let handler = self.resolve(name)?;
        debug!(tool = name, "Invoking tool");

        let value = handler.call(ctx, args).await?;
        let text = serde_json::to_string(&value).map_err(|e| ToolError::Serialization {
            tool: name.to_string(),
            reason: e.to_string(),
        })?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl ToolHandler for Echo {
        async fn call(&self, _ctx: &ToolContext, args: JsonObject) -> Result<Value, ToolError> {
            Ok(Value::Object(args))
        }
    }

    fn descriptor(name: ToolName) -> ToolDescriptor {
        ToolDescriptor {
            name,
            description: format!("{} tool", name),
            input_schema: JsonObject::new(),
        }
    }

    fn context() -> ToolContext {
        ToolContext::from_config(&LauncherConfig::for_test_mode()).unwrap()
    }

    /// Every tool name parses back to its variant; unknown names are NotFound
    #[test]
    fn test_tool_name_round_trip() {
        for name in ToolName::ALL {
            assert_eq!(ToolName::from_str(name.as_str()).unwrap(), name);
        }
        assert!(matches!(
            ToolName::from_str("nonexistent_tool_xyz"),
            Err(ToolError::NotFound(_))
        ));
    }

    /// Registering the same tool twice fails and keeps the first
    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = ToolRegistry::new();
        registry
            .register(descriptor(ToolName::ListLaunchNetworks), Arc::new(Echo))
            .unwrap();
        let err = registry
            .register(descriptor(ToolName::ListLaunchNetworks), Arc::new(Echo))
            .unwrap_err();

        assert!(matches!(err, ToolError::Duplicate(ref n) if n == "list_launch_networks"));
        assert_eq!(registry.descriptors().len(), 1);
    }

    /// A known name that was never registered does not resolve
    #[test]
    fn test_unregistered_name_not_found() {
        let mut registry = ToolRegistry::new();
        registry
            .register(descriptor(ToolName::LaunchBaseToken), Arc::new(Echo))
            .unwrap();

        assert!(registry.resolve("launch_base_token").is_ok());
        assert!(matches!(
            registry.resolve("launch_solana_token"),
            Err(ToolError::NotFound(ref n)) if n == "launch_solana_token"
        ));
    }

    /// Listing follows registration order
    #[test]
    fn test_list_tools_keeps_registration_order() {
        let mut registry = ToolRegistry::new();
        for name in [ToolName::GetNetworkStatus, ToolName::LaunchSolanaToken] {
            registry.register(descriptor(name), Arc::new(Echo)).unwrap();
        }

        let names: Vec<String> = registry.list_tools().iter().map(|t| t.name.to_string()).collect();
        assert_eq!(names, vec!["get_network_status", "launch_solana_token"]);
    }

    /// Invoke returns exactly one text block holding the JSON result
    #[tokio::test]
    async fn test_invoke_wraps_result_in_text_block() {
        let mut registry = ToolRegistry::new();
        registry
            .register(descriptor(ToolName::ValidateTokenConfig), Arc::new(Echo))
            .unwrap();

        let args = json!({"symbol": "TEST"}).as_object().unwrap().clone();
        let result = registry
            .invoke("validate_token_config", args, &context())
            .await
            .unwrap();

        assert_eq!(result.content.len(), 1);
        let text = &result.content[0].as_text().unwrap().text;
        let value: Value = serde_json::from_str(text).unwrap();
        assert_eq!(value, json!({"symbol": "TEST"}));
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry
            .invoke("nonexistent_tool_xyz", JsonObject::new(), &context())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Tool nonexistent_tool_xyz not found");
    }
}
