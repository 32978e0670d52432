//! MCP server handler implementation

use anyhow::Result;
use rmcp::{
    model::*,
    service::{RequestContext, RoleServer},
    ErrorData as McpError, ServerHandler,
};
use std::sync::Arc;

use crate::config::LauncherConfig;
use crate::handlers;
use crate::tools::{ToolContext, ToolRegistry};

/// MCP server handler
#[derive(Clone)]
pub struct TokenLaunchMcpHandler {
    registry: Arc<ToolRegistry>,
    context: ToolContext,
}

impl TokenLaunchMcpHandler {
    pub fn new(context: ToolContext) -> Result<Self> {
        Ok(Self {
            registry: Arc::new(handlers::build_registry()?),
            context,
        })
    }

    pub fn from_config(config: &LauncherConfig) -> Result<Self> {
        Self::new(ToolContext::from_config(config)?)
    }

    pub fn test_mode(&self) -> bool {
        self.context.launcher.test_mode()
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}

impl ServerHandler for TokenLaunchMcpHandler {
    fn get_info(&self) -> ServerInfo {
        let mode = if self.test_mode() { "test networks (Solana devnet, Base Sepolia)" } else { "mainnet" };
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities {
                prompts: None,
                resources: None,
                tools: Some(ToolsCapability {
                    list_changed: None,
                }),
                logging: None,
                completions: None,
                experimental: None,
            },
            server_info: Implementation {
                name: "token-launch-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Token Launch MCP Server".to_string()),
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "MCP server for launching tokens on Solana (bonding-curve launch with an initial buy) and Base (ERC-20 deployment). Currently targeting {}. Validate a configuration with validate_token_config before launching.",
                mode
            )),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request.arguments.unwrap_or_default();
        self.registry
            .invoke(&request.name, args, &self.context)
            .await
            .map_err(McpError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_handler() -> TokenLaunchMcpHandler {
        TokenLaunchMcpHandler::from_config(&LauncherConfig::for_test_mode()).unwrap()
    }

    #[test]
    fn test_get_info_returns_valid_server_info() {
        let handler = create_test_handler();
        let info = handler.get_info();

        assert_eq!(info.server_info.name, "token-launch-mcp");
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(
            info.server_info.title,
            Some("Token Launch MCP Server".to_string())
        );
        assert!(info.instructions.unwrap().contains("devnet"));
    }

    /// Tools only; no resources or prompts
    #[test]
    fn test_get_info_capabilities() {
        let info = create_test_handler().get_info();

        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
    }

    #[test]
    fn test_get_info_protocol_version() {
        let info = create_test_handler().get_info();
        let version_str = format!("{}", info.protocol_version);
        assert!(!version_str.is_empty());
    }

    #[test]
    fn test_handler_is_clone() {
        let handler = create_test_handler();
        let cloned = handler.clone();

        assert_eq!(handler.test_mode(), cloned.test_mode());
        assert_eq!(
            handler.registry().list_tools().len(),
            cloned.registry().list_tools().len()
        );
    }

    #[test]
    fn test_registry_exposes_launch_tools() {
        let handler = create_test_handler();
        assert!(handler.registry().resolve("launch_solana_token").is_ok());
        assert!(handler.registry().resolve("launch_base_token").is_ok());
    }

    #[tokio::test]
    async fn test_unknown_tool_maps_to_invalid_params() {
        let handler = create_test_handler();
        let err = handler
            .registry()
            .invoke("nonexistent_tool_xyz", JsonObject::new(), &handler.context)
            .await
            .map_err(McpError::from)
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("nonexistent_tool_xyz"));
    }
}
