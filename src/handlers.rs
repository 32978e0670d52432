//! MCP tool handlers for token launches and network inspection

use async_trait::async_trait;
use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::base::BASE_UNIT_DECIMALS;
use crate::error::ToolError;
use crate::rpc;
use crate::solana::{commitment_for, DEFAULT_SLIPPAGE_BASIS_POINTS};
use crate::token::{Network, TokenLaunchConfig};
use crate::tools::{ToolContext, ToolDescriptor, ToolHandler, ToolName, ToolRegistry};
use crate::validation::validate;

/// Registry holding every tool this server exposes.
pub fn build_registry() -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    registry.register(
        launch_tool(
            ToolName::LaunchSolanaToken,
            "Launch a new token on Solana through a bonding-curve launch program, optionally with an initial buy in SOL. Uses 5% slippage. Returns the transaction signature and mint address.",
        ),
        Arc::new(LaunchToken { network: Network::Solana }),
    )?;
    registry.register(
        launch_tool(
            ToolName::LaunchBaseToken,
            "Deploy a new ERC-20 token on Base with an initial supply given in whole tokens (18 decimals). Returns the deployment transaction hash.",
        ),
        Arc::new(LaunchToken { network: Network::Base }),
    )?;
    registry.register(validate_token_config_tool(), Arc::new(ValidateTokenConfig))?;
    registry.register(list_launch_networks_tool(), Arc::new(ListLaunchNetworks))?;
    registry.register(get_network_status_tool(), Arc::new(GetNetworkStatus))?;
    Ok(registry)
}

/// Input schema derived from [`TokenLaunchConfig`], with the three
/// identifying fields marked required.
fn launch_input_schema() -> JsonObject {
    let schema = schemars::schema_for!(TokenLaunchConfig);
    let mut input_schema = match serde_json::to_value(&schema) {
        Ok(Value::Object(map)) => map,
        _ => JsonObject::new(),
    };
    input_schema.remove("$schema");
    input_schema.insert("type".to_string(), Value::String("object".to_string()));
    input_schema.insert("required".to_string(), json!(["name", "symbol", "uri"]));
    input_schema
}

fn launch_tool(name: ToolName, description: &str) -> ToolDescriptor {
    ToolDescriptor {
        name,
        description: description.to_string(),
        input_schema: launch_input_schema(),
    }
}

fn validate_token_config_tool() -> ToolDescriptor {
    ToolDescriptor {
        name: ToolName::ValidateTokenConfig,
        description: "Check a token configuration against the launch rules without submitting anything. Returns {valid, error}.".to_string(),
        input_schema: launch_input_schema(),
    }
}

fn list_launch_networks_tool() -> ToolDescriptor {
    let mut input_schema = serde_json::Map::new();
    input_schema.insert("type".to_string(), Value::String("object".to_string()));
    input_schema.insert(
        "properties".to_string(),
        Value::Object(serde_json::Map::new()),
    );

    ToolDescriptor {
        name: ToolName::ListLaunchNetworks,
        description: "List the networks this server can launch on, with RPC endpoint, chain id, commitment level and default slippage".to_string(),
        input_schema,
    }
}

fn get_network_status_tool() -> ToolDescriptor {
    let mut input_schema = serde_json::Map::new();
    input_schema.insert("type".to_string(), Value::String("object".to_string()));

    let mut properties = serde_json::Map::new();
    properties.insert(
        "network".to_string(),
        json!({
            "type": "string",
            "enum": ["solana", "base"],
            "description": "Network to probe"
        }),
    );

    input_schema.insert("properties".to_string(), Value::Object(properties));
    input_schema.insert(
        "required".to_string(),
        Value::Array(vec![Value::String("network".to_string())]),
    );

    ToolDescriptor {
        name: ToolName::GetNetworkStatus,
        description: "Check that a network's RPC endpoint answers, returning the latest slot (Solana) or block number (Base)".to_string(),
        input_schema,
    }
}

fn parse_args<T: DeserializeOwned>(tool: ToolName, args: JsonObject) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(args)).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}

fn to_json<T: Serialize>(tool: ToolName, value: &T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(|e| ToolError::Serialization {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}

/// `launch_solana_token` / `launch_base_token`
struct LaunchToken {
    network: Network,
}

impl LaunchToken {
    fn tool_name(&self) -> ToolName {
        match self.network {
            Network::Solana => ToolName::LaunchSolanaToken,
            Network::Base => ToolName::LaunchBaseToken,
        }
    }
}

#[async_trait]
impl ToolHandler for LaunchToken {
    async fn call(&self, ctx: &ToolContext, args: JsonObject) -> Result<Value, ToolError> {
        let tool = self.tool_name();
        let config: TokenLaunchConfig = parse_args(tool, args)?;

        let result = match self.network {
            Network::Solana => {
                let creator = ctx.creators.creator_for_launch();
                ctx.launcher.launch_solana_token(&creator, &config).await
            }
            Network::Base => ctx.launcher.launch_base_token(&config).await,
        };

        to_json(tool, &result)
    }
}

struct ValidateTokenConfig;

#[async_trait]
impl ToolHandler for ValidateTokenConfig {
    async fn call(&self, _ctx: &ToolContext, args: JsonObject) -> Result<Value, ToolError> {
        let config: TokenLaunchConfig = parse_args(ToolName::ValidateTokenConfig, args)?;
        Ok(match validate(&config) {
            Ok(()) => json!({ "valid": true }),
            Err(e) => json!({ "valid": false, "error": e.to_string() }),
        })
    }
}

struct ListLaunchNetworks;

#[async_trait]
impl ToolHandler for ListLaunchNetworks {
    async fn call(&self, ctx: &ToolContext, _args: JsonObject) -> Result<Value, ToolError> {
        let test_mode = ctx.launcher.test_mode();
        let creator = if ctx.creators.is_ephemeral() { "ephemeral" } else { "configured" };
        let networks: Vec<Value> = ctx
            .launcher
            .networks()
            .into_iter()
            .map(|network| match network {
                Network::Solana => json!({
                    "network": network,
                    "testMode": test_mode,
                    "rpcUrl": ctx.endpoints.solana_rpc,
                    "commitment": commitment_for(test_mode),
                    "defaultSlippageBps": DEFAULT_SLIPPAGE_BASIS_POINTS,
                    "creator": creator,
                }),
                Network::Base => json!({
                    "network": network,
                    "testMode": test_mode,
                    "rpcUrl": ctx.endpoints.base_rpc,
                    "chainId": ctx.endpoints.base_chain_id,
                    "decimals": BASE_UNIT_DECIMALS,
                }),
            })
            .collect();

        Ok(json!({ "networks": networks }))
    }
}

struct GetNetworkStatus;

#[async_trait]
impl ToolHandler for GetNetworkStatus {
    async fn call(&self, ctx: &ToolContext, args: JsonObject) -> Result<Value, ToolError> {
        let tool = ToolName::GetNetworkStatus;
        let network: Network = args
            .get("network")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::InvalidArguments {
                tool: tool.to_string(),
                reason: "missing 'network' parameter".to_string(),
            })?
            .parse::<Network>()
            .map_err(|reason| ToolError::InvalidArguments {
                tool: tool.to_string(),
                reason,
            })?;

        let status = rpc::probe(network, &ctx.endpoints).await;
        info!(
            network = %network,
            reachable = status.reachable,
            height = ?status.height,
            "Network status probed"
        );
        to_json(tool, &status)
    }
}
