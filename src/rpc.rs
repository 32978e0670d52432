//! JSON-RPC liveness probes for the configured launch networks

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::NetworkEndpoints;
use crate::token::Network;

/// Shared HTTP client for RPC probes
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_default()
});

/// Result of probing one network endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatus {
    pub network: Network,
    pub endpoint: String,
    pub reachable: bool,
    /// Latest slot (Solana) or block number (Base)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Method used to read chain height on each network
pub fn height_method(network: Network) -> &'static str {
    match network {
        Network::Solana => "getSlot",
        Network::Base => "eth_blockNumber",
    }
}

pub fn endpoint_for(network: Network, endpoints: &NetworkEndpoints) -> &str {
    match network {
        Network::Solana => &endpoints.solana_rpc,
        Network::Base => &endpoints.base_rpc,
    }
}

fn request_body(network: Network) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": height_method(network),
        "params": []
    })
}

/// Extract the chain height from a JSON-RPC response body.
///
/// Solana returns a plain integer; EVM nodes return a `0x` hex quantity.
fn parse_height(network: Network, body: &str) -> Result<u64> {
    let response: RpcResponse = serde_json::from_str(body).context("Invalid JSON-RPC response")?;

    if let Some(err) = response.error {
        anyhow::bail!("RPC error {}: {}", err.code, err.message);
    }

    let result = response
        .result
        .context("JSON-RPC response has neither result nor error")?;

    match network {
        Network::Solana => result
            .as_u64()
            .with_context(|| format!("Expected integer slot, got {}", result)),
        Network::Base => {
            let quantity = result
                .as_str()
                .with_context(|| format!("Expected hex block number, got {}", result))?;
            u64::from_str_radix(quantity.trim_start_matches("0x"), 16)
                .with_context(|| format!("Invalid hex block number: {}", quantity))
        }
    }
}

async fn fetch_height(network: Network, endpoint: &str) -> Result<u64> {
    let response = HTTP_CLIENT
        .post(endpoint)
        .json(&request_body(network))
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", endpoint))?;

    let text = response.text().await?;
    parse_height(network, &text)
}

/// Probe `network`. Transport or RPC failures are reported in the status, not raised.
pub async fn probe(network: Network, endpoints: &NetworkEndpoints) -> NetworkStatus {
    let endpoint = endpoint_for(network, endpoints).to_string();
    match fetch_height(network, &endpoint).await {
        Ok(height) => NetworkStatus {
            network,
            endpoint,
            reachable: true,
            height: Some(height),
            error: None,
        },
        Err(e) => NetworkStatus {
            network,
            endpoint,
            reachable: false,
            height: None,
            error: Some(format!("{:#}", e)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> NetworkEndpoints {
        NetworkEndpoints {
            test_mode: true,
            solana_rpc: "http://127.0.0.1:1".to_string(),
            base_rpc: "http://127.0.0.1:1".to_string(),
            base_chain_id: 84532,
        }
    }

    #[test]
    fn test_request_body_uses_network_method() {
        assert_eq!(request_body(Network::Solana)["method"], "getSlot");
        assert_eq!(request_body(Network::Base)["method"], "eth_blockNumber");
    }

    #[test]
    fn test_parse_solana_slot() {
        let body = r#"{"jsonrpc":"2.0","result":312345678,"id":1}"#;
        assert_eq!(parse_height(Network::Solana, body).unwrap(), 312_345_678);
    }

    /// EVM block numbers arrive as hex quantities
    #[test]
    fn test_parse_base_block_number() {
        let body = r#"{"jsonrpc":"2.0","result":"0x1b4","id":1}"#;
        assert_eq!(parse_height(Network::Base, body).unwrap(), 436);
    }

    /// JSON-RPC error objects surface their message
    #[test]
    fn test_parse_rpc_error() {
        let body = r#"{"jsonrpc":"2.0","error":{"code":-32601,"message":"Method not found"},"id":1}"#;
        let err = parse_height(Network::Base, body).unwrap_err();
        assert!(err.to_string().contains("Method not found"));
    }

    #[test]
    fn test_parse_wrong_result_shape() {
        let body = r#"{"jsonrpc":"2.0","result":"0x10","id":1}"#;
        assert!(parse_height(Network::Solana, body).is_err());
        assert!(parse_height(Network::Base, "not json").is_err());
    }

    /// Connection failures produce reachable: false
    #[tokio::test]
    async fn test_probe_unreachable_endpoint_reports_status() {
        let status = probe(Network::Solana, &endpoints()).await;
        assert!(!status.reachable);
        assert!(status.height.is_none());
        assert!(status.error.is_some());
        assert_eq!(status.endpoint, "http://127.0.0.1:1");
    }
}
