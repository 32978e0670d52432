//! Token Launch MCP Server - Entry point

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rmcp::service::ServiceExt;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use token_launch_mcp::{
    config::LauncherConfig, tools::ToolContext, Network, TokenLaunchConfig, TokenLaunchMcpHandler,
    TokenLaunchResult,
};

/// Token Launch MCP Server - launch tokens on Solana and Base
#[derive(Parser, Debug)]
#[command(name = "token-launch-mcp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a .env file (defaults to ./.env when present)
    #[arg(long, value_name = "FILE", global = true)]
    env_file: Option<PathBuf>,

    /// Use devnet / Base Sepolia and allow missing credentials
    #[arg(long, global = true)]
    test_mode: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve MCP over stdio (default)
    Serve,
    /// Launch a single token and print the result
    Launch(LaunchArgs),
}

#[derive(Args, Debug)]
struct LaunchArgs {
    /// Target network: solana or base
    #[arg(long)]
    network: Network,
    #[arg(long)]
    name: String,
    #[arg(long)]
    symbol: String,
    /// Metadata URI
    #[arg(long)]
    uri: String,
    /// Initial buy in whole native units (SOL on Solana, tokens on Base)
    #[arg(long, allow_hyphen_values = true)]
    initial_buy_amount: Option<i128>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    website: Option<String>,
    #[arg(long)]
    twitter: Option<String>,
    #[arg(long)]
    telegram: Option<String>,
}

impl LaunchArgs {
    fn into_config(self) -> TokenLaunchConfig {
        TokenLaunchConfig {
            name: self.name,
            symbol: self.symbol,
            uri: self.uri,
            initial_buy_amount: self.initial_buy_amount,
            description: self.description,
            website: self.website,
            twitter: self.twitter,
            telegram: self.telegram,
            network: None,
            test_mode: None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the MCP protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("token_launch_mcp=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    LauncherConfig::load_dotenv(cli.env_file.as_deref())?;
    let config = LauncherConfig::from_env(cli.test_mode).context("Invalid launcher configuration")?;
    log_config_status(&config);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config).await,
        Command::Launch(args) => launch(&config, args).await,
    }
}

async fn serve(config: &LauncherConfig) -> Result<()> {
    let handler = TokenLaunchMcpHandler::from_config(config)?;

    // Serve using stdio transport
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    info!("Serving MCP over stdio");
    let service = handler.serve((stdin, stdout)).await?;
    service.waiting().await?;

    Ok(())
}

async fn launch(config: &LauncherConfig, args: LaunchArgs) -> Result<()> {
    let ctx = ToolContext::from_config(config)?;
    let network = args.network;
    let token = args.into_config();

    let creator = ctx.creators.creator_for_launch();
    let result = ctx.launcher.launch(network, &token, Some(&creator)).await;

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    report_launch(&result, &mut stdout.lock(), &mut stderr.lock())
}

/// Print a launch outcome. A failed launch is reported, not raised.
fn report_launch(result: &TokenLaunchResult, out: &mut impl Write, err: &mut impl Write) -> Result<()> {
    if !result.success() {
        writeln!(
            err,
            "Failed to launch token: {}",
            result.error().unwrap_or("Unknown error occurred")
        )?;
        return Ok(());
    }

    writeln!(out, "Token launched on {}", result.network())?;
    if let Some(hash) = result.transaction_hash() {
        writeln!(out, "  transactionHash: {}", hash)?;
    }
    if let Some(mint) = result.mint() {
        writeln!(out, "  mint:            {}", mint)?;
    }
    if let Some(address) = result.contract_address() {
        writeln!(out, "  contractAddress: {}", address)?;
    }
    if let Some(metadata) = result.metadata() {
        writeln!(out, "  metadata:        {}", serde_json::to_string(metadata)?)?;
    }

    Ok(())
}

/// Log the active mode and endpoints so operators can see where launches go.
fn log_config_status(config: &LauncherConfig) {
    let endpoints = config.endpoints();
    info!(
        test_mode = endpoints.test_mode,
        solana_rpc = %endpoints.solana_rpc,
        base_rpc = %endpoints.base_rpc,
        base_chain_id = endpoints.base_chain_id,
        "Launcher configured"
    );
    match &config.coinbase {
        Some(credentials) => info!(api_key_name = %credentials.api_key_name, "Coinbase credentials loaded"),
        None => info!("Coinbase credentials not set"),
    }
}
