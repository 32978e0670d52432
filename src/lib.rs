//! Token Launch MCP Server
//!
//! A Model Context Protocol (MCP) server that launches tokens on Solana
//! (bonding-curve creation with an initial buy) and Base (ERC-20 deployment)
//! behind a small set of validated, schema-described tools.

pub mod base;
pub mod config;
pub mod error;
pub mod handlers;
pub mod launcher;
pub mod rpc;
pub mod server;
pub mod solana;
pub mod token;
pub mod tools;
pub mod validation;

pub use launcher::TokenLauncher;
pub use server::TokenLaunchMcpHandler;
pub use token::{Network, TokenLaunchConfig, TokenLaunchResult};
