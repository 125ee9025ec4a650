//! Aptos integration.
//!
//! This module provides:
//! - [Network] and its public endpoints
//! - [AccountAddress], [MoveFunctionId], [MoveType] and [MoveValue]
//! - [AptosClient] for the fullnode REST API and the indexer GraphQL API

mod client;
mod error;
mod models;
mod network;
pub mod serde_parsers;
mod types;

// Re-exports
pub use {client::*, error::*, models::*, network::*, types::*};
