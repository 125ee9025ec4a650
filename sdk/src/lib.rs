//! This library contains the building blocks shared by the Aptdeck CLI and any
//! other client that wants to read Aptos accounts, assemble entry function
//! calls for DeFi protocols and submit them.

/// Conversion between human-readable decimal amounts and integer base units.
/// Every protocol builder goes through this module so that rounding behaves
/// the same everywhere.
#[cfg(feature = "units")]
pub mod units;

/// Aptos network primitives (networks, addresses, Move identifiers and
/// values) and the REST + indexer client used to read chain state.
#[cfg(feature = "aptos")]
pub mod aptos;

/// Local ed25519 accounts that sign transactions and arbitrary messages.
#[cfg(feature = "account")]
pub mod account;

/// Entry function call descriptors and the submitter that builds, signs,
/// submits and confirms them.
#[cfg(feature = "transactions")]
pub mod transactions;

/// Remote token metadata list with an in-memory, time-bounded cache.
#[cfg(feature = "token_list")]
pub mod token_list;

/// Call builders and market readers for the supported DeFi protocols.
#[cfg(feature = "protocols")]
pub mod protocols;

/// Generic secret wrapper that encrypts its value at rest when serialized.
#[cfg(feature = "secret_core")]
pub mod secret_core;

/// Mocks and fixtures shared by unit and integration tests.
#[cfg(feature = "test_utils")]
pub mod test_utils;
