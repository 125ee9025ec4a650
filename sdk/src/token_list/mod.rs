//! Token metadata lookups backed by the Panora token list.
//!
//! The whole list is fetched at once and kept in memory for a day. Lookups by
//! address or symbol are case-insensitive. See [TokenListCache] for the
//! caching rules and [COMMON_TOKENS] for the small static list used by swaps.

mod cache;
mod common;
mod models;
mod source;

pub use {cache::*, common::*, models::*, source::*};
