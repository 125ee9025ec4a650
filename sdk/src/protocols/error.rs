use {
    crate::{aptos::RestError, token_list::TokenListError, units::UnitsError},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Units(#[from] UnitsError),
    #[error("failed to fetch market data: {0}")]
    Market(#[from] reqwest::Error),
    #[error("market data request returned status {0}")]
    MarketStatus(u16),
    #[error("pool not found for token: {0}")]
    PoolNotFound(String),
    #[error(transparent)]
    Rest(#[from] RestError),
    #[error(transparent)]
    TokenList(#[from] TokenListError),
}
