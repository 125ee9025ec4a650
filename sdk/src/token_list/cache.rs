use {
    crate::token_list::{HttpTokenListSource, TokenListEntry, TokenListError, TokenListSource},
    std::{sync::Arc, time::Duration},
    tokio::{sync::Mutex, time::Instant},
};

/// How long a fetched token list is served before it is fetched again.
pub const TOKEN_LIST_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct Snapshot {
    tokens: Arc<Vec<TokenListEntry>>,
    fetched_at: Instant,
}

/// In-memory cache of the full token list.
///
/// The list is fetched on first use and again once it is older than
/// [TOKEN_LIST_TTL]. The lock is held for the duration of a fetch so that
/// concurrent lookups wait for one shared request. Failed fetches are never
/// stored, the next lookup tries again.
pub struct TokenListCache<S = HttpTokenListSource> {
    source: S,
    ttl: Duration,
    snapshot: Mutex<Option<Snapshot>>,
}

impl Default for TokenListCache {
    fn default() -> Self {
        Self::new(HttpTokenListSource::default())
    }
}

impl<S: TokenListSource> TokenListCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            ttl: TOKEN_LIST_TTL,
            snapshot: Mutex::new(None),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// The cached list, refreshed first when missing or stale.
    pub async fn tokens(&self) -> Result<Arc<Vec<TokenListEntry>>, TokenListError> {
        let mut snapshot = self.snapshot.lock().await;

        if let Some(current) = snapshot.as_ref() {
            if current.fetched_at.elapsed() <= self.ttl {
                return Ok(Arc::clone(&current.tokens));
            }
        }

        log::debug!("Fetching token list");

        let tokens = Arc::new(self.source.fetch().await?);

        *snapshot = Some(Snapshot {
            tokens: Arc::clone(&tokens),
            fetched_at: Instant::now(),
        });

        Ok(tokens)
    }

    /// Find a token by coin type or fungible asset address.
    pub async fn lookup_by_address(&self, address: &str) -> Option<TokenListEntry> {
        self.find(|token| token.matches_address(address)).await
    }

    pub async fn lookup_by_symbol(&self, symbol: &str) -> Option<TokenListEntry> {
        self.find(|token| token.matches_symbol(symbol)).await
    }

    pub async fn logo_url(&self, address: &str) -> Option<String> {
        self.lookup_by_address(address)
            .await
            .and_then(|token| token.logo_url)
    }

    async fn find(&self, predicate: impl Fn(&TokenListEntry) -> bool) -> Option<TokenListEntry> {
        match self.tokens().await {
            Ok(tokens) => tokens.iter().find(|token| predicate(token)).cloned(),
            Err(e) => {
                log::warn!("Token list unavailable: {e}");

                None
            }
        }
    }
}
