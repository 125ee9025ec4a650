use {
    crate::token_list::TokenListEntry,
    async_trait::async_trait,
    reqwest::Client,
    thiserror::Error,
};

pub const PANORA_TOKEN_LIST_URL: &str =
    "https://raw.githubusercontent.com/PanoraExchange/Aptos-Tokens/refs/heads/main/token-list.json";

#[derive(Debug, Error)]
pub enum TokenListError {
    #[error("failed to fetch token list: {0}")]
    Http(#[from] reqwest::Error),
    #[error("token list request returned status {0}")]
    Status(u16),
}

/// Where a [super::TokenListCache] loads the full token list from.
#[async_trait]
pub trait TokenListSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<TokenListEntry>, TokenListError>;
}

pub struct HttpTokenListSourceBuilder {
    client: Client,
    url: String,
}

impl Default for HttpTokenListSourceBuilder {
    fn default() -> Self {
        Self {
            client: Client::new(),
            url: PANORA_TOKEN_LIST_URL.to_string(),
        }
    }
}

impl HttpTokenListSourceBuilder {
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn build(self) -> HttpTokenListSource {
        HttpTokenListSource {
            client: self.client,
            url: self.url,
        }
    }
}

/// Fetches the token list JSON array over HTTP.
pub struct HttpTokenListSource {
    client: Client,
    url: String,
}

impl Default for HttpTokenListSource {
    fn default() -> Self {
        HttpTokenListSourceBuilder::default().build()
    }
}

impl HttpTokenListSource {
    pub fn builder() -> HttpTokenListSourceBuilder {
        HttpTokenListSourceBuilder::default()
    }
}

#[async_trait]
impl TokenListSource for HttpTokenListSource {
    async fn fetch(&self) -> Result<Vec<TokenListEntry>, TokenListError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(TokenListError::Status(response.status().as_u16()));
        }

        let records: Vec<serde_json::Value> = response.json().await?;
        let total = records.len();

        let tokens = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value(record) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping malformed token list record: {e}");

                    None
                }
            })
            .collect::<Vec<TokenListEntry>>();

        log::debug!("Loaded {} of {total} token list records", tokens.len());

        Ok(tokens)
    }
}
