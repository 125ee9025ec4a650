use {
    crate::aptos::{models::*, AccountAddress, MoveFunctionId, MoveType, MoveValue, Network, RestError},
    reqwest::{Client, Response},
    serde::{de::DeserializeOwned, Deserialize},
    serde_json::json,
};

/// Number of transactions fetched for the account history by default.
pub const DEFAULT_TX_LIMIT: u16 = 20;

/// Resource holding the validator stake of an account.
pub const STAKE_POOL_RESOURCE: &str = "0x1::stake::StakePool";

/// Builder for [AptosClient] configuration.
pub struct AptosClientBuilder {
    client: Client,
    network: Network,
    fullnode_url: Option<String>,
    indexer_url: Option<String>,
}

impl Default for AptosClientBuilder {
    /// Creates a builder pointing at testnet with a fresh HTTP client.
    fn default() -> Self {
        Self {
            client: Client::new(),
            network: Network::default(),
            fullnode_url: None,
            indexer_url: None,
        }
    }
}

impl AptosClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Set the network whose public endpoints are used unless overridden.
    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Set a custom fullnode REST URL, e.g. a private node.
    pub fn with_fullnode_url(mut self, url: &str) -> Self {
        self.fullnode_url = Some(url.trim_end_matches('/').to_string());
        self
    }

    /// Set a custom indexer GraphQL URL.
    pub fn with_indexer_url(mut self, url: &str) -> Self {
        self.indexer_url = Some(url.to_string());
        self
    }

    pub fn build(self) -> AptosClient {
        AptosClient {
            client: self.client,
            network: self.network,
            fullnode_url: self
                .fullnode_url
                .unwrap_or_else(|| self.network.fullnode_url()),
            indexer_url: self
                .indexer_url
                .unwrap_or_else(|| self.network.indexer_url()),
        }
    }
}

/// Client for the Aptos fullnode REST API and the indexer GraphQL API of one
/// network.
#[derive(Clone, Debug)]
pub struct AptosClient {
    client: Client,
    network: Network,
    fullnode_url: String,
    indexer_url: String,
}

impl AptosClient {
    /// Create a client for the public endpoints of `network`.
    pub fn new(network: Network) -> Self {
        AptosClientBuilder::default().with_network(network).build()
    }

    pub fn builder() -> AptosClientBuilder {
        AptosClientBuilder::default()
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn fullnode_url(&self) -> &str {
        &self.fullnode_url
    }

    // == Fullnode ==

    /// Chain id, ledger version and timestamp of the node.
    pub async fn ledger_info(&self) -> Result<LedgerInfo, RestError> {
        self.get(&format!("{}/", self.fullnode_url)).await
    }

    /// Sequence number and authentication key of `address`.
    pub async fn account(&self, address: AccountAddress) -> Result<AccountInfo, RestError> {
        self.get(&format!("{}/accounts/{address}", self.fullnode_url))
            .await
    }

    /// `false` when the account was never created on chain.
    pub async fn account_exists(&self, address: AccountAddress) -> Result<bool, RestError> {
        match self.account(address).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Balance of `asset_type` (coin type or fungible asset address) in base
    /// units.
    pub async fn balance(&self, address: AccountAddress, asset_type: &str) -> Result<u64, RestError> {
        #[derive(Deserialize)]
        #[serde(transparent)]
        struct Balance(#[serde(deserialize_with = "crate::aptos::serde_parsers::deserialize_aptos_u64")] u64);

        let balance: Balance = self
            .get(&format!(
                "{}/accounts/{address}/balance/{asset_type}",
                self.fullnode_url
            ))
            .await?;

        Ok(balance.0)
    }

    /// APT balance in octas.
    pub async fn apt_balance(&self, address: AccountAddress) -> Result<u64, RestError> {
        self.balance(address, MoveType::aptos_coin().as_str()).await
    }

    /// Read the `resource_type` resource stored under `address`.
    pub async fn account_resource<T: DeserializeOwned>(
        &self,
        address: AccountAddress,
        resource_type: &str,
    ) -> Result<Resource<T>, RestError> {
        self.get(&format!(
            "{}/accounts/{address}/resource/{resource_type}",
            self.fullnode_url
        ))
        .await
    }

    /// Most recent user transactions sent by `address`.
    pub async fn account_transactions(
        &self,
        address: AccountAddress,
        limit: u16,
    ) -> Result<Vec<TransactionInfo>, RestError> {
        let transactions: Vec<Transaction> = self
            .get(&format!(
                "{}/accounts/{address}/transactions?limit={limit}",
                self.fullnode_url
            ))
            .await?;

        Ok(transactions
            .into_iter()
            .filter_map(|tx| match tx {
                Transaction::UserTransaction(info) => Some(info),
                _ => None,
            })
            .collect())
    }

    pub async fn estimate_gas_price(&self) -> Result<GasEstimate, RestError> {
        self.get(&format!("{}/estimate_gas_price", self.fullnode_url))
            .await
    }

    /// Let the node BCS-encode the unsigned transaction and return the bytes
    /// that have to be signed.
    pub async fn encode_submission(
        &self,
        request: &SubmitTransactionRequest,
    ) -> Result<Vec<u8>, RestError> {
        let encoded: String = self
            .post(
                &format!("{}/transactions/encode_submission", self.fullnode_url),
                request,
            )
            .await?;

        hex::decode(encoded.trim_start_matches("0x")).map_err(|e| RestError::Decode(e.to_string()))
    }

    pub async fn submit_transaction(
        &self,
        request: &SubmitTransactionRequest,
    ) -> Result<PendingTransaction, RestError> {
        self.post(&format!("{}/transactions", self.fullnode_url), request)
            .await
    }

    /// Dry-run a transaction. The request must carry an invalid (all-zero)
    /// signature or the node refuses to simulate it.
    pub async fn simulate_transaction(
        &self,
        request: &SubmitTransactionRequest,
    ) -> Result<SimulationResult, RestError> {
        #[derive(Deserialize)]
        struct Simulated {
            success: bool,
            #[serde(default)]
            vm_status: String,
            #[serde(deserialize_with = "crate::aptos::serde_parsers::deserialize_aptos_u64")]
            gas_used: u64,
            #[serde(deserialize_with = "crate::aptos::serde_parsers::deserialize_aptos_u64")]
            gas_unit_price: u64,
        }

        let simulated: Vec<Simulated> = self
            .post(
                &format!("{}/transactions/simulate", self.fullnode_url),
                request,
            )
            .await?;

        let Some(first) = simulated.into_iter().next() else {
            return Err(RestError::Decode("empty simulation response".to_string()));
        };

        Ok(SimulationResult {
            gas_used: first.gas_used,
            gas_unit_price: first.gas_unit_price,
            success: first.success,
            vm_status: first.vm_status,
        })
    }

    pub async fn transaction_by_hash(&self, hash: &str) -> Result<Transaction, RestError> {
        self.get(&format!("{}/transactions/by_hash/{hash}", self.fullnode_url))
            .await
    }

    /// Call a view function and return its raw JSON results.
    pub async fn view(
        &self,
        function: &MoveFunctionId,
        type_arguments: &[MoveType],
        arguments: &[MoveValue],
    ) -> Result<Vec<serde_json::Value>, RestError> {
        let body = json!({
            "function": function,
            "type_arguments": type_arguments,
            "arguments": arguments,
        });

        self.post(&format!("{}/view", self.fullnode_url), &body)
            .await
    }

    /// Stake held in the account's own stake pool, `None` if it has none.
    pub async fn staking_info(
        &self,
        address: AccountAddress,
    ) -> Result<Option<StakingInfo>, RestError> {
        match self
            .account_resource::<StakePoolResource>(address, STAKE_POOL_RESOURCE)
            .await
        {
            Ok(resource) => Ok(Some(StakingInfo {
                staked_octas: resource.data.active.value,
            })),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    // == Indexer ==

    /// All fungible asset and coin balances of `address` with a non-zero
    /// amount.
    pub async fn fungible_balances(
        &self,
        address: AccountAddress,
    ) -> Result<Vec<CoinBalance>, RestError> {
        const QUERY: &str = r#"
            query Balances($owner: String!) {
                current_fungible_asset_balances(
                    where: { owner_address: { _eq: $owner }, amount: { _gt: "0" } }
                ) {
                    asset_type
                    amount
                    metadata { name symbol decimals }
                }
            }
        "#;

        #[derive(Deserialize)]
        struct Data {
            current_fungible_asset_balances: Vec<FungibleBalanceRow>,
        }

        let data: Data = self
            .graphql(QUERY, json!({ "owner": address.to_hex_literal() }))
            .await?;

        Ok(data
            .current_fungible_asset_balances
            .into_iter()
            .map(CoinBalance::from_row)
            .collect())
    }

    /// NFTs currently owned by `address`.
    pub async fn owned_tokens(&self, address: AccountAddress) -> Result<Vec<NftInfo>, RestError> {
        const QUERY: &str = r#"
            query OwnedTokens($owner: String!) {
                current_token_ownerships_v2(
                    where: { owner_address: { _eq: $owner }, amount: { _gt: 0 } }
                ) {
                    amount
                    current_token_data {
                        token_data_id
                        token_name
                        token_uri
                        description
                        current_collection { collection_name creator_address }
                    }
                }
            }
        "#;

        #[derive(Deserialize)]
        struct Data {
            current_token_ownerships_v2: Vec<TokenOwnershipRow>,
        }

        let data: Data = self
            .graphql(QUERY, json!({ "owner": address.to_hex_literal() }))
            .await?;

        Ok(data
            .current_token_ownerships_v2
            .into_iter()
            .filter_map(NftInfo::from_row)
            .collect())
    }

    /// Details of the NFT stored at `token_address`.
    pub async fn token_data(
        &self,
        token_address: AccountAddress,
    ) -> Result<Option<TokenData>, RestError> {
        const QUERY: &str = r#"
            query TokenData($token: String!) {
                current_token_datas_v2(where: { token_data_id: { _eq: $token } }) {
                    token_data_id
                    token_name
                    token_uri
                    description
                    collection_id
                    token_standard
                    token_properties
                    current_collection { collection_name creator_address }
                }
            }
        "#;

        #[derive(Deserialize)]
        struct Data {
            current_token_datas_v2: Vec<TokenDataRow>,
        }

        let data: Data = self
            .graphql(QUERY, json!({ "token": token_address.to_hex_literal() }))
            .await?;

        Ok(data
            .current_token_datas_v2
            .into_iter()
            .next()
            .map(TokenData::from_row))
    }

    /// Metadata of a fungible asset address or a coin type.
    pub async fn fungible_asset_metadata(
        &self,
        asset: &str,
    ) -> Result<Option<FungibleAssetMetadata>, RestError> {
        const QUERY: &str = r#"
            query Metadata($asset: String!) {
                fungible_asset_metadata(where: { asset_type: { _eq: $asset } }) {
                    asset_type
                    name
                    symbol
                    decimals
                    icon_uri
                    project_uri
                    creator_address
                    token_standard
                }
            }
        "#;

        #[derive(Deserialize)]
        struct Data {
            fungible_asset_metadata: Vec<FungibleAssetMetadata>,
        }

        // Indexer stores fungible asset addresses in the long form.
        let asset = match asset.parse::<AccountAddress>() {
            Ok(address) => address.to_hex_literal(),
            Err(_) => asset.trim().to_string(),
        };

        let data: Data = self.graphql(QUERY, json!({ "asset": asset })).await?;

        Ok(data.fungible_asset_metadata.into_iter().next())
    }

    /// Primary ANS name of `address`, e.g. `kent.apt`.
    pub async fn primary_name(&self, address: AccountAddress) -> Result<Option<String>, RestError> {
        const QUERY: &str = r#"
            query PrimaryName($address: String!) {
                current_aptos_names(
                    where: {
                        registered_address: { _eq: $address }
                        is_primary: { _eq: true }
                        is_active: { _eq: true }
                    }
                ) {
                    domain
                    subdomain
                    owner_address
                }
            }
        "#;

        #[derive(Deserialize)]
        struct Data {
            current_aptos_names: Vec<AnsNameRow>,
        }

        let data: Data = self
            .graphql(QUERY, json!({ "address": address.to_hex_literal() }))
            .await?;

        Ok(data
            .current_aptos_names
            .first()
            .map(AnsNameRow::full_name))
    }

    /// Owner of an ANS name. Accepts `kent`, `kent.apt` and `sub.kent.apt`.
    pub async fn owner_address(&self, name: &str) -> Result<Option<AccountAddress>, RestError> {
        const QUERY: &str = r#"
            query OwnerAddress($domain: String!, $subdomain: String!) {
                current_aptos_names(
                    where: {
                        domain: { _eq: $domain }
                        subdomain: { _eq: $subdomain }
                        is_active: { _eq: true }
                    }
                ) {
                    domain
                    subdomain
                    owner_address
                }
            }
        "#;

        #[derive(Deserialize)]
        struct Data {
            current_aptos_names: Vec<AnsNameRow>,
        }

        let (domain, subdomain) = split_ans_name(name);
        let data: Data = self
            .graphql(
                QUERY,
                json!({ "domain": domain, "subdomain": subdomain }),
            )
            .await?;

        let Some(owner) = data
            .current_aptos_names
            .into_iter()
            .find_map(|row| row.owner_address)
        else {
            return Ok(None);
        };

        owner
            .parse()
            .map(Some)
            .map_err(|e: anyhow::Error| RestError::Decode(e.to_string()))
    }

    // == Plumbing ==

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, RestError> {
        log::debug!("GET {url}");

        let response = self.client.get(url).send().await?;

        Self::decode(response).await
    }

    async fn post<B, T>(&self, url: &str, body: &B) -> Result<T, RestError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("POST {url}");

        let response = self.client.post(url).json(body).send().await?;

        Self::decode(response).await
    }

    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, RestError> {
        let response: GraphQlResponse<T> = self
            .post(&self.indexer_url, &GraphQlRequest { query, variables })
            .await?;

        if let Some(error) = response.errors.first() {
            return Err(RestError::GraphQl(error.message.clone()));
        }

        response
            .data
            .ok_or_else(|| RestError::GraphQl("response carried no data".to_string()))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RestError> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body = serde_json::from_slice::<AptosErrorBody>(&bytes).unwrap_or_else(|_| {
                AptosErrorBody {
                    message: String::from_utf8_lossy(&bytes).into_owned(),
                    ..Default::default()
                }
            });

            return Err(RestError::Api {
                status: status.as_u16(),
                message: body.message,
                error_code: body.error_code,
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Split an ANS name into `(domain, subdomain)`.
fn split_ans_name(name: &str) -> (String, String) {
    let name = name.trim().to_lowercase();
    let name = name.strip_suffix(".apt").unwrap_or(&name);

    match name.split_once('.') {
        Some((subdomain, domain)) => (domain.to_string(), subdomain.to_string()),
        None => (name.to_string(), String::new()),
    }
}
