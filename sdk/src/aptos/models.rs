//! Request and response shapes of the fullnode REST API and the indexer, plus
//! the read models handed to callers.

use {
    crate::{
        aptos::{serde_parsers::*, AccountAddress, MoveFunctionId, MoveType, MoveValue},
        units::{from_base_units, BigDecimal},
    },
    serde::{Deserialize, Serialize},
};

// == Fullnode ==

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerInfo {
    pub chain_id: u8,
    #[serde(
        deserialize_with = "deserialize_aptos_u64",
        serialize_with = "serialize_aptos_u64"
    )]
    pub ledger_version: u64,
    #[serde(
        deserialize_with = "deserialize_aptos_u64",
        serialize_with = "serialize_aptos_u64"
    )]
    pub block_height: u64,
    #[serde(
        deserialize_with = "deserialize_micros_to_datetime",
        serialize_with = "serialize_datetime_to_micros"
    )]
    pub ledger_timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error body returned by the fullnode for any non-2xx response.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AptosErrorBody {
    pub message: String,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub vm_error_code: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(
        deserialize_with = "deserialize_aptos_u64",
        serialize_with = "serialize_aptos_u64"
    )]
    pub sequence_number: u64,
    pub authentication_key: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Resource<T> {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub data: T,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GasEstimate {
    pub gas_estimate: u64,
    #[serde(default)]
    pub deprioritized_gas_estimate: Option<u64>,
    #[serde(default)]
    pub prioritized_gas_estimate: Option<u64>,
}

/// `0x1::stake::StakePool`, only the parts we read.
#[derive(Clone, Debug, Deserialize)]
pub struct StakePoolResource {
    pub active: CoinValue,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CoinValue {
    #[serde(deserialize_with = "deserialize_aptos_u64")]
    pub value: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntryFunctionPayload {
    pub function: MoveFunctionId,
    pub type_arguments: Vec<MoveType>,
    pub arguments: Vec<MoveValue>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionPayload {
    EntryFunctionPayload(EntryFunctionPayload),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionSignature {
    Ed25519Signature {
        public_key: String,
        signature: String,
    },
}

/// Body of `/transactions`, `/transactions/simulate` and, without the
/// signature, `/transactions/encode_submission`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmitTransactionRequest {
    pub sender: AccountAddress,
    #[serde(serialize_with = "serialize_aptos_u64")]
    pub sequence_number: u64,
    #[serde(serialize_with = "serialize_aptos_u64")]
    pub max_gas_amount: u64,
    #[serde(serialize_with = "serialize_aptos_u64")]
    pub gas_unit_price: u64,
    #[serde(serialize_with = "serialize_aptos_u64")]
    pub expiration_timestamp_secs: u64,
    pub payload: TransactionPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<TransactionSignature>,
}

impl SubmitTransactionRequest {
    pub fn with_signature(mut self, signature: TransactionSignature) -> Self {
        self.signature = Some(signature);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub hash: String,
    #[serde(default)]
    pub sender: Option<AccountAddress>,
}

/// Payload as echoed back by the fullnode. Only entry function payloads carry
/// a function.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadInfo {
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub type_arguments: Vec<String>,
    #[serde(default)]
    pub arguments: Vec<serde_json::Value>,
}

/// A committed (or simulated) user transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInfo {
    pub hash: String,
    #[serde(
        default,
        deserialize_with = "deserialize_aptos_u64",
        serialize_with = "serialize_aptos_u64"
    )]
    pub version: u64,
    pub success: bool,
    #[serde(default)]
    pub vm_status: String,
    #[serde(
        default,
        deserialize_with = "deserialize_aptos_u64",
        serialize_with = "serialize_aptos_u64"
    )]
    pub gas_used: u64,
    /// Microseconds since the epoch.
    #[serde(
        default,
        deserialize_with = "deserialize_aptos_u64",
        serialize_with = "serialize_aptos_u64"
    )]
    pub timestamp: u64,
    #[serde(default)]
    pub sender: Option<AccountAddress>,
    #[serde(default)]
    pub payload: Option<PayloadInfo>,
}

impl TransactionInfo {
    pub fn timestamp(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        i64::try_from(self.timestamp)
            .ok()
            .and_then(chrono::DateTime::from_timestamp_micros)
    }

    pub fn function(&self) -> Option<&str> {
        self.payload.as_ref().and_then(|p| p.function.as_deref())
    }
}

/// Anything `/transactions/by_hash` or `/accounts/{a}/transactions` returns.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transaction {
    PendingTransaction(PendingTransaction),
    UserTransaction(TransactionInfo),
    #[serde(other)]
    Other,
}

impl Transaction {
    pub fn is_pending(&self) -> bool {
        matches!(self, Transaction::PendingTransaction(_))
    }
}

/// Outcome of `/transactions/simulate`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub gas_used: u64,
    pub gas_unit_price: u64,
    pub success: bool,
    pub vm_status: String,
}

// == Indexer ==

#[derive(Clone, Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Metadata of a fungible asset (or a coin paired with one).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FungibleAssetMetadata {
    pub asset_type: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(default)]
    pub icon_uri: Option<String>,
    #[serde(default)]
    pub project_uri: Option<String>,
    #[serde(default)]
    pub creator_address: Option<String>,
    #[serde(default)]
    pub token_standard: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct BalanceMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct FungibleBalanceRow {
    pub asset_type: String,
    #[serde(deserialize_with = "deserialize_aptos_u128")]
    pub amount: u128,
    #[serde(default)]
    pub metadata: Option<BalanceMetadata>,
}

/// Balance of one asset held by an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinBalance {
    pub asset_type: String,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub decimals: u8,
    #[serde(
        deserialize_with = "deserialize_aptos_u128",
        serialize_with = "serialize_aptos_u128"
    )]
    pub amount: u128,
}

impl CoinBalance {
    /// Decimals assumed when the indexer has no metadata for the asset.
    pub const DEFAULT_DECIMALS: u8 = 8;

    pub fn human_amount(&self) -> BigDecimal {
        from_base_units(self.amount, self.decimals)
    }
}

impl CoinBalance {
    pub(crate) fn from_row(row: FungibleBalanceRow) -> Self {
        let metadata = row.metadata.unwrap_or(BalanceMetadata {
            name: None,
            symbol: None,
            decimals: None,
        });

        Self {
            asset_type: row.asset_type,
            symbol: metadata.symbol,
            name: metadata.name,
            decimals: metadata.decimals.unwrap_or(Self::DEFAULT_DECIMALS),
            amount: row.amount,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct CollectionRow {
    #[serde(default)]
    pub collection_name: Option<String>,
    #[serde(default)]
    pub creator_address: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct TokenDataRow {
    pub token_data_id: String,
    #[serde(default)]
    pub token_name: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub collection_id: Option<String>,
    #[serde(default)]
    pub token_standard: Option<String>,
    #[serde(default)]
    pub token_properties: Option<serde_json::Value>,
    #[serde(default)]
    pub current_collection: Option<CollectionRow>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct TokenOwnershipRow {
    #[serde(default, deserialize_with = "deserialize_aptos_u128")]
    pub amount: u128,
    #[serde(default)]
    pub current_token_data: Option<TokenDataRow>,
}

const UNKNOWN: &str = "Unknown";

/// An NFT held by an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftInfo {
    pub token_data_id: String,
    pub name: String,
    pub collection_name: String,
    pub token_uri: String,
    pub amount: u128,
}

impl NftInfo {
    /// Ownership rows whose token data was burned have nothing to show.
    pub(crate) fn from_row(row: TokenOwnershipRow) -> Option<Self> {
        let data = row.current_token_data?;
        let collection_name = data
            .current_collection
            .and_then(|c| c.collection_name)
            .unwrap_or_else(|| UNKNOWN.to_string());

        Some(Self {
            token_data_id: data.token_data_id,
            name: data.token_name.unwrap_or_else(|| UNKNOWN.to_string()),
            collection_name,
            token_uri: data.token_uri.unwrap_or_default(),
            amount: row.amount,
        })
    }
}

/// Details of a single NFT.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenData {
    pub token_data_id: String,
    pub name: String,
    pub description: String,
    pub token_uri: String,
    pub collection_id: Option<String>,
    pub collection_name: Option<String>,
    pub creator_address: Option<String>,
    pub token_standard: Option<String>,
    pub token_properties: serde_json::Value,
}

impl TokenData {
    pub(crate) fn from_row(row: TokenDataRow) -> Self {
        let (collection_name, creator_address) = match row.current_collection {
            Some(c) => (c.collection_name, c.creator_address),
            None => (None, None),
        };

        Self {
            token_data_id: row.token_data_id,
            name: row.token_name.unwrap_or_else(|| UNKNOWN.to_string()),
            description: row.description.unwrap_or_default(),
            token_uri: row.token_uri.unwrap_or_default(),
            collection_id: row.collection_id,
            collection_name,
            creator_address,
            token_standard: row.token_standard,
            token_properties: row.token_properties.unwrap_or(serde_json::Value::Null),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct AnsNameRow {
    pub domain: String,
    #[serde(default)]
    pub subdomain: Option<String>,
    #[serde(default)]
    pub owner_address: Option<String>,
}

impl AnsNameRow {
    /// `sub.domain.apt` or `domain.apt`.
    pub(crate) fn full_name(&self) -> String {
        match self.subdomain.as_deref() {
            Some(subdomain) if !subdomain.is_empty() => {
                format!("{subdomain}.{}.apt", self.domain)
            }
            _ => format!("{}.apt", self.domain),
        }
    }
}

// == Derived read models ==

/// Amount of APT delegated through the account's own stake pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingInfo {
    pub staked_octas: u64,
}

impl StakingInfo {
    pub fn staked_apt(&self) -> BigDecimal {
        from_base_units(self.staked_octas as u128, crate::units::APT_DECIMALS)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn test_transaction_variants() {
        let pending: Transaction = serde_json::from_value(json!({
            "type": "pending_transaction",
            "hash": "0xabc",
            "sender": "0x1",
            "sequence_number": "3"
        }))
        .unwrap();

        assert!(pending.is_pending());

        let user: Transaction = serde_json::from_value(json!({
            "type": "user_transaction",
            "hash": "0xabc",
            "version": "42",
            "success": false,
            "vm_status": "Move abort in 0x1::coin: EINSUFFICIENT_BALANCE(0x10006)",
            "gas_used": "12",
            "timestamp": "1700000000000000",
            "payload": {
                "type": "entry_function_payload",
                "function": "0x1::aptos_account::transfer",
                "type_arguments": [],
                "arguments": ["0x2", "100"]
            }
        }))
        .unwrap();

        let Transaction::UserTransaction(info) = user else {
            panic!("Expected a user transaction");
        };

        assert_eq!(info.version, 42);
        assert!(!info.success);
        assert_eq!(info.gas_used, 12);
        assert_eq!(info.function(), Some("0x1::aptos_account::transfer"));
        assert_eq!(info.timestamp().unwrap().timestamp(), 1_700_000_000);

        let other: Transaction = serde_json::from_value(json!({
            "type": "block_metadata_transaction",
            "hash": "0xdef"
        }))
        .unwrap();

        assert_eq!(other, Transaction::Other);
    }

    #[test]
    fn test_submit_request_shape() {
        let request = SubmitTransactionRequest {
            sender: AccountAddress::ONE,
            sequence_number: 7,
            max_gas_amount: 200_000,
            gas_unit_price: 100,
            expiration_timestamp_secs: 1_700_000_060,
            payload: TransactionPayload::EntryFunctionPayload(EntryFunctionPayload {
                function: "0x1::coin::transfer".parse().unwrap(),
                type_arguments: vec![MoveType::aptos_coin()],
                arguments: vec![AccountAddress::ONE.into(), 5u64.into()],
            }),
            signature: None,
        };

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["sequence_number"], json!("7"));
        assert_eq!(value["max_gas_amount"], json!("200000"));
        assert_eq!(value["payload"]["type"], json!("entry_function_payload"));
        assert_eq!(value["payload"]["function"], json!("0x1::coin::transfer"));
        assert_eq!(
            value["payload"]["type_arguments"],
            json!(["0x1::aptos_coin::AptosCoin"])
        );
        assert_eq!(value["payload"]["arguments"][1], json!("5"));
        assert!(value.get("signature").is_none());

        let signed = request.with_signature(TransactionSignature::Ed25519Signature {
            public_key: "0xaa".into(),
            signature: "0xbb".into(),
        });
        let value = serde_json::to_value(&signed).unwrap();

        assert_eq!(
            value["signature"],
            json!({"type": "ed25519_signature", "public_key": "0xaa", "signature": "0xbb"})
        );
    }

    #[test]
    fn test_balance_row_defaults() {
        let row: FungibleBalanceRow = serde_json::from_value(json!({
            "asset_type": "0x1::aptos_coin::AptosCoin",
            "amount": 150000000,
            "metadata": {"name": "Aptos Coin", "symbol": "APT", "decimals": 8}
        }))
        .unwrap();
        let balance = CoinBalance::from_row(row);

        assert_eq!(balance.symbol.as_deref(), Some("APT"));
        assert_eq!(balance.human_amount(), "1.5".parse::<BigDecimal>().unwrap());

        let bare: FungibleBalanceRow = serde_json::from_value(json!({
            "asset_type": "0xa",
            "amount": "5"
        }))
        .unwrap();

        assert_eq!(CoinBalance::from_row(bare).decimals, CoinBalance::DEFAULT_DECIMALS);
    }

    #[test]
    fn test_ans_full_name() {
        let row = AnsNameRow {
            domain: "kent".into(),
            subdomain: None,
            owner_address: None,
        };

        assert_eq!(row.full_name(), "kent.apt");

        let sub = AnsNameRow {
            subdomain: Some("pay".into()),
            ..row
        };

        assert_eq!(sub.full_name(), "pay.kent.apt");
    }
}
