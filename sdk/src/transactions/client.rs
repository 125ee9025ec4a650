use {
    crate::aptos::{
        AccountAddress,
        AccountInfo,
        AptosClient,
        GasEstimate,
        PendingTransaction,
        RestError,
        SimulationResult,
        SubmitTransactionRequest,
        Transaction,
    },
    async_trait::async_trait,
};

/// The part of the fullnode API the [super::TransactionSubmitter] needs.
/// Implemented by [AptosClient] and by the mock in `test_utils`.
#[async_trait]
pub trait TransactionClient: Send + Sync {
    async fn account(&self, address: AccountAddress) -> Result<AccountInfo, RestError>;

    async fn estimate_gas_price(&self) -> Result<GasEstimate, RestError>;

    async fn encode_submission(
        &self,
        request: &SubmitTransactionRequest,
    ) -> Result<Vec<u8>, RestError>;

    async fn submit_transaction(
        &self,
        request: &SubmitTransactionRequest,
    ) -> Result<PendingTransaction, RestError>;

    async fn simulate_transaction(
        &self,
        request: &SubmitTransactionRequest,
    ) -> Result<SimulationResult, RestError>;

    async fn transaction_by_hash(&self, hash: &str) -> Result<Transaction, RestError>;
}

#[async_trait]
impl TransactionClient for AptosClient {
    async fn account(&self, address: AccountAddress) -> Result<AccountInfo, RestError> {
        AptosClient::account(self, address).await
    }

    async fn estimate_gas_price(&self) -> Result<GasEstimate, RestError> {
        AptosClient::estimate_gas_price(self).await
    }

    async fn encode_submission(
        &self,
        request: &SubmitTransactionRequest,
    ) -> Result<Vec<u8>, RestError> {
        AptosClient::encode_submission(self, request).await
    }

    async fn submit_transaction(
        &self,
        request: &SubmitTransactionRequest,
    ) -> Result<PendingTransaction, RestError> {
        AptosClient::submit_transaction(self, request).await
    }

    async fn simulate_transaction(
        &self,
        request: &SubmitTransactionRequest,
    ) -> Result<SimulationResult, RestError> {
        AptosClient::simulate_transaction(self, request).await
    }

    async fn transaction_by_hash(&self, hash: &str) -> Result<Transaction, RestError> {
        AptosClient::transaction_by_hash(self, hash).await
    }
}
