use {
    crate::{
        account::LocalAccount,
        aptos::{RestError, SimulationResult, SubmitTransactionRequest, Transaction, TransactionSignature},
        transactions::{EntryFunctionCall, TransactionClient},
    },
    serde::{Deserialize, Serialize},
    std::time::Duration,
    thiserror::Error,
};

/// Upper bound on gas units a transaction may consume.
pub const DEFAULT_MAX_GAS_AMOUNT: u64 = 200_000;
/// How long a submitted transaction stays valid.
pub const DEFAULT_EXPIRATION: Duration = Duration::from_secs(60);
/// Delay between two confirmation checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
/// How long to wait for a confirmation before giving up.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("failed to submit transaction: {0}")]
    Submission(#[from] RestError),
    #[error("transaction {hash} failed on chain: {vm_status}")]
    ExecutionFailed { hash: String, vm_status: String },
    #[error("transaction {hash} was not confirmed within {timeout:?}")]
    Timeout { hash: String, timeout: Duration },
    #[error("failed to sign transaction: {0}")]
    Signing(String),
}

/// Final state of a committed transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutcome {
    pub hash: String,
    pub success: bool,
    pub vm_status: Option<String>,
    pub version: u64,
    pub gas_used: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitOptions {
    pub max_gas_amount: u64,
    pub expiration: Duration,
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
            expiration: DEFAULT_EXPIRATION,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }
}

/// Builds, signs, submits and confirms entry function calls on behalf of one
/// account. Every step is attempted once.
pub struct TransactionSubmitter<'a, C: TransactionClient> {
    client: &'a C,
    account: &'a LocalAccount,
    options: SubmitOptions,
}

impl<'a, C: TransactionClient> TransactionSubmitter<'a, C> {
    pub fn new(client: &'a C, account: &'a LocalAccount) -> Self {
        Self {
            client,
            account,
            options: SubmitOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SubmitOptions) -> Self {
        self.options = options;
        self
    }

    /// Sign and submit `call`, returning the transaction hash as soon as the
    /// node accepted it.
    pub async fn submit(&self, call: &EntryFunctionCall) -> Result<String, TransactionError> {
        let request = self.build(call).await?;

        let signing_message = self.client.encode_submission(&request).await?;

        if signing_message.is_empty() {
            return Err(TransactionError::Signing(
                "fullnode returned an empty signing message".to_string(),
            ));
        }

        let signature = self.account.sign(&signing_message);
        let request = request.with_signature(TransactionSignature::Ed25519Signature {
            public_key: self.account.public_key_hex(),
            signature: format!("0x{}", hex::encode(signature)),
        });

        let pending = self.client.submit_transaction(&request).await?;

        log::debug!("Submitted {call} as {}", pending.hash);

        Ok(pending.hash)
    }

    /// Poll `hash` until it leaves the pending state.
    pub async fn wait(&self, hash: &str) -> Result<TransactionOutcome, TransactionError> {
        let started = tokio::time::Instant::now();

        loop {
            match self.client.transaction_by_hash(hash).await {
                Ok(Transaction::UserTransaction(info)) => {
                    return Ok(TransactionOutcome {
                        hash: info.hash,
                        success: info.success,
                        vm_status: Some(info.vm_status).filter(|s| !s.is_empty()),
                        version: info.version,
                        gas_used: info.gas_used,
                    });
                }
                Ok(Transaction::PendingTransaction(_)) => (),
                // Freshly submitted transactions can briefly be unknown to the
                // node that is being polled.
                Err(e) if e.is_not_found() => (),
                Ok(Transaction::Other) => {
                    return Err(TransactionError::Submission(RestError::Decode(format!(
                        "{hash} is not a user transaction"
                    ))));
                }
                Err(e) => return Err(e.into()),
            }

            if started.elapsed() >= self.options.timeout {
                return Err(TransactionError::Timeout {
                    hash: hash.to_string(),
                    timeout: self.options.timeout,
                });
            }

            log::trace!("{hash} still pending");

            tokio::time::sleep(self.options.poll_interval).await;
        }
    }

    /// [Self::submit] then [Self::wait]. A committed transaction that aborted
    /// is reported as [TransactionError::ExecutionFailed].
    pub async fn execute(
        &self,
        call: &EntryFunctionCall,
    ) -> Result<TransactionOutcome, TransactionError> {
        let hash = self.submit(call).await?;
        let outcome = self.wait(&hash).await?;

        if !outcome.success {
            return Err(TransactionError::ExecutionFailed {
                hash: outcome.hash,
                vm_status: outcome.vm_status.unwrap_or_default(),
            });
        }

        Ok(outcome)
    }

    /// Dry-run `call` to learn its gas usage and whether it would succeed.
    pub async fn simulate(
        &self,
        call: &EntryFunctionCall,
    ) -> Result<SimulationResult, TransactionError> {
        let request = self.build(call).await?;

        // The node refuses to simulate transactions that carry a valid
        // signature.
        let request = request.with_signature(TransactionSignature::Ed25519Signature {
            public_key: self.account.public_key_hex(),
            signature: format!("0x{}", "00".repeat(64)),
        });

        Ok(self.client.simulate_transaction(&request).await?)
    }

    async fn build(
        &self,
        call: &EntryFunctionCall,
    ) -> Result<SubmitTransactionRequest, TransactionError> {
        let sender = self.account.address();
        let account = self.client.account(sender).await?;
        let gas = self.client.estimate_gas_price().await?;
        let expiration = chrono::Utc::now().timestamp() as u64 + self.options.expiration.as_secs();

        Ok(SubmitTransactionRequest {
            sender,
            sequence_number: account.sequence_number,
            max_gas_amount: self.options.max_gas_amount,
            gas_unit_price: gas.gas_estimate,
            expiration_timestamp_secs: expiration,
            payload: call.payload(),
            signature: None,
        })
    }
}
