use {
    crate::{
        aptos::{
            AccountAddress,
            AccountInfo,
            GasEstimate,
            PendingTransaction,
            RestError,
            SimulationResult,
            SubmitTransactionRequest,
            Transaction,
            TransactionInfo,
        },
        transactions::TransactionClient,
    },
    async_trait::async_trait,
    std::{
        collections::VecDeque,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
    },
};

/// Hash every transaction submitted to [MockTransactionClient] gets.
pub const MOCK_TRANSACTION_HASH: &str =
    "0x5d2a9b7a7f2f1b8e3a0cf3b3f5a8b1c1d0e3f4a5b6c7d8e9f0a1b2c3d4e5f6a7";

/// What one `transaction_by_hash` call observes.
#[derive(Clone, Debug)]
pub enum MockPoll {
    Pending,
    NotFound,
    Committed(TransactionInfo),
}

/// In-memory [TransactionClient]. Confirmation polls are answered from a
/// script; once the script runs out every poll sees a pending transaction.
pub struct MockTransactionClient {
    pub sequence_number: u64,
    pub gas_unit_price: u64,
    polls: Mutex<VecDeque<MockPoll>>,
    simulation: Option<SimulationResult>,
    reject_submission: Option<String>,
    reject_encoding: Option<u16>,
    submitted: Mutex<Vec<SubmitTransactionRequest>>,
    poll_count: AtomicUsize,
}

impl Default for MockTransactionClient {
    fn default() -> Self {
        Self {
            sequence_number: 3,
            gas_unit_price: 100,
            polls: Mutex::new(VecDeque::new()),
            simulation: None,
            reject_submission: None,
            reject_encoding: None,
            submitted: Mutex::new(vec![]),
            poll_count: AtomicUsize::new(0),
        }
    }
}

impl MockTransactionClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_polls(self, polls: impl IntoIterator<Item = MockPoll>) -> Self {
        *self.polls.lock().expect("Mock lock poisoned.") = polls.into_iter().collect();
        self
    }

    pub fn with_simulation(mut self, simulation: SimulationResult) -> Self {
        self.simulation = Some(simulation);
        self
    }

    /// Make `submit_transaction` fail like the fullnode does for a bad
    /// request.
    pub fn rejecting_submissions(mut self, message: &str) -> Self {
        self.reject_submission = Some(message.to_string());
        self
    }

    /// Make `encode_submission` fail with the given HTTP status, as an
    /// unavailable fullnode would.
    pub fn rejecting_encoding(mut self, status: u16) -> Self {
        self.reject_encoding = Some(status);
        self
    }

    /// Signed requests received so far.
    pub fn submitted(&self) -> Vec<SubmitTransactionRequest> {
        self.submitted.lock().expect("Mock lock poisoned.").clone()
    }

    pub fn poll_count(&self) -> usize {
        self.poll_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransactionClient for MockTransactionClient {
    async fn account(&self, _: AccountAddress) -> Result<AccountInfo, RestError> {
        Ok(AccountInfo {
            sequence_number: self.sequence_number,
            authentication_key: "0x0".to_string(),
        })
    }

    async fn estimate_gas_price(&self) -> Result<GasEstimate, RestError> {
        Ok(GasEstimate {
            gas_estimate: self.gas_unit_price,
            deprioritized_gas_estimate: None,
            prioritized_gas_estimate: None,
        })
    }

    async fn encode_submission(&self, _: &SubmitTransactionRequest) -> Result<Vec<u8>, RestError> {
        if let Some(status) = self.reject_encoding {
            return Err(RestError::Api {
                status,
                message: "node unavailable".to_string(),
                error_code: None,
            });
        }

        Ok(b"mock signing message".to_vec())
    }

    async fn submit_transaction(
        &self,
        request: &SubmitTransactionRequest,
    ) -> Result<PendingTransaction, RestError> {
        if let Some(message) = &self.reject_submission {
            return Err(RestError::Api {
                status: 400,
                message: message.clone(),
                error_code: Some("invalid_input".to_string()),
            });
        }

        self.submitted
            .lock()
            .expect("Mock lock poisoned.")
            .push(request.clone());

        Ok(PendingTransaction {
            hash: MOCK_TRANSACTION_HASH.to_string(),
            sender: Some(request.sender),
        })
    }

    async fn simulate_transaction(
        &self,
        request: &SubmitTransactionRequest,
    ) -> Result<SimulationResult, RestError> {
        self.submitted
            .lock()
            .expect("Mock lock poisoned.")
            .push(request.clone());

        self.simulation
            .clone()
            .ok_or_else(|| RestError::Decode("no simulation scripted".to_string()))
    }

    async fn transaction_by_hash(&self, hash: &str) -> Result<Transaction, RestError> {
        self.poll_count.fetch_add(1, Ordering::SeqCst);

        let next = self.polls.lock().expect("Mock lock poisoned.").pop_front();

        match next.unwrap_or(MockPoll::Pending) {
            MockPoll::Pending => Ok(Transaction::PendingTransaction(PendingTransaction {
                hash: hash.to_string(),
                sender: None,
            })),
            MockPoll::NotFound => Err(RestError::Api {
                status: 404,
                message: format!("Transaction not found by Transaction hash({hash})"),
                error_code: Some("transaction_not_found".to_string()),
            }),
            MockPoll::Committed(info) => Ok(Transaction::UserTransaction(info)),
        }
    }
}
