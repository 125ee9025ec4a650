#![cfg(all(feature = "transactions", feature = "test_utils"))]

use {
    aptdeck_sdk::{
        aptos::{AccountAddress, RestError, SimulationResult, TransactionPayload, TransactionSignature},
        test_utils::{
            fixtures::{committed_transaction, test_account},
            mock_client::{MockPoll, MockTransactionClient, MOCK_TRANSACTION_HASH},
        },
        transactions::{
            transfer::transfer_apt,
            SubmitOptions,
            TransactionError,
            TransactionSubmitter,
            DEFAULT_MAX_GAS_AMOUNT,
        },
    },
    assert_matches::assert_matches,
    std::time::Duration,
};

#[tokio::test(start_paused = true)]
async fn test_execute_signs_and_confirms() {
    let client = MockTransactionClient::new().with_polls([
        MockPoll::NotFound,
        MockPoll::Pending,
        MockPoll::Committed(committed_transaction(
            MOCK_TRANSACTION_HASH,
            true,
            "Executed successfully",
        )),
    ]);
    let account = test_account();
    let submitter = TransactionSubmitter::new(&client, &account);

    let outcome = submitter
        .execute(&transfer_apt(AccountAddress::ONE, 150_000_000))
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.hash, MOCK_TRANSACTION_HASH);
    assert_eq!(outcome.version, 42);
    assert_eq!(outcome.vm_status.as_deref(), Some("Executed successfully"));
    assert_eq!(client.poll_count(), 3);

    let submitted = client.submitted();

    assert_eq!(submitted.len(), 1);

    let request = &submitted[0];

    assert_eq!(request.sender, account.address());
    assert_eq!(request.sequence_number, client.sequence_number);
    assert_eq!(request.gas_unit_price, client.gas_unit_price);
    assert_eq!(request.max_gas_amount, DEFAULT_MAX_GAS_AMOUNT);

    let TransactionPayload::EntryFunctionPayload(payload) = &request.payload;

    assert_eq!(payload.function.to_string(), "0x1::aptos_account::transfer");

    // Signature must verify against the signing message the node returned.
    let Some(TransactionSignature::Ed25519Signature {
        public_key,
        signature,
    }) = &request.signature
    else {
        panic!("submitted transaction is not signed");
    };

    assert_eq!(public_key, &account.public_key_hex());
    assert_eq!(
        signature,
        &format!("0x{}", hex::encode(account.sign(b"mock signing message")))
    );
}

#[tokio::test(start_paused = true)]
async fn test_execute_reports_aborted_transaction() {
    let client = MockTransactionClient::new().with_polls([MockPoll::Committed(
        committed_transaction(MOCK_TRANSACTION_HASH, false, "Move abort: EINSUFFICIENT_BALANCE"),
    )]);
    let account = test_account();
    let submitter = TransactionSubmitter::new(&client, &account);

    let result = submitter
        .execute(&transfer_apt(AccountAddress::ONE, 1))
        .await;

    assert_matches!(
        result,
        Err(TransactionError::ExecutionFailed { hash, vm_status })
            if hash == MOCK_TRANSACTION_HASH && vm_status.contains("EINSUFFICIENT_BALANCE")
    );
}

#[tokio::test(start_paused = true)]
async fn test_wait_times_out() {
    let client = MockTransactionClient::new();
    let account = test_account();
    let options = SubmitOptions {
        timeout: Duration::from_secs(5),
        poll_interval: Duration::from_secs(1),
        ..Default::default()
    };
    let submitter = TransactionSubmitter::new(&client, &account).with_options(options);

    let result = submitter.wait(MOCK_TRANSACTION_HASH).await;

    assert_matches!(
        result,
        Err(TransactionError::Timeout { hash, timeout })
            if hash == MOCK_TRANSACTION_HASH && timeout == Duration::from_secs(5)
    );
    // Polls at t = 0, 1, 2, 3, 4 and 5.
    assert_eq!(client.poll_count(), 6);
}

#[tokio::test]
async fn test_rejected_submission_is_not_retried() {
    let client = MockTransactionClient::new().rejecting_submissions("SEQUENCE_NUMBER_TOO_OLD");
    let account = test_account();
    let submitter = TransactionSubmitter::new(&client, &account);

    let result = submitter
        .submit(&transfer_apt(AccountAddress::ONE, 1))
        .await;

    assert_matches!(
        result,
        Err(TransactionError::Submission(error)) if error.to_string().contains("SEQUENCE_NUMBER_TOO_OLD")
    );
    assert!(client.submitted().is_empty());
    assert_eq!(client.poll_count(), 0);
}

#[tokio::test]
async fn test_unavailable_node_while_encoding_is_a_submission_error() {
    let client = MockTransactionClient::new().rejecting_encoding(503);
    let account = test_account();
    let submitter = TransactionSubmitter::new(&client, &account);

    let result = submitter
        .execute(&transfer_apt(AccountAddress::ONE, 1))
        .await;

    assert_matches!(
        result,
        Err(TransactionError::Submission(RestError::Api { status: 503, .. }))
    );
    assert!(client.submitted().is_empty());
    assert_eq!(client.poll_count(), 0);
}

#[tokio::test]
async fn test_simulate_uses_zero_signature() {
    let client = MockTransactionClient::new().with_simulation(SimulationResult {
        gas_used: 9,
        gas_unit_price: 100,
        success: true,
        vm_status: "Executed successfully".to_string(),
    });
    let account = test_account();
    let submitter = TransactionSubmitter::new(&client, &account);

    let simulation = submitter
        .simulate(&transfer_apt(AccountAddress::ONE, 1))
        .await
        .unwrap();

    assert_eq!(simulation.gas_used, 9);
    assert!(simulation.success);

    let submitted = client.submitted();

    assert_matches!(
        &submitted[0].signature,
        Some(TransactionSignature::Ed25519Signature { signature, .. })
            if signature == &format!("0x{}", "00".repeat(64))
    );
}
