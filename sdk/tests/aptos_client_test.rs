#![cfg(feature = "aptos")]

use {
    aptdeck_sdk::aptos::{
        AccountAddress,
        AptosClient,
        MoveFunctionId,
        MoveValue,
        Network,
        RestError,
        Transaction,
    },
    assert_matches::assert_matches,
    mockito::{Matcher, Server, ServerGuard},
    serde_json::json,
};

const ADDRESS: &str = "0x978c213990c4833df71548df7ce49d54c759d6b6d932de22b24d56060b7af2aa";

/// Setup a mock server serving both the fullnode and the indexer.
async fn setup_mock_server() -> (ServerGuard, AptosClient) {
    let server = Server::new_async().await;

    let client = AptosClient::builder()
        .with_network(Network::Mainnet)
        .with_fullnode_url(&server.url())
        .with_indexer_url(&format!("{}/graphql", server.url()))
        .build();

    (server, client)
}

fn address() -> AccountAddress {
    ADDRESS.parse().unwrap()
}

#[tokio::test]
async fn test_account_and_balance() {
    let (mut server, client) = setup_mock_server().await;

    let account_mock = server
        .mock("GET", format!("/accounts/{ADDRESS}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "sequence_number": "12", "authentication_key": ADDRESS }).to_string(),
        )
        .create_async()
        .await;

    let balance_mock = server
        .mock(
            "GET",
            format!("/accounts/{ADDRESS}/balance/0x1::aptos_coin::AptosCoin").as_str(),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("150000000")
        .create_async()
        .await;

    let account = client.account(address()).await.unwrap();
    let balance = client.apt_balance(address()).await.unwrap();

    assert_eq!(account.sequence_number, 12);
    assert_eq!(balance, 150_000_000);

    account_mock.assert_async().await;
    balance_mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_account_is_not_an_error_for_exists() {
    let (mut server, client) = setup_mock_server().await;

    server
        .mock("GET", format!("/accounts/{ADDRESS}").as_str())
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "message": "Account not found by Address",
                "error_code": "account_not_found",
                "vm_error_code": null
            })
            .to_string(),
        )
        .expect(2)
        .create_async()
        .await;

    assert!(!client.account_exists(address()).await.unwrap());

    let error = client.account(address()).await.unwrap_err();

    assert!(error.is_not_found());
    assert_matches!(
        error,
        RestError::Api { status: 404, error_code: Some(code), .. } if code == "account_not_found"
    );
}

#[tokio::test]
async fn test_server_errors_keep_plain_text_bodies() {
    let (mut server, client) = setup_mock_server().await;

    server
        .mock("GET", "/estimate_gas_price")
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    assert_matches!(
        client.estimate_gas_price().await,
        Err(RestError::Api { status: 503, message, .. }) if message == "upstream unavailable"
    );
}

#[tokio::test]
async fn test_account_transactions_keeps_user_transactions() {
    let (mut server, client) = setup_mock_server().await;

    let mock = server
        .mock("GET", format!("/accounts/{ADDRESS}/transactions").as_str())
        .match_query(Matcher::UrlEncoded("limit".into(), "20".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                {
                    "type": "user_transaction",
                    "hash": "0x1",
                    "version": "100",
                    "success": true,
                    "vm_status": "Executed successfully",
                    "gas_used": "7",
                    "timestamp": "1700000000000000",
                    "sender": ADDRESS,
                    "payload": {
                        "type": "entry_function_payload",
                        "function": "0x1::aptos_account::transfer",
                        "type_arguments": [],
                        "arguments": ["0x1", "100"]
                    }
                },
                { "type": "block_metadata_transaction", "hash": "0x2" }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let transactions = client
        .account_transactions(address(), aptdeck_sdk::aptos::DEFAULT_TX_LIMIT)
        .await
        .unwrap();

    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].version, 100);
    assert_eq!(transactions[0].gas_used, 7);
    assert_eq!(
        transactions[0].function(),
        Some("0x1::aptos_account::transfer")
    );
    assert_eq!(
        transactions[0].timestamp().unwrap().timestamp(),
        1_700_000_000
    );

    mock.assert_async().await;
}

#[tokio::test]
async fn test_transaction_by_hash_distinguishes_pending() {
    let (mut server, client) = setup_mock_server().await;

    server
        .mock("GET", "/transactions/by_hash/0xabc")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "type": "pending_transaction", "hash": "0xabc" }).to_string())
        .create_async()
        .await;

    let transaction = client.transaction_by_hash("0xabc").await.unwrap();

    assert!(transaction.is_pending());
    assert_matches!(transaction, Transaction::PendingTransaction(p) if p.hash == "0xabc");
}

#[tokio::test]
async fn test_view_posts_function_and_arguments() {
    let (mut server, client) = setup_mock_server().await;

    let mock = server
        .mock("POST", "/view")
        .match_body(Matcher::PartialJson(json!({
            "function": "0x1::coin::balance",
            "type_arguments": ["0x1::aptos_coin::AptosCoin"],
            "arguments": [ADDRESS]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!(["42"]).to_string())
        .create_async()
        .await;

    let function = "0x1::coin::balance".parse::<MoveFunctionId>().unwrap();
    let result = client
        .view(
            &function,
            &["0x1::aptos_coin::AptosCoin".parse().unwrap()],
            &[MoveValue::Address(address())],
        )
        .await
        .unwrap();

    assert_eq!(result, vec![json!("42")]);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_staking_info() {
    let (mut server, client) = setup_mock_server().await;

    server
        .mock(
            "GET",
            format!("/accounts/{ADDRESS}/resource/0x1::stake::StakePool").as_str(),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "type": "0x1::stake::StakePool",
                "data": { "active": { "value": "250000000" } }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let staking = client.staking_info(address()).await.unwrap().unwrap();

    assert_eq!(staking.staked_octas, 250_000_000);
}

#[tokio::test]
async fn test_fungible_balances_from_indexer() {
    let (mut server, client) = setup_mock_server().await;

    let mock = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({
            "variables": { "owner": ADDRESS }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": {
                    "current_fungible_asset_balances": [
                        {
                            "asset_type": "0x1::aptos_coin::AptosCoin",
                            "amount": 123450000,
                            "metadata": { "name": "Aptos Coin", "symbol": "APT", "decimals": 8 }
                        },
                        {
                            "asset_type": "0xa",
                            "amount": "5",
                            "metadata": null
                        }
                    ]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let balances = client.fungible_balances(address()).await.unwrap();

    assert_eq!(balances.len(), 2);
    assert_eq!(balances[0].symbol.as_deref(), Some("APT"));
    assert_eq!(balances[0].amount, 123_450_000);
    assert_eq!(balances[1].decimals, 8);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_owned_tokens_skip_burned_tokens() {
    let (mut server, client) = setup_mock_server().await;

    server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": {
                    "current_token_ownerships_v2": [
                        {
                            "amount": 1,
                            "current_token_data": {
                                "token_data_id": "0xbeef",
                                "token_name": "Aptos Monkey #1",
                                "token_uri": "https://example.com/1.json",
                                "current_collection": { "collection_name": "Aptos Monkeys" }
                            }
                        },
                        { "amount": 1, "current_token_data": null }
                    ]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let tokens = client.owned_tokens(address()).await.unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].collection_name, "Aptos Monkeys");
}

#[tokio::test]
async fn test_ans_lookups() {
    let (mut server, client) = setup_mock_server().await;

    let primary = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({ "variables": { "address": ADDRESS } })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": {
                    "current_aptos_names": [
                        { "domain": "kent", "subdomain": "", "owner_address": ADDRESS }
                    ]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let owner = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({
            "variables": { "domain": "kent", "subdomain": "pay" }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": {
                    "current_aptos_names": [
                        { "domain": "kent", "subdomain": "pay", "owner_address": "0x1" }
                    ]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    assert_eq!(
        client.primary_name(address()).await.unwrap().as_deref(),
        Some("kent.apt")
    );
    assert_eq!(
        client.owner_address("pay.kent.apt").await.unwrap(),
        Some(AccountAddress::ONE)
    );

    primary.assert_async().await;
    owner.assert_async().await;
}

#[tokio::test]
async fn test_graphql_errors_surface() {
    let (mut server, client) = setup_mock_server().await;

    server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": null,
                "errors": [{ "message": "field 'foo' not found" }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    assert_matches!(
        client.primary_name(address()).await,
        Err(RestError::GraphQl(message)) if message.contains("foo")
    );
}

#[tokio::test]
async fn test_fungible_asset_metadata_uses_long_addresses() {
    let (mut server, client) = setup_mock_server().await;

    let long_a = "0x000000000000000000000000000000000000000000000000000000000000000a";

    let mock = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({ "variables": { "asset": long_a } })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": {
                    "fungible_asset_metadata": [{
                        "asset_type": long_a,
                        "name": "Aptos Coin",
                        "symbol": "APT",
                        "decimals": 8,
                        "icon_uri": null,
                        "project_uri": null,
                        "creator_address": "0x1",
                        "token_standard": "v2"
                    }]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let metadata = client.fungible_asset_metadata("0xa").await.unwrap().unwrap();

    assert_eq!(metadata.symbol, "APT");
    assert_eq!(metadata.token_standard.as_deref(), Some("v2"));

    mock.assert_async().await;
}
