use {
    super::JouleAssetArgs,
    crate::{
        aptos::{execute_call, require_positive, resolve_decimals},
        command_title,
        item,
        prelude::*,
    },
    aptdeck_sdk::{
        account::LocalAccount,
        aptos::AptosClient,
        protocols::{
            joule::{self, JouleAsset, PositionId},
            ProtocolError,
        },
        transactions::{EntryFunctionCall, TransactionOutcome},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LendingAction {
    Lend { new_position: bool },
    Borrow,
    Repay,
    Withdraw,
}

impl LendingAction {
    fn operation(&self) -> &'static str {
        match self {
            Self::Lend { .. } => "Lend",
            Self::Borrow => "Borrow",
            Self::Repay => "Repay",
            Self::Withdraw => "Withdraw",
        }
    }

    fn build(
        &self,
        asset: &JouleAsset,
        position: PositionId,
        amount: &BigDecimal,
        decimals: u8,
    ) -> Result<EntryFunctionCall, ProtocolError> {
        match *self {
            Self::Lend { new_position } => joule::lend(asset, position, amount, decimals, new_position),
            Self::Borrow => joule::borrow(asset, position, amount, decimals),
            Self::Repay => joule::repay(asset, position, amount, decimals),
            Self::Withdraw => joule::withdraw(asset, position, amount, decimals),
        }
    }
}

/// Lend, borrow, repay or withdraw on a Joule position.
pub(crate) async fn joule_lending(
    client: &AptosClient,
    account: &LocalAccount,
    action: LendingAction,
    JouleAssetArgs {
        token,
        amount,
        fungible_asset,
        decimals,
    }: JouleAssetArgs,
    position: PositionId,
) -> AnyResult<TransactionOutcome, AptdeckCliError> {
    let operation = action.operation();

    command_title!("Joule {operation}: {amount} of {token} on position {position}");

    require_positive(&amount, operation)?;

    let asset = JouleAsset::parse(&token, fungible_asset)
        .map_err(|e| AptdeckCliError::failed(operation, e))?;
    let decimals = resolve_decimals(client, &token, decimals).await;

    item!("Decimals: {decimals}");

    let call = action
        .build(&asset, position, &amount, decimals)
        .map_err(|e| AptdeckCliError::failed(operation, e))?;

    execute_call(client, account, call, operation).await
}

/// Claim incentives paid in `reward_coin_type`.
pub(crate) async fn joule_claim_reward(
    client: &AptosClient,
    account: &LocalAccount,
    reward_coin_type: &MoveType,
) -> AnyResult<TransactionOutcome, AptdeckCliError> {
    command_title!("Claiming Joule rewards paid in {reward_coin_type}");

    execute_call(client, account, joule::claim_rewards(reward_coin_type), "Claim reward").await
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        aptdeck_sdk::{aptos::MoveValue, units::parse_amount},
        assert_matches::assert_matches,
        rstest::rstest,
    };

    #[test]
    fn test_lend_scales_amount_to_base_units() {
        let asset = JouleAsset::parse("0x1::aptos_coin::AptosCoin", false).unwrap();

        let call = LendingAction::Lend { new_position: true }
            .build(&asset, PositionId(1), &parse_amount("1.5").unwrap(), 8)
            .unwrap();

        assert_eq!(call.function.name(), "lend");
        assert_eq!(
            call.arguments,
            vec![MoveValue::U64(1), MoveValue::U64(150_000_000), MoveValue::Bool(true)]
        );
    }

    #[rstest]
    #[case(LendingAction::Borrow, "borrow_fa")]
    #[case(LendingAction::Repay, "repay_fa")]
    #[case(LendingAction::Withdraw, "withdraw_fa")]
    fn test_fungible_asset_variants(#[case] action: LendingAction, #[case] function: &str) {
        let asset = JouleAsset::parse("0xa", true).unwrap();

        let call = action
            .build(&asset, PositionId(3), &parse_amount("2").unwrap(), 6)
            .unwrap();

        assert_eq!(call.function.name(), function);
        assert_eq!(call.arguments.last(), Some(&MoveValue::U64(2_000_000)));
    }

    #[test]
    fn test_non_positive_amounts_are_rejected() {
        let asset = JouleAsset::parse("0x1::aptos_coin::AptosCoin", false).unwrap();

        assert_matches!(
            LendingAction::Repay.build(&asset, PositionId(1), &parse_amount("0").unwrap(), 8),
            Err(ProtocolError::Units(_))
        );
        assert_matches!(
            LendingAction::Withdraw.build(&asset, PositionId(1), &parse_amount("-1").unwrap(), 8),
            Err(ProtocolError::Units(_))
        );
    }

    #[tokio::test]
    async fn test_invalid_token_fails_before_network() {
        // Nothing listens on this port, so any request would fail differently.
        let client = AptosClient::builder()
            .with_network(Network::Mainnet)
            .with_fullnode_url("http://127.0.0.1:9")
            .with_indexer_url("http://127.0.0.1:9/graphql")
            .build();
        let account = LocalAccount::generate();

        let args = JouleAssetArgs {
            token: "AptosCoin".to_string(),
            amount: parse_amount("1").unwrap(),
            fungible_asset: false,
            decimals: None,
        };

        let error = joule_lending(&client, &account, LendingAction::Borrow, args, PositionId(1))
            .await
            .unwrap_err();

        assert_matches!(&error, AptdeckCliError::Any(e) if e.to_string() == "Borrow failed");
    }

    #[rstest]
    #[case::zero("0")]
    #[case::negative("-3")]
    #[tokio::test]
    async fn test_non_positive_amount_skips_decimals_lookup(#[case] amount: &str) {
        let mut server = mockito::Server::new_async().await;
        let indexer = server
            .mock("POST", "/graphql")
            .with_status(200)
            .expect(0)
            .create_async()
            .await;

        let client = AptosClient::builder()
            .with_network(Network::Mainnet)
            .with_fullnode_url(&server.url())
            .with_indexer_url(&format!("{}/graphql", server.url()))
            .build();
        let account = LocalAccount::generate();

        let args = JouleAssetArgs {
            token: "0xbeef::coin::Foo".to_string(),
            amount: parse_amount(amount).unwrap(),
            fungible_asset: false,
            decimals: None,
        };

        let error = joule_lending(
            &client,
            &account,
            LendingAction::Lend { new_position: false },
            args,
            PositionId(1),
        )
        .await
        .unwrap_err();

        assert_matches!(&error, AptdeckCliError::Any(e) if e.to_string() == "Lend failed");

        indexer.assert_async().await;
    }
}
