use {
    super::{pool_function, PositionId},
    crate::{
        aptos::{AccountAddress, AptosClient, MoveValue},
        protocols::ProtocolError,
    },
    serde_json::Value,
};

/// All positions of `user`, as returned by `pool::user_positions_map`.
pub async fn user_positions(
    client: &AptosClient,
    user: AccountAddress,
) -> Result<Vec<Value>, ProtocolError> {
    let result = client
        .view(
            &pool_function("user_positions_map"),
            &[],
            &[MoveValue::Address(user)],
        )
        .await?;

    Ok(result)
}

/// Details of one position, as returned by `pool::user_position_details`.
pub async fn user_position(
    client: &AptosClient,
    user: AccountAddress,
    position: PositionId,
) -> Result<Vec<Value>, ProtocolError> {
    let result = client
        .view(
            &pool_function("user_position_details"),
            &[],
            &[MoveValue::Address(user), MoveValue::U64(position.0)],
        )
        .await?;

    Ok(result)
}
