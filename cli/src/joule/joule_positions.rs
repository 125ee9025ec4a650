use {
    crate::{aptos::or_warn, command_title, display::json_output, item, loading, prelude::*},
    aptdeck_sdk::{
        aptos::AptosClient,
        protocols::joule::{user_position, user_positions, PositionId},
    },
    serde_json::Value,
};

/// Print every Joule position of `address`. A failed view renders nothing.
pub(crate) async fn joule_positions(
    client: &AptosClient,
    address: AccountAddress,
) -> AnyResult<Vec<Value>, AptdeckCliError> {
    command_title!("Joule positions of {address}");

    let handle = loading!("Calling pool::user_positions_map...");

    let result = user_positions(client, address).await;

    handle.success();

    let positions = or_warn(result, "Joule positions");

    print_values(&positions);

    json_output(&positions)?;

    Ok(positions)
}

/// Print one Joule position of `address`.
pub(crate) async fn joule_position(
    client: &AptosClient,
    address: AccountAddress,
    position: PositionId,
) -> AnyResult<Vec<Value>, AptdeckCliError> {
    command_title!("Joule position {position} of {address}");

    let handle = loading!("Calling pool::user_position_details...");

    let result = user_position(client, address, position).await;

    handle.success();

    let details = or_warn(result, "Joule position");

    print_values(&details);

    json_output(&details)?;

    Ok(details)
}

fn print_values(values: &[Value]) {
    if values.is_empty() {
        item!("{}", "No positions".truecolor(100, 100, 100));
    }

    for value in values {
        item!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        );
    }
}
