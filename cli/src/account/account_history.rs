use {
    crate::{
        aptos::or_warn,
        command_title,
        display::{json_output, shorten_hex},
        item,
        loading,
        prelude::*,
    },
    aptdeck_sdk::aptos::{AptosClient, TransactionInfo},
};

/// Print the most recent user transactions of `address`, newest first. A
/// failed lookup renders an empty history.
pub(crate) async fn account_history(
    client: &AptosClient,
    address: AccountAddress,
    limit: u16,
) -> AnyResult<Vec<TransactionInfo>, AptdeckCliError> {
    command_title!("Transactions of {address}");

    let handle = loading!("Fetching transactions...");

    let result = client.account_transactions(address, limit).await;

    handle.success();

    let mut transactions = or_warn(result, "transactions");

    transactions.sort_by(|a, b| b.version.cmp(&a.version));

    if transactions.is_empty() {
        item!("{}", "No transactions".truecolor(100, 100, 100));
    }

    for tx in &transactions {
        let status = if tx.success {
            "✔".green()
        } else {
            "✘".red()
        };
        let time = tx
            .timestamp()
            .map(|t| {
                t.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_default();

        item!(
            "{status} {time} {function} {hash}",
            function = tx.function().unwrap_or("script").bold(),
            hash = shorten_hex(&tx.hash).truecolor(100, 100, 100),
        );
    }

    json_output(&transactions)?;

    Ok(transactions)
}
