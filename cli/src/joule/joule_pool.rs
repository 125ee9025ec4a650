use {
    crate::{command_title, display::json_output, item, loading, prelude::*},
    aptdeck_sdk::protocols::joule::{JouleMarketClient, PoolDetails},
};

/// Print market figures of the Joule pool for `token`.
pub(crate) async fn joule_pool(
    market: &JouleMarketClient,
    token: &str,
) -> AnyResult<PoolDetails, AptdeckCliError> {
    command_title!("Joule pool for {token}");

    let handle = loading!("Fetching Joule market data...");

    let pool = match market.pool_details(token).await {
        Ok(pool) => pool,
        Err(e) => {
            handle.error();

            return Err(AptdeckCliError::failed("Pool lookup", e));
        }
    };

    handle.success();

    item!("{}", pool.asset_name.bold());
    item!("Market size: {:.4}", pool.market_size);
    item!("Total borrowed: {:.4}", pool.total_borrowed);
    item!(
        "Deposit APY: {:.2}% (+{:.2}% incentives)",
        pool.deposit_apy,
        pool.extra_deposit_apy
    );
    item!("Borrow APY: {:.2}%", pool.borrow_apy);
    item!("LTV: {}", pool.ltv);
    item!("Price: ${:.4}", pool.price);

    json_output(&pool)?;

    Ok(pool)
}
