use {
    crate::{aptos::or_warn, command_title, display::json_output, item, loading, prelude::*},
    aptdeck_sdk::aptos::{AptosClient, NftInfo},
};

/// Print the NFTs held by `address`. A failed lookup renders no NFTs.
pub(crate) async fn account_nfts(
    client: &AptosClient,
    address: AccountAddress,
) -> AnyResult<Vec<NftInfo>, AptdeckCliError> {
    command_title!("NFTs owned by {address}");

    let handle = loading!("Fetching NFTs from the indexer...");

    let result = client.owned_tokens(address).await;

    handle.success();

    let nfts = or_warn(result, "NFTs");

    if nfts.is_empty() {
        item!("{}", "No NFTs".truecolor(100, 100, 100));
    }

    for nft in &nfts {
        item!(
            "{name} from {collection} {uri}",
            name = nft.name.bold(),
            collection = nft.collection_name,
            uri = nft.token_uri.truecolor(100, 100, 100),
        );
    }

    json_output(&nfts)?;

    Ok(nfts)
}
