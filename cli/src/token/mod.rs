use {
    crate::{
        aptos::{build_aptos_client, load_conf, or_warn},
        command_title,
        display::json_output,
        item,
        loading,
        prelude::*,
    },
    aptdeck_sdk::{
        aptos::{AptosClient, FungibleAssetMetadata, TokenData},
        token_list::{HttpTokenListSource, TokenListCache, TokenListEntry, TokenListSource},
    },
};

#[derive(Subcommand, Clone, Debug)]
pub(crate) enum TokenCommand {
    #[command(about = "Find a token in the Panora token list")]
    Lookup {
        #[arg(
            long = "symbol",
            short = 's',
            help = "Token symbol, case insensitive",
            value_name = "SYMBOL",
            required_unless_present = "address",
            conflicts_with = "address"
        )]
        symbol: Option<String>,
        #[arg(
            long = "address",
            short = 'a',
            help = "Coin type or fungible asset address",
            value_name = "ADDRESS"
        )]
        address: Option<String>,
    },
    #[command(about = "Metadata of a fungible asset or coin from the indexer")]
    FaMetadata {
        #[arg(
            help = "Fungible asset address or coin type",
            value_name = "ASSET"
        )]
        asset: String,
    },
    #[command(about = "Details of an NFT")]
    Nft {
        #[arg(
            help = "Token address of the NFT",
            value_name = "ADDRESS",
            value_parser = ValueParser::from(parse_address)
        )]
        address: AccountAddress,
    },
}

/// Handle the provided token command.
pub(crate) async fn handle(command: TokenCommand, conf_path: PathBuf) -> AnyResult<(), AptdeckCliError> {
    match command {
        TokenCommand::Lookup { symbol, address } => {
            let cache = TokenListCache::new(HttpTokenListSource::default());

            token_lookup(&cache, symbol, address).await.map(|_| ())
        }
        TokenCommand::FaMetadata { asset } => {
            let conf = load_conf(&conf_path).await?;
            let client = build_aptos_client(&conf.aptos);

            fa_metadata(&client, &asset).await.map(|_| ())
        }
        TokenCommand::Nft { address } => {
            let conf = load_conf(&conf_path).await?;
            let client = build_aptos_client(&conf.aptos);

            nft_details(&client, address).await.map(|_| ())
        }
    }
}

/// Look a token up by symbol or by address in the token list.
async fn token_lookup<S: TokenListSource>(
    cache: &TokenListCache<S>,
    symbol: Option<String>,
    address: Option<String>,
) -> AnyResult<Option<TokenListEntry>, AptdeckCliError> {
    let query = symbol.clone().or_else(|| address.clone()).unwrap_or_default();

    command_title!("Looking up '{query}' in the token list");

    let handle = loading!("Fetching token list...");

    // Make sure the list itself is reachable so an outage is not reported as
    // an unknown token.
    if let Err(e) = cache.tokens().await {
        handle.error();

        return Err(AptdeckCliError::failed("Token lookup", e));
    }

    handle.success();

    let entry = match (symbol, address) {
        (Some(symbol), _) => cache.lookup_by_symbol(&symbol).await,
        (None, Some(address)) => cache.lookup_by_address(&address).await,
        (None, None) => None,
    };

    match &entry {
        Some(entry) => {
            item!("{} {}", entry.symbol.bold(), entry.name);
            item!("Decimals: {}", entry.decimals);

            if let Some(coin) = &entry.token_address {
                item!("Coin type: {coin}");
            }

            if let Some(fa) = &entry.fa_address {
                item!("Fungible asset: {fa}");
            }

            if let Some(logo) = &entry.logo_url {
                item!("Logo: {}", logo.truecolor(100, 100, 100));
            }
        }
        None => item!("{}", "Token not found".truecolor(100, 100, 100)),
    }

    json_output(&entry)?;

    Ok(entry)
}

/// Print fungible asset metadata. A failed lookup renders nothing.
async fn fa_metadata(
    client: &AptosClient,
    asset: &str,
) -> AnyResult<Option<FungibleAssetMetadata>, AptdeckCliError> {
    command_title!("Metadata of {asset}");

    let handle = loading!("Fetching metadata from the indexer...");

    let result = client.fungible_asset_metadata(asset).await;

    handle.success();

    let metadata = or_warn(result, "asset metadata");

    match &metadata {
        Some(metadata) => {
            item!("{} {}", metadata.symbol.bold(), metadata.name);
            item!("Decimals: {}", metadata.decimals);

            if let Some(standard) = &metadata.token_standard {
                item!("Standard: {standard}");
            }

            if let Some(icon) = &metadata.icon_uri {
                item!("Icon: {}", icon.truecolor(100, 100, 100));
            }
        }
        None => item!("{}", "Asset not found".truecolor(100, 100, 100)),
    }

    json_output(&metadata)?;

    Ok(metadata)
}

async fn nft_details(
    client: &AptosClient,
    address: AccountAddress,
) -> AnyResult<Option<TokenData>, AptdeckCliError> {
    command_title!("NFT {address}");

    let handle = loading!("Fetching token data from the indexer...");

    let result = client.token_data(address).await;

    handle.success();

    let token = or_warn(result, "token data");

    match &token {
        Some(token) => {
            item!("{}", token.name.bold());

            if let Some(collection) = &token.collection_name {
                item!("Collection: {collection}");
            }

            if !token.description.is_empty() {
                item!("{}", token.description);
            }

            item!("URI: {}", token.token_uri.truecolor(100, 100, 100));
        }
        None => item!("{}", "Token not found".truecolor(100, 100, 100)),
    }

    json_output(&token)?;

    Ok(token)
}
