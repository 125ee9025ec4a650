use crate::prelude::*;

mod conf_get;
mod conf_set;

use {conf_get::get_aptdeck_conf, conf_set::set_aptdeck_conf};

#[derive(Subcommand, Clone, Debug)]
pub(crate) enum ConfCommand {
    #[command(about = "Print the current configuration")]
    Get,
    #[command(about = "Update the configuration from the provided arguments")]
    Set {
        #[arg(
            long = "aptos.net",
            help = "Set the Aptos network",
            value_enum,
            value_name = "NET"
        )]
        aptos_net: Option<AptosNet>,
        #[arg(
            long = "aptos.rpc-url",
            help = "Use a custom fullnode REST URL",
            value_name = "URL",
            value_parser = ValueParser::from(parse_url)
        )]
        aptos_rpc_url: Option<String>,
        #[arg(
            long = "aptos.indexer-url",
            help = "Use a custom indexer GraphQL URL",
            value_name = "URL",
            value_parser = ValueParser::from(parse_url)
        )]
        aptos_indexer_url: Option<String>,
        #[arg(
            long = "aptos.reset-urls",
            help = "Forget custom URLs and use the public endpoints of the network",
            conflicts_with_all = ["aptos_rpc_url", "aptos_indexer_url"]
        )]
        aptos_reset_urls: bool,
    },
}

/// Handle the provided conf command. The [ConfCommand] instance is passed from
/// [crate::main].
pub(crate) async fn handle(
    command: ConfCommand,
    conf_path: PathBuf,
) -> AnyResult<(), AptdeckCliError> {
    match command {
        ConfCommand::Get => get_aptdeck_conf(conf_path).await.map(|_| ()),
        ConfCommand::Set {
            aptos_net,
            aptos_rpc_url,
            aptos_indexer_url,
            aptos_reset_urls,
        } => {
            set_aptdeck_conf(
                aptos_net,
                aptos_rpc_url,
                aptos_indexer_url,
                aptos_reset_urls,
                conf_path,
            )
            .await
        }
    }
}
