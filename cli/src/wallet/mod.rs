use {
    crate::{aptos::load_conf, prelude::*},
    aptdeck_sdk::account::LocalAccount,
};

mod wallet_check_address;
mod wallet_generate;
mod wallet_import;
mod wallet_logout;
mod wallet_show;
mod wallet_sign_message;

use {
    wallet_check_address::wallet_check_address,
    wallet_generate::wallet_generate,
    wallet_import::wallet_import,
    wallet_logout::wallet_logout,
    wallet_show::wallet_show,
    wallet_sign_message::wallet_sign_message,
};

#[derive(Subcommand, Clone, Debug)]
pub(crate) enum WalletCommand {
    #[command(about = "Generate a fresh ed25519 wallet and store it encrypted")]
    Generate {
        /// Replace the wallet that is already configured.
        #[arg(long)]
        force: bool,
    },
    #[command(about = "Import a private key (0x..., bare hex or ed25519-priv-0x...)")]
    Import {
        /// Read the private key from STDIN instead of an interactive prompt.
        #[arg(long)]
        stdin: bool,
        /// Replace the wallet that is already configured.
        #[arg(long)]
        force: bool,
    },
    #[command(about = "Show the address and public key of the wallet")]
    Show {
        /// Also print the private key.
        #[arg(long)]
        private_key: bool,
    },
    #[command(about = "Forget the stored wallet")]
    Logout {
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    #[command(about = "Sign an arbitrary message with the wallet key")]
    SignMessage {
        #[arg(help = "Message to sign, signed as UTF-8 bytes")]
        message: String,
    },
    #[command(about = "Check whether an address exists on chain")]
    CheckAddress {
        #[arg(help = "Address to check", value_parser = ValueParser::from(parse_address))]
        address: AccountAddress,
    },
}

/// Handle the provided wallet command.
pub(crate) async fn handle(
    command: WalletCommand,
    conf_path: PathBuf,
) -> AnyResult<(), AptdeckCliError> {
    match command {
        WalletCommand::Generate { force } => wallet_generate(force, conf_path).await,
        WalletCommand::Import { stdin, force } => wallet_import(stdin, force, conf_path).await,
        WalletCommand::Show { private_key } => wallet_show(private_key, conf_path).await,
        WalletCommand::Logout { yes } => wallet_logout(yes, conf_path).await,
        WalletCommand::SignMessage { message } => wallet_sign_message(message, conf_path).await,
        WalletCommand::CheckAddress { address } => {
            wallet_check_address(address, conf_path).await.map(|_| ())
        }
    }
}

/// Encrypt the key of `account` into the configuration at `conf_path`.
/// Refuses to replace an existing wallet unless `force` is set.
pub(crate) async fn store_wallet(
    account: &LocalAccount,
    force: bool,
    conf_path: &Path,
) -> AnyResult<(), AptdeckCliError> {
    let mut conf = load_conf(conf_path).await?;

    if conf.wallet.is_some() && !force {
        return Err(AptdeckCliError::Any(anyhow!(
            "{message}\n\n{command}",
            message = "A wallet is already configured. Use --force to replace it or log out first:",
            command = "$ aptdeck wallet logout".bold(),
        )));
    }

    conf.wallet = Some(Secret::new(account.private_key_hex().to_string()));

    conf.save_to_path(conf_path)
        .await
        .map_err(AptdeckCliError::Any)
}
