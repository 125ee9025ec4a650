use crate::prelude::*;

mod crypto_init_key;
mod crypto_key_status;

use {crypto_init_key::crypto_init_key, crypto_key_status::crypto_key_status};

#[derive(Subcommand, Clone, Debug)]
pub(crate) enum CryptoCommand {
    #[command(
        about = "Generate a random 32-byte master key in the OS key-ring. WARNING: This forgets the stored wallet!"
    )]
    InitKey {
        /// Replace an existing key. The encrypted wallet can no longer be
        /// decrypted afterwards and is removed from the configuration.
        #[arg(long)]
        force: bool,
    },
    #[command(about = "Show where the master key is loaded from.")]
    KeyStatus,
}

/// Handle the provided crypto command.
pub(crate) async fn handle(command: CryptoCommand, conf_path: PathBuf) -> AnyResult<(), AptdeckCliError> {
    match command {
        CryptoCommand::InitKey { force } => crypto_init_key(force, &conf_path).await,
        CryptoCommand::KeyStatus => crypto_key_status().map(|_| ()),
    }
}
