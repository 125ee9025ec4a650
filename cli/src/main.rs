mod account;
mod amnis;
mod ans;
mod aptos;
mod aries;
mod completion;
mod conf;
mod crypto;
mod display;
mod error;
mod joule;
mod liquidswap;
mod prelude;
mod token;
mod transfer;
mod utils;
mod wallet;

use crate::prelude::*;

#[derive(Parser)]
#[command(version, about = "Aptdeck CLI: an Aptos wallet with DeFi integrations")]
struct Cli {
    /// Print machine readable JSON instead of formatted output.
    #[arg(long, global = true)]
    json: bool,
    /// Hidden argument used for testing to set the path of the configuration
    /// file.
    #[arg(
        long = "conf-path",
        global = true,
        hide = true,
        default_value = CLI_CONF_PATH,
        value_parser = ValueParser::from(expand_tilde)
    )]
    conf_path: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(subcommand, about = "Manage the Aptdeck CLI configuration")]
    Conf(conf::ConfCommand),
    #[command(subcommand, about = "Create, import and use the local wallet")]
    Wallet(wallet::WalletCommand),
    #[command(subcommand, about = "Read balances, history, NFTs and staking of an account")]
    Account(account::AccountCommand),
    #[command(about = "Transfer APT or any coin to an address or an ANS name")]
    Transfer(transfer::TransferCommand),
    #[command(subcommand, about = "Look up Aptos Name Service names")]
    Ans(ans::AnsCommand),
    #[command(subcommand, about = "Look up token and NFT metadata")]
    Token(token::TokenCommand),
    #[command(subcommand, about = "Lend and borrow on Joule (mainnet)")]
    Joule(joule::JouleCommand),
    #[command(subcommand, about = "Lend and borrow on Aries (mainnet)")]
    Aries(aries::AriesCommand),
    #[command(subcommand, about = "Liquid staking on Amnis (mainnet)")]
    Amnis(amnis::AmnisCommand),
    #[command(subcommand, about = "Swap coins on Liquidswap (mainnet)")]
    Liquidswap(liquidswap::LiquidswapCommand),
    #[command(subcommand, about = "Manage the master key protecting the wallet")]
    Crypto(crypto::CryptoCommand),
    #[command(about = "Generate shell completions")]
    Completion(completion::CompletionCommand),
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Customize parsing error handling.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // These 2 are "not real errors" that are used to stop the execution
            // to display the CLI help or version.
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    println!("{}", e);

                    std::process::exit(0);
                }
                _ => (),
            }

            eprintln!(
                "{ballot} {error}",
                ballot = "✘".red().bold(),
                error = AptdeckCliError::Syntax(e)
            );

            std::process::exit(1);
        }
    };

    JSON_MODE.store(cli.json, Ordering::Relaxed);

    let conf_path = cli.conf_path;

    // Send each sub-command to the respective handler.
    let result = match cli.command {
        Command::Conf(conf) => conf::handle(conf, conf_path).await,
        Command::Wallet(wallet) => wallet::handle(wallet, conf_path).await,
        Command::Account(account) => account::handle(account, conf_path).await,
        Command::Transfer(transfer) => transfer::handle(transfer, conf_path).await,
        Command::Ans(ans) => ans::handle(ans, conf_path).await,
        Command::Token(token) => token::handle(token, conf_path).await,
        Command::Joule(joule) => joule::handle(joule, conf_path).await,
        Command::Aries(aries) => aries::handle(aries, conf_path).await,
        Command::Amnis(amnis) => amnis::handle(amnis, conf_path).await,
        Command::Liquidswap(liquidswap) => liquidswap::handle(liquidswap, conf_path).await,
        Command::Crypto(crypto) => crypto::handle(crypto, conf_path).await,
        Command::Completion(completion) => completion::handle(completion),
    };

    // Handle any errors that occurred during command execution.
    if let Err(e) = result {
        eprintln!("{ballot} {e}", ballot = "✘".red().bold());

        std::process::exit(1);
    }
}
