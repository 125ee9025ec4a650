use crate::{
    account::LocalAccount,
    aptos::{PayloadInfo, TransactionInfo},
    token_list::TokenListEntry,
};

/// Private key with a well known public key and address, see
/// [TEST_ACCOUNT_ADDRESS].
pub const TEST_PRIVATE_KEY: &str =
    "0xc5338cd251c22daa8c9c9cc94f498cc8a5c7e1d2e75287a5dda91096fe64efa5";
pub const TEST_ACCOUNT_ADDRESS: &str =
    "0x978c213990c4833df71548df7ce49d54c759d6b6d932de22b24d56060b7af2aa";

pub fn test_account() -> LocalAccount {
    LocalAccount::from_private_key_hex(TEST_PRIVATE_KEY).expect("Test key must be valid.")
}

/// A committed user transaction with the given outcome.
pub fn committed_transaction(hash: &str, success: bool, vm_status: &str) -> TransactionInfo {
    TransactionInfo {
        hash: hash.to_string(),
        version: 42,
        success,
        vm_status: vm_status.to_string(),
        gas_used: 11,
        timestamp: 1_700_000_000_000_000,
        sender: Some(test_account().address()),
        payload: Some(PayloadInfo {
            function: Some("0x1::aptos_account::transfer".to_string()),
            ..Default::default()
        }),
    }
}

/// A token list entry for APT with both coin and fungible asset addresses.
pub fn apt_token_entry() -> TokenListEntry {
    TokenListEntry {
        name: "Aptos Coin".to_string(),
        symbol: "APT".to_string(),
        decimals: 8,
        token_address: Some("0x1::aptos_coin::AptosCoin".to_string()),
        fa_address: Some("0xa".to_string()),
        logo_url: Some("https://assets.panora.exchange/tokens/aptos/APT.svg".to_string()),
        website_url: Some("https://aptosfoundation.org".to_string()),
        coin_gecko_id: Some("aptos".to_string()),
    }
}
