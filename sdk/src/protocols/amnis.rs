//! Amnis liquid staking of APT.

use {
    crate::{
        aptos::{AccountAddress, MoveFunctionId},
        protocols::{amount_argument, ProtocolError},
        transactions::EntryFunctionCall,
        units::{BigDecimal, APT_DECIMALS},
    },
    lazy_regex::Lazy,
};

pub const AMNIS_ADDRESS: &str =
    "0x111ae3e5bc816a5e63c2da97d0aa3886519e0cd5e4b046659fa35796bd11542a";
pub const AMNIS_ROUTER_MODULE: &str = "router";

static AMNIS: Lazy<AccountAddress> = Lazy::new(|| {
    AMNIS_ADDRESS
        .parse()
        .expect("Amnis address must be valid.")
});

/// Stake `amount` APT and send the minted stAPT to `recipient`.
pub fn stake(
    amount: &BigDecimal,
    recipient: AccountAddress,
) -> Result<EntryFunctionCall, ProtocolError> {
    let octas = amount_argument(amount, APT_DECIMALS)?;

    Ok(
        EntryFunctionCall::new(MoveFunctionId::new(*AMNIS, AMNIS_ROUTER_MODULE, "deposit_and_stake_entry"))
            .with_argument(octas)
            .with_argument(recipient),
    )
}

/// Unstake `amount` and send the APT to `recipient`.
pub fn unstake(
    amount: &BigDecimal,
    recipient: AccountAddress,
) -> Result<EntryFunctionCall, ProtocolError> {
    let octas = amount_argument(amount, APT_DECIMALS)?;

    Ok(
        EntryFunctionCall::new(MoveFunctionId::new(*AMNIS, AMNIS_ROUTER_MODULE, "unstake_entry"))
            .with_argument(octas)
            .with_argument(recipient),
    )
}

#[cfg(test)]
mod tests {
    use {super::*, crate::{aptos::MoveValue, units::parse_amount}};

    #[test]
    fn test_stake_and_unstake() {
        let recipient = "0xbeef".parse::<AccountAddress>().unwrap();

        let call = stake(&parse_amount("1.5").unwrap(), recipient).unwrap();

        assert_eq!(
            call.function.to_string(),
            format!("{AMNIS_ADDRESS}::router::deposit_and_stake_entry")
        );
        assert_eq!(
            call.arguments,
            vec![MoveValue::U64(150_000_000), MoveValue::Address(recipient)]
        );

        let call = unstake(&parse_amount("0.25").unwrap(), recipient).unwrap();

        assert_eq!(call.function.name(), "unstake_entry");
        assert_eq!(call.arguments[0], MoveValue::U64(25_000_000));
        assert!(unstake(&parse_amount("-3").unwrap(), recipient).is_err());
    }
}
