//! Aries Markets. Lending and repaying both go through `controller::deposit`,
//! withdrawing and borrowing both go through `controller::withdraw`. The
//! trailing flag tells them apart.

use {
    crate::{
        aptos::{AccountAddress, MoveFunctionId, MoveType, MoveValue},
        protocols::{amount_argument, ProtocolError},
        transactions::EntryFunctionCall,
        units::BigDecimal,
    },
    lazy_regex::Lazy,
};

pub const ARIES_ADDRESS: &str =
    "0x9770fa9c725cbd97eb50b2be5f7416efdfd1f1554beb0750d4dae4c64e860da3";
pub const ARIES_CONTROLLER_MODULE: &str = "controller";
/// Name of the profile created by [create_profile].
pub const DEFAULT_PROFILE_NAME: &str = "Main Account";

static ARIES: Lazy<AccountAddress> = Lazy::new(|| {
    ARIES_ADDRESS
        .parse()
        .expect("Aries address must be valid.")
});

fn controller_function(name: &str) -> MoveFunctionId {
    MoveFunctionId::new(*ARIES, ARIES_CONTROLLER_MODULE, name)
}

fn controller_call(
    name: &str,
    coin: &MoveType,
    amount: &BigDecimal,
    decimals: u8,
    flag: bool,
) -> Result<EntryFunctionCall, ProtocolError> {
    let amount = amount_argument(amount, decimals)?;

    Ok(EntryFunctionCall::new(controller_function(name))
        .with_type_argument(coin.clone())
        .with_argument(amount)
        .with_argument(flag))
}

/// Register the Aries profile every other operation requires.
pub fn create_profile() -> EntryFunctionCall {
    EntryFunctionCall::new(controller_function("register_user"))
        .with_argument(MoveValue::Bytes(DEFAULT_PROFILE_NAME.as_bytes().to_vec()))
}

pub fn lend(
    coin: &MoveType,
    amount: &BigDecimal,
    decimals: u8,
) -> Result<EntryFunctionCall, ProtocolError> {
    controller_call("deposit", coin, amount, decimals, false)
}

pub fn repay(
    coin: &MoveType,
    amount: &BigDecimal,
    decimals: u8,
) -> Result<EntryFunctionCall, ProtocolError> {
    controller_call("deposit", coin, amount, decimals, true)
}

pub fn withdraw(
    coin: &MoveType,
    amount: &BigDecimal,
    decimals: u8,
) -> Result<EntryFunctionCall, ProtocolError> {
    controller_call("withdraw", coin, amount, decimals, false)
}

pub fn borrow(
    coin: &MoveType,
    amount: &BigDecimal,
    decimals: u8,
) -> Result<EntryFunctionCall, ProtocolError> {
    controller_call("withdraw", coin, amount, decimals, true)
}

#[cfg(test)]
mod tests {
    use {super::*, crate::units::parse_amount, rstest::rstest};

    #[test]
    fn test_create_profile() {
        let call = create_profile();

        assert_eq!(
            call.function.to_string(),
            format!("{ARIES_ADDRESS}::controller::register_user")
        );
        assert_eq!(
            serde_json::to_value(&call.arguments).unwrap(),
            serde_json::json!(["0x4d61696e204163636f756e74"])
        );
    }

    #[rstest]
    #[case::lend(lend, "deposit", false)]
    #[case::repay(repay, "deposit", true)]
    #[case::withdraw(withdraw, "withdraw", false)]
    #[case::borrow(borrow, "withdraw", true)]
    fn test_controller_calls(
        #[case] build: fn(&MoveType, &BigDecimal, u8) -> Result<EntryFunctionCall, ProtocolError>,
        #[case] function: &str,
        #[case] flag: bool,
    ) {
        let call = build(&MoveType::aptos_coin(), &parse_amount("1.5").unwrap(), 8).unwrap();

        assert_eq!(call.function.name(), function);
        assert_eq!(call.type_arguments, vec![MoveType::aptos_coin()]);
        assert_eq!(
            call.arguments,
            vec![MoveValue::U64(150_000_000), MoveValue::Bool(flag)]
        );
    }

    #[test]
    fn test_rejects_zero_amount() {
        assert!(lend(&MoveType::aptos_coin(), &parse_amount("0").unwrap(), 8).is_err());
    }
}
