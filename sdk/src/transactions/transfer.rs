use crate::{
    aptos::{AccountAddress, MoveType},
    move_fn,
    transactions::EntryFunctionCall,
};

/// Transfer APT, creating the recipient account if needed.
pub fn transfer_apt(to: AccountAddress, amount_octas: u64) -> EntryFunctionCall {
    EntryFunctionCall::new(move_fn!("0x1::aptos_account::transfer"))
        .with_argument(to)
        .with_argument(amount_octas)
}

/// Transfer any coin. APT is routed through [transfer_apt] so the recipient
/// account gets created on first use.
pub fn transfer_coin(coin_type: &MoveType, to: AccountAddress, amount: u64) -> EntryFunctionCall {
    if coin_type == &MoveType::aptos_coin() {
        return transfer_apt(to, amount);
    }

    EntryFunctionCall::new(move_fn!("0x1::coin::transfer"))
        .with_type_argument(coin_type.clone())
        .with_argument(to)
        .with_argument(amount)
}

#[cfg(test)]
mod tests {
    use {super::*, crate::aptos::MoveValue};

    #[test]
    fn test_transfer_apt() {
        let call = transfer_apt(AccountAddress::ONE, 150_000_000);

        assert_eq!(call.function.to_string(), "0x1::aptos_account::transfer");
        assert!(call.type_arguments.is_empty());
        assert_eq!(
            call.arguments,
            vec![
                MoveValue::Address(AccountAddress::ONE),
                MoveValue::U64(150_000_000)
            ]
        );
    }

    #[test]
    fn test_transfer_coin() {
        let usdc = "0xf22bede237a07e121b56d91a491eb7bcdfd1f5907926a9e58338f964a01b17fa::asset::USDC"
            .parse::<MoveType>()
            .unwrap();
        let call = transfer_coin(&usdc, AccountAddress::ONE, 5);

        assert_eq!(call.function.to_string(), "0x1::coin::transfer");
        assert_eq!(call.type_arguments, vec![usdc]);

        let apt = transfer_coin(&MoveType::aptos_coin(), AccountAddress::ONE, 5);

        assert_eq!(apt.function.to_string(), "0x1::aptos_account::transfer");
    }
}
