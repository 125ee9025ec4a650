//! Joule money market: lending, borrowing and reward claims.
//!
//! Every operation comes in two flavours. Coins are passed as a type argument
//! while fungible assets are passed by metadata address to the `_fa` variant
//! of the same entry function.

mod market;
mod positions;

pub use {market::*, positions::*};

use {
    crate::{
        aptos::{AccountAddress, MoveFunctionId, MoveType},
        protocols::{amount_argument, ProtocolError},
        transactions::EntryFunctionCall,
        units::BigDecimal,
    },
    lazy_regex::Lazy,
    std::str::FromStr,
};

pub const JOULE_POOL_ADDRESS: &str =
    "0x2fe576faa841347a9b1b32c869685deb75a15e3f62dfe37cbd6d52cc403a16f6";
pub const JOULE_POOL_MODULE: &str = "pool";

static JOULE_POOL: Lazy<AccountAddress> = Lazy::new(|| {
    JOULE_POOL_ADDRESS
        .parse()
        .expect("Joule pool address must be valid.")
});

/// Amnis staked APT, rewarded through the `amAPTIncentives` program.
pub const STAKED_APT: &str =
    "0x111ae3e5bc816a5e63c2da97d0aa3886519e0cd5e4b046659fa35796bd11542a::stapt_token::StakedApt";
pub const AMNIS_APT: &str =
    "0x111ae3e5bc816a5e63c2da97d0aa3886519e0cd5e4b046659fa35796bd11542a::amapt_token::AmnisApt";

/// What a Joule operation moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JouleAsset {
    /// Coin standard, identified by its Move struct id.
    Coin(MoveType),
    /// Fungible asset standard, identified by its metadata address.
    FungibleAsset(AccountAddress),
}

impl JouleAsset {
    /// Parse `asset` as a coin type, or as a fungible asset address when
    /// `fungible_asset` is set.
    pub fn parse(asset: &str, fungible_asset: bool) -> Result<Self, ProtocolError> {
        if asset.trim().is_empty() {
            return Err(ProtocolError::InvalidInput(
                "Asset type must be provided".to_string(),
            ));
        }

        let invalid = |e: anyhow::Error| ProtocolError::InvalidInput(e.to_string());

        if fungible_asset {
            return AccountAddress::from_str(asset)
                .map(Self::FungibleAsset)
                .map_err(invalid);
        }

        MoveType::from_str(asset).map(Self::Coin).map_err(invalid)
    }
}

/// Position a Joule operation applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionId(pub u64);

impl FromStr for PositionId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ProtocolError::InvalidInput(
                "Position ID must be provided".to_string(),
            ));
        }

        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| ProtocolError::InvalidInput(format!("Invalid position ID '{s}'")))
    }
}

impl std::fmt::Display for PositionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn pool_function(name: &str) -> MoveFunctionId {
    MoveFunctionId::new(*JOULE_POOL, JOULE_POOL_MODULE, name)
}

/// Shared shape of lend, borrow, repay and withdraw. `trailing` is appended
/// after the amount for the coin variant only.
fn position_call(
    name: &str,
    asset: &JouleAsset,
    position: PositionId,
    amount: u64,
    trailing: Option<bool>,
) -> EntryFunctionCall {
    match asset {
        JouleAsset::Coin(coin) => {
            let call = EntryFunctionCall::new(pool_function(name))
                .with_type_argument(coin.clone())
                .with_argument(position.0)
                .with_argument(amount);

            match trailing {
                Some(flag) => call.with_argument(flag),
                None => call,
            }
        }
        JouleAsset::FungibleAsset(metadata) => {
            let call = EntryFunctionCall::new(pool_function(&format!("{name}_fa")))
                .with_argument(position.0)
                .with_argument(*metadata);

            match trailing {
                Some(flag) => call.with_argument(flag).with_argument(amount),
                None => call.with_argument(amount),
            }
        }
    }
}

/// Supply `amount` of `asset` to `position`, optionally opening it.
pub fn lend(
    asset: &JouleAsset,
    position: PositionId,
    amount: &BigDecimal,
    decimals: u8,
    new_position: bool,
) -> Result<EntryFunctionCall, ProtocolError> {
    let amount = amount_argument(amount, decimals)?;

    Ok(position_call("lend", asset, position, amount, Some(new_position)))
}

pub fn borrow(
    asset: &JouleAsset,
    position: PositionId,
    amount: &BigDecimal,
    decimals: u8,
) -> Result<EntryFunctionCall, ProtocolError> {
    let amount = amount_argument(amount, decimals)?;

    Ok(position_call("borrow", asset, position, amount, None))
}

pub fn repay(
    asset: &JouleAsset,
    position: PositionId,
    amount: &BigDecimal,
    decimals: u8,
) -> Result<EntryFunctionCall, ProtocolError> {
    let amount = amount_argument(amount, decimals)?;

    Ok(position_call("repay", asset, position, amount, None))
}

pub fn withdraw(
    asset: &JouleAsset,
    position: PositionId,
    amount: &BigDecimal,
    decimals: u8,
) -> Result<EntryFunctionCall, ProtocolError> {
    let amount = amount_argument(amount, decimals)?;

    Ok(position_call("withdraw", asset, position, amount, None))
}

/// Claim incentives paid in `reward_coin_type`. Staked APT rewards come from
/// the Amnis incentive program, everything else from the APT one.
pub fn claim_rewards(reward_coin_type: &MoveType) -> EntryFunctionCall {
    let (incentive_coin, program) = if reward_coin_type.as_str() == STAKED_APT {
        (
            MoveType::from_str(AMNIS_APT).expect("AmnisApt type must be valid."),
            "amAPTIncentives",
        )
    } else {
        (MoveType::aptos_coin(), "APTIncentives")
    };

    EntryFunctionCall::new(pool_function("claim_rewards"))
        .with_type_argument(incentive_coin)
        .with_argument(reward_coin_type.to_string())
        .with_argument(program)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{aptos::MoveValue, units::parse_amount},
        assert_matches::assert_matches,
    };

    fn apt() -> JouleAsset {
        JouleAsset::parse("0x1::aptos_coin::AptosCoin", false).unwrap()
    }

    #[test]
    fn test_lend_coin_scales_amount() {
        let call = lend(&apt(), PositionId(1), &parse_amount("1.5").unwrap(), 8, true).unwrap();

        assert_eq!(
            call.function.to_string(),
            format!("{JOULE_POOL_ADDRESS}::pool::lend")
        );
        assert_eq!(call.type_arguments, vec![MoveType::aptos_coin()]);
        assert_eq!(
            call.arguments,
            vec![
                MoveValue::U64(1),
                MoveValue::U64(150_000_000),
                MoveValue::Bool(true)
            ]
        );
    }

    #[test]
    fn test_lend_fungible_asset() {
        let asset = JouleAsset::parse("0xa", true).unwrap();
        let call = lend(&asset, PositionId(7), &parse_amount("2").unwrap(), 6, false).unwrap();

        assert_eq!(call.function.name(), "lend_fa");
        assert!(call.type_arguments.is_empty());
        assert_eq!(
            call.arguments,
            vec![
                MoveValue::U64(7),
                MoveValue::Address("0xa".parse().unwrap()),
                MoveValue::Bool(false),
                MoveValue::U64(2_000_000),
            ]
        );
    }

    #[test]
    fn test_borrow_repay_withdraw_shapes() {
        let amount = parse_amount("0.5").unwrap();

        let call = borrow(&apt(), PositionId(3), &amount, 8).unwrap();
        assert_eq!(call.function.name(), "borrow");
        assert_eq!(call.arguments, vec![MoveValue::U64(3), MoveValue::U64(50_000_000)]);

        let asset = JouleAsset::parse("0xa", true).unwrap();
        let call = repay(&asset, PositionId(3), &amount, 8).unwrap();
        assert_eq!(call.function.name(), "repay_fa");
        assert_eq!(call.arguments.len(), 3);

        let call = withdraw(&apt(), PositionId(3), &amount, 8).unwrap();
        assert_eq!(call.function.name(), "withdraw");
    }

    #[test]
    fn test_invalid_inputs_fail_early() {
        assert_matches!(
            lend(&apt(), PositionId(1), &parse_amount("-1").unwrap(), 8, false),
            Err(ProtocolError::Units(_))
        );
        assert_matches!(JouleAsset::parse("", false), Err(ProtocolError::InvalidInput(_)));
        assert_matches!(JouleAsset::parse("not a type", false), Err(ProtocolError::InvalidInput(_)));
        assert_matches!("".parse::<PositionId>(), Err(ProtocolError::InvalidInput(_)));
        assert_matches!("abc".parse::<PositionId>(), Err(ProtocolError::InvalidInput(_)));
        assert_eq!("42".parse::<PositionId>().unwrap(), PositionId(42));
    }

    #[test]
    fn test_claim_rewards_picks_incentive_program() {
        let staked = MoveType::from_str(STAKED_APT).unwrap();
        let call = claim_rewards(&staked);

        assert_eq!(call.type_arguments[0].as_str(), AMNIS_APT);
        assert_eq!(
            call.arguments,
            vec![MoveValue::String(STAKED_APT.to_string()), MoveValue::from("amAPTIncentives")]
        );

        let call = claim_rewards(&MoveType::aptos_coin());

        assert_eq!(call.type_arguments, vec![MoveType::aptos_coin()]);
        assert_eq!(call.arguments[1], MoveValue::from("APTIncentives"));
    }
}
