/// Entry function call descriptor.
mod call;
/// Abstraction over the fullnode endpoints used to submit transactions.
mod client;
/// Build, sign, submit and confirm.
mod submitter;
/// Coin and APT transfers.
pub mod transfer;

pub use {call::*, client::*, submitter::*};
