#![no_std]

mod contract;
mod errors;
mod gating;
mod storage;
mod types;

pub use contract::{PollContract, PollContractClient};
pub use errors::Error;
pub use types::{GateKind, OptionResult, Poll, PollGate, PollKind, VoteRecord};
