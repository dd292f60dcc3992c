//! Error codes for the poll contract.
//!
//! Codes are grouped by category:
//! - 1-9: input validation
//! - 10-19: poll/vote state
//! - 20-29: gating and eligibility

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    // ===== Validation (1-9) =====
    InvalidTitle = 1,
    InvalidDescription = 2,
    InvalidOptionCount = 3,
    InvalidOptionLabel = 4,
    InvalidOption = 5,
    EndTimeInPast = 6,

    // ===== State (10-19) =====
    PollNotFound = 10,
    PollClosed = 11,
    AlreadyVoted = 12,
    VotingEnded = 13,
    NotYetEnded = 14,
    PollStillOpen = 15,
    VoteNotFound = 16,

    // ===== Eligibility (20-29) =====
    InvalidGateConfig = 20,
    IneligibleCreator = 21,
    IneligibleVoter = 22,
}
