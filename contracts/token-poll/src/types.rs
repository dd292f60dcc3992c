use soroban_sdk::{contracttype, Address, String};

/// Shape of a poll's option list
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PollKind {
    /// Exactly two options
    YesNo,
    /// Between three and ten options
    MultipleChoice,
}

/// Which credential contract a gate checks against
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GateKind {
    None,
    FungibleToken,
    NonFungibleToken,
}

/// Participation gate, supplied by the creator and persisted after
/// normalization. `token` must be present whenever the gate is enabled.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PollGate {
    pub enabled: bool,
    pub kind: GateKind,
    /// Credential contract address
    pub token: Option<Address>,
    /// Minimum balance (fungible) or minimum owned count (non-fungible)
    pub threshold: i128,
    /// Specific token that must be owned, instead of a count threshold
    pub token_id: Option<u32>,
}

impl PollGate {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            kind: GateKind::None,
            token: None,
            threshold: 0,
            token_id: None,
        }
    }
}

/// A single poll
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Poll {
    /// Sequential ID, assigned from 1
    pub id: u64,
    pub creator: Address,
    pub title: String,
    pub description: String,
    pub kind: PollKind,
    /// Ledger timestamp at creation
    pub created_at: u64,
    /// Voting deadline; open-ended when absent
    pub end_time: Option<u64>,
    pub is_active: bool,
    pub total_votes: u32,
    pub option_count: u32,
    pub gate: PollGate,
}

/// One identity's vote on one poll
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteRecord {
    pub voter: Address,
    pub option_index: u32,
    pub timestamp: u64,
}

/// Per-option tally row returned by `get_poll_results`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OptionResult {
    pub label: String,
    pub votes: u32,
    /// Integer percentage of total votes, 0 when the poll has no votes
    pub percentage: u32,
}

/// Storage keys
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    NextPollId,
    TotalPolls,
    ActivePolls,
    Poll(u64),
    // Option label and tally, keyed by (poll, zero-based index)
    OptionLabel(u64, u32),
    OptionVotes(u64, u32),
    // Vote record and flag, keyed by (poll, voter); always written together
    Vote(u64, Address),
    HasVoted(u64, Address),
    // Index: poll -> ordered voters, keyed by 1-based position
    PollVoters(u64, u32),
    PollVoterCount(u64),
    // Index: creator -> ordered poll IDs
    CreatorPolls(Address, u32),
    CreatorPollCount(Address),
    // Index: voter -> ordered poll IDs they voted on
    VoterPolls(Address, u32),
    VoterPollCount(Address),
}
