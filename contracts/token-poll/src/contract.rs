use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Vec};

use crate::errors::Error;
use crate::gating;
use crate::storage;
use crate::types::{OptionResult, Poll, PollGate, PollKind, VoteRecord};

// Text bounds are measured in bytes of the stored string.
const MAX_TITLE_LEN: u32 = 15;
const MAX_DESCRIPTION_LEN: u32 = 500;
const MAX_OPTION_LABEL_LEN: u32 = 50;

const YES_NO_OPTIONS: u32 = 2;
const MIN_CHOICE_OPTIONS: u32 = 3;
const MAX_CHOICE_OPTIONS: u32 = 10;

// Paginated reads never return more than this many polls per call.
const MAX_PAGE_SIZE: u32 = 100;

/// 1-based inclusive window of a page over a subject index, `None` when the
/// window falls entirely outside the index.
fn page_bounds(count: u32, page: u32, page_size: u32) -> Option<(u32, u32)> {
    let size = page_size.min(MAX_PAGE_SIZE);
    if size == 0 {
        return None;
    }
    let start = u64::from(page) * u64::from(size) + 1;
    if start > u64::from(count) {
        return None;
    }
    let end = (start + u64::from(size) - 1).min(u64::from(count));
    Some((start as u32, end as u32))
}

#[contract]
pub struct PollContract;

#[contractimpl]
impl PollContract {
    // ── Lifecycle ────────────────────────────────────────────────────────────

    /// Create a poll and return its ID. IDs are sequential from 1.
    ///
    /// YesNo polls take exactly 2 options, MultipleChoice polls 3 to 10.
    /// `end_time`, when given, must be strictly in the future. A gate is
    /// normalized and validated against the creator before anything is
    /// persisted; the creator must already satisfy their own gate.
    pub fn create_poll(
        env: Env,
        creator: Address,
        title: String,
        description: String,
        options: Vec<String>,
        kind: PollKind,
        end_time: Option<u64>,
        gate: Option<PollGate>,
    ) -> Result<u64, Error> {
        creator.require_auth();

        if title.len() == 0 || title.len() > MAX_TITLE_LEN {
            return Err(Error::InvalidTitle);
        }
        if description.len() == 0 || description.len() > MAX_DESCRIPTION_LEN {
            return Err(Error::InvalidDescription);
        }

        let option_count = options.len();
        match kind {
            PollKind::YesNo => {
                if option_count != YES_NO_OPTIONS {
                    return Err(Error::InvalidOptionCount);
                }
            }
            PollKind::MultipleChoice => {
                if option_count < MIN_CHOICE_OPTIONS || option_count > MAX_CHOICE_OPTIONS {
                    return Err(Error::InvalidOptionCount);
                }
            }
        }
        for label in options.iter() {
            if label.len() == 0 || label.len() > MAX_OPTION_LABEL_LEN {
                return Err(Error::InvalidOptionLabel);
            }
        }

        let created_at = env.ledger().timestamp();
        if let Some(deadline) = end_time {
            if deadline <= created_at {
                return Err(Error::EndTimeInPast);
            }
        }

        let gate = gating::process_gate(&env, &creator, gate)?;

        let poll_id = storage::next_poll_id(&env);
        let poll = Poll {
            id: poll_id,
            creator: creator.clone(),
            title: title.clone(),
            description,
            kind: kind.clone(),
            created_at,
            end_time,
            is_active: true,
            total_votes: 0,
            option_count,
            gate: gate.clone(),
        };

        storage::save_poll(&env, &poll);
        for (index, label) in options.iter().enumerate() {
            storage::save_option_label(&env, poll_id, index as u32, &label);
        }
        storage::append_creator_poll(&env, &creator, poll_id);
        storage::increment_total_polls(&env);
        storage::increment_active_polls(&env);

        env.events().publish(
            (symbol_short!("created"), poll_id),
            (creator, title, kind, created_at, end_time, gate),
        );

        Ok(poll_id)
    }

    /// Cast a vote. One vote per identity per poll, no changes afterwards.
    ///
    /// The eligibility check runs after all state checks and before any
    /// write, so a failed gate leaves no trace. The full write set (option
    /// counter, poll totals, vote record, indices) commits as one unit.
    pub fn vote(env: Env, voter: Address, poll_id: u64, option_index: u32) -> Result<(), Error> {
        voter.require_auth();

        let mut poll = storage::get_poll(&env, poll_id)?;
        if !poll.is_active {
            return Err(Error::PollClosed);
        }
        if option_index >= poll.option_count {
            return Err(Error::InvalidOption);
        }
        if storage::has_voted(&env, poll_id, &voter) {
            return Err(Error::AlreadyVoted);
        }

        let now = env.ledger().timestamp();
        if let Some(deadline) = poll.end_time {
            if now >= deadline {
                return Err(Error::VotingEnded);
            }
        }

        gating::check_voter(&env, &voter, &poll.gate)?;

        let votes = storage::get_option_votes(&env, poll_id, option_index) + 1;
        storage::set_option_votes(&env, poll_id, option_index, votes);

        poll.total_votes += 1;
        storage::save_poll(&env, &poll);

        let record = VoteRecord {
            voter: voter.clone(),
            option_index,
            timestamp: now,
        };
        storage::save_vote(&env, poll_id, &record);
        storage::append_poll_voter(&env, poll_id, &voter);
        storage::append_voter_poll(&env, &voter, poll_id);

        env.events().publish(
            (symbol_short!("voted"), poll_id),
            (voter, option_index, now),
        );

        Ok(())
    }

    /// Close a poll. Only the recorded creator can close, and a poll with a
    /// deadline cannot be closed before it. Closing is final.
    pub fn close_poll(env: Env, poll_id: u64) -> Result<(), Error> {
        let mut poll = storage::get_poll(&env, poll_id)?;
        poll.creator.require_auth();

        if !poll.is_active {
            return Err(Error::PollClosed);
        }

        let now = env.ledger().timestamp();
        if let Some(deadline) = poll.end_time {
            if now < deadline {
                return Err(Error::NotYetEnded);
            }
        }

        poll.is_active = false;
        storage::save_poll(&env, &poll);
        storage::decrement_active_polls(&env);

        let winning_option = Self::winning_option(&env, &poll);
        env.events().publish(
            (symbol_short!("ended"), poll_id),
            (poll.total_votes, winning_option, now),
        );

        Ok(())
    }

    // ── Point reads ──────────────────────────────────────────────────────────

    pub fn get_poll(env: Env, poll_id: u64) -> Result<Poll, Error> {
        storage::get_poll(&env, poll_id)
    }

    /// The poll, only while it is still accepting votes by flag.
    pub fn get_active_poll(env: Env, poll_id: u64) -> Result<Poll, Error> {
        let poll = storage::get_poll(&env, poll_id)?;
        if !poll.is_active {
            return Err(Error::PollClosed);
        }
        Ok(poll)
    }

    pub fn has_voted(env: Env, poll_id: u64, voter: Address) -> bool {
        storage::has_voted(&env, poll_id, &voter)
    }

    pub fn get_user_vote(env: Env, poll_id: u64, voter: Address) -> Result<VoteRecord, Error> {
        storage::get_vote(&env, poll_id, &voter)
    }

    pub fn get_poll_option(env: Env, poll_id: u64, option_index: u32) -> Result<String, Error> {
        let poll = storage::get_poll(&env, poll_id)?;
        if option_index >= poll.option_count {
            return Err(Error::InvalidOption);
        }
        storage::get_option_label(&env, poll_id, option_index)
    }

    // ── Paginated reads ──────────────────────────────────────────────────────

    /// Polls created by `creator`, in creation order. Out-of-range pages
    /// return an empty list, never an error.
    pub fn get_polls_by_creator(
        env: Env,
        creator: Address,
        page: u32,
        page_size: u32,
    ) -> Vec<Poll> {
        let count = storage::get_creator_poll_count(&env, &creator);
        let mut polls = Vec::new(&env);
        if let Some((start, end)) = page_bounds(count, page, page_size) {
            for position in start..=end {
                if let Some(poll_id) = storage::get_creator_poll(&env, &creator, position) {
                    if let Ok(poll) = storage::get_poll(&env, poll_id) {
                        polls.push_back(poll);
                    }
                }
            }
        }
        polls
    }

    /// Polls `voter` has voted on, in voting order.
    pub fn get_voter_polls(env: Env, voter: Address, page: u32, page_size: u32) -> Vec<Poll> {
        let count = storage::get_voter_poll_count(&env, &voter);
        let mut polls = Vec::new(&env);
        if let Some((start, end)) = page_bounds(count, page, page_size) {
            for position in start..=end {
                if let Some(poll_id) = storage::get_voter_poll(&env, &voter, position) {
                    if let Ok(poll) = storage::get_poll(&env, poll_id) {
                        polls.push_back(poll);
                    }
                }
            }
        }
        polls
    }

    // ── Aggregates ───────────────────────────────────────────────────────────

    pub fn get_total_polls(env: Env) -> u64 {
        storage::get_total_polls(&env)
    }

    pub fn get_active_poll_count(env: Env) -> u64 {
        storage::get_active_polls(&env)
    }

    pub fn get_poll_total_votes(env: Env, poll_id: u64) -> Result<u32, Error> {
        Ok(storage::get_poll(&env, poll_id)?.total_votes)
    }

    pub fn get_total_votes_per_poll_option(
        env: Env,
        poll_id: u64,
        option_index: u32,
    ) -> Result<u32, Error> {
        let poll = storage::get_poll(&env, poll_id)?;
        if option_index >= poll.option_count {
            return Err(Error::InvalidOption);
        }
        Ok(storage::get_option_votes(&env, poll_id, option_index))
    }

    /// Votes received across every poll this creator has made.
    pub fn get_creator_total_votes(env: Env, creator: Address) -> u64 {
        let count = storage::get_creator_poll_count(&env, &creator);
        let mut total: u64 = 0;
        for position in 1..=count {
            if let Some(poll_id) = storage::get_creator_poll(&env, &creator, position) {
                if let Ok(poll) = storage::get_poll(&env, poll_id) {
                    total += u64::from(poll.total_votes);
                }
            }
        }
        total
    }

    /// Every voter on a poll, in voting order.
    pub fn get_poll_voters(env: Env, poll_id: u64) -> Result<Vec<Address>, Error> {
        storage::get_poll(&env, poll_id)?;
        let count = storage::get_poll_voter_count(&env, poll_id);
        let mut voters = Vec::new(&env);
        for position in 1..=count {
            if let Some(voter) = storage::get_poll_voter(&env, poll_id, position) {
                voters.push_back(voter);
            }
        }
        Ok(voters)
    }

    pub fn get_voter_poll_count(env: Env, voter: Address) -> u32 {
        storage::get_voter_poll_count(&env, &voter)
    }

    // ── Results ──────────────────────────────────────────────────────────────

    /// Winning option index of a closed poll. Ties resolve to the lowest
    /// index: the scan only replaces the running maximum on strictly more
    /// votes.
    pub fn calculate_winner(env: Env, poll_id: u64) -> Result<u32, Error> {
        let poll = storage::get_poll(&env, poll_id)?;
        if poll.is_active {
            return Err(Error::PollStillOpen);
        }
        Ok(Self::winning_option(&env, &poll))
    }

    /// Per-option labels, tallies, and integer percentages. A poll with no
    /// votes reports 0 for every option rather than dividing by zero.
    pub fn get_poll_results(env: Env, poll_id: u64) -> Result<Vec<OptionResult>, Error> {
        let poll = storage::get_poll(&env, poll_id)?;
        let mut results = Vec::new(&env);
        for index in 0..poll.option_count {
            let votes = storage::get_option_votes(&env, poll_id, index);
            let percentage = if poll.total_votes == 0 {
                0
            } else {
                (u64::from(votes) * 100 / u64::from(poll.total_votes)) as u32
            };
            results.push_back(OptionResult {
                label: storage::get_option_label(&env, poll_id, index)?,
                votes,
                percentage,
            });
        }
        Ok(results)
    }

    // ── Private helpers ──────────────────────────────────────────────────────

    fn winning_option(env: &Env, poll: &Poll) -> u32 {
        let mut winner: u32 = 0;
        let mut top = storage::get_option_votes(env, poll.id, 0);
        for index in 1..poll.option_count {
            let votes = storage::get_option_votes(env, poll.id, index);
            if votes > top {
                top = votes;
                winner = index;
            }
        }
        winner
    }
}
