use soroban_sdk::{Address, Env, String};

use crate::errors::Error;
use crate::types::{DataKey, Poll, VoteRecord};

// ── Ledger TTL constants ─────────────────────────────────────────────────────
// Poll state must outlive the voting window and stay queryable afterwards.
// At ~5s per ledger: 1 year ≈ 6,307,200 ledgers.
const POLL_TTL_LEDGERS: u32 = 6_307_200;

fn extend(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, POLL_TTL_LEDGERS, POLL_TTL_LEDGERS);
}

// ── Sequence & global counters ───────────────────────────────────────────────

/// Increment-and-fetch for the poll ID sequence. First call returns 1.
pub fn next_poll_id(env: &Env) -> u64 {
    let id: u64 = env
        .storage()
        .persistent()
        .get(&DataKey::NextPollId)
        .unwrap_or(0u64)
        + 1;
    env.storage().persistent().set(&DataKey::NextPollId, &id);
    extend(env, &DataKey::NextPollId);
    id
}

pub fn get_total_polls(env: &Env) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::TotalPolls)
        .unwrap_or(0u64)
}

pub fn increment_total_polls(env: &Env) {
    let count = get_total_polls(env) + 1;
    env.storage().persistent().set(&DataKey::TotalPolls, &count);
    extend(env, &DataKey::TotalPolls);
}

pub fn get_active_polls(env: &Env) -> u64 {
    env.storage()
        .persistent()
        .get(&DataKey::ActivePolls)
        .unwrap_or(0u64)
}

pub fn increment_active_polls(env: &Env) {
    let count = get_active_polls(env) + 1;
    env.storage().persistent().set(&DataKey::ActivePolls, &count);
    extend(env, &DataKey::ActivePolls);
}

pub fn decrement_active_polls(env: &Env) {
    let count = get_active_polls(env).saturating_sub(1);
    env.storage().persistent().set(&DataKey::ActivePolls, &count);
    extend(env, &DataKey::ActivePolls);
}

// ── Polls ────────────────────────────────────────────────────────────────────

pub fn save_poll(env: &Env, poll: &Poll) {
    let key = DataKey::Poll(poll.id);
    env.storage().persistent().set(&key, poll);
    extend(env, &key);
}

pub fn get_poll(env: &Env, poll_id: u64) -> Result<Poll, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Poll(poll_id))
        .ok_or(Error::PollNotFound)
}

// ── Options ──────────────────────────────────────────────────────────────────

pub fn save_option_label(env: &Env, poll_id: u64, index: u32, label: &String) {
    let key = DataKey::OptionLabel(poll_id, index);
    env.storage().persistent().set(&key, label);
    extend(env, &key);
}

pub fn get_option_label(env: &Env, poll_id: u64, index: u32) -> Result<String, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::OptionLabel(poll_id, index))
        .ok_or(Error::InvalidOption)
}

pub fn get_option_votes(env: &Env, poll_id: u64, index: u32) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::OptionVotes(poll_id, index))
        .unwrap_or(0u32)
}

pub fn set_option_votes(env: &Env, poll_id: u64, index: u32, votes: u32) {
    let key = DataKey::OptionVotes(poll_id, index);
    env.storage().persistent().set(&key, &votes);
    extend(env, &key);
}

// ── Votes ────────────────────────────────────────────────────────────────────

/// Write the vote record together with its has-voted flag. Both land in the
/// same invocation, so they commit or abort as one unit.
pub fn save_vote(env: &Env, poll_id: u64, vote: &VoteRecord) {
    let vote_key = DataKey::Vote(poll_id, vote.voter.clone());
    env.storage().persistent().set(&vote_key, vote);
    extend(env, &vote_key);

    let flag_key = DataKey::HasVoted(poll_id, vote.voter.clone());
    env.storage().persistent().set(&flag_key, &true);
    extend(env, &flag_key);
}

pub fn get_vote(env: &Env, poll_id: u64, voter: &Address) -> Result<VoteRecord, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Vote(poll_id, voter.clone()))
        .ok_or(Error::VoteNotFound)
}

pub fn has_voted(env: &Env, poll_id: u64, voter: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::HasVoted(poll_id, voter.clone()))
        .unwrap_or(false)
}

// ── Poll voter index ─────────────────────────────────────────────────────────

pub fn get_poll_voter_count(env: &Env, poll_id: u64) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::PollVoterCount(poll_id))
        .unwrap_or(0u32)
}

pub fn append_poll_voter(env: &Env, poll_id: u64, voter: &Address) {
    let position = get_poll_voter_count(env, poll_id) + 1;
    let key = DataKey::PollVoters(poll_id, position);
    env.storage().persistent().set(&key, voter);
    extend(env, &key);
    env.storage()
        .persistent()
        .set(&DataKey::PollVoterCount(poll_id), &position);
    extend(env, &DataKey::PollVoterCount(poll_id));
}

pub fn get_poll_voter(env: &Env, poll_id: u64, position: u32) -> Option<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::PollVoters(poll_id, position))
}

// ── Creator index ────────────────────────────────────────────────────────────

pub fn get_creator_poll_count(env: &Env, creator: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::CreatorPollCount(creator.clone()))
        .unwrap_or(0u32)
}

pub fn append_creator_poll(env: &Env, creator: &Address, poll_id: u64) {
    let position = get_creator_poll_count(env, creator) + 1;
    let key = DataKey::CreatorPolls(creator.clone(), position);
    env.storage().persistent().set(&key, &poll_id);
    extend(env, &key);
    env.storage()
        .persistent()
        .set(&DataKey::CreatorPollCount(creator.clone()), &position);
    extend(env, &DataKey::CreatorPollCount(creator.clone()));
}

pub fn get_creator_poll(env: &Env, creator: &Address, position: u32) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::CreatorPolls(creator.clone(), position))
}

// ── Voter index ──────────────────────────────────────────────────────────────

pub fn get_voter_poll_count(env: &Env, voter: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::VoterPollCount(voter.clone()))
        .unwrap_or(0u32)
}

pub fn append_voter_poll(env: &Env, voter: &Address, poll_id: u64) {
    let position = get_voter_poll_count(env, voter) + 1;
    let key = DataKey::VoterPolls(voter.clone(), position);
    env.storage().persistent().set(&key, &poll_id);
    extend(env, &key);
    env.storage()
        .persistent()
        .set(&DataKey::VoterPollCount(voter.clone()), &position);
    extend(env, &DataKey::VoterPollCount(voter.clone()));
}

pub fn get_voter_poll(env: &Env, voter: &Address, position: u32) -> Option<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::VoterPolls(voter.clone(), position))
}
