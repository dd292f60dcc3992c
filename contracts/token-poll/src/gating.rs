//! Token-gated participation checks.
//!
//! A gate restricts poll participation to holders of a credential: a minimum
//! fungible token balance, ownership of a specific non-fungible token, or a
//! minimum owned count of non-fungible tokens. All credential reads are
//! synchronous cross-contract calls; an unavailable credential contract traps
//! the enclosing invocation.

use soroban_sdk::{contractclient, token, Address, Env};

use crate::errors::Error;
use crate::types::{GateKind, PollGate};

/// Minimal non-fungible credential interface.
#[contractclient(name = "NonFungibleClient")]
pub trait NonFungible {
    /// Number of tokens held by `owner`.
    fn balance_of(env: Env, owner: Address) -> u32;
    /// Current owner of `token_id`. Traps if the token does not exist.
    fn owner_of(env: Env, token_id: u32) -> Address;
}

/// Normalize and validate a creator-supplied gate at creation time.
///
/// Absent, disabled, or kind-`None` input normalizes to the disabled gate.
/// An enabled gate must name a credential contract, and the creator must
/// already satisfy it. Runs once; the creator is never re-checked.
pub fn process_gate(
    env: &Env,
    creator: &Address,
    input: Option<PollGate>,
) -> Result<PollGate, Error> {
    let input = match input {
        Some(gate) if gate.enabled => gate,
        _ => return Ok(PollGate::disabled()),
    };

    let gate = match input.kind {
        GateKind::None => return Ok(PollGate::disabled()),
        GateKind::FungibleToken => PollGate {
            enabled: true,
            kind: GateKind::FungibleToken,
            token: Some(input.token.clone().ok_or(Error::InvalidGateConfig)?),
            threshold: normalize_threshold(input.threshold),
            token_id: None,
        },
        GateKind::NonFungibleToken => PollGate {
            enabled: true,
            kind: GateKind::NonFungibleToken,
            token: Some(input.token.clone().ok_or(Error::InvalidGateConfig)?),
            threshold: match input.token_id {
                Some(_) => input.threshold,
                None => normalize_threshold(input.threshold),
            },
            token_id: input.token_id,
        },
    };

    if !holds_credential(env, creator, &gate) {
        return Err(Error::IneligibleCreator);
    }

    Ok(gate)
}

/// Voter-side eligibility check, invoked exactly once per vote before any
/// state mutation. No-op for disabled gates.
pub fn check_voter(env: &Env, voter: &Address, gate: &PollGate) -> Result<(), Error> {
    if !gate.enabled {
        return Ok(());
    }
    if holds_credential(env, voter, gate) {
        Ok(())
    } else {
        Err(Error::IneligibleVoter)
    }
}

fn normalize_threshold(threshold: i128) -> i128 {
    if threshold <= 0 {
        1
    } else {
        threshold
    }
}

fn holds_credential(env: &Env, identity: &Address, gate: &PollGate) -> bool {
    let contract = match &gate.token {
        Some(address) => address.clone(),
        None => return true,
    };
    match gate.kind {
        GateKind::None => true,
        GateKind::FungibleToken => {
            token::Client::new(env, &contract).balance(identity) >= gate.threshold
        }
        GateKind::NonFungibleToken => {
            let client = NonFungibleClient::new(env, &contract);
            match gate.token_id {
                Some(token_id) => client.owner_of(&token_id) == *identity,
                None => i128::from(client.balance_of(identity)) >= gate.threshold,
            }
        }
    }
}
