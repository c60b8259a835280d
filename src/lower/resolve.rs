//! Label resolution: final addresses for states, blocks and branch targets.
//!
//! Numeric ids are trusted as explicit addresses. Symbolic ids are packed,
//! in source order, from one past the furthest numeric state (or from 0
//! when there is none), leaving one reserved slot after every symbolic
//! state.

use super::block::BlockBody;
use super::error::LowerError;
use crate::core::{Address, Block, IrState, StateId};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// A state whose blocks are compiled but not yet placed.
#[derive(Debug)]
pub(crate) struct CompiledState {
    pub(crate) id: StateId,
    pub(crate) bodies: Vec<BlockBody>,
    pub(crate) width: Address,
}

impl CompiledState {
    pub(crate) fn new(id: StateId, bodies: Vec<BlockBody>) -> Result<Self, LowerError> {
        let width = bodies
            .iter()
            .try_fold(0 as Address, |total, body| {
                Address::try_from(body.len())
                    .ok()
                    .and_then(|width| total.checked_add(width))
            })
            .ok_or_else(|| LowerError::AddressOverflow { state: id.clone() })?;

        Ok(Self { id, bodies, width })
    }

    fn end(&self, address: Address) -> Result<Address, LowerError> {
        address
            .checked_add(self.width)
            .ok_or_else(|| LowerError::AddressOverflow {
                state: self.id.clone(),
            })
    }

    /// First address after this state and its reserved trailing slot.
    fn next_free(&self, address: Address) -> Result<Address, LowerError> {
        self.end(address)?
            .checked_add(1)
            .ok_or_else(|| LowerError::AddressOverflow {
                state: self.id.clone(),
            })
    }
}

/// Assign every state its final address, then place blocks and rewrite
/// branch targets.
pub(crate) fn resolve(states: Vec<CompiledState>) -> Result<Vec<IrState>, LowerError> {
    let addresses = assign_addresses(&states)?;
    check_collisions(&states, &addresses)?;

    let labels: HashMap<StateId, Address> = states
        .iter()
        .zip(&addresses)
        .map(|(state, &address)| (state.id.clone(), address))
        .collect();

    states
        .into_iter()
        .zip(addresses)
        .map(|(state, address)| place(state, address, &labels))
        .collect()
}

/// Final address of every state, in input order.
pub(crate) fn assign_addresses(states: &[CompiledState]) -> Result<Vec<Address>, LowerError> {
    let mut seen = HashSet::new();
    for state in states {
        if !seen.insert(&state.id) {
            return Err(LowerError::DuplicateLabel {
                label: state.id.clone(),
            });
        }
    }

    let mut baseline: Option<Address> = None;
    for state in states {
        if let Some(address) = state.id.address() {
            let next = state.next_free(address)?;
            baseline = Some(baseline.map_or(next, |current| current.max(next)));
        }
    }
    let mut cursor = baseline.unwrap_or(0);
    debug!(baseline = cursor, "symbolic baseline");

    let mut addresses = Vec::with_capacity(states.len());
    for state in states {
        let address = match state.id.address() {
            Some(address) => address,
            None => {
                let address = cursor;
                cursor = state.next_free(address)?;
                address
            }
        };
        trace!(state = %state.id, address, width = state.width, "address assigned");
        addresses.push(address);
    }

    Ok(addresses)
}

/// Fails if two states' address ranges overlap. An empty state still
/// occupies its own address.
pub(crate) fn check_collisions(
    states: &[CompiledState],
    addresses: &[Address],
) -> Result<(), LowerError> {
    let mut spans = states
        .iter()
        .zip(addresses)
        .map(|(state, &address)| -> Result<_, LowerError> {
            let end = state.end(address)?;
            Ok((address, end.max(address.saturating_add(1)), state))
        })
        .collect::<Result<Vec<_>, _>>()?;
    spans.sort_by_key(|&(start, _, _)| start);

    let mut furthest: Option<(Address, &CompiledState)> = None;
    for (start, end, state) in spans {
        if let Some((reach, owner)) = furthest {
            if start < reach {
                return Err(LowerError::AddressCollision {
                    first: owner.id.clone(),
                    second: state.id.clone(),
                    address: start,
                });
            }
        }
        if furthest.map_or(true, |(reach, _)| end > reach) {
            furthest = Some((end, state));
        }
    }

    Ok(())
}

/// Lay blocks out back to back from `address` and resolve their branches.
fn place(
    state: CompiledState,
    address: Address,
    labels: &HashMap<StateId, Address>,
) -> Result<IrState, LowerError> {
    let CompiledState { id, bodies, .. } = state;
    let mut resolve = |label: StateId| match labels.get(&label) {
        Some(&target) => Ok(target),
        None => Err(LowerError::UnresolvedLabel {
            label,
            state: id.clone(),
        }),
    };

    let mut start = address;
    let mut blocks = Vec::with_capacity(bodies.len());
    for body in bodies {
        // widths were bounded when the state's total was computed
        let width = body.len() as Address;
        let operations = body
            .into_iter()
            .map(|step| step.try_map_labels(&mut resolve))
            .collect::<Result<Vec<_>, LowerError>>()?;
        blocks.push(Block { start, operations });
        start = start.saturating_add(width);
    }

    Ok(IrState { address, blocks })
}
