//! Lowering errors.

use crate::core::{Address, StateId};
use thiserror::Error;

/// Errors that abort a lowering. No partial output is produced.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LowerError {
    /// A transition targets an id no state declares
    #[error("State {state} jumps to {label}, which is not a state of this machine")]
    UnresolvedLabel { label: StateId, state: StateId },

    /// An operand is neither a valid leaf nor a two-operand node
    #[error("Malformed expression in state {state}: {reason}")]
    MalformedExpression { state: StateId, reason: String },

    /// Two states were placed over the same addresses
    #[error("States {first} and {second} overlap at address {address}")]
    AddressCollision {
        first: StateId,
        second: StateId,
        address: Address,
    },

    /// Two states declare the same id
    #[error("State id {label} is declared more than once")]
    DuplicateLabel { label: StateId },

    /// Address arithmetic left the address space
    #[error("Addresses of state {state} exceed the address space")]
    AddressOverflow { state: StateId },
}

impl LowerError {
    pub(crate) fn malformed(state: &StateId, reason: impl Into<String>) -> Self {
        Self::MalformedExpression {
            state: state.clone(),
            reason: reason.into(),
        }
    }
}
