//! Input tree: the parsed state machine handed over by the parser.

use super::expr::{Expr, Operator};
use super::ir::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared identity of a state.
///
/// Numeric ids are explicit addresses and are kept verbatim by label
/// resolution. Symbolic ids are packed after the numeric ones.
///
/// # Example
///
/// ```rust
/// use fsm_ir::core::StateId;
///
/// assert!(StateId::from(10).is_numeric());
/// assert!(!StateId::from("start").is_numeric());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateId {
    Numeric(Address),
    Symbolic(String),
}

impl StateId {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric(_))
    }

    /// The explicit address, if this id is numeric.
    pub fn address(&self) -> Option<Address> {
        match self {
            Self::Numeric(address) => Some(*address),
            Self::Symbolic(_) => None,
        }
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(address) => write!(f, "{address}"),
            Self::Symbolic(label) => write!(f, "\"{label}\""),
        }
    }
}

impl From<Address> for StateId {
    fn from(address: Address) -> Self {
        Self::Numeric(address)
    }
}

impl From<&str> for StateId {
    fn from(label: &str) -> Self {
        Self::Symbolic(label.to_string())
    }
}

impl From<String> for StateId {
    fn from(label: String) -> Self {
        Self::Symbolic(label)
    }
}

/// `out = left <operator> right`.
///
/// Only increment semantics are lowered: `left` and `operator` are carried
/// for the parser's benefit, the pass reads `right` as the amount and `out`
/// as the counter being incremented.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub left: String,
    pub right: Expr,
    pub operator: Operator,
    pub out: String,
}

impl Statement {
    /// `counter = counter + amount`
    pub fn increment(counter: impl Into<String>, amount: impl Into<Expr>) -> Self {
        let counter = counter.into();
        Self {
            left: counter.clone(),
            right: amount.into(),
            operator: Operator::Add,
            out: counter,
        }
    }
}

/// A possibly guarded jump to another state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Expr>,
    pub goto: StateId,
}

impl Transition {
    pub fn always(goto: impl Into<StateId>) -> Self {
        Self {
            condition: None,
            goto: goto.into(),
        }
    }

    pub fn when(condition: Expr, goto: impl Into<StateId>) -> Self {
        Self {
            condition: Some(condition),
            goto: goto.into(),
        }
    }
}

/// One state of the source machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    #[serde(rename = "state")]
    pub id: StateId,
    #[serde(default)]
    pub statements: Vec<Statement>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

/// A parsed machine. `timers` belong to other stages and are never inspected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Machine<T = serde_json::Value> {
    #[serde(default = "Vec::new")]
    pub timers: Vec<T>,
    pub states: Vec<State>,
}
