//! Output tree: addressed blocks of op-steps.
//!
//! Op-step shapes are generic over the branch label `L`. While blocks are
//! being compiled, branches still point at a declared [`StateId`]; after
//! label resolution every label is an [`Address`].
//!
//! [`StateId`]: super::StateId

use super::expr::{Operand, Operator};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// A concrete slot in the target's program space.
pub type Address = u32;

/// Opens an unconditional (true) gate for the op-steps that follow.
///
/// Written as `{ "guard": true }`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GuardBegin;

impl Serialize for GuardBegin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("guard", &true)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for GuardBegin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Repr {
            guard: bool,
        }

        let repr = Repr::deserialize(deserializer)?;
        if repr.guard {
            Ok(GuardBegin)
        } else {
            Err(de::Error::custom("guard must be true"))
        }
    }
}

/// Three-address compute: `out = left <operator> right`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Compute {
    pub left: Operand,
    pub right: Operand,
    pub operator: Operator,
    /// Present only on comparisons against a literal, and only ever `false`.
    #[serde(
        rename = "countFromInput",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub count_from_input: Option<bool>,
    pub out: String,
}

/// Jump to `goto` when register `branch` is set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Branch<L = Address> {
    pub branch: String,
    pub goto: L,
}

/// A single micro-operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MicroOp<L = Address> {
    Guard(GuardBegin),
    Compute(Compute),
    Branch(Branch<L>),
}

/// Micro-ops sharing one address. Never empty once compiled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpStep<L = Address>(pub Vec<MicroOp<L>>);

impl<L> OpStep<L> {
    pub fn single(op: MicroOp<L>) -> Self {
        Self(vec![op])
    }

    pub fn guard() -> Self {
        Self::single(MicroOp::Guard(GuardBegin))
    }

    pub fn compute(compute: Compute) -> Self {
        Self::single(MicroOp::Compute(compute))
    }

    pub fn branch(register: impl Into<String>, goto: L) -> Self {
        Self::single(MicroOp::Branch(Branch {
            branch: register.into(),
            goto,
        }))
    }

    pub fn ops(&self) -> &[MicroOp<L>] {
        &self.0
    }

    /// Rewrite every branch label, failing on the first label `f` rejects.
    pub fn try_map_labels<M, E, F>(self, f: &mut F) -> Result<OpStep<M>, E>
    where
        F: FnMut(L) -> Result<M, E>,
    {
        self.0
            .into_iter()
            .map(|op| match op {
                MicroOp::Guard(guard) => Ok(MicroOp::Guard(guard)),
                MicroOp::Compute(compute) => Ok(MicroOp::Compute(compute)),
                MicroOp::Branch(Branch { branch, goto }) => Ok(MicroOp::Branch(Branch {
                    branch,
                    goto: f(goto)?,
                })),
            })
            .collect::<Result<Vec<_>, E>>()
            .map(OpStep)
    }
}

/// The compiled form of one statement or transition, placed at `start`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block<L = Address> {
    pub start: Address,
    pub operations: Vec<OpStep<L>>,
}

impl<L> Block<L> {
    /// Number of addresses the block occupies.
    pub fn width(&self) -> usize {
        self.operations.len()
    }
}

/// A resolved state: its final address and its blocks in source order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrState {
    #[serde(rename = "state")]
    pub address: Address,
    #[serde(rename = "statements")]
    pub blocks: Vec<Block>,
}

impl IrState {
    pub fn width(&self) -> usize {
        self.blocks.iter().map(Block::width).sum()
    }
}

/// Result of lowering a [`Machine`](super::Machine). `timers` are the
/// input's timers, untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IrMachine<T = serde_json::Value> {
    #[serde(default = "Vec::new")]
    pub timers: Vec<T>,
    pub states: Vec<IrState>,
}
