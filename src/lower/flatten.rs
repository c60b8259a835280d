//! Expression flattening into three-address computes.
//!
//! Nodes are reduced post-order. Each internal node becomes one
//! [`Compute`] whose result lives in a block-scoped temp register
//! (`INT_A`, `INT_B`, ... in first-use order). A node whose left (else
//! right) operand was produced by a node of the current block writes back
//! into that temp instead of taking a fresh one. Whether an operand is a
//! temp follows from how it was produced, never from its name, so a user
//! variable spelled like a temp is read, not overwritten.

use super::error::LowerError;
use super::signals::SignalMap;
use crate::core::{Compute, Expr, Operand, Operator, StateId};

/// Checks that `name` can be used as a variable. Names come from the
/// parser as-is; only the empty name is rejected.
pub(crate) fn check_identifier(name: &str) -> Result<(), String> {
    if name.is_empty() {
        Err("empty variable name".to_string())
    } else {
        Ok(())
    }
}

pub(crate) fn check_leaf(operand: &Operand) -> Result<(), String> {
    match operand {
        Operand::Literal(_) => Ok(()),
        Operand::Name(name) => check_identifier(name),
    }
}

/// Spreadsheet-style suffix: 0 -> A, 25 -> Z, 26 -> AA.
fn temp_suffix(mut index: usize) -> String {
    let mut suffix = Vec::new();
    loop {
        suffix.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    suffix.iter().rev().map(|&b| b as char).collect()
}

/// Block-scoped temp register allocator.
#[derive(Debug)]
pub(crate) struct TempAllocator<'c> {
    prefix: &'c str,
    issued: usize,
}

impl<'c> TempAllocator<'c> {
    pub(crate) fn new(prefix: &'c str) -> Self {
        Self { prefix, issued: 0 }
    }

    pub(crate) fn fresh(&mut self) -> String {
        let name = format!("{}{}", self.prefix, temp_suffix(self.issued));
        self.issued += 1;
        name
    }
}

/// A reduced sub-expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Reduced {
    /// Result register of a compute emitted for this block.
    Temp(String),
    /// A leaf, already read through the signal map.
    Value(Operand),
}

impl Reduced {
    fn temp(&self) -> Option<&str> {
        match self {
            Self::Temp(name) => Some(name),
            Self::Value(_) => None,
        }
    }

    pub(crate) fn into_operand(self) -> Operand {
        match self {
            Self::Temp(name) => Operand::Name(name),
            Self::Value(operand) => operand,
        }
    }
}

/// Flattens the expressions of one block.
pub(crate) struct Flattener<'a> {
    state: &'a StateId,
    signals: &'a SignalMap<'a>,
    temps: TempAllocator<'a>,
    steps: Vec<Compute>,
}

impl<'a> Flattener<'a> {
    pub(crate) fn new(state: &'a StateId, signals: &'a SignalMap<'a>, temp_prefix: &'a str) -> Self {
        Self {
            state,
            signals,
            temps: TempAllocator::new(temp_prefix),
            steps: Vec::new(),
        }
    }

    /// Validate a leaf and read it through the signal map.
    pub(crate) fn leaf(&self, operand: &Operand) -> Result<Operand, LowerError> {
        check_leaf(operand).map_err(|reason| LowerError::malformed(self.state, reason))?;
        Ok(self.signals.substitute(operand))
    }

    pub(crate) fn fresh_temp(&mut self) -> String {
        self.temps.fresh()
    }

    /// Reduce `expr`, emitting a compute per internal node.
    pub(crate) fn reduce(&mut self, expr: &Expr) -> Result<Reduced, LowerError> {
        match expr {
            Expr::Leaf(operand) => self.leaf(operand).map(Reduced::Value),
            Expr::Binary {
                left,
                right,
                operator,
            } => {
                let compute = self.node(left, right, operator.clone())?;
                let out = Reduced::Temp(compute.out.clone());
                self.steps.push(compute);
                Ok(out)
            }
        }
    }

    /// Reduce both children and build, without emitting, the node's compute.
    pub(crate) fn node(
        &mut self,
        left: &Expr,
        right: &Expr,
        operator: Operator,
    ) -> Result<Compute, LowerError> {
        let left = self.reduce(left)?;
        let right = self.reduce(right)?;

        let out = match left.temp().or_else(|| right.temp()) {
            Some(temp) => temp.to_string(),
            None => self.temps.fresh(),
        };
        let (left, right) = (left.into_operand(), right.into_operand());
        let count_from_input = (operator.is_comparison() && right.is_literal()).then_some(false);

        Ok(Compute {
            left,
            right,
            operator,
            count_from_input,
            out,
        })
    }

    /// Computes emitted so far, in evaluation order.
    pub(crate) fn into_steps(self) -> Vec<Compute> {
        self.steps
    }
}
