//! Structural checks that report every problem at once.
//!
//! [`lower`](crate::lower()) stops at the first error. `check` walks the
//! whole machine and accumulates ALL problems it can find without
//! assigning addresses, using Stillwater's `Validation`:
//! - malformed expressions in statements and conditions
//! - state ids declared more than once
//! - transitions to ids no state declares
//!
//! Address collisions depend on compiled widths and are only reported by
//! lowering.
//!
//! # Example
//!
//! ```rust
//! use fsm_ir::builder::{MachineBuilder, StateBuilder};
//! use fsm_ir::verify::check;
//!
//! let machine = MachineBuilder::<()>::new()
//!     .state(StateBuilder::new().id("a").increment("", 1).goto("b"))?
//!     .state(StateBuilder::new().id("a").goto("c"))?
//!     .build()?;
//!
//! let result = check(&machine);
//! assert!(result.is_failure());
//! # Ok::<(), fsm_ir::builder::BuildError>(())
//! ```

use crate::core::{Expr, Machine, StateId};
use crate::lower::{check_identifier, check_leaf, LowerError};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub type CheckResult = Validation<(), NonEmptyVec<LowerError>>;

/// Check `machine`, collecting every structural problem.
pub fn check<T>(machine: &Machine<T>) -> CheckResult {
    let mut checks: Vec<CheckResult> = Vec::new();

    let mut declared = HashSet::new();
    for state in &machine.states {
        if !declared.insert(&state.id) {
            checks.push(Validation::fail(LowerError::DuplicateLabel {
                label: state.id.clone(),
            }));
        }
    }

    for state in &machine.states {
        for statement in &state.statements {
            checks.push(outcome(&state.id, check_identifier(&statement.out)));
            match &statement.right {
                Expr::Leaf(operand) => checks.push(outcome(&state.id, check_leaf(operand))),
                Expr::Binary { .. } => checks.push(outcome(
                    &state.id,
                    Err(format!(
                        "increment of `{}` must be a variable or literal",
                        statement.out
                    )),
                )),
            }
        }

        for transition in &state.transitions {
            if let Some(condition) = &transition.condition {
                check_expr(&state.id, condition, &mut checks);
            }
            if !declared.contains(&transition.goto) {
                checks.push(Validation::fail(LowerError::UnresolvedLabel {
                    label: transition.goto.clone(),
                    state: state.id.clone(),
                }));
            }
        }
    }

    if checks.is_empty() {
        return Validation::success(());
    }
    Validation::all_vec(checks).map(|_| ())
}

fn check_expr(state: &StateId, expr: &Expr, checks: &mut Vec<CheckResult>) {
    match expr {
        Expr::Leaf(operand) => checks.push(outcome(state, check_leaf(operand))),
        Expr::Binary { left, right, .. } => {
            check_expr(state, left, checks);
            check_expr(state, right, checks);
        }
    }
}

fn outcome(state: &StateId, result: Result<(), String>) -> CheckResult {
    match result {
        Ok(()) => Validation::success(()),
        Err(reason) => Validation::fail(LowerError::malformed(state, reason)),
    }
}
