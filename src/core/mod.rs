//! Core data model of the lowering pass.
//!
//! This module contains the two trees the pass maps between:
//! - The input machine (`Machine`, `State`, `Statement`, `Transition`, `Expr`)
//! - The addressed intermediate form (`IrMachine`, `IrState`, `Block`, `OpStep`, `MicroOp`)
//!
//! Both trees are plain data: every type is `Clone`, comparable and
//! serializable in the shape the neighbouring parser and emitter exchange.

mod expr;
mod ir;
mod machine;

pub use expr::{Expr, Operand, Operator};
pub use ir::{Address, Block, Branch, Compute, GuardBegin, IrMachine, IrState, MicroOp, OpStep};
pub use machine::{Machine, State, Statement, StateId, Transition};
