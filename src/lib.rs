//! fsm-ir: lowers counter/transition state machines into an addressed
//! intermediate form.
//!
//! The pass sits between a parser and a target-specific instruction
//! emitter. It is a pure function from one tree to another: no I/O, no
//! shared state, and the same input always lowers to the same output.
//!
//! # Core Concepts
//!
//! - **Block**: the compiled form of one statement or one transition, a
//!   contiguous run of addressed op-steps
//! - **Signal**: the pulse register `signal_X = GUARD * k` produced when a
//!   state increments counter `X`; later transitions of the same state read
//!   `X` through it
//! - **Guard**: the gate register each block opens with a `GuardBegin`
//! - **Label resolution**: numeric state ids are kept as addresses, symbolic
//!   ids are packed after them
//!
//! # Example
//!
//! ```rust
//! use fsm_ir::builder::{MachineBuilder, StateBuilder};
//! use fsm_ir::core::{Expr, Operator};
//! use fsm_ir::lower;
//!
//! let machine = MachineBuilder::<()>::new()
//!     .state(
//!         StateBuilder::new()
//!             .id(10)
//!             .increment("X", 1)
//!             .goto_if(Expr::var("X").op(Operator::Rem, 3).op(Operator::Eq, 0), 20)
//!             .goto(10),
//!     )?
//!     .state(StateBuilder::new().id(20).increment("Y", 1).goto(10))?
//!     .build()?;
//!
//! let ir = lower(&machine)?;
//!
//! let starts: Vec<u32> = ir.states[0].blocks.iter().map(|b| b.start).collect();
//! assert_eq!(starts, vec![10, 12, 16]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod interchange;
pub mod lower;
pub mod verify;

// Re-export commonly used types
pub use config::LowerConfig;
pub use core::{IrMachine, Machine};
pub use lower::{lower, LowerError, Lowerer};
