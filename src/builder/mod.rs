//! Builder API for constructing input machines in code.
//!
//! Parsers normally hand the pass a deserialized [`Machine`]; these
//! builders are for tests, tools and embedders that assemble one directly.
//!
//! # Example
//!
//! ```
//! use fsm_ir::builder::{MachineBuilder, StateBuilder};
//! use fsm_ir::core::{Expr, Operator};
//!
//! let machine = MachineBuilder::<()>::new()
//!     .state(
//!         StateBuilder::new()
//!             .id("start")
//!             .increment("X", 1)
//!             .goto_if(Expr::var("X").op(Operator::Rem, 3).op(Operator::Eq, 0), "end")
//!             .goto("start"),
//!     )?
//!     .state(StateBuilder::new().id("end").increment("Y", 1).goto("start"))?
//!     .build()?;
//!
//! assert_eq!(machine.states.len(), 2);
//! # Ok::<(), fsm_ir::builder::BuildError>(())
//! ```
//!
//! [`Machine`]: crate::core::Machine

pub mod error;
pub mod machine;
pub mod state;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use state::StateBuilder;
