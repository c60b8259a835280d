//! The lowering pass: input machine in, addressed intermediate form out.
//!
//! States are compiled independently, in source order. Within a state the
//! statements are compiled first, each registering a signal for the
//! counter it increments, then the transitions, which read those counters
//! through their signals. Once every state's width is known, label
//! resolution assigns final addresses and rewrites branch targets.
//!
//! # Example
//!
//! ```rust
//! use fsm_ir::core::{Expr, Machine, Operator, State, Statement, StateId, Transition};
//! use fsm_ir::lower;
//!
//! let machine: Machine = Machine {
//!     timers: vec![],
//!     states: vec![
//!         State {
//!             id: StateId::from("start"),
//!             statements: vec![Statement::increment("X", 1)],
//!             transitions: vec![
//!                 Transition::when(Expr::var("X").op(Operator::Rem, 3).op(Operator::Eq, 0), "end"),
//!                 Transition::always("start"),
//!             ],
//!         },
//!         State {
//!             id: StateId::from("end"),
//!             statements: vec![Statement::increment("Y", 1)],
//!             transitions: vec![Transition::always("start")],
//!         },
//!     ],
//! };
//!
//! let ir = lower(&machine).unwrap();
//!
//! assert_eq!(ir.states[0].address, 0);
//! assert_eq!(ir.states[1].address, 9);
//! ```

mod block;
mod error;
mod flatten;
mod resolve;
mod signals;

pub use error::LowerError;

pub(crate) use flatten::{check_identifier, check_leaf};

use crate::config::LowerConfig;
use crate::core::{IrMachine, Machine, State};
use block::BlockCompiler;
use resolve::CompiledState;
use tracing::{debug, instrument};

/// Runs the lowering pass with a fixed register naming.
#[derive(Clone, Debug, Default)]
pub struct Lowerer {
    config: LowerConfig,
}

impl Lowerer {
    pub fn new(config: LowerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LowerConfig {
        &self.config
    }

    /// Lower `machine`. Pure: the input is not modified and repeated calls
    /// give identical results.
    #[instrument(skip_all, fields(states = machine.states.len()))]
    pub fn lower<T: Clone>(&self, machine: &Machine<T>) -> Result<IrMachine<T>, LowerError> {
        let compiled = machine
            .states
            .iter()
            .map(|state| self.compile_state(state))
            .collect::<Result<Vec<_>, _>>()?;

        let states = resolve::resolve(compiled)?;

        Ok(IrMachine {
            timers: machine.timers.clone(),
            states,
        })
    }

    /// Compile one state's blocks; the signal map lives only for this call.
    fn compile_state(&self, state: &State) -> Result<CompiledState, LowerError> {
        let mut compiler = BlockCompiler::new(&self.config, &state.id);
        let mut bodies = Vec::with_capacity(state.statements.len() + state.transitions.len());

        for statement in &state.statements {
            bodies.push(compiler.statement(statement)?);
        }
        for transition in &state.transitions {
            bodies.push(compiler.transition(transition)?);
        }

        let compiled = CompiledState::new(state.id.clone(), bodies)?;
        debug!(state = %compiled.id, width = compiled.width, blocks = compiled.bodies.len(), "state compiled");
        Ok(compiled)
    }
}

/// Lower `machine` with the default register naming.
pub fn lower<T: Clone>(machine: &Machine<T>) -> Result<IrMachine<T>, LowerError> {
    Lowerer::default().lower(machine)
}
