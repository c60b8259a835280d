//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::core::{Machine, State};

/// Builder for constructing a [`Machine`] with a fluent API.
pub struct MachineBuilder<T = serde_json::Value> {
    timers: Vec<T>,
    states: Vec<State>,
}

impl<T> MachineBuilder<T> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Add a timer. Timers are carried through lowering untouched.
    pub fn timer(mut self, timer: T) -> Self {
        self.timers.push(timer);
        self
    }

    /// Add a state using a builder.
    /// Returns an error if the builder fails validation.
    pub fn state(mut self, builder: StateBuilder) -> Result<Self, BuildError> {
        let state = builder.build()?;
        self.states.push(state);
        Ok(self)
    }

    /// Add a pre-built state.
    pub fn add_state(mut self, state: State) -> Self {
        self.states.push(state);
        self
    }

    /// Add multiple states at once.
    pub fn states(mut self, states: Vec<State>) -> Self {
        self.states.extend(states);
        self
    }

    /// Build the machine.
    /// Returns an error if no state was added.
    pub fn build(self) -> Result<Machine<T>, BuildError> {
        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        Ok(Machine {
            timers: self.timers,
            states: self.states,
        })
    }
}

impl<T> Default for MachineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
