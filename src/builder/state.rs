//! Builder for constructing states.

use crate::builder::error::BuildError;
use crate::core::{Expr, State, Statement, StateId, Transition};

/// Builder for constructing a [`State`] with a fluent API.
///
/// Statements and transitions keep the order in which they are added.
pub struct StateBuilder {
    id: Option<StateId>,
    statements: Vec<Statement>,
    transitions: Vec<Transition>,
}

impl StateBuilder {
    /// Create a new state builder.
    pub fn new() -> Self {
        Self {
            id: None,
            statements: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Set the state's id (required).
    pub fn id(mut self, id: impl Into<StateId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add `counter = counter + amount`.
    pub fn increment(mut self, counter: impl Into<String>, amount: impl Into<Expr>) -> Self {
        self.statements.push(Statement::increment(counter, amount));
        self
    }

    /// Add a pre-built statement.
    pub fn statement(mut self, statement: Statement) -> Self {
        self.statements.push(statement);
        self
    }

    /// Add an unconditional transition.
    pub fn goto(mut self, target: impl Into<StateId>) -> Self {
        self.transitions.push(Transition::always(target));
        self
    }

    /// Add a transition taken when `condition` holds.
    pub fn goto_if(mut self, condition: Expr, target: impl Into<StateId>) -> Self {
        self.transitions.push(Transition::when(condition, target));
        self
    }

    /// Build the state.
    /// Returns an error if the id is missing.
    pub fn build(self) -> Result<State, BuildError> {
        let id = self.id.ok_or(BuildError::MissingStateId)?;

        Ok(State {
            id,
            statements: self.statements,
            transitions: self.transitions,
        })
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
