//! Build errors for machine, state and configuration builders.

use thiserror::Error;

/// Errors that can occur when building machines, states and configurations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("State id not specified. Call .id(label) before .build()")]
    MissingStateId,

    #[error("No states defined. Add at least one state")]
    NoStates,

    #[error("Register name `{field}` must not be empty")]
    EmptyRegisterName { field: &'static str },

    #[error("Register names `{first}` and `{second}` overlap")]
    RegisterCollision { first: String, second: String },
}
