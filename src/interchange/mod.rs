//! JSON reading and writing of machines and their intermediate form.
//!
//! The parser hands machines over as JSON and the instruction emitter
//! reads the intermediate form back as JSON. Both shapes are the serde
//! representations of the types in [`core`](crate::core).

use crate::core::{IrMachine, Machine};
use crate::lower::Lowerer;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod error;

pub use error::InterchangeError;

/// Read a parsed machine.
pub fn machine_from_json<T: DeserializeOwned>(json: &str) -> Result<Machine<T>, InterchangeError> {
    serde_json::from_str(json).map_err(|e| InterchangeError::DeserializationFailed(e.to_string()))
}

/// Read a lowered machine.
pub fn ir_from_json<T: DeserializeOwned>(json: &str) -> Result<IrMachine<T>, InterchangeError> {
    serde_json::from_str(json).map_err(|e| InterchangeError::DeserializationFailed(e.to_string()))
}

/// Write any tree as compact JSON.
pub fn to_json<S: Serialize>(value: &S) -> Result<String, InterchangeError> {
    serde_json::to_string(value).map_err(|e| InterchangeError::SerializationFailed(e.to_string()))
}

/// Write any tree as indented JSON.
pub fn to_json_pretty<S: Serialize>(value: &S) -> Result<String, InterchangeError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| InterchangeError::SerializationFailed(e.to_string()))
}

/// Read a machine, lower it with `lowerer` and write the result.
/// Timers are kept as raw JSON values.
pub fn compile_json(lowerer: &Lowerer, json: &str) -> Result<String, InterchangeError> {
    let machine: Machine = machine_from_json(json)?;
    let ir = lowerer.lower(&machine)?;
    to_json(&ir)
}
