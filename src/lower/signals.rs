//! Per-state map from counters to the signal registers produced for them.

use crate::config::LowerConfig;
use crate::core::Operand;
use std::collections::HashMap;

/// Signals produced so far within one state.
///
/// Created empty for every state and dropped once the state is compiled,
/// so a signal is only visible to blocks that follow it in the same state.
#[derive(Debug)]
pub(crate) struct SignalMap<'c> {
    config: &'c LowerConfig,
    signals: HashMap<String, String>,
}

impl<'c> SignalMap<'c> {
    pub(crate) fn new(config: &'c LowerConfig) -> Self {
        Self {
            config,
            signals: HashMap::new(),
        }
    }

    /// Record that `counter` now has a pulse register and return its name.
    pub(crate) fn register(&mut self, counter: &str) -> String {
        let signal = self.config.signal_register(counter);
        self.signals.insert(counter.to_string(), signal.clone());
        signal
    }

    /// Read `operand` through its signal register if one exists.
    pub(crate) fn substitute(&self, operand: &Operand) -> Operand {
        match operand {
            Operand::Name(name) => match self.signals.get(name) {
                Some(signal) => Operand::Name(signal.clone()),
                None => operand.clone(),
            },
            Operand::Literal(_) => operand.clone(),
        }
    }
}
