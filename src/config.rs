//! Register naming used by the lowering pass.
//!
//! The defaults (`GUARD`, `signal_`, `INT_`) are what the downstream
//! emitter expects. Other emitters can pick their own names through
//! [`LowerConfigBuilder`].

use crate::builder::BuildError;

pub const DEFAULT_GUARD_REGISTER: &str = "GUARD";
pub const DEFAULT_SIGNAL_PREFIX: &str = "signal_";
pub const DEFAULT_TEMP_PREFIX: &str = "INT_";

/// Naming of the registers the pass introduces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LowerConfig {
    pub(crate) guard_register: String,
    pub(crate) signal_prefix: String,
    pub(crate) temp_prefix: String,
}

impl LowerConfig {
    pub fn builder() -> LowerConfigBuilder {
        LowerConfigBuilder::new()
    }

    pub fn guard_register(&self) -> &str {
        &self.guard_register
    }

    pub fn signal_prefix(&self) -> &str {
        &self.signal_prefix
    }

    /// Prefix of block-scoped temp registers (`INT_A`, `INT_B`, ...).
    ///
    /// The pass never reads a user variable as one of its temps, but temps
    /// and user variables share one register namespace at run time. A
    /// machine that names its own variables `INT_A` and the like will see
    /// them clobbered by conditions; pick a prefix no variable starts with.
    pub fn temp_prefix(&self) -> &str {
        &self.temp_prefix
    }

    /// Register holding the pulse produced for `counter`.
    pub fn signal_register(&self, counter: &str) -> String {
        format!("{}{}", self.signal_prefix, counter)
    }
}

impl Default for LowerConfig {
    fn default() -> Self {
        Self {
            guard_register: DEFAULT_GUARD_REGISTER.to_string(),
            signal_prefix: DEFAULT_SIGNAL_PREFIX.to_string(),
            temp_prefix: DEFAULT_TEMP_PREFIX.to_string(),
        }
    }
}

/// Builder for [`LowerConfig`].
///
/// # Example
///
/// ```rust
/// use fsm_ir::config::LowerConfig;
///
/// let config = LowerConfig::builder()
///     .guard_register("G")
///     .temp_prefix("T")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.guard_register(), "G");
/// assert_eq!(config.signal_prefix(), "signal_");
/// ```
pub struct LowerConfigBuilder {
    guard_register: String,
    signal_prefix: String,
    temp_prefix: String,
}

impl LowerConfigBuilder {
    pub fn new() -> Self {
        let defaults = LowerConfig::default();
        Self {
            guard_register: defaults.guard_register,
            signal_prefix: defaults.signal_prefix,
            temp_prefix: defaults.temp_prefix,
        }
    }

    /// Name of the gate register opened by every guard step.
    pub fn guard_register(mut self, name: impl Into<String>) -> Self {
        self.guard_register = name.into();
        self
    }

    /// Prefix prepended to a counter's name to form its signal register.
    pub fn signal_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.signal_prefix = prefix.into();
        self
    }

    /// Prefix of block-scoped temp registers. See
    /// [`LowerConfig::temp_prefix`] for how it interacts with user variables.
    pub fn temp_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.temp_prefix = prefix.into();
        self
    }

    /// Build the configuration.
    /// Returns an error if a name is empty or two names could collide.
    pub fn build(self) -> Result<LowerConfig, BuildError> {
        for (field, value) in [
            ("guard_register", &self.guard_register),
            ("signal_prefix", &self.signal_prefix),
            ("temp_prefix", &self.temp_prefix),
        ] {
            if value.is_empty() {
                return Err(BuildError::EmptyRegisterName { field });
            }
        }

        let overlaps = |a: &str, b: &str| a.starts_with(b) || b.starts_with(a);
        if overlaps(&self.signal_prefix, &self.temp_prefix) {
            return Err(BuildError::RegisterCollision {
                first: self.signal_prefix,
                second: self.temp_prefix,
            });
        }
        for prefix in [&self.signal_prefix, &self.temp_prefix] {
            if self.guard_register.starts_with(prefix.as_str()) {
                return Err(BuildError::RegisterCollision {
                    first: self.guard_register.clone(),
                    second: prefix.clone(),
                });
            }
        }

        Ok(LowerConfig {
            guard_register: self.guard_register,
            signal_prefix: self.signal_prefix,
            temp_prefix: self.temp_prefix,
        })
    }
}

impl Default for LowerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
