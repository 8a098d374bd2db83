//! Configuration for live-preview.
//!
//! This module provides runtime configuration for the preview pipeline.
//! Use [`ConfigBuilder`] at application startup to set the frame's sandbox
//! policy and how faults from superseded renders are handled.

use std::sync::OnceLock;

use crate::fault::StaleFaultPolicy;
use crate::host::SandboxPolicy;

/// Global configuration, initialized via [`ConfigBuilder::init`].
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Runtime configuration for live-preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Capabilities granted to the preview frame.
    /// Default: `allow-scripts allow-same-origin`
    pub sandbox: SandboxPolicy,
    /// Treatment of faults posted by superseded renders.
    pub stale_faults: StaleFaultPolicy,
    /// Whether the fault-capture preamble is injected.
    pub instrument: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sandbox: SandboxPolicy::default(),
            stale_faults: StaleFaultPolicy::default(),
            instrument: true,
        }
    }
}

/// Configuration builder for fluent API.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    sandbox: Option<SandboxPolicy>,
    stale_faults: Option<StaleFaultPolicy>,
    instrument: Option<bool>,
}

impl ConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frame's capability allow-list.
    ///
    /// # Example
    ///
    /// ```
    /// use live_preview::config::ConfigBuilder;
    /// use live_preview::{Capability, SandboxPolicy};
    ///
    /// let config = ConfigBuilder::new()
    ///     .sandbox(SandboxPolicy::default().allow(Capability::Modals))
    ///     .build();
    /// assert!(config.sandbox.allows(Capability::Modals));
    /// ```
    pub fn sandbox(mut self, policy: SandboxPolicy) -> Self {
        self.sandbox = Some(policy);
        self
    }

    /// Set the stale-fault policy.
    ///
    /// Default: [`StaleFaultPolicy::Lenient`]
    pub fn stale_faults(mut self, policy: StaleFaultPolicy) -> Self {
        self.stale_faults = Some(policy);
        self
    }

    /// Enable or disable fault-capture instrumentation.
    pub fn instrument(mut self, enabled: bool) -> Self {
        self.instrument = Some(enabled);
        self
    }

    /// Build a configuration without installing it globally.
    pub fn build(self) -> Config {
        let default = Config::default();
        Config {
            sandbox: self.sandbox.unwrap_or(default.sandbox),
            stale_faults: self.stale_faults.unwrap_or(default.stale_faults),
            instrument: self.instrument.unwrap_or(default.instrument),
        }
    }

    /// Build and initialize the global configuration.
    ///
    /// This can only be called once. Subsequent calls are ignored.
    /// Returns `true` if configuration was set, `false` if already initialized.
    pub fn init(self) -> bool {
        CONFIG.set(self.build()).is_ok()
    }
}

/// Initialize live-preview with default configuration.
///
/// This is equivalent to `ConfigBuilder::new().init()`.
pub fn init_default() -> bool {
    ConfigBuilder::new().init()
}

/// Get the current configuration, or default if not initialized.
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sandbox.to_string(), "allow-scripts allow-same-origin");
        assert_eq!(config.stale_faults, StaleFaultPolicy::Lenient);
        assert!(config.instrument);
    }

    #[test]
    fn test_builder() {
        let config = ConfigBuilder::new()
            .stale_faults(StaleFaultPolicy::RejectStale)
            .instrument(false)
            .build();
        assert_eq!(config.stale_faults, StaleFaultPolicy::RejectStale);
        assert!(!config.instrument);
        assert_eq!(config.sandbox, SandboxPolicy::default());
    }
}
