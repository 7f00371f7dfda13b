//! BuildState entity - the realized config of the last successful run
//!
//! Owned by whoever orchestrates pipeline runs. `NoBuildYet` only exists
//! until the first success; afterwards every success replaces the held config.

use super::build_config::BuildConfig;

/// Outcome of the most recent successful pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BuildState {
    /// No run has succeeded yet
    #[default]
    NoBuildYet,
    /// The config realized by the last successful run
    Ready(BuildConfig),
}

impl BuildState {
    /// Record a successful run. The previous config is replaced, never merged.
    pub fn record_success(&mut self, config: BuildConfig) {
        *self = BuildState::Ready(config);
    }

    /// The config in effect, if any run has succeeded
    pub fn config(&self) -> Option<&BuildConfig> {
        match self {
            BuildState::NoBuildYet => None,
            BuildState::Ready(config) => Some(config),
        }
    }

    /// Whether a run has succeeded
    pub fn is_ready(&self) -> bool {
        matches!(self, BuildState::Ready(_))
    }
}
