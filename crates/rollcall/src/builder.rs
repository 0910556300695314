//! `RollcallBuilder`: wires collaborators and configuration into an engine.

use rollcall_biometrics::FaceMatcher;
use rollcall_directory::GroupDirectory;
use rollcall_engine::{AttendanceEngine, EngineConfig};
use rollcall_store::SessionStore;

use crate::RollcallError;

/// Entry point of the facade.
pub struct Rollcall;

impl Rollcall {
    /// Creates a new builder.
    pub fn builder() -> RollcallBuilder {
        RollcallBuilder::new()
    }
}

/// Builder for configuring an [`AttendanceEngine`].
///
/// # Example
///
/// ```rust,ignore
/// use rollcall::prelude::*;
///
/// let engine = Rollcall::builder()
///     .max_commit_attempts(4)
///     .build(MemoryDirectory::new(), my_matcher, MemorySessionStore::new());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RollcallBuilder {
    config: EngineConfig,
}

impl RollcallBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole engine configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the engine configuration from a TOML document.
    pub fn config_toml(mut self, source: &str) -> Result<Self, RollcallError> {
        self.config = EngineConfig::from_toml_str(source)?;
        Ok(self)
    }

    /// Sets how many conditional-write rounds a mutation may take.
    pub fn max_commit_attempts(mut self, attempts: u32) -> Self {
        self.config.max_commit_attempts = attempts;
        self
    }

    /// Builds the engine around the given collaborators.
    pub fn build<D, M, S>(self, directory: D, matcher: M, store: S) -> AttendanceEngine<D, M, S>
    where
        D: GroupDirectory,
        M: FaceMatcher,
        S: SessionStore,
    {
        tracing::debug!(config = ?self.config, "building attendance engine");
        AttendanceEngine::new(directory, matcher, store, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = Rollcall::builder();
        assert_eq!(builder.config, EngineConfig::default());
    }

    #[test]
    fn test_builder_config_toml_overrides_defaults() {
        let builder = Rollcall::builder()
            .config_toml("retry_jitter_ms = 0\nmax_commit_attempts = 3")
            .unwrap();
        assert_eq!(builder.config.max_commit_attempts, 3);
        assert_eq!(builder.config.retry_jitter_ms, 0);
        assert_eq!(builder.config.retry_backoff_ms, 2);
    }

    #[test]
    fn test_builder_config_toml_rejects_garbage() {
        let result = Rollcall::builder().config_toml("max_commit_attempts = [");
        assert!(matches!(result, Err(RollcallError::Config(_))));
    }

    #[test]
    fn test_builder_max_commit_attempts() {
        let builder = Rollcall::builder().max_commit_attempts(2);
        assert_eq!(builder.config.max_commit_attempts, 2);
    }
}
