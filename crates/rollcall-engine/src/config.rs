//! Engine configuration.

use std::time::Duration;

use rand::Rng;
use serde::Deserialize;
use tracing::warn;

/// Errors raised while loading an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid engine config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tuning knobs for the conditional-write retry loop.
///
/// Every field has a default, so an empty TOML document is valid:
///
/// ```toml
/// max_commit_attempts = 8
/// retry_backoff_ms = 2
/// retry_jitter_ms = 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How many read → write rounds a mutation may take before giving up
    /// with an internal error. Lost races are the only reason to retry.
    pub max_commit_attempts: u32,
    /// Base pause after a lost race; multiplied by the attempt number.
    pub retry_backoff_ms: u64,
    /// Random extra pause (0..=this) so racing writers spread out.
    pub retry_jitter_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_commit_attempts: 8,
            retry_backoff_ms: 2,
            retry_jitter_ms: 3,
        }
    }
}

impl EngineConfig {
    /// Upper bound on `max_commit_attempts`.
    pub const MAX_COMMIT_ATTEMPTS: u32 = 64;

    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        Ok(config.validated())
    }

    /// Clamps out-of-range values so the config is safe to use.
    ///
    /// Called by [`AttendanceEngine::new`](crate::AttendanceEngine::new).
    /// `max_commit_attempts` is kept within `1..=MAX_COMMIT_ATTEMPTS`.
    pub fn validated(mut self) -> Self {
        if self.max_commit_attempts == 0 {
            warn!("max_commit_attempts is 0, using 1");
            self.max_commit_attempts = 1;
        }
        if self.max_commit_attempts > Self::MAX_COMMIT_ATTEMPTS {
            warn!(
                attempts = self.max_commit_attempts,
                max = Self::MAX_COMMIT_ATTEMPTS,
                "max_commit_attempts exceeds maximum, clamping"
            );
            self.max_commit_attempts = Self::MAX_COMMIT_ATTEMPTS;
        }
        self
    }

    /// Pause before retry number `attempt` (1-based).
    pub(crate) fn backoff(&self, attempt: u32) -> Duration {
        let jitter = if self.retry_jitter_ms == 0 {
            0
        } else {
            rand::rng().random_range(0..=self.retry_jitter_ms)
        };
        Duration::from_millis(
            self.retry_backoff_ms
                .saturating_mul(u64::from(attempt))
                .saturating_add(jitter),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.max_commit_attempts, 8);
        assert_eq!(config.retry_backoff_ms, 2);
        assert_eq!(config.retry_jitter_ms, 3);
    }

    #[test]
    fn test_validated_clamps_zero_attempts() {
        let config = EngineConfig {
            max_commit_attempts: 0,
            ..EngineConfig::default()
        }
        .validated();
        assert_eq!(config.max_commit_attempts, 1);
    }

    #[test]
    fn test_validated_clamps_excessive_attempts() {
        let config = EngineConfig {
            max_commit_attempts: 10_000,
            ..EngineConfig::default()
        }
        .validated();
        assert_eq!(config.max_commit_attempts, EngineConfig::MAX_COMMIT_ATTEMPTS);
    }

    #[test]
    fn test_from_toml_str_partial_document_keeps_defaults() {
        let config = EngineConfig::from_toml_str("max_commit_attempts = 3").unwrap();
        assert_eq!(config.max_commit_attempts, 3);
        assert_eq!(config.retry_backoff_ms, 2);
    }

    #[test]
    fn test_from_toml_str_empty_document_is_default() {
        assert_eq!(
            EngineConfig::from_toml_str("").unwrap(),
            EngineConfig::default()
        );
    }

    #[test]
    fn test_from_toml_str_wrong_type_is_error() {
        let result = EngineConfig::from_toml_str("max_commit_attempts = \"many\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_backoff_without_jitter_is_linear() {
        let config = EngineConfig {
            retry_backoff_ms: 5,
            retry_jitter_ms: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.backoff(1), Duration::from_millis(5));
        assert_eq!(config.backoff(3), Duration::from_millis(15));
    }

    #[test]
    fn test_backoff_jitter_stays_in_range() {
        let config = EngineConfig {
            retry_backoff_ms: 1,
            retry_jitter_ms: 4,
            ..EngineConfig::default()
        };
        for _ in 0..50 {
            let pause = config.backoff(2);
            assert!(pause >= Duration::from_millis(2));
            assert!(pause <= Duration::from_millis(6));
        }
    }
}
