//! Unified error type for the Rollcall crates.

use rollcall_biometrics::{AdjudicationError, MatcherError};
use rollcall_directory::DirectoryError;
use rollcall_engine::{AttendanceError, ConfigError};
use rollcall_model::ModelError;
use rollcall_store::StoreError;

/// Top-level error that wraps all crate-specific errors.
///
/// Applications that register groups, configure the engine, and run
/// sessions from one function can use this single type and let `?`
/// convert whatever the layer below returned.
#[derive(Debug, thiserror::Error)]
pub enum RollcallError {
    /// A session operation was refused or failed.
    #[error(transparent)]
    Attendance(#[from] AttendanceError),

    /// Group or member registration failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The session store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The face matching backend failed.
    #[error(transparent)]
    Matcher(#[from] MatcherError),

    /// A photo was not attributed to a member.
    #[error(transparent)]
    Adjudication(#[from] AdjudicationError),

    /// A session or ledger invariant was violated.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The engine configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use rollcall_model::{OwnerId, SessionId};

    use super::*;

    #[test]
    fn test_from_attendance_error() {
        let err = AttendanceError::FaceDoesntMatch;
        let rollcall_err: RollcallError = err.into();
        assert!(matches!(rollcall_err, RollcallError::Attendance(_)));
        assert_eq!(rollcall_err.to_string(), "face doesn't match any member");
    }

    #[test]
    fn test_from_directory_error() {
        let err = DirectoryError::GroupAlreadyExists {
            name: "turma-a".into(),
            owner: OwnerId::from("prof"),
        };
        let rollcall_err: RollcallError = err.into();
        assert!(matches!(rollcall_err, RollcallError::Directory(_)));
        assert!(rollcall_err.to_string().contains("turma-a"));
    }

    #[test]
    fn test_from_store_error() {
        let err = StoreError::Unavailable("gone".into());
        let rollcall_err: RollcallError = err.into();
        assert!(matches!(rollcall_err, RollcallError::Store(_)));
        assert!(rollcall_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_model_error() {
        let err = ModelError::AlreadyEnded(SessionId::new());
        let rollcall_err: RollcallError = err.into();
        assert!(matches!(rollcall_err, RollcallError::Model(_)));
    }

    #[test]
    fn test_from_matcher_error() {
        let err = MatcherError::Decode("truncated".into());
        let rollcall_err: RollcallError = err.into();
        assert!(matches!(rollcall_err, RollcallError::Matcher(_)));
    }

    #[test]
    fn test_from_config_error() {
        let err = rollcall_engine::EngineConfig::from_toml_str("retry_backoff_ms = -1").unwrap_err();
        let rollcall_err: RollcallError = err.into();
        assert!(matches!(rollcall_err, RollcallError::Config(_)));
    }
}
