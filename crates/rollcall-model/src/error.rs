//! Error types for the model layer.

use crate::SessionId;

/// Invariant violations detected by [`Session`](crate::Session) and
/// [`AttendanceLedger`](crate::AttendanceLedger).
///
/// These are business outcomes, not faults. The engine maps each one onto
/// the matching caller-facing error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Applying the change would push a member above the session cap.
    #[error("attendance {requested} for {member} exceeds the maximum of {max}")]
    CapExceeded {
        member: String,
        requested: u32,
        max: u32,
    },

    /// The session is terminal; automatic validation and ending are over.
    #[error("session {0} has ended")]
    AlreadyEnded(SessionId),

    /// The session is still collecting attendance.
    #[error("session {0} is still active")]
    StillActive(SessionId),
}
