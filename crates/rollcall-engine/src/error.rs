//! Error types for the engine layer.

use rollcall_biometrics::{AdjudicationError, MatcherError};
use rollcall_directory::DirectoryError;
use rollcall_store::StoreError;

/// Every failure a caller of [`AttendanceEngine`](crate::AttendanceEngine)
/// can observe.
///
/// All variants except [`Internal`](Self::Internal) are business outcomes:
/// the request was understood and refused. They are returned as-is and
/// never retried.
#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    #[error("group {group} not found")]
    GroupNotFound { group: String },

    #[error("session {session} not found in group {group}")]
    SessionNotFound { group: String, session: String },

    #[error("member {member} not found in group {group}")]
    MemberNotFound { group: String, member: String },

    /// An active session with this name already exists in the group.
    #[error("session {session} already exists in group {group}")]
    SessionAlreadyExists { group: String, session: String },

    #[error("session {session} in group {group} has ended")]
    SessionHasEnded { group: String, session: String },

    /// Manual corrections are only accepted once the session has ended.
    #[error("session {session} in group {group} is still active")]
    SessionIsActive { group: String, session: String },

    /// Details are only published for ended sessions.
    #[error("session {session} in group {group} is not finalized")]
    SessionNotFinalized { group: String, session: String },

    /// The submitted photo could not be decoded by the matcher backend.
    #[error("invalid image: {reason}")]
    InvalidImage { reason: String },

    #[error("no faces detected")]
    NoFacesDetected,

    #[error("{faces} faces detected, expected exactly one")]
    MultipleFacesDetected { faces: usize },

    #[error("face doesn't match any member")]
    FaceDoesntMatch,

    #[error("attendance {requested} for {member} exceeds the maximum of {max}")]
    MaxAttendanceExceeded {
        member: String,
        requested: u32,
        max: u32,
    },

    /// A collaborator failed. The cause is kept as the error source and
    /// is logged where it is raised; callers only see "internal error".
    #[error("internal error")]
    Internal(#[source] InternalError),
}

/// Fieldless mirror of [`AttendanceError`] for callers that branch on the
/// kind of failure (HTTP status mapping, metrics labels, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    GroupNotFound,
    SessionNotFound,
    MemberNotFound,
    SessionAlreadyExists,
    SessionHasEnded,
    SessionIsActive,
    SessionNotFinalized,
    InvalidImage,
    NoFacesDetected,
    MultipleFacesDetected,
    FaceDoesntMatch,
    MaxAttendanceExceeded,
    Internal,
}

impl AttendanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::GroupNotFound { .. } => ErrorKind::GroupNotFound,
            Self::SessionNotFound { .. } => ErrorKind::SessionNotFound,
            Self::MemberNotFound { .. } => ErrorKind::MemberNotFound,
            Self::SessionAlreadyExists { .. } => ErrorKind::SessionAlreadyExists,
            Self::SessionHasEnded { .. } => ErrorKind::SessionHasEnded,
            Self::SessionIsActive { .. } => ErrorKind::SessionIsActive,
            Self::SessionNotFinalized { .. } => ErrorKind::SessionNotFinalized,
            Self::InvalidImage { .. } => ErrorKind::InvalidImage,
            Self::NoFacesDetected => ErrorKind::NoFacesDetected,
            Self::MultipleFacesDetected { .. } => ErrorKind::MultipleFacesDetected,
            Self::FaceDoesntMatch => ErrorKind::FaceDoesntMatch,
            Self::MaxAttendanceExceeded { .. } => ErrorKind::MaxAttendanceExceeded,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// `true` for [`Internal`](Self::Internal).
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}

/// The collaborator fault behind [`AttendanceError::Internal`].
#[derive(Debug, thiserror::Error)]
pub enum InternalError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    /// The matcher named someone outside the candidate list.
    #[error("matcher returned unknown member {0}")]
    UnknownMember(String),

    /// Every commit attempt lost a race.
    #[error("session {session} still conflicting after {attempts} attempts")]
    RetriesExhausted { session: String, attempts: u32 },

    /// The blocking matcher task panicked or was cancelled.
    #[error("matcher task failed: {0}")]
    Blocking(String),
}

impl From<InternalError> for AttendanceError {
    fn from(err: InternalError) -> Self {
        tracing::error!(error = %err, "internal fault");
        Self::Internal(err)
    }
}

impl From<StoreError> for AttendanceError {
    fn from(err: StoreError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<DirectoryError> for AttendanceError {
    fn from(err: DirectoryError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<AdjudicationError> for AttendanceError {
    fn from(err: AdjudicationError) -> Self {
        match err {
            AdjudicationError::NoFaces => Self::NoFacesDetected,
            AdjudicationError::MultipleFaces(faces) => Self::MultipleFacesDetected { faces },
            AdjudicationError::NoMatch => Self::FaceDoesntMatch,
            AdjudicationError::UnknownMember(member) => {
                InternalError::UnknownMember(member).into()
            }
            // Bad bytes come from the client, not from a broken backend.
            AdjudicationError::Matcher(MatcherError::Decode(reason)) => {
                tracing::warn!(%reason, "submitted image could not be decoded");
                Self::InvalidImage { reason }
            }
            AdjudicationError::Matcher(err) => InternalError::from(err).into(),
        }
    }
}
