//! The read → compute → conditional write loop behind every mutation.

use rollcall_model::{ModelError, Session};
use rollcall_store::{Commit, SessionStore, Versioned};
use tracing::debug;

use crate::{AttendanceError, EngineConfig, InternalError};

/// The (group, session name) pair a request addresses. Used to build
/// caller-facing errors.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Target<'a> {
    pub group: &'a str,
    pub session: &'a str,
}

impl<'a> Target<'a> {
    pub fn new(group: &'a str, session: &'a str) -> Self {
        Self { group, session }
    }

    pub fn not_found(&self) -> AttendanceError {
        AttendanceError::SessionNotFound {
            group: self.group.to_string(),
            session: self.session.to_string(),
        }
    }

    pub fn has_ended(&self) -> AttendanceError {
        AttendanceError::SessionHasEnded {
            group: self.group.to_string(),
            session: self.session.to_string(),
        }
    }

    pub fn is_active(&self) -> AttendanceError {
        AttendanceError::SessionIsActive {
            group: self.group.to_string(),
            session: self.session.to_string(),
        }
    }

    pub fn not_finalized(&self) -> AttendanceError {
        AttendanceError::SessionNotFinalized {
            group: self.group.to_string(),
            session: self.session.to_string(),
        }
    }

    /// Maps a refused state change onto the caller-facing error.
    pub fn rejected(&self, err: ModelError) -> AttendanceError {
        match err {
            ModelError::AlreadyEnded(_) => self.has_ended(),
            ModelError::StillActive(_) => self.is_active(),
            ModelError::CapExceeded {
                member,
                requested,
                max,
            } => AttendanceError::MaxAttendanceExceeded {
                member,
                requested,
                max,
            },
        }
    }
}

/// What one round of a mutation wants to do with the session it read.
pub(crate) enum Step<T> {
    /// Replace the session with this draft, then return `T`.
    Write(Session, T),
    /// Leave the stored session untouched and return `T`.
    Keep(T),
    /// Remove the session, then return `T`.
    Delete(T),
}

/// Applies `decide` to `current` and commits the result conditionally.
///
/// On a lost race the session is read again and `decide` runs again on
/// the fresh copy, so every business rule is re-checked against the state
/// that actually won. A session that disappears in between is reported as
/// not found. After `max_commit_attempts` lost races the call fails with
/// [`InternalError::RetriesExhausted`].
pub(crate) async fn mutate<S, T, F>(
    store: &S,
    config: &EngineConfig,
    target: Target<'_>,
    mut current: Versioned<Session>,
    mut decide: F,
) -> Result<T, AttendanceError>
where
    S: SessionStore,
    F: FnMut(Session) -> Result<Step<T>, AttendanceError>,
{
    let id = current.value.id;
    let mut attempt = 1;

    loop {
        let raced = match decide(current.value.clone())? {
            Step::Keep(out) => return Ok(out),
            Step::Write(next, out) => {
                match store.compare_and_swap(id, current.version, next).await? {
                    Commit::Committed(_) => return Ok(out),
                    Commit::Conflict => true,
                    Commit::Missing => false,
                }
            }
            Step::Delete(out) => match store.delete_if(id, current.version).await? {
                Commit::Committed(_) => return Ok(out),
                Commit::Conflict => true,
                Commit::Missing => false,
            },
        };

        if !raced {
            return Err(target.not_found());
        }
        if attempt >= config.max_commit_attempts {
            return Err(InternalError::RetriesExhausted {
                session: id.to_string(),
                attempts: attempt,
            }
            .into());
        }

        debug!(session_id = %id, attempt, "commit conflict, retrying");
        tokio::time::sleep(config.backoff(attempt)).await;
        attempt += 1;

        current = store.get(id).await?.ok_or_else(|| target.not_found())?;
    }
}
