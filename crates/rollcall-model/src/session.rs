//! The session aggregate and its lifecycle state machine.
//!
//! A session is one meeting of a group during which attendance is
//! collected. It has exactly two states:
//!
//! ```text
//!   Active ──(end)──→ Ended
//! ```
//!
//! - **Active**: `ended_at` is `None`. Face validations are accepted;
//!   manual corrections are not.
//! - **Ended**: `ended_at` is set. Terminal. Face validations are
//!   rejected; manual corrections are now allowed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AttendanceEntry, AttendanceLedger, ModelError, OwnerId, SessionId, ValidationOutcome};

// ---------------------------------------------------------------------------
// SessionStatus
// ---------------------------------------------------------------------------

/// Derived lifecycle state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    Active,
    Ended,
}

impl SessionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Ended => write!(f, "Ended"),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One meeting of a group, with its attendance ledger.
///
/// All mutation goes through the methods below so the state machine and
/// the cap are enforced in one place. The engine calls them on a private
/// copy and persists the copy with a conditional write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub group_name: String,
    /// Unique among the active sessions of the group.
    pub name: String,
    pub created_by: OwnerId,
    pub created_at: DateTime<Utc>,
    /// `None` while active. Set exactly once.
    pub ended_at: Option<DateTime<Utc>>,
    pub max_attendance: u32,
    attendance: AttendanceLedger,
}

impl Session {
    /// Creates an active session with an empty ledger and a fresh id.
    pub fn new(
        group_name: impl Into<String>,
        name: impl Into<String>,
        created_by: OwnerId,
        max_attendance: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SessionId::new(),
            group_name: group_name.into(),
            name: name.into(),
            created_by,
            created_at: now,
            ended_at: None,
            max_attendance,
            attendance: AttendanceLedger::new(),
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.ended_at.is_some() {
            SessionStatus::Ended
        } else {
            SessionStatus::Active
        }
    }

    pub fn is_active(&self) -> bool {
        self.status().is_active()
    }

    /// Read-only view of the ledger.
    pub fn attendance(&self) -> &AttendanceLedger {
        &self.attendance
    }

    /// Convenience lookup into the ledger.
    pub fn entry(&self, member: &str) -> Option<&AttendanceEntry> {
        self.attendance.get(member)
    }

    /// Moves the session to the terminal state.
    ///
    /// # Errors
    /// [`ModelError::AlreadyEnded`] on a second call.
    pub fn end(&mut self, now: DateTime<Utc>) -> Result<(), ModelError> {
        if self.ended_at.is_some() {
            return Err(ModelError::AlreadyEnded(self.id));
        }
        self.ended_at = Some(now);
        Ok(())
    }

    /// Applies an automatic face match for `member`.
    ///
    /// # Errors
    /// - [`ModelError::AlreadyEnded`]: the session is terminal
    /// - [`ModelError::CapExceeded`]: increment would exceed the cap
    pub fn record_validation(
        &mut self,
        member: &str,
        now: DateTime<Utc>,
    ) -> Result<ValidationOutcome, ModelError> {
        if !self.is_active() {
            return Err(ModelError::AlreadyEnded(self.id));
        }
        self.attendance
            .record_validation(member, self.max_attendance, now)
    }

    /// Overwrites a member's count after the session has ended.
    ///
    /// # Errors
    /// - [`ModelError::StillActive`]: corrections wait for the end
    /// - [`ModelError::CapExceeded`]: `count > max_attendance`
    pub fn correct_attendance(
        &mut self,
        member: &str,
        count: u32,
    ) -> Result<&AttendanceEntry, ModelError> {
        if self.is_active() {
            return Err(ModelError::StillActive(self.id));
        }
        self.attendance.set_count(member, count, self.max_attendance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active() -> Session {
        Session::new("turma-a", "aula-1", OwnerId::from("prof"), 1, Utc::now())
    }

    #[test]
    fn test_new_session_is_active_and_empty() {
        let session = active();
        assert_eq!(session.status(), SessionStatus::Active);
        assert!(session.ended_at.is_none());
        assert!(session.attendance().is_empty());
    }

    #[test]
    fn test_end_transitions_exactly_once() {
        let mut session = active();

        session.end(Utc::now()).unwrap();
        let first = session.ended_at;

        assert_eq!(session.status(), SessionStatus::Ended);
        assert_eq!(
            session.end(Utc::now()),
            Err(ModelError::AlreadyEnded(session.id))
        );
        assert_eq!(session.ended_at, first, "ended_at must not be restamped");
    }

    #[test]
    fn test_record_validation_on_ended_session_is_rejected() {
        let mut session = active();
        session.end(Utc::now()).unwrap();

        let result = session.record_validation("Alice", Utc::now());

        assert!(matches!(result, Err(ModelError::AlreadyEnded(_))));
        assert!(session.entry("Alice").is_none());
    }

    #[test]
    fn test_correct_attendance_on_active_session_is_rejected() {
        let mut session = active();

        for count in [0, 1, 100] {
            let result = session.correct_attendance("Alice", count);
            assert!(matches!(result, Err(ModelError::StillActive(_))));
        }
        assert!(session.attendance().is_empty());
    }

    #[test]
    fn test_correct_attendance_after_end_uses_cap() {
        let mut session = active();
        session.record_validation("Alice", Utc::now()).unwrap();
        session.end(Utc::now()).unwrap();

        assert_eq!(session.correct_attendance("Alice", 1).unwrap().count, 1);
        assert!(matches!(
            session.correct_attendance("Bob", 2),
            Err(ModelError::CapExceeded { .. })
        ));
    }

    #[test]
    fn test_session_json_shape() {
        let mut session = active();
        session.record_validation("Alice", Utc::now()).unwrap();

        let value = serde_json::to_value(&session).unwrap();

        assert_eq!(value["group_name"], "turma-a");
        assert_eq!(value["name"], "aula-1");
        assert_eq!(value["ended_at"], serde_json::Value::Null);
        assert_eq!(value["attendance"]["Alice"]["count"], 1);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SessionStatus::Active.to_string(), "Active");
        assert_eq!(SessionStatus::Ended.to_string(), "Ended");
    }
}
