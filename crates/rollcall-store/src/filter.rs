//! Predicates for listing and bulk-deleting sessions.

use rollcall_model::{OwnerId, Session, SessionStatus};

/// Selects sessions by group, owner, name, and status.
///
/// `None` fields match anything. Callers in the engine always set both
/// `group_name` and `owner` so one owner never sees another's sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    pub group_name: Option<String>,
    pub owner: Option<OwnerId>,
    pub name: Option<String>,
    pub status: Option<SessionStatus>,
}

impl SessionFilter {
    /// All sessions of one group for one owner.
    pub fn group(group_name: &str, owner: &OwnerId) -> Self {
        Self {
            group_name: Some(group_name.to_string()),
            owner: Some(owner.clone()),
            ..Self::default()
        }
    }

    /// Narrows to sessions called `name`.
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Narrows to sessions in `status`.
    pub fn with_status(mut self, status: SessionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn active(self) -> Self {
        self.with_status(SessionStatus::Active)
    }

    pub fn ended(self) -> Self {
        self.with_status(SessionStatus::Ended)
    }

    /// Returns `true` if `session` satisfies every set field.
    pub fn matches(&self, session: &Session) -> bool {
        self.group_name
            .as_ref()
            .is_none_or(|g| *g == session.group_name)
            && self.owner.as_ref().is_none_or(|o| *o == session.created_by)
            && self.name.as_ref().is_none_or(|n| *n == session.name)
            && self.status.is_none_or(|s| s == session.status())
    }
}
