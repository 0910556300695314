//! Finalized attendance roster of an ended session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Member, ModelError, Session, SessionId};

/// One member's line in a [`SessionReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterLine {
    pub member: String,
    pub count: u32,
    pub validated: bool,
}

/// The roster of an ended session: every group member, present or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub session_id: SessionId,
    pub group_name: String,
    pub session_name: String,
    pub created_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub max_attendance: u32,
    /// Group members in registration order, then any ledger entries whose
    /// member is no longer listed by the directory.
    pub roster: Vec<RosterLine>,
    /// Members with a count above zero.
    pub present: usize,
    /// Members confirmed by a face match.
    pub validated: usize,
}

impl SessionReport {
    /// Builds the report from a session and the current member list.
    ///
    /// # Errors
    /// [`ModelError::StillActive`] if the session has not ended.
    pub fn build(session: &Session, members: &[Member]) -> Result<Self, ModelError> {
        let ended_at = session
            .ended_at
            .ok_or(ModelError::StillActive(session.id))?;

        let ledger = session.attendance();
        let mut roster: Vec<RosterLine> = members
            .iter()
            .map(|m| match ledger.get(&m.name) {
                Some(entry) => RosterLine {
                    member: m.name.clone(),
                    count: entry.count,
                    validated: entry.validated,
                },
                None => RosterLine {
                    member: m.name.clone(),
                    count: 0,
                    validated: false,
                },
            })
            .collect();

        for entry in ledger.iter() {
            if !members.iter().any(|m| m.name == entry.member) {
                roster.push(RosterLine {
                    member: entry.member.clone(),
                    count: entry.count,
                    validated: entry.validated,
                });
            }
        }

        let present = roster.iter().filter(|l| l.count > 0).count();
        let validated = roster.iter().filter(|l| l.validated).count();

        Ok(Self {
            session_id: session.id,
            group_name: session.group_name.clone(),
            session_name: session.name.clone(),
            created_at: session.created_at,
            ended_at,
            max_attendance: session.max_attendance,
            roster,
            present,
            validated,
        })
    }
}
