//! The attendance ledger: per-session map from member to attendance state.
//!
//! A ledger is owned by exactly one [`Session`](crate::Session) and has
//! three primitives:
//!
//! - [`record_validation`](AttendanceLedger::record_validation): the
//!   automatic path. Inserts a fresh validated entry, or does nothing if
//!   the member is already validated.
//! - [`set_count`](AttendanceLedger::set_count): the manual correction
//!   path. Overwrites the count, leaves the validated flag alone.
//! - reads ([`get`](AttendanceLedger::get), [`iter`](AttendanceLedger::iter)).
//!
//! Both writes check the cap before touching the map, so a failed call
//! leaves the ledger exactly as it was.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Attendance state of one member within one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub member: String,
    /// Always `<= max_attendance` of the owning session.
    pub count: u32,
    /// Set by an automatic face match; manual corrections never change it.
    pub validated: bool,
    pub last_validated_at: Option<DateTime<Utc>>,
}

/// Result of an automatic validation against the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The match produced an increment.
    Recorded(AttendanceEntry),
    /// The member was already validated; nothing changed.
    AlreadyValidated(AttendanceEntry),
}

impl ValidationOutcome {
    /// The member's entry after the call.
    pub fn entry(&self) -> &AttendanceEntry {
        match self {
            Self::Recorded(entry) | Self::AlreadyValidated(entry) => entry,
        }
    }

    /// `true` if the ledger was modified.
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded(_))
    }
}

/// Member name → attendance entry, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendanceLedger {
    entries: BTreeMap<String, AttendanceEntry>,
}

impl AttendanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one automatic face match for `member`.
    ///
    /// - no entry → new entry with `count = 1`, validated
    /// - validated entry → unchanged, [`ValidationOutcome::AlreadyValidated`]
    /// - unvalidated entry → `count + 1`, validated
    ///
    /// Unvalidated entries only come from [`set_count`](Self::set_count).
    /// The engine allows corrections on ended sessions alone and never
    /// validates those, so the last case is only reached by callers that
    /// drive a ledger directly.
    ///
    /// # Errors
    /// [`ModelError::CapExceeded`] if the increment would exceed `max`.
    /// The ledger is not modified in that case.
    pub fn record_validation(
        &mut self,
        member: &str,
        max: u32,
        now: DateTime<Utc>,
    ) -> Result<ValidationOutcome, ModelError> {
        if let Some(existing) = self.entries.get(member) {
            if existing.validated {
                return Ok(ValidationOutcome::AlreadyValidated(existing.clone()));
            }
        }

        let current = self.entries.get(member).map_or(0, |e| e.count);
        let requested = current.saturating_add(1);
        if requested > max {
            return Err(ModelError::CapExceeded {
                member: member.to_string(),
                requested,
                max,
            });
        }

        let entry = self
            .entries
            .entry(member.to_string())
            .or_insert_with(|| AttendanceEntry {
                member: member.to_string(),
                count: 0,
                validated: false,
                last_validated_at: None,
            });
        entry.count = requested;
        entry.validated = true;
        entry.last_validated_at = Some(now);

        Ok(ValidationOutcome::Recorded(entry.clone()))
    }

    /// Overwrites the count for `member`, creating an unvalidated entry if
    /// the member has none.
    ///
    /// # Errors
    /// [`ModelError::CapExceeded`] if `count > max`.
    pub fn set_count(
        &mut self,
        member: &str,
        count: u32,
        max: u32,
    ) -> Result<&AttendanceEntry, ModelError> {
        if count > max {
            return Err(ModelError::CapExceeded {
                member: member.to_string(),
                requested: count,
                max,
            });
        }

        let entry = self
            .entries
            .entry(member.to_string())
            .or_insert_with(|| AttendanceEntry {
                member: member.to_string(),
                count: 0,
                validated: false,
                last_validated_at: None,
            });
        entry.count = count;
        Ok(&*entry)
    }

    pub fn get(&self, member: &str) -> Option<&AttendanceEntry> {
        self.entries.get(member)
    }

    /// Entries in member-name order.
    pub fn iter(&self) -> impl Iterator<Item = &AttendanceEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total_attendance(&self) -> u64 {
        self.entries.values().map(|e| u64::from(e.count)).sum()
    }

    /// Number of members confirmed by a face match.
    pub fn validated_count(&self) -> usize {
        self.entries.values().filter(|e| e.validated).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    // =====================================================================
    // record_validation()
    // =====================================================================

    #[test]
    fn test_record_validation_new_member_creates_validated_entry() {
        let mut ledger = AttendanceLedger::new();

        let outcome = ledger.record_validation("Alice", 3, now()).unwrap();

        assert!(outcome.is_recorded());
        let entry = ledger.get("Alice").unwrap();
        assert_eq!(entry.count, 1);
        assert!(entry.validated);
        assert!(entry.last_validated_at.is_some());
    }

    #[test]
    fn test_record_validation_already_validated_is_idempotent() {
        let mut ledger = AttendanceLedger::new();
        ledger.record_validation("Alice", 3, now()).unwrap();
        let before = ledger.clone();

        let outcome = ledger.record_validation("Alice", 3, now()).unwrap();

        assert!(matches!(outcome, ValidationOutcome::AlreadyValidated(_)));
        assert_eq!(outcome.entry().count, 1);
        assert_eq!(ledger, before, "resubmission must not touch the ledger");
    }

    #[test]
    fn test_record_validation_zero_cap_rejects_and_leaves_ledger_empty() {
        let mut ledger = AttendanceLedger::new();

        let result = ledger.record_validation("Alice", 0, now());

        assert_eq!(
            result,
            Err(ModelError::CapExceeded {
                member: "Alice".into(),
                requested: 1,
                max: 0
            })
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_record_validation_unvalidated_entry_increments() {
        // A manual correction left Bob at 1 without a face match.
        let mut ledger = AttendanceLedger::new();
        ledger.set_count("Bob", 1, 2).unwrap();

        let outcome = ledger.record_validation("Bob", 2, now()).unwrap();

        assert!(outcome.is_recorded());
        assert_eq!(ledger.get("Bob").unwrap().count, 2);
        assert!(ledger.get("Bob").unwrap().validated);
    }

    #[test]
    fn test_record_validation_unvalidated_entry_at_cap_is_rejected() {
        let mut ledger = AttendanceLedger::new();
        ledger.set_count("Bob", 2, 2).unwrap();

        let result = ledger.record_validation("Bob", 2, now());

        assert!(matches!(result, Err(ModelError::CapExceeded { requested: 3, .. })));
        let entry = ledger.get("Bob").unwrap();
        assert_eq!(entry.count, 2);
        assert!(!entry.validated);
    }

    // =====================================================================
    // set_count()
    // =====================================================================

    #[test]
    fn test_set_count_preserves_validated_flag() {
        let mut ledger = AttendanceLedger::new();
        ledger.record_validation("Alice", 5, now()).unwrap();

        let entry = ledger.set_count("Alice", 4, 5).unwrap();

        assert_eq!(entry.count, 4);
        assert!(entry.validated);
    }

    #[test]
    fn test_set_count_creates_unvalidated_entry() {
        let mut ledger = AttendanceLedger::new();

        let entry = ledger.set_count("Bob", 1, 1).unwrap();

        assert_eq!(entry.count, 1);
        assert!(!entry.validated);
        assert!(entry.last_validated_at.is_none());
    }

    #[test]
    fn test_set_count_above_cap_is_rejected_without_effect() {
        let mut ledger = AttendanceLedger::new();
        ledger.set_count("Alice", 1, 1).unwrap();

        let result = ledger.set_count("Alice", 2, 1);

        assert!(matches!(result, Err(ModelError::CapExceeded { max: 1, .. })));
        assert_eq!(ledger.get("Alice").unwrap().count, 1);
        assert!(ledger.set_count("Bob", 2, 1).is_err());
        assert!(ledger.get("Bob").is_none());
    }

    #[test]
    fn test_set_count_zero_is_allowed() {
        let mut ledger = AttendanceLedger::new();
        ledger.record_validation("Alice", 1, now()).unwrap();

        ledger.set_count("Alice", 0, 1).unwrap();

        assert_eq!(ledger.get("Alice").unwrap().count, 0);
    }

    // =====================================================================
    // reads
    // =====================================================================

    #[test]
    fn test_totals() {
        let mut ledger = AttendanceLedger::new();
        ledger.record_validation("Alice", 3, now()).unwrap();
        ledger.set_count("Bob", 2, 3).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.total_attendance(), 3);
        assert_eq!(ledger.validated_count(), 1);
        let names: Vec<_> = ledger.iter().map(|e| e.member.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_ledger_serializes_as_map() {
        let mut ledger = AttendanceLedger::new();
        ledger.set_count("Alice", 1, 1).unwrap();

        let value = serde_json::to_value(&ledger).unwrap();

        assert_eq!(value["Alice"]["count"], 1);
        assert_eq!(value["Alice"]["validated"], false);
    }
}
