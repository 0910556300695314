//! In-process session store with per-session locking.
//!
//! # Locking layout
//!
//! ```text
//! slots:  RwLock<HashMap<SessionId, Arc<Mutex<Record>>>>
//!           │ id index: held only to look up, add, or drop a slot handle
//!           ▼
//! Record:   Mutex, one per session: held for the compare-and-write itself
//!           │
//!           ▼
//! active: Mutex<HashMap<ActiveKey, SessionId>>
//!           names of active sessions: held for a map update
//! ```
//!
//! A conditional write on one session only ever holds that session's
//! mutex, plus a brief update of the active-name map when the session
//! stops or starts being active. The id index is released before any
//! record lock is awaited, so writers to different sessions never wait on
//! each other. Nested locks are record → `active` and, in `insert_unique`,
//! `active` → `slots`; no path holds a record lock while waiting on
//! `slots`, so the two cannot deadlock.
//!
//! Deleted records are tombstoned (`session: None`) under their own lock
//! before they leave the index. A writer that fetched the slot just before
//! the delete therefore sees `Missing`, never resurrects the session.

use std::collections::HashMap;
use std::sync::Arc;

use rollcall_model::{OwnerId, Session, SessionId};
use tokio::sync::{Mutex, RwLock};

use crate::{Commit, InsertOutcome, SessionFilter, SessionStore, StoreError, Versioned};

#[derive(Debug)]
struct Record {
    version: u64,
    /// `None` once deleted.
    session: Option<Session>,
}

type Slot = Arc<Mutex<Record>>;

/// (group, owner, session name) of an active session.
type ActiveKey = (String, OwnerId, String);

fn active_key(session: &Session) -> ActiveKey {
    (
        session.group_name.clone(),
        session.created_by.clone(),
        session.name.clone(),
    )
}

/// A [`SessionStore`] that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slots: RwLock<HashMap<SessionId, Slot>>,
    active: Mutex<HashMap<ActiveKey, SessionId>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        let mut live = 0;
        for (_, slot) in self.snapshot().await {
            if slot.lock().await.session.is_some() {
                live += 1;
            }
        }
        live
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn slot(&self, id: SessionId) -> Option<Slot> {
        self.slots.read().await.get(&id).cloned()
    }

    /// Clones every slot handle and releases the index right away.
    async fn snapshot(&self) -> Vec<(SessionId, Slot)> {
        self.slots
            .read()
            .await
            .iter()
            .map(|(id, slot)| (*id, Arc::clone(slot)))
            .collect()
    }

    /// Keeps the active-name map in step with one record transition.
    /// Called with the record lock held.
    async fn track(&self, id: SessionId, before: Option<&Session>, after: Option<&Session>) {
        let was = before.filter(|s| s.is_active()).map(active_key);
        let now = after.filter(|s| s.is_active()).map(active_key);
        if was == now {
            return;
        }

        let mut active = self.active.lock().await;
        if let Some(key) = was {
            if active.get(&key) == Some(&id) {
                active.remove(&key);
            }
        }
        if let Some(key) = now {
            active.entry(key).or_insert(id);
        }
    }
}

impl SessionStore for MemorySessionStore {
    async fn insert_unique(&self, session: Session) -> Result<InsertOutcome, StoreError> {
        // Holding the name map across the index insert keeps a second
        // insert of the same name from slipping in between.
        let key = active_key(&session);
        let mut active = self.active.lock().await;
        if let Some(existing) = active.get(&key) {
            return Ok(InsertOutcome::Duplicate(*existing));
        }

        let id = session.id;
        let stored = Versioned {
            version: 1,
            value: session.clone(),
        };
        self.slots.write().await.insert(
            id,
            Arc::new(Mutex::new(Record {
                version: 1,
                session: Some(session),
            })),
        );
        if stored.value.is_active() {
            active.insert(key, id);
        }

        tracing::trace!(session_id = %id, "session inserted");
        Ok(InsertOutcome::Inserted(stored))
    }

    async fn get(&self, id: SessionId) -> Result<Option<Versioned<Session>>, StoreError> {
        let Some(slot) = self.slot(id).await else {
            return Ok(None);
        };
        let record = slot.lock().await;
        Ok(record.session.as_ref().map(|s| Versioned {
            version: record.version,
            value: s.clone(),
        }))
    }

    async fn find(&self, filter: &SessionFilter) -> Result<Vec<Versioned<Session>>, StoreError> {
        let mut found = Vec::new();
        for (_, slot) in self.snapshot().await {
            let record = slot.lock().await;
            if let Some(session) = &record.session {
                if filter.matches(session) {
                    found.push(Versioned {
                        version: record.version,
                        value: session.clone(),
                    });
                }
            }
        }

        found.sort_by(|a, b| {
            a.value
                .created_at
                .cmp(&b.value.created_at)
                .then_with(|| a.value.id.cmp(&b.value.id))
        });
        Ok(found)
    }

    async fn compare_and_swap(
        &self,
        id: SessionId,
        expected: u64,
        next: Session,
    ) -> Result<Commit<Versioned<Session>>, StoreError> {
        let Some(slot) = self.slot(id).await else {
            return Ok(Commit::Missing);
        };

        let mut record = slot.lock().await;
        let Some(previous) = record.session.take() else {
            return Ok(Commit::Missing);
        };
        if record.version != expected {
            tracing::trace!(%id, expected, actual = record.version, "version conflict");
            record.session = Some(previous);
            return Ok(Commit::Conflict);
        }

        self.track(id, Some(&previous), Some(&next)).await;
        record.version += 1;
        record.session = Some(next.clone());
        Ok(Commit::Committed(Versioned {
            version: record.version,
            value: next,
        }))
    }

    async fn delete_if(&self, id: SessionId, expected: u64) -> Result<Commit<Session>, StoreError> {
        let Some(slot) = self.slot(id).await else {
            return Ok(Commit::Missing);
        };

        let removed = {
            let mut record = slot.lock().await;
            if record.version != expected && record.session.is_some() {
                return Ok(Commit::Conflict);
            }
            let Some(session) = record.session.take() else {
                return Ok(Commit::Missing);
            };
            record.version += 1;
            self.track(id, Some(&session), None).await;
            session
        };

        // Record lock released above; now drop the tombstone from the index.
        self.slots.write().await.remove(&id);
        Ok(Commit::Committed(removed))
    }

    async fn delete_where(&self, filter: &SessionFilter) -> Result<usize, StoreError> {
        let mut removed = Vec::new();
        for (id, slot) in self.snapshot().await {
            let mut record = slot.lock().await;
            if !record.session.as_ref().is_some_and(|s| filter.matches(s)) {
                continue;
            }
            if let Some(session) = record.session.take() {
                record.version += 1;
                self.track(id, Some(&session), None).await;
                removed.push(id);
            }
        }

        if !removed.is_empty() {
            let mut slots = self.slots.write().await;
            for id in &removed {
                slots.remove(id);
            }
        }
        Ok(removed.len())
    }
}
