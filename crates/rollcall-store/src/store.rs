//! The `SessionStore` trait and its result types.

use std::future::Future;
use std::sync::Arc;

use rollcall_model::{Session, SessionId};

use crate::{SessionFilter, StoreError};

/// A stored value together with the version it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    /// Starts at 1 on insert and increases by one per committed write.
    pub version: u64,
    pub value: T,
}

/// Result of a conditional write.
#[derive(Debug, Clone, PartialEq)]
pub enum Commit<T> {
    /// The write was applied.
    Committed(T),
    /// The stored version no longer matches the expected one.
    Conflict,
    /// The record no longer exists.
    Missing,
}

/// Result of [`SessionStore::insert_unique`].
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    Inserted(Versioned<Session>),
    /// An active session with the same group, owner, and name exists.
    Duplicate(SessionId),
}

/// Durable, conditionally-writable storage for sessions.
///
/// Implementations must make every method atomic: a call either takes full
/// effect or none. Dropping a returned future before it completes must not
/// leave a half-applied write behind.
pub trait SessionStore: Send + Sync + 'static {
    /// Inserts an active session unless another active session of the
    /// same group and owner already uses its name. The check and the
    /// insert are one atomic step.
    fn insert_unique(
        &self,
        session: Session,
    ) -> impl Future<Output = Result<InsertOutcome, StoreError>> + Send;

    /// Reads one session by id.
    fn get(
        &self,
        id: SessionId,
    ) -> impl Future<Output = Result<Option<Versioned<Session>>, StoreError>> + Send;

    /// Lists sessions matching `filter`, oldest first.
    fn find(
        &self,
        filter: &SessionFilter,
    ) -> impl Future<Output = Result<Vec<Versioned<Session>>, StoreError>> + Send;

    /// Replaces the session if its stored version is still `expected`.
    fn compare_and_swap(
        &self,
        id: SessionId,
        expected: u64,
        next: Session,
    ) -> impl Future<Output = Result<Commit<Versioned<Session>>, StoreError>> + Send;

    /// Deletes the session if its stored version is still `expected`.
    /// Returns the removed session.
    fn delete_if(
        &self,
        id: SessionId,
        expected: u64,
    ) -> impl Future<Output = Result<Commit<Session>, StoreError>> + Send;

    /// Deletes every session matching `filter`. Returns how many were removed.
    fn delete_where(
        &self,
        filter: &SessionFilter,
    ) -> impl Future<Output = Result<usize, StoreError>> + Send;
}

impl<S: SessionStore> SessionStore for Arc<S> {
    fn insert_unique(
        &self,
        session: Session,
    ) -> impl Future<Output = Result<InsertOutcome, StoreError>> + Send {
        (**self).insert_unique(session)
    }

    fn get(
        &self,
        id: SessionId,
    ) -> impl Future<Output = Result<Option<Versioned<Session>>, StoreError>> + Send {
        (**self).get(id)
    }

    fn find(
        &self,
        filter: &SessionFilter,
    ) -> impl Future<Output = Result<Vec<Versioned<Session>>, StoreError>> + Send {
        (**self).find(filter)
    }

    fn compare_and_swap(
        &self,
        id: SessionId,
        expected: u64,
        next: Session,
    ) -> impl Future<Output = Result<Commit<Versioned<Session>>, StoreError>> + Send {
        (**self).compare_and_swap(id, expected, next)
    }

    fn delete_if(
        &self,
        id: SessionId,
        expected: u64,
    ) -> impl Future<Output = Result<Commit<Session>, StoreError>> + Send {
        (**self).delete_if(id, expected)
    }

    fn delete_where(
        &self,
        filter: &SessionFilter,
    ) -> impl Future<Output = Result<usize, StoreError>> + Send {
        (**self).delete_where(filter)
    }
}
