//! Listing, detail, and deletion of sessions.

use rollcall_biometrics::FaceMatcher;
use rollcall_directory::GroupDirectory;
use rollcall_model::{OwnerId, Session, SessionReport};
use rollcall_store::{SessionFilter, SessionStore};
use tracing::info;

use crate::commit::{self, Step, Target};
use crate::{AttendanceEngine, AttendanceError};

impl<D, M, S> AttendanceEngine<D, M, S>
where
    D: GroupDirectory,
    M: FaceMatcher,
    S: SessionStore,
{
    /// Active sessions of the group, oldest first. Empty if none.
    pub async fn list_active_sessions(
        &self,
        group: &str,
        owner: &OwnerId,
    ) -> Result<Vec<Session>, AttendanceError> {
        self.list(SessionFilter::group(group, owner).active()).await
    }

    /// Ended sessions of the group, oldest first. Empty if none.
    pub async fn list_ended_sessions(
        &self,
        group: &str,
        owner: &OwnerId,
    ) -> Result<Vec<Session>, AttendanceError> {
        self.list(SessionFilter::group(group, owner).ended()).await
    }

    /// The full record of an ended session, ledger included.
    ///
    /// # Errors
    /// [`AttendanceError::SessionNotFinalized`] while the session is active.
    pub async fn session_detail(
        &self,
        group: &str,
        session_name: &str,
        owner: &OwnerId,
    ) -> Result<Session, AttendanceError> {
        let target = Target::new(group, session_name);
        let current = self.resolve(target, owner).await?;
        if current.value.is_active() {
            return Err(target.not_finalized());
        }
        Ok(current.value)
    }

    /// Roster of an ended session: every member of the group with their
    /// count, absent members included at zero.
    pub async fn session_report(
        &self,
        group: &str,
        session_name: &str,
        owner: &OwnerId,
    ) -> Result<SessionReport, AttendanceError> {
        let target = Target::new(group, session_name);
        let session = self.session_detail(group, session_name, owner).await?;

        // The group may have been removed since; report the ledger alone.
        let members = match self.directory.find_group(group, owner).await? {
            Some(record) => self.directory.members(&record).await?,
            None => Vec::new(),
        };

        SessionReport::build(&session, &members).map_err(|err| target.rejected(err))
    }

    /// Deletes the session the name resolves to and returns it.
    pub async fn delete_session(
        &self,
        group: &str,
        session_name: &str,
        owner: &OwnerId,
    ) -> Result<Session, AttendanceError> {
        let target = Target::new(group, session_name);
        let current = self.resolve(target, owner).await?;

        let deleted = commit::mutate(&self.store, &self.config, target, current, |session| {
            Ok(Step::Delete(session))
        })
        .await?;

        info!(session_id = %deleted.id, %group, session = %session_name, "session deleted");
        Ok(deleted)
    }

    /// Deletes every active session of the group. Returns how many went.
    pub async fn delete_active_sessions(
        &self,
        group: &str,
        owner: &OwnerId,
    ) -> Result<usize, AttendanceError> {
        self.purge(group, SessionFilter::group(group, owner).active())
            .await
    }

    /// Deletes every ended session of the group. Returns how many went.
    pub async fn delete_ended_sessions(
        &self,
        group: &str,
        owner: &OwnerId,
    ) -> Result<usize, AttendanceError> {
        self.purge(group, SessionFilter::group(group, owner).ended())
            .await
    }

    async fn list(&self, filter: SessionFilter) -> Result<Vec<Session>, AttendanceError> {
        let found = self.store.find(&filter).await?;
        Ok(found.into_iter().map(|v| v.value).collect())
    }

    async fn purge(&self, group: &str, filter: SessionFilter) -> Result<usize, AttendanceError> {
        let removed = self.store.delete_where(&filter).await?;
        if removed > 0 {
            info!(%group, status = ?filter.status, removed, "sessions deleted");
        }
        Ok(removed)
    }
}
