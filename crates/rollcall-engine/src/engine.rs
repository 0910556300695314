//! The attendance engine: session lifecycle and face validation.

use std::sync::Arc;

use chrono::Utc;
use rollcall_biometrics::{AdjudicationError, FaceImage, FaceMatcher, identify, require_single_face};
use rollcall_directory::GroupDirectory;
use rollcall_model::{AttendanceEntry, Group, OwnerId, Session, ValidationOutcome};
use rollcall_store::{InsertOutcome, SessionFilter, SessionStore, Versioned};
use tracing::{debug, info};

use crate::commit::{self, Step, Target};
use crate::{AttendanceError, EngineConfig, InternalError};

/// Runs every session operation against injected collaborators.
///
/// - `D` resolves groups and members.
/// - `M` detects and matches faces. Its calls block, so they run on
///   tokio's blocking pool.
/// - `S` persists sessions with conditional writes.
///
/// The engine is cheap to share behind an `Arc`; all methods take `&self`
/// and can run concurrently.
pub struct AttendanceEngine<D, M, S> {
    pub(crate) directory: D,
    pub(crate) matcher: Arc<M>,
    pub(crate) store: S,
    pub(crate) config: EngineConfig,
}

impl<D, M, S> AttendanceEngine<D, M, S>
where
    D: GroupDirectory,
    M: FaceMatcher,
    S: SessionStore,
{
    pub fn new(directory: D, matcher: M, store: S, config: EngineConfig) -> Self {
        Self {
            directory,
            matcher: Arc::new(matcher),
            store,
            config: config.validated(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Opens a new active session for `group`.
    ///
    /// # Errors
    /// - [`AttendanceError::GroupNotFound`]: `owner` has no such group
    /// - [`AttendanceError::SessionAlreadyExists`]: an active session of
    ///   the group already uses `session_name`
    pub async fn start_session(
        &self,
        group: &str,
        owner: &OwnerId,
        session_name: &str,
        max_attendance: u32,
    ) -> Result<Session, AttendanceError> {
        self.group(group, owner).await?;

        let session = Session::new(group, session_name, owner.clone(), max_attendance, Utc::now());
        match self.store.insert_unique(session).await? {
            InsertOutcome::Inserted(stored) => {
                info!(
                    session_id = %stored.value.id,
                    %group,
                    session = %session_name,
                    max_attendance,
                    "session started"
                );
                Ok(stored.value)
            }
            InsertOutcome::Duplicate(existing) => {
                debug!(session_id = %existing, %group, session = %session_name, "duplicate active session");
                Err(AttendanceError::SessionAlreadyExists {
                    group: group.to_string(),
                    session: session_name.to_string(),
                })
            }
        }
    }

    /// Records attendance for whichever member `image` shows.
    ///
    /// Checks run in this order, each failing fast:
    ///
    /// 1. exactly one face in the image
    /// 2. the session exists and is active
    /// 3. the face matches a member of the group
    /// 4. the increment stays within `max_attendance`
    ///
    /// A member who is already validated gets
    /// [`ValidationOutcome::AlreadyValidated`] and nothing is written.
    pub async fn validate_face(
        &self,
        group: &str,
        session_name: &str,
        owner: &OwnerId,
        image: FaceImage,
    ) -> Result<ValidationOutcome, AttendanceError> {
        let target = Target::new(group, session_name);
        let image = Arc::new(image);

        let probe = Arc::clone(&image);
        self.run_matcher(move |matcher| require_single_face(matcher, &probe))
            .await?;

        let current = self.resolve(target, owner).await?;
        if !current.value.is_active() {
            return Err(target.has_ended());
        }

        let candidates = {
            let group = self.group(group, owner).await?;
            self.directory.members(&group).await?
        };
        let found = self
            .run_matcher(move |matcher| identify(matcher, &image, &candidates))
            .await?;

        let now = Utc::now();
        let member = found.member;
        let outcome = commit::mutate(&self.store, &self.config, target, current, |mut draft| {
            match draft.record_validation(&member, now) {
                Ok(ValidationOutcome::AlreadyValidated(entry)) => {
                    Ok(Step::Keep(ValidationOutcome::AlreadyValidated(entry)))
                }
                Ok(recorded) => Ok(Step::Write(draft, recorded)),
                Err(err) => Err(target.rejected(err)),
            }
        })
        .await?;

        match &outcome {
            ValidationOutcome::Recorded(entry) => info!(
                %group,
                session = %session_name,
                member = %entry.member,
                count = entry.count,
                similarity = found.similarity,
                "attendance recorded"
            ),
            ValidationOutcome::AlreadyValidated(entry) => debug!(
                %group,
                session = %session_name,
                member = %entry.member,
                "member already validated"
            ),
        }
        Ok(outcome)
    }

    /// Closes the session. Later validations fail with
    /// [`AttendanceError::SessionHasEnded`].
    pub async fn end_session(
        &self,
        group: &str,
        session_name: &str,
        owner: &OwnerId,
    ) -> Result<Session, AttendanceError> {
        let target = Target::new(group, session_name);
        let current = self.resolve(target, owner).await?;

        let now = Utc::now();
        let ended = commit::mutate(&self.store, &self.config, target, current, |mut draft| {
            draft.end(now).map_err(|err| target.rejected(err))?;
            Ok(Step::Write(draft.clone(), draft))
        })
        .await?;

        info!(
            session_id = %ended.id,
            %group,
            session = %session_name,
            present = ended.attendance().len(),
            "session ended"
        );
        Ok(ended)
    }

    /// Overwrites `member`'s count on an ended session.
    ///
    /// Creates an unvalidated entry if the member has none. The validated
    /// flag is never changed here.
    ///
    /// # Errors
    /// - [`AttendanceError::SessionIsActive`]: corrections wait for the
    ///   session to end, whatever the requested value
    /// - [`AttendanceError::MemberNotFound`]: not a member of the group
    /// - [`AttendanceError::MaxAttendanceExceeded`]: `attendance` above the cap
    pub async fn update_member_attendance(
        &self,
        group: &str,
        session_name: &str,
        owner: &OwnerId,
        member: &str,
        attendance: u32,
    ) -> Result<AttendanceEntry, AttendanceError> {
        let target = Target::new(group, session_name);
        let current = self.resolve(target, owner).await?;
        if current.value.is_active() {
            return Err(target.is_active());
        }

        let record = self.group(group, owner).await?;
        let members = self.directory.members(&record).await?;
        if !members.iter().any(|m| m.name == member) {
            return Err(AttendanceError::MemberNotFound {
                group: group.to_string(),
                member: member.to_string(),
            });
        }

        let entry = commit::mutate(&self.store, &self.config, target, current, |mut draft| {
            let entry = draft
                .correct_attendance(member, attendance)
                .map_err(|err| target.rejected(err))?
                .clone();
            Ok(Step::Write(draft, entry))
        })
        .await?;

        info!(
            %group,
            session = %session_name,
            %member,
            count = entry.count,
            "attendance corrected"
        );
        Ok(entry)
    }

    /// Finds the session a (group, owner, name) triple refers to.
    ///
    /// The active session wins. Otherwise the most recently ended one
    /// does, so a name can be reused after its session ends.
    pub(crate) async fn resolve(
        &self,
        target: Target<'_>,
        owner: &OwnerId,
    ) -> Result<Versioned<Session>, AttendanceError> {
        let filter = SessionFilter::group(target.group, owner).named(target.session);
        let mut found = self.store.find(&filter).await?;

        if let Some(pos) = found.iter().position(|s| s.value.is_active()) {
            return Ok(found.swap_remove(pos));
        }
        found
            .into_iter()
            .max_by_key(|s| s.value.ended_at)
            .ok_or_else(|| target.not_found())
    }

    async fn group(&self, name: &str, owner: &OwnerId) -> Result<Group, AttendanceError> {
        self.directory
            .find_group(name, owner)
            .await?
            .ok_or_else(|| AttendanceError::GroupNotFound {
                group: name.to_string(),
            })
    }

    /// Runs blocking matcher work off the async workers.
    async fn run_matcher<T, F>(&self, work: F) -> Result<T, AttendanceError>
    where
        T: Send + 'static,
        F: FnOnce(&M) -> Result<T, AdjudicationError> + Send + 'static,
    {
        let matcher = Arc::clone(&self.matcher);
        match tokio::task::spawn_blocking(move || work(matcher.as_ref())).await {
            Ok(result) => result.map_err(AttendanceError::from),
            Err(err) => Err(InternalError::Blocking(err.to_string()).into()),
        }
    }
}
