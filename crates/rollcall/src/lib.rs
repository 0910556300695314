//! # Rollcall
//!
//! Face-validated attendance tracking for recurring group sessions.
//!
//! An organizer owns groups of members, each registered with a face
//! template. For every meeting they start a session; members submit a
//! photo, and a match against the group's templates records their
//! attendance. Once the organizer ends the session, counts can be
//! corrected by hand and the finalized roster can be read back.
//!
//! The storage, the group directory, and the face matcher are all
//! injected, so the same engine runs against in-memory collaborators in
//! tests and real backends in production.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rollcall::prelude::*;
//!
//! let directory = Arc::new(MemoryDirectory::new());
//! let engine = Rollcall::builder()
//!     .config_toml("max_commit_attempts = 4")?
//!     .build(Arc::clone(&directory), my_matcher, MemorySessionStore::new());
//!
//! let prof = OwnerId::from("prof");
//! engine.start_session("turma-a", &prof, "aula-1", 1).await?;
//! engine.validate_face("turma-a", "aula-1", &prof, photo).await?;
//! engine.end_session("turma-a", "aula-1", &prof).await?;
//! ```

mod builder;
mod error;
pub mod telemetry;

pub use builder::{Rollcall, RollcallBuilder};
pub use error::RollcallError;

pub use rollcall_biometrics as biometrics;
pub use rollcall_directory as directory;
pub use rollcall_engine as engine;
pub use rollcall_model as model;
pub use rollcall_store as store;

/// The types most callers need.
pub mod prelude {
    pub use std::sync::Arc;

    pub use rollcall_biometrics::{FaceImage, FaceMatch, FaceMatcher, MatchThreshold, MatcherError};
    pub use rollcall_directory::{GroupDirectory, MemoryDirectory};
    pub use rollcall_engine::{AttendanceEngine, AttendanceError, EngineConfig, ErrorKind};
    pub use rollcall_model::{
        AttendanceEntry, FaceDescriptor, Group, Member, OwnerId, Session, SessionReport,
        SessionStatus, ValidationOutcome,
    };
    pub use rollcall_store::{MemorySessionStore, SessionStore};

    pub use crate::{Rollcall, RollcallBuilder, RollcallError};
}
