//! Session lifecycle engine for Rollcall.
//!
//! [`AttendanceEngine`] owns every business rule about sessions:
//!
//! 1. **Lifecycle**: start, end, delete; one active session per name.
//! 2. **Adjudication**: a submitted photo counts for at most one member,
//!    at most once, never above the session's cap.
//! 3. **Correction**: organizers fix counts by hand once a session ends.
//! 4. **Queries**: active/ended listings, finalized detail and roster.
//!
//! # Concurrency
//!
//! Each mutation is a read → compute → conditional write loop against the
//! [`SessionStore`](rollcall_store::SessionStore). A lost race re-reads and
//! re-evaluates the rules, so a validation that loses to `end_session`
//! sees the session ended and fails with
//! [`AttendanceError::SessionHasEnded`]. Retries are invisible to callers
//! unless the attempt budget in [`EngineConfig`] runs out.
//!
//! ```text
//! Caller (presentation layer)
//!     ↕  typed Result<_, AttendanceError>
//! Engine (this crate)
//!     ↕            ↕              ↕
//! Directory    FaceMatcher    SessionStore
//! ```

mod commit;
mod config;
mod engine;
mod error;
mod queries;

pub use config::{ConfigError, EngineConfig};
pub use engine::AttendanceEngine;
pub use error::{AttendanceError, ErrorKind, InternalError};
