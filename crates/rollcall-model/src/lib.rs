//! Data model for Rollcall.
//!
//! This crate defines the aggregates the attendance engine works on:
//!
//! - **Types** ([`Group`], [`Member`], [`SessionId`], [`OwnerId`], ...):
//!   identities and directory records.
//! - **Session** ([`Session`], [`SessionStatus`]): one meeting of a group,
//!   with its lifecycle state machine.
//! - **Ledger** ([`AttendanceLedger`], [`AttendanceEntry`]): who attended,
//!   how many times, and whether a face match confirmed it.
//! - **Report** ([`SessionReport`]): the finalized roster of an ended session.
//!
//! Nothing here performs I/O. The engine loads these values from a store,
//! mutates a private copy, and writes the copy back conditionally.
//!
//! ```text
//! Engine (above)  ← reads, mutates drafts, commits
//!     ↕
//! Model (this crate)  ← invariants of Session and Ledger
//! ```

mod error;
mod ledger;
mod report;
mod session;
mod types;

pub use error::ModelError;
pub use ledger::{AttendanceEntry, AttendanceLedger, ValidationOutcome};
pub use report::{RosterLine, SessionReport};
pub use session::{Session, SessionStatus};
pub use types::{FaceDescriptor, Group, GroupId, Member, OwnerId, SessionId};
