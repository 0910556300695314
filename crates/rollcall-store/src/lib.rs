//! Session storage for Rollcall.
//!
//! Provides the [`SessionStore`] trait the engine persists sessions
//! through, and [`MemorySessionStore`], an in-process implementation.
//!
//! # Conditional writes
//!
//! Every stored session carries a `version`. Writers read a
//! [`Versioned`] record, build the next state, and hand both back:
//!
//! ```text
//! get(id) → Versioned { version: 4, .. }
//! compare_and_swap(id, 4, next) → Committed (version 5)
//!                               → Conflict  (someone else wrote first)
//!                               → Missing   (deleted meanwhile)
//! ```
//!
//! Nothing is ever partially applied: a write either replaces the whole
//! session or does nothing.

mod error;
mod filter;
mod memory;
mod store;

pub use error::StoreError;
pub use filter::SessionFilter;
pub use memory::MemorySessionStore;
pub use store::{Commit, InsertOutcome, SessionStore, Versioned};
