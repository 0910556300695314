//! Group and member directory for Rollcall.
//!
//! The attendance engine needs to read two things about groups: whether a
//! group exists for a given owner, and who its members are (with their
//! registered face templates). [`GroupDirectory`] is that read contract.
//!
//! [`MemoryDirectory`] is an in-process implementation that also offers
//! the write side (creating groups, registering members) so the whole
//! flow can run without a database.

mod directory;
mod error;
mod memory;

pub use directory::GroupDirectory;
pub use error::DirectoryError;
pub use memory::MemoryDirectory;
