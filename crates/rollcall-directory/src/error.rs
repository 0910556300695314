//! Error types for the directory layer.

use rollcall_model::OwnerId;

/// Errors that can occur while reading or registering groups.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The backing directory could not be reached.
    #[error("directory unavailable: {0}")]
    Unavailable(String),

    /// The owner already has a group with this name.
    #[error("group {name} already exists for {owner}")]
    GroupAlreadyExists { name: String, owner: OwnerId },

    /// No group with this name belongs to the owner.
    #[error("group {name} not found for {owner}")]
    GroupNotFound { name: String, owner: OwnerId },

    /// The group already has a member with this name.
    #[error("member {member} already registered in group {group}")]
    MemberAlreadyExists { group: String, member: String },
}
