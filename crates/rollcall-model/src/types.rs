//! Identity types and directory records.
//!
//! Groups and members are owned by the directory; the engine only reads
//! them. Sessions refer to their group by name, scoped to an owner.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A generated identifier for a session.
///
/// Newtype over a v4 UUID so a session id can never be passed where a
/// group id is expected. Serializes as the bare UUID string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.0)
    }
}

/// A generated identifier for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub Uuid);

impl GroupId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G-{}", self.0)
    }
}

/// The authenticated user who owns groups and creates sessions.
///
/// Rollcall never authenticates anyone; the caller hands over whatever
/// user id its auth layer produced and every lookup is scoped by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OwnerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Biometric template
// ---------------------------------------------------------------------------

/// An opaque face template registered for a member.
///
/// Only a `FaceMatcher` interprets the numbers; the model just carries
/// them between the directory and the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceDescriptor(pub Vec<f32>);

impl FaceDescriptor {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self(values.into())
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Directory records
// ---------------------------------------------------------------------------

/// A person in a group, identified by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Unique within the owning group.
    pub name: String,
    /// Registered template used for automatic validation.
    pub descriptor: FaceDescriptor,
}

impl Member {
    pub fn new(name: impl Into<String>, descriptor: FaceDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
        }
    }
}

/// A named, owner-scoped collection of members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    /// Unique per owner.
    pub name: String,
    pub owner: OwnerId,
    pub created_at: DateTime<Utc>,
    /// Members in registration order.
    pub members: Vec<Member>,
}

impl Group {
    /// Creates an empty group stamped with the current time.
    pub fn new(name: impl Into<String>, owner: OwnerId) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
            owner,
            created_at: Utc::now(),
            members: Vec::new(),
        }
    }

    /// Looks up a member by name.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.member(name).is_some()
    }
}
