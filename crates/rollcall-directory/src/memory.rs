//! In-process group directory.

use rollcall_model::{FaceDescriptor, Group, Member, OwnerId};
use tokio::sync::RwLock;

use crate::{DirectoryError, GroupDirectory};

/// A [`GroupDirectory`] backed by a `Vec` behind a `RwLock`.
///
/// Groups are kept in creation order, which is also the order
/// [`groups_of`](Self::groups_of) returns them in.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    groups: RwLock<Vec<Group>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty group for `owner`.
    ///
    /// # Errors
    /// [`DirectoryError::GroupAlreadyExists`] if the owner already has a
    /// group with this name. Other owners may reuse the name.
    pub async fn create_group(
        &self,
        name: &str,
        owner: &OwnerId,
    ) -> Result<Group, DirectoryError> {
        let mut groups = self.groups.write().await;
        if groups.iter().any(|g| g.name == name && &g.owner == owner) {
            return Err(DirectoryError::GroupAlreadyExists {
                name: name.to_string(),
                owner: owner.clone(),
            });
        }

        let group = Group::new(name, owner.clone());
        groups.push(group.clone());
        tracing::info!(group = %name, %owner, group_id = %group.id, "group created");
        Ok(group)
    }

    /// Names of every group `owner` has, oldest first.
    pub async fn groups_of(&self, owner: &OwnerId) -> Vec<String> {
        self.groups
            .read()
            .await
            .iter()
            .filter(|g| &g.owner == owner)
            .map(|g| g.name.clone())
            .collect()
    }

    /// Fetches one group, failing if it doesn't exist.
    pub async fn group_by_name(
        &self,
        name: &str,
        owner: &OwnerId,
    ) -> Result<Group, DirectoryError> {
        self.lookup(name, owner)
            .await
            .ok_or_else(|| DirectoryError::GroupNotFound {
                name: name.to_string(),
                owner: owner.clone(),
            })
    }

    /// Adds a member with its face template to a group.
    ///
    /// # Errors
    /// - [`DirectoryError::GroupNotFound`]
    /// - [`DirectoryError::MemberAlreadyExists`]: names are unique per group
    pub async fn register_member(
        &self,
        group: &str,
        owner: &OwnerId,
        member: &str,
        descriptor: FaceDescriptor,
    ) -> Result<Member, DirectoryError> {
        let mut groups = self.groups.write().await;
        let record = groups
            .iter_mut()
            .find(|g| g.name == group && &g.owner == owner)
            .ok_or_else(|| DirectoryError::GroupNotFound {
                name: group.to_string(),
                owner: owner.clone(),
            })?;

        if record.has_member(member) {
            return Err(DirectoryError::MemberAlreadyExists {
                group: group.to_string(),
                member: member.to_string(),
            });
        }

        let added = Member::new(member, descriptor);
        record.members.push(added.clone());
        tracing::info!(%group, %member, "member registered");
        Ok(added)
    }

    async fn lookup(&self, name: &str, owner: &OwnerId) -> Option<Group> {
        self.groups
            .read()
            .await
            .iter()
            .find(|g| g.name == name && &g.owner == owner)
            .cloned()
    }
}

impl GroupDirectory for MemoryDirectory {
    async fn find_group(
        &self,
        name: &str,
        owner: &OwnerId,
    ) -> Result<Option<Group>, DirectoryError> {
        Ok(self.lookup(name, owner).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(id: &str) -> OwnerId {
        OwnerId::from(id)
    }

    fn face(v: f32) -> FaceDescriptor {
        FaceDescriptor::new(vec![v])
    }

    #[tokio::test]
    async fn test_create_group_then_find() {
        let dir = MemoryDirectory::new();
        let created = dir.create_group("turma-a", &owner("prof")).await.unwrap();

        let found = dir.find_group("turma-a", &owner("prof")).await.unwrap();

        assert_eq!(found.map(|g| g.id), Some(created.id));
    }

    #[tokio::test]
    async fn test_create_group_duplicate_name_same_owner_returns_error() {
        let dir = MemoryDirectory::new();
        dir.create_group("turma-a", &owner("prof")).await.unwrap();

        let result = dir.create_group("turma-a", &owner("prof")).await;

        assert!(matches!(result, Err(DirectoryError::GroupAlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_same_group_name_different_owners_are_independent() {
        let dir = MemoryDirectory::new();
        dir.create_group("turma-a", &owner("prof")).await.unwrap();
        dir.create_group("turma-a", &owner("other")).await.unwrap();

        dir.register_member("turma-a", &owner("prof"), "Alice", face(0.0))
            .await
            .unwrap();

        let other = dir.group_by_name("turma-a", &owner("other")).await.unwrap();
        assert!(other.members.is_empty());
    }

    #[tokio::test]
    async fn test_find_group_wrong_owner_is_none() {
        let dir = MemoryDirectory::new();
        dir.create_group("turma-a", &owner("prof")).await.unwrap();

        let found = dir.find_group("turma-a", &owner("intruder")).await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_groups_of_returns_creation_order() {
        let dir = MemoryDirectory::new();
        dir.create_group("b", &owner("prof")).await.unwrap();
        dir.create_group("a", &owner("prof")).await.unwrap();
        dir.create_group("c", &owner("other")).await.unwrap();

        assert_eq!(dir.groups_of(&owner("prof")).await, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_register_member_duplicate_returns_error() {
        let dir = MemoryDirectory::new();
        dir.create_group("turma-a", &owner("prof")).await.unwrap();
        dir.register_member("turma-a", &owner("prof"), "Alice", face(0.0))
            .await
            .unwrap();

        let result = dir
            .register_member("turma-a", &owner("prof"), "Alice", face(1.0))
            .await;

        assert!(matches!(result, Err(DirectoryError::MemberAlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_register_member_unknown_group_returns_error() {
        let dir = MemoryDirectory::new();

        let result = dir
            .register_member("ghost", &owner("prof"), "Alice", face(0.0))
            .await;

        assert!(matches!(result, Err(DirectoryError::GroupNotFound { .. })));
    }

    #[tokio::test]
    async fn test_members_default_returns_registration_order() {
        let dir = MemoryDirectory::new();
        dir.create_group("turma-a", &owner("prof")).await.unwrap();
        for name in ["Carol", "Alice", "Bob"] {
            dir.register_member("turma-a", &owner("prof"), name, face(0.0))
                .await
                .unwrap();
        }
        let group = dir.group_by_name("turma-a", &owner("prof")).await.unwrap();

        let members = dir.members(&group).await.unwrap();

        let names: Vec<_> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Carol", "Alice", "Bob"]);
    }
}
