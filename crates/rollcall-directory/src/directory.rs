//! The read contract the engine consumes.

use std::future::Future;
use std::sync::Arc;

use rollcall_model::{Group, Member, OwnerId};

use crate::DirectoryError;

/// Resolves groups and their members.
///
/// # Trait bounds
///
/// - `Send + Sync` → shared by every concurrent engine call.
/// - `'static` → lives as long as the engine that owns it.
///
/// Both methods return `Send` futures so the engine's own futures stay
/// `Send` and can be spawned on a multi-threaded runtime.
pub trait GroupDirectory: Send + Sync + 'static {
    /// Finds the group called `name` owned by `owner`.
    ///
    /// # Returns
    /// - `Ok(Some(group))`: found
    /// - `Ok(None)`: no such group for this owner
    /// - `Err(_)`: the directory itself failed
    fn find_group(
        &self,
        name: &str,
        owner: &OwnerId,
    ) -> impl Future<Output = Result<Option<Group>, DirectoryError>> + Send;

    /// Lists the members of `group` in registration order.
    ///
    /// Defaults to the members embedded in the group record. Override
    /// when members are stored separately.
    fn members(
        &self,
        group: &Group,
    ) -> impl Future<Output = Result<Vec<Member>, DirectoryError>> + Send {
        let members = group.members.clone();
        async move { Ok(members) }
    }
}

impl<D: GroupDirectory> GroupDirectory for Arc<D> {
    fn find_group(
        &self,
        name: &str,
        owner: &OwnerId,
    ) -> impl Future<Output = Result<Option<Group>, DirectoryError>> + Send {
        (**self).find_group(name, owner)
    }

    fn members(
        &self,
        group: &Group,
    ) -> impl Future<Output = Result<Vec<Member>, DirectoryError>> + Send {
        (**self).members(group)
    }
}
