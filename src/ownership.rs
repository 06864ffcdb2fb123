//! The ownership check applied to every category and transaction operation.

use crate::user::UserID;

/// A resource that belongs to exactly one user.
pub(crate) trait Owned {
    /// The ID of the user that owns this resource.
    fn owner(&self) -> UserID;
}

/// Check that `actor` owns `resource`, returning the resource on success.
///
/// Every action (read, update, delete) uses this same check; there is no
/// role-based override. On failure the caller receives [crate::Error::NotFound]
/// rather than a forbidden status so that unauthorized users cannot know
/// whether another user's resource exists.
pub(crate) fn authorize_owner<R: Owned>(resource: R, actor: UserID) -> Result<R, crate::Error> {
    if resource.owner() == actor {
        Ok(resource)
    } else {
        Err(crate::Error::NotFound)
    }
}
