//! Permission checking.
//!
//! Authorization is a fixed two-rule policy: the owner of a resource or an
//! admin may mutate it. Nothing here performs I/O.

use crate::auth::Identity;
use crate::db::Role;
use crate::{ForumError, Result};

/// Check whether `identity` may mutate a resource owned by `owner_id`.
///
/// # Examples
///
/// ```
/// use forum::auth::{can_mutate, Identity};
/// use forum::db::Role;
///
/// let owner = Identity::new(10, "owner", Role::User);
/// let other = Identity::new(20, "other", Role::User);
/// let admin = Identity::new(30, "admin", Role::Admin);
///
/// assert!(can_mutate(10, &owner));
/// assert!(!can_mutate(10, &other));
/// assert!(can_mutate(10, &admin));
/// ```
pub fn can_mutate(owner_id: i64, identity: &Identity) -> bool {
    identity.id == owner_id || identity.role == Role::Admin
}

/// Gate a mutation on [`can_mutate`], surfacing denial as `Forbidden`.
pub fn authorize_mutation(owner_id: i64, identity: &Identity) -> Result<()> {
    if can_mutate(owner_id, identity) {
        Ok(())
    } else {
        Err(ForumError::Forbidden(
            "only the author or an admin may modify this post".to_string(),
        ))
    }
}

/// Require an authenticated identity, surfacing its absence as `Unauthorized`.
pub fn require_identity(identity: Option<&Identity>) -> Result<&Identity> {
    identity.ok_or(ForumError::Unauthorized)
}

/// Require an admin identity.
///
/// No identity is `Unauthorized`; a non-admin identity is `Forbidden`.
pub fn require_admin(identity: Option<&Identity>) -> Result<&Identity> {
    let identity = require_identity(identity)?;
    if identity.role != Role::Admin {
        return Err(ForumError::Forbidden("admin role required".to_string()));
    }
    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: i64 = 10;

    fn identity(is_owner: bool, is_admin: bool) -> Identity {
        let id = if is_owner { OWNER } else { 20 };
        let role = if is_admin { Role::Admin } else { Role::User };
        Identity::new(id, "someone", role)
    }

    #[test]
    fn test_can_mutate_truth_table() {
        for is_owner in [false, true] {
            for is_admin in [false, true] {
                let who = identity(is_owner, is_admin);
                assert_eq!(
                    can_mutate(OWNER, &who),
                    is_owner || is_admin,
                    "owner={is_owner} admin={is_admin}"
                );
            }
        }
    }

    #[test]
    fn test_authorize_mutation_owner() {
        assert!(authorize_mutation(OWNER, &identity(true, false)).is_ok());
    }

    #[test]
    fn test_authorize_mutation_admin_on_others_resource() {
        assert!(authorize_mutation(OWNER, &identity(false, true)).is_ok());
    }

    #[test]
    fn test_authorize_mutation_stranger_is_forbidden() {
        assert!(matches!(
            authorize_mutation(OWNER, &identity(false, false)),
            Err(ForumError::Forbidden(_))
        ));
    }

    #[test]
    fn test_require_identity() {
        assert!(matches!(
            require_identity(None),
            Err(ForumError::Unauthorized)
        ));
        let who = identity(true, false);
        assert_eq!(require_identity(Some(&who)).unwrap().id, OWNER);
    }

    #[test]
    fn test_require_admin() {
        assert!(matches!(require_admin(None), Err(ForumError::Unauthorized)));
        assert!(matches!(
            require_admin(Some(&identity(true, false))),
            Err(ForumError::Forbidden(_))
        ));
        assert!(require_admin(Some(&identity(false, true))).is_ok());
    }
}
