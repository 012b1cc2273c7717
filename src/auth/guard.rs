//! Per-resource ownership checks.

use super::errors::{AuthError, AuthResult};
use super::models::UserId;

/// Decide whether `requester` may mutate a resource owned by
/// `resource_owner`.
///
/// Pure and synchronous; called before any resource mutation or deletion
/// proceeds.
///
/// # Errors
///
/// * `AuthError::Forbidden` - the requester is not the owner
pub fn check_ownership(resource_owner: UserId, requester: UserId) -> AuthResult<()> {
    if resource_owner == requester {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}
