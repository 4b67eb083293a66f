//! Identity port - entitlement presence for quota gating.
//!
//! Credential validation and token issuance belong to the auth backend;
//! the engine only reads whether an identity is present.

use netrift_domain::Identity;

#[cfg_attr(test, mockall::automock)]
pub trait IdentityPort: Send + Sync {
    /// The currently signed-in identity, if any.
    fn current_identity(&self) -> Option<Identity>;

    /// Drop the stored identity (sign out).
    fn clear_identity(&self);
}
