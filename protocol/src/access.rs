//! Capability checks.
//!
//! Role and ownership checks are performed here, by the engine, rather than
//! trusted from the caller. Every mutating operation gates itself with one
//! of these `require_*` guards before touching the store.

use crate::errors::{ProtocolError, Result};
use crate::storage::Store;
use crate::types::{PaymentMethod, ProjectId, UserId, UserRole};

/// Caller must exist and hold `role`.
pub fn require_role(store: &Store, user_id: UserId, role: UserRole) -> Result<()> {
    let user = store.user(user_id)?;
    if user.role != role {
        return Err(ProtocolError::NotAuthorized(user_id));
    }
    Ok(())
}

/// Caller must be the creator who owns the project.
pub fn require_project_creator(store: &Store, user_id: UserId, project_id: ProjectId) -> Result<()> {
    store.user(user_id)?;
    let project = store.project(project_id)?;
    if project.creator_id != user_id {
        return Err(ProtocolError::NotAuthorized(user_id));
    }
    Ok(())
}

/// Caller must be able to verify milestones and release escrowed funds.
/// Donors hold this capability; the escrow timer bypasses it internally.
pub fn require_approver(store: &Store, user_id: UserId) -> Result<()> {
    require_role(store, user_id, UserRole::Donor)
}

/// A payment method may only be managed by its owner.
pub fn require_method_owner(method: &PaymentMethod, user_id: UserId) -> Result<()> {
    if method.user_id != user_id {
        return Err(ProtocolError::NotAuthorized(user_id));
    }
    Ok(())
}
