//! API-side authorization guard.
//!
//! Checked before any catalog read or write, keeping the service layer
//! auth-agnostic.

use storekeep_auth::{authorize, AuthzError, Permission};

use crate::context::OperatorContext;

/// Check that the operator holds every permission in `required`.
pub fn require(operator: &OperatorContext, required: &[Permission]) -> Result<(), AuthzError> {
    let principal = operator.principal();
    for perm in required {
        authorize(&principal, perm)?;
    }
    Ok(())
}
