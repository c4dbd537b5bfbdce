use storekeep_auth::{Principal, Role};
use storekeep_core::OperatorId;

/// Operator context for a request (identity + roles, as vouched for by the host).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorContext {
    operator_id: OperatorId,
    roles: Vec<Role>,
}

impl OperatorContext {
    pub fn new(operator_id: OperatorId, roles: Vec<Role>) -> Self {
        Self { operator_id, roles }
    }

    pub fn operator_id(&self) -> OperatorId {
        self.operator_id
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Resolve into a principal for policy checks.
    pub fn principal(&self) -> Principal {
        Principal::from_roles(self.operator_id, self.roles.clone())
    }
}
