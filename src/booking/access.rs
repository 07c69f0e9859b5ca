//! Capability checks for unit operations.
//!
//! The engine trusts that the caller already authenticated the actor and
//! verified what they may do with the unit in question; what crosses into
//! this module is a capability value, not a role string. The HTTP layer
//! builds it from the upstream identity headers.

use uuid::Uuid;

use crate::error::{AppError, Result};

/// What an authenticated actor may do with one unit
#[derive(Debug, Clone, Copy)]
pub struct UnitAccess {
    pub actor_id: Uuid,
    pub can_read_unit: bool,
    pub can_manage_unit: bool,
}

impl UnitAccess {
    /// Any authenticated customer: may read the calendar and book, never
    /// manage blocks
    pub fn customer(actor_id: Uuid) -> Self {
        Self {
            actor_id,
            can_read_unit: true,
            can_manage_unit: false,
        }
    }

    /// The unit's owner or an admin acting on their behalf
    pub fn manager(actor_id: Uuid) -> Self {
        Self {
            actor_id,
            can_read_unit: true,
            can_manage_unit: true,
        }
    }

    pub fn require_manage(&self) -> Result<()> {
        if self.can_manage_unit {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_cannot_manage() {
        let access = UnitAccess::customer(Uuid::new_v4());
        assert!(access.can_read_unit);
        assert!(access.require_manage().is_err());
    }

    #[test]
    fn test_manager_can_manage() {
        let access = UnitAccess::manager(Uuid::new_v4());
        assert!(access.require_manage().is_ok());
    }
}
