//! Role-Based Access Control
//!
//! Explicit `(role, account)` membership set. Mutations require the caller to
//! hold `Admin`, except renouncing a role one holds.

use crate::domain::{Address, BridgeError, BridgeResult, Role};
use std::collections::HashSet;

/// Role membership set.
#[derive(Clone, Debug, Default)]
pub struct AccessControl {
    members: HashSet<(Role, Address)>,
}

impl AccessControl {
    /// Bootstrap with every role granted to `deployer`.
    pub fn bootstrap(deployer: Address) -> Self {
        Self {
            members: Role::ALL.into_iter().map(|role| (role, deployer)).collect(),
        }
    }

    /// Membership predicate.
    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.members.contains(&(role, *account))
    }

    /// `Unauthorized` unless `account` holds `role`.
    pub fn require_role(&self, role: Role, account: &Address) -> BridgeResult<()> {
        if self.has_role(role, account) {
            Ok(())
        } else {
            Err(BridgeError::missing_role(*account, role))
        }
    }

    /// Grant `role`. Returns false if it was already held.
    pub fn grant_role(
        &mut self,
        role: Role,
        account: Address,
        caller: &Address,
    ) -> BridgeResult<bool> {
        self.require_role(Role::Admin, caller)?;
        Ok(self.members.insert((role, account)))
    }

    /// Revoke `role`. Returns false if it was not held.
    pub fn revoke_role(
        &mut self,
        role: Role,
        account: &Address,
        caller: &Address,
    ) -> BridgeResult<bool> {
        self.require_role(Role::Admin, caller)?;
        Ok(self.members.remove(&(role, *account)))
    }

    /// Drop a role the caller holds. Returns false if it was not held.
    pub fn renounce_role(&mut self, role: Role, caller: &Address) -> bool {
        self.members.remove(&(role, *caller))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPLOYER: Address = Address::new([0xD0; 20]);
    const ALICE: Address = Address::new([0xA1; 20]);

    #[test]
    fn test_bootstrap_grants_all_roles() {
        let acl = AccessControl::bootstrap(DEPLOYER);
        for role in Role::ALL {
            assert!(acl.has_role(role, &DEPLOYER));
            assert!(!acl.has_role(role, &ALICE));
        }
    }

    #[test]
    fn test_admin_grants_and_revokes() {
        let mut acl = AccessControl::bootstrap(DEPLOYER);
        assert!(acl.grant_role(Role::Mapper, ALICE, &DEPLOYER).unwrap());
        assert!(!acl.grant_role(Role::Mapper, ALICE, &DEPLOYER).unwrap());
        assert!(acl.has_role(Role::Mapper, &ALICE));

        assert!(acl.revoke_role(Role::Mapper, &ALICE, &DEPLOYER).unwrap());
        assert!(!acl.has_role(Role::Mapper, &ALICE));
        assert!(!acl.revoke_role(Role::Mapper, &ALICE, &DEPLOYER).unwrap());
    }

    #[test]
    fn test_non_admin_cannot_grant() {
        let mut acl = AccessControl::bootstrap(DEPLOYER);
        let result = acl.grant_role(Role::Admin, ALICE, &ALICE);
        assert!(matches!(result, Err(BridgeError::Unauthorized { .. })));
        assert!(!acl.has_role(Role::Admin, &ALICE));
    }

    #[test]
    fn test_renounce() {
        let mut acl = AccessControl::bootstrap(DEPLOYER);
        assert!(acl.renounce_role(Role::StateSyncer, &DEPLOYER));
        assert!(!acl.has_role(Role::StateSyncer, &DEPLOYER));
        assert!(!acl.renounce_role(Role::StateSyncer, &DEPLOYER));
        assert!(acl.has_role(Role::Admin, &DEPLOYER));
    }
}
