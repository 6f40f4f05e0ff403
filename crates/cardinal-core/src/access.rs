use std::collections::{BTreeMap, BTreeSet};

use contracts::{GameError, Role};

/// Explicit (role, account) membership. Privileged operations call
/// [`AccessRegistry::require_role`] before touching any other state.
#[derive(Debug, Clone, Default)]
pub struct AccessRegistry {
    members: BTreeMap<Role, BTreeSet<String>>,
}

impl AccessRegistry {
    /// Registry with `seed_holder` granted both the admin and
    /// game-master roles, so the realm is administrable from tick zero.
    pub fn seeded(seed_holder: &str) -> Self {
        let mut registry = Self::default();
        for role in [Role::Admin, Role::GameMaster] {
            registry
                .members
                .entry(role)
                .or_default()
                .insert(seed_holder.to_string());
        }
        registry
    }

    pub fn has_role(&self, role: Role, account: &str) -> bool {
        self.members
            .get(&role)
            .is_some_and(|holders| holders.contains(account))
    }

    pub fn require_role(&self, role: Role, account: &str) -> Result<(), GameError> {
        if self.has_role(role, account) {
            Ok(())
        } else {
            Err(GameError::Unauthorized)
        }
    }

    /// Grants `role` to `account`. Returns whether membership changed.
    pub fn grant_role(
        &mut self,
        role: Role,
        account: &str,
        caller: &str,
    ) -> Result<bool, GameError> {
        self.require_role(Role::Admin, caller)?;
        Ok(self
            .members
            .entry(role)
            .or_default()
            .insert(account.to_string()))
    }

    /// Revokes `role` from `account`. Returns whether membership changed.
    pub fn revoke_role(
        &mut self,
        role: Role,
        account: &str,
        caller: &str,
    ) -> Result<bool, GameError> {
        self.require_role(Role::Admin, caller)?;
        Ok(self
            .members
            .get_mut(&role)
            .is_some_and(|holders| holders.remove(account)))
    }
}
