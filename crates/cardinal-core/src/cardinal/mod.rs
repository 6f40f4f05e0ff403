mod adventure;
mod mint;
mod progression;

use contracts::{
    AdventureEvent, Avatar, GameConfig, GameError, Notification, NotificationKind, RealmStatus,
    Role, Skill, SCHEMA_VERSION_V1,
};
use serde_json::{json, Value};

use crate::access::AccessRegistry;
use crate::adventure::AdventureEngine;
use crate::avatars::AvatarRegistry;
use crate::entropy::EntropyPool;
use crate::ledger::EventLedger;
use crate::oracle::{BasicPriceOracle, PriceSource};
use crate::skills::SkillCatalog;

/// Composition root over the registries. Public operations authorize
/// first, then mutate; cross-entity invariants (only the owner spends an
/// avatar's points, only idle avatars adventure) are enforced here where
/// both sides of the check are in reach.
#[derive(Debug)]
pub struct Cardinal {
    config: GameConfig,
    access: AccessRegistry,
    avatars: AvatarRegistry,
    skills: SkillCatalog,
    engine: AdventureEngine,
    ledger: EventLedger,
    oracle: BasicPriceOracle,
    entropy: EntropyPool,
    notifications: Vec<Notification>,
}

impl Cardinal {
    pub fn new(config: GameConfig) -> Self {
        let access = AccessRegistry::seeded(&config.game_master);
        let entropy = EntropyPool::from_key_hash(&config.key_hash);
        Self {
            config,
            access,
            avatars: AvatarRegistry::default(),
            skills: SkillCatalog::default(),
            engine: AdventureEngine::default(),
            ledger: EventLedger::default(),
            oracle: BasicPriceOracle::default(),
            entropy,
            notifications: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn realm_id(&self) -> &str {
        &self.config.realm_id
    }

    pub fn status(&self) -> RealmStatus {
        RealmStatus {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            realm_id: self.config.realm_id.clone(),
            avatar_count: self.avatars.len(),
            skill_count: self.skills.len(),
            adventure_count: self.engine.adventure_count(),
            event_count: self.ledger.len(),
            notification_count: self.notifications.len(),
        }
    }

    // Role membership.

    pub fn has_role(&self, role: Role, account: &str) -> bool {
        self.access.has_role(role, account)
    }

    pub fn grant_role(
        &mut self,
        caller: &str,
        role: Role,
        account: &str,
        now: u64,
    ) -> Result<bool, GameError> {
        let changed = self.access.grant_role(role, account, caller)?;
        if changed {
            self.push_notification(
                NotificationKind::RoleGranted,
                now,
                json!({ "role": role, "account": account, "granted_by": caller }),
            );
        }
        Ok(changed)
    }

    pub fn revoke_role(
        &mut self,
        caller: &str,
        role: Role,
        account: &str,
        now: u64,
    ) -> Result<bool, GameError> {
        let changed = self.access.revoke_role(role, account, caller)?;
        if changed {
            self.push_notification(
                NotificationKind::RoleRevoked,
                now,
                json!({ "role": role, "account": account, "revoked_by": caller }),
            );
        }
        Ok(changed)
    }

    // Read surface.

    pub fn get_avatar(&self, avatar_id: u64) -> Result<&Avatar, GameError> {
        self.avatars.get(avatar_id)
    }

    pub fn get_skill(&self, skill_id: u64) -> Result<&Skill, GameError> {
        self.skills.get(skill_id)
    }

    pub fn get_event(&self, event_id: u64) -> Result<&AdventureEvent, GameError> {
        self.ledger.get(event_id)
    }

    /// Event ids of one adventure in creation order.
    pub fn get_adventure_events(&self, adventure_id: u64) -> Result<Vec<u64>, GameError> {
        if !self.engine.adventure_exists(adventure_id) {
            return Err(GameError::NotFound);
        }
        Ok(self.ledger.adventure_events(adventure_id))
    }

    pub fn current_price(&self) -> u128 {
        self.oracle.current_price()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub(super) fn push_notification(&mut self, kind: NotificationKind, timestamp: u64, payload: Value) {
        let notification_id = self.notifications.len() as u64;
        self.notifications.push(Notification::new(
            notification_id,
            self.config.realm_id.clone(),
            kind,
            timestamp,
            payload,
        ));
    }
}

#[cfg(test)]
mod tests;
