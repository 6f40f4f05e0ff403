//! In-process API facade over the Cardinal core plus the HTTP/WebSocket
//! server. The facade's single job beyond delegation is stamping substrate
//! time onto every operation, the way the ledger stamps block time.

mod server;

pub use server::{serve, ServerError};

use std::time::{SystemTime, UNIX_EPOCH};

use cardinal_core::Cardinal;
use contracts::{
    AdventureEvent, AdventureEventType, AdventureOutcome, Attribute, Avatar, GameConfig,
    GameError, Notification, RealmStatus, RewardCaps, Role, Skill, SkillFlag,
};

/// Time source for operation stamps. `Fixed` keeps tests deterministic.
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    Fixed(u64),
}

impl Clock {
    fn now(&self) -> u64 {
        match self {
            Clock::System => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or(0),
            Clock::Fixed(now) => *now,
        }
    }
}

#[derive(Debug)]
pub struct RealmApi {
    cardinal: Cardinal,
    clock: Clock,
}

impl RealmApi {
    pub fn from_config(config: GameConfig) -> Self {
        Self::with_clock(config, Clock::System)
    }

    pub fn with_clock(config: GameConfig, clock: Clock) -> Self {
        Self {
            cardinal: Cardinal::new(config),
            clock,
        }
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn realm_id(&self) -> &str {
        self.cardinal.realm_id()
    }

    pub fn config(&self) -> &GameConfig {
        self.cardinal.config()
    }

    pub fn status(&self) -> RealmStatus {
        self.cardinal.status()
    }

    pub fn notifications(&self) -> &[Notification] {
        self.cardinal.notifications()
    }

    pub fn mint_free_avatar(&mut self, account: &str) -> Result<Avatar, GameError> {
        let now = self.clock.now();
        self.cardinal.mint_free_avatar(account, now)
    }

    pub fn mint_avatar(&mut self, account: &str, payment: u128) -> Result<Avatar, GameError> {
        let now = self.clock.now();
        self.cardinal.mint_avatar(account, payment, now)
    }

    pub fn get_avatar(&self, avatar_id: u64) -> Result<&Avatar, GameError> {
        self.cardinal.get_avatar(avatar_id)
    }

    pub fn add_attribute_points(
        &mut self,
        caller: &str,
        avatar_id: u64,
        amount: u64,
    ) -> Result<u64, GameError> {
        let now = self.clock.now();
        self.cardinal.add_attribute_points(caller, avatar_id, amount, now)
    }

    pub fn set_attributes(
        &mut self,
        caller: &str,
        avatar_id: u64,
        attribute: Attribute,
        amount: u64,
    ) -> Result<u64, GameError> {
        let now = self.clock.now();
        self.cardinal
            .set_attributes(caller, avatar_id, attribute, amount, now)
    }

    pub fn create_new_skill(
        &mut self,
        caller: &str,
        name: &str,
        flag: SkillFlag,
    ) -> Result<Skill, GameError> {
        let now = self.clock.now();
        self.cardinal.create_new_skill(caller, name, flag, now)
    }

    pub fn set_skill_requirement(
        &mut self,
        caller: &str,
        skill_id: u64,
        attribute: Attribute,
        min_value: u64,
    ) -> Result<(), GameError> {
        let now = self.clock.now();
        self.cardinal
            .set_skill_requirement(caller, skill_id, attribute, min_value, now)
    }

    pub fn get_skill(&self, skill_id: u64) -> Result<&Skill, GameError> {
        self.cardinal.get_skill(skill_id)
    }

    pub fn learn_skill(
        &mut self,
        caller: &str,
        avatar_id: u64,
        skill_id: u64,
    ) -> Result<bool, GameError> {
        let now = self.clock.now();
        self.cardinal.learn_skill(caller, avatar_id, skill_id, now)
    }

    pub fn do_adventure(
        &mut self,
        caller: &str,
        avatar_id: u64,
        duration_tier: u64,
        event_count: u64,
    ) -> Result<AdventureOutcome, GameError> {
        let now = self.clock.now();
        self.cardinal
            .do_adventure(caller, avatar_id, duration_tier, event_count, now)
    }

    pub fn create_adventure_event(
        &mut self,
        caller: &str,
        adventure_id: u64,
        event_type: AdventureEventType,
        reward_cor: u128,
        reward_exp: u64,
    ) -> Result<u64, GameError> {
        let now = self.clock.now();
        self.cardinal
            .create_adventure_event(caller, adventure_id, event_type, reward_cor, reward_exp, now)
    }

    pub fn get_event(&self, event_id: u64) -> Result<&AdventureEvent, GameError> {
        self.cardinal.get_event(event_id)
    }

    pub fn get_adventure_events(&self, adventure_id: u64) -> Result<Vec<u64>, GameError> {
        self.cardinal.get_adventure_events(adventure_id)
    }

    pub fn set_max_reward_cor(
        &mut self,
        caller: &str,
        tier: u64,
        amount: u128,
    ) -> Result<RewardCaps, GameError> {
        let now = self.clock.now();
        self.cardinal.set_max_reward_cor(caller, tier, amount, now)
    }

    pub fn set_max_reward_exp(
        &mut self,
        caller: &str,
        tier: u64,
        amount: u64,
    ) -> Result<RewardCaps, GameError> {
        let now = self.clock.now();
        self.cardinal.set_max_reward_exp(caller, tier, amount, now)
    }

    pub fn has_role(&self, role: Role, account: &str) -> bool {
        self.cardinal.has_role(role, account)
    }

    pub fn grant_role(
        &mut self,
        caller: &str,
        role: Role,
        account: &str,
    ) -> Result<bool, GameError> {
        let now = self.clock.now();
        self.cardinal.grant_role(caller, role, account, now)
    }

    pub fn revoke_role(
        &mut self,
        caller: &str,
        role: Role,
        account: &str,
    ) -> Result<bool, GameError> {
        let now = self.clock.now();
        self.cardinal.revoke_role(caller, role, account, now)
    }

    pub fn current_price(&self) -> u128 {
        self.cardinal.current_price()
    }

    pub fn set_current_price(&mut self, caller: &str, amount: u128) -> Result<(), GameError> {
        let now = self.clock.now();
        self.cardinal.set_current_price(caller, amount, now)
    }
}
