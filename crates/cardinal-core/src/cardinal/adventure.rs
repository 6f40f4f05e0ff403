use contracts::{AdventureEventType, AdventureOutcome, RewardCaps};

use super::*;

impl Cardinal {
    /// Sends an idle avatar on a timed adventure. The busy lock is taken
    /// synchronously, so an immediate retry fails with `AvatarBusy` even
    /// though the rewards are already generated.
    pub fn do_adventure(
        &mut self,
        caller: &str,
        avatar_id: u64,
        duration_tier: u64,
        event_count: u64,
        now: u64,
    ) -> Result<AdventureOutcome, GameError> {
        self.avatars.require_owner(avatar_id, caller)?;
        let avatar = self.avatars.get_mut(avatar_id)?;
        let outcome = self.engine.run(
            avatar,
            duration_tier,
            event_count,
            now,
            &mut self.entropy,
            &mut self.ledger,
        )?;
        self.push_notification(
            NotificationKind::AdventureStarted,
            now,
            json!({
                "adventure_id": outcome.adventure_id,
                "avatar_id": avatar_id,
                "duration_tier": duration_tier,
                "event_ids": outcome.event_ids,
                "total_cor": outcome.total_cor.to_string(),
                "total_exp": outcome.total_exp,
                "busy_until": outcome.busy_until,
            }),
        );
        Ok(outcome)
    }

    /// Game-master-scripted ledger append for an existing adventure;
    /// bypasses the random draw but not the append-only history.
    pub fn create_adventure_event(
        &mut self,
        caller: &str,
        adventure_id: u64,
        event_type: AdventureEventType,
        reward_cor: u128,
        reward_exp: u64,
        now: u64,
    ) -> Result<u64, GameError> {
        self.access.require_role(Role::GameMaster, caller)?;
        if !self.engine.adventure_exists(adventure_id) {
            return Err(GameError::NotFound);
        }
        let event_id = self
            .ledger
            .append(adventure_id, event_type, reward_cor, reward_exp, now);
        self.push_notification(
            NotificationKind::AdventureEventRecorded,
            now,
            json!({
                "event_id": event_id,
                "adventure_id": adventure_id,
                "event_type": event_type,
                "reward_cor": reward_cor.to_string(),
                "reward_exp": reward_exp,
            }),
        );
        Ok(event_id)
    }

    pub fn set_max_reward_cor(
        &mut self,
        caller: &str,
        tier: u64,
        amount: u128,
        now: u64,
    ) -> Result<RewardCaps, GameError> {
        self.access.require_role(Role::GameMaster, caller)?;
        let caps = self.engine.set_max_reward_cor(tier, amount);
        self.push_reward_cap_notification(tier, caps, now);
        Ok(caps)
    }

    pub fn set_max_reward_exp(
        &mut self,
        caller: &str,
        tier: u64,
        amount: u64,
        now: u64,
    ) -> Result<RewardCaps, GameError> {
        self.access.require_role(Role::GameMaster, caller)?;
        let caps = self.engine.set_max_reward_exp(tier, amount);
        self.push_reward_cap_notification(tier, caps, now);
        Ok(caps)
    }

    fn push_reward_cap_notification(&mut self, tier: u64, caps: RewardCaps, now: u64) {
        self.push_notification(
            NotificationKind::RewardCapUpdated,
            now,
            json!({
                "tier": tier,
                "max_reward_cor": caps.max_reward_cor.to_string(),
                "max_reward_exp": caps.max_reward_exp,
            }),
        );
    }
}
