use std::collections::BTreeMap;

use contracts::{
    AdventureEventType, AdventureOutcome, Avatar, GameError, RewardCaps,
    MAX_EVENTS_PER_ADVENTURE, SCHEMA_VERSION_V1, SECONDS_PER_TIER,
};

use crate::entropy::EntropyPool;
use crate::ledger::EventLedger;

const SALT_EVENT_TYPE: u64 = 20;
const SALT_REWARD_COR: u64 = 21;
const SALT_REWARD_EXP: u64 = 23;

/// Timed activities per avatar: the busy lock, the per-tier reward cap
/// table, and bounded-random outcome generation into the ledger.
#[derive(Debug, Default)]
pub struct AdventureEngine {
    caps_by_tier: BTreeMap<u64, RewardCaps>,
    next_adventure_id: u64,
}

impl AdventureEngine {
    /// Upserts the cor cap for `tier`. The first setter for a tier
    /// configures it; the other cap reads as zero until its setter runs.
    pub fn set_max_reward_cor(&mut self, tier: u64, amount: u128) -> RewardCaps {
        let caps = self.caps_by_tier.entry(tier).or_default();
        caps.max_reward_cor = amount;
        *caps
    }

    pub fn set_max_reward_exp(&mut self, tier: u64, amount: u64) -> RewardCaps {
        let caps = self.caps_by_tier.entry(tier).or_default();
        caps.max_reward_exp = amount;
        *caps
    }

    /// Caps for `tier`; a tier never configured must not silently default
    /// to unlimited.
    pub fn caps(&self, tier: u64) -> Result<RewardCaps, GameError> {
        self.caps_by_tier
            .get(&tier)
            .copied()
            .ok_or(GameError::UnknownTier(tier))
    }

    pub fn adventure_exists(&self, adventure_id: u64) -> bool {
        adventure_id < self.next_adventure_id
    }

    pub fn adventure_count(&self) -> u64 {
        self.next_adventure_id
    }

    /// Runs one adventure for an idle avatar. All preconditions are
    /// checked before any state changes; the busy lock is taken
    /// synchronously at call time, so an immediate retry already fails.
    pub fn run(
        &mut self,
        avatar: &mut Avatar,
        duration_tier: u64,
        event_count: u64,
        now: u64,
        entropy: &mut EntropyPool,
        ledger: &mut EventLedger,
    ) -> Result<AdventureOutcome, GameError> {
        if !avatar.is_available(now) {
            return Err(GameError::AvatarBusy);
        }
        if event_count == 0 || event_count > MAX_EVENTS_PER_ADVENTURE {
            return Err(GameError::EventCountOutOfRange(event_count));
        }
        let caps = self.caps(duration_tier)?;

        avatar.busy_until = now.saturating_add(duration_tier.saturating_mul(SECONDS_PER_TIER));
        let adventure_id = self.next_adventure_id;
        self.next_adventure_id += 1;

        let mut event_ids = Vec::with_capacity(event_count as usize);
        let mut total_cor = 0_u128;
        let mut total_exp = 0_u64;
        for _ in 0..event_count {
            let type_roll =
                entropy.next_in_range(SALT_EVENT_TYPE, AdventureEventType::ALL.len() as u64 - 1);
            let event_type = AdventureEventType::ALL[type_roll as usize];
            let reward_cor = entropy.next_amount(SALT_REWARD_COR, caps.max_reward_cor);
            let reward_exp = entropy.next_in_range(SALT_REWARD_EXP, caps.max_reward_exp);

            event_ids.push(ledger.append(adventure_id, event_type, reward_cor, reward_exp, now));
            total_cor = total_cor.saturating_add(reward_cor);
            total_exp = total_exp.saturating_add(reward_exp);
        }

        Ok(AdventureOutcome {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            adventure_id,
            avatar_id: avatar.avatar_id,
            duration_tier,
            event_ids,
            total_cor,
            total_exp,
            busy_until: avatar.busy_until,
        })
    }
}
