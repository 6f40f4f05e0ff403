use std::collections::{BTreeMap, BTreeSet};

use contracts::{
    Attribute, Avatar, GameError, Gender, Rarity, ATTRIBUTE_COUNT, SCHEMA_VERSION_V1,
};

use crate::entropy::EntropyPool;

// Mint distribution in percent: Common 50, Uncommon 25, Rare 15, Epic 8,
// Legendary 2.
const RARITY_WEIGHTS: [(Rarity, u64); 5] = [
    (Rarity::Common, 50),
    (Rarity::Uncommon, 25),
    (Rarity::Rare, 15),
    (Rarity::Epic, 8),
    (Rarity::Legendary, 2),
];

const SALT_GENDER: u64 = 10;
const SALT_RARITY: u64 = 11;

/// Avatar identity, ownership, attributes, and the attribute-point economy.
#[derive(Debug, Default)]
pub struct AvatarRegistry {
    avatars: BTreeMap<u64, Avatar>,
    next_avatar_id: u64,
    free_mint_claimed: BTreeSet<String>,
}

impl AvatarRegistry {
    /// Marks the one-time free mint as used for `account`. The flag is set
    /// exactly once and never cleared.
    pub fn claim_free_mint(&mut self, account: &str) -> Result<(), GameError> {
        if !self.free_mint_claimed.insert(account.to_string()) {
            return Err(GameError::AlreadyClaimed);
        }
        Ok(())
    }

    /// Mints a fresh avatar with traits drawn from the entropy pool.
    pub fn mint(&mut self, owner: &str, entropy: &mut EntropyPool, now: u64) -> &Avatar {
        let avatar_id = self.next_avatar_id;
        self.next_avatar_id += 1;

        let gender = if entropy.next_in_range(SALT_GENDER, 1) == 0 {
            Gender::Female
        } else {
            Gender::Male
        };
        let rarity = rarity_from_roll(entropy.next_in_range(SALT_RARITY, 99));

        let avatar = Avatar {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            avatar_id,
            owner: owner.to_string(),
            gender,
            rarity,
            attributes: [0; ATTRIBUTE_COUNT],
            unallocated_attribute_points: 0,
            learned_skills: BTreeSet::new(),
            busy_until: 0,
            minted_at: now,
        };
        self.avatars.entry(avatar_id).or_insert(avatar)
    }

    pub fn get(&self, avatar_id: u64) -> Result<&Avatar, GameError> {
        self.avatars.get(&avatar_id).ok_or(GameError::NotFound)
    }

    pub fn get_mut(&mut self, avatar_id: u64) -> Result<&mut Avatar, GameError> {
        self.avatars.get_mut(&avatar_id).ok_or(GameError::NotFound)
    }

    pub fn require_owner(&self, avatar_id: u64, caller: &str) -> Result<&Avatar, GameError> {
        let avatar = self.get(avatar_id)?;
        if avatar.owner != caller {
            return Err(GameError::NotOwner);
        }
        Ok(avatar)
    }

    pub fn add_attribute_points(&mut self, avatar_id: u64, amount: u64) -> Result<u64, GameError> {
        let avatar = self.get_mut(avatar_id)?;
        avatar.unallocated_attribute_points = avatar
            .unallocated_attribute_points
            .saturating_add(amount);
        Ok(avatar.unallocated_attribute_points)
    }

    /// One-shot spend: raises the named attribute by `amount` and debits
    /// the unallocated pool by the same amount. Never a target-setter.
    pub fn spend_attribute_points(
        &mut self,
        avatar_id: u64,
        attribute: Attribute,
        amount: u64,
    ) -> Result<u64, GameError> {
        let avatar = self.get_mut(avatar_id)?;
        if amount > avatar.unallocated_attribute_points {
            return Err(GameError::InsufficientPoints);
        }
        avatar.unallocated_attribute_points -= amount;
        avatar.attributes[attribute.index()] += amount;
        Ok(avatar.attributes[attribute.index()])
    }

    pub fn len(&self) -> usize {
        self.avatars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.avatars.is_empty()
    }
}

fn rarity_from_roll(roll: u64) -> Rarity {
    let mut remaining = roll;
    for (rarity, weight) in RARITY_WEIGHTS {
        if remaining < weight {
            return rarity;
        }
        remaining -= weight;
    }
    Rarity::Common
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rarity_roll_covers_all_tiers() {
        assert_eq!(rarity_from_roll(0), Rarity::Common);
        assert_eq!(rarity_from_roll(49), Rarity::Common);
        assert_eq!(rarity_from_roll(50), Rarity::Uncommon);
        assert_eq!(rarity_from_roll(74), Rarity::Uncommon);
        assert_eq!(rarity_from_roll(75), Rarity::Rare);
        assert_eq!(rarity_from_roll(89), Rarity::Rare);
        assert_eq!(rarity_from_roll(90), Rarity::Epic);
        assert_eq!(rarity_from_roll(97), Rarity::Epic);
        assert_eq!(rarity_from_roll(98), Rarity::Legendary);
        assert_eq!(rarity_from_roll(99), Rarity::Legendary);
    }

    #[test]
    fn spend_debits_pool_and_raises_attribute() {
        let mut registry = AvatarRegistry::default();
        let mut entropy = EntropyPool::from_key_hash("test");
        let avatar_id = registry.mint("account:alice", &mut entropy, 100).avatar_id;

        registry.add_attribute_points(avatar_id, 50).expect("grant");
        let strength = registry
            .spend_attribute_points(avatar_id, Attribute::Strength, 30)
            .expect("spend");
        assert_eq!(strength, 30);

        let avatar = registry.get(avatar_id).expect("avatar");
        assert_eq!(avatar.unallocated_attribute_points, 20);
        assert_eq!(
            registry.spend_attribute_points(avatar_id, Attribute::Strength, 21),
            Err(GameError::InsufficientPoints)
        );
    }
}
