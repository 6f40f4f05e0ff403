//! Invariant checks for the progression core: one free mint per account,
//! attribute-point conservation, reward caps, the adventure busy lock, and
//! keyed determinism.

use cardinal_core::Cardinal;
use contracts::{Attribute, GameConfig, GameError, SkillFlag};
use proptest::prelude::*;

const GM: &str = "account:root";

fn realm_with_key(key_hash: &str) -> Cardinal {
    let mut config = GameConfig::default();
    config.key_hash = key_hash.to_string();
    Cardinal::new(config)
}

fn account(index: u8) -> String {
    format!("account:player_{index}")
}

proptest! {
    #[test]
    fn free_mint_succeeds_at_most_once_per_account(claims in prop::collection::vec(0_u8..8, 1..40)) {
        let mut cardinal = realm_with_key("prop_free_mint");
        let mut claimed = std::collections::BTreeSet::new();

        for (step, index) in claims.into_iter().enumerate() {
            let owner = account(index);
            let result = cardinal.mint_free_avatar(&owner, step as u64);
            if claimed.insert(index) {
                let avatar = result.expect("first claim mints");
                prop_assert_eq!(avatar.owner, owner);
            } else {
                prop_assert_eq!(result, Err(GameError::AlreadyClaimed));
            }
        }
    }

    #[test]
    fn attribute_spend_never_exceeds_grants(
        grants in prop::collection::vec(0_u64..40, 1..8),
        spends in prop::collection::vec((0_usize..6, 0_u64..60), 1..20),
    ) {
        let mut cardinal = realm_with_key("prop_points");
        let owner = account(0);
        let avatar_id = cardinal.mint_free_avatar(&owner, 0).expect("mint").avatar_id;

        let mut granted = 0_u64;
        for (step, amount) in grants.iter().enumerate() {
            cardinal
                .add_attribute_points(GM, avatar_id, *amount, step as u64)
                .expect("grant");
            granted += amount;
        }

        let mut spent = 0_u64;
        for (step, (attribute_index, amount)) in spends.into_iter().enumerate() {
            let attribute = Attribute::from_index(attribute_index).expect("index in range");
            let before = cardinal.get_avatar(avatar_id).expect("avatar").clone();
            let result =
                cardinal.set_attributes(&owner, avatar_id, attribute, amount, 100 + step as u64);
            if amount <= before.unallocated_attribute_points {
                result.expect("covered spend succeeds");
                spent += amount;
            } else {
                prop_assert_eq!(result, Err(GameError::InsufficientPoints));
                let after = cardinal.get_avatar(avatar_id).expect("avatar");
                prop_assert_eq!(&before, after);
            }
        }

        let avatar = cardinal.get_avatar(avatar_id).expect("avatar");
        let allocated: u64 = avatar.attributes.iter().sum();
        prop_assert!(spent <= granted);
        prop_assert_eq!(allocated, spent);
        prop_assert_eq!(avatar.unallocated_attribute_points, granted - spent);
    }

    #[test]
    fn rewards_stay_within_configured_caps(
        max_cor in 0_u64..5_000,
        max_exp in 0_u64..5_000,
        tier in 1_u64..10,
        event_count in 1_u64..=32,
    ) {
        let mut cardinal = realm_with_key("prop_caps");
        let owner = account(0);
        let avatar_id = cardinal.mint_free_avatar(&owner, 0).expect("mint").avatar_id;
        cardinal
            .set_max_reward_cor(GM, tier, u128::from(max_cor), 1)
            .expect("cor cap");
        cardinal.set_max_reward_exp(GM, tier, max_exp, 2).expect("exp cap");

        let outcome = cardinal
            .do_adventure(&owner, avatar_id, tier, event_count, 10)
            .expect("adventure");

        prop_assert_eq!(outcome.event_ids.len() as u64, event_count);
        prop_assert!(outcome.total_cor <= u128::from(event_count) * u128::from(max_cor));
        prop_assert!(outcome.total_exp <= event_count * max_exp);
        for event_id in outcome.event_ids {
            let event = cardinal.get_event(event_id).expect("event");
            prop_assert!(event.reward_cor <= u128::from(max_cor));
            prop_assert!(event.reward_exp <= max_exp);
        }
    }

    #[test]
    fn busy_lock_rejects_immediate_retry(tier in 1_u64..6, retry_delay in 0_u64..60) {
        let mut cardinal = realm_with_key("prop_busy");
        let owner = account(0);
        let avatar_id = cardinal.mint_free_avatar(&owner, 0).expect("mint").avatar_id;
        cardinal.set_max_reward_cor(GM, tier, 100, 1).expect("cap");

        let start = 1_000;
        let outcome = cardinal
            .do_adventure(&owner, avatar_id, tier, 1, start)
            .expect("first adventure");
        prop_assert_eq!(outcome.busy_until, start + tier * contracts::SECONDS_PER_TIER);

        // Any retry before the deadline fails, including the same second.
        let retry_at = start + retry_delay.min(tier * contracts::SECONDS_PER_TIER - 1);
        prop_assert_eq!(
            cardinal.do_adventure(&owner, avatar_id, tier, 1, retry_at),
            Err(GameError::AvatarBusy)
        );
    }

    #[test]
    fn same_key_hash_replays_identical_outcomes(key in "[a-f0-9]{8,40}", steps in 1_u64..6) {
        let mut left = realm_with_key(&key);
        let mut right = realm_with_key(&key);

        for cardinal in [&mut left, &mut right] {
            let owner = account(0);
            cardinal.mint_free_avatar(&owner, 0).expect("mint");
            cardinal.set_max_reward_cor(GM, 1, 1_000, 1).expect("cor cap");
            cardinal.set_max_reward_exp(GM, 1, 2_000, 2).expect("exp cap");
            cardinal
                .create_new_skill(GM, "Cooking", SkillFlag::Passive, 3)
                .expect("skill");
            for step in 0..steps {
                let now = 10 + step * 2 * contracts::SECONDS_PER_TIER;
                cardinal
                    .do_adventure(&owner, 0, 1, 4, now)
                    .expect("adventure");
            }
        }

        prop_assert_eq!(left.notifications(), right.notifications());
        let left_events = left.get_adventure_events(0).expect("events");
        let right_events = right.get_adventure_events(0).expect("events");
        prop_assert_eq!(&left_events, &right_events);
        for event_id in left_events {
            prop_assert_eq!(
                left.get_event(event_id).expect("event"),
                right.get_event(event_id).expect("event")
            );
        }
    }
}
