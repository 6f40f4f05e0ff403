use contracts::{AdventureEventType, Attribute, SkillFlag};

use super::*;

const GM: &str = "account:root";
const ALICE: &str = "account:alice";
const BOB: &str = "account:bob";

fn realm() -> Cardinal {
    Cardinal::new(GameConfig::default())
}

#[test]
fn free_mint_succeeds_once_per_account() {
    let mut cardinal = realm();
    let first = cardinal.mint_free_avatar(ALICE, 100).expect("first mint");
    assert_eq!(first.owner, ALICE);
    assert_eq!(first.attributes, [0; contracts::ATTRIBUTE_COUNT]);
    assert_eq!(first.unallocated_attribute_points, 0);
    assert!(first.is_available(100));

    assert_eq!(
        cardinal.mint_free_avatar(ALICE, 101),
        Err(GameError::AlreadyClaimed)
    );

    // Another account still mints, and ids stay monotone.
    let second = cardinal.mint_free_avatar(BOB, 102).expect("bob mint");
    assert_eq!(second.avatar_id, first.avatar_id + 1);
}

#[test]
fn paid_mint_checks_oracle_price_and_skips_claim_flag() {
    let mut cardinal = realm();
    cardinal.set_current_price(GM, 10, 50).expect("set price");

    assert_eq!(
        cardinal.mint_avatar(ALICE, 9, 51),
        Err(GameError::InsufficientPayment)
    );

    let first = cardinal.mint_avatar(ALICE, 10, 52).expect("paid mint");
    let second = cardinal.mint_avatar(ALICE, 25, 53).expect("second paid mint");
    assert_eq!(second.avatar_id, first.avatar_id + 1);

    // The paid path never consumes the free claim.
    cardinal.mint_free_avatar(ALICE, 54).expect("free mint still open");
}

#[test]
fn skill_creation_is_game_master_only_with_sequential_ids() {
    let mut cardinal = realm();
    let cooking = cardinal
        .create_new_skill(GM, "Cooking", SkillFlag::Passive, 10)
        .expect("cooking");
    assert_eq!(cooking.skill_id, 0);

    assert_eq!(
        cardinal.create_new_skill(ALICE, "Mining", SkillFlag::Passive, 11),
        Err(GameError::Unauthorized)
    );

    let healing = cardinal
        .create_new_skill(GM, "Healing", SkillFlag::Active, 12)
        .expect("healing");
    assert_eq!(healing.skill_id, 1);

    assert_eq!(
        cardinal.create_new_skill(GM, "cooking", SkillFlag::Active, 13),
        Err(GameError::DuplicateName("cooking".to_string()))
    );
}

#[test]
fn learn_requires_ownership() {
    let mut cardinal = realm();
    let avatar = cardinal.mint_free_avatar(ALICE, 0).expect("mint");
    let skill = cardinal
        .create_new_skill(GM, "Cooking", SkillFlag::Passive, 1)
        .expect("skill");

    assert_eq!(
        cardinal.learn_skill(BOB, avatar.avatar_id, skill.skill_id, 2),
        Err(GameError::NotOwner)
    );

    assert_eq!(
        cardinal.learn_skill(ALICE, avatar.avatar_id, skill.skill_id, 3),
        Ok(true)
    );
    let learned = &cardinal
        .get_avatar(avatar.avatar_id)
        .expect("avatar")
        .learned_skills;
    assert!(learned.contains(&skill.skill_id));

    // Redundant success on re-learn.
    assert_eq!(
        cardinal.learn_skill(ALICE, avatar.avatar_id, skill.skill_id, 4),
        Ok(false)
    );
}

#[test]
fn learn_enforces_attribute_requirement() {
    let mut cardinal = realm();
    let avatar = cardinal.mint_free_avatar(ALICE, 0).expect("mint");
    let berserk = cardinal
        .create_new_skill(GM, "Berserk", SkillFlag::Active, 1)
        .expect("skill");
    cardinal
        .set_skill_requirement(GM, berserk.skill_id, Attribute::Strength, 50, 2)
        .expect("requirement");

    assert_eq!(
        cardinal.learn_skill(ALICE, avatar.avatar_id, berserk.skill_id, 3),
        Err(GameError::RequirementNotMet)
    );

    cardinal
        .add_attribute_points(GM, avatar.avatar_id, 50, 4)
        .expect("grant");
    cardinal
        .set_attributes(ALICE, avatar.avatar_id, Attribute::Strength, 50, 5)
        .expect("spend");
    assert_eq!(
        cardinal.learn_skill(ALICE, avatar.avatar_id, berserk.skill_id, 6),
        Ok(true)
    );
}

#[test]
fn attribute_points_are_a_one_shot_spend() {
    let mut cardinal = realm();
    let avatar = cardinal.mint_free_avatar(ALICE, 0).expect("mint");

    assert_eq!(
        cardinal.add_attribute_points(ALICE, avatar.avatar_id, 50, 1),
        Err(GameError::Unauthorized)
    );
    cardinal
        .add_attribute_points(GM, avatar.avatar_id, 50, 2)
        .expect("grant");

    let strength = cardinal
        .set_attributes(ALICE, avatar.avatar_id, Attribute::Strength, 50, 3)
        .expect("first spend");
    assert_eq!(strength, 50);

    // The same call again spends again, and the pool is empty.
    assert_eq!(
        cardinal.set_attributes(ALICE, avatar.avatar_id, Attribute::Strength, 50, 4),
        Err(GameError::InsufficientPoints)
    );
    let after = cardinal.get_avatar(avatar.avatar_id).expect("avatar");
    assert_eq!(after.attribute(Attribute::Strength), 50);
    assert_eq!(after.unallocated_attribute_points, 0);

    assert_eq!(
        cardinal.add_attribute_points(GM, 999, 10, 5),
        Err(GameError::NotFound)
    );
}

#[test]
fn granted_points_are_spent_by_the_owner_not_the_game_master() {
    let mut cardinal = realm();
    let avatar = cardinal.mint_free_avatar(ALICE, 0).expect("mint");
    cardinal
        .add_attribute_points(GM, avatar.avatar_id, 12, 1)
        .expect("grant");

    // Granting the points does not let the game master allocate them.
    assert_eq!(
        cardinal.set_attributes(GM, avatar.avatar_id, Attribute::Dexterity, 10, 2),
        Err(GameError::NotOwner)
    );

    let dex = cardinal
        .set_attributes(ALICE, avatar.avatar_id, Attribute::Dexterity, 10, 3)
        .expect("owner spends");
    assert_eq!(dex, 10);
}

#[test]
fn adventure_locks_avatar_until_deadline() {
    let mut cardinal = realm();
    let avatar = cardinal.mint_free_avatar(ALICE, 0).expect("mint");
    cardinal.set_max_reward_cor(GM, 1, 1000, 1).expect("cor cap");
    cardinal.set_max_reward_exp(GM, 1, 2000, 2).expect("exp cap");

    assert_eq!(
        cardinal.do_adventure(BOB, avatar.avatar_id, 1, 1, 100),
        Err(GameError::NotOwner)
    );

    let outcome = cardinal
        .do_adventure(ALICE, avatar.avatar_id, 1, 1, 100)
        .expect("adventure");
    assert_eq!(outcome.adventure_id, 0);
    assert_eq!(outcome.busy_until, 100 + contracts::SECONDS_PER_TIER);
    assert_eq!(outcome.event_ids.len(), 1);

    // Immediate retry fails; the lock is taken at call time.
    assert_eq!(
        cardinal.do_adventure(ALICE, avatar.avatar_id, 1, 1, 101),
        Err(GameError::AvatarBusy)
    );

    // Past the deadline the avatar is idle again, no explicit completion.
    let later = outcome.busy_until;
    cardinal
        .do_adventure(ALICE, avatar.avatar_id, 1, 1, later)
        .expect("second adventure after deadline");
}

#[test]
fn adventure_requires_configured_tier_and_bounded_count() {
    let mut cardinal = realm();
    let avatar = cardinal.mint_free_avatar(ALICE, 0).expect("mint");

    assert_eq!(
        cardinal.do_adventure(ALICE, avatar.avatar_id, 7, 1, 10),
        Err(GameError::UnknownTier(7))
    );
    // The failed call must not have taken the busy lock.
    assert!(cardinal.get_avatar(avatar.avatar_id).expect("avatar").is_available(10));

    cardinal.set_max_reward_cor(GM, 7, 100, 11).expect("cap");
    assert_eq!(
        cardinal.do_adventure(ALICE, avatar.avatar_id, 7, 0, 12),
        Err(GameError::EventCountOutOfRange(0))
    );
    assert_eq!(
        cardinal.do_adventure(ALICE, avatar.avatar_id, 7, 33, 13),
        Err(GameError::EventCountOutOfRange(33))
    );

    cardinal
        .do_adventure(ALICE, avatar.avatar_id, 7, 32, 14)
        .expect("count at the bound");
}

#[test]
fn extreme_tier_and_caps_saturate_instead_of_overflowing() {
    let mut cardinal = realm();
    let avatar = cardinal.mint_free_avatar(ALICE, 0).expect("mint");
    cardinal
        .set_max_reward_cor(GM, u64::MAX, u128::MAX, 1)
        .expect("cor cap");
    cardinal
        .set_max_reward_exp(GM, u64::MAX, u64::MAX, 2)
        .expect("exp cap");

    let outcome = cardinal
        .do_adventure(ALICE, avatar.avatar_id, u64::MAX, 4, 100)
        .expect("adventure at the type maxima");
    assert_eq!(outcome.busy_until, u64::MAX);
    assert_eq!(outcome.event_ids.len(), 4);

    assert_eq!(
        cardinal.do_adventure(ALICE, avatar.avatar_id, u64::MAX, 1, u64::MAX - 1),
        Err(GameError::AvatarBusy)
    );
}

#[test]
fn rewards_respect_tier_caps() {
    let mut cardinal = realm();
    let avatar = cardinal.mint_free_avatar(ALICE, 0).expect("mint");
    cardinal.set_max_reward_cor(GM, 1, 1000, 1).expect("cor cap");
    cardinal.set_max_reward_exp(GM, 1, 2000, 2).expect("exp cap");

    let outcome = cardinal
        .do_adventure(ALICE, avatar.avatar_id, 1, 8, 100)
        .expect("adventure");
    assert_eq!(outcome.event_ids.len(), 8);
    assert!(outcome.total_cor <= 8 * 1000);
    assert!(outcome.total_exp <= 8 * 2000);

    for event_id in &outcome.event_ids {
        let event = cardinal.get_event(*event_id).expect("event");
        assert_eq!(event.adventure_id, outcome.adventure_id);
        assert!(event.reward_cor <= 1000);
        assert!(event.reward_exp <= 2000);
    }

    assert_eq!(
        cardinal.get_adventure_events(outcome.adventure_id),
        Ok(outcome.event_ids.clone())
    );
    assert_eq!(cardinal.get_adventure_events(99), Err(GameError::NotFound));
}

#[test]
fn half_configured_tier_caps_the_unset_half_at_zero() {
    let mut cardinal = realm();
    let avatar = cardinal.mint_free_avatar(ALICE, 0).expect("mint");
    cardinal.set_max_reward_exp(GM, 3, 500, 1).expect("exp cap only");

    let outcome = cardinal
        .do_adventure(ALICE, avatar.avatar_id, 3, 4, 10)
        .expect("adventure");
    assert_eq!(outcome.total_cor, 0);
    assert!(outcome.total_exp <= 4 * 500);
}

#[test]
fn game_master_scripts_an_exact_adventure_event() {
    let mut cardinal = realm();
    let avatar = cardinal.mint_free_avatar(ALICE, 0).expect("mint");
    cardinal.set_max_reward_cor(GM, 1, 0, 1).expect("cor cap");

    let outcome = cardinal
        .do_adventure(ALICE, avatar.avatar_id, 1, 1, 10)
        .expect("adventure");

    assert_eq!(
        cardinal.create_adventure_event(
            ALICE,
            outcome.adventure_id,
            AdventureEventType::Treasure,
            1000,
            2000,
            11,
        ),
        Err(GameError::Unauthorized)
    );
    assert_eq!(
        cardinal.create_adventure_event(GM, 42, AdventureEventType::Treasure, 1000, 2000, 11),
        Err(GameError::NotFound)
    );

    let event_id = cardinal
        .create_adventure_event(
            GM,
            outcome.adventure_id,
            AdventureEventType::Treasure,
            1000,
            2000,
            12,
        )
        .expect("scripted event");
    let event = cardinal.get_event(event_id).expect("event");
    assert_eq!(event.reward_cor, 1000);
    assert_eq!(event.reward_exp, 2000);

    let ids = cardinal
        .get_adventure_events(outcome.adventure_id)
        .expect("events");
    assert_eq!(ids.last(), Some(&event_id));
}

#[test]
fn granted_game_master_can_create_content_until_revoked() {
    let mut cardinal = realm();
    assert_eq!(
        cardinal.grant_role(ALICE, Role::GameMaster, ALICE, 0),
        Err(GameError::Unauthorized)
    );

    cardinal
        .grant_role(GM, Role::GameMaster, ALICE, 1)
        .expect("grant");
    cardinal
        .create_new_skill(ALICE, "Fishing", SkillFlag::Passive, 2)
        .expect("alice creates");

    cardinal
        .revoke_role(GM, Role::GameMaster, ALICE, 3)
        .expect("revoke");
    assert_eq!(
        cardinal.create_new_skill(ALICE, "Smithing", SkillFlag::Passive, 4),
        Err(GameError::Unauthorized)
    );
}

#[test]
fn mutations_append_notifications_with_monotone_ids() {
    let mut cardinal = realm();
    cardinal.mint_free_avatar(ALICE, 5).expect("mint");
    cardinal
        .create_new_skill(GM, "Cooking", SkillFlag::Passive, 6)
        .expect("skill");

    let notifications = cardinal.notifications();
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0].kind, NotificationKind::NewAvatar);
    assert_eq!(notifications[0].payload["minter"], ALICE);
    assert_eq!(notifications[1].kind, NotificationKind::NewSkill);
    assert_eq!(notifications[1].payload["name"], "Cooking");
    assert_eq!(notifications[1].notification_id, 1);

    // Failed calls leave the stream untouched.
    let _ = cardinal.mint_free_avatar(ALICE, 7);
    assert_eq!(cardinal.notifications().len(), 2);
}

#[test]
fn status_reflects_registry_counts() {
    let mut cardinal = realm();
    cardinal.mint_free_avatar(ALICE, 0).expect("mint");
    cardinal
        .create_new_skill(GM, "Cooking", SkillFlag::Passive, 1)
        .expect("skill");
    cardinal.set_max_reward_cor(GM, 1, 10, 2).expect("cap");
    cardinal
        .do_adventure(ALICE, 0, 1, 2, 3)
        .expect("adventure");

    let status = cardinal.status();
    assert_eq!(status.avatar_count, 1);
    assert_eq!(status.skill_count, 1);
    assert_eq!(status.adventure_count, 1);
    assert_eq!(status.event_count, 2);
    assert!(status.notification_count >= 4);
}
