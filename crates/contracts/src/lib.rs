//! v1 cross-boundary contracts for the Cardinal progression core, API, and CLI.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod serde_u128_string;

pub const SCHEMA_VERSION_V1: &str = "1.0";
pub const ATTRIBUTE_COUNT: usize = 6;
/// Duration tier `t` locks an avatar for `t` hours of substrate time.
pub const SECONDS_PER_TIER: u64 = 3600;
/// Upper bound on events generated by a single adventure call.
pub const MAX_EVENTS_PER_ADVENTURE: u64 = 32;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Charisma,
    Constitution,
    Dexterity,
    Intelligence,
    Perception,
    Strength,
}

impl Attribute {
    pub const ALL: [Attribute; ATTRIBUTE_COUNT] = [
        Attribute::Charisma,
        Attribute::Constitution,
        Attribute::Dexterity,
        Attribute::Intelligence,
        Attribute::Perception,
        Attribute::Strength,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Attribute> {
        Self::ALL.get(index).copied()
    }

    pub fn code(self) -> &'static str {
        match self {
            Attribute::Charisma => "CHA",
            Attribute::Constitution => "CON",
            Attribute::Dexterity => "DEX",
            Attribute::Intelligence => "INT",
            Attribute::Perception => "PER",
            Attribute::Strength => "STR",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Avatar {
    pub schema_version: String,
    pub avatar_id: u64,
    pub owner: String,
    pub gender: Gender,
    pub rarity: Rarity,
    pub attributes: [u64; ATTRIBUTE_COUNT],
    pub unallocated_attribute_points: u64,
    pub learned_skills: BTreeSet<u64>,
    pub busy_until: u64,
    pub minted_at: u64,
}

impl Avatar {
    pub fn is_available(&self, now: u64) -> bool {
        now >= self.busy_until
    }

    pub fn attribute(&self, attribute: Attribute) -> u64 {
        self.attributes[attribute.index()]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkillFlag {
    Passive,
    Active,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillRequirement {
    pub attribute: Attribute,
    pub min_value: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Skill {
    pub schema_version: String,
    pub skill_id: u64,
    pub name: String,
    pub flag: SkillFlag,
    pub requirement: Option<SkillRequirement>,
    pub created_at: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AdventureEventType {
    Encounter,
    Treasure,
    Skirmish,
    Rest,
}

impl AdventureEventType {
    pub const ALL: [AdventureEventType; 4] = [
        AdventureEventType::Encounter,
        AdventureEventType::Treasure,
        AdventureEventType::Skirmish,
        AdventureEventType::Rest,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdventureEvent {
    pub schema_version: String,
    pub event_id: u64,
    pub adventure_id: u64,
    pub event_type: AdventureEventType,
    #[serde(with = "serde_u128_string")]
    pub reward_cor: u128,
    pub reward_exp: u64,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RewardCaps {
    #[serde(with = "serde_u128_string")]
    pub max_reward_cor: u128,
    pub max_reward_exp: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdventureOutcome {
    pub schema_version: String,
    pub adventure_id: u64,
    pub avatar_id: u64,
    pub duration_tier: u64,
    pub event_ids: Vec<u64>,
    #[serde(with = "serde_u128_string")]
    pub total_cor: u128,
    pub total_exp: u64,
    pub busy_until: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    GameMaster,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    pub schema_version: String,
    pub realm_id: String,
    /// Entropy key for trait and reward draws; hex string as the
    /// registries are initialized with on the execution substrate.
    pub key_hash: String,
    /// Seed holder of the admin and game-master roles.
    pub game_master: String,
    pub notes: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            realm_id: "realm_local_001".to_string(),
            key_hash: "4f1c3a9d2b87e05a66d1c4f0b9e8d2735aa0c1fe".to_string(),
            game_master: "account:root".to_string(),
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RealmStatus {
    pub schema_version: String,
    pub realm_id: String,
    pub avatar_count: usize,
    pub skill_count: usize,
    pub adventure_count: u64,
    pub event_count: usize,
    pub notification_count: usize,
}

impl fmt::Display for RealmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "realm_id={} avatars={} skills={} adventures={} events={}",
            self.realm_id,
            self.avatar_count,
            self.skill_count,
            self.adventure_count,
            self.event_count
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewAvatar,
    NewSkill,
    AttributePointsGranted,
    AttributesRaised,
    SkillRequirementSet,
    SkillLearned,
    AdventureStarted,
    AdventureEventRecorded,
    RewardCapUpdated,
    RoleGranted,
    RoleRevoked,
    PriceUpdated,
}

/// One entry of the push-only notification stream consumed by external
/// relays. Payload fields carry the names listeners already match on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub schema_version: String,
    pub notification_id: u64,
    pub realm_id: String,
    pub kind: NotificationKind,
    pub timestamp: u64,
    pub payload: Value,
}

impl Notification {
    pub fn new(
        notification_id: u64,
        realm_id: impl Into<String>,
        kind: NotificationKind,
        timestamp: u64,
        payload: Value,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            notification_id,
            realm_id: realm_id.into(),
            kind,
            timestamp,
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    Unauthorized,
    NotOwner,
    AlreadyClaimed,
    InsufficientPoints,
    RequirementNotMet,
    AvatarBusy,
    DuplicateName(String),
    UnknownTier(u64),
    NotFound,
    InsufficientPayment,
    EventCountOutOfRange(u64),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "not game master"),
            Self::NotOwner => write!(f, "you don't own this avatar"),
            Self::AlreadyClaimed => write!(f, "already claimed free avatar"),
            Self::InsufficientPoints => write!(f, "not enough attribute points"),
            Self::RequirementNotMet => write!(f, "you don't meet the requirements"),
            Self::AvatarBusy => write!(f, "avatar is not available"),
            Self::DuplicateName(name) => write!(f, "skill name already taken: {name}"),
            Self::UnknownTier(tier) => write!(f, "no reward cap configured for tier {tier}"),
            Self::NotFound => write!(f, "unknown id"),
            Self::InsufficientPayment => write!(f, "payment below current mint price"),
            Self::EventCountOutOfRange(count) => {
                write!(
                    f,
                    "event count {count} outside 1..={MAX_EVENTS_PER_ADVENTURE}"
                )
            }
        }
    }
}

impl std::error::Error for GameError {}

impl GameError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Unauthorized => ErrorCode::Unauthorized,
            Self::NotOwner => ErrorCode::NotOwner,
            Self::AlreadyClaimed => ErrorCode::AlreadyClaimed,
            Self::InsufficientPoints => ErrorCode::InsufficientPoints,
            Self::RequirementNotMet => ErrorCode::RequirementNotMet,
            Self::AvatarBusy => ErrorCode::AvatarBusy,
            Self::DuplicateName(_) => ErrorCode::DuplicateName,
            Self::UnknownTier(_) => ErrorCode::UnknownTier,
            Self::NotFound => ErrorCode::NotFound,
            Self::InsufficientPayment => ErrorCode::InsufficientPayment,
            Self::EventCountOutOfRange(_) => ErrorCode::EventCountOutOfRange,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Unauthorized,
    NotOwner,
    AlreadyClaimed,
    InsufficientPoints,
    RequirementNotMet,
    AvatarBusy,
    DuplicateName,
    UnknownTier,
    NotFound,
    InsufficientPayment,
    EventCountOutOfRange,
    RealmNotFound,
    InvalidQuery,
    InternalError,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub schema_version: String,
    pub error_code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(error_code: ErrorCode, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            error_code,
            message: message.into(),
            details,
        }
    }
}
