//! Authoritative progression state for player avatars: identity, skills,
//! attribute points, and time-locked adventures with capped random rewards.
//!
//! Every mutation is an atomic check-then-apply step; callers that need
//! concurrent access serialize through a single writer, which is what the
//! API layer does with one mutex around the whole [`Cardinal`].

mod access;
mod adventure;
mod avatars;
mod cardinal;
mod entropy;
mod ledger;
mod oracle;
mod skills;

pub use access::AccessRegistry;
pub use adventure::AdventureEngine;
pub use avatars::AvatarRegistry;
pub use cardinal::Cardinal;
pub use entropy::EntropyPool;
pub use ledger::EventLedger;
pub use oracle::{BasicPriceOracle, PriceSource};
pub use skills::SkillCatalog;
