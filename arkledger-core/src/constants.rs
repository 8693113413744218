//! Centralized balance and identity constants for Arkledger calculations.
//!
//! These values define the deterministic math for the weekly yield
//! engine. Keeping them together ensures that payouts can only be
//! adjusted via code changes reviewed in version control, rather than
//! through external JSON assets.

// Weekly cadence ------------------------------------------------------------
/// Clears per week when a repeatable dungeon is run every day.
pub const DAILY_CLEARS_PER_WEEK: f64 = 7.0;
/// Clears per week when entries are banked for the rest bonus.
pub const REST_ONLY_CLEARS_PER_WEEK: f64 = 14.0 / 3.0;
/// A roster character is paid for at most this many raids per week.
pub const MAX_WEEKLY_RAIDS: usize = 6;
/// At most this many roster characters are designated as gold earners.
pub const MAX_GOLD_EARNERS: usize = 6;

// Pseudo-resource keys ------------------------------------------------------
/// Itemized-map key tracking raw tradable currency drops.
pub const GOLD: &str = "GOLD";
/// Itemized-map key tracking raw character-bound currency drops.
pub const BOUND_GOLD: &str = "BOUND_GOLD";
/// Canonical prefix for gem resource ids; bare tier numbers in reward
/// data are normalized to `GEM_TIER_<n>` before any price lookup.
pub const GEM_ID_PREFIX: &str = "GEM_TIER_";

// Resource ids --------------------------------------------------------------
pub const DESTRUCTION_STONE_CRYSTAL: &str = "DESTRUCTION_STONE_CRYSTAL";
pub const GUARDIAN_STONE_CRYSTAL: &str = "GUARDIAN_STONE_CRYSTAL";
pub const HONOR_SHARD: &str = "HONOR_SHARD";
pub const GREAT_HONOR_LEAPSTONE: &str = "GREAT_HONOR_LEAPSTONE";
pub const REFINED_OBLITERATION_STONE: &str = "REFINED_OBLITERATION_STONE";
pub const REFINED_PROTECTION_STONE: &str = "REFINED_PROTECTION_STONE";
pub const MARVELOUS_HONOR_LEAPSTONE: &str = "MARVELOUS_HONOR_LEAPSTONE";
pub const DESTINY_DESTRUCTION_STONE: &str = "DESTINY_DESTRUCTION_STONE";
pub const DESTINY_GUARDIAN_STONE: &str = "DESTINY_GUARDIAN_STONE";
pub const DESTINY_SHARD: &str = "DESTINY_SHARD";
pub const DESTINY_LEAPSTONE: &str = "DESTINY_LEAPSTONE";

#[cfg(test)]
pub(crate) const FLOAT_EPSILON: f64 = 1e-6;
