//! Reward record shapes shared by every content table.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{BOUND_GOLD, GEM_ID_PREFIX, GOLD};

/// The resource categories a single clear can pay out.
///
/// Trade-ability is not a property of the category alone; it depends on
/// which content kind dropped it. See [`crate::gold`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardCategory {
    Gold,
    BoundGold,
    WeaponStones,
    ArmorStones,
    Shards,
    LeapStones,
    Gems,
}

impl RewardCategory {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::BoundGold => "bound_gold",
            Self::WeaponStones => "weapon_stones",
            Self::ArmorStones => "armor_stones",
            Self::Shards => "shards",
            Self::LeapStones => "leap_stones",
            Self::Gems => "gems",
        }
    }
}

/// The yield granted by completing one instance of a content tier.
///
/// Every member is optional; an absent map and an empty map are
/// equivalent, and a record with no members present yields nothing.
/// Gem maps are keyed by bare tier number (`"3"`, `"4"`) as they arrive
/// from the reward data and are normalized on the way out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_gold: Option<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub weapon_stones: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub armor_stones: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub shards: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub leap_stones: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub gems: BTreeMap<String, f64>,
}

/// One priced line of a reward record, flattened for accumulation.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardEntry {
    pub category: RewardCategory,
    pub resource_id: String,
    pub quantity: f64,
}

impl RewardRecord {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gold.is_none()
            && self.bound_gold.is_none()
            && self.weapon_stones.is_empty()
            && self.armor_stones.is_empty()
            && self.shards.is_empty()
            && self.leap_stones.is_empty()
            && self.gems.is_empty()
    }

    /// Flatten every present member into `(category, resource id,
    /// quantity)` lines. Scalar currency appears under the `GOLD` and
    /// `BOUND_GOLD` pseudo-ids; gem tiers are normalized to their
    /// canonical ids.
    #[must_use]
    pub fn entries(&self) -> Vec<RewardEntry> {
        let mut out = Vec::new();
        if let Some(gold) = self.gold {
            out.push(RewardEntry {
                category: RewardCategory::Gold,
                resource_id: GOLD.to_string(),
                quantity: gold,
            });
        }
        if let Some(bound) = self.bound_gold {
            out.push(RewardEntry {
                category: RewardCategory::BoundGold,
                resource_id: BOUND_GOLD.to_string(),
                quantity: bound,
            });
        }
        let maps = [
            (RewardCategory::WeaponStones, &self.weapon_stones),
            (RewardCategory::ArmorStones, &self.armor_stones),
            (RewardCategory::Shards, &self.shards),
            (RewardCategory::LeapStones, &self.leap_stones),
        ];
        for (category, map) in maps {
            for (resource_id, quantity) in map {
                out.push(RewardEntry {
                    category,
                    resource_id: resource_id.clone(),
                    quantity: *quantity,
                });
            }
        }
        for (tier, quantity) in &self.gems {
            out.push(RewardEntry {
                category: RewardCategory::Gems,
                resource_id: normalize_gem_key(tier),
                quantity: *quantity,
            });
        }
        out
    }

    /// Load a single record from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a valid record.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Normalize a gem map key to its canonical resource id.
///
/// Bare tier numbers become `GEM_TIER_<n>`; keys already carrying the
/// prefix pass through unchanged, so normalization is idempotent.
#[must_use]
pub fn normalize_gem_key(key: &str) -> String {
    if key.starts_with(GEM_ID_PREFIX) {
        key.to_string()
    } else {
        format!("{GEM_ID_PREFIX}{key}")
    }
}
