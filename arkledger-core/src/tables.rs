//! Static reward tables and tier lookup.
//!
//! Tier data is const and compiled in; the runtime tables are built once
//! behind `OnceLock` accessors. Source order is descending by minimum
//! level for readability, but every lookup treats a table as a set.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;

use crate::constants::{
    DESTINY_DESTRUCTION_STONE, DESTINY_GUARDIAN_STONE, DESTINY_LEAPSTONE, DESTINY_SHARD,
    DESTRUCTION_STONE_CRYSTAL, GREAT_HONOR_LEAPSTONE, GUARDIAN_STONE_CRYSTAL, HONOR_SHARD,
    MARVELOUS_HONOR_LEAPSTONE, MAX_WEEKLY_RAIDS, REFINED_OBLITERATION_STONE,
    REFINED_PROTECTION_STONE,
};
use crate::rewards::RewardRecord;

/// One repeatable-dungeon bracket keyed by minimum item level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChaosTier {
    pub min_level: u32,
    pub reward: RewardRecord,
}

/// One guardian bracket; guardians are named per tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardianTier {
    pub name: String,
    pub min_level: u32,
    pub reward: RewardRecord,
}

/// One raid bracket. A raid name recurs across brackets as higher gate
/// counts unlock; each bracket carries both reward variants and the
/// per-character gold-option flag picks one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaidTier {
    pub raid_name: String,
    pub min_level: u32,
    pub gold_reward: RewardRecord,
    pub non_gold_reward: RewardRecord,
}

impl RaidTier {
    #[must_use]
    pub fn reward(&self, took_gold_option: bool) -> &RewardRecord {
        if took_gold_option {
            &self.gold_reward
        } else {
            &self.non_gold_reward
        }
    }
}

/// Up to [`MAX_WEEKLY_RAIDS`] raids a character can be paid for.
pub type RaidLineup = SmallVec<[&'static RaidTier; 6]>;

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("negative quantity {quantity} for {resource_id} in {table} tier {min_level}")]
    NegativeQuantity {
        table: &'static str,
        min_level: u32,
        resource_id: String,
        quantity: f64,
    },
}

// Raw const data ------------------------------------------------------------

type Qty = (&'static str, f64);

#[derive(Clone, Copy)]
struct RawReward {
    gold: Option<f64>,
    bound_gold: Option<f64>,
    weapon_stones: &'static [Qty],
    armor_stones: &'static [Qty],
    shards: &'static [Qty],
    leap_stones: &'static [Qty],
    gems: &'static [(u8, f64)],
}

impl RawReward {
    const EMPTY: Self = Self {
        gold: None,
        bound_gold: None,
        weapon_stones: &[],
        armor_stones: &[],
        shards: &[],
        leap_stones: &[],
        gems: &[],
    };

    fn build(&self) -> RewardRecord {
        fn map(entries: &[Qty]) -> BTreeMap<String, f64> {
            entries
                .iter()
                .map(|(id, qty)| ((*id).to_string(), *qty))
                .collect()
        }

        RewardRecord {
            gold: self.gold,
            bound_gold: self.bound_gold,
            weapon_stones: map(self.weapon_stones),
            armor_stones: map(self.armor_stones),
            shards: map(self.shards),
            leap_stones: map(self.leap_stones),
            gems: self
                .gems
                .iter()
                .map(|(tier, qty)| (tier.to_string(), *qty))
                .collect(),
        }
    }
}

struct RawRaidTier {
    name: &'static str,
    min_level: u32,
    gold: RawReward,
    non_gold: RawReward,
}

const CHAOS: &[(u32, RawReward)] = &[
    (
        1640,
        RawReward {
            shards: &[(DESTINY_SHARD, 24_000.0)],
            weapon_stones: &[(DESTINY_DESTRUCTION_STONE, 200.0)],
            armor_stones: &[(DESTINY_GUARDIAN_STONE, 600.0)],
            gems: &[(4, 3.0)],
            ..RawReward::EMPTY
        },
    ),
    (
        1610,
        RawReward {
            shards: &[(DESTINY_SHARD, 20_000.0)],
            weapon_stones: &[(DESTINY_DESTRUCTION_STONE, 180.0)],
            armor_stones: &[(DESTINY_GUARDIAN_STONE, 540.0)],
            gems: &[(4, 2.0)],
            ..RawReward::EMPTY
        },
    ),
    (
        1600,
        RawReward {
            shards: &[(HONOR_SHARD, 18_000.0)],
            weapon_stones: &[(REFINED_OBLITERATION_STONE, 170.0)],
            armor_stones: &[(REFINED_PROTECTION_STONE, 510.0)],
            gems: &[(3, 4.0)],
            ..RawReward::EMPTY
        },
    ),
    (
        1580,
        RawReward {
            shards: &[(HONOR_SHARD, 16_000.0)],
            weapon_stones: &[(REFINED_OBLITERATION_STONE, 150.0)],
            armor_stones: &[(REFINED_PROTECTION_STONE, 450.0)],
            gems: &[(3, 3.0)],
            ..RawReward::EMPTY
        },
    ),
    (
        1560,
        RawReward {
            shards: &[(HONOR_SHARD, 14_000.0)],
            weapon_stones: &[(DESTRUCTION_STONE_CRYSTAL, 260.0)],
            armor_stones: &[(GUARDIAN_STONE_CRYSTAL, 780.0)],
            gems: &[(3, 3.0)],
            ..RawReward::EMPTY
        },
    ),
    (
        1540,
        RawReward {
            shards: &[(HONOR_SHARD, 12_500.0)],
            weapon_stones: &[(DESTRUCTION_STONE_CRYSTAL, 240.0)],
            armor_stones: &[(GUARDIAN_STONE_CRYSTAL, 720.0)],
            gems: &[(3, 3.0)],
            ..RawReward::EMPTY
        },
    ),
    (
        1520,
        RawReward {
            shards: &[(HONOR_SHARD, 11_000.0)],
            weapon_stones: &[(DESTRUCTION_STONE_CRYSTAL, 220.0)],
            armor_stones: &[(GUARDIAN_STONE_CRYSTAL, 660.0)],
            gems: &[(3, 2.0)],
            ..RawReward::EMPTY
        },
    ),
    (
        1490,
        RawReward {
            shards: &[(HONOR_SHARD, 9_500.0)],
            weapon_stones: &[(DESTRUCTION_STONE_CRYSTAL, 200.0)],
            armor_stones: &[(GUARDIAN_STONE_CRYSTAL, 600.0)],
            gems: &[(3, 2.0)],
            ..RawReward::EMPTY
        },
    ),
    (
        1475,
        RawReward {
            shards: &[(HONOR_SHARD, 8_500.0)],
            weapon_stones: &[(DESTRUCTION_STONE_CRYSTAL, 180.0)],
            armor_stones: &[(GUARDIAN_STONE_CRYSTAL, 540.0)],
            gems: &[(3, 2.0)],
            ..RawReward::EMPTY
        },
    ),
    (
        1445,
        RawReward {
            shards: &[(HONOR_SHARD, 7_000.0)],
            weapon_stones: &[(DESTRUCTION_STONE_CRYSTAL, 160.0)],
            armor_stones: &[(GUARDIAN_STONE_CRYSTAL, 480.0)],
            gems: &[(3, 1.0)],
            ..RawReward::EMPTY
        },
    ),
    (
        1415,
        RawReward {
            shards: &[(HONOR_SHARD, 6_000.0)],
            weapon_stones: &[(DESTRUCTION_STONE_CRYSTAL, 140.0)],
            armor_stones: &[(GUARDIAN_STONE_CRYSTAL, 420.0)],
            gems: &[(3, 1.0)],
            ..RawReward::EMPTY
        },
    ),
];

const GUARDIANS: &[(&str, u32, RawReward)] = &[
    (
        "아게오로스",
        1630,
        RawReward {
            leap_stones: &[(DESTINY_LEAPSTONE, 14.0)],
            weapon_stones: &[(DESTINY_DESTRUCTION_STONE, 84.0)],
            armor_stones: &[(DESTINY_GUARDIAN_STONE, 252.0)],
            ..RawReward::EMPTY
        },
    ),
    (
        "베스칼",
        1610,
        RawReward {
            leap_stones: &[(DESTINY_LEAPSTONE, 10.0)],
            weapon_stones: &[(DESTINY_DESTRUCTION_STONE, 66.0)],
            armor_stones: &[(DESTINY_GUARDIAN_STONE, 199.0)],
            ..RawReward::EMPTY
        },
    ),
    (
        "가르가디스",
        1580,
        RawReward {
            leap_stones: &[(MARVELOUS_HONOR_LEAPSTONE, 11.0)],
            weapon_stones: &[(REFINED_OBLITERATION_STONE, 60.0)],
            armor_stones: &[(REFINED_PROTECTION_STONE, 180.0)],
            ..RawReward::EMPTY
        },
    ),
    (
        "소나벨",
        1540,
        RawReward {
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 22.0)],
            weapon_stones: &[(DESTRUCTION_STONE_CRYSTAL, 126.0)],
            armor_stones: &[(GUARDIAN_STONE_CRYSTAL, 378.0)],
            ..RawReward::EMPTY
        },
    ),
    (
        "하누마탄",
        1490,
        RawReward {
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 18.0)],
            weapon_stones: &[(DESTRUCTION_STONE_CRYSTAL, 114.0)],
            armor_stones: &[(GUARDIAN_STONE_CRYSTAL, 342.0)],
            ..RawReward::EMPTY
        },
    ),
    (
        "칼엘리고스",
        1475,
        RawReward {
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 16.0)],
            weapon_stones: &[(DESTRUCTION_STONE_CRYSTAL, 106.0)],
            armor_stones: &[(GUARDIAN_STONE_CRYSTAL, 318.0)],
            ..RawReward::EMPTY
        },
    ),
    (
        "쿤겔라니움",
        1445,
        RawReward {
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 14.0)],
            weapon_stones: &[(DESTRUCTION_STONE_CRYSTAL, 96.0)],
            armor_stones: &[(GUARDIAN_STONE_CRYSTAL, 288.0)],
            ..RawReward::EMPTY
        },
    ),
    (
        "데스칼루다",
        1415,
        RawReward {
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 12.0)],
            weapon_stones: &[(DESTRUCTION_STONE_CRYSTAL, 86.0)],
            armor_stones: &[(GUARDIAN_STONE_CRYSTAL, 257.0)],
            ..RawReward::EMPTY
        },
    ),
];

const RAIDS: &[RawRaidTier] = &[
    RawRaidTier {
        name: "카멘 하드",
        min_level: 1640,
        gold: RawReward {
            gold: Some(8_000.0),
            bound_gold: Some(8_500.0),
            leap_stones: &[(DESTINY_LEAPSTONE, 24.0)],
            weapon_stones: &[(DESTINY_DESTRUCTION_STONE, 700.0)],
            armor_stones: &[(DESTINY_GUARDIAN_STONE, 1_400.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            bound_gold: Some(8_500.0),
            leap_stones: &[(DESTINY_LEAPSTONE, 24.0)],
            weapon_stones: &[(DESTINY_DESTRUCTION_STONE, 700.0)],
            armor_stones: &[(DESTINY_GUARDIAN_STONE, 1_400.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "카멘 하드",
        min_level: 1630,
        gold: RawReward {
            gold: Some(6_500.0),
            bound_gold: Some(6_500.0),
            leap_stones: &[(DESTINY_LEAPSTONE, 18.0)],
            weapon_stones: &[(DESTINY_DESTRUCTION_STONE, 500.0)],
            armor_stones: &[(DESTINY_GUARDIAN_STONE, 1_000.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            bound_gold: Some(6_500.0),
            leap_stones: &[(DESTINY_LEAPSTONE, 18.0)],
            weapon_stones: &[(DESTINY_DESTRUCTION_STONE, 500.0)],
            armor_stones: &[(DESTINY_GUARDIAN_STONE, 1_000.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "베히모스 노말",
        min_level: 1640,
        gold: RawReward {
            gold: Some(6_000.0),
            bound_gold: Some(6_000.0),
            leap_stones: &[(DESTINY_LEAPSTONE, 16.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            bound_gold: Some(6_000.0),
            leap_stones: &[(DESTINY_LEAPSTONE, 16.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "에키드나 하드",
        min_level: 1640,
        gold: RawReward {
            gold: Some(5_400.0),
            bound_gold: Some(5_400.0),
            leap_stones: &[(DESTINY_LEAPSTONE, 16.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            bound_gold: Some(5_400.0),
            leap_stones: &[(DESTINY_LEAPSTONE, 16.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "에키드나 노말",
        min_level: 1620,
        gold: RawReward {
            gold: Some(4_100.0),
            bound_gold: Some(4_100.0),
            leap_stones: &[(DESTINY_LEAPSTONE, 12.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            bound_gold: Some(4_100.0),
            leap_stones: &[(DESTINY_LEAPSTONE, 12.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "카멘 노말",
        min_level: 1610,
        gold: RawReward {
            gold: Some(4_500.0),
            bound_gold: Some(4_500.0),
            leap_stones: &[(DESTINY_LEAPSTONE, 12.0)],
            weapon_stones: &[(DESTINY_DESTRUCTION_STONE, 350.0)],
            armor_stones: &[(DESTINY_GUARDIAN_STONE, 700.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            bound_gold: Some(4_500.0),
            leap_stones: &[(DESTINY_LEAPSTONE, 12.0)],
            weapon_stones: &[(DESTINY_DESTRUCTION_STONE, 350.0)],
            armor_stones: &[(DESTINY_GUARDIAN_STONE, 700.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "상아탑 하드",
        min_level: 1620,
        gold: RawReward {
            gold: Some(4_800.0),
            leap_stones: &[(MARVELOUS_HONOR_LEAPSTONE, 16.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            leap_stones: &[(MARVELOUS_HONOR_LEAPSTONE, 16.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "상아탑 노말",
        min_level: 1600,
        gold: RawReward {
            gold: Some(3_200.0),
            leap_stones: &[(MARVELOUS_HONOR_LEAPSTONE, 12.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            leap_stones: &[(MARVELOUS_HONOR_LEAPSTONE, 12.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "일리아칸 하드",
        min_level: 1600,
        gold: RawReward {
            gold: Some(3_000.0),
            leap_stones: &[(MARVELOUS_HONOR_LEAPSTONE, 12.0)],
            weapon_stones: &[(REFINED_OBLITERATION_STONE, 400.0)],
            armor_stones: &[(REFINED_PROTECTION_STONE, 800.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            leap_stones: &[(MARVELOUS_HONOR_LEAPSTONE, 12.0)],
            weapon_stones: &[(REFINED_OBLITERATION_STONE, 400.0)],
            armor_stones: &[(REFINED_PROTECTION_STONE, 800.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "일리아칸 노말",
        min_level: 1580,
        gold: RawReward {
            gold: Some(2_300.0),
            leap_stones: &[(MARVELOUS_HONOR_LEAPSTONE, 8.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            leap_stones: &[(MARVELOUS_HONOR_LEAPSTONE, 8.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "카양겔 하드",
        min_level: 1580,
        gold: RawReward {
            gold: Some(2_150.0),
            leap_stones: &[(MARVELOUS_HONOR_LEAPSTONE, 6.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            leap_stones: &[(MARVELOUS_HONOR_LEAPSTONE, 6.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "아브렐슈드 하드",
        min_level: 1560,
        gold: RawReward {
            gold: Some(6_600.0),
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 20.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 20.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "아브렐슈드 하드",
        min_level: 1550,
        gold: RawReward {
            gold: Some(6_100.0),
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 16.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 16.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "아브렐슈드 하드",
        min_level: 1540,
        gold: RawReward {
            gold: Some(5_600.0),
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 12.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 12.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "카양겔 노말",
        min_level: 1540,
        gold: RawReward {
            gold: Some(1_650.0),
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 8.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 8.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "아브렐슈드 노말",
        min_level: 1520,
        gold: RawReward {
            gold: Some(4_600.0),
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 14.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 14.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "아브렐슈드 노말",
        min_level: 1500,
        gold: RawReward {
            gold: Some(3_600.0),
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 10.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 10.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "아브렐슈드 노말",
        min_level: 1490,
        gold: RawReward {
            gold: Some(2_500.0),
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 8.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 8.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "쿠크세이튼 노말",
        min_level: 1475,
        gold: RawReward {
            gold: Some(3_000.0),
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 6.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 6.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "비아키스 하드",
        min_level: 1460,
        gold: RawReward {
            gold: Some(2_400.0),
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 5.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 5.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "발탄 하드",
        min_level: 1445,
        gold: RawReward {
            gold: Some(1_800.0),
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 4.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 4.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "비아키스 노말",
        min_level: 1430,
        gold: RawReward {
            gold: Some(1_600.0),
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 3.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 3.0)],
            ..RawReward::EMPTY
        },
    },
    RawRaidTier {
        name: "발탄 노말",
        min_level: 1415,
        gold: RawReward {
            gold: Some(1_200.0),
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 3.0)],
            ..RawReward::EMPTY
        },
        non_gold: RawReward {
            leap_stones: &[(GREAT_HONOR_LEAPSTONE, 3.0)],
            ..RawReward::EMPTY
        },
    },
];

// Runtime tables ------------------------------------------------------------

#[must_use]
pub fn chaos_table() -> &'static [ChaosTier] {
    static TABLE: OnceLock<Vec<ChaosTier>> = OnceLock::new();
    TABLE.get_or_init(|| {
        CHAOS
            .iter()
            .map(|(min_level, raw)| ChaosTier {
                min_level: *min_level,
                reward: raw.build(),
            })
            .collect()
    })
}

#[must_use]
pub fn guardian_table() -> &'static [GuardianTier] {
    static TABLE: OnceLock<Vec<GuardianTier>> = OnceLock::new();
    TABLE.get_or_init(|| {
        GUARDIANS
            .iter()
            .map(|(name, min_level, raw)| GuardianTier {
                name: (*name).to_string(),
                min_level: *min_level,
                reward: raw.build(),
            })
            .collect()
    })
}

#[must_use]
pub fn raid_table() -> &'static [RaidTier] {
    static TABLE: OnceLock<Vec<RaidTier>> = OnceLock::new();
    TABLE.get_or_init(|| {
        RAIDS
            .iter()
            .map(|raw| RaidTier {
                raid_name: raw.name.to_string(),
                min_level: raw.min_level,
                gold_reward: raw.gold.build(),
                non_gold_reward: raw.non_gold.build(),
            })
            .collect()
    })
}

// Lookup --------------------------------------------------------------------

/// The chaos-dungeon tier applicable at `level`: greatest minimum level
/// not above it, or `None` when the character is below every bracket.
#[must_use]
pub fn chaos_tier(level: f64) -> Option<&'static ChaosTier> {
    chaos_table()
        .iter()
        .filter(|tier| f64::from(tier.min_level) <= level)
        .max_by_key(|tier| tier.min_level)
}

#[must_use]
pub fn chaos_reward(level: f64) -> Option<&'static RewardRecord> {
    chaos_tier(level).map(|tier| &tier.reward)
}

#[must_use]
pub fn guardian_tier(level: f64) -> Option<&'static GuardianTier> {
    guardian_table()
        .iter()
        .filter(|tier| f64::from(tier.min_level) <= level)
        .max_by_key(|tier| tier.min_level)
}

#[must_use]
pub fn guardian_reward(level: f64) -> Option<&'static RewardRecord> {
    guardian_tier(level).map(|tier| &tier.reward)
}

/// Raids a character at `level` can be paid for this week: every
/// eligible bracket, deduplicated by raid name keeping the highest
/// bracket, ordered by descending minimum level (name as tie-break so
/// the result never depends on table source order), and capped at
/// [`MAX_WEEKLY_RAIDS`]. A level below every bracket yields an empty
/// lineup, not an error.
#[must_use]
pub fn available_raids(level: f64) -> RaidLineup {
    let mut eligible: Vec<&'static RaidTier> = raid_table()
        .iter()
        .filter(|tier| f64::from(tier.min_level) <= level)
        .collect();
    eligible.sort_by(|a, b| {
        b.min_level
            .cmp(&a.min_level)
            .then_with(|| a.raid_name.cmp(&b.raid_name))
    });

    let mut lineup = RaidLineup::new();
    let mut seen: Vec<&str> = Vec::new();
    for tier in eligible {
        if seen.contains(&tier.raid_name.as_str()) {
            continue;
        }
        seen.push(&tier.raid_name);
        lineup.push(tier);
        if lineup.len() == MAX_WEEKLY_RAIDS {
            break;
        }
    }
    lineup
}

/// Sweep every compiled table for quantities that violate the
/// non-negativity invariant.
///
/// # Errors
///
/// Returns the first offending entry found.
pub fn validate_tables() -> Result<(), TableError> {
    fn check(
        table: &'static str,
        min_level: u32,
        record: &RewardRecord,
    ) -> Result<(), TableError> {
        for entry in record.entries() {
            if entry.quantity < 0.0 {
                return Err(TableError::NegativeQuantity {
                    table,
                    min_level,
                    resource_id: entry.resource_id,
                    quantity: entry.quantity,
                });
            }
        }
        Ok(())
    }

    for tier in chaos_table() {
        check("chaos", tier.min_level, &tier.reward)?;
    }
    for tier in guardian_table() {
        check("guardian", tier.min_level, &tier.reward)?;
    }
    for tier in raid_table() {
        check("raid", tier.min_level, &tier.gold_reward)?;
        check("raid", tier.min_level, &tier.non_gold_reward)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DESTINY_SHARD;

    #[test]
    fn chaos_lookup_picks_greatest_bracket_not_above_level() {
        let tier = chaos_tier(1630.0).expect("tier at 1630");
        assert_eq!(tier.min_level, 1610);
        assert_eq!(tier.reward.shards.get(DESTINY_SHARD), Some(&20_000.0));

        let exact = chaos_tier(1610.0).expect("tier at exactly 1610");
        assert_eq!(exact.min_level, 1610);
    }

    #[test]
    fn lookup_below_lowest_bracket_is_none() {
        assert!(chaos_reward(1400.0).is_none());
        assert!(guardian_reward(1.0).is_none());
        assert!(available_raids(1200.0).is_empty());
    }

    #[test]
    fn guardian_lookup_matches_bracket_names() {
        assert_eq!(guardian_tier(1632.5).unwrap().name, "아게오로스");
        assert_eq!(guardian_tier(1629.9).unwrap().name, "베스칼");
        assert_eq!(guardian_tier(1415.0).unwrap().name, "데스칼루다");
    }

    #[test]
    fn available_raids_dedups_by_name_keeping_highest_bracket() {
        let lineup = available_raids(1560.0);
        let abrel: Vec<_> = lineup
            .iter()
            .filter(|tier| tier.raid_name == "아브렐슈드 하드")
            .collect();
        assert_eq!(abrel.len(), 1);
        assert_eq!(abrel[0].min_level, 1560);
    }

    #[test]
    fn available_raids_caps_at_six_in_descending_order() {
        let lineup = available_raids(1630.0);
        assert_eq!(lineup.len(), 6);
        assert_eq!(lineup[0].raid_name, "카멘 하드");
        assert_eq!(lineup[0].min_level, 1630);
        for pair in lineup.windows(2) {
            assert!(pair[0].min_level >= pair[1].min_level);
        }

        let mut names: Vec<_> = lineup.iter().map(|t| t.raid_name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn raid_reward_variant_follows_gold_option() {
        let lineup = available_raids(1630.0);
        let kamen = lineup
            .iter()
            .find(|tier| tier.raid_name == "카멘 하드")
            .unwrap();
        assert_eq!(kamen.reward(true).gold, Some(6_500.0));
        assert_eq!(kamen.reward(false).gold, None);
        assert_eq!(kamen.reward(false).bound_gold, Some(6_500.0));
    }

    #[test]
    fn compiled_tables_pass_validation() {
        validate_tables().expect("tables hold non-negative quantities");
    }
}
