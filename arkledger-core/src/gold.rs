//! Trade-ability classification and gold conversion.
//!
//! The same resource category converts differently depending on which
//! content kind dropped it; the full rule set lives in [`is_tradable`].
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::prices::PriceBook;
use crate::rewards::{RewardCategory, RewardRecord};

/// The three content types that pay weekly rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    ChaosDungeon,
    GuardianRaid,
    Raid,
}

impl ContentKind {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ChaosDungeon => "chaos_dungeon",
            Self::GuardianRaid => "guardian_raid",
            Self::Raid => "raid",
        }
    }
}

/// Whether a category can be sold on the market when dropped by the
/// given content kind.
///
/// | category      | chaos    | guardian | raid     |
/// |---------------|----------|----------|----------|
/// | gold          | tradable | tradable | tradable |
/// | bound_gold    | bound    | bound    | bound    |
/// | weapon_stones | tradable | tradable | bound    |
/// | armor_stones  | tradable | tradable | bound    |
/// | gems          | tradable | tradable | tradable |
/// | shards        | bound    | bound    | bound    |
/// | leap_stones   | bound    | tradable | bound    |
#[must_use]
pub const fn is_tradable(category: RewardCategory, content: ContentKind) -> bool {
    use ContentKind as C;
    use RewardCategory as R;
    match (category, content) {
        (R::Gold | R::Gems, _) => true,
        (R::BoundGold | R::Shards, _) => false,
        (R::WeaponStones | R::ArmorStones, C::ChaosDungeon | C::GuardianRaid) => true,
        (R::WeaponStones | R::ArmorStones, C::Raid) => false,
        (R::LeapStones, C::GuardianRaid) => true,
        (R::LeapStones, C::ChaosDungeon | C::Raid) => false,
    }
}

/// Gold subtotals for one conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GoldSplit {
    pub tradable: f64,
    pub bound: f64,
}

/// Count and priced value accumulated for one resource id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceLine {
    pub count: f64,
    pub gold_value: f64,
}

/// Scalar and itemized totals for a single content kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTotals {
    pub tradable_gold: f64,
    pub bound_gold: f64,
    pub tradable: BTreeMap<String, ResourceLine>,
    pub bound: BTreeMap<String, ResourceLine>,
}

impl ContentTotals {
    /// Accumulate one reward record paid out `clears` times.
    ///
    /// Scalar currency prices at 1; other categories use the price
    /// book, with missing entries at 0. Negative quantities clamp to 0.
    /// Unknown resource ids accumulate verbatim.
    pub fn add_reward(
        &mut self,
        record: &RewardRecord,
        content: ContentKind,
        clears: f64,
        prices: &PriceBook,
    ) {
        if clears <= 0.0 {
            return;
        }
        for entry in record.entries() {
            let quantity = entry.quantity.max(0.0) * clears;
            let unit_price = match entry.category {
                RewardCategory::Gold | RewardCategory::BoundGold => 1.0,
                _ => prices.unit_price(&entry.resource_id),
            };
            let value = quantity * unit_price;
            let (gold_total, map) = if is_tradable(entry.category, content) {
                (&mut self.tradable_gold, &mut self.tradable)
            } else {
                (&mut self.bound_gold, &mut self.bound)
            };
            *gold_total += value;
            let line = map.entry(entry.resource_id).or_default();
            line.count += quantity;
            line.gold_value += value;
        }
    }

    /// Fold another total into this one.
    pub fn merge(&mut self, other: &Self) {
        self.tradable_gold += other.tradable_gold;
        self.bound_gold += other.bound_gold;
        merge_lines(&mut self.tradable, &other.tradable);
        merge_lines(&mut self.bound, &other.bound);
    }

    #[must_use]
    pub const fn split(&self) -> GoldSplit {
        GoldSplit {
            tradable: self.tradable_gold,
            bound: self.bound_gold,
        }
    }
}

pub(crate) fn merge_lines(
    into: &mut BTreeMap<String, ResourceLine>,
    from: &BTreeMap<String, ResourceLine>,
) {
    for (resource_id, line) in from {
        let entry = into.entry(resource_id.clone()).or_default();
        entry.count += line.count;
        entry.gold_value += line.gold_value;
    }
}

/// Convert one reward record to gold subtotals.
///
/// A missing record (no applicable tier) converts to zero rather than
/// failing.
#[must_use]
pub fn convert_to_gold(
    record: Option<&RewardRecord>,
    prices: &PriceBook,
    content: ContentKind,
    clears: f64,
) -> GoldSplit {
    let Some(record) = record else {
        return GoldSplit::default();
    };
    let mut totals = ContentTotals::default();
    totals.add_reward(record, content, clears, prices);
    totals.split()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{
        DAILY_CLEARS_PER_WEEK, DESTINY_DESTRUCTION_STONE, DESTINY_GUARDIAN_STONE,
        DESTINY_LEAPSTONE, DESTINY_SHARD, DESTRUCTION_STONE_CRYSTAL, FLOAT_EPSILON,
        GREAT_HONOR_LEAPSTONE, GUARDIAN_STONE_CRYSTAL, HONOR_SHARD, MARVELOUS_HONOR_LEAPSTONE,
        REFINED_OBLITERATION_STONE, REFINED_PROTECTION_STONE, REST_ONLY_CLEARS_PER_WEEK,
    };
    use crate::tables::{chaos_table, guardian_table};
    use std::collections::BTreeMap;

    fn one_of_everything() -> RewardRecord {
        fn single(id: &str) -> BTreeMap<String, f64> {
            BTreeMap::from([(id.to_string(), 1.0)])
        }
        RewardRecord {
            gold: Some(1.0),
            bound_gold: Some(1.0),
            weapon_stones: single("W"),
            armor_stones: single("A"),
            shards: single("S"),
            leap_stones: single("L"),
            gems: BTreeMap::from([("3".to_string(), 1.0)]),
        }
    }

    fn unit_prices() -> PriceBook {
        PriceBook::with_prices(&[
            ("W", 1.0),
            ("A", 1.0),
            ("S", 1.0),
            ("L", 1.0),
            ("GEM_TIER_3", 1.0),
        ])
    }

    fn market_fixture() -> PriceBook {
        PriceBook::with_prices(&[
            (DESTRUCTION_STONE_CRYSTAL, 0.1),
            (GUARDIAN_STONE_CRYSTAL, 0.03),
            (HONOR_SHARD, 0.03),
            (GREAT_HONOR_LEAPSTONE, 2.0),
            (REFINED_OBLITERATION_STONE, 0.5),
            (REFINED_PROTECTION_STONE, 0.15),
            (MARVELOUS_HONOR_LEAPSTONE, 5.0),
            (DESTINY_DESTRUCTION_STONE, 1.0),
            (DESTINY_GUARDIAN_STONE, 0.3),
            (DESTINY_SHARD, 0.05),
            (DESTINY_LEAPSTONE, 12.0),
            ("GEM_TIER_3", 100.0),
            ("GEM_TIER_4", 300.0),
        ])
    }

    #[test]
    fn classification_follows_the_content_table() {
        let record = one_of_everything();
        let prices = unit_prices();

        let chaos = convert_to_gold(Some(&record), &prices, ContentKind::ChaosDungeon, 1.0);
        assert!((chaos.tradable - 4.0).abs() < FLOAT_EPSILON);
        assert!((chaos.bound - 3.0).abs() < FLOAT_EPSILON);

        let guardian = convert_to_gold(Some(&record), &prices, ContentKind::GuardianRaid, 1.0);
        assert!((guardian.tradable - 5.0).abs() < FLOAT_EPSILON);
        assert!((guardian.bound - 2.0).abs() < FLOAT_EPSILON);

        let raid = convert_to_gold(Some(&record), &prices, ContentKind::Raid, 1.0);
        assert!((raid.tradable - 2.0).abs() < FLOAT_EPSILON);
        assert!((raid.bound - 5.0).abs() < FLOAT_EPSILON);
    }

    #[test]
    fn clears_scale_both_subtotals_exactly() {
        let record = one_of_everything();
        let prices = unit_prices();
        let base = convert_to_gold(Some(&record), &prices, ContentKind::ChaosDungeon, 1.0);

        let daily = convert_to_gold(
            Some(&record),
            &prices,
            ContentKind::ChaosDungeon,
            DAILY_CLEARS_PER_WEEK,
        );
        assert!((daily.tradable - base.tradable * 7.0).abs() < FLOAT_EPSILON);

        let rest = convert_to_gold(
            Some(&record),
            &prices,
            ContentKind::ChaosDungeon,
            REST_ONLY_CLEARS_PER_WEEK,
        );
        assert!((rest.tradable - base.tradable * 14.0 / 3.0).abs() < FLOAT_EPSILON);

        let skipped = convert_to_gold(Some(&record), &prices, ContentKind::ChaosDungeon, 0.0);
        assert_eq!(skipped, GoldSplit::default());
    }

    #[test]
    fn missing_record_converts_to_zero() {
        let split = convert_to_gold(None, &unit_prices(), ContentKind::Raid, 1.0);
        assert_eq!(split, GoldSplit::default());
    }

    #[test]
    fn negative_quantities_clamp_to_zero() {
        let record = RewardRecord {
            gold: Some(-50.0),
            shards: BTreeMap::from([("S".to_string(), -3.0)]),
            ..RewardRecord::default()
        };
        let split = convert_to_gold(Some(&record), &unit_prices(), ContentKind::ChaosDungeon, 1.0);
        assert_eq!(split, GoldSplit::default());
    }

    #[test]
    fn gem_tiers_price_through_their_canonical_ids() {
        let record = RewardRecord {
            gems: BTreeMap::from([("4".to_string(), 2.0)]),
            ..RewardRecord::default()
        };
        let prices = PriceBook::with_prices(&[("GEM_TIER_4", 100.0)]);
        let split = convert_to_gold(Some(&record), &prices, ContentKind::ChaosDungeon, 1.0);
        assert!((split.tradable - 200.0).abs() < FLOAT_EPSILON);
    }

    #[test]
    fn unknown_resource_ids_accumulate_verbatim() {
        let record = RewardRecord {
            shards: BTreeMap::from([("SOME_FUTURE_SHARD".to_string(), 7.0)]),
            ..RewardRecord::default()
        };
        let mut totals = ContentTotals::default();
        totals.add_reward(&record, ContentKind::ChaosDungeon, 1.0, &PriceBook::new());
        let line = totals.bound.get("SOME_FUTURE_SHARD").unwrap();
        assert_eq!(line.count, 7.0);
        assert_eq!(line.gold_value, 0.0);
    }

    #[test]
    fn repeatable_tables_grow_more_generous_with_level() {
        let prices = market_fixture();
        for (content, tiers) in [
            (
                ContentKind::ChaosDungeon,
                chaos_table()
                    .iter()
                    .map(|t| (t.min_level, &t.reward))
                    .collect::<Vec<_>>(),
            ),
            (
                ContentKind::GuardianRaid,
                guardian_table()
                    .iter()
                    .map(|t| (t.min_level, &t.reward))
                    .collect::<Vec<_>>(),
            ),
        ] {
            let mut ordered = tiers;
            ordered.sort_by_key(|(min_level, _)| *min_level);
            let mut previous = 0.0;
            for (min_level, reward) in ordered {
                let split = convert_to_gold(Some(reward), &prices, content, 1.0);
                let total = split.tradable + split.bound;
                assert!(
                    total >= previous,
                    "tier {min_level} pays {total} after {previous}"
                );
                previous = total;
            }
        }
    }
}
