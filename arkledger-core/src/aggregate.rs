//! Weekly aggregation across characters and servers.
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::constants::{DAILY_CLEARS_PER_WEEK, MAX_GOLD_EARNERS, REST_ONLY_CLEARS_PER_WEEK};
use crate::gold::{ContentKind, ContentTotals, ResourceLine, merge_lines};
use crate::prices::PriceBook;
use crate::roster::{Character, Roster};
use crate::tables::{available_raids, chaos_reward, guardian_reward};

/// How often a character runs a repeatable dungeon each week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearCadence {
    #[default]
    Daily,
    RestOnly,
    Skip,
}

impl ClearCadence {
    /// Weekly clear count this cadence pays for.
    #[must_use]
    pub const fn weekly_clears(self) -> f64 {
        match self {
            Self::Daily => DAILY_CLEARS_PER_WEEK,
            Self::RestOnly => REST_ONLY_CLEARS_PER_WEEK,
            Self::Skip => 0.0,
        }
    }
}

/// Per-character calculation options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterOptions {
    pub chaos: ClearCadence,
    pub guardian: ClearCadence,
    pub selected_raids: BTreeSet<String>,
    pub took_gold_option: bool,
    pub excluded: bool,
}

/// Options for a whole roster: per-character overrides on top of a
/// default set, plus server exclusions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationPlan {
    pub defaults: CharacterOptions,
    pub per_character: BTreeMap<String, BTreeMap<String, CharacterOptions>>,
    pub excluded_servers: BTreeSet<String>,
}

impl CalculationPlan {
    /// The plan a fresh session opens with: every character runs
    /// dailies, and the roster's highest-level characters up to
    /// [`MAX_GOLD_EARNERS`] are designated gold earners with all their
    /// available raids selected.
    #[must_use]
    pub fn default_for(roster: &Roster) -> Self {
        let mut plan = Self::default();
        let mut ranked: Vec<&Character> = roster.characters().collect();
        ranked.sort_by(|a, b| {
            b.level
                .partial_cmp(&a.level)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.server.cmp(&b.server))
                .then_with(|| a.name.cmp(&b.name))
        });
        for character in ranked.into_iter().take(MAX_GOLD_EARNERS) {
            let options = CharacterOptions {
                selected_raids: available_raids(character.level)
                    .iter()
                    .map(|tier| tier.raid_name.clone())
                    .collect(),
                took_gold_option: true,
                ..CharacterOptions::default()
            };
            plan.set_options(character, options);
        }
        plan
    }

    pub fn set_options(&mut self, character: &Character, options: CharacterOptions) {
        self.per_character
            .entry(character.server.clone())
            .or_default()
            .insert(character.name.clone(), options);
    }

    #[must_use]
    pub fn options_for(&self, character: &Character) -> &CharacterOptions {
        self.per_character
            .get(&character.server)
            .and_then(|server| server.get(&character.name))
            .unwrap_or(&self.defaults)
    }

    pub fn exclude_server(&mut self, server: &str) {
        self.excluded_servers.insert(server.to_string());
    }

    pub fn include_server(&mut self, server: &str) {
        self.excluded_servers.remove(server);
    }

    #[must_use]
    pub fn is_server_excluded(&self, server: &str) -> bool {
        self.excluded_servers.contains(server)
    }
}

/// Weekly yield for a character set, broken down per content kind.
///
/// Combined figures are derived from the per-content product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub chaos: ContentTotals,
    pub guardian: ContentTotals,
    pub raid: ContentTotals,
}

impl AggregateReport {
    #[must_use]
    pub fn total_tradable_gold(&self) -> f64 {
        self.chaos.tradable_gold + self.guardian.tradable_gold + self.raid.tradable_gold
    }

    #[must_use]
    pub fn total_bound_gold(&self) -> f64 {
        self.chaos.bound_gold + self.guardian.bound_gold + self.raid.bound_gold
    }

    /// Itemized tradable resources merged across content kinds.
    #[must_use]
    pub fn tradable_resources(&self) -> BTreeMap<String, ResourceLine> {
        let mut merged = BTreeMap::new();
        for totals in [&self.chaos, &self.guardian, &self.raid] {
            merge_lines(&mut merged, &totals.tradable);
        }
        merged
    }

    /// Itemized bound resources merged across content kinds.
    #[must_use]
    pub fn bound_resources(&self) -> BTreeMap<String, ResourceLine> {
        let mut merged = BTreeMap::new();
        for totals in [&self.chaos, &self.guardian, &self.raid] {
            merge_lines(&mut merged, &totals.bound);
        }
        merged
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: &Self) {
        self.chaos.merge(&other.chaos);
        self.guardian.merge(&other.guardian);
        self.raid.merge(&other.raid);
    }
}

/// One character's weekly yield under the given options.
///
/// An excluded character contributes nothing at all; a skipped cadence
/// short-circuits its content entirely.
#[must_use]
pub fn character_report(
    character: &Character,
    options: &CharacterOptions,
    prices: &PriceBook,
) -> AggregateReport {
    let mut report = AggregateReport::default();
    if options.excluded {
        return report;
    }

    if options.chaos != ClearCadence::Skip {
        if let Some(reward) = chaos_reward(character.level) {
            report.chaos.add_reward(
                reward,
                ContentKind::ChaosDungeon,
                options.chaos.weekly_clears(),
                prices,
            );
        }
    }
    if options.guardian != ClearCadence::Skip {
        if let Some(reward) = guardian_reward(character.level) {
            report.guardian.add_reward(
                reward,
                ContentKind::GuardianRaid,
                options.guardian.weekly_clears(),
                prices,
            );
        }
    }
    for tier in available_raids(character.level) {
        if !options.selected_raids.contains(&tier.raid_name) {
            continue;
        }
        report
            .raid
            .add_reward(tier.reward(options.took_gold_option), ContentKind::Raid, 1.0, prices);
    }
    report
}

/// Fold a set of characters into one report. Addition is commutative,
/// so input order never changes the outcome.
pub fn aggregate<'a, I>(entries: I, prices: &PriceBook) -> AggregateReport
where
    I: IntoIterator<Item = (&'a Character, &'a CharacterOptions)>,
{
    let mut report = AggregateReport::default();
    for (character, options) in entries {
        report.merge(&character_report(character, options, prices));
    }
    report
}

/// Aggregate a whole roster under a plan, skipping excluded servers.
#[must_use]
pub fn roster_report(
    roster: &Roster,
    plan: &CalculationPlan,
    prices: &PriceBook,
) -> AggregateReport {
    aggregate(
        roster
            .characters()
            .filter(|character| !plan.is_server_excluded(&character.server))
            .map(|character| (character, plan.options_for(character))),
        prices,
    )
}

/// Per-server reports for the comparison view, skipping excluded
/// servers. Each report is the same fold over that server's subset.
#[must_use]
pub fn server_reports(
    roster: &Roster,
    plan: &CalculationPlan,
    prices: &PriceBook,
) -> BTreeMap<String, AggregateReport> {
    roster
        .servers
        .iter()
        .filter(|server| !plan.is_server_excluded(&server.name))
        .map(|server| {
            let report = aggregate(
                server
                    .characters
                    .iter()
                    .map(|character| (character, plan.options_for(character))),
                prices,
            );
            (server.name.clone(), report)
        })
        .collect()
}
