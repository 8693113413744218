//! Arkledger Calculation Engine
//!
//! Platform-agnostic weekly reward calculation for the Arkledger roster
//! calculator. This crate provides the full yield engine without UI or
//! platform-specific dependencies.

pub mod aggregate;
pub mod constants;
pub mod gold;
pub mod prices;
pub mod rewards;
pub mod roster;
pub mod tables;

// Re-export commonly used types
pub use aggregate::{
    AggregateReport, CalculationPlan, CharacterOptions, ClearCadence, aggregate,
    character_report, roster_report, server_reports,
};
pub use gold::{ContentKind, ContentTotals, GoldSplit, ResourceLine, convert_to_gold, is_tradable};
pub use prices::{PriceBook, PriceEntry, PriceList};
pub use rewards::{RewardCategory, RewardEntry, RewardRecord, normalize_gem_key};
pub use roster::{Character, CharacterRow, Roster, RosterError, SearchPayload, ServerGroup, ServerRoster};
pub use tables::{
    ChaosTier, GuardianTier, RaidLineup, RaidTier, TableError, available_raids, chaos_reward,
    chaos_table, chaos_tier, guardian_reward, guardian_table, guardian_tier, raid_table,
    validate_tables,
};

/// Trait for abstracting market price fetches
/// Platform-specific implementations should provide this
pub trait PriceSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the current average-price payload
    ///
    /// # Errors
    ///
    /// Returns an error if the price payload cannot be loaded.
    fn load_prices(&self) -> Result<PriceList, Self::Error>;
}

/// Trait for abstracting roster searches
/// Platform-specific implementations should provide this
pub trait RosterSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the search payload for a player nickname
    ///
    /// # Errors
    ///
    /// Returns an error if the search payload cannot be loaded.
    fn search(&self, nickname: &str) -> Result<SearchPayload, Self::Error>;
}

/// Main engine tying the two data sources to the calculator
pub struct CalculatorEngine<P, R>
where
    P: PriceSource,
    R: RosterSource,
{
    price_source: P,
    roster_source: R,
}

impl<P, R> CalculatorEngine<P, R>
where
    P: PriceSource,
    R: RosterSource,
{
    /// Create a new engine with the provided data sources
    pub const fn new(price_source: P, roster_source: R) -> Self {
        Self {
            price_source,
            roster_source,
        }
    }

    /// Fetch market averages into a fresh price book
    ///
    /// # Errors
    ///
    /// Returns an error if the price payload cannot be loaded.
    pub fn load_price_book(&self) -> Result<PriceBook, P::Error> {
        let list = self.price_source.load_prices()?;
        Ok(PriceBook::from_averages(&list))
    }

    /// Search a nickname and parse the payload into a roster
    ///
    /// # Errors
    ///
    /// Returns an error if the search payload cannot be loaded or if a
    /// character row fails to parse.
    pub fn search_roster(&self, nickname: &str) -> Result<Roster, anyhow::Error>
    where
        R::Error: Into<anyhow::Error>,
    {
        let payload = self.roster_source.search(nickname).map_err(Into::into)?;
        Ok(Roster::from_payload(&payload)?)
    }

    /// Fetch prices and roster for a nickname and compute the weekly
    /// report under the default plan.
    ///
    /// # Errors
    ///
    /// Returns an error if either payload cannot be loaded or parsed.
    pub fn default_report(&self, nickname: &str) -> Result<AggregateReport, anyhow::Error>
    where
        P::Error: Into<anyhow::Error>,
        R::Error: Into<anyhow::Error>,
    {
        let prices = self.load_price_book().map_err(Into::into)?;
        let roster = self.search_roster(nickname)?;
        let plan = CalculationPlan::default_for(&roster);
        Ok(roster_report(&roster, &plan, &prices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[derive(Clone, Copy, Default)]
    struct FixturePrices;

    impl PriceSource for FixturePrices {
        type Error = Infallible;

        fn load_prices(&self) -> Result<PriceList, Self::Error> {
            Ok(PriceList(vec![
                PriceEntry {
                    resource_id: constants::DESTINY_DESTRUCTION_STONE.to_string(),
                    average_price: 1.1,
                },
                PriceEntry {
                    resource_id: "GEM_TIER_4".to_string(),
                    average_price: 290.0,
                },
            ]))
        }
    }

    #[derive(Clone, Copy, Default)]
    struct FixtureRoster;

    impl RosterSource for FixtureRoster {
        type Error = Infallible;

        fn search(&self, _nickname: &str) -> Result<SearchPayload, Self::Error> {
            let payload = SearchPayload::from_json(
                r#"{
                    "servers": [
                        {
                            "serverName": "루페온",
                            "characters": [
                                {"characterName": "창술사", "className": "Glaivier", "itemLevel": "1,632.50"},
                                {"characterName": "버서커", "className": "Berserker", "itemLevel": "1,540.00"}
                            ]
                        }
                    ]
                }"#,
            )
            .unwrap();
            Ok(payload)
        }
    }

    #[test]
    fn engine_loads_prices_and_roster() {
        let engine = CalculatorEngine::new(FixturePrices, FixtureRoster);

        let book = engine.load_price_book().unwrap();
        assert_eq!(book.unit_price(constants::DESTINY_DESTRUCTION_STONE), 1.1);

        let roster = engine.search_roster("모코코").unwrap();
        assert_eq!(roster.characters().count(), 2);
        assert_eq!(roster.servers[0].characters[0].level, 1632.5);
    }

    #[test]
    fn default_report_pays_the_whole_roster() {
        let engine = CalculatorEngine::new(FixturePrices, FixtureRoster);
        let report = engine.default_report("모코코").unwrap();

        // Both characters are gold earners under the default plan, so
        // raid gold and repeatable-dungeon value are both present.
        assert!(report.raid.tradable_gold > 0.0);
        assert!(report.chaos.tradable_gold > 0.0);
        assert!(report.total_tradable_gold() > report.raid.tradable_gold);
    }
}
