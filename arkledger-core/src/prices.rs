//! Market price data and user overrides.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One backend average-price row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    pub resource_id: String,
    pub average_price: f64,
}

/// The price payload: current market averages per resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceList(pub Vec<PriceEntry>);

impl PriceList {
    /// Load a price payload from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into price rows.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Unit gold prices used during conversion: backend averages overlaid
/// with user edits. A missing resource prices at zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBook {
    base: BTreeMap<String, f64>,
    overrides: BTreeMap<String, f64>,
}

impl PriceBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a book from fetched market averages.
    #[must_use]
    pub fn from_averages(list: &PriceList) -> Self {
        Self {
            base: list
                .0
                .iter()
                .map(|entry| (entry.resource_id.clone(), entry.average_price))
                .collect(),
            overrides: BTreeMap::new(),
        }
    }

    /// Build a book directly from id/price pairs.
    #[must_use]
    pub fn with_prices(pairs: &[(&str, f64)]) -> Self {
        Self {
            base: pairs
                .iter()
                .map(|(id, price)| ((*id).to_string(), *price))
                .collect(),
            overrides: BTreeMap::new(),
        }
    }

    /// Record a user-edited price, shadowing the fetched average.
    pub fn set_override(&mut self, resource_id: &str, price: f64) {
        self.overrides.insert(resource_id.to_string(), price);
    }

    /// Drop a user edit, falling back to the fetched average.
    pub fn clear_override(&mut self, resource_id: &str) {
        self.overrides.remove(resource_id);
    }

    /// Replace the fetched averages, keeping user edits intact.
    pub fn refresh_averages(&mut self, list: &PriceList) {
        self.base = list
            .0
            .iter()
            .map(|entry| (entry.resource_id.clone(), entry.average_price))
            .collect();
    }

    /// The effective unit price for a resource.
    #[must_use]
    pub fn unit_price(&self, resource_id: &str) -> f64 {
        self.overrides
            .get(resource_id)
            .or_else(|| self.base.get(resource_id))
            .copied()
            .unwrap_or(0.0)
    }
}
