//! Lookup tables shared by all calculators
//!
//! `TablesConfig` is the serde form loaded from configuration. `PricingTables`
//! is the validated, immutable runtime form that calculators hold behind an
//! `Arc`. Tables are built once and never mutated afterwards.

use crate::error::{AdjustmentError, Result};
use crate::{condition, decade, feature, trend};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Precision of every adjustment value
pub const ADJUSTMENT_SCALE: u32 = 2;

/// Pad or round a value to exactly two decimal places
pub fn quantize(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(
        ADJUSTMENT_SCALE,
        rust_decimal::RoundingStrategy::MidpointNearestEven,
    );
    rounded.rescale(ADJUSTMENT_SCALE);
    rounded
}

/// Geographic neighbors of one origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborEntry {
    pub origin: String,
    pub neighbors: Vec<String>,
}

impl NeighborEntry {
    fn new(origin: &str, neighbors: &[&str]) -> Self {
        Self {
            origin: origin.to_string(),
            neighbors: neighbors.iter().map(|n| n.to_string()).collect(),
        }
    }
}

/// Serializable table configuration
///
/// Adjacency is a list rather than a map so origin names keep their case
/// when loaded through the `config` crate, which lowercases map keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    /// Bonus per supplement tag (original_box, tags, ...)
    pub supplement_bonuses: BTreeMap<String, Decimal>,

    /// Origins that earn the premium tier
    pub premium_origins: Vec<String>,

    /// Neighbor adjacency used by the neighbor tier
    pub neighbor_origins: Vec<NeighborEntry>,

    /// Vintage bonus per manufacturing decade
    pub decade_coefficients: BTreeMap<String, Decimal>,

    /// Bonus per trend tag
    pub trend_coefficients: BTreeMap<String, Decimal>,

    /// Bonus per notable feature tag
    pub feature_coefficients: BTreeMap<String, Decimal>,
}

fn coefficient_map(entries: &[(&str, Decimal)]) -> BTreeMap<String, Decimal> {
    entries.iter().map(|(key, value)| (key.to_string(), *value)).collect()
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            supplement_bonuses: coefficient_map(&[
                ("original_box", dec!(0.05)),
                ("tags", dec!(0.03)),
                ("dust_bag", dec!(0.03)),
                ("authenticity_card", dec!(0.04)),
            ]),
            premium_origins: ["Italy", "France", "Japan", "USA", "UK", "Germany"]
                .iter()
                .map(|o| o.to_string())
                .collect(),
            neighbor_origins: vec![
                NeighborEntry::new(
                    "Italy",
                    &["France", "Switzerland", "Austria", "Slovenia", "San Marino"],
                ),
                NeighborEntry::new(
                    "France",
                    &[
                        "Italy",
                        "Spain",
                        "Belgium",
                        "Germany",
                        "Switzerland",
                        "Luxembourg",
                        "Monaco",
                    ],
                ),
                NeighborEntry::new(
                    "Germany",
                    &[
                        "France",
                        "Austria",
                        "Switzerland",
                        "Poland",
                        "Czech Republic",
                        "Netherlands",
                        "Belgium",
                        "Denmark",
                        "Luxembourg",
                    ],
                ),
                NeighborEntry::new("UK", &["Ireland", "France"]),
                NeighborEntry::new("USA", &["Canada", "Mexico"]),
                NeighborEntry::new("Japan", &["South Korea", "China", "Taiwan"]),
                NeighborEntry::new("Spain", &["Portugal", "France", "Andorra"]),
                NeighborEntry::new("Portugal", &["Spain"]),
                NeighborEntry::new("Belgium", &["France", "Netherlands", "Germany", "Luxembourg"]),
                NeighborEntry::new("Netherlands", &["Belgium", "Germany"]),
                NeighborEntry::new(
                    "China",
                    &["Vietnam", "South Korea", "Japan", "Taiwan", "Hong Kong", "Mongolia"],
                ),
                NeighborEntry::new("South Korea", &["Japan", "China"]),
                NeighborEntry::new("Vietnam", &["China", "Cambodia", "Laos", "Thailand"]),
                NeighborEntry::new("India", &["Bangladesh", "Pakistan", "Sri Lanka", "Nepal"]),
                NeighborEntry::new("Bangladesh", &["India", "Myanmar"]),
                NeighborEntry::new("Turkey", &["Greece", "Bulgaria"]),
                NeighborEntry::new("Canada", &["USA"]),
                NeighborEntry::new("Mexico", &["USA", "Guatemala"]),
            ],
            decade_coefficients: coefficient_map(&[
                ("1950s", dec!(0.20)),
                ("1960s", dec!(0.18)),
                ("1970s", dec!(0.15)),
                ("1980s", dec!(0.12)),
                ("1990s", dec!(0.08)),
                ("2000s", dec!(0.05)),
                ("2010s", dec!(0.02)),
                ("2020s", dec!(0.00)),
            ]),
            trend_coefficients: coefficient_map(&[
                ("y2k", dec!(0.20)),
                ("vintage", dec!(0.18)),
                ("grunge", dec!(0.15)),
                ("streetwear", dec!(0.12)),
                ("minimalist", dec!(0.08)),
                ("bohemian", dec!(0.06)),
                ("preppy", dec!(0.04)),
                ("athleisure", dec!(0.02)),
            ]),
            feature_coefficients: coefficient_map(&[
                ("deadstock", dec!(0.20)),
                ("selvedge", dec!(0.15)),
                ("og_colorway", dec!(0.15)),
                ("limited_edition", dec!(0.12)),
                ("vintage_label", dec!(0.10)),
                ("original_box", dec!(0.10)),
                ("chain_stitching", dec!(0.08)),
            ]),
        }
    }
}

impl TablesConfig {
    /// Check every table entry against the bounds its calculator guarantees
    pub fn validate(&self) -> Result<()> {
        check_coefficients(
            "supplement_bonuses",
            &self.supplement_bonuses,
            Decimal::ZERO,
            condition::ADJUSTMENT_CEILING,
        )?;
        check_coefficients(
            "decade_coefficients",
            &self.decade_coefficients,
            Decimal::ZERO,
            decade::VINTAGE_CEILING,
        )?;
        check_coefficients(
            "trend_coefficients",
            &self.trend_coefficients,
            Decimal::ZERO,
            trend::TREND_CEILING,
        )?;
        check_coefficients(
            "feature_coefficients",
            &self.feature_coefficients,
            Decimal::ZERO,
            feature::FEATURE_CAP,
        )?;

        if self.decade_coefficients.is_empty() {
            return Err(AdjustmentError::Config(
                "decade_coefficients must not be empty".to_string(),
            ));
        }

        if self.premium_origins.iter().any(|o| o.trim().is_empty()) {
            return Err(AdjustmentError::Config(
                "premium_origins contains a blank origin".to_string(),
            ));
        }

        for entry in &self.neighbor_origins {
            let blank_neighbor = entry.neighbors.iter().any(|n| n.trim().is_empty());
            if entry.origin.trim().is_empty() || blank_neighbor {
                return Err(AdjustmentError::Config(format!(
                    "neighbor_origins entry '{}' contains a blank origin",
                    entry.origin
                )));
            }
        }

        Ok(())
    }
}

fn check_coefficients(
    table: &str,
    entries: &BTreeMap<String, Decimal>,
    min: Decimal,
    max: Decimal,
) -> Result<()> {
    for (key, value) in entries {
        if key.trim().is_empty() {
            return Err(AdjustmentError::Config(format!("{table} contains a blank key")));
        }
        if *value < min || *value > max {
            return Err(AdjustmentError::Config(format!(
                "{table}.{key} = {value} is outside [{min}, {max}]"
            )));
        }
        if value.normalize().scale() > ADJUSTMENT_SCALE {
            return Err(AdjustmentError::Config(format!(
                "{table}.{key} = {value} has more than {ADJUSTMENT_SCALE} decimal places"
            )));
        }
    }
    Ok(())
}

/// Immutable lookup tables used by the calculators
#[derive(Debug, Clone)]
pub struct PricingTables {
    supplement_bonuses: HashMap<String, Decimal>,
    premium_origins: HashSet<String>,
    neighbor_origins: HashMap<String, HashSet<String>>,
    decade_coefficients: HashMap<String, Decimal>,
    trend_coefficients: HashMap<String, Decimal>,
    feature_coefficients: HashMap<String, Decimal>,
}

impl Default for PricingTables {
    fn default() -> Self {
        Self::build(TablesConfig::default())
    }
}

impl PricingTables {
    /// Validate a table configuration and build the runtime tables from it
    pub fn from_config(config: TablesConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: TablesConfig) -> Self {
        let mut neighbor_origins: HashMap<String, HashSet<String>> = HashMap::new();
        for entry in config.neighbor_origins {
            neighbor_origins.entry(entry.origin).or_default().extend(entry.neighbors);
        }

        Self {
            supplement_bonuses: config.supplement_bonuses.into_iter().collect(),
            premium_origins: config.premium_origins.into_iter().collect(),
            neighbor_origins,
            decade_coefficients: config.decade_coefficients.into_iter().collect(),
            trend_coefficients: config.trend_coefficients.into_iter().collect(),
            feature_coefficients: config.feature_coefficients.into_iter().collect(),
        }
    }

    pub fn supplement_bonus(&self, tag: &str) -> Option<Decimal> {
        self.supplement_bonuses.get(tag).copied()
    }

    pub fn is_premium_origin(&self, origin: &str) -> bool {
        self.premium_origins.contains(origin)
    }

    /// Whether `candidate` is listed as a neighbor of `origin`
    pub fn is_neighbor_of(&self, candidate: &str, origin: &str) -> bool {
        self.neighbor_origins.get(origin).is_some_and(|neighbors| neighbors.contains(candidate))
    }

    pub fn decade_coefficient(&self, decade: &str) -> Option<Decimal> {
        self.decade_coefficients.get(decade).copied()
    }

    pub fn supplement_bonuses(&self) -> &HashMap<String, Decimal> {
        &self.supplement_bonuses
    }

    pub fn trend_coefficients(&self) -> &HashMap<String, Decimal> {
        &self.trend_coefficients
    }

    pub fn feature_coefficients(&self) -> &HashMap<String, Decimal> {
        &self.feature_coefficients
    }

    pub fn known_supplements(&self) -> Vec<&str> {
        sorted_keys(&self.supplement_bonuses)
    }

    pub fn known_decades(&self) -> Vec<&str> {
        sorted_keys(&self.decade_coefficients)
    }

    pub fn known_trends(&self) -> Vec<&str> {
        sorted_keys(&self.trend_coefficients)
    }

    pub fn known_features(&self) -> Vec<&str> {
        sorted_keys(&self.feature_coefficients)
    }
}

fn sorted_keys(table: &HashMap<String, Decimal>) -> Vec<&str> {
    let mut keys: Vec<&str> = table.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}
