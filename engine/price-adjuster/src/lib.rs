//! Price Adjustment Engine
//!
//! This crate computes the rule-based adjustments that feed a secondhand
//! listing's suggested price: a model coefficient, a condition adjustment,
//! and provenance, era, trend and feature premiums. Each calculator is a pure
//! function over immutable lookup tables and returns an exact two-place
//! `Decimal`. Combining the adjustments with a base price is left to the
//! caller.

pub mod condition;
pub mod config;
pub mod decade;
pub mod engine;
pub mod error;
pub mod feature;
pub mod model;
pub mod origin;
pub mod tables;
pub mod tags;
pub mod trend;

pub use condition::ConditionCalculator;
pub use self::config::AdjusterConfig;
pub use decade::DecadeCalculator;
pub use engine::{
    AdjustmentBreakdown, AdjustmentEngine, AttributeOutcome, ConditionInput, ListingAttributes,
};
pub use error::{AdjustmentError, Result};
pub use feature::FeatureCalculator;
pub use model::{CatalogModel, ModelCoefficientResolver, ModelRecord};
pub use origin::{OriginTier, OriginTierClassifier};
pub use tables::{NeighborEntry, PricingTables, TablesConfig};
pub use trend::TrendCalculator;
