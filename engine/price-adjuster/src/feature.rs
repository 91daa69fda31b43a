//! Notable feature bonus
//!
//! Unexpected features are individually verifiable, so their bonuses add up,
//! capped at 0.30.

use crate::error::Result;
use crate::tables::{quantize, PricingTables};
use crate::tags;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::debug;

pub const FEATURE_CAP: Decimal = dec!(0.30);

/// Calculator for the additive feature bonus
#[derive(Debug, Clone)]
pub struct FeatureCalculator {
    tables: Arc<PricingTables>,
}

impl Default for FeatureCalculator {
    fn default() -> Self {
        Self::new(Arc::new(PricingTables::default()))
    }
}

impl FeatureCalculator {
    pub fn new(tables: Arc<PricingTables>) -> Self {
        Self { tables }
    }

    /// Sum of unexpected recognized feature coefficients, capped at 0.30
    pub fn calculate<A, E>(&self, actual_features: &[A], expected_features: &[E]) -> Result<Decimal>
    where
        A: AsRef<str>,
        E: AsRef<str>,
    {
        let unexpected = tags::unexpected_known(
            actual_features,
            expected_features,
            self.tables.feature_coefficients(),
        );

        let total: Decimal = unexpected.iter().map(|(_, coefficient)| *coefficient).sum();
        let bonus = quantize(total.min(FEATURE_CAP));

        debug!(
            "Calculated feature bonus: {} (unexpected features: {:?}, capped: {})",
            bonus,
            unexpected,
            total > FEATURE_CAP
        );
        Ok(bonus)
    }
}
