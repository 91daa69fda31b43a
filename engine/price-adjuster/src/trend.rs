//! Trend bonus
//!
//! Only the single most valuable unexpected trend counts. Trend premiums do
//! not stack.

use crate::error::Result;
use crate::tables::{quantize, PricingTables};
use crate::tags;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::debug;

pub const TREND_CEILING: Decimal = dec!(0.20);

/// Calculator for the best-match trend bonus
#[derive(Debug, Clone)]
pub struct TrendCalculator {
    tables: Arc<PricingTables>,
}

impl Default for TrendCalculator {
    fn default() -> Self {
        Self::new(Arc::new(PricingTables::default()))
    }
}

impl TrendCalculator {
    pub fn new(tables: Arc<PricingTables>) -> Self {
        Self { tables }
    }

    /// Highest coefficient among unexpected recognized trends, in [0.00, 0.20]
    pub fn calculate<A, E>(&self, actual_trends: &[A], expected_trends: &[E]) -> Result<Decimal>
    where
        A: AsRef<str>,
        E: AsRef<str>,
    {
        let unexpected = tags::unexpected_known(
            actual_trends,
            expected_trends,
            self.tables.trend_coefficients(),
        );

        let best = unexpected
            .iter()
            .map(|(_, coefficient)| *coefficient)
            .max()
            .unwrap_or(Decimal::ZERO);
        let bonus = quantize(best);

        debug!("Calculated trend bonus: {} (unexpected trends: {:?})", bonus, unexpected);
        Ok(bonus)
    }
}
