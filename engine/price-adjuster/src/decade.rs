//! Decade vintage bonus

use crate::error::{AdjustmentError, Result};
use crate::tables::{quantize, PricingTables};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::{debug, warn};

pub const VINTAGE_CEILING: Decimal = dec!(0.20);

/// Calculator for the manufacturing-era bonus
#[derive(Debug, Clone)]
pub struct DecadeCalculator {
    tables: Arc<PricingTables>,
}

impl Default for DecadeCalculator {
    fn default() -> Self {
        Self::new(Arc::new(PricingTables::default()))
    }
}

impl DecadeCalculator {
    pub fn new(tables: Arc<PricingTables>) -> Self {
        Self { tables }
    }

    /// Vintage bonus in [0.00, 0.20]; zero when the decade was expected
    pub fn calculate<S: AsRef<str>>(
        &self,
        actual_decade: Option<&str>,
        expected_decades: &[S],
    ) -> Result<Decimal> {
        let decade = match actual_decade {
            Some(decade) if !decade.trim().is_empty() => decade,
            _ => {
                warn!("Rejected missing actual decade");
                return Err(AdjustmentError::validation("actual_decade", "a decade is required"));
            }
        };

        let Some(coefficient) = self.tables.decade_coefficient(decade) else {
            warn!("Rejected unknown decade {}", decade);
            return Err(AdjustmentError::validation(
                "actual_decade",
                format!("'{decade}' is not a recognized decade"),
            ));
        };

        if expected_decades.iter().any(|expected| expected.as_ref() == decade) {
            debug!(decade, "decade was expected, no vintage bonus");
            return Ok(quantize(Decimal::ZERO));
        }

        let bonus = quantize(coefficient);
        debug!(decade, %bonus, "calculated vintage bonus");
        Ok(bonus)
    }
}
