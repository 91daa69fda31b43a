//! Condition adjustment
//!
//! A 0-5 condition score is centered on 3 ("as described"). Each point away
//! from 3 moves the price by 0.1 scaled by the category's sensitivity, and
//! every supplement such as the original box adds its fixed bonus. The total
//! is clipped to a ±0.30 band and quantized to two places.

use crate::error::{AdjustmentError, Result};
use crate::tables::{quantize, PricingTables};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::{debug, trace, warn};

pub const SCORE_MIN: i32 = 0;
pub const SCORE_MAX: i32 = 5;
pub const BASELINE_SCORE: i32 = 3;

pub const SENSITIVITY_MIN: Decimal = dec!(0.5);
pub const SENSITIVITY_MAX: Decimal = dec!(1.5);

pub const ADJUSTMENT_FLOOR: Decimal = dec!(-0.30);
pub const ADJUSTMENT_CEILING: Decimal = dec!(0.30);

/// Calculator for condition adjustments
#[derive(Debug, Clone)]
pub struct ConditionCalculator {
    tables: Arc<PricingTables>,
}

impl Default for ConditionCalculator {
    fn default() -> Self {
        Self::new(Arc::new(PricingTables::default()))
    }
}

impl ConditionCalculator {
    pub fn new(tables: Arc<PricingTables>) -> Self {
        Self { tables }
    }

    /// Calculate the condition adjustment in [-0.30, 0.30]
    pub fn calculate<S: AsRef<str>>(
        &self,
        score: i32,
        supplements: &[S],
        sensitivity: Decimal,
    ) -> Result<Decimal> {
        if !(SCORE_MIN..=SCORE_MAX).contains(&score) {
            warn!("Rejected condition score {}", score);
            return Err(AdjustmentError::validation(
                "condition_score",
                format!("must be between {SCORE_MIN} and {SCORE_MAX}, got {score}"),
            ));
        }

        if sensitivity < SENSITIVITY_MIN || sensitivity > SENSITIVITY_MAX {
            warn!("Rejected condition sensitivity {}", sensitivity);
            return Err(AdjustmentError::validation(
                "condition_sensitivity",
                format!(
                    "must be between {SENSITIVITY_MIN} and {SENSITIVITY_MAX}, got {sensitivity}"
                ),
            ));
        }

        // base = (score - 3) / 10 * sensitivity
        let base = Decimal::from(score - BASELINE_SCORE) / dec!(10) * sensitivity;

        // Every listed supplement adds its bonus; repeats add again.
        let bonus: Decimal = supplements
            .iter()
            .filter_map(|tag| {
                let tag = tag.as_ref();
                let value = self.tables.supplement_bonus(tag);
                if value.is_none() {
                    trace!(tag, "ignoring unrecognized supplement");
                }
                value
            })
            .sum();

        let total = base + bonus;
        let clipped = total.clamp(ADJUSTMENT_FLOOR, ADJUSTMENT_CEILING);
        let adjustment = quantize(clipped);

        debug!(
            "Calculated condition adjustment: {} (score: {}, sensitivity: {}, base: {}, \
             bonus: {}, clipped: {})",
            adjustment,
            score,
            sensitivity,
            base,
            bonus,
            clipped != total
        );

        Ok(adjustment)
    }
}
