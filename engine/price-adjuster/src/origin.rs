//! Origin tier classification
//!
//! Tiers are checked in a fixed order: expected origin, premium origin,
//! neighbor of an expected origin, then everything else. A premium origin
//! that also neighbors an expected one is classified as premium.

use crate::error::{AdjustmentError, Result};
use crate::tables::{quantize, PricingTables};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Origin tier buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OriginTier {
    /// Tier 1: the origin was expected for this model
    Expected,
    /// Tier 2: geographic neighbor of an expected origin
    Neighbor,
    /// Tier 3: premium manufacturing origin
    Premium,
    /// Tier 4: anything else
    Other,
}

impl OriginTier {
    pub fn adjustment(self) -> Decimal {
        match self {
            OriginTier::Expected => dec!(0.00),
            OriginTier::Neighbor => dec!(0.00),
            OriginTier::Premium => dec!(0.15),
            OriginTier::Other => dec!(-0.10),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            OriginTier::Expected => 1,
            OriginTier::Neighbor => 2,
            OriginTier::Premium => 3,
            OriginTier::Other => 4,
        }
    }
}

impl fmt::Display for OriginTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OriginTier::Expected => "expected",
            OriginTier::Neighbor => "neighbor",
            OriginTier::Premium => "premium",
            OriginTier::Other => "other",
        };
        write!(f, "tier {} ({})", self.number(), name)
    }
}

/// Classifies a listing's origin against the model's expected origins
#[derive(Debug, Clone)]
pub struct OriginTierClassifier {
    tables: Arc<PricingTables>,
}

impl Default for OriginTierClassifier {
    fn default() -> Self {
        Self::new(Arc::new(PricingTables::default()))
    }
}

impl OriginTierClassifier {
    pub fn new(tables: Arc<PricingTables>) -> Self {
        Self { tables }
    }

    /// Determine which tier an origin falls into
    pub fn tier<S: AsRef<str>>(
        &self,
        actual_origin: Option<&str>,
        expected_origins: &[S],
    ) -> Result<OriginTier> {
        let actual = match actual_origin {
            Some(origin) if !origin.trim().is_empty() => origin,
            _ => {
                warn!("Rejected missing actual origin");
                return Err(AdjustmentError::validation("actual_origin", "an origin is required"));
            }
        };

        let tier = if expected_origins.iter().any(|expected| expected.as_ref() == actual) {
            OriginTier::Expected
        } else if self.tables.is_premium_origin(actual) {
            OriginTier::Premium
        } else if expected_origins
            .iter()
            .any(|expected| self.tables.is_neighbor_of(actual, expected.as_ref()))
        {
            OriginTier::Neighbor
        } else {
            OriginTier::Other
        };

        debug!(origin = actual, %tier, "classified origin");
        Ok(tier)
    }

    /// Origin adjustment: 0.00, 0.15 or -0.10
    pub fn classify<S: AsRef<str>>(
        &self,
        actual_origin: Option<&str>,
        expected_origins: &[S],
    ) -> Result<Decimal> {
        self.tier(actual_origin, expected_origins)
            .map(|tier| quantize(tier.adjustment()))
    }
}
