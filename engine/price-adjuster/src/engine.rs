//! Listing-level adjustment engine
//!
//! Runs all six calculators over one listing's attributes and reports each
//! outcome separately. Combining the outcomes with a base price is the
//! caller's job.

use crate::condition::ConditionCalculator;
use crate::config::AdjusterConfig;
use crate::decade::DecadeCalculator;
use crate::error::{AdjustmentError, Result};
use crate::feature::FeatureCalculator;
use crate::model::{ModelCoefficientResolver, ModelRecord};
use crate::origin::OriginTierClassifier;
use crate::tables::PricingTables;
use crate::trend::TrendCalculator;
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Condition inputs for one listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionInput {
    pub score: i32,
    pub sensitivity: Decimal,
    #[serde(default)]
    pub supplements: Vec<String>,
}

/// Every attribute the calculators need for one listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingAttributes {
    pub listing_id: Option<String>,
    pub model: Option<ModelRecord>,
    pub condition: Option<ConditionInput>,
    pub actual_origin: Option<String>,
    pub expected_origins: Vec<String>,
    pub actual_decade: Option<String>,
    pub expected_decades: Vec<String>,
    pub actual_trends: Vec<String>,
    pub expected_trends: Vec<String>,
    pub actual_features: Vec<String>,
    pub expected_features: Vec<String>,
}

/// Outcome of a single calculator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttributeOutcome {
    Adjusted { value: Decimal },
    Rejected { error: AdjustmentError },
}

impl AttributeOutcome {
    pub fn value(&self) -> Option<Decimal> {
        match self {
            AttributeOutcome::Adjusted { value } => Some(*value),
            AttributeOutcome::Rejected { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&AdjustmentError> {
        match self {
            AttributeOutcome::Adjusted { .. } => None,
            AttributeOutcome::Rejected { error } => Some(error),
        }
    }

    pub fn is_adjusted(&self) -> bool {
        matches!(self, AttributeOutcome::Adjusted { .. })
    }
}

impl From<Result<Decimal>> for AttributeOutcome {
    fn from(result: Result<Decimal>) -> Self {
        match result {
            Ok(value) => AttributeOutcome::Adjusted { value },
            Err(error) => AttributeOutcome::Rejected { error },
        }
    }
}

/// Per-calculator outcomes for one listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjustmentBreakdown {
    pub listing_id: Option<String>,
    pub model_coefficient: AttributeOutcome,
    pub condition: AttributeOutcome,
    pub origin: AttributeOutcome,
    pub decade: AttributeOutcome,
    pub trend: AttributeOutcome,
    pub feature: AttributeOutcome,
}

impl AdjustmentBreakdown {
    /// Outcomes in a fixed order, labelled by attribute
    pub fn outcomes(&self) -> [(&'static str, &AttributeOutcome); 6] {
        [
            ("model_coefficient", &self.model_coefficient),
            ("condition", &self.condition),
            ("origin", &self.origin),
            ("decade", &self.decade),
            ("trend", &self.trend),
            ("feature", &self.feature),
        ]
    }

    pub fn all_valid(&self) -> bool {
        self.outcomes().iter().all(|(_, outcome)| outcome.is_adjusted())
    }

    /// First rejected attribute, in `outcomes()` order
    pub fn first_error(&self) -> Option<&AdjustmentError> {
        self.outcomes().into_iter().find_map(|(_, outcome)| outcome.error())
    }

    pub fn rejected_attributes(&self) -> Vec<&'static str> {
        self.outcomes()
            .into_iter()
            .filter(|(_, outcome)| !outcome.is_adjusted())
            .map(|(name, _)| name)
            .collect()
    }
}

/// Adjustment engine holding the shared tables and all six calculators
#[derive(Debug, Clone)]
pub struct AdjustmentEngine {
    tables: Arc<PricingTables>,
    model: ModelCoefficientResolver,
    condition: ConditionCalculator,
    origin: OriginTierClassifier,
    decade: DecadeCalculator,
    trend: TrendCalculator,
    feature: FeatureCalculator,
}

impl Default for AdjustmentEngine {
    fn default() -> Self {
        Self::new(Arc::new(PricingTables::default()))
    }
}

impl AdjustmentEngine {
    /// Create an engine over already-built tables
    pub fn new(tables: Arc<PricingTables>) -> Self {
        Self {
            model: ModelCoefficientResolver::new(),
            condition: ConditionCalculator::new(Arc::clone(&tables)),
            origin: OriginTierClassifier::new(Arc::clone(&tables)),
            decade: DecadeCalculator::new(Arc::clone(&tables)),
            trend: TrendCalculator::new(Arc::clone(&tables)),
            feature: FeatureCalculator::new(Arc::clone(&tables)),
            tables,
        }
    }

    /// Create an engine from configuration, validating its tables
    pub fn from_config(config: &AdjusterConfig) -> Result<Self> {
        let tables = config.pricing_tables()?;
        info!(
            "Initialized adjustment engine ({} decades, {} trends, {} features, {} supplements)",
            tables.known_decades().len(),
            tables.known_trends().len(),
            tables.known_features().len(),
            tables.known_supplements().len()
        );
        Ok(Self::new(Arc::new(tables)))
    }

    pub fn tables(&self) -> &PricingTables {
        &self.tables
    }

    pub fn model_resolver(&self) -> &ModelCoefficientResolver {
        &self.model
    }

    pub fn condition(&self) -> &ConditionCalculator {
        &self.condition
    }

    pub fn origin(&self) -> &OriginTierClassifier {
        &self.origin
    }

    pub fn decade(&self) -> &DecadeCalculator {
        &self.decade
    }

    pub fn trend(&self) -> &TrendCalculator {
        &self.trend
    }

    pub fn feature(&self) -> &FeatureCalculator {
        &self.feature
    }

    /// Run every calculator over one listing
    pub fn evaluate(&self, listing: &ListingAttributes) -> AdjustmentBreakdown {
        let condition = match &listing.condition {
            Some(input) => {
                self.condition.calculate(input.score, &input.supplements, input.sensitivity)
            }
            None => Err(AdjustmentError::validation(
                "condition",
                "condition inputs are required",
            )),
        };
        let origin = self
            .origin
            .classify(listing.actual_origin.as_deref(), &listing.expected_origins);
        let decade = self
            .decade
            .calculate(listing.actual_decade.as_deref(), &listing.expected_decades);
        let trend = self
            .trend
            .calculate(&listing.actual_trends, &listing.expected_trends);
        let feature = self
            .feature
            .calculate(&listing.actual_features, &listing.expected_features);

        let breakdown = AdjustmentBreakdown {
            listing_id: listing.listing_id.clone(),
            model_coefficient: self.model.resolve(listing.model.as_ref()).into(),
            condition: condition.into(),
            origin: origin.into(),
            decade: decade.into(),
            trend: trend.into(),
            feature: feature.into(),
        };

        debug!(
            "Evaluated listing {}: rejected attributes {:?}",
            listing.listing_id.as_deref().unwrap_or("<unnamed>"),
            breakdown.rejected_attributes()
        );

        breakdown
    }

    /// Evaluate many listings in parallel, preserving input order
    pub fn evaluate_batch(&self, listings: &[ListingAttributes]) -> Vec<AdjustmentBreakdown> {
        let breakdowns: Vec<AdjustmentBreakdown> = listings
            .par_iter()
            .map(|listing| self.evaluate(listing))
            .collect();
        info!("Evaluated batch of {} listings", breakdowns.len());
        breakdowns
    }
}
