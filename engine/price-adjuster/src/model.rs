//! Model coefficient resolution
//!
//! Every catalog model carries a pre-assigned price multiplier. The resolver
//! only extracts it; the catalog owns the value and its range.

use crate::error::{AdjustmentError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A catalog entry that may expose a model coefficient
pub trait CatalogModel {
    fn coefficient(&self) -> Option<Decimal>;

    /// Identifier used in log output
    fn model_id(&self) -> &str {
        "unknown"
    }
}

/// Model record as supplied by the product catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub model_id: String,
    /// Expected in [0.5, 3.0]; not re-validated here
    pub coefficient: Option<Decimal>,
}

impl ModelRecord {
    pub fn new(model_id: impl Into<String>, coefficient: Decimal) -> Self {
        Self {
            model_id: model_id.into(),
            coefficient: Some(coefficient),
        }
    }
}

impl CatalogModel for ModelRecord {
    fn coefficient(&self) -> Option<Decimal> {
        self.coefficient
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Extracts the coefficient of a catalog model
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelCoefficientResolver;

impl ModelCoefficientResolver {
    pub fn new() -> Self {
        Self
    }

    /// Return the model's coefficient unchanged
    pub fn resolve<M>(&self, model: Option<&M>) -> Result<Decimal>
    where
        M: CatalogModel + ?Sized,
    {
        let Some(model) = model else {
            warn!("Model coefficient requested without a model");
            return Err(AdjustmentError::validation("model", "a model is required"));
        };

        let Some(coefficient) = model.coefficient() else {
            warn!("Model {} has no coefficient", model.model_id());
            return Err(AdjustmentError::validation(
                "model.coefficient",
                format!("model '{}' has no coefficient", model.model_id()),
            ));
        };

        debug!(model_id = model.model_id(), %coefficient, "resolved model coefficient");
        Ok(coefficient)
    }
}
