use crate::core::remap::allocation_volume;
use crate::core::schema::{FeatureSchema, SchemaError};
use crate::models::PredictionResponse;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur while serving a prediction
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("model returned no prediction for the feature row")]
    NoPrediction,
}

impl PredictError {
    /// True when the failure was caused by the client's payload
    pub fn is_client_error(&self) -> bool {
        matches!(self, PredictError::Schema(_))
    }
}

/// Shape of the response produced from the raw model score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Return the raw score as `allocation_index`
    AllocationIndex,
    /// Return `fertility_score`, optionally with the derived `allocatedVolume`
    FertilityScore { include_allocated_volume: bool },
}

impl OutputMode {
    pub fn variant_name(self) -> &'static str {
        match self {
            OutputMode::AllocationIndex => "allocation",
            OutputMode::FertilityScore { .. } => "fertility",
        }
    }
}

/// Loaded regression model plus the schema and output shape it serves
///
/// Constructed once at startup and shared read-only across request handlers;
/// nothing here mutates after load, so concurrent access needs no locking.
pub struct Predictor {
    model: GBDT,
    schema: FeatureSchema,
    output: OutputMode,
}

impl Predictor {
    pub fn new(model: GBDT, schema: FeatureSchema, output: OutputMode) -> Self {
        Self { model, schema, output }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn variant_name(&self) -> &'static str {
        self.output.variant_name()
    }

    /// Run one prediction: coerce the payload into the ordered feature row,
    /// score it, and shape the response for the active variant
    pub fn predict(&self, payload: &Map<String, Value>) -> Result<PredictionResponse, PredictError> {
        let row = self.schema.build_row(payload)?;

        let batch: DataVec = vec![Data::new_test_data(row, None)];
        let scores = self.model.predict(&batch);
        let score = f64::from(*scores.first().ok_or(PredictError::NoPrediction)?);

        let response = match self.output {
            OutputMode::AllocationIndex => PredictionResponse::allocation(score),
            OutputMode::FertilityScore { include_allocated_volume } => {
                let volume = include_allocated_volume.then(|| allocation_volume(score));
                PredictionResponse::fertility(score, volume)
            }
        };

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_names() {
        assert_eq!(OutputMode::AllocationIndex.variant_name(), "allocation");
        assert_eq!(
            OutputMode::FertilityScore { include_allocated_volume: true }.variant_name(),
            "fertility"
        );
        assert_eq!(
            OutputMode::FertilityScore { include_allocated_volume: false }.variant_name(),
            "fertility"
        );
    }

    #[test]
    fn test_schema_errors_are_client_errors() {
        let err = PredictError::Schema(SchemaError::NotNumeric {
            field: "ph",
            got: "\"acidic\"".to_string(),
        });
        assert!(err.is_client_error());
        assert!(!PredictError::NoPrediction.is_client_error());
    }
}
