use serde::{Deserialize, Serialize};

/// Response for the prediction endpoint
///
/// Exactly the fields declared for the active variant are serialized; the
/// absent options never appear in the JSON body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocation_index: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fertility_score: Option<f64>,

    #[serde(rename = "allocatedVolume", skip_serializing_if = "Option::is_none")]
    pub allocated_volume: Option<i64>,
}

impl PredictionResponse {
    /// Allocation-index variant: the raw score, unchanged
    pub fn allocation(score: f64) -> Self {
        Self { allocation_index: Some(score), ..Self::default() }
    }

    /// Fertility variant, with or without the derived volume
    pub fn fertility(score: f64, allocated_volume: Option<i64>) -> Self {
        Self { fertility_score: Some(score), allocated_volume, ..Self::default() }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub variant: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
