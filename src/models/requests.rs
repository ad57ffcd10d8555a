use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw prediction payload: feature name -> JSON scalar
///
/// Deserialized as a plain JSON object rather than a typed struct so that
/// unrecognized keys are accepted and ignored, and missing keys fall back to
/// the schema defaults during row assembly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictRequest(Map<String, Value>);

impl PredictRequest {
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}
