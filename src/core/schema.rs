use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while coercing a request payload into a feature row
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("field '{field}' expects a numeric value, got {got}")]
    NotNumeric { field: &'static str, got: String },

    #[error("field '{field}' expects a scalar value, got {got}")]
    NotScalar { field: &'static str, got: String },
}

/// Declared type of a single feature column
#[derive(Debug, Clone, Copy)]
pub enum FeatureKind {
    /// Plain numeric column, defaults to 0
    Numeric,
    /// String column encoded against a fixed category table; index 0 is the
    /// default/unknown slot
    Categorical { categories: &'static [&'static str] },
}

/// One named column of the training schema
#[derive(Debug, Clone, Copy)]
pub struct FeatureSpec {
    pub name: &'static str,
    pub kind: FeatureKind,
}

/// Ordered feature schema for one model variant
///
/// The column order must exactly match the order the model artifact was
/// trained with. A mismatch produces wrong predictions without any error,
/// which is why the schemas are constants rather than configuration.
#[derive(Debug, Clone, Copy)]
pub struct FeatureSchema {
    features: &'static [FeatureSpec],
}

/// Category table for the `label` feature, matching the training pipeline's
/// encoder. "UNKNOWN" must stay at index 0: it is both the default for a
/// missing label and the fallback for unrecognized crop names.
pub const CROP_LABELS: &[&str] = &[
    "UNKNOWN",
    "Rice",
    "Wheat",
    "Maize",
    "Cotton",
    "Sugarcane",
    "Barley",
    "Millet",
    "Soybean",
];

/// Training column order for the water-allocation model
pub const ALLOCATION_SCHEMA: FeatureSchema = FeatureSchema::new(&[
    FeatureSpec { name: "humidity", kind: FeatureKind::Numeric },
    FeatureSpec { name: "soil_moisture", kind: FeatureKind::Numeric },
    FeatureSpec { name: "temperature", kind: FeatureKind::Numeric },
    FeatureSpec { name: "sunlight_exposure", kind: FeatureKind::Numeric },
    FeatureSpec { name: "land_area", kind: FeatureKind::Numeric },
    FeatureSpec { name: "ph", kind: FeatureKind::Numeric },
    FeatureSpec { name: "label", kind: FeatureKind::Categorical { categories: CROP_LABELS } },
    FeatureSpec { name: "soil_type", kind: FeatureKind::Numeric },
]);

/// Training column order for the soil-fertility model
pub const FERTILITY_SCHEMA: FeatureSchema = FeatureSchema::new(&[
    FeatureSpec { name: "temperature", kind: FeatureKind::Numeric },
    FeatureSpec { name: "humidity", kind: FeatureKind::Numeric },
    FeatureSpec { name: "ph", kind: FeatureKind::Numeric },
    FeatureSpec { name: "rainfall", kind: FeatureKind::Numeric },
    FeatureSpec { name: "soil_moisture", kind: FeatureKind::Numeric },
    FeatureSpec { name: "fertilizer_usage", kind: FeatureKind::Numeric },
]);

impl FeatureSchema {
    pub const fn new(features: &'static [FeatureSpec]) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Declared column names, in training order
    pub fn feature_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.features.iter().map(|spec| spec.name)
    }

    /// Build the ordered feature row for one payload
    ///
    /// Unknown payload keys are ignored. Missing or null values take the
    /// declared default (0 for numeric columns, the index-0 category for
    /// categorical columns). A present value that cannot be coerced to the
    /// declared type is a client error, never silently defaulted.
    pub fn build_row(&self, payload: &Map<String, Value>) -> Result<Vec<f32>, SchemaError> {
        self.features
            .iter()
            .map(|spec| match payload.get(spec.name) {
                None | Some(Value::Null) => Ok(default_value(spec.kind)),
                Some(value) => coerce(spec, value),
            })
            .collect()
    }
}

fn default_value(kind: FeatureKind) -> f32 {
    match kind {
        FeatureKind::Numeric => 0.0,
        // the default category sits at index 0
        FeatureKind::Categorical { .. } => 0.0,
    }
}

fn coerce(spec: &FeatureSpec, value: &Value) -> Result<f32, SchemaError> {
    match spec.kind {
        FeatureKind::Numeric => coerce_numeric(spec.name, value),
        FeatureKind::Categorical { categories } => coerce_categorical(spec.name, categories, value),
    }
}

fn coerce_numeric(field: &'static str, value: &Value) -> Result<f32, SchemaError> {
    match value {
        Value::Number(n) => Ok(n.as_f64().unwrap_or(0.0) as f32),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(|v| v as f32)
            .map_err(|_| SchemaError::NotNumeric { field, got: format!("\"{}\"", s) }),
        other => Err(SchemaError::NotNumeric { field, got: json_type_name(other).to_string() }),
    }
}

fn coerce_categorical(
    field: &'static str,
    categories: &'static [&'static str],
    value: &Value,
) -> Result<f32, SchemaError> {
    let label = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => {
            return Err(SchemaError::NotScalar { field, got: json_type_name(other).to_string() })
        }
    };

    Ok(encode_category(categories, &label))
}

/// Encode a category as its table index; unrecognized labels fall back to the
/// unknown slot at index 0
fn encode_category(categories: &[&str], label: &str) -> f32 {
    categories
        .iter()
        .position(|c| *c == label)
        .unwrap_or(0) as f32
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_allocation_schema_matches_training_order() {
        let names: Vec<&str> = ALLOCATION_SCHEMA.feature_names().collect();
        assert_eq!(
            names,
            vec![
                "humidity",
                "soil_moisture",
                "temperature",
                "sunlight_exposure",
                "land_area",
                "ph",
                "label",
                "soil_type"
            ]
        );
    }

    #[test]
    fn test_fertility_schema_matches_training_order() {
        let names: Vec<&str> = FERTILITY_SCHEMA.feature_names().collect();
        assert_eq!(
            names,
            vec!["temperature", "humidity", "ph", "rainfall", "soil_moisture", "fertilizer_usage"]
        );
    }

    #[test]
    fn test_empty_payload_defaults_every_column() {
        let row = FERTILITY_SCHEMA.build_row(&Map::new()).unwrap();
        assert_eq!(row, vec![0.0; FERTILITY_SCHEMA.len()]);

        let row = ALLOCATION_SCHEMA.build_row(&Map::new()).unwrap();
        // the categorical label defaults to the UNKNOWN slot (index 0)
        assert_eq!(row, vec![0.0; ALLOCATION_SCHEMA.len()]);
    }

    #[test]
    fn test_build_row_orders_values_by_schema_not_payload() {
        let payload = as_map(json!({
            "fertilizer_usage": 50,
            "temperature": 20,
            "soil_moisture": 40,
            "humidity": 60,
            "rainfall": 100,
            "ph": 6
        }));

        let row = FERTILITY_SCHEMA.build_row(&payload).unwrap();
        assert_eq!(row, vec![20.0, 60.0, 6.0, 100.0, 40.0, 50.0]);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let payload = as_map(json!({
            "temperature": 21.5,
            "operator": "field-station-7",
            "nested": {"a": 1}
        }));

        let row = FERTILITY_SCHEMA.build_row(&payload).unwrap();
        assert_eq!(row.len(), FERTILITY_SCHEMA.len());
        assert_eq!(row[0], 21.5);
    }

    #[test]
    fn test_numeric_string_is_parsed() {
        let payload = as_map(json!({"temperature": "25.5"}));
        let row = FERTILITY_SCHEMA.build_row(&payload).unwrap();
        assert_eq!(row[0], 25.5);
    }

    #[test]
    fn test_null_value_takes_default() {
        let payload = as_map(json!({"temperature": null}));
        let row = FERTILITY_SCHEMA.build_row(&payload).unwrap();
        assert_eq!(row[0], 0.0);
    }

    #[test]
    fn test_non_numeric_string_is_rejected() {
        let payload = as_map(json!({"temperature": "warm"}));
        let err = FERTILITY_SCHEMA.build_row(&payload).unwrap_err();
        assert!(matches!(err, SchemaError::NotNumeric { field: "temperature", .. }));
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn test_array_in_numeric_field_is_rejected() {
        let payload = as_map(json!({"ph": [6.5]}));
        let err = FERTILITY_SCHEMA.build_row(&payload).unwrap_err();
        assert!(matches!(err, SchemaError::NotNumeric { field: "ph", .. }));
    }

    #[test]
    fn test_known_label_encodes_to_table_index() {
        let payload = as_map(json!({"label": "Rice"}));
        let row = ALLOCATION_SCHEMA.build_row(&payload).unwrap();
        // label is the 7th column
        assert_eq!(row[6], 1.0);
    }

    #[test]
    fn test_unrecognized_label_maps_to_unknown_slot() {
        let payload = as_map(json!({"label": "Dragonfruit"}));
        let row = ALLOCATION_SCHEMA.build_row(&payload).unwrap();
        assert_eq!(row[6], 0.0);
    }

    #[test]
    fn test_object_in_label_field_is_rejected() {
        let payload = as_map(json!({"label": {"crop": "Rice"}}));
        let err = ALLOCATION_SCHEMA.build_row(&payload).unwrap_err();
        assert!(matches!(err, SchemaError::NotScalar { field: "label", .. }));
    }

    #[test]
    fn test_unknown_category_is_table_head() {
        assert_eq!(CROP_LABELS[0], "UNKNOWN");
        assert_eq!(encode_category(CROP_LABELS, "UNKNOWN"), 0.0);
    }
}
