// Core prediction exports
pub mod predictor;
pub mod remap;
pub mod schema;

pub use predictor::{OutputMode, PredictError, Predictor};
pub use remap::{allocation_volume, ALLOCATION_FLOOR};
pub use schema::{
    FeatureKind, FeatureSchema, FeatureSpec, SchemaError, ALLOCATION_SCHEMA, CROP_LABELS,
    FERTILITY_SCHEMA,
};
