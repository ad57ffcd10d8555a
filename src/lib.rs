//! Agri Predict - prediction service for agricultural sensor models
//!
//! This library loads a pre-trained regression model at startup and serves
//! predictions over a single HTTP endpoint. One binary covers the water
//! allocation and soil fertility variants, selected via configuration.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{
    allocation_volume, OutputMode, PredictError, Predictor, ALLOCATION_SCHEMA, FERTILITY_SCHEMA,
};
pub use models::{ErrorResponse, HealthResponse, PredictRequest, PredictionResponse};
