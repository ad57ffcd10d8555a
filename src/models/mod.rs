// Model exports
pub mod requests;
pub mod responses;

pub use requests::PredictRequest;
pub use responses::{ErrorResponse, HealthResponse, PredictionResponse};
