use actix_web::{web, HttpResponse, Responder};
use crate::core::Predictor;
use crate::models::{ErrorResponse, HealthResponse, PredictRequest};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
}

/// Configure prediction routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/predict", web::post().to(predict));
}

/// Health check endpoint
///
/// The model artifact is loaded before the server binds, so a responding
/// service is a ready service.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        variant: state.predictor.variant_name().to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Prediction endpoint
///
/// POST /predict
///
/// Request body: a JSON object mapping feature names to scalars, e.g.
/// ```json
/// {
///   "temperature": 20,
///   "humidity": 60,
///   "ph": 6,
///   "rainfall": 100,
///   "soil_moisture": 40,
///   "fertilizer_usage": 50
/// }
/// ```
///
/// Missing features take their schema defaults; unrecognized keys are
/// ignored; a value that cannot be coerced to its declared type is a 400.
async fn predict(
    state: web::Data<AppState>,
    req: web::Json<PredictRequest>,
) -> impl Responder {
    match state.predictor.predict(req.fields()) {
        Ok(response) => {
            tracing::debug!(
                "Served {} prediction for {} supplied fields",
                state.predictor.variant_name(),
                req.fields().len()
            );
            HttpResponse::Ok().json(response)
        }
        Err(e) if e.is_client_error() => {
            tracing::info!("Rejected prediction request: {}", e);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "invalid_input".to_string(),
                message: e.to_string(),
                status_code: 400,
            })
        }
        Err(e) => {
            tracing::error!("Prediction failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "prediction_failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
