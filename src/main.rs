mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use config::{Settings, Variant};
use core::{OutputMode, Predictor, ALLOCATION_SCHEMA, FERTILITY_SCHEMA};
use routes::predict::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration first so logging settings from the file apply;
    // the subscriber is not up yet, so failures go straight to stderr
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    // Initialize logging; LOG_LEVEL / LOG_FORMAT env vars override the
    // configured values
    let log_level =
        std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format =
        std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Agri Predict service...");

    let variant = settings.service.variant;
    info!("Configuration loaded (variant: {})", variant.as_str());

    // Resolve the model artifact path: explicit config override, else the
    // per-variant file next to the executable
    let artifact_path = match &settings.model.path {
        Some(path) => PathBuf::from(path),
        None => services::default_artifact_path(variant.artifact_file_name()).unwrap_or_else(|e| {
            error!("Failed to resolve model artifact path: {}", e);
            panic!("Artifact path error: {}", e);
        }),
    };

    // Load the model artifact. This is the startup contract: missing or
    // corrupt artifacts are fatal, the process never serves without a model.
    let model = match services::load_model(&artifact_path) {
        Ok(model) => {
            info!("Model artifact loaded from {}", artifact_path.display());
            model
        }
        Err(e) => {
            error!("Failed to load model artifact: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    let (schema, output) = match variant {
        Variant::Allocation => (ALLOCATION_SCHEMA, OutputMode::AllocationIndex),
        Variant::Fertility => (
            FERTILITY_SCHEMA,
            OutputMode::FertilityScore {
                include_allocated_volume: settings.service.include_allocated_volume,
            },
        ),
    };

    let predictor = Arc::new(Predictor::new(model, schema, output));

    info!(
        "Predictor initialized ({} features, variant: {})",
        predictor.schema().len(),
        predictor.variant_name()
    );

    // Build application state
    let app_state = AppState { predictor };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.resolved_port();
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
