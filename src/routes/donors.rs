use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

use crate::core::{MatchError, MatchResult, Matcher};
use crate::models::{ErrorResponse, FindDonorsRequest, FindDonorsResponse, HealthResponse, RequesterProfile};
use crate::services::{DonorRegistry, RegistryError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<DonorRegistry>,
    pub matcher: Matcher,
    /// Upper bound applied to a caller-supplied limit
    pub max_limit: usize,
}

/// Failure of one blocking match query
#[derive(Debug, Error)]
enum QueryError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Configure all donor-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/donors/match", web::post().to(find_donors))
        .route("/registry/options", web::get().to(registry_options));
}

fn error_response(status_code: u16, error: &str, message: String) -> ErrorResponse {
    ErrorResponse {
        error: error.to_string(),
        message,
        status_code,
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.registry.health_check() { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find donors endpoint
///
/// POST /api/v1/donors/match
///
/// Request body:
/// ```json
/// {
///   "bloodType": "O+",
///   "hlaTyping": "A2",
///   "organType": "Kidney",
///   "state": "Kerala",
///   "city": "Kochi",
///   "bmi": 24.5,
///   "age": 40,
///   "limit": 10,
///   "ageWindow": 2
/// }
/// ```
async fn find_donors(
    state: web::Data<AppState>,
    req: web::Json<FindDonorsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_donors request: {:?}", errors);
        return HttpResponse::BadRequest().json(error_response(
            400,
            "Validation failed",
            errors.to_string(),
        ));
    }

    let req = req.into_inner();
    let mut params = state.matcher.defaults();
    if let Some(limit) = req.limit {
        params.limit = usize::from(limit).min(state.max_limit);
    }
    if let Some(age_window) = req.age_window {
        params.age_window = age_window;
    }

    let profile = match RequesterProfile::try_from(req) {
        Ok(profile) => profile,
        Err(e) => {
            tracing::info!("Rejected donor query: {}", e);
            return HttpResponse::BadRequest().json(error_response(400, "Malformed profile", e.to_string()));
        }
    };

    tracing::info!(
        "Matching donors: organ={}, blood={}, city={}, limit={}, age_window={}",
        profile.organ_type,
        profile.blood_type,
        profile.city,
        params.limit,
        params.age_window
    );

    // One snapshot per query; reading and matching are blocking work
    let registry = Arc::clone(&state.registry);
    let matcher = state.matcher;
    let outcome = web::block(move || -> Result<MatchResult, QueryError> {
        let pool = registry.snapshot()?;
        Ok(matcher.find_donors_with(&profile, &pool, params)?)
    })
    .await;

    match outcome {
        Ok(Ok(result)) => {
            tracing::info!(
                "Returning {} donors ({} compatible of {} in registry)",
                result.matches.len(),
                result.compatible_candidates,
                result.total_candidates
            );
            HttpResponse::Ok().json(FindDonorsResponse {
                matches: result.matches,
                total_candidates: result.total_candidates,
                compatible_candidates: result.compatible_candidates,
            })
        }
        Ok(Err(QueryError::Match(e))) => {
            HttpResponse::BadRequest().json(error_response(400, "Malformed profile", e.to_string()))
        }
        Ok(Err(QueryError::Registry(e))) => {
            tracing::error!("Failed to read donor registry: {}", e);
            HttpResponse::InternalServerError().json(error_response(
                500,
                "Failed to read donor registry",
                e.to_string(),
            ))
        }
        Err(e) => {
            tracing::error!("Donor match task failed: {}", e);
            HttpResponse::InternalServerError().json(error_response(
                500,
                "Donor match failed",
                e.to_string(),
            ))
        }
    }
}

/// Registry dropdown data
///
/// GET /api/v1/registry/options
///
/// Computed from a fresh registry read on every call.
async fn registry_options(state: web::Data<AppState>) -> impl Responder {
    let registry = Arc::clone(&state.registry);

    match web::block(move || registry.options()).await {
        Ok(Ok(options)) => HttpResponse::Ok().json(options),
        Ok(Err(e)) => {
            tracing::error!("Failed to read donor registry: {}", e);
            HttpResponse::InternalServerError().json(error_response(
                500,
                "Failed to read donor registry",
                e.to_string(),
            ))
        }
        Err(e) => {
            tracing::error!("Registry options task failed: {}", e);
            HttpResponse::InternalServerError().json(error_response(
                500,
                "Registry options failed",
                e.to_string(),
            ))
        }
    }
}
