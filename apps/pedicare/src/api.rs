//! # HTTP API
//!
//! REST endpoints over the PediCare rules.
//!
//! | method | path                    |
//! |--------|-------------------------|
//! | GET    | `/health`               |
//! | POST   | `/triage`               |
//! | POST   | `/triage/answers`       |
//! | POST   | `/growth`               |
//! | POST   | `/vaccinations/summary` |
//! | GET    | `/emergency/timeline`   |
//! | GET    | `/emergency/types`      |
//! | GET    | `/hospitals?q=`         |
//! | GET    | `/doctors`              |
//! | POST   | `/appointments`         |
//!
//! Errors are returned as `{ "error": "..." }`. Every route shares one
//! global rate limit; requests over it get `429 Too Many Requests`.

use crate::config::ServerConfig;
use crate::error::AppError;
use axum::extract::{Query, Request, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use pedicare_core::booking::{DOCTORS, TIME_SLOTS};
use pedicare_core::emergency::{EMERGENCY_TYPES, TimelineEntry};
use pedicare_core::locations;
use pedicare_core::{
    Appointment, AppointmentRequest, DispatchTimeline, EmergencyType, GrowthClassifier,
    GrowthForm, GrowthResult, Hospital, SymptomResponse, TriageEngine, TriageResult,
    VaccinationRecord, VaccinationSummary,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

// =============================================================================
// STATE
// =============================================================================

#[derive(Clone)]
pub struct AppState {
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(
                config.rate_limit_per_second,
            ))),
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the API router with CORS, tracing and rate limiting applied.
pub fn create_router(config: &ServerConfig) -> Result<Router, AppError> {
    let state = AppState::new(config);

    let router = Router::new()
        .route("/health", get(health))
        .route("/triage", post(triage))
        .route("/triage/answers", post(triage_answers))
        .route("/growth", post(growth))
        .route("/vaccinations/summary", post(vaccination_summary))
        .route("/emergency/timeline", get(emergency_timeline))
        .route("/emergency/types", get(emergency_types))
        .route("/hospitals", get(hospitals))
        .route("/doctors", get(doctors))
        .route("/appointments", post(appointments))
        .layer(middleware::from_fn_with_state(state, rate_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins)?);

    Ok(router)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer, AppError> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| AppError::Config(format!("invalid CORS origin: {origin}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}

async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if state.limiter.check().is_err() {
        debug!(path = %request.uri().path(), "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "Too many requests" })),
        )
            .into_response();
    }
    next.run(request).await
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), AppError> {
    let addr = config.socket_addr()?;
    let router = create_router(&config)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        rate_limit = config.rate_limit_per_second.get(),
        "PediCare API listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("PediCare API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // no signal handler; run until the process is killed
        std::future::pending::<()>().await;
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn triage(Json(response): Json<SymptomResponse>) -> Json<TriageResult> {
    let result = TriageEngine::classify(&response);
    info!(level = %result.level, "triage classified");
    Json(result)
}

async fn triage_answers(Json(answers): Json<BTreeMap<String, String>>) -> Json<TriageResult> {
    let response = SymptomResponse::from_answers(&answers);
    let result = TriageEngine::classify(&response);
    info!(level = %result.level, "triage classified from answers");
    Json(result)
}

async fn growth(Json(form): Json<GrowthForm>) -> Result<Json<GrowthResult>, AppError> {
    let result = GrowthClassifier::classify_form(&form)?;
    info!(category = %result.category, "growth classified");
    Ok(Json(result))
}

async fn vaccination_summary(Json(record): Json<VaccinationRecord>) -> Json<VaccinationSummary> {
    Json(record.summary())
}

async fn emergency_timeline() -> Json<Vec<TimelineEntry>> {
    Json(DispatchTimeline::default().entries())
}

async fn emergency_types() -> Json<Vec<EmergencyType>> {
    Json(EMERGENCY_TYPES.to_vec())
}

#[derive(Debug, Default, Deserialize)]
struct HospitalQuery {
    q: Option<String>,
}

async fn hospitals(Query(query): Query<HospitalQuery>) -> Json<Vec<&'static Hospital>> {
    Json(locations::search(query.q.as_deref().unwrap_or_default()))
}

async fn doctors() -> Json<Value> {
    Json(json!({
        "doctors": DOCTORS,
        "time_slots": TIME_SLOTS,
    }))
}

async fn appointments(
    Json(request): Json<AppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = request.confirm()?;
    info!(doctor = %appointment.doctor_id, "appointment requested");
    Ok(Json(appointment))
}
