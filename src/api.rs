//! REST API handlers for the weekly shift allocator.
//!
//! Thin wrapper per spec: validates the request shape, hands a validated
//! `AllocationRequest` to the core `allocator::allocate`, and serializes the
//! returned `WeeklySchedule`. The core crate never sees HTTP types.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;

use crate::allocator;
use crate::config::AppConfig;
use crate::demo_data::{self, DemoData};
use crate::domain::{AllocationRequest, WeeklySchedule, DAYS_IN_WEEK};
use crate::error::AllocationError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/schedule", post(create_schedule))
        .route("/demo-data", get(list_demo_data))
        .route("/demo-data/{id}", get(get_demo_data))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .route("/health", get(health))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "UP" })
}

async fn require_api_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: axum::extract::Request,
    next: Next,
) -> Response {
    let provided = headers.get("X-API-KEY").and_then(|v| v.to_str().ok());
    if provided == Some(state.config.secret_key.as_str()) {
        next.run(request).await
    } else {
        tracing::warn!("rejected request with missing or invalid X-API-KEY");
        (StatusCode::UNAUTHORIZED, Json(json!({ "error": "invalid or missing X-API-KEY" }))).into_response()
    }
}

/// POST /schedule
async fn create_schedule(
    ApiJson(request): ApiJson<AllocationRequest>,
) -> Result<Json<WeeklySchedule>, ApiError> {
    validate_request(&request)?;
    let schedule = allocator::allocate(request)?;
    Ok(Json(schedule))
}

/// `Json<T>` extractor wrapper that turns a malformed or incomplete body
/// into the same `{"error": "..."}` shape every other `BadRequest` uses,
/// instead of axum's plain-text `JsonRejection` response.
struct ApiJson<T>(T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError(AllocationError::BadRequest(rejection.body_text())))?;
        Ok(Self(value))
    }
}

/// GET /demo-data — list available demo data set names.
async fn list_demo_data() -> Json<Vec<&'static str>> {
    Json(demo_data::list_demo_data())
}

/// GET /demo-data/{id} — a demo `AllocationRequest`, ready to POST to
/// `/schedule`.
async fn get_demo_data(Path(id): Path<String>) -> Result<Json<AllocationRequest>, StatusCode> {
    match id.parse::<DemoData>() {
        Ok(demo) => Ok(Json(demo_data::generate(demo))),
        Err(_) => Err(StatusCode::NOT_FOUND),
    }
}

/// Shape-level validation the spec reserves for the HTTP collaborator
/// (spec §7 `BadRequest`): the core only ever raises `NoCandidates`/`BadTime`.
fn validate_request(request: &AllocationRequest) -> Result<(), AllocationError> {
    if request.shifts.len() != DAYS_IN_WEEK {
        return Err(AllocationError::BadRequest(format!(
            "shifts must contain exactly {DAYS_IN_WEEK} day-arrays, got {}",
            request.shifts.len()
        )));
    }
    if request.employees.is_empty() {
        return Err(AllocationError::BadRequest("employees must not be empty".to_string()));
    }
    if !(1..=5).contains(&request.rest_priority) {
        return Err(AllocationError::BadRequest(format!(
            "restPriority must be between 1 and 5, got {}",
            request.rest_priority
        )));
    }
    Ok(())
}

/// Wraps [`AllocationError`] so this crate, not the core, owns the
/// `IntoResponse` impl (spec §7: error taxonomy lives in core, HTTP mapping
/// lives in the collaborator).
struct ApiError(AllocationError);

impl From<AllocationError> for ApiError {
    fn from(err: AllocationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AllocationError::BadRequest(_) | AllocationError::NoCandidates(_) | AllocationError::BadTime(_) => {
                StatusCode::BAD_REQUEST
            }
            AllocationError::SolverUnavailable | AllocationError::SolverFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, %status, "allocation failed");
        } else {
            tracing::warn!(error = %self.0, %status, "rejected allocation request");
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
