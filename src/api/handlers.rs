//! HTTP request handlers for the Time-Tracking & Compliance Engine API.
//!
//! This module contains the handler functions for all API endpoints. The
//! tenant is taken from the `X-Tenant-Id` header, falling back to
//! "default"; multi-tenant isolation mechanics beyond settings resolution
//! are out of scope here.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, patch, post, put},
};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::request::{
    ClockActionRequest, EntryPatchRequest, ManualClockInRequest, ManualClockOutRequest,
    ReplaceBreaksRequest, SettingsUpdateRequest, ShiftValidationRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

const TENANT_HEADER: &str = "x-tenant-id";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/time/clock-in", post(clock_in_handler))
        .route("/time/clock-out", post(clock_out_handler))
        .route("/time/break/start", post(break_start_handler))
        .route("/time/break/end", post(break_end_handler))
        .route("/time/manual/clock-in", post(manual_clock_in_handler))
        .route("/time/manual/clock-out", post(manual_clock_out_handler))
        .route(
            "/time/entries/:entry_id",
            patch(update_entry_handler).delete(delete_entry_handler),
        )
        .route("/time/entries/:entry_id/breaks", put(replace_breaks_handler))
        .route("/time/status/:employee_id", get(status_handler))
        .route("/time/history/:employee_id", get(history_handler))
        .route("/compliance/break-check/:employee_id", get(break_check_handler))
        .route(
            "/compliance/clock-out-check/:employee_id",
            get(clock_out_check_handler),
        )
        .route("/compliance/alerts/active/:employee_id", get(alerts_handler))
        .route(
            "/compliance/alerts/refresh/:employee_id",
            post(alert_refresh_handler),
        )
        .route(
            "/compliance/alerts/dismiss/:alert_id",
            post(alert_dismiss_handler),
        )
        .route("/compliance/violations/:employee_id", get(violations_handler))
        .route(
            "/compliance/violations/acknowledge/:violation_id",
            post(violation_ack_handler),
        )
        .route(
            "/compliance/settings",
            get(settings_get_handler).put(settings_put_handler),
        )
        .route("/shifts/validate", post(shift_validate_handler))
        .with_state(state)
}

/// Date range query parameters for history and violation listings.
#[derive(Debug, Deserialize)]
struct DateRangeQuery {
    from: NaiveDate,
    to: NaiveDate,
}

/// Actor attribution for non-body mutations.
#[derive(Debug, Deserialize)]
struct ActorQuery {
    actor_id: String,
}

fn tenant_from(headers: &HeaderMap) -> String {
    headers
        .get(TENANT_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("default")
        .to_string()
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Unpacks a JSON body, mapping rejections to the API error shape.
fn parse_json<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // The body text carries the detailed error from serde.
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            })
        }
    }
}

/// Handler for POST /time/clock-in.
async fn clock_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockActionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        "Processing clock-in"
    );

    let entry = state.tracking().clock_in(&request.employee_id, now())?;
    Ok(Json(entry))
}

/// Handler for POST /time/clock-out.
async fn clock_out_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ClockActionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;
    let tenant = tenant_from(&headers);
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        tenant = %tenant,
        "Processing clock-out"
    );

    let entry = state
        .tracking()
        .clock_out(&tenant, &request.employee_id, now())?;
    Ok(Json(entry))
}

/// Handler for POST /time/break/start.
async fn break_start_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockActionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;
    let brk = state.tracking().start_break(&request.employee_id, now())?;
    Ok(Json(brk))
}

/// Handler for POST /time/break/end.
async fn break_end_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockActionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;
    let brk = state.tracking().end_break(&request.employee_id, now())?;
    Ok(Json(brk))
}

/// Handler for POST /time/manual/clock-in.
async fn manual_clock_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<ManualClockInRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        actor_id = %request.actor_id,
        "Processing manual clock-in"
    );

    let entry = state.tracking().manual_clock_in(
        &request.employee_id,
        request.timestamp,
        &request.actor_id,
        request.notes,
        now(),
    )?;
    Ok(Json(entry))
}

/// Handler for POST /time/manual/clock-out.
async fn manual_clock_out_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ManualClockOutRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;
    let tenant = tenant_from(&headers);

    let entry = state.tracking().manual_clock_out(
        &tenant,
        &request.employee_id,
        request.timestamp,
        &request.actor_id,
    )?;
    Ok(Json(entry))
}

/// Handler for PATCH /time/entries/{entry_id}.
async fn update_entry_handler(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
    payload: Result<Json<EntryPatchRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;
    let actor_id = request.actor_id.clone();
    info!(
        correlation_id = %correlation_id,
        entry_id = %entry_id,
        actor_id = %actor_id,
        "Processing entry update"
    );

    let entry = state
        .tracking()
        .update_entry(entry_id, request.into(), &actor_id, now())?;
    Ok(Json(entry))
}

/// Handler for DELETE /time/entries/{entry_id}.
async fn delete_entry_handler(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
    Query(query): Query<ActorQuery>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    state.tracking().delete_entry(entry_id, &query.actor_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for PUT /time/entries/{entry_id}/breaks.
async fn replace_breaks_handler(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
    payload: Result<Json<ReplaceBreaksRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;

    let (entry, breaks) = state.tracking().replace_breaks(
        entry_id,
        request.breaks.into_iter().map(Into::into).collect(),
        &request.actor_id,
        now(),
    )?;
    Ok(Json(serde_json::json!({ "entry": entry, "breaks": breaks })))
}

/// Handler for GET /time/status/{employee_id}.
async fn status_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let status = state.tracking().status(&employee_id, now())?;
    Ok(Json(status))
}

/// Handler for GET /time/history/{employee_id}.
async fn history_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(range): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let entries = state
        .tracking()
        .history(&employee_id, range.from, range.to)?;
    Ok(Json(entries))
}

/// Handler for GET /compliance/break-check/{employee_id}.
async fn break_check_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let tenant = tenant_from(&headers);
    let eligibility = state
        .tracking()
        .break_end_eligibility(&tenant, &employee_id, now())?;
    Ok(Json(eligibility))
}

/// Handler for GET /compliance/clock-out-check/{employee_id}.
async fn clock_out_check_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let tenant = tenant_from(&headers);
    let findings = state
        .tracking()
        .clock_out_check(&tenant, &employee_id, now())?;
    Ok(Json(findings))
}

/// Handler for GET /compliance/alerts/active/{employee_id}.
async fn alerts_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let alerts = state.compliance().active_alerts(&employee_id)?;
    Ok(Json(alerts))
}

/// Handler for POST /compliance/alerts/refresh/{employee_id}.
async fn alert_refresh_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let tenant = tenant_from(&headers);
    let created = state.alerts().refresh(&tenant, &employee_id, now())?;
    Ok(Json(created))
}

/// Handler for POST /compliance/alerts/dismiss/{alert_id}.
async fn alert_dismiss_handler(
    State(state): State<AppState>,
    Path(alert_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let alert = state.compliance().dismiss_alert(alert_id)?;
    Ok(Json(alert))
}

/// Handler for GET /compliance/violations/{employee_id}.
async fn violations_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(range): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let violations = state
        .compliance()
        .list_violations(&employee_id, range.from, range.to)?;
    Ok(Json(violations))
}

/// Handler for POST /compliance/violations/acknowledge/{violation_id}.
async fn violation_ack_handler(
    State(state): State<AppState>,
    Path(violation_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let violation = state.compliance().acknowledge_violation(violation_id)?;
    Ok(Json(violation))
}

/// Handler for GET /compliance/settings.
async fn settings_get_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let tenant = tenant_from(&headers);
    let settings = state.settings().get(&tenant)?;
    Ok(Json(settings))
}

/// Handler for PUT /compliance/settings.
async fn settings_put_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SettingsUpdateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;
    let tenant = tenant_from(&headers);
    info!(
        correlation_id = %correlation_id,
        tenant = %tenant,
        "Processing settings update"
    );

    let stored = state.settings().update(&tenant, request.into())?;
    Ok(Json(stored))
}

/// Handler for POST /shifts/validate.
async fn shift_validate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ShiftValidationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;
    let tenant = tenant_from(&headers);
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        "Validating proposed shift"
    );

    let validation = state.shift_validator().validate(
        &tenant,
        &request.employee_id,
        request.start_time,
        request.end_time,
    )?;
    Ok(Json(validation))
}
