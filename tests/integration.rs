//! End-to-end tests for the Time-Tracking & Compliance Engine.
//!
//! HTTP-level tests drive the axum router with `tower::ServiceExt::oneshot`;
//! the numeric scenarios use the service layer with fixed timestamps so
//! durations are deterministic.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use proptest::prelude::*;
use tower::ServiceExt;
use uuid::Uuid;

use timeclock_engine::api::{ApiError, AppState, create_router};
use timeclock_engine::compliance::{AlertRecorder, ShiftRule, ShiftValidator};
use timeclock_engine::config::{ComplianceSettings, InMemorySettingsStore, SettingsStore};
use timeclock_engine::error::EngineError;
use timeclock_engine::events::TracingEventSink;
use timeclock_engine::models::{
    AlertType, ClockState, EmployeeTimeStatus, ShiftAssignment, TimeEntry, ViolationType,
};
use timeclock_engine::store::{
    ClockStore, ComplianceStore, InMemoryClockStore, InMemoryComplianceStore, InMemoryShiftStore,
    ShiftStore,
};
use timeclock_engine::tracking::TimeTrackingService;

const TENANT: &str = "default";

struct TestEnv {
    router: Router,
    clock: Arc<InMemoryClockStore>,
    shifts: Arc<InMemoryShiftStore>,
    compliance: Arc<InMemoryComplianceStore>,
}

fn test_env() -> TestEnv {
    let clock = Arc::new(InMemoryClockStore::new());
    clock.register_employee("emp_001");
    clock.register_employee("emp_002");
    let shifts = Arc::new(InMemoryShiftStore::new());
    let compliance = Arc::new(InMemoryComplianceStore::new());
    let state = AppState::new(
        clock.clone(),
        shifts.clone(),
        compliance.clone(),
        Arc::new(InMemorySettingsStore::default()),
        Arc::new(TracingEventSink),
    );
    TestEnv {
        router: create_router(state),
        clock,
        shifts,
        compliance,
    }
}

fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
        .unwrap()
}

fn make_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

fn post_json(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get_req(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_of<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ==============================================================================
// HTTP lifecycle: clock-in -> break -> clock-out -> status
// ==============================================================================

#[tokio::test]
async fn test_full_clock_lifecycle_over_http() {
    let env = test_env();

    let response = env
        .router
        .clone()
        .oneshot(post_json(
            "/time/clock-in",
            r#"{"employee_id": "emp_001"}"#.to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let entry: TimeEntry = body_of(response).await;
    assert!(entry.is_open());

    let response = env
        .router
        .clone()
        .oneshot(post_json(
            "/time/break/start",
            r#"{"employee_id": "emp_001"}"#.to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = env
        .router
        .clone()
        .oneshot(get_req("/time/status/emp_001"))
        .await
        .unwrap();
    let status: EmployeeTimeStatus = body_of(response).await;
    assert_eq!(status.status, ClockState::OnBreak);
    assert!(status.active_break.is_some());

    // Clock out with the break still open: the break is force-closed.
    let response = env
        .router
        .clone()
        .oneshot(post_json(
            "/time/clock-out",
            r#"{"employee_id": "emp_001"}"#.to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let entry: TimeEntry = body_of(response).await;
    assert!(!entry.is_open());

    let response = env
        .router
        .clone()
        .oneshot(get_req("/time/status/emp_001"))
        .await
        .unwrap();
    let status: EmployeeTimeStatus = body_of(response).await;
    assert_eq!(status.status, ClockState::ClockedOut);
    assert!(status.active_entry.is_none());
}

#[tokio::test]
async fn test_wrong_state_transitions_return_409() {
    let env = test_env();

    for (uri, expected_code) in [
        ("/time/clock-out", "NOT_CLOCKED_IN"),
        ("/time/break/start", "NOT_CLOCKED_IN"),
        ("/time/break/end", "NOT_CLOCKED_IN"),
    ] {
        let response = env
            .router
            .clone()
            .oneshot(post_json(uri, r#"{"employee_id": "emp_001"}"#.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT, "uri: {}", uri);
        let error: ApiError = body_of(response).await;
        assert_eq!(error.code, expected_code, "uri: {}", uri);
    }

    // Clocked in but not on break.
    env.router
        .clone()
        .oneshot(post_json(
            "/time/clock-in",
            r#"{"employee_id": "emp_001"}"#.to_string(),
        ))
        .await
        .unwrap();
    let response = env
        .router
        .clone()
        .oneshot(post_json(
            "/time/break/end",
            r#"{"employee_id": "emp_001"}"#.to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error: ApiError = body_of(response).await;
    assert_eq!(error.code, "NOT_ON_BREAK");
}

#[tokio::test]
async fn test_employees_are_tracked_independently() {
    let env = test_env();

    for employee in ["emp_001", "emp_002"] {
        let response = env
            .router
            .clone()
            .oneshot(post_json(
                "/time/clock-in",
                format!(r#"{{"employee_id": "{}"}}"#, employee),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = env
        .router
        .clone()
        .oneshot(post_json(
            "/time/clock-out",
            r#"{"employee_id": "emp_002"}"#.to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = env
        .router
        .clone()
        .oneshot(get_req("/time/status/emp_001"))
        .await
        .unwrap();
    let status: EmployeeTimeStatus = body_of(response).await;
    assert_eq!(status.status, ClockState::ClockedIn);
}

// ==============================================================================
// Manual corrections and the three-way patch over HTTP
// ==============================================================================

#[tokio::test]
async fn test_manual_entry_and_three_way_patch() {
    let env = test_env();

    // Backdated manual session: 08:00 - 16:00 with no breaks.
    let response = env
        .router
        .clone()
        .oneshot(post_json(
            "/time/manual/clock-in",
            r#"{
                "employee_id": "emp_001",
                "timestamp": "2026-03-02T08:00:00",
                "actor_id": "mgr_001",
                "notes": "terminal was down"
            }"#
            .to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let entry: TimeEntry = body_of(response).await;
    assert!(entry.is_manual_entry);

    let response = env
        .router
        .clone()
        .oneshot(post_json(
            "/time/manual/clock-out",
            r#"{
                "employee_id": "emp_001",
                "timestamp": "2026-03-02T16:00:00",
                "actor_id": "mgr_001"
            }"#
            .to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let entry: TimeEntry = body_of(response).await;
    assert_eq!(entry.total_work_minutes, 480);

    let patch = |body: &str| {
        Request::builder()
            .method("PATCH")
            .uri(format!("/time/entries/{}", entry.id))
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    };

    // Omitted clock_out: nothing changes.
    let response = env
        .router
        .clone()
        .oneshot(patch(r#"{"actor_id": "mgr_001", "notes": "checked"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: TimeEntry = body_of(response).await;
    assert_eq!(updated.clock_out, entry.clock_out);
    assert_eq!(updated.total_work_minutes, 480);

    // Explicit null: the session reopens and the totals zero out.
    let response = env
        .router
        .clone()
        .oneshot(patch(r#"{"actor_id": "mgr_001", "clock_out": null}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: TimeEntry = body_of(response).await;
    assert!(updated.is_open());
    assert_eq!(updated.total_work_minutes, 0);
    assert_eq!(updated.total_break_minutes, 0);

    // A concrete value: closed again with recomputed totals.
    let response = env
        .router
        .clone()
        .oneshot(patch(
            r#"{"actor_id": "mgr_001", "clock_out": "2026-03-02T17:30:00"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: TimeEntry = body_of(response).await;
    assert_eq!(updated.total_work_minutes, 570);
}

#[tokio::test]
async fn test_manual_clock_in_rejects_future_timestamp() {
    let env = test_env();

    let response = env
        .router
        .clone()
        .oneshot(post_json(
            "/time/manual/clock-in",
            r#"{
                "employee_id": "emp_001",
                "timestamp": "2099-01-01T08:00:00",
                "actor_id": "mgr_001"
            }"#
            .to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ApiError = body_of(response).await;
    assert_eq!(error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_replace_breaks_recomputes_over_http() {
    let env = test_env();

    env.router
        .clone()
        .oneshot(post_json(
            "/time/manual/clock-in",
            r#"{
                "employee_id": "emp_001",
                "timestamp": "2026-03-02T08:00:00",
                "actor_id": "mgr_001"
            }"#
            .to_string(),
        ))
        .await
        .unwrap();
    let response = env
        .router
        .clone()
        .oneshot(post_json(
            "/time/manual/clock-out",
            r#"{
                "employee_id": "emp_001",
                "timestamp": "2026-03-02T17:00:00",
                "actor_id": "mgr_001"
            }"#
            .to_string(),
        ))
        .await
        .unwrap();
    let entry: TimeEntry = body_of(response).await;

    let response = env
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/time/entries/{}/breaks", entry.id))
                .header("Content-Type", "application/json")
                .body(Body::from(
                    r#"{
                        "actor_id": "mgr_001",
                        "breaks": [
                            {"start_time": "2026-03-02T12:00:00", "end_time": "2026-03-02T12:30:00"},
                            {"start_time": "2026-03-02T15:00:00", "end_time": "2026-03-02T15:15:00"}
                        ]
                    }"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let value: serde_json::Value = body_of(response).await;
    assert_eq!(value["breaks"].as_array().unwrap().len(), 2);
    assert_eq!(value["entry"]["total_break_minutes"], 45);
    assert_eq!(value["entry"]["total_work_minutes"], 495);
}

// ==============================================================================
// Violations recorded on clock-out, queryable and acknowledgeable
// ==============================================================================

#[tokio::test]
async fn test_breakless_long_session_records_violations() {
    let env = test_env();

    env.router
        .clone()
        .oneshot(post_json(
            "/time/manual/clock-in",
            r#"{
                "employee_id": "emp_001",
                "timestamp": "2026-03-02T08:00:00",
                "actor_id": "mgr_001"
            }"#
            .to_string(),
        ))
        .await
        .unwrap();
    // 6h40 of work with no break.
    env.router
        .clone()
        .oneshot(post_json(
            "/time/manual/clock-out",
            r#"{
                "employee_id": "emp_001",
                "timestamp": "2026-03-02T14:40:00",
                "actor_id": "mgr_001"
            }"#
            .to_string(),
        ))
        .await
        .unwrap();

    let response = env
        .router
        .clone()
        .oneshot(get_req(
            "/compliance/violations/emp_001?from=2026-03-02&to=2026-03-02",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let violations: Vec<timeclock_engine::models::ComplianceViolation> = body_of(response).await;
    let types: Vec<ViolationType> = violations.iter().map(|v| v.violation_type).collect();
    assert!(types.contains(&ViolationType::InsufficientBreak));
    assert!(types.contains(&ViolationType::MissingBreak));

    // Acknowledge the first one.
    let response = env
        .router
        .clone()
        .oneshot(post_json(
            &format!("/compliance/violations/acknowledge/{}", violations[0].id),
            String::new(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = env
        .router
        .clone()
        .oneshot(post_json(
            &format!("/compliance/violations/acknowledge/{}", Uuid::new_v4()),
            String::new(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ==============================================================================
// Shift validation over HTTP
// ==============================================================================

#[tokio::test]
async fn test_shift_validation_rest_period_over_http() {
    let env = test_env();

    env.shifts
        .create_shift(ShiftAssignment {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            shift_date: make_date("2026-03-02"),
            start_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
        })
        .unwrap();

    // 06:00 next morning: 8 hours of rest against an 11-hour floor.
    let response = env
        .router
        .clone()
        .oneshot(post_json(
            "/shifts/validate",
            r#"{
                "employee_id": "emp_001",
                "start_time": "2026-03-03T06:00:00",
                "end_time": "2026-03-03T14:00:00"
            }"#
            .to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let validation: timeclock_engine::compliance::ShiftValidation = body_of(response).await;
    assert!(!validation.valid);
    assert_eq!(validation.errors[0].rule, ShiftRule::RestPeriod);

    // 10 hours of rest is still below the 11-hour floor.
    let response = env
        .router
        .clone()
        .oneshot(post_json(
            "/shifts/validate",
            r#"{
                "employee_id": "emp_001",
                "start_time": "2026-03-03T08:00:00",
                "end_time": "2026-03-03T16:00:00"
            }"#
            .to_string(),
        ))
        .await
        .unwrap();
    let validation: timeclock_engine::compliance::ShiftValidation = body_of(response).await;
    assert!(!validation.valid);
}

// ==============================================================================
// Alerts: refresh, dedup, dismiss (service level, fixed clock)
// ==============================================================================

#[test]
fn test_alert_refresh_and_dismiss_flow() {
    let env = test_env();
    let recorder = AlertRecorder::new(
        env.clock.clone(),
        env.compliance.clone(),
        Arc::new(InMemorySettingsStore::default()),
    );

    env.clock
        .create_entry(TimeEntry::open(
            "emp_001",
            make_datetime("2026-03-02", "06:00:00"),
        ))
        .unwrap();

    // Six breakless hours: the no-break alert fires.
    let created = recorder
        .refresh(TENANT, "emp_001", make_datetime("2026-03-02", "12:00:00"))
        .unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].alert_type, AlertType::NoBreakTaken);

    // A later refresh replaces it rather than stacking a second one.
    recorder
        .refresh(TENANT, "emp_001", make_datetime("2026-03-02", "13:00:00"))
        .unwrap();
    let active = env.compliance.active_alerts("emp_001").unwrap();
    assert_eq!(active.len(), 1);

    // Past the daily maximum the critical alert joins in.
    recorder
        .refresh(TENANT, "emp_001", make_datetime("2026-03-02", "16:30:00"))
        .unwrap();
    let active = env.compliance.active_alerts("emp_001").unwrap();
    let types: Vec<AlertType> = active.iter().map(|a| a.alert_type).collect();
    assert!(types.contains(&AlertType::NoBreakTaken));
    assert!(types.contains(&AlertType::MaxHoursExceeded));

    // Dismissed alerts drop out of the active set.
    let dismissed = env.compliance.dismiss_alert(active[0].id).unwrap();
    assert!(!dismissed.is_active);
    assert_eq!(env.compliance.active_alerts("emp_001").unwrap().len(), 1);
}

// ==============================================================================
// Spec scenarios at the service level with fixed timestamps
// ==============================================================================

fn service_env() -> (TimeTrackingService, Arc<InMemoryComplianceStore>) {
    let clock = Arc::new(InMemoryClockStore::new());
    clock.register_employee("emp_001");
    let compliance = Arc::new(InMemoryComplianceStore::new());
    let service = TimeTrackingService::new(
        clock,
        compliance.clone(),
        Arc::new(InMemorySettingsStore::default()),
        Arc::new(TracingEventSink),
    );
    (service, compliance)
}

#[test]
fn test_break_end_eligibility_scenario() {
    let (service, _) = service_env();

    service
        .clock_in("emp_001", make_datetime("2026-03-02", "08:00:00"))
        .unwrap();
    service
        .start_break("emp_001", make_datetime("2026-03-02", "14:30:00"))
        .unwrap();

    // 400 minutes elapsed, 10 of break taken: 20 minutes short of the tier.
    let eligibility = service
        .break_end_eligibility(TENANT, "emp_001", make_datetime("2026-03-02", "14:40:00"))
        .unwrap();
    assert!(!eligibility.allowed);
    assert_eq!(eligibility.required_minutes, 30);
    assert_eq!(eligibility.remaining_minutes, 20);

    // After a full half hour the break may end.
    let eligibility = service
        .break_end_eligibility(TENANT, "emp_001", make_datetime("2026-03-02", "15:00:00"))
        .unwrap();
    assert!(eligibility.allowed);
    service
        .end_break("emp_001", make_datetime("2026-03-02", "15:00:00"))
        .unwrap();
}

#[test]
fn test_clock_out_compliance_scenario_620_40() {
    let (service, compliance) = service_env();

    service
        .clock_in("emp_001", make_datetime("2026-03-02", "07:00:00"))
        .unwrap();
    service
        .start_break("emp_001", make_datetime("2026-03-02", "12:00:00"))
        .unwrap();
    service
        .end_break("emp_001", make_datetime("2026-03-02", "12:40:00"))
        .unwrap();
    // 07:00 -> 18:00 gross = 660, minus 40 break = 620 net.
    let entry = service
        .clock_out(TENANT, "emp_001", make_datetime("2026-03-02", "18:00:00"))
        .unwrap();
    assert_eq!(entry.total_work_minutes, 620);
    assert_eq!(entry.total_break_minutes, 40);

    let violations = compliance
        .list_violations("emp_001", make_date("2026-03-02"), make_date("2026-03-02"))
        .unwrap();
    let types: Vec<ViolationType> = violations.iter().map(|v| v.violation_type).collect();
    // 620 > 600 daily maximum, and 40 < 45 required for the 9h tier.
    assert!(types.contains(&ViolationType::MaxDailyHoursExceeded));
    assert!(types.contains(&ViolationType::InsufficientBreak));
    assert!(!types.contains(&ViolationType::MissingBreak));
}

#[test]
fn test_clock_out_compliance_persists_short_segments() {
    let (service, compliance) = service_env();

    service
        .clock_in("emp_001", make_datetime("2026-03-02", "08:00:00"))
        .unwrap();
    service
        .start_break("emp_001", make_datetime("2026-03-02", "12:00:00"))
        .unwrap();
    // A 10-minute segment does not count under the 15-minute floor.
    service
        .end_break("emp_001", make_datetime("2026-03-02", "12:10:00"))
        .unwrap();
    service
        .clock_out(TENANT, "emp_001", make_datetime("2026-03-02", "14:00:00"))
        .unwrap();

    let violations = compliance
        .list_violations("emp_001", make_date("2026-03-02"), make_date("2026-03-02"))
        .unwrap();
    let types: Vec<ViolationType> = violations.iter().map(|v| v.violation_type).collect();
    assert!(types.contains(&ViolationType::BreakSegmentTooShort));
}

#[test]
fn test_shift_validator_weekly_scenario() {
    let clock = Arc::new(InMemoryClockStore::new());
    clock.register_employee("emp_001");
    let shifts = Arc::new(InMemoryShiftStore::new());
    let validator = ShiftValidator::new(
        clock.clone(),
        shifts.clone(),
        Arc::new(InMemorySettingsStore::default()),
    );

    // Worked Monday and Tuesday 10h net each, scheduled 10h Wed..Fri.
    for day in ["2026-03-02", "2026-03-03"] {
        let mut entry = TimeEntry::open("emp_001", make_datetime(day, "07:00:00"));
        entry.clock_out = Some(make_datetime(day, "17:45:00"));
        entry.recompute_totals(45);
        clock.create_entry(entry).unwrap();
    }
    for day in ["2026-03-04", "2026-03-05", "2026-03-06"] {
        shifts
            .create_shift(ShiftAssignment {
                id: Uuid::new_v4(),
                employee_id: "emp_001".to_string(),
                shift_date: NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap(),
                start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            })
            .unwrap();
    }

    // 1200 worked + 1800 scheduled = 3000 minutes; any further shift in
    // this week breaks the 2880-minute ceiling.
    let result = validator
        .validate(
            TENANT,
            "emp_001",
            make_datetime("2026-03-07", "08:00:00"),
            make_datetime("2026-03-07", "10:00:00"),
        )
        .unwrap();
    assert!(!result.valid);
    assert!(result.errors.iter().any(|e| e.rule == ShiftRule::WeeklyHours));

    // The following Monday starts a fresh week.
    let result = validator
        .validate(
            TENANT,
            "emp_001",
            make_datetime("2026-03-09", "08:00:00"),
            make_datetime("2026-03-09", "16:00:00"),
        )
        .unwrap();
    assert!(result.valid);
}

#[test]
fn test_tenant_settings_tighten_rules() {
    let clock = Arc::new(InMemoryClockStore::new());
    clock.register_employee("emp_001");
    let compliance = Arc::new(InMemoryComplianceStore::new());
    let settings = Arc::new(InMemorySettingsStore::default());
    settings
        .update(
            "strict_tenant",
            ComplianceSettings {
                min_break_6h_minutes: 45,
                min_break_9h_minutes: 60,
                ..ComplianceSettings::default()
            },
        )
        .unwrap();
    let service = TimeTrackingService::new(
        clock,
        compliance,
        settings,
        Arc::new(TracingEventSink),
    );

    service
        .clock_in("emp_001", make_datetime("2026-03-02", "08:00:00"))
        .unwrap();
    service
        .start_break("emp_001", make_datetime("2026-03-02", "14:30:00"))
        .unwrap();

    // 30 minutes of break satisfy the statute but not this tenant.
    let eligibility = service
        .break_end_eligibility(
            "strict_tenant",
            "emp_001",
            make_datetime("2026-03-02", "15:00:00"),
        )
        .unwrap();
    assert!(!eligibility.allowed);
    assert_eq!(eligibility.required_minutes, 45);
}

#[test]
fn test_settings_store_rejects_statutory_relaxation() {
    let settings = InMemorySettingsStore::default();
    let err = settings
        .update(
            TENANT,
            ComplianceSettings {
                min_break_6h_minutes: 20,
                ..ComplianceSettings::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput { .. }));
}

// ==============================================================================
// Property: totals never go negative across random sessions
// ==============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_work_minutes_never_negative(
        session_minutes in 1i64..960,
        break_offset in 0i64..480,
        break_length in 0i64..600,
    ) {
        let (service, _) = service_env();
        let start = make_datetime("2026-03-02", "06:00:00");

        service.clock_in("emp_001", start).unwrap();

        let break_start = start + chrono::Duration::minutes(break_offset.min(session_minutes));
        let break_end = break_start + chrono::Duration::minutes(break_length);
        service.start_break("emp_001", break_start).unwrap();
        service.end_break("emp_001", break_end).unwrap();

        let clock_out_at = start + chrono::Duration::minutes(session_minutes);
        // The break may extend past the intended clock-out; close afterwards.
        let clock_out_at = clock_out_at.max(break_end);
        let entry = service.clock_out(TENANT, "emp_001", clock_out_at).unwrap();

        let gross = (clock_out_at - start).num_minutes();
        prop_assert!(entry.total_work_minutes >= 0);
        prop_assert_eq!(
            entry.total_work_minutes,
            (gross - entry.total_break_minutes).max(0)
        );
    }
}
