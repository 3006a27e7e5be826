//! Integration tests for the PediCare HTTP API.
//!
//! Uses axum-test to drive the router in memory.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::StatusCode;
use axum_test::TestServer;
use pedicare::api::create_router;
use pedicare::config::ServerConfig;
use pedicare_core::{
    Appointment, BmiCategory, GrowthResult, TriageLevel, TriageResult, VaccinationSummary,
};
use serde_json::{Value, json};
use std::num::NonZeroU32;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a test server with a rate limit high enough to never trigger.
fn create_server() -> TestServer {
    let config = ServerConfig {
        rate_limit_per_second: NonZeroU32::new(10_000).unwrap(),
        ..ServerConfig::default()
    };
    TestServer::new(create_router(&config).unwrap()).unwrap()
}

// =============================================================================
// HEALTH
// =============================================================================

#[tokio::test]
async fn test_health() {
    let server = create_server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

// =============================================================================
// TRIAGE
// =============================================================================

#[tokio::test]
async fn test_triage_urgent() {
    let server = create_server();

    let response = server
        .post("/triage")
        .json(&json!({ "fever": "very-high" }))
        .await;
    response.assert_status_ok();
    let result: TriageResult = response.json();
    assert_eq!(result.level, TriageLevel::Urgent);
    assert_eq!(result.action_label, "Visit Emergency Room or Call Ambulance");
}

#[tokio::test]
async fn test_triage_serializes_level_and_flow() {
    let server = create_server();

    let body: Value = server
        .post("/triage")
        .json(&json!({ "symptoms": ["Difficulty breathing"], "severity": 2 }))
        .await
        .json();
    assert_eq!(body["level"], "moderate");
    assert_eq!(body["care_flow"], "booking");
}

#[tokio::test]
async fn test_triage_empty_body_is_mild() {
    let server = create_server();

    let result: TriageResult = server.post("/triage").json(&json!({})).await.json();
    assert_eq!(result.level, TriageLevel::Mild);
}

#[tokio::test]
async fn test_triage_rejects_out_of_range_severity() {
    let server = create_server();

    let response = server
        .post("/triage")
        .json(&json!({ "severity": 7 }))
        .await;
    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn test_triage_answers_are_lenient() {
    let server = create_server();

    let result: TriageResult = server
        .post("/triage/answers")
        .json(&json!({
            "temperature": "mild",
            "symptoms": "Cough, Runny nose",
            "severity": "not a number",
            "behavior": "something else",
        }))
        .await
        .json();
    assert_eq!(result.level, TriageLevel::Mild);
}

#[tokio::test]
async fn test_triage_answers_severity_four_is_urgent() {
    let server = create_server();

    let result: TriageResult = server
        .post("/triage/answers")
        .json(&json!({ "severity": "4" }))
        .await
        .json();
    assert_eq!(result.level, TriageLevel::Urgent);
}

#[tokio::test]
async fn test_triage_answers_read_leading_digits() {
    let server = create_server();

    for (raw, expected) in [
        ("4.0", TriageLevel::Urgent),
        ("3.5", TriageLevel::Moderate),
        ("5/5", TriageLevel::Urgent),
    ] {
        let result: TriageResult = server
            .post("/triage/answers")
            .json(&json!({ "severity": raw }))
            .await
            .json();
        assert_eq!(result.level, expected, "severity {raw}");
    }
}

// =============================================================================
// GROWTH
// =============================================================================

#[tokio::test]
async fn test_growth_accepts_numbers_and_text() {
    let server = create_server();

    let response = server
        .post("/growth")
        .json(&json!({ "weight": 22, "height": "110", "age": 5, "sex": "Female" }))
        .await;
    response.assert_status_ok();
    let result: GrowthResult = response.json();
    assert_eq!(result.bmi, 18.18);
    assert_eq!(result.category, BmiCategory::Healthy);
}

#[tokio::test]
async fn test_growth_validation_error() {
    let server = create_server();

    let response = server
        .post("/growth")
        .json(&json!({ "weight": 22, "height": "", "age": 5, "sex": "male" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Please fill in all fields.");
}

#[tokio::test]
async fn test_growth_overflowing_bmi_is_client_error() {
    let server = create_server();

    let response = server
        .post("/growth")
        .json(&json!({ "weight": 1e300, "height": 1e-300, "age": 5, "sex": "male" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Please fill in all fields.");
}

// =============================================================================
// VACCINATIONS
// =============================================================================

#[tokio::test]
async fn test_vaccination_summary() {
    let server = create_server();

    let summary: VaccinationSummary = server
        .post("/vaccinations/summary")
        .json(&json!({
            "child": { "id": "c1", "name": "Emma" },
            "vaccines": [
                { "id": "1", "name": "MMR", "status": "completed" },
                { "id": "2", "name": "DTaP", "status": "overdue", "due_date": "2024-07-20" },
            ]
        }))
        .await
        .json();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.overdue, 1);
    assert_eq!(summary.completion_percent, 50);
}

// =============================================================================
// EMERGENCY
// =============================================================================

#[tokio::test]
async fn test_emergency_timeline() {
    let server = create_server();

    let body: Value = server.get("/emergency/timeline").await.json();
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["offset_ms"], 0);
    assert_eq!(entries[2]["offset_ms"], 8_000);
    assert_eq!(entries[2]["eta_minutes"], 2);
}

#[tokio::test]
async fn test_emergency_types() {
    let server = create_server();

    let body: Value = server.get("/emergency/types").await.json();
    assert_eq!(body.as_array().unwrap().len(), 6);
}

// =============================================================================
// BOOKING
// =============================================================================

#[tokio::test]
async fn test_doctors_directory() {
    let server = create_server();

    let body: Value = server.get("/doctors").await.json();
    assert_eq!(body["doctors"].as_array().unwrap().len(), 3);
    assert_eq!(body["time_slots"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_appointment_confirmed() {
    let server = create_server();

    let response = server
        .post("/appointments")
        .json(&json!({ "doctor_id": "3", "date": "2024-09-02", "time_slot": "02:00 PM" }))
        .await;
    response.assert_status_ok();
    let appointment: Appointment = response.json();
    assert_eq!(appointment.doctor_name, "Dr. Anita Mehta");
}

#[tokio::test]
async fn test_appointment_missing_slot() {
    let server = create_server();

    let response = server
        .post("/appointments")
        .json(&json!({ "doctor_id": "3", "date": "2024-09-02" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Please select a doctor, date, and time slot.");
}

// =============================================================================
// HOSPITALS
// =============================================================================

#[tokio::test]
async fn test_hospitals_lists_directory() {
    let server = create_server();

    let response = server.get("/hospitals").await;
    response.assert_status_ok();
    let body: Value = response.json();
    let hospitals = body.as_array().unwrap();
    assert_eq!(hospitals.len(), 5);
    assert_eq!(hospitals[0]["name"], "Manipal Hospital Mysore");
    assert_eq!(hospitals[2]["emergency"], false);
}

#[tokio::test]
async fn test_hospitals_query_ignores_case() {
    let server = create_server();

    let body: Value = server.get("/hospitals").add_query_param("q", "MYSORE").await.json();
    let hospitals = body.as_array().unwrap();
    assert_eq!(hospitals.len(), 1);
    assert_eq!(hospitals[0]["id"], "1");
}

#[tokio::test]
async fn test_hospitals_blank_and_unmatched_queries() {
    let server = create_server();

    let body: Value = server.get("/hospitals?q=").await.json();
    assert_eq!(body.as_array().unwrap().len(), 5);

    let body: Value = server.get("/hospitals?q=chennai").await.json();
    assert!(body.as_array().unwrap().is_empty());
}

// =============================================================================
// RATE LIMITING
// =============================================================================

#[tokio::test]
async fn test_rate_limit_rejects_burst() {
    let config = ServerConfig {
        rate_limit_per_second: NonZeroU32::new(1).unwrap(),
        ..ServerConfig::default()
    };
    let server = TestServer::new(create_router(&config).unwrap()).unwrap();

    server.get("/health").await.assert_status_ok();
    let response = server.get("/health").await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_invalid_cors_origin_is_config_error() {
    let config = ServerConfig {
        cors_origins: vec!["bad\norigin".to_string()],
        ..ServerConfig::default()
    };
    assert!(create_router(&config).is_err());
}
