use super::*;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

fn john() -> NewEmployee {
    NewEmployee {
        first_name: "John".into(),
        last_name: "Doe".into(),
        phone: "9876543210".into(),
        email: "john@x.com".into(),
        date_of_joining: "2024-01-01".into(),
        dob: "1990-01-01".into(),
    }
}

type Captured = Arc<Mutex<Vec<Value>>>;

/// Start a fake employee backend that answers every POST with `status`/`body`.
async fn spawn_backend(status: StatusCode, body: &'static str) -> (String, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route(
            "/api/employees",
            post(move |State(seen): State<Captured>, axum::Json(payload): axum::Json<Value>| async move {
                seen.lock().expect("capture mutex should lock").push(payload);
                (status, body)
            }),
        )
        .with_state(captured.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), captured)
}

// =============================================================================
// parse_reply
// =============================================================================

#[test]
fn parse_success_extracts_password() {
    let reply = parse_reply(201, r#"{"password":"abc123","id":7}"#).unwrap();
    assert_eq!(reply, CreateEmployeeReply::Created { password: "abc123".into() });
}

#[test]
fn parse_success_without_password_errors() {
    let err = parse_reply(200, r#"{"id":7}"#).unwrap_err();
    assert!(matches!(err, EmployeeApiError::Parse { status: 200, .. }));
}

#[test]
fn parse_rejection_carries_message() {
    let reply = parse_reply(409, r#"{"message":"Email already exists"}"#).unwrap();
    assert_eq!(
        reply,
        CreateEmployeeReply::Rejected { status: 409, message: Some("Email already exists".into()) }
    );
}

#[test]
fn parse_rejection_empty_message_is_none() {
    let reply = parse_reply(400, r#"{"message":""}"#).unwrap();
    assert_eq!(reply, CreateEmployeeReply::Rejected { status: 400, message: None });
}

#[test]
fn parse_rejection_non_string_message_is_none() {
    let reply = parse_reply(500, r#"{"message":{"code":1}}"#).unwrap();
    assert_eq!(reply, CreateEmployeeReply::Rejected { status: 500, message: None });
}

#[test]
fn parse_non_json_body_errors_for_any_status() {
    assert!(matches!(parse_reply(200, "ok"), Err(EmployeeApiError::Parse { .. })));
    assert!(matches!(parse_reply(502, "<html>Bad Gateway</html>"), Err(EmployeeApiError::Parse { .. })));
}

// =============================================================================
// wire format
// =============================================================================

#[test]
fn new_employee_serializes_camel_case_keys() {
    let json = serde_json::to_value(john()).unwrap();
    assert_eq!(
        json,
        json!({
            "firstName": "John",
            "lastName": "Doe",
            "phone": "9876543210",
            "email": "john@x.com",
            "dateOfJoining": "2024-01-01",
            "dob": "1990-01-01",
        })
    );
}

#[test]
fn full_name_joins_first_and_last() {
    assert_eq!(john().full_name(), "John Doe");
}

#[test]
fn endpoint_appends_path_once() {
    let api = HttpEmployeeApi::new("http://hr.local/", ApiTimeouts::default()).unwrap();
    assert_eq!(api.endpoint(), "http://hr.local/api/employees");
}

// =============================================================================
// live HTTP
// =============================================================================

#[tokio::test]
async fn create_employee_posts_json_and_reads_password() {
    let (base, captured) = spawn_backend(StatusCode::CREATED, r#"{"password":"abc123"}"#).await;
    let api = HttpEmployeeApi::new(&base, ApiTimeouts::default()).unwrap();

    let reply = api.create_employee(&john()).await.unwrap();
    assert_eq!(reply, CreateEmployeeReply::Created { password: "abc123".into() });

    let seen = captured.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["firstName"], "John");
    assert_eq!(seen[0]["dob"], "1990-01-01");
}

#[tokio::test]
async fn create_employee_maps_conflict_to_rejected() {
    let (base, _) = spawn_backend(StatusCode::CONFLICT, r#"{"message":"Email already exists"}"#).await;
    let api = HttpEmployeeApi::new(&base, ApiTimeouts::default()).unwrap();

    let reply = api.create_employee(&john()).await.unwrap();
    assert_eq!(
        reply,
        CreateEmployeeReply::Rejected { status: 409, message: Some("Email already exists".into()) }
    );
}

#[tokio::test]
async fn create_employee_connection_refused_is_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpEmployeeApi::new(&format!("http://{addr}"), ApiTimeouts { request_secs: 2, connect_secs: 1 }).unwrap();
    let err = api.create_employee(&john()).await.unwrap_err();
    assert!(matches!(err, EmployeeApiError::Request(_)));
}
