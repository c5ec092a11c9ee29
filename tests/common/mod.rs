#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use clinic_api::database::MemoryRepository;
use clinic_api::{app, AppState};

/// Router over a fresh in-memory store, so every test starts empty
pub fn test_app() -> Router {
    app(AppState::new(MemoryRepository::new()))
}

/// Send one request through the router and decode the JSON reply.
/// An empty reply decodes as `Value::Null`.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let payload = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .with_context(|| format!("non-JSON reply: {}", String::from_utf8_lossy(&bytes)))?
    };
    Ok((status, payload))
}

pub async fn get(app: &Router, uri: &str) -> Result<(StatusCode, Value)> {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
    send(app, Method::PUT, uri, body).await
}

pub fn schedule_body(name: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{} consultations", name),
        "abbreviation": "GEN",
    })
}

pub fn practitioner_body(schedule: i64, firstname: &str) -> Value {
    json!({
        "schedule": schedule,
        "firstname": firstname,
        "lastname": "Quispe",
        "gender": true,
        "email": format!("{}@clinic.pe", firstname.to_lowercase()),
        "phonenumber": "+51 987 654 321",
    })
}

/// Create a schedule and return its id
pub async fn create_schedule(app: &Router, name: &str) -> Result<i64> {
    let (status, body) = post(app, "/schedules", schedule_body(name)).await?;
    anyhow::ensure!(status == StatusCode::CREATED, "schedule create failed: {}", body);
    body["practitioner"]["id"].as_i64().context("schedule id missing")
}

/// Create a practitioner on `schedule` and return its id
pub async fn create_practitioner(app: &Router, schedule: i64, firstname: &str) -> Result<i64> {
    let (status, body) = post(app, "/practitioners", practitioner_body(schedule, firstname)).await?;
    anyhow::ensure!(status == StatusCode::CREATED, "practitioner create failed: {}", body);
    body["practitioner"]["id"].as_i64().context("practitioner id missing")
}
