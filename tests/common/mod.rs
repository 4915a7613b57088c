#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use autos_manager::{create_app_router, AppState};

/// Router completo sobre un store en memoria vacío
pub fn build_test_app() -> Router {
    create_app_router(AppState::in_memory())
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_with_cookie(app: &Router, uri: &str, cookie: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn send_json(app: &Router, method: Method, uri: &str, body: &Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Payload válido para crear un auto
pub fn auto_payload(first_name: &str, email: &str, department: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": "Pérez",
        "brand": "Nissan",
        "model": "Sentra",
        "color": "Negro",
        "purchaseDate": "2020-01-15",
        "email": email,
        "assignmentDate": "2020-01-15",
        "cost": "50000.00",
        "department": department,
        "tenureYears": 1
    })
}

/// Crea un auto por la API REST y devuelve el JSON de respuesta
pub async fn create_auto(app: &Router, first_name: &str, email: &str, department: &str) -> Value {
    let response = send_json(
        app,
        Method::POST,
        "/api/automoviles",
        &auto_payload(first_name, email, department),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
