mod common;

use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::StatusCode;
use axum::response::Response;
use common::*;

const VALID_FORM: &str = "firstName=Juan&lastName=P%C3%A9rez&brand=Audi&model=Q7&color=Negro\
&purchaseDate=2020-01-15&email=juan%40x.com&assignmentDate=2020-02-01&cost=50000%2C50\
&department=Tecnolog%C3%ADa&tenureYears=5";

fn set_cookie(response: &Response) -> String {
    response
        .headers()
        .get(SET_COOKIE)
        .expect("falta Set-Cookie")
        .to_str()
        .unwrap()
        .to_string()
}

fn assert_redirects_to_list(response: &Response) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/automoviles");
}

#[tokio::test]
async fn test_dashboard_on_empty_store() {
    let app = build_test_app();
    let response = get(&app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<strong id=\"total-automoviles\">0</strong>"));
    assert!(html.contains("<strong id=\"costo-promedio\">0.00</strong>"));
}

#[tokio::test]
async fn test_dashboard_shows_totals_and_brands() {
    let app = build_test_app();
    create_auto(&app, "Juan", "juan@x.com", "Tech").await;
    create_auto(&app, "Ana", "ana@x.com", "Tech").await;

    let html = body_text(get(&app, "/").await).await;
    assert!(html.contains("<strong id=\"total-automoviles\">2</strong>"));
    assert!(html.contains("<strong id=\"costo-promedio\">50000.00</strong>"));
    assert!(html.contains("<tr><td>Nissan</td><td>2</td></tr>"));
}

#[tokio::test]
async fn test_list_page_renders_rows() {
    let app = build_test_app();
    create_auto(&app, "Juan", "juan@x.com", "Tech").await;

    let response = get(&app, "/automoviles").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());

    let html = body_text(response).await;
    assert!(html.contains("juan@x.com"));
    assert!(html.contains("/automoviles/editar/1"));
    assert!(!html.contains("class=\"flash\""));
}

#[tokio::test]
async fn test_list_page_consumes_flash_cookie() {
    let app = build_test_app();
    let response = get_with_cookie(
        &app,
        "/automoviles",
        "flash=Auto%20eliminado%20correctamente%21",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).starts_with("flash=;"));
    assert!(set_cookie(&response).contains("Max-Age=0"));
    let html = body_text(response).await;
    assert!(html.contains("<div class=\"flash\">Auto eliminado correctamente!</div>"));
}

#[tokio::test]
async fn test_new_form_defaults_assignment_date_to_today() {
    let app = build_test_app();
    let response = get(&app, "/automoviles/nuevo").await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    assert!(html.contains(&format!("name=\"assignmentDate\" value=\"{}\"", today)));
    assert!(html.contains("action=\"/automoviles/guardar\""));
}

#[tokio::test]
async fn test_save_redirects_with_flash_and_persists() {
    let app = build_test_app();
    let response = post_form(&app, "/automoviles/guardar", VALID_FORM).await;

    assert_redirects_to_list(&response);
    assert!(set_cookie(&response).starts_with("flash="));

    let saved = body_json(get(&app, "/api/automoviles/1").await).await;
    assert_eq!(saved["firstName"], "Juan");
    assert_eq!(saved["department"], "Tecnología");
    assert_eq!(saved["cost"], "50000.50");
    assert_eq!(saved["tenureYears"], 5);
}

#[tokio::test]
async fn test_save_flow_shows_flash_once() {
    let app = build_test_app();
    let response = post_form(&app, "/automoviles/guardar", VALID_FORM).await;
    let cookie = set_cookie(&response);
    let pair = cookie.split(';').next().unwrap();

    let html = body_text(get_with_cookie(&app, "/automoviles", pair).await).await;
    assert!(html.contains("¡Auto creado correctamente!"));

    let html = body_text(get(&app, "/automoviles").await).await;
    assert!(!html.contains("¡Auto creado correctamente!"));
}

#[tokio::test]
async fn test_save_invalid_form_rerenders_with_errors() {
    let app = build_test_app();
    let response = post_form(
        &app,
        "/automoviles/guardar",
        "firstName=&lastName=P%C3%A9rez&brand=Audi&model=Q7&color=Negro&email=sin-arroba&cost=abc",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = body_text(response).await;
    assert!(html.contains("data-field=\"firstName\""));
    assert!(html.contains("data-field=\"email\""));
    assert!(html.contains("data-field=\"cost\""));
    // Los valores ingresados se conservan
    assert!(html.contains("value=\"sin-arroba\""));

    let list = body_json(get(&app, "/api/automoviles").await).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_save_duplicate_email_rerenders_with_conflict() {
    let app = build_test_app();
    create_auto(&app, "Otro", "juan@x.com", "Ventas").await;

    let response = post_form(&app, "/automoviles/guardar", VALID_FORM).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let html = body_text(response).await;
    assert!(html.contains("juan@x.com"));
    assert!(html.contains("class=\"errors\""));
}

#[tokio::test]
async fn test_edit_form_is_prefilled() {
    let app = build_test_app();
    create_auto(&app, "Juan", "juan@x.com", "Tech").await;

    let response = get(&app, "/automoviles/editar/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("action=\"/automoviles/actualizar/1\""));
    assert!(html.contains("name=\"firstName\" value=\"Juan\""));
    assert!(html.contains("name=\"purchaseDate\" value=\"2020-01-15\""));
}

#[tokio::test]
async fn test_edit_form_unknown_id_shows_error_page() {
    let app = build_test_app();
    let response = get(&app, "/automoviles/editar/77").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("77"));
}

#[tokio::test]
async fn test_update_redirects_and_applies_changes() {
    let app = build_test_app();
    create_auto(&app, "Pedro", "juan@x.com", "Tech").await;

    let response = post_form(&app, "/automoviles/actualizar/1", VALID_FORM).await;
    assert_redirects_to_list(&response);
    assert!(set_cookie(&response).starts_with("flash="));

    let updated = body_json(get(&app, "/api/automoviles/1").await).await;
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["firstName"], "Juan");
    assert_eq!(updated["brand"], "Audi");
}

#[tokio::test]
async fn test_update_clears_emptied_optional_fields() {
    let app = build_test_app();
    create_auto(&app, "Juan", "juan@x.com", "Tech").await;

    let response = post_form(
        &app,
        "/automoviles/actualizar/1",
        "firstName=Juan&lastName=P%C3%A9rez&brand=Nissan&model=Sentra&color=Negro\
&purchaseDate=&email=juan%40x.com&assignmentDate=2020-01-15&cost=&department=&tenureYears=",
    )
    .await;
    assert_redirects_to_list(&response);

    let updated = body_json(get(&app, "/api/automoviles/1").await).await;
    assert!(updated["department"].is_null());
    assert!(updated["cost"].is_null());
    assert!(updated["tenureYears"].is_null());
    assert!(updated["purchaseDate"].is_null());
    assert_eq!(updated["assignmentDate"], "2020-01-15");
    assert_eq!(updated["firstName"], "Juan");
}

#[tokio::test]
async fn test_update_to_email_of_other_auto_rerenders_with_conflict() {
    let app = build_test_app();
    create_auto(&app, "Pedro", "pedro@x.com", "Tech").await;
    create_auto(&app, "Juan", "juan@x.com", "Tech").await;

    let response = post_form(&app, "/automoviles/actualizar/1", VALID_FORM).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let unchanged = body_json(get(&app, "/api/automoviles/1").await).await;
    assert_eq!(unchanged["email"], "pedro@x.com");
}

#[tokio::test]
async fn test_update_with_missing_required_fields_is_rejected() {
    let app = build_test_app();
    create_auto(&app, "Juan", "juan@x.com", "Tech").await;

    let response = post_form(&app, "/automoviles/actualizar/1", "firstName=Juan").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("data-field=\"brand\""));

    let unchanged = body_json(get(&app, "/api/automoviles/1").await).await;
    assert_eq!(unchanged["brand"], "Nissan");
}

#[tokio::test]
async fn test_update_unknown_id_shows_error_page() {
    let app = build_test_app();
    let response = post_form(&app, "/automoviles/actualizar/9", VALID_FORM).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_redirects_and_removes() {
    let app = build_test_app();
    create_auto(&app, "Juan", "juan@x.com", "Tech").await;

    let response = post_form(&app, "/automoviles/eliminar/1", "").await;
    assert_redirects_to_list(&response);
    assert!(set_cookie(&response).starts_with("flash="));

    assert_eq!(
        get(&app, "/api/automoviles/1").await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_delete_unknown_id_shows_error_page() {
    let app = build_test_app();
    let response = post_form(&app, "/automoviles/eliminar/5", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
