use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::dto::auto_dto::{AutoDto, AutoPatch};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auto_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_autos).post(create_auto))
        .route("/:id", get(get_auto).put(update_auto).delete(delete_auto))
        .route("/departamento/:departamento", get(list_autos_by_department))
}

/// Body JSON ilegible o con tipos incorrectos -> 400
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Id no numérico en la ruta -> 400 con el mismo formato JSON
fn path_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    id.map(|Path(id)| id)
        .map_err(|rejection| AppError::BadRequest(format!("Id inválido: {}", rejection.body_text())))
}

async fn list_autos(State(state): State<AppState>) -> Result<Json<Vec<AutoDto>>, AppError> {
    let autos = state.auto_service.list_all().await?;
    Ok(Json(autos))
}

async fn get_auto(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<AutoDto>, AppError> {
    let auto = state.auto_service.get_by_id(path_id(id)?).await?;
    Ok(Json(auto))
}

async fn create_auto(
    State(state): State<AppState>,
    payload: Result<Json<AutoDto>, JsonRejection>,
) -> Result<(StatusCode, Json<AutoDto>), AppError> {
    let request = json_body(payload)?;
    let created = state.auto_service.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_auto(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<AutoPatch>, JsonRejection>,
) -> Result<Json<AutoDto>, AppError> {
    let id = path_id(id)?;
    let patch = json_body(payload)?;
    let updated = state.auto_service.update(id, patch).await?;
    Ok(Json(updated))
}

async fn delete_auto(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    state.auto_service.delete(path_id(id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_autos_by_department(
    State(state): State<AppState>,
    Path(departamento): Path<String>,
) -> Result<Json<Vec<AutoDto>>, AppError> {
    let autos = state.auto_service.list_by_department(&departamento).await?;
    Ok(Json(autos))
}
