//! Vistas web renderizadas en el servidor
//!
//! Flujo clásico de formularios: cada POST redirige a `/automoviles`
//! dejando un mensaje flash en una cookie de corta duración.

use askama::Template;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use http::header::{COOKIE, SET_COOKIE};
use validator::ValidationErrors;

use crate::dto::auto_dto::AutoDto;
use crate::dto::auto_form::AutoForm;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{field_messages, today};

const FLASH_COOKIE: &str = "flash";
const LIST_PATH: &str = "/automoviles";

pub fn create_web_router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/automoviles", get(list_autos))
        .route("/automoviles/nuevo", get(new_auto_form))
        .route("/automoviles/guardar", post(save_auto))
        .route("/automoviles/editar/:id", get(edit_auto_form))
        .route("/automoviles/actualizar/:id", post(update_auto))
        .route("/automoviles/eliminar/:id", post(delete_auto))
}

// Template rendering helper
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => AppError::Internal(format!("Error renderizando plantilla: {}", err))
                .into_response(),
        }
    }
}

// Templates
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    total: usize,
    average_cost: String,
    brands: Vec<(String, usize)>,
}

#[derive(Template)]
#[template(path = "automoviles.html")]
struct AutomovilesTemplate {
    autos: Vec<AutoRow>,
    flash: String,
}

#[derive(Template)]
#[template(path = "form.html")]
struct FormTemplate {
    title: String,
    action: String,
    form: AutoForm,
    errors: Vec<(String, String)>,
    general_error: String,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    status: u16,
    message: String,
}

/// Fila de la tabla de autos, ya formateada para mostrar
struct AutoRow {
    id: i64,
    full_name: String,
    brand: String,
    model: String,
    color: String,
    purchase_date: String,
    email: String,
    assignment_date: String,
    cost: String,
    department: String,
    tenure_years: String,
}

impl From<AutoDto> for AutoRow {
    fn from(dto: AutoDto) -> Self {
        let form = AutoForm::from(&dto);
        Self {
            id: dto.id.unwrap_or_default(),
            full_name: format!("{} {}", form.first_name, form.last_name),
            brand: form.brand,
            model: form.model,
            color: form.color,
            purchase_date: form.purchase_date,
            email: form.email,
            assignment_date: form.assignment_date,
            cost: form.cost,
            department: form.department,
            tenure_years: form.tenure_years,
        }
    }
}

/// Página de error para fallos fuera del formulario (404, 500...)
fn error_page(error: AppError) -> Response {
    let status = error.status_code();
    if status.is_server_error() {
        tracing::error!("❌ Error en vista web: {}", error);
    } else {
        tracing::warn!("⚠️ Error en vista web: {}", error);
    }

    let page = ErrorTemplate {
        status: status.as_u16(),
        message: error.user_message(),
    };
    (status, HtmlTemplate(page)).into_response()
}

fn form_page(
    status: StatusCode,
    title: &str,
    action: String,
    form: AutoForm,
    errors: Option<&ValidationErrors>,
    general_error: String,
) -> Response {
    let errors = errors
        .map(|e| {
            field_messages(e)
                .into_iter()
                .flat_map(|(field, messages)| {
                    messages.into_iter().map(move |message| (field.clone(), message))
                })
                .collect()
        })
        .unwrap_or_default();

    let page = FormTemplate {
        title: title.to_string(),
        action,
        form,
        errors,
        general_error,
    };
    (status, HtmlTemplate(page)).into_response()
}

/// Vuelve a mostrar el formulario si el error es del usuario; si no, página de error
fn form_error(title: &str, action: String, form: AutoForm, error: AppError) -> Response {
    match error {
        AppError::Validation(errors) => {
            form_page(StatusCode::BAD_REQUEST, title, action, form, Some(&errors), String::new())
        }
        AppError::Conflict(message) => {
            form_page(StatusCode::CONFLICT, title, action, form, None, message)
        }
        other => error_page(other),
    }
}

fn flash_cookie(message: &str) -> String {
    format!(
        "{}={}; Path=/; Max-Age=60; HttpOnly; SameSite=Lax",
        FLASH_COOKIE,
        urlencoding::encode(message)
    )
}

fn clear_flash_cookie() -> String {
    format!("{}=; Path=/; Max-Age=0", FLASH_COOKIE)
}

/// Lee el mensaje flash de la cookie de la request
fn read_flash(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix("flash="))
        .filter(|raw| !raw.is_empty())
        .find_map(|raw| urlencoding::decode(raw).ok().map(|m| m.into_owned()))
}

fn redirect_with_flash(message: &str) -> Response {
    (
        [(SET_COOKIE, flash_cookie(message))],
        Redirect::to(LIST_PATH),
    )
        .into_response()
}

/// Página de inicio (Dashboard)
async fn dashboard(State(state): State<AppState>) -> Response {
    match state.auto_service.dashboard().await {
        Ok(stats) => HtmlTemplate(IndexTemplate {
            total: stats.total,
            average_cost: format!("{:.2}", stats.average_cost),
            brands: stats.brands,
        })
        .into_response(),
        Err(e) => error_page(e),
    }
}

/// Lista de automóviles
async fn list_autos(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let autos = match state.auto_service.list_all().await {
        Ok(autos) => autos,
        Err(e) => return error_page(e),
    };

    let flash = read_flash(&headers);
    let page = HtmlTemplate(AutomovilesTemplate {
        autos: autos.into_iter().map(AutoRow::from).collect(),
        flash: flash.clone().unwrap_or_default(),
    });

    match flash {
        Some(_) => ([(SET_COOKIE, clear_flash_cookie())], page).into_response(),
        None => page.into_response(),
    }
}

/// Formulario para nuevo auto
async fn new_auto_form() -> Response {
    form_page(
        StatusCode::OK,
        "Nuevo auto",
        "/automoviles/guardar".to_string(),
        AutoForm::for_new(today()),
        None,
        String::new(),
    )
}

/// Guardar nuevo auto
async fn save_auto(State(state): State<AppState>, Form(form): Form<AutoForm>) -> Response {
    let title = "Nuevo auto";
    let action = "/automoviles/guardar".to_string();

    let dto = match form.to_valid_dto() {
        Ok(dto) => dto,
        Err(errors) => return form_error(title, action, form, AppError::Validation(errors)),
    };

    match state.auto_service.create(dto).await {
        Ok(_) => redirect_with_flash("¡Auto creado correctamente!"),
        Err(e) => form_error(title, action, form, e),
    }
}

/// Formulario para editar auto
async fn edit_auto_form(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.auto_service.get_by_id(id).await {
        Ok(auto) => form_page(
            StatusCode::OK,
            "Editar auto",
            format!("/automoviles/actualizar/{}", id),
            AutoForm::from(&auto),
            None,
            String::new(),
        ),
        Err(e) => error_page(e),
    }
}

/// Actualizar auto existente
async fn update_auto(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<AutoForm>,
) -> Response {
    let title = "Editar auto";
    let action = format!("/automoviles/actualizar/{}", id);

    // El formulario envía el registro completo: un campo vaciado se borra
    let dto = match form.to_valid_dto() {
        Ok(dto) => dto,
        Err(errors) => return form_error(title, action, form, AppError::Validation(errors)),
    };

    match state.auto_service.replace(id, dto).await {
        Ok(_) => redirect_with_flash("Auto actualizado correctamente!"),
        Err(e) => form_error(title, action, form, e),
    }
}

/// Eliminar auto
async fn delete_auto(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.auto_service.delete(id).await {
        Ok(()) => redirect_with_flash("Auto eliminado correctamente!"),
        Err(e) => error_page(e),
    }
}
