//! Rutas HTTP
//!
//! `auto_routes` expone la API REST JSON y `web_routes` las vistas HTML.
//! Ambas delegan exclusivamente en `AutoService`.

pub mod auto_routes;
pub mod web_routes;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Router completo de la aplicación (sin CORS, que depende de la configuración)
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/automoviles", auto_routes::create_auto_router())
        .merge(web_routes::create_web_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
