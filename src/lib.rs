//! Autos Manager
//!
//! Servicio CRUD de asignación de automóviles con API REST JSON
//! (`/api/automoviles`) y vistas HTML renderizadas en el servidor.

pub mod config;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
