//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación.

pub mod auto_service;

pub use auto_service::{AutoService, DashboardStats};
