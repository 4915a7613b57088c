//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El cableado es explícito: el store se
//! inyecta en el servicio y el servicio en el estado.

use std::sync::Arc;

use crate::repositories::auto_repository::AutoRepository;
use crate::repositories::memory_auto_repository::InMemoryAutoRepository;
use crate::services::auto_service::AutoService;

#[derive(Clone)]
pub struct AppState {
    pub auto_service: AutoService,
}

impl AppState {
    pub fn new(repository: Arc<dyn AutoRepository>) -> Self {
        Self {
            auto_service: AutoService::new(repository),
        }
    }

    /// Estado sobre un store en memoria vacío
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryAutoRepository::new()))
    }
}
