//! Acceso a datos de autos

pub mod auto_repository;
pub mod memory_auto_repository;

pub use auto_repository::{AutoRepository, PgAutoRepository};
pub use memory_auto_repository::InMemoryAutoRepository;
