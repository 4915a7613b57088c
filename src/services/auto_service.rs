//! Servicio de autos
//!
//! Orquesta las búsquedas en el store, garantiza la unicidad del email,
//! aplica las actualizaciones parciales y traduce entre DTO y entidad.
//! Tanto la API REST como las vistas web pasan exclusivamente por aquí.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, info};
use validator::Validate;

use crate::dto::auto_dto::{AutoDto, AutoPatch};
use crate::repositories::auto_repository::AutoRepository;
use crate::utils::errors::{duplicate_email_error, not_found_error, AppResult};

/// Estadísticas del dashboard web
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total: usize,
    pub average_cost: Decimal,
    /// Cantidad de autos por marca, ordenado por marca
    pub brands: Vec<(String, usize)>,
}

impl DashboardStats {
    /// Calcula las estadísticas; un costo ausente cuenta como cero
    pub fn from_autos(autos: &[AutoDto]) -> Self {
        let total = autos.len();
        let sum: Decimal = autos.iter().filter_map(|a| a.cost).sum();
        let average_cost = (sum / Decimal::from(total.max(1)))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        let mut brands: BTreeMap<String, usize> = BTreeMap::new();
        for auto in autos {
            let brand = auto.brand.clone().unwrap_or_default();
            *brands.entry(brand).or_insert(0) += 1;
        }

        Self {
            total,
            average_cost,
            brands: brands.into_iter().collect(),
        }
    }
}

#[derive(Clone)]
pub struct AutoService {
    repository: Arc<dyn AutoRepository>,
}

impl AutoService {
    pub fn new(repository: Arc<dyn AutoRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_all(&self) -> AppResult<Vec<AutoDto>> {
        let autos = self.repository.find_all().await?;
        Ok(autos.into_iter().map(AutoDto::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<AutoDto> {
        let auto = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error(id))?;

        Ok(AutoDto::from(auto))
    }

    pub async fn create(&self, dto: AutoDto) -> AppResult<AutoDto> {
        let new_auto = dto.into_new_auto()?;

        // Verificar que el email no exista
        if self.repository.find_by_email(&new_auto.email).await?.is_some() {
            return Err(duplicate_email_error(&new_auto.email));
        }

        let saved = self.repository.insert(new_auto).await?;
        info!(id = saved.id, email = %saved.email, "🚗 Auto creado");
        Ok(AutoDto::from(saved))
    }

    pub async fn update(&self, id: i64, patch: AutoPatch) -> AppResult<AutoDto> {
        patch.validate()?;

        let mut existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error(id))?;

        if let Some(email) = patch.email.as_deref() {
            if email != existing.email {
                self.ensure_email_available(id, email).await?;
            }
        }

        patch.apply_to(&mut existing);
        let updated = self.repository.update(existing).await?;
        info!(id = updated.id, "✏️ Auto actualizado");
        Ok(AutoDto::from(updated))
    }

    /// Reemplaza el registro completo; los campos opcionales ausentes quedan vacíos.
    /// Lo usa el formulario web de edición, que siempre envía todos los campos.
    pub async fn replace(&self, id: i64, dto: AutoDto) -> AppResult<AutoDto> {
        let replacement = dto.into_new_auto()?;

        if !self.repository.exists_by_id(id).await? {
            return Err(not_found_error(id));
        }
        self.ensure_email_available(id, &replacement.email).await?;

        let updated = self.repository.update(replacement.with_id(id)).await?;
        info!(id = updated.id, "✏️ Auto reemplazado");
        Ok(AutoDto::from(updated))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(not_found_error(id));
        }

        self.repository.delete_by_id(id).await?;
        info!(id, "🗑️ Auto eliminado");
        Ok(())
    }

    pub async fn list_by_department(&self, department: &str) -> AppResult<Vec<AutoDto>> {
        let autos = self.repository.find_by_department(department).await?;
        debug!(department, found = autos.len(), "Búsqueda por departamento");
        Ok(autos.into_iter().map(AutoDto::from).collect())
    }

    pub async fn dashboard(&self) -> AppResult<DashboardStats> {
        let autos = self.list_all().await?;
        Ok(DashboardStats::from_autos(&autos))
    }

    // El email no puede pertenecer a otro auto
    async fn ensure_email_available(&self, id: i64, email: &str) -> AppResult<()> {
        match self.repository.find_by_email(email).await? {
            Some(owner) if owner.id != id => Err(duplicate_email_error(email)),
            _ => Ok(()),
        }
    }
}
