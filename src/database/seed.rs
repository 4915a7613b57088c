//! Datos de prueba iniciales

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::models::auto::NewAuto;
use crate::repositories::auto_repository::AutoRepository;
use crate::utils::errors::AppResult;

#[allow(clippy::too_many_arguments)]
fn sample(
    first_name: &str,
    last_name: &str,
    brand: &str,
    model: &str,
    color: &str,
    date: Option<NaiveDate>,
    email: &str,
    cost: Decimal,
    department: &str,
    tenure_years: i32,
) -> NewAuto {
    NewAuto {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        brand: brand.to_string(),
        model: model.to_string(),
        color: color.to_string(),
        purchase_date: date,
        email: email.to_string(),
        assignment_date: date,
        cost: Some(cost),
        department: Some(department.to_string()),
        tenure_years: Some(tenure_years),
    }
}

pub fn sample_autos() -> Vec<NewAuto> {
    vec![
        sample(
            "Juan", "Pérez", "Audi", "Q7", "Rojo",
            NaiveDate::from_ymd_opt(2020, 1, 15),
            "juan.perez@example.com",
            Decimal::new(5_000_000, 2),
            "Tecnología", 20,
        ),
        sample(
            "María", "Gómez", "BMW", "X5", "Azul",
            NaiveDate::from_ymd_opt(2020, 2, 20),
            "maria.gomez@example.com",
            Decimal::new(6_000_000, 2),
            "Mecánica", 25,
        ),
        sample(
            "Carlos", "Rodríguez", "Mercedes-Benz", "C-Class", "Negro",
            NaiveDate::from_ymd_opt(2020, 3, 10),
            "carlos.rodriguez@example.com",
            Decimal::new(7_000_000, 2),
            "Mecánica", 30,
        ),
    ]
}

/// Carga los autos de prueba solo si el store está vacío.
/// Devuelve cuántos registros se insertaron.
pub async fn seed_if_empty(repository: &dyn AutoRepository) -> AppResult<usize> {
    if repository.count().await? > 0 {
        info!("📦 El store ya tiene datos, se omite la carga inicial");
        return Ok(0);
    }

    let autos = sample_autos();
    let total = autos.len();
    for auto in autos {
        repository.insert(auto).await?;
    }

    info!("📦 Se han cargado {} autos de prueba", total);
    Ok(total)
}
