//! Modelo de Auto
//!
//! Este módulo contiene el struct AutoRecord (registro persistido) y NewAuto
//! (registro aún sin id). Mapea exactamente a la tabla `automoviles`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Auto persistido - siempre tiene id asignado por el store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AutoRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub purchase_date: Option<NaiveDate>,
    pub email: String,
    pub assignment_date: Option<NaiveDate>,
    pub cost: Option<Decimal>,
    pub department: Option<String>,
    pub tenure_years: Option<i32>,
}

/// Auto pendiente de insertar; el id lo asigna el store
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuto {
    pub first_name: String,
    pub last_name: String,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub purchase_date: Option<NaiveDate>,
    pub email: String,
    pub assignment_date: Option<NaiveDate>,
    pub cost: Option<Decimal>,
    pub department: Option<String>,
    pub tenure_years: Option<i32>,
}

impl NewAuto {
    /// Convierte en registro persistido con el id asignado
    pub fn with_id(self, id: i64) -> AutoRecord {
        AutoRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            brand: self.brand,
            model: self.model,
            color: self.color,
            purchase_date: self.purchase_date,
            email: self.email,
            assignment_date: self.assignment_date,
            cost: self.cost,
            department: self.department,
            tenure_years: self.tenure_years,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_auto() -> NewAuto {
        NewAuto {
            first_name: "Juan".to_string(),
            last_name: "Pérez".to_string(),
            brand: "Nissan".to_string(),
            model: "Sentra".to_string(),
            color: "Negro".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2020, 1, 15),
            email: "juan.perez@example.com".to_string(),
            assignment_date: NaiveDate::from_ymd_opt(2020, 1, 15),
            cost: Some(Decimal::new(5_000_000, 2)),
            department: Some("Tecnología".to_string()),
            tenure_years: Some(1),
        }
    }

    #[test]
    fn test_with_id_keeps_all_fields() {
        let record = new_auto().with_id(5);
        assert_eq!(record.id, 5);
        assert_eq!(record.first_name, "Juan");
        assert_eq!(record.email, "juan.perez@example.com");
        assert_eq!(record.cost, Some(Decimal::new(5_000_000, 2)));
        assert_eq!(record.department.as_deref(), Some("Tecnología"));
    }

    #[test]
    fn test_records_with_different_ids_are_not_equal() {
        let a = new_auto().with_id(1);
        let b = new_auto().with_id(2);
        assert_ne!(a, b);
        assert_eq!(a, new_auto().with_id(1));
    }
}
