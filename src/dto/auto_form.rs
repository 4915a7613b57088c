use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::dto::auto_dto::AutoDto;
use crate::utils::validation::{collect, non_empty, parse_date, parse_decimal, parse_integer};

// Formulario HTML de auto; todos los campos llegan como texto
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoForm {
    pub first_name: String,
    pub last_name: String,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub purchase_date: String,
    pub email: String,
    pub assignment_date: String,
    pub cost: String,
    pub department: String,
    pub tenure_years: String,
}

impl AutoForm {
    /// Formulario vacío para un auto nuevo, con la fecha de asignación en `today`
    pub fn for_new(today: NaiveDate) -> Self {
        Self {
            assignment_date: today.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    /// Convierte el texto del formulario en DTO; campos vacíos quedan en None
    pub fn to_dto(&self) -> Result<AutoDto, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let purchase_date = parse_date(&self.purchase_date).unwrap_or_else(|e| {
            collect(&mut errors, "purchaseDate", Err(e));
            None
        });
        let assignment_date = parse_date(&self.assignment_date).unwrap_or_else(|e| {
            collect(&mut errors, "assignmentDate", Err(e));
            None
        });
        let cost = parse_decimal(&self.cost).unwrap_or_else(|e| {
            collect(&mut errors, "cost", Err(e));
            None
        });
        let tenure_years = parse_integer(&self.tenure_years).unwrap_or_else(|e| {
            collect(&mut errors, "tenureYears", Err(e));
            None
        });

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(self.text_fields(purchase_date, assignment_date, cost, tenure_years))
    }

    /// Convierte y valida el registro completo, reportando juntos los errores
    /// de formato y los de validación
    pub fn to_valid_dto(&self) -> Result<AutoDto, ValidationErrors> {
        let (dto, mut errors) = match self.to_dto() {
            Ok(dto) => (dto, ValidationErrors::new()),
            Err(errors) => (self.text_fields(None, None, None, None), errors),
        };

        if let Err(invalid) = dto.validate() {
            for (field, field_errors) in invalid.field_errors() {
                if errors.field_errors().contains_key(field) {
                    continue;
                }
                for error in field_errors {
                    errors.add(field, error.clone());
                }
            }
        }

        if errors.is_empty() {
            Ok(dto)
        } else {
            Err(errors)
        }
    }

    fn text_fields(
        &self,
        purchase_date: Option<NaiveDate>,
        assignment_date: Option<NaiveDate>,
        cost: Option<rust_decimal::Decimal>,
        tenure_years: Option<i32>,
    ) -> AutoDto {
        AutoDto {
            id: None,
            first_name: non_empty(&self.first_name),
            last_name: non_empty(&self.last_name),
            brand: non_empty(&self.brand),
            model: non_empty(&self.model),
            color: non_empty(&self.color),
            purchase_date,
            email: non_empty(&self.email),
            assignment_date,
            cost,
            department: non_empty(&self.department),
            tenure_years,
        }
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn date_text(value: Option<NaiveDate>) -> String {
    value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

impl From<&AutoDto> for AutoForm {
    fn from(dto: &AutoDto) -> Self {
        Self {
            first_name: text(&dto.first_name),
            last_name: text(&dto.last_name),
            brand: text(&dto.brand),
            model: text(&dto.model),
            color: text(&dto.color),
            purchase_date: date_text(dto.purchase_date),
            email: text(&dto.email),
            assignment_date: date_text(dto.assignment_date),
            cost: dto.cost.map(|c| c.to_string()).unwrap_or_default(),
            department: text(&dto.department),
            tenure_years: dto.tenure_years.map(|t| t.to_string()).unwrap_or_default(),
        }
    }
}
