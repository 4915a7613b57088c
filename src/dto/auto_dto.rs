use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::auto::{AutoRecord, NewAuto};
use crate::utils::validation::{
    collect, today, validate_email_format, validate_not_blank, validate_not_future,
};

const FIRST_NAME_REQUIRED: &str = "El nombre es obligatorio";
const LAST_NAME_REQUIRED: &str = "El apellido es obligatorio";
const BRAND_REQUIRED: &str = "La marca es obligatoria";
const MODEL_REQUIRED: &str = "El modelo es obligatorio";
const COLOR_REQUIRED: &str = "El color es obligatorio";
const EMAIL_REQUIRED: &str = "El email es obligatorio";
const PURCHASE_DATE_FUTURE: &str = "La fecha de compra no puede ser futura";
const ASSIGNMENT_DATE_FUTURE: &str = "La fecha de asignación no puede ser futura";

// Auto tal como viaja por la API (request de creación y response)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoDto {
    pub id: Option<i64>,
    #[serde(alias = "nombre")]
    pub first_name: Option<String>,
    #[serde(alias = "apellido")]
    pub last_name: Option<String>,
    #[serde(alias = "marca")]
    pub brand: Option<String>,
    #[serde(alias = "modelo")]
    pub model: Option<String>,
    pub color: Option<String>,
    #[serde(alias = "fechaCompra")]
    pub purchase_date: Option<NaiveDate>,
    pub email: Option<String>,
    #[serde(alias = "fechaContratacion")]
    pub assignment_date: Option<NaiveDate>,
    #[serde(alias = "costo")]
    pub cost: Option<Decimal>,
    #[serde(alias = "departamento")]
    pub department: Option<String>,
    #[serde(alias = "antiguedad")]
    pub tenure_years: Option<i32>,
}

// Request para actualizar un auto: solo los campos presentes sobrescriben
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoPatch {
    #[serde(alias = "nombre")]
    pub first_name: Option<String>,
    #[serde(alias = "apellido")]
    pub last_name: Option<String>,
    #[serde(alias = "marca")]
    pub brand: Option<String>,
    #[serde(alias = "modelo")]
    pub model: Option<String>,
    pub color: Option<String>,
    #[serde(alias = "fechaCompra")]
    pub purchase_date: Option<NaiveDate>,
    pub email: Option<String>,
    #[serde(alias = "fechaContratacion")]
    pub assignment_date: Option<NaiveDate>,
    #[serde(alias = "costo")]
    pub cost: Option<Decimal>,
    #[serde(alias = "departamento")]
    pub department: Option<String>,
    #[serde(alias = "antiguedad")]
    pub tenure_years: Option<i32>,
}

/// Valida un campo de texto obligatorio
fn required(errors: &mut ValidationErrors, field: &'static str, value: &Option<String>, message: &'static str) {
    collect(errors, field, validate_not_blank(value.as_deref().unwrap_or(""), message));
}

/// Valida un campo de texto que, si viene, no puede estar vacío
fn not_blank_if_present(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &Option<String>,
    message: &'static str,
) {
    if let Some(value) = value {
        collect(errors, field, validate_not_blank(value, message));
    }
}

fn dates_not_future(
    errors: &mut ValidationErrors,
    purchase_date: Option<NaiveDate>,
    assignment_date: Option<NaiveDate>,
    today: NaiveDate,
) {
    if let Some(date) = purchase_date {
        collect(errors, "purchaseDate", validate_not_future(date, today, PURCHASE_DATE_FUTURE));
    }
    if let Some(date) = assignment_date {
        collect(errors, "assignmentDate", validate_not_future(date, today, ASSIGNMENT_DATE_FUTURE));
    }
}

fn into_result(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

impl AutoDto {
    /// Valida el DTO completo tomando `today` como referencia para las fechas
    pub fn validate_at(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        required(&mut errors, "firstName", &self.first_name, FIRST_NAME_REQUIRED);
        required(&mut errors, "lastName", &self.last_name, LAST_NAME_REQUIRED);
        required(&mut errors, "brand", &self.brand, BRAND_REQUIRED);
        required(&mut errors, "model", &self.model, MODEL_REQUIRED);
        required(&mut errors, "color", &self.color, COLOR_REQUIRED);

        match self.email.as_deref() {
            Some(email) if !email.trim().is_empty() => {
                collect(&mut errors, "email", validate_email_format(email));
            }
            _ => required(&mut errors, "email", &None, EMAIL_REQUIRED),
        }

        dates_not_future(&mut errors, self.purchase_date, self.assignment_date, today);
        into_result(errors)
    }

    /// Convierte el DTO validado en un registro nuevo; el id recibido se ignora
    pub fn into_new_auto(self) -> Result<NewAuto, ValidationErrors> {
        self.validate()?;

        Ok(NewAuto {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            brand: self.brand.unwrap_or_default(),
            model: self.model.unwrap_or_default(),
            color: self.color.unwrap_or_default(),
            purchase_date: self.purchase_date,
            email: self.email.unwrap_or_default(),
            assignment_date: self.assignment_date,
            cost: self.cost,
            department: self.department,
            tenure_years: self.tenure_years,
        })
    }
}

impl Validate for AutoDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.validate_at(today())
    }
}

impl AutoPatch {
    /// Valida solo los campos presentes
    pub fn validate_at(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        not_blank_if_present(&mut errors, "firstName", &self.first_name, FIRST_NAME_REQUIRED);
        not_blank_if_present(&mut errors, "lastName", &self.last_name, LAST_NAME_REQUIRED);
        not_blank_if_present(&mut errors, "brand", &self.brand, BRAND_REQUIRED);
        not_blank_if_present(&mut errors, "model", &self.model, MODEL_REQUIRED);
        not_blank_if_present(&mut errors, "color", &self.color, COLOR_REQUIRED);

        if let Some(email) = &self.email {
            if email.trim().is_empty() {
                required(&mut errors, "email", &None, EMAIL_REQUIRED);
            } else {
                collect(&mut errors, "email", validate_email_format(email));
            }
        }

        dates_not_future(&mut errors, self.purchase_date, self.assignment_date, today);
        into_result(errors)
    }

    /// Aplica el patch sobre el registro existente. El id nunca cambia.
    pub fn apply_to(self, auto: &mut AutoRecord) {
        if let Some(first_name) = self.first_name {
            auto.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            auto.last_name = last_name;
        }
        if let Some(brand) = self.brand {
            auto.brand = brand;
        }
        if let Some(model) = self.model {
            auto.model = model;
        }
        if let Some(color) = self.color {
            auto.color = color;
        }
        if let Some(purchase_date) = self.purchase_date {
            auto.purchase_date = Some(purchase_date);
        }
        if let Some(email) = self.email {
            auto.email = email;
        }
        if let Some(assignment_date) = self.assignment_date {
            auto.assignment_date = Some(assignment_date);
        }
        if let Some(cost) = self.cost {
            auto.cost = Some(cost);
        }
        if let Some(department) = self.department {
            auto.department = Some(department);
        }
        if let Some(tenure_years) = self.tenure_years {
            auto.tenure_years = Some(tenure_years);
        }
    }
}

impl Validate for AutoPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.validate_at(today())
    }
}

impl From<AutoRecord> for AutoDto {
    fn from(auto: AutoRecord) -> Self {
        Self {
            id: Some(auto.id),
            first_name: Some(auto.first_name),
            last_name: Some(auto.last_name),
            brand: Some(auto.brand),
            model: Some(auto.model),
            color: Some(auto.color),
            purchase_date: auto.purchase_date,
            email: Some(auto.email),
            assignment_date: auto.assignment_date,
            cost: auto.cost,
            department: auto.department,
            tenure_years: auto.tenure_years,
        }
    }
}
