//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos desde formularios.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

/// Fecha actual en la zona horaria local del servidor
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Crea un ValidationError con código y mensaje legible
pub fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(validation_error("not_blank", message));
    }
    Ok(())
}

/// Validar formato de email
pub fn validate_email_format(value: &str) -> Result<(), ValidationError> {
    if !validator::validate_email(value) {
        let mut error = validation_error("email", "Formato de email inválido");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que una fecha no sea futura
pub fn validate_not_future(
    date: NaiveDate,
    today: NaiveDate,
    message: &'static str,
) -> Result<(), ValidationError> {
    if date > today {
        let mut error = validation_error("past_or_present", message);
        error.add_param("value".into(), &date.to_string());
        return Err(error);
    }
    Ok(())
}

/// Agrega el error al campo si la validación falló
pub fn collect(errors: &mut ValidationErrors, field: &'static str, result: Result<(), ValidationError>) {
    if let Err(error) = result {
        errors.add(field, error);
    }
}

/// Convierte ValidationErrors en un mapa campo -> mensajes
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let messages = field_errors
                .iter()
                .map(|error| match &error.message {
                    Some(message) => message.to_string(),
                    None => error.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Campo de formulario opcional: vacío significa ausente
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Validar y convertir string a fecha (YYYY-MM-DD)
pub fn parse_date(value: &str) -> Result<Option<NaiveDate>, ValidationError> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                let mut error = validation_error("date", "Fecha inválida, use el formato AAAA-MM-DD");
                error.add_param("format".into(), &"YYYY-MM-DD".to_string());
                error
            }),
    }
}

/// Validar y convertir string a decimal
pub fn parse_decimal(value: &str) -> Result<Option<Decimal>, ValidationError> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => Decimal::from_str(&raw.replace(',', "."))
            .map(Some)
            .map_err(|_| validation_error("decimal", "Monto inválido")),
    }
}

/// Validar y convertir string a entero
pub fn parse_integer(value: &str) -> Result<Option<i32>, ValidationError> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i32>()
            .map(Some)
            .map_err(|_| validation_error("integer", "Debe ser un número entero")),
    }
}
