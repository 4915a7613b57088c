//! DTOs expuestos a la API REST y al formulario web

pub mod auto_dto;
pub mod auto_form;

pub use auto_dto::{AutoDto, AutoPatch};
pub use auto_form::AutoForm;
