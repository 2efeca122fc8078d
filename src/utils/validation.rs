//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! de formularios y conversión de tipos.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use uuid::Uuid;
use validator::ValidationError;

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    static ref DIGITS: Regex = Regex::new(r"^\d+$").unwrap();
}

/// Normaliza un campo opcional del formulario: recorta espacios y
/// convierte el vacío en None
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Validar y convertir string a UUID
pub fn validate_uuid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar y convertir string a fecha `YYYY-MM-DD` (formato y calendario)
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    if !ISO_DATE.is_match(value) {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        return Err(error);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("calendar_date");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar un slot de fecha opcional: vacío o `YYYY-MM-DD`
pub fn validate_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    match normalize_optional(value) {
        Some(v) => validate_date(&v).map(Some),
        None => Ok(None),
    }
}

/// Validar un importe; se acepta la coma como separador decimal
pub fn validate_amount(value: &str) -> Result<Decimal, ValidationError> {
    let normalized = value.trim().replace(' ', "").replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| {
        let mut error = ValidationError::new("amount");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar un entero sin signo escrito con separadores de miles opcionales
pub fn validate_digits(value: &str) -> Result<i64, ValidationError> {
    let normalized: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if !DIGITS.is_match(&normalized) {
        let mut error = ValidationError::new("digits");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    normalized.parse::<i64>().map_err(|_| {
        let mut error = ValidationError::new("digits");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Formato de presentación `DD/MM/YYYY`
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_uuid() {
        let valid_uuid = "550e8400-e29b-41d4-a716-446655440000";
        assert!(validate_uuid(valid_uuid).is_ok());
        assert!(validate_uuid("invalid-uuid").is_err());
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-01-15").is_ok());
        assert!(validate_date(" 2024-01-15 ").is_ok());
        assert!(validate_date("2024/01/15").is_err());
        assert!(validate_date("15-01-2024").is_err());
        assert!(validate_date("2023-02-29").is_err());
        assert!(validate_date("2024-1-5").is_err());
    }

    #[test]
    fn test_validate_optional_date() {
        assert_eq!(validate_optional_date(None).unwrap(), None);
        assert_eq!(validate_optional_date(Some("  ")).unwrap(), None);
        assert!(validate_optional_date(Some("2024-05-01")).unwrap().is_some());
        assert!(validate_optional_date(Some("mañana")).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount("349,90").unwrap(), Decimal::new(34990, 2));
        assert_eq!(validate_amount("1 200.5").unwrap(), Decimal::new(12005, 1));
        assert!(validate_amount("abc").is_err());
        assert!(validate_amount("").is_err());
    }

    #[test]
    fn test_validate_digits() {
        assert_eq!(validate_digits("12 500").unwrap(), 12500);
        assert_eq!(validate_digits("0").unwrap(), 0);
        assert!(validate_digits("-3").is_err());
        assert!(validate_digits("12.5").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-5).is_err());
    }

    #[test]
    fn test_normalize_optional_and_display() {
        assert_eq!(normalize_optional(Some("  note ")), Some("note".to_string()));
        assert_eq!(normalize_optional(Some("   ")), None);
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(format_display_date(date), "09/03/2024");
    }
}
