//! Field checks shared by the entity payloads.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::errors::ModelError;

pub fn required(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::invalid(format!("{field} required")));
    }
    Ok(())
}

pub fn email(field: &str, value: &str) -> Result<(), ModelError> {
    required(field, value)?;
    let v = value.trim();
    match v.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => Ok(()),
        _ => Err(ModelError::invalid(format!("{field} is not a valid email"))),
    }
}

pub fn one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), ModelError> {
    if !allowed.contains(&value) {
        return Err(ModelError::invalid(format!(
            "{field} must be one of: {}",
            allowed.join(", ")
        )));
    }
    Ok(())
}

pub fn non_negative(field: &str, value: Option<i32>) -> Result<(), ModelError> {
    match value {
        Some(v) if v < 0 => Err(ModelError::invalid(format!("{field} must not be negative"))),
        _ => Ok(()),
    }
}

pub fn non_negative_decimal(field: &str, value: Option<Decimal>) -> Result<(), ModelError> {
    match value {
        Some(v) if v.is_sign_negative() && !v.is_zero() => {
            Err(ModelError::invalid(format!("{field} must not be negative")))
        }
        _ => Ok(()),
    }
}

/// Blank optional strings from forms are stored as NULL.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|s| if s.trim().is_empty() { None } else { Some(s) })
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
/// in partial updates. Use with `#[serde(default)]`.
pub fn nullable<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
