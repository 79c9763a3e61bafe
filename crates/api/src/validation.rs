//! Input Validation
//!
//! Pure checks run before any storage access.

use crate::error::ApiError;
use std::ops::RangeInclusive;

/// Accepted location length, in characters
pub const LOCATION_LEN: RangeInclusive<usize> = 2..=50;

/// Accepted temperature range (°C)
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = -100.0..=100.0;

/// Check a location against `^[A-Za-z0-9_-]{2,50}$`
pub fn validate_location(location: &str) -> Result<&str, ApiError> {
    let len = location.chars().count();
    let allowed = location
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if allowed && LOCATION_LEN.contains(&len) {
        Ok(location)
    } else {
        Err(ApiError::InvalidLocation)
    }
}

/// Parse the `temp` query value into a finite, in-range temperature
///
/// Surrounding whitespace is ignored; the rest must be a complete number.
pub fn parse_temperature(raw: Option<&str>) -> Result<f64, ApiError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let Some(raw) = raw else {
        return Err(ApiError::MissingTemperature);
    };

    let value: f64 = raw.parse().map_err(|_| ApiError::InvalidTemperature)?;
    if !value.is_finite() || !TEMPERATURE_RANGE.contains(&value) {
        return Err(ApiError::InvalidTemperature);
    }

    Ok(value)
}
