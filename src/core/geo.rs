use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoordinateError {
    #[error("{axis} `{raw}` is not a number")]
    NotANumber { axis: Axis, raw: String },
    #[error("{axis} {value} is outside {min}..={max}")]
    OutOfRange { axis: Axis, value: f64, min: f64, max: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn bounds(self) -> (f64, f64) {
        match self {
            Axis::Latitude => (-90.0, 90.0),
            Axis::Longitude => (-180.0, 180.0),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Parses user or provider text such as `"40"`, `" 40.0 "` or `"-73.98"` into degrees.
pub fn parse_degrees(axis: Axis, raw: &str) -> Result<f64, CoordinateError> {
    let value: f64 = raw.trim().parse().map_err(|_| CoordinateError::NotANumber {
        axis,
        raw: raw.to_string(),
    })?;
    validate_degrees(axis, value)
}

/// Rejects NaN, infinities and values outside the axis range.
pub fn validate_degrees(axis: Axis, value: f64) -> Result<f64, CoordinateError> {
    let (min, max) = axis.bounds();
    if !value.is_finite() {
        return Err(CoordinateError::NotANumber { axis, raw: value.to_string() });
    }
    if value < min || value > max {
        return Err(CoordinateError::OutOfRange { axis, value, min, max });
    }
    Ok(value)
}

/// Wire form of a coordinate: providers and older records send decimal strings,
/// hand-edited records may hold plain numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDegrees {
    Number(f64),
    Text(String),
}

impl RawDegrees {
    pub fn resolve(&self, axis: Axis) -> Result<f64, CoordinateError> {
        match self {
            RawDegrees::Number(v) => validate_degrees(axis, *v),
            RawDegrees::Text(s) => parse_degrees(axis, s),
        }
    }
}

/// `deserialize_with` helper for fields that may be a decimal string or a number.
pub fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawDegrees::deserialize(deserializer)? {
        RawDegrees::Number(v) => Ok(v),
        RawDegrees::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_and_decimal_text_parse_to_same_value() {
        assert_eq!(parse_degrees(Axis::Latitude, "40").unwrap(), 40.0);
        assert_eq!(parse_degrees(Axis::Latitude, "40.0").unwrap(), 40.0);
        assert_eq!(parse_degrees(Axis::Longitude, " -73.5 ").unwrap(), -73.5);
    }

    #[test]
    fn rejects_garbage_and_out_of_range() {
        assert!(matches!(
            parse_degrees(Axis::Latitude, "north"),
            Err(CoordinateError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_degrees(Axis::Latitude, "90.5"),
            Err(CoordinateError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_degrees(Axis::Longitude, "-180.01"),
            Err(CoordinateError::OutOfRange { .. })
        ));
        assert!(validate_degrees(Axis::Longitude, f64::NAN).is_err());
        assert!(parse_degrees(Axis::Latitude, "inf").is_err());
    }

    #[test]
    fn raw_degrees_accepts_both_wire_forms() {
        let text: RawDegrees = serde_json::from_str("\"12.25\"").unwrap();
        let number: RawDegrees = serde_json::from_str("12.25").unwrap();
        assert_eq!(text.resolve(Axis::Latitude).unwrap(), 12.25);
        assert_eq!(number.resolve(Axis::Latitude).unwrap(), 12.25);
    }
}
