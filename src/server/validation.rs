//! Query parameter validation for the map endpoints.
//!
//! Every failing field is reported, not just the first one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-field validation messages, keyed by parameter name.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// Raw parameters for `GET /map/locations`.
#[derive(Debug, Default, Deserialize)]
pub struct LocationParams {
    pub location: Option<String>,
    pub access_token: Option<String>,
}

impl LocationParams {
    /// Returns the location text to search for.
    pub fn validate(self) -> Result<String, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let location = required(&mut errors, "location", self.location);
        required(&mut errors, "access_token", self.access_token);

        errors.into_result(|| location.unwrap_or_default())
    }
}

/// Raw parameters for `GET /map/coords`.
#[derive(Debug, Default, Deserialize)]
pub struct CoordsParams {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub access_token: Option<String>,
}

impl CoordsParams {
    /// Returns `(lat, lng)`.
    pub fn validate(self) -> Result<(f64, f64), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let lat = numeric(&mut errors, "lat", self.lat);
        let lng = numeric(&mut errors, "lng", self.lng);
        required(&mut errors, "access_token", self.access_token);

        errors.into_result(|| (lat.unwrap_or_default(), lng.unwrap_or_default()))
    }
}

fn required(errors: &mut ValidationErrors, field: &str, value: Option<String>) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            errors.add(field, format!("The {} field is required.", field));
            None
        }
    }
}

fn numeric(errors: &mut ValidationErrors, field: &str, value: Option<String>) -> Option<f64> {
    let value = required(errors, field, value)?;
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => {
            errors.add(field, format!("The {} must be a number.", field));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(location: Option<&str>, token: Option<&str>) -> LocationParams {
        LocationParams {
            location: location.map(String::from),
            access_token: token.map(String::from),
        }
    }

    fn coords(lat: Option<&str>, lng: Option<&str>, token: Option<&str>) -> CoordsParams {
        CoordsParams {
            lat: lat.map(String::from),
            lng: lng.map(String::from),
            access_token: token.map(String::from),
        }
    }

    #[test]
    fn test_location_valid() {
        let text = location(Some("Chicago, IL"), Some("tok")).validate().unwrap();
        assert_eq!(text, "Chicago, IL");
    }

    #[test]
    fn test_location_keeps_text_verbatim() {
        let text = location(Some(" 5th & Main "), Some("tok")).validate().unwrap();
        assert_eq!(text, " 5th & Main ");
    }

    #[test]
    fn test_location_reports_all_missing_fields() {
        let errors = location(None, None).validate().unwrap_err();
        assert_eq!(
            errors.get("location"),
            Some(&["The location field is required.".to_string()][..])
        );
        assert_eq!(
            errors.get("access_token"),
            Some(&["The access_token field is required.".to_string()][..])
        );
    }

    #[test]
    fn test_location_blank_is_missing() {
        let errors = location(Some("   "), Some("tok")).validate().unwrap_err();
        assert!(errors.get("location").is_some());
        assert!(errors.get("access_token").is_none());
    }

    #[test]
    fn test_coords_valid() {
        let (lat, lng) = coords(Some("41.8"), Some("-87.6"), Some("tok"))
            .validate()
            .unwrap();
        assert_eq!(lat, 41.8);
        assert_eq!(lng, -87.6);
    }

    #[test]
    fn test_coords_accepts_integers_and_whitespace() {
        let (lat, lng) = coords(Some(" 41 "), Some("-87"), Some("tok"))
            .validate()
            .unwrap();
        assert_eq!((lat, lng), (41.0, -87.0));
    }

    #[test]
    fn test_coords_rejects_non_numeric() {
        let errors = coords(Some("north"), Some("-87.6"), Some("tok"))
            .validate()
            .unwrap_err();
        assert_eq!(
            errors.get("lat"),
            Some(&["The lat must be a number.".to_string()][..])
        );
        assert!(errors.get("lng").is_none());
    }

    #[test]
    fn test_coords_rejects_non_finite() {
        for bad in ["NaN", "inf", "-infinity"] {
            let errors = coords(Some("1"), Some(bad), Some("tok"))
                .validate()
                .unwrap_err();
            assert!(errors.get("lng").is_some(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_coords_missing_token() {
        let errors = coords(Some("1"), Some("2"), None).validate().unwrap_err();
        assert!(errors.get("access_token").is_some());
    }

    #[test]
    fn test_coords_does_not_range_check() {
        assert!(coords(Some("95"), Some("200"), Some("tok")).validate().is_ok());
    }
}
