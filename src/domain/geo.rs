//! Geographic point in decimal degrees.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::GlacierError;

/// A WGS-84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    /// Latitude in degrees, `-90.0..=90.0`.
    pub latitude: f64,
    /// Longitude in degrees, `-180.0..=180.0`.
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a point without validating it.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Checks that both coordinates are finite and within range.
    ///
    /// # Errors
    ///
    /// Returns [`GlacierError::InvalidRequest`] naming the offending
    /// coordinate.
    pub fn validate(&self) -> Result<(), GlacierError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(GlacierError::InvalidRequest(format!(
                "invalid latitude: {}",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(GlacierError::InvalidRequest(format!(
                "invalid longitude: {}",
                self.longitude
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundaries() {
        assert!(GeoPoint::new(90.0, 180.0).validate().is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_and_nan() {
        assert!(GeoPoint::new(90.5, 0.0).validate().is_err());
        assert!(GeoPoint::new(0.0, -180.1).validate().is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn serializes_with_full_field_names() {
        let json = serde_json::to_value(GeoPoint::new(28.6139, 77.209)).unwrap_or_default();
        assert_eq!(json["latitude"], 28.6139);
        assert_eq!(json["longitude"], 77.209);
    }
}
