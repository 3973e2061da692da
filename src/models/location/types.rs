use crate::errors::CheckinError;
use crate::geo;

/// Radius applied when the admin leaves the field blank.
pub const DEFAULT_RADIUS_M: f64 = 30.0;

/// An admin-configured venue. At most one row is active at a time; saving a
/// new venue deactivates the rest, so the table keeps the full history.
#[derive(Debug, Clone)]
pub struct MeetingLocation {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: f64,
    pub is_active: bool,
    pub created_at: String,
}

/// Validated venue input, built from raw form fields before any write.
#[derive(Debug, Clone)]
pub struct NewLocation {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: f64,
}

impl NewLocation {
    /// Trim and validate raw form fields. A blank radius defaults to
    /// [`DEFAULT_RADIUS_M`].
    pub fn parse(
        name: &str,
        address: &str,
        latitude: &str,
        longitude: &str,
        radius_m: &str,
    ) -> Result<NewLocation, CheckinError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CheckinError::Validation(
                "Location name is required".to_string(),
            ));
        }
        if name.len() > 120 {
            return Err(CheckinError::Validation(
                "Location name must be at most 120 characters".to_string(),
            ));
        }

        let address = address.trim();
        if address.len() > 200 {
            return Err(CheckinError::Validation(
                "Address must be at most 200 characters".to_string(),
            ));
        }

        let latitude = geo::parse_coord(Some(latitude)).ok_or_else(|| {
            CheckinError::Validation("Latitude must be a valid number".to_string())
        })?;
        let longitude = geo::parse_coord(Some(longitude)).ok_or_else(|| {
            CheckinError::Validation("Longitude must be a valid number".to_string())
        })?;

        let radius_m = {
            let raw = radius_m.trim();
            if raw.is_empty() {
                DEFAULT_RADIUS_M
            } else {
                match raw.parse::<f64>() {
                    Ok(r) if r.is_finite() && r > 0.0 => r,
                    _ => {
                        return Err(CheckinError::Validation(
                            "Radius must be a positive number of meters".to_string(),
                        ));
                    }
                }
            }
        };

        Ok(NewLocation {
            name: name.to_string(),
            address: address.to_string(),
            latitude,
            longitude,
            radius_m,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_valid_input() {
        let loc =
            NewLocation::parse(" Main Hall ", " 12 High St ", "6.5244", "3.3792", "50").expect("parse");
        assert_eq!(loc.name, "Main Hall");
        assert_eq!(loc.address, "12 High St");
        assert_eq!(loc.latitude, 6.5244);
        assert_eq!(loc.longitude, 3.3792);
        assert_eq!(loc.radius_m, 50.0);
    }

    #[test]
    fn parse_defaults_blank_radius() {
        let loc = NewLocation::parse("Main Hall", "", "6.5244", "3.3792", "  ").expect("parse");
        assert_eq!(loc.radius_m, DEFAULT_RADIUS_M);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(NewLocation::parse("", "", "6.5", "3.4", "30").is_err());
        assert!(NewLocation::parse("Hall", &"x".repeat(201), "6.5", "3.4", "30").is_err());
        assert!(NewLocation::parse("Hall", "", "north", "3.4", "30").is_err());
        assert!(NewLocation::parse("Hall", "", "6.5", "", "30").is_err());
        assert!(NewLocation::parse("Hall", "", "6.5", "3.4", "0").is_err());
        assert!(NewLocation::parse("Hall", "", "6.5", "3.4", "-5").is_err());
    }
}
