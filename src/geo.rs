//! Geofence admission: great-circle distance between the venue and the
//! attendee, compared against the venue radius.

/// IUGG mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Outcome of the admission check for one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Within the radius. Carries the parsed coordinates so the caller
    /// records exactly what was verified.
    Allowed {
        latitude: f64,
        longitude: f64,
        distance_m: f64,
    },
    /// Coordinates missing or unusable; admit without recording a position.
    Unverified,
    /// Strictly outside the radius.
    Rejected { distance_m: f64 },
}

/// Haversine great-circle distance in meters on the mean Earth sphere.
/// Accurate to well under half a meter at geofence scales.
pub fn distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Parse one raw coordinate field. `None` for missing, blank, unparseable,
/// or non-finite input.
pub fn parse_coord(raw: Option<&str>) -> Option<f64> {
    let s = raw?.trim();
    if s.is_empty() {
        return None;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Evaluate a submission's coordinates against the active venue.
///
/// Unusable coordinates degrade to `Unverified` rather than rejecting:
/// the attendee is admitted with no position recorded. Rejection requires
/// the measured distance to strictly exceed the radius, so a point exactly
/// at the fence is allowed.
pub fn evaluate(
    venue_lat: f64,
    venue_lon: f64,
    radius_m: f64,
    user_lat: Option<&str>,
    user_lon: Option<&str>,
) -> Decision {
    let (latitude, longitude) = match (parse_coord(user_lat), parse_coord(user_lon)) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => return Decision::Unverified,
    };

    let d = distance_m(venue_lat, venue_lon, latitude, longitude);
    if d > radius_m {
        Decision::Rejected { distance_m: d }
    } else {
        Decision::Allowed {
            latitude,
            longitude,
            distance_m: d,
        }
    }
}
