/// One check-in row. Live rows (`is_archived` false) belong to the session
/// that was active when they were admitted; archival freezes them.
#[derive(Debug, Clone)]
pub struct AttendanceRecord {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub timestamp: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub zone: String,
    pub group_name: String,
    pub church: String,
    pub category: String,
    pub meeting_session_id: Option<i64>,
    pub is_archived: bool,
}

/// A validated submission, ready for the admission pipeline. Coordinates stay
/// raw: the geofence decides whether they are usable.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub firstname: String,
    pub lastname: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub zone: String,
    pub group_name: String,
    pub church: String,
    pub category: String,
    pub latitude_raw: Option<String>,
    pub longitude_raw: Option<String>,
}

/// A successful admission: the stored record plus what the geofence measured.
/// `distance_m` is `None` exactly when the check-in was unverified.
#[derive(Debug, Clone)]
pub struct AdmittedAttendance {
    pub record: AttendanceRecord,
    pub distance_m: Option<f64>,
    pub location_verified: bool,
}
