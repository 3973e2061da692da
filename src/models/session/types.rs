/// One meeting session. `is_active` is true for at most one row system-wide;
/// `end_time` and the `attendee_count` snapshot are written exactly once, at
/// close.
#[derive(Debug, Clone)]
pub struct MeetingSession {
    pub id: i64,
    pub meeting_name: String,
    pub location_id: Option<i64>,
    pub start_time: String,
    pub end_time: Option<String>,
    pub is_active: bool,
    pub attendee_count: i64,
}

/// What closing the active session archived.
#[derive(Debug, Clone)]
pub struct ArchivalSummary {
    pub session_id: i64,
    pub meeting_name: String,
    pub archived_count: i64,
}

/// What the purge-everything operation deleted.
#[derive(Debug, Clone, Copy)]
pub struct PurgeSummary {
    pub sessions_deleted: usize,
    pub records_deleted: usize,
}

/// What deleting one session removed.
#[derive(Debug, Clone)]
pub struct DeletedSession {
    pub meeting_name: String,
    pub records_deleted: usize,
}
