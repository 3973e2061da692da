use std::collections::BTreeMap;

use actix_session::Session;
use askama::Template;

use crate::audit::AuditEntry;
use crate::auth::csrf;
use crate::auth::session::{Flash, admin_name, take_flash};
use crate::models::location::MeetingLocation;
use crate::models::session::MeetingSession;

/// Common context shared by all pages. Templates access these as
/// `ctx.flash`, `ctx.csrf_token`, `ctx.admin`.
pub struct PageContext {
    pub flash: Option<Flash>,
    pub csrf_token: String,
    pub admin: Option<String>,
}

impl PageContext {
    pub fn build(session: &Session) -> Self {
        PageContext {
            flash: take_flash(session),
            csrf_token: csrf::get_or_create_token(session),
            admin: admin_name(session),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub ctx: PageContext,
    pub active_session: Option<MeetingSession>,
    pub venue: Option<MeetingLocation>,
}

#[derive(Template)]
#[template(path = "attendance_form.html")]
pub struct AttendanceFormTemplate {
    pub ctx: PageContext,
    pub meeting_name: String,
    pub venue_name: String,
}

#[derive(Template)]
#[template(path = "success.html")]
pub struct SuccessTemplate {
    pub ctx: PageContext,
    pub meeting_name: String,
    pub live_count: i64,
}

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub csrf_token: String,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub venue: Option<MeetingLocation>,
    pub active_session: Option<MeetingSession>,
    pub live_count: i64,
    pub zone_counts: BTreeMap<String, i64>,
    pub group_counts: BTreeMap<String, i64>,
    pub category_counts: BTreeMap<String, i64>,
    pub last_ended: Option<MeetingSession>,
    pub archived: Vec<MeetingSession>,
    pub checkin_url: String,
    pub audit_entries: Vec<AuditEntry>,
}

#[derive(Template)]
#[template(path = "admin/location_setup.html")]
pub struct LocationSetupTemplate {
    pub ctx: PageContext,
    pub current: Option<MeetingLocation>,
    pub history: Vec<MeetingLocation>,
}

#[derive(Template)]
#[template(path = "admin/start_meeting.html")]
pub struct StartMeetingTemplate {
    pub ctx: PageContext,
    pub venue: MeetingLocation,
    pub active_session: Option<MeetingSession>,
}
