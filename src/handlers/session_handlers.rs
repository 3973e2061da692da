use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use super::auth_handlers::CsrfOnly;
use crate::audit;
use crate::auth::csrf;
use crate::auth::session::{self as auth_session, Flash};
use crate::db::DbPool;
use crate::errors::{AppError, CheckinError, render};
use crate::models::location;
use crate::models::session as sessions;
use crate::templates_structs::{PageContext, StartMeetingTemplate};

#[derive(Deserialize)]
pub struct StartMeetingForm {
    pub meeting_name: String,
    pub csrf_token: String,
}

pub async fn start_meeting_page(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;

    let Some(venue) = location::find_active(&conn)? else {
        auth_session::set_flash(
            &session,
            Flash::warning("Set a meeting location before starting a meeting."),
        );
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/admin/location"))
            .finish());
    };
    let active_session = sessions::find_active(&conn)?;

    let ctx = PageContext::build(&session);
    render(StartMeetingTemplate {
        ctx,
        venue,
        active_session,
    })
}

pub async fn start_meeting(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<StartMeetingForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let mut conn = pool.get()?;

    let Some(venue) = location::find_active(&conn)? else {
        auth_session::set_flash(
            &session,
            Flash::error("No meeting location set. Save one first."),
        );
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/admin/location"))
            .finish());
    };

    match sessions::start(&mut conn, &form.meeting_name, venue.id) {
        Ok(started) => {
            let admin = auth_session::admin_name(&session).unwrap_or_default();
            let details = serde_json::json!({
                "meeting_name": started.meeting_name,
                "location_id": venue.id,
            });
            let _ = audit::log(&conn, &admin, "session.started", "session", started.id, details);

            auth_session::set_flash(
                &session,
                Flash::success(format!("Meeting '{}' started", started.meeting_name)),
            );
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin"))
                .finish())
        }
        Err(CheckinError::Storage(e)) => Err(AppError::Db(e)),
        Err(e) => {
            auth_session::set_flash(&session, Flash::error(e.to_string()));
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin/meetings/start"))
                .finish())
        }
    }
}

pub async fn end_meeting(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let mut conn = pool.get()?;
    match sessions::end(&mut conn) {
        Ok(summary) => {
            let admin = auth_session::admin_name(&session).unwrap_or_default();
            let details = serde_json::json!({
                "meeting_name": summary.meeting_name,
                "archived_count": summary.archived_count,
            });
            let _ = audit::log(
                &conn,
                &admin,
                "session.ended",
                "session",
                summary.session_id,
                details,
            );

            auth_session::set_flash(
                &session,
                Flash::success(format!(
                    "Meeting '{}' ended; {} attendee(s) archived",
                    summary.meeting_name, summary.archived_count
                )),
            );
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin"))
                .finish())
        }
        Err(CheckinError::NoActiveSession) => {
            auth_session::set_flash(&session, Flash::warning("No active meeting to end."));
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin"))
                .finish())
        }
        Err(CheckinError::Storage(e)) => Err(AppError::Db(e)),
        Err(e) => {
            auth_session::set_flash(&session, Flash::error(e.to_string()));
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin"))
                .finish())
        }
    }
}

pub async fn purge_records(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let mut conn = pool.get()?;
    match sessions::purge_all(&mut conn) {
        Ok(summary) => {
            let admin = auth_session::admin_name(&session).unwrap_or_default();
            let details = serde_json::json!({
                "sessions_deleted": summary.sessions_deleted,
                "records_deleted": summary.records_deleted,
            });
            let _ = audit::log(&conn, &admin, "records.purged", "attendance", 0, details);

            auth_session::set_flash(
                &session,
                Flash::success(format!(
                    "Purged {} record(s) across {} session(s)",
                    summary.records_deleted, summary.sessions_deleted
                )),
            );
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin"))
                .finish())
        }
        Err(CheckinError::Storage(e)) => Err(AppError::Db(e)),
        Err(e) => {
            auth_session::set_flash(&session, Flash::error(e.to_string()));
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin"))
                .finish())
        }
    }
}

pub async fn delete_session(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let id = path.into_inner();
    let mut conn = pool.get()?;
    match sessions::delete(&mut conn, id) {
        Ok(Some(deleted)) => {
            let admin = auth_session::admin_name(&session).unwrap_or_default();
            let details = serde_json::json!({
                "meeting_name": deleted.meeting_name,
                "records_deleted": deleted.records_deleted,
            });
            let _ = audit::log(&conn, &admin, "session.deleted", "session", id, details);

            auth_session::set_flash(
                &session,
                Flash::success(format!(
                    "Deleted meeting '{}' and {} record(s)",
                    deleted.meeting_name, deleted.records_deleted
                )),
            );
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin"))
                .finish())
        }
        Ok(None) => {
            auth_session::set_flash(&session, Flash::error("No such meeting session."));
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin"))
                .finish())
        }
        Err(CheckinError::Storage(e)) => Err(AppError::Db(e)),
        Err(e) => {
            auth_session::set_flash(&session, Flash::error(e.to_string()));
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin"))
                .finish())
        }
    }
}
