use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::auth::csrf;
use crate::auth::session::{self as auth_session, Flash};
use crate::db::DbPool;
use crate::errors::{AppError, CheckinError, render};
use crate::models::attendance::{self, Candidate};
use crate::models::location;
use crate::models::session as sessions;
use crate::models::stats;
use crate::templates_structs::{AttendanceFormTemplate, IndexTemplate, PageContext, SuccessTemplate};
use crate::validate;

#[derive(Deserialize)]
pub struct AttendanceForm {
    pub firstname: String,
    pub lastname: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub zone: String,
    pub group_name: String,
    pub church: String,
    pub category: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub csrf_token: String,
}

/// First validation problem in form order, if any.
fn first_error(form: &AttendanceForm) -> Option<String> {
    validate::validate_required(&form.firstname, "First name", 100)
        .or_else(|| validate::validate_required(&form.lastname, "Last name", 100))
        .or_else(|| validate::validate_required(&form.surname, "Surname", 100))
        .or_else(|| validate::validate_email(&form.email))
        .or_else(|| validate::validate_phone(&form.phone))
        .or_else(|| validate::validate_required(&form.zone, "Zone", 100))
        .or_else(|| validate::validate_required(&form.group_name, "Group", 100))
        .or_else(|| validate::validate_required(&form.church, "Church", 150))
        .or_else(|| validate::validate_required(&form.category, "Category", 100))
}

pub async fn index(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let active_session = sessions::find_active(&conn)?;
    let venue = location::find_active(&conn)?;

    let ctx = PageContext::build(&session);
    render(IndexTemplate {
        ctx,
        active_session,
        venue,
    })
}

pub async fn attendance_form(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;

    let Some(active) = sessions::find_active(&conn)? else {
        auth_session::set_flash(
            &session,
            Flash::warning("No meeting is currently open for check-in."),
        );
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/"))
            .finish());
    };

    let venue_name = match active.location_id {
        Some(id) => location::find_by_id(&conn, id)?
            .map(|l| l.name)
            .unwrap_or_default(),
        None => String::new(),
    };

    let ctx = PageContext::build(&session);
    render(AttendanceFormTemplate {
        ctx,
        meeting_name: active.meeting_name,
        venue_name,
    })
}

pub async fn attendance_submit(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<AttendanceForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    if let Some(message) = first_error(&form) {
        auth_session::set_flash(&session, Flash::error(message));
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/attendance"))
            .finish());
    }

    let candidate = Candidate {
        firstname: form.firstname.trim().to_string(),
        lastname: form.lastname.trim().to_string(),
        surname: form.surname.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        zone: form.zone.trim().to_string(),
        group_name: form.group_name.trim().to_string(),
        church: form.church.trim().to_string(),
        category: form.category.trim().to_string(),
        latitude_raw: form.latitude.clone(),
        longitude_raw: form.longitude.clone(),
    };

    let mut conn = pool.get()?;
    match attendance::submit(&mut conn, &candidate) {
        Ok(admitted) => {
            let meeting_name = match admitted.record.meeting_session_id {
                Some(id) => sessions::find_by_id(&conn, id)?
                    .map(|s| s.meeting_name)
                    .unwrap_or_default(),
                None => String::new(),
            };
            let live_count = stats::live_count(&conn)?;

            if admitted.location_verified {
                auth_session::set_flash(&session, Flash::success("You are checked in. Welcome!"));
            } else {
                auth_session::set_flash(
                    &session,
                    Flash::warning("You are checked in, but your location could not be verified."),
                );
            }
            auth_session::stash_checkin_result(&session, &meeting_name, live_count);
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/success"))
                .finish())
        }
        Err(CheckinError::Storage(e)) => Err(AppError::Db(e)),
        Err(e @ (CheckinError::NoActiveSession | CheckinError::NoLocation)) => {
            auth_session::set_flash(&session, Flash::error(e.to_string()));
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/"))
                .finish())
        }
        Err(e) => {
            auth_session::set_flash(&session, Flash::error(e.to_string()));
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/attendance"))
                .finish())
        }
    }
}

pub async fn success_page(session: Session) -> Result<HttpResponse, AppError> {
    let Some((meeting_name, live_count)) = auth_session::take_checkin_result(&session) else {
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/"))
            .finish());
    };

    let ctx = PageContext::build(&session);
    render(SuccessTemplate {
        ctx,
        meeting_name,
        live_count,
    })
}
