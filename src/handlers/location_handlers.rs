use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::audit;
use crate::auth::csrf;
use crate::auth::session::{self as auth_session, Flash};
use crate::db::DbPool;
use crate::errors::{AppError, CheckinError, render};
use crate::models::location::{self, NewLocation};
use crate::templates_structs::{LocationSetupTemplate, PageContext};

#[derive(Deserialize)]
pub struct LocationForm {
    pub name: String,
    pub address: String,
    pub latitude: String,
    pub longitude: String,
    pub radius_m: String,
    pub csrf_token: String,
}

pub async fn location_page(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let ctx = PageContext::build(&session);
    let current = location::find_active(&conn)?;
    let history = location::find_all(&conn)?;

    render(LocationSetupTemplate {
        ctx,
        current,
        history,
    })
}

pub async fn location_save(
    pool: web::Data<DbPool>,
    session: Session,
    form: web::Form<LocationForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let new = match NewLocation::parse(
        &form.name,
        &form.address,
        &form.latitude,
        &form.longitude,
        &form.radius_m,
    ) {
        Ok(new) => new,
        Err(e) => {
            auth_session::set_flash(&session, Flash::error(e.to_string()));
            return Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin/location"))
                .finish());
        }
    };

    let mut conn = pool.get()?;
    match location::set_active(&mut conn, &new) {
        Ok(saved) => {
            let admin = auth_session::admin_name(&session).unwrap_or_default();
            let details = serde_json::json!({
                "name": saved.name,
                "latitude": saved.latitude,
                "longitude": saved.longitude,
                "radius_m": saved.radius_m,
            });
            let _ = audit::log(&conn, &admin, "location.saved", "location", saved.id, details);

            auth_session::set_flash(
                &session,
                Flash::success(format!("Meeting location '{}' saved", saved.name)),
            );
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin/meetings/start"))
                .finish())
        }
        Err(CheckinError::Storage(e)) => Err(AppError::Db(e)),
        Err(e) => {
            auth_session::set_flash(&session, Flash::error(e.to_string()));
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/admin/location"))
                .finish())
        }
    }
}
