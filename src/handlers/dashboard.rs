use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use std::collections::BTreeMap;

use crate::audit;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::location;
use crate::models::session as sessions;
use crate::models::stats::{self, Dimension};
use crate::templates_structs::{DashboardTemplate, PageContext};

pub async fn index(
    req: HttpRequest,
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let ctx = PageContext::build(&session);

    let venue = location::find_active(&conn)?;
    let active_session = sessions::find_active(&conn)?;
    let live_count = stats::live_count(&conn)?;

    let (zone_counts, group_counts, category_counts) = match &active_session {
        Some(s) => (
            stats::count_by_dimension(&conn, s.id, Dimension::Zone)?,
            stats::count_by_dimension(&conn, s.id, Dimension::Group)?,
            stats::count_by_dimension(&conn, s.id, Dimension::Category)?,
        ),
        None => (BTreeMap::new(), BTreeMap::new(), BTreeMap::new()),
    };

    let last_ended = sessions::find_last_ended(&conn)?;
    let archived = sessions::find_archived(&conn)?;
    let audit_entries = audit::recent(&conn, 10).unwrap_or_default();

    // Shareable check-in link, shown next to the active session
    let info = req.connection_info();
    let checkin_url = format!("{}://{}/attendance", info.scheme(), info.host());

    let tmpl = DashboardTemplate {
        ctx,
        venue,
        active_session,
        live_count,
        zone_counts,
        group_counts,
        category_counts,
        last_ended,
        archived,
        checkin_url,
        audit_entries,
    };
    render(tmpl)
}
