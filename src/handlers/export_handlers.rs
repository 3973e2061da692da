use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::audit;
use crate::auth::session as auth_session;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::attendance::AttendanceRecord;
use crate::models::session as sessions;

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

const RECORD_HEADER: &str =
    "id,firstname,lastname,surname,email,phone,zone,group,church,category,latitude,longitude,checked_in_at";

fn record_fields(r: &AttendanceRecord) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{}",
        r.id,
        escape_csv(&r.firstname),
        escape_csv(&r.lastname),
        escape_csv(&r.surname),
        escape_csv(&r.email),
        escape_csv(&r.phone),
        escape_csv(&r.zone),
        escape_csv(&r.group_name),
        escape_csv(&r.church),
        escape_csv(&r.category),
        r.latitude.map(|v| v.to_string()).unwrap_or_default(),
        r.longitude.map(|v| v.to_string()).unwrap_or_default(),
        r.timestamp,
    )
}

/// CSV download of one archived session's records.
pub async fn export_session_csv(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let mut conn = pool.get()?;

    let (meeting, records) =
        sessions::find_archived_session_with_records(&mut conn, id)?.ok_or(AppError::NotFound)?;

    let mut csv = format!("{RECORD_HEADER}\n");
    for r in &records {
        csv.push_str(&record_fields(r));
        csv.push('\n');
    }

    let admin = auth_session::admin_name(&session).unwrap_or_default();
    let details = serde_json::json!({
        "scope": "session",
        "meeting_name": meeting.meeting_name,
        "records": records.len(),
    });
    let _ = audit::log(&conn, &admin, "attendance.exported", "session", id, details);

    let today = chrono::Utc::now().format("%Y-%m-%d");
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"attendance-session-{id}-{today}.csv\""),
        ))
        .body(csv))
}

/// CSV download across every archived session, one row per record.
pub async fn export_all_csv(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let mut conn = pool.get()?;
    let exports = sessions::find_archived_with_records(&mut conn)?;

    let mut csv = format!("session_id,meeting_name,ended_at,{RECORD_HEADER}\n");
    let mut total = 0usize;
    for (meeting, records) in &exports {
        for r in records {
            csv.push_str(&format!(
                "{},{},{},{}\n",
                meeting.id,
                escape_csv(&meeting.meeting_name),
                meeting.end_time.clone().unwrap_or_default(),
                record_fields(r),
            ));
            total += 1;
        }
    }

    let admin = auth_session::admin_name(&session).unwrap_or_default();
    let details = serde_json::json!({
        "scope": "all",
        "sessions": exports.len(),
        "records": total,
    });
    let _ = audit::log(&conn, &admin, "attendance.exported", "attendance", 0, details);

    let today = chrono::Utc::now().format("%Y-%m-%d");
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"attendance-all-{today}.csv\""),
        ))
        .body(csv))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_csv_quotes_only_when_needed() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("with, comma"), "\"with, comma\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn record_fields_renders_missing_coordinates_empty() {
        let record = AttendanceRecord {
            id: 7,
            firstname: "Ada".to_string(),
            lastname: "Obi".to_string(),
            surname: "Eze".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+2348012345678".to_string(),
            timestamp: "2026-03-01T09:15:00".to_string(),
            latitude: None,
            longitude: None,
            zone: "ZONE 1".to_string(),
            group_name: "AUXANO".to_string(),
            church: "Main, Campus".to_string(),
            category: "Member".to_string(),
            meeting_session_id: Some(3),
            is_archived: true,
        };

        let line = record_fields(&record);
        assert!(line.starts_with("7,Ada,Obi,Eze,ada@example.com,"));
        assert!(line.contains("\"Main, Campus\""));
        assert!(line.contains(",,,"), "empty latitude and longitude: {line}");
        assert!(line.ends_with("2026-03-01T09:15:00"));
    }
}
