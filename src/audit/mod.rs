use rusqlite::{Connection, params};
use serde_json::Value;

/// Entries older than this are pruned at startup.
pub const RETENTION_DAYS: i64 = 90;

#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i64,
    pub admin: String,
    pub action: String,
    pub target_type: String,
    pub target_id: i64,
    pub details: String,
    pub created_at: String,
}

/// Record one admin action. Callers ignore the result; the trail never
/// aborts the action it describes.
pub fn log(
    conn: &Connection,
    admin: &str,
    action: &str,
    target_type: &str,
    target_id: i64,
    details: Value,
) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT INTO audit_log (admin, action, target_type, target_id, details)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![admin, action, target_type, target_id, details.to_string()],
    )?;
    Ok(())
}

/// Most recent entries, newest first.
pub fn recent(conn: &Connection, limit: i64) -> Result<Vec<AuditEntry>, rusqlite::Error> {
    let mut stmt = conn.prepare(
        "SELECT id, admin, action, target_type, target_id, details, created_at
         FROM audit_log ORDER BY id DESC LIMIT ?1",
    )?;
    let entries = stmt
        .query_map(params![limit], |row| {
            Ok(AuditEntry {
                id: row.get(0)?,
                admin: row.get(1)?,
                action: row.get(2)?,
                target_type: row.get(3)?,
                target_id: row.get(4)?,
                details: row.get(5)?,
                created_at: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

/// Delete entries older than the retention window. Returns rows removed.
pub fn cleanup_old_entries(conn: &Connection) -> Result<usize, rusqlite::Error> {
    conn.execute(
        "DELETE FROM audit_log
         WHERE created_at < strftime('%Y-%m-%dT%H:%M:%S', 'now', ?1)",
        params![format!("-{RETENTION_DAYS} days")],
    )
}
