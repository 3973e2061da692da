use std::collections::BTreeMap;

use rusqlite::{Connection, params};

/// Grouping axes for attendance breakdowns. A closed set mapped to fixed
/// column names, so no caller input ever reaches the SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Zone,
    Group,
    Category,
}

impl Dimension {
    fn column(self) -> &'static str {
        match self {
            Dimension::Zone => "zone",
            Dimension::Group => "group_name",
            Dimension::Category => "category",
        }
    }
}

/// Attendee counts for one session, grouped along one dimension. Records with
/// an empty value contribute to no bucket.
pub fn count_by_dimension(
    conn: &Connection,
    session_id: i64,
    dimension: Dimension,
) -> rusqlite::Result<BTreeMap<String, i64>> {
    let col = dimension.column();
    let sql = format!(
        "SELECT {col}, COUNT(*) FROM attendance \
         WHERE meeting_session_id = ?1 AND {col} <> '' \
         GROUP BY {col}"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![session_id], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;
    rows.collect()
}

/// Count of live (not yet archived) records, system-wide.
pub fn live_count(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM attendance WHERE is_archived = 0",
        [],
        |row| row.get(0),
    )
}
