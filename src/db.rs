//! SQLite connection pool and schema bootstrap.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

pub type DbPool = Pool<SqliteConnectionManager>;

pub const MIGRATIONS: &str = include_str!("schema.sql");

/// Applied to every pooled connection. Concurrent check-in writers wait
/// on a locked database rather than failing immediately.
const PRAGMAS: &str = "
    PRAGMA journal_mode=WAL;
    PRAGMA foreign_keys=ON;
    PRAGMA busy_timeout=5000;
";

pub fn init_pool(database_url: &str) -> DbPool {
    let manager =
        SqliteConnectionManager::file(database_url).with_init(|conn| conn.execute_batch(PRAGMAS));
    Pool::builder()
        .max_size(8)
        .build(manager)
        .expect("Failed to create DB pool")
}

pub fn run_migrations(pool: &DbPool) {
    let conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");
    log::info!("Attendance schema ready");
}
